pub mod catalog;
pub mod pronoun;
pub mod value;
