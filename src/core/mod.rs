pub mod config;
pub mod format;
pub mod hierarchy;
pub mod lexicon;
pub mod page;
pub mod record;
pub mod renderer;
pub mod selector;
pub mod template;
