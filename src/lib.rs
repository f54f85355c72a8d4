//! Decoy Pages: deterministic synthetic documents per crawler identity.
//!
//! A Markdown master document is split into a two-level section tree.
//! Each identity is assigned a template index and a seed; the template picks
//! a section and a document type, the seed drives the fabricated field values
//! and pronouns substituted into that section. The same pair always renders
//! the same document.

pub mod core;
pub mod schema;
pub mod service;
