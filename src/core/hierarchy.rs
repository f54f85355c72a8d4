//! Master document parsing: primary (`#`) and secondary (`##`) headings
//! split a Markdown document into a two-level, ordered section tree.

use indexmap::IndexMap;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A Markdown fragment cut from the master document.
///
/// Kept as source text rather than rendered HTML so sections can be
/// re-nested and re-serialized without loss.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self(markdown.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content of one primary section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionContent {
    /// Secondary sections keyed by title, in document order.
    Nested(IndexMap<String, Fragment>),
    /// Raw content of a primary section without secondary headings.
    Direct(Fragment),
}

/// The parsed master document. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hierarchy {
    sections: IndexMap<String, SectionContent>,
}

impl Hierarchy {
    /// Parse a Markdown master document.
    ///
    /// Text before the first primary heading is dropped, as is the intro of
    /// a primary section that has secondary headings. A document without
    /// primary headings yields an empty hierarchy.
    pub fn parse(document: &str) -> Hierarchy {
        let mut sections = IndexMap::new();
        for (title, body) in split_by_heading(document, HeadingLevel::H1) {
            let inner = split_by_heading(body.as_str(), HeadingLevel::H2);
            let content = if inner.is_empty() {
                SectionContent::Direct(body)
            } else {
                SectionContent::Nested(inner)
            };
            sections.insert(title, content);
        }
        Hierarchy { sections }
    }

    pub fn load(path: &Path) -> Result<Hierarchy, HierarchyError> {
        let document = std::fs::read_to_string(path)?;
        let hierarchy = Self::parse(&document);
        info!(
            path = %path.display(),
            sections = hierarchy.len(),
            "parsed master document"
        );
        Ok(hierarchy)
    }

    pub fn from_sections(sections: IndexMap<String, SectionContent>) -> Hierarchy {
        Hierarchy { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&SectionContent> {
        self.sections.get(title)
    }

    pub fn get_index(&self, index: usize) -> Option<(&String, &SectionContent)> {
        self.sections.get_index(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SectionContent)> {
        self.sections.iter()
    }
}

struct HeadingSpan {
    title: String,
    range: Range<usize>,
}

/// Split `document` at every heading of `level`. Each entry maps the
/// heading text to everything up to the next heading of the same level.
/// A repeated title keeps its first position and takes the later body.
fn split_by_heading(document: &str, level: HeadingLevel) -> IndexMap<String, Fragment> {
    let mut headings: Vec<HeadingSpan> = Vec::new();
    let mut current: Option<HeadingSpan> = None;

    for (event, range) in Parser::new(document).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level: l, .. }) if l == level => {
                current = Some(HeadingSpan {
                    title: String::new(),
                    range,
                });
            }
            Event::End(TagEnd::Heading(l)) if l == level => {
                if let Some(heading) = current.take() {
                    headings.push(heading);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(ref mut heading) = current {
                    heading.title.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(ref mut heading) = current {
                    heading.title.push(' ');
                }
            }
            _ => {}
        }
    }

    let mut sections = IndexMap::new();
    for (i, heading) in headings.iter().enumerate() {
        let end = headings
            .get(i + 1)
            .map(|next| next.range.start)
            .unwrap_or(document.len());
        let start = heading.range.end.min(end);
        let body = document[start..end].trim();
        sections.insert(heading.title.trim().to_string(), Fragment::new(body));
    }
    sections
}
