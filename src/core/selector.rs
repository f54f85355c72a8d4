//! Maps a template index onto one (primary, secondary) path in the
//! hierarchy, wrapping on each axis when the document is smaller than the
//! configured template space.

use thiserror::Error;
use tracing::warn;

use crate::core::hierarchy::{Fragment, Hierarchy, SectionContent};

/// Body used whenever a selected section has nothing to show.
pub const FALLBACK_BODY: &str = "Content not available.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("cannot select content: the hierarchy has no sections")]
    EmptyHierarchy,
}

/// A resolved section: the outer title plus the Markdown body that starts
/// with the outer heading, then the inner heading when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub title: String,
    pub inner_title: Option<String>,
    pub body: Fragment,
}

/// Select the section for 1-based template index `n`.
///
/// outer = ((n - 1) / templates_per_type) mod outer count,
/// inner = ((n - 1) mod templates_per_type) mod inner count.
pub fn select(
    hierarchy: &Hierarchy,
    n: u32,
    templates_per_type: u32,
) -> Result<Selection, SelectError> {
    if hierarchy.is_empty() {
        return Err(SelectError::EmptyHierarchy);
    }
    let per_type = templates_per_type.max(1) as usize;
    let slot = n.saturating_sub(1) as usize;

    let outer_index = (slot / per_type) % hierarchy.len();
    let (title, content) = hierarchy
        .get_index(outer_index)
        .ok_or(SelectError::EmptyHierarchy)?;

    let (inner_title, body) = match content {
        SectionContent::Nested(inner) if !inner.is_empty() => {
            let inner_index = (slot % per_type) % inner.len();
            match inner.get_index(inner_index) {
                Some((inner_title, body)) => (Some(inner_title.clone()), body.as_str()),
                None => (None, FALLBACK_BODY),
            }
        }
        SectionContent::Nested(_) => {
            warn!(section = %title, "section has an empty set of subsections, using fallback content");
            (None, FALLBACK_BODY)
        }
        SectionContent::Direct(body) if !body.is_blank() => (None, body.as_str()),
        SectionContent::Direct(_) => {
            warn!(section = %title, "section has no content, using fallback content");
            (None, FALLBACK_BODY)
        }
    };

    let mut markdown = format!("# {}\n\n", title);
    if let Some(ref inner_title) = inner_title {
        markdown.push_str(&format!("## {}\n\n", inner_title));
    }
    markdown.push_str(body);
    markdown.push('\n');

    Ok(Selection {
        title: title.clone(),
        inner_title,
        body: Fragment::new(markdown),
    })
}
