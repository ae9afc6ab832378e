//! Flat section model shared by every representation of a document.
//!
//! A document body is an ordered list of [`Section`]s in pre-order: parents
//! come before their children and the `level` values alone encode nesting.
//! Trees, block trees and drill-down views are all derived from this list.
use crate::hierarchy::{Hierarchical, HierarchyItem};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deepest level a header can express.
pub const MAX_LEVEL: usize = 99;

/// One header-delimited unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    /// 1-based nesting depth, the number of `#` in the header.
    pub level: usize,
    /// Body text below the header, trailing whitespace trimmed.
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Section {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        level: usize,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level,
            content: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Equality on everything but the generated id.
    pub fn same_shape(&self, other: &Section) -> bool {
        self.title == other.title
            && self.level == other.level
            && self.content == other.content
            && self.tags == other.tags
    }
}

impl Hierarchical for Section {
    fn level(&self) -> usize {
        self.level
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", "#".repeat(self.level), self.title)?;
        if !self.tags.is_empty() {
            write!(f, " [{}]", self.tags.join(", "))?;
        }
        Ok(())
    }
}

/// A section together with its nested subsections.
///
/// Derived from the flat list on demand and never persisted.
pub type HierarchicalSection = HierarchyItem<Section>;

/// Compare two flat lists ignoring ids.
pub fn same_shape(a: &[Section], b: &[Section]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
}

/// A routable document made of flat sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    /// Unique routable key, e.g. `/guides/setup`.
    pub path: String,
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Parent document in the document outline, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Position among the siblings sharing `parent_id`.
    #[serde(default)]
    pub order_index: usize,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        path: impl Into<String>,
        sections: Vec<Section>,
    ) -> Self {
        let path = path.into();
        let title = title_for(&path, &sections);
        Self {
            id: id.into(),
            title,
            path,
            sections,
            tags: Vec::new(),
            parent_id: None,
            order_index: 0,
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

/// A document is titled after its first section, falling back to the last
/// path segment.
pub fn title_for(path: &str, sections: &[Section]) -> String {
    match sections.first() {
        Some(first) if !first.title.is_empty() => first.title.clone(),
        _ => path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_tags() {
        let s = Section::new("s", "Setup", 3).with_tags(["draft", "ops"]);
        assert_eq!(s.to_string(), "### Setup [draft, ops]");
    }

    #[test]
    fn test_document_title_falls_back_to_path() {
        let doc = Document::new("d", "/guides/setup", vec![]);
        assert_eq!(doc.title, "setup");

        let doc = Document::new(
            "d",
            "/guides/setup",
            vec![Section::new("s", "Getting Started", 1)],
        );
        assert_eq!(doc.title, "Getting Started");
    }

    #[test]
    fn test_same_shape_ignores_ids() {
        let a = vec![Section::new("a", "T", 1).with_content("x")];
        let b = vec![Section::new("b", "T", 1).with_content("x")];
        assert!(same_shape(&a, &b));
        assert!(!same_shape(&a, &b[..0]));
    }
}
