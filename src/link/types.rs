use super::utils::{percent_encode, slugify};
use serde::{Deserialize, Serialize};

/// The syntactic shape of an authored link, before any lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// `#<ref>`
    Section { reference: String },
    /// `/<path>` or `/<path>#<ref>`
    Document {
        path: String,
        reference: Option<String>,
    },
}

/// Where an authored link points.
///
/// Unmatched references still resolve: a same-document link keeps only the
/// referenced title so it can be re-checked once the section list changes,
/// and a cross-document link keeps its path so a dead link still renders as
/// a navigable reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResolvedLink {
    SameDocument {
        section_id: Option<String>,
        section_title: String,
    },
    CrossDocument {
        path: String,
        section_id: Option<String>,
        section_title: Option<String>,
    },
}

impl ResolvedLink {
    pub fn section_id(&self) -> Option<&str> {
        match self {
            Self::SameDocument { section_id, .. }
            | Self::CrossDocument { section_id, .. } => section_id.as_deref(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        match self {
            Self::SameDocument { section_id, .. } => section_id.is_some(),
            Self::CrossDocument {
                section_id,
                section_title,
                ..
            } => section_title.is_none() || section_id.is_some(),
        }
    }

    /// Routable href. Sections are addressed by id when known, by the slug
    /// of the referenced title otherwise.
    pub fn href(&self) -> String {
        let fragment = |id: &Option<String>, title: Option<&str>| {
            id.clone().or_else(|| title.map(slugify))
        };
        match self {
            Self::SameDocument {
                section_id,
                section_title,
            } => match fragment(section_id, Some(section_title)) {
                Some(f) => format!("#{}", percent_encode(&f)),
                None => String::new(),
            },
            Self::CrossDocument {
                path,
                section_id,
                section_title,
            } => match fragment(section_id, section_title.as_deref()) {
                Some(f) => {
                    format!("{}#{}", percent_encode(path), percent_encode(&f))
                }
                None => percent_encode(path),
            },
        }
    }
}
