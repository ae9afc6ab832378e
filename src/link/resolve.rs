use super::types::{LinkTarget, ResolvedLink};
use super::utils::{percent_decode, slugify};
use crate::section::{Document, Section};
use tracing::debug;

/// Splits an authored target into its path and section reference.
///
/// Returns `None` for anything that is not an in-app link (external URLs,
/// bare words, an empty `#`).
pub fn parse_target(target: &str) -> Option<LinkTarget> {
    let target = target.trim();
    if let Some(reference) = target.strip_prefix('#') {
        let reference = percent_decode(reference);
        if reference.trim().is_empty() {
            return None;
        }
        return Some(LinkTarget::Section { reference });
    }

    if !target.starts_with('/') || target.starts_with("//") {
        return None;
    }
    let (path, reference) = match target.split_once('#') {
        Some((path, reference)) => (path, Some(percent_decode(reference))),
        None => (target, None),
    };
    Some(LinkTarget::Document {
        path: percent_decode(path),
        reference: reference.filter(|r| !r.trim().is_empty()),
    })
}

/// Match a decoded reference against sections, first rule wins:
///
/// 1. case-insensitive title equality
/// 2. id equality
/// 3. title slug equality
/// 4. containment either way, case-insensitive
pub fn match_section<'a>(
    reference: &str,
    sections: &'a [Section],
) -> Option<&'a Section> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    let lowered = reference.to_lowercase();

    sections
        .iter()
        .find(|s| s.title.to_lowercase() == lowered)
        .or_else(|| sections.iter().find(|s| s.id == reference))
        .or_else(|| find_by_slug(reference, sections))
        .or_else(|| {
            sections.iter().find(|s| {
                let title = s.title.to_lowercase();
                !title.is_empty()
                    && (title.contains(&lowered) || lowered.contains(&title))
            })
        })
}

/// Match only by id, then by slug. Used for URL fragments.
pub fn match_id_or_slug<'a>(
    reference: &str,
    sections: &'a [Section],
) -> Option<&'a Section> {
    let reference = percent_decode(reference.trim());
    sections
        .iter()
        .find(|s| s.id == reference)
        .or_else(|| find_by_slug(&reference, sections))
}

/// A reference may be written as the slug itself or as text that slugifies
/// to the same thing.
fn find_by_slug<'a>(
    reference: &str,
    sections: &'a [Section],
) -> Option<&'a Section> {
    let lowered = reference.to_lowercase();
    let ref_slug = slugify(reference);
    if ref_slug.is_empty() {
        return None;
    }
    sections.iter().find(|s| {
        let slug = slugify(&s.title);
        slug == lowered || slug == ref_slug
    })
}

fn same_document(reference: String, sections: &[Section]) -> ResolvedLink {
    match match_section(&reference, sections) {
        Some(section) => ResolvedLink::SameDocument {
            section_id: Some(section.id.clone()),
            section_title: section.title.clone(),
        },
        None => {
            debug!(reference, "deferring unresolved section link");
            ResolvedLink::SameDocument {
                section_id: None,
                section_title: reference,
            }
        }
    }
}

/// Resolve `target` against the sections of the current document.
///
/// Cross-document links keep their reference as an unresolved title.
pub fn resolve(target: &str, current: &[Section]) -> Option<ResolvedLink> {
    resolve_in(target, current, &[])
}

/// Resolve `target`, also matching cross-document references against the
/// target document when it is among `documents`.
pub fn resolve_in(
    target: &str,
    current: &[Section],
    documents: &[Document],
) -> Option<ResolvedLink> {
    match parse_target(target)? {
        LinkTarget::Section { reference } => {
            Some(same_document(reference, current))
        }
        LinkTarget::Document { path, reference } => {
            let document = documents.iter().find(|d| {
                d.path.trim_end_matches('/') == path.trim_end_matches('/')
            });
            let matched = match (&reference, document) {
                (Some(reference), Some(document)) => {
                    match_section(reference, &document.sections)
                }
                _ => None,
            };
            if document.is_none() {
                debug!(path, "cross-document link to unknown document");
            }
            Some(ResolvedLink::CrossDocument {
                path,
                section_id: matched.map(|s| s.id.clone()),
                section_title: matched.map(|s| s.title.clone()).or(reference),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sections() -> Vec<Section> {
        vec![
            Section::new("section-0", "Guide", 1),
            Section::new("section-1", "Getting Started", 2),
            Section::new("section-2", "Advanced Configuration", 2),
            Section::new("intro", "Overview", 2),
        ]
    }

    #[rstest]
    #[case::exact_title("#getting started", "section-1")]
    #[case::id("#intro", "intro")]
    #[case::slug("#advanced-configuration", "section-2")]
    #[case::encoded("#Getting%20Started", "section-1")]
    #[case::title_contains_ref("#Advanced", "section-2")]
    #[case::ref_contains_title("#The Overview chapter", "intro")]
    fn test_same_document_priority(
        #[case] target: &str,
        #[case] expected_id: &str,
    ) {
        let link = resolve(target, &sections()).unwrap();
        assert_eq!(link.section_id(), Some(expected_id));
    }

    #[test]
    fn test_title_beats_id() {
        let sections = vec![
            Section::new("guide", "Other", 1),
            Section::new("x", "guide", 1),
        ];
        assert_eq!(resolve("#guide", &sections).unwrap().section_id(), Some("x"));
    }

    #[test]
    fn test_unmatched_same_document_is_deferred() {
        let link = resolve("#Nowhere%20Land", &sections()).unwrap();
        assert_eq!(
            link,
            ResolvedLink::SameDocument {
                section_id: None,
                section_title: "Nowhere Land".to_string(),
            }
        );
        assert!(!link.is_resolved());
        assert_eq!(link.href(), "#nowhere-land");
    }

    #[test]
    fn test_cross_document_forms() {
        assert_eq!(
            resolve("/guides/setup", &sections()),
            Some(ResolvedLink::CrossDocument {
                path: "/guides/setup".to_string(),
                section_id: None,
                section_title: None,
            })
        );
        let dead = resolve("/missing#Somewhere", &sections()).unwrap();
        assert_eq!(
            dead,
            ResolvedLink::CrossDocument {
                path: "/missing".to_string(),
                section_id: None,
                section_title: Some("Somewhere".to_string()),
            }
        );
        assert_eq!(dead.href(), "/missing#somewhere");
    }

    #[test]
    fn test_cross_document_against_known_documents() {
        let docs = vec![Document::new("d1", "/guide", sections())];
        let link = resolve_in("/guide/#getting-started", &[], &docs).unwrap();
        assert_eq!(link.section_id(), Some("section-1"));
        assert_eq!(link.href(), "/guide/#section-1");
    }

    #[rstest]
    #[case("")]
    #[case("#")]
    #[case("#   ")]
    #[case("https://example.com/#x")]
    #[case("//cdn.example.com/x")]
    #[case("plain words")]
    fn test_not_a_link(#[case] target: &str) {
        assert_eq!(resolve(target, &sections()), None);
    }

    #[test]
    fn test_match_id_or_slug_ignores_titles_and_substrings() {
        let sections = sections();
        assert_eq!(
            match_id_or_slug("getting-started", &sections).map(|s| &s.id[..]),
            Some("section-1")
        );
        assert_eq!(
            match_id_or_slug("section-2", &sections).map(|s| &s.id[..]),
            Some("section-2")
        );
        assert!(match_id_or_slug("Advanced", &sections).is_none());
    }
}
