//! Drill-down views: a section's full nested content and its ancestor chain.
use crate::hierarchy::{HierarchyItem, ancestor_indices, subtree_end};
use crate::parse::section_markup;
use crate::section::Section;
use serde::{Deserialize, Serialize};

/// One entry of an ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ancestor {
    pub title: String,
    pub level: usize,
}

impl From<&Section> for Ancestor {
    fn from(section: &Section) -> Self {
        Self {
            title: section.title.clone(),
            level: section.level,
        }
    }
}

/// Everything a drill-down view of one section needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionView {
    pub section_id: String,
    pub title: String,
    pub level: usize,
    /// The section's own body followed by every nested subsection as markup.
    pub content: String,
    /// Root first, parent last.
    pub ancestors: Vec<Ancestor>,
}

/// Ancestors of `sections[index]`, root first.
pub fn ancestor_chain(sections: &[Section], index: usize) -> Vec<Ancestor> {
    ancestor_indices(sections, index)
        .into_iter()
        .map(|i| Ancestor::from(&sections[i]))
        .collect()
}

/// The target's body plus all structurally nested descendants.
///
/// Scanning stops at the first following section whose level is the same
/// as or shallower than the target's.
pub fn nested_content(sections: &[Section], index: usize) -> String {
    let Some(target) = sections.get(index) else {
        return String::new();
    };
    let end = subtree_end(sections, index);
    join_blocks(
        std::iter::once(target.content.clone())
            .chain(sections[index + 1..end].iter().map(section_markup)),
    )
}

/// Full drill-down data for the section with id `target_id`.
pub fn extract_full(
    target_id: &str,
    sections: &[Section],
) -> Option<SectionView> {
    let index = sections.iter().position(|s| s.id == target_id)?;
    extract_at(sections, index)
}

/// Drill-down data for the section at `index`, `None` past the end.
pub fn extract_at(sections: &[Section], index: usize) -> Option<SectionView> {
    let target = sections.get(index)?;
    Some(SectionView {
        section_id: target.id.clone(),
        title: target.title.clone(),
        level: target.level,
        content: nested_content(sections, index),
        ancestors: ancestor_chain(sections, index),
    })
}

/// Tree-side counterpart of [`nested_content`]: serialize a node's body and
/// every descendant in pre-order.
pub fn serialize_subtree(node: &HierarchyItem<Section>) -> String {
    let mut walk = node.preorder().into_iter();
    let head = walk.next().map(|s| s.content.clone()).unwrap_or_default();
    join_blocks(std::iter::once(head).chain(walk.map(section_markup)))
}

fn join_blocks(parts: impl Iterator<Item = String>) -> String {
    parts
        .map(|p| p.trim_end().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build_tree;
    use crate::parse::parse;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn outline(specs: &[(&str, usize, &str)]) -> Vec<Section> {
        specs
            .iter()
            .enumerate()
            .map(|(i, (title, level, body))| {
                Section::new(format!("s{i}"), *title, *level)
                    .with_content(*body)
            })
            .collect()
    }

    fn titles(chain: &[Ancestor]) -> Vec<(&str, usize)> {
        chain.iter().map(|a| (a.title.as_str(), a.level)).collect()
    }

    /// Walks backward from the target keeping each strictly shallower
    /// section. Kept here only as a cross-check for the forward replay.
    fn backward_chain(sections: &[Section], index: usize) -> Vec<Ancestor> {
        let mut chain = Vec::new();
        let mut limit = sections[index].level;
        for section in sections[..index].iter().rev() {
            if section.level < limit {
                chain.push(Ancestor::from(section));
                limit = section.level;
            }
        }
        chain.reverse();
        chain
    }

    #[test]
    fn test_ancestor_chain_closes_siblings() {
        let sections =
            outline(&[("H", 1, ""), ("A", 2, ""), ("B", 3, ""), ("C", 2, ""), ("D", 1, "")]);
        assert_eq!(titles(&ancestor_chain(&sections, 3)), vec![("H", 1)]);
        assert_eq!(
            titles(&ancestor_chain(&sections, 2)),
            vec![("H", 1), ("A", 2)]
        );
        assert!(ancestor_chain(&sections, 4).is_empty());
    }

    #[test]
    fn test_nested_extraction_boundary() {
        let sections =
            outline(&[("X", 1, ""), ("Y", 2, "y-body"), ("Z", 1, "z-body")]);
        let view = extract_full("s0", &sections).unwrap();
        assert!(view.content.contains("## Y"));
        assert!(view.content.contains("y-body"));
        assert!(!view.content.contains("Z"));
        assert!(!view.content.contains("z-body"));
    }

    #[test]
    fn test_extract_full_view() {
        let sections = parse(
            "# Guide\nintro\n## Install [setup]\nsteps\n### Linux\napt\n#### Debian\nsame\n## Usage\nrun",
            None,
        );
        let view = extract_full("section-1", &sections).unwrap();
        assert_eq!(view.title, "Install");
        assert_eq!(titles(&view.ancestors), vec![("Guide", 1)]);
        assert_snapshot!(view.content, @r"
        steps

        ### Linux
        apt

        #### Debian
        same
        ");
    }

    #[test]
    fn test_extract_unknown_id() {
        let sections = outline(&[("X", 1, "")]);
        assert_eq!(extract_full("nope", &sections), None);
        assert_eq!(extract_at(&sections, 1), None);
        assert_eq!(extract_at(&sections, 0).map(|v| v.title), Some("X".to_string()));
    }

    #[test]
    fn test_nested_content_matches_tree_serialization() {
        let sections = outline(&[
            ("A", 1, "a"),
            ("B", 3, "b"),
            ("C", 2, ""),
            ("D", 4, "d"),
            ("E", 1, "e"),
        ]);
        let tree = build_tree(sections.clone());
        assert_eq!(nested_content(&sections, 0), serialize_subtree(&tree[0]));
        assert_eq!(nested_content(&sections, 4), serialize_subtree(&tree[1]));
    }

    proptest! {
        #[test]
        fn forward_replay_agrees_with_backward_walk(
            levels in prop::collection::vec(1usize..8, 1..40)
        ) {
            let sections: Vec<Section> = levels
                .iter()
                .enumerate()
                .map(|(i, l)| Section::new(format!("s{i}"), format!("T{i}"), *l))
                .collect();
            for index in 0..sections.len() {
                prop_assert_eq!(
                    ancestor_chain(&sections, index),
                    backward_chain(&sections, index)
                );
            }
        }

        #[test]
        fn extraction_agrees_with_tree(
            levels in prop::collection::vec(1usize..6, 1..30)
        ) {
            let sections: Vec<Section> = levels
                .iter()
                .enumerate()
                .map(|(i, l)| {
                    Section::new(format!("s{i}"), format!("T{i}"), *l)
                        .with_content(format!("body {i}"))
                })
                .collect();
            let mut roots = build_tree(sections.clone()).into_iter();
            let mut index = 0;
            while index < sections.len() {
                let root = roots.next().expect("one root per top-level run");
                prop_assert_eq!(
                    nested_content(&sections, index),
                    serialize_subtree(&root)
                );
                index += root.preorder().len();
            }
        }
    }
}
