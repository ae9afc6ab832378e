use crate::hierarchy::ancestor_indices;
use crate::section::Section;
use std::collections::HashSet;

/// Which sidebar sections are open, keyed by section id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip `id`, returning whether it is now expanded.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Open every ancestor of `section_id` so it becomes visible.
    /// Returns `false` if the section is not in `sections`.
    pub fn expand_path_to(&mut self, sections: &[Section], section_id: &str) -> bool {
        let Some(index) = sections.iter().position(|s| s.id == section_id) else {
            return false;
        };
        self.expanded.extend(
            ancestor_indices(sections, index)
                .into_iter()
                .map(|i| sections[i].id.clone()),
        );
        true
    }
}
