use super::NavigationStateMachine;
use crate::extract::extract_full;
use crate::link::match_id_or_slug;
use crate::section::Document;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Fragment value meaning "the document itself".
pub const ROOT_FRAGMENT: &str = "root";

/// Where the current URL fragment lives.
pub trait Location {
    fn fragment(&self) -> Option<String>;
    fn clear_fragment(&mut self);
}

impl Location for Url {
    fn fragment(&self) -> Option<String> {
        Url::fragment(self)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
    }

    fn clear_fragment(&mut self) {
        self.set_fragment(None);
    }
}

/// Applies `#fragment` deep links on load, at most once per
/// `(document path, fragment)`.
#[derive(Debug, Default)]
pub struct DeepLinkReconciler {
    processed: HashSet<(String, String)>,
}

impl DeepLinkReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate to whatever the fragment names and strip it from the
    /// location. Returns `true` when a navigation was issued.
    ///
    /// Fragments that match no section are left in place.
    pub fn reconcile(
        &mut self,
        navigation: &NavigationStateMachine,
        location: &mut impl Location,
        document: &Document,
    ) -> bool {
        let Some(fragment) = location.fragment() else {
            return false;
        };
        if !self
            .processed
            .insert((document.path.clone(), fragment.clone()))
        {
            return false;
        }

        if fragment == ROOT_FRAGMENT {
            navigation.navigate_to_document(&document.path);
            location.clear_fragment();
            return true;
        }

        let Some(section) = match_id_or_slug(&fragment, &document.sections)
        else {
            debug!(%fragment, path = %document.path, "deep link matched no section");
            return false;
        };
        let Some(view) = extract_full(&section.id, &document.sections) else {
            return false;
        };
        debug!(%fragment, section = %section.id, "consuming deep link");
        navigation.navigate_to_section(
            &document.path,
            &section.id,
            &section.title,
            view,
        );
        location.clear_fragment();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationState;
    use crate::parse::parse;
    use std::cell::Cell;
    use std::rc::Rc;

    fn document() -> Document {
        Document::new(
            "d",
            "/guide",
            parse("# Guide\nintro\n## Advanced Configuration\nknobs", None),
        )
    }

    fn url(fragment: &str) -> Url {
        Url::parse(&format!("https://folio.local/guide#{fragment}")).unwrap()
    }

    #[test]
    fn test_slug_fragment_navigates_once() {
        let nav = NavigationStateMachine::new();
        let changes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&changes);
        nav.subscribe(move |_| counter.set(counter.get() + 1));

        let doc = document();
        let mut reconciler = DeepLinkReconciler::new();
        let mut location = url("advanced-configuration");
        assert!(reconciler.reconcile(&nav, &mut location, &doc));
        assert_eq!(Location::fragment(&location), None);
        assert!(nav.is_at_section("/guide", "section-1"));

        // The effect reruns with the same link.
        let mut again = url("advanced-configuration");
        assert!(!reconciler.reconcile(&nav, &mut again, &doc));
        assert!(!reconciler.reconcile(&nav, &mut location, &doc));
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn test_root_fragment() {
        let nav = NavigationStateMachine::new();
        let mut location = url("root");
        assert!(DeepLinkReconciler::new().reconcile(&nav, &mut location, &document()));
        assert_eq!(
            nav.state(),
            NavigationState::AtDocumentRoot {
                path: "/guide".to_string()
            }
        );
        assert_eq!(location.as_str(), "https://folio.local/guide");
    }

    #[test]
    fn test_id_fragment_and_unknown_fragment() {
        let nav = NavigationStateMachine::new();
        let doc = document();
        let mut reconciler = DeepLinkReconciler::new();

        let mut unknown = url("missing");
        assert!(!reconciler.reconcile(&nav, &mut unknown, &doc));
        assert_eq!(Location::fragment(&unknown).as_deref(), Some("missing"));
        assert_eq!(nav.state(), NavigationState::Idle);

        let mut by_id = url("section-0");
        assert!(reconciler.reconcile(&nav, &mut by_id, &doc));
        assert_eq!(nav.state().section_title(), Some("Guide"));
    }
}
