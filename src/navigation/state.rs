use crate::extract::SectionView;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// The active location. A section is only ever active together with its
/// document and its materialized view, so the three travel as one variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavigationState {
    #[default]
    Idle,
    AtDocumentRoot {
        path: String,
    },
    AtSection {
        path: String,
        section_id: String,
        section_title: String,
        view: SectionView,
    },
}

impl NavigationState {
    pub fn document_path(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::AtDocumentRoot { path } | Self::AtSection { path, .. } => {
                Some(path)
            }
        }
    }

    pub fn section_id(&self) -> Option<&str> {
        match self {
            Self::AtSection { section_id, .. } => Some(section_id),
            _ => None,
        }
    }

    pub fn section_title(&self) -> Option<&str> {
        match self {
            Self::AtSection { section_title, .. } => Some(section_title),
            _ => None,
        }
    }

    pub fn view(&self) -> Option<&SectionView> {
        match self {
            Self::AtSection { view, .. } => Some(view),
            _ => None,
        }
    }
}

type Listener = Rc<dyn Fn(&NavigationState)>;

#[derive(Default)]
struct Shared {
    state: RefCell<NavigationState>,
    listeners: RefCell<Vec<Listener>>,
}

/// Single-threaded navigation state with synchronous transitions.
///
/// Clones share the same cell, so a handle captured by a callback before a
/// transition still answers the predicates against the current state.
/// A listener added from inside a notification hears the next transition.
#[derive(Clone, Default)]
pub struct NavigationStateMachine {
    shared: Rc<Shared>,
}

impl fmt::Debug for NavigationStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationStateMachine")
            .field("state", &*self.shared.state.borrow())
            .field("listeners", &self.shared.listeners.borrow().len())
            .finish()
    }
}

impl NavigationStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Self {
        self.clone()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> NavigationState {
        self.shared.state.borrow().clone()
    }

    /// Call `listener` after every transition that changes the state.
    pub fn subscribe(&self, listener: impl Fn(&NavigationState) + 'static) {
        self.shared.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn replace(&self, next: NavigationState) {
        debug!(?next, "navigation transition");
        *self.shared.state.borrow_mut() = next.clone();
        let listeners: Vec<Listener> = self.shared.listeners.borrow().clone();
        for listener in listeners {
            listener(&next);
        }
    }

    /// Show the root of `path`, leaving any active section.
    pub fn navigate_to_document(&self, path: &str) -> bool {
        if matches!(
            &*self.shared.state.borrow(),
            NavigationState::AtDocumentRoot { path: current } if current == path
        ) {
            return false;
        }
        self.replace(NavigationState::AtDocumentRoot {
            path: path.to_string(),
        });
        true
    }

    pub fn navigate_to_section(
        &self,
        path: &str,
        section_id: &str,
        section_title: &str,
        view: SectionView,
    ) -> bool {
        if self.is_at_section(path, section_id) {
            return false;
        }
        self.replace(NavigationState::AtSection {
            path: path.to_string(),
            section_id: section_id.to_string(),
            section_title: section_title.to_string(),
            view,
        });
        true
    }

    /// Leave the active section for its document's root.
    pub fn clear_section(&self) -> bool {
        let path = match &*self.shared.state.borrow() {
            NavigationState::AtSection { path, .. } => path.clone(),
            _ => return false,
        };
        self.replace(NavigationState::AtDocumentRoot { path });
        true
    }

    /// At the root of `path`, with no section active.
    pub fn is_at_document(&self, path: &str) -> bool {
        matches!(
            &*self.shared.state.borrow(),
            NavigationState::AtDocumentRoot { path: current } if current == path
        )
    }

    pub fn is_at_section(&self, path: &str, section_id: &str) -> bool {
        let state = self.shared.state.borrow();
        state.document_path() == Some(path)
            && state.section_id() == Some(section_id)
    }

    /// `path` is showing, at its root or at any of its sections.
    pub fn is_document_active(&self, path: &str) -> bool {
        self.shared.state.borrow().document_path() == Some(path)
    }
}
