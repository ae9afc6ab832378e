//! Which document and which section are active, and how the UI follows.

mod deep_link;
mod expansion;
mod state;

pub use deep_link::{DeepLinkReconciler, Location, ROOT_FRAGMENT};
pub use expansion::ExpansionState;
pub use state::{NavigationState, NavigationStateMachine};
