pub mod extract;
pub mod outline;
pub mod resolve;
pub mod search;
