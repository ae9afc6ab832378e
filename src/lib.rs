pub mod blocks;
pub mod config;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod extract;
pub mod hierarchy;
pub mod link;
pub mod navigation;
pub mod parse;
pub mod render;
pub mod search;
pub mod section;
pub mod store;

pub use error::{Error, Result};
