//! Authored cross-references: `#ref`, `/path#ref` and `/path`.

mod resolve;
mod types;
mod utils;

pub use resolve::{
    match_id_or_slug, match_section, parse_target, resolve, resolve_in,
};
pub use types::{LinkTarget, ResolvedLink};
pub use utils::{percent_decode, percent_encode, slugify};
