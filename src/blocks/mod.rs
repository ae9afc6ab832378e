//! Rich-editor block trees.
//!
//! The editor nests headings visually but can only draw three heading
//! sizes, so every heading block keeps its true depth in `original_level`
//! next to the capped `visual_level` it is drawn with. Conversions go
//! through the flat section list, which stays the source of truth.

mod convert;
mod edit;
mod types;

#[cfg(test)]
mod tests;

pub use convert::{to_blocks, to_flat};
pub use edit::{
    find_heading, find_heading_mut, indent, outdent, renest, shift_heading,
};
pub use types::{
    Block, BlockStyle, HeadingBlock, HeadingProps, MAX_VISUAL_LEVEL, PALETTE,
    ParagraphBlock, ParagraphProps, style_for, visual_level,
};
