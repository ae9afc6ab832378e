use super::convert::{to_blocks, to_flat};
use super::types::{Block, HeadingBlock};
use crate::section::MAX_LEVEL;
use tracing::debug;

pub fn find_heading<'a>(blocks: &'a [Block], id: &str) -> Option<&'a HeadingBlock> {
    blocks.iter().find_map(|block| match block {
        Block::Heading(h) if h.id == id => Some(h),
        Block::Heading(h) => find_heading(&h.children, id),
        Block::Paragraph(_) => None,
    })
}

pub fn find_heading_mut<'a>(
    blocks: &'a mut [Block],
    id: &str,
) -> Option<&'a mut HeadingBlock> {
    for block in blocks {
        if let Block::Heading(h) = block {
            if h.id == id {
                return Some(h);
            }
            if let Some(found) = find_heading_mut(&mut h.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn shift_subtree(heading: &mut HeadingBlock, delta: isize) {
    let shifted = heading.level().saturating_add_signed(delta);
    heading.set_level(shifted);
    for child in &mut heading.children {
        if let Block::Heading(child) = child {
            shift_subtree(child, delta);
        }
    }
}

/// Move the heading `id` and every heading nested below it by `delta`
/// levels, keeping their relative nesting.
///
/// Returns `false`, changing nothing, when the heading is unknown or its own
/// new level would leave `1..=99`. Descendants are clamped individually.
pub fn shift_heading(blocks: &mut [Block], id: &str, delta: isize) -> bool {
    let Some(heading) = find_heading_mut(blocks, id) else {
        return false;
    };
    let target = heading.level() as isize + delta;
    if !(1..=MAX_LEVEL as isize).contains(&target) {
        debug!(id, target, "heading shift out of range");
        return false;
    }
    shift_subtree(heading, delta);
    true
}

pub fn indent(blocks: &mut [Block], id: &str) -> bool {
    shift_heading(blocks, id, 1)
}

pub fn outdent(blocks: &mut [Block], id: &str) -> bool {
    shift_heading(blocks, id, -1)
}

/// Re-derive the nesting from the headings' levels after edits.
pub fn renest(blocks: &[Block]) -> Vec<Block> {
    to_blocks(&to_flat(blocks))
}
