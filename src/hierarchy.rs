//! Generic utilities for building hierarchical tree structures from flat lists.
//!
//! # Overview
//!
//! Every tree-shaped view of a document (sidebar outline, drill-down
//! ancestor chain, rich-editor block nesting) is derived from a pre-order
//! list of leveled items with one rule, implemented once in
//! [`AncestryStack`]:
//!
//! - an incoming item closes every open item whose level is the same as or
//!   deeper than its own
//! - whatever is still open afterwards is its ancestry, the top being its
//!   parent
//!
//! Only the relative order of levels matters. A jump from level 1 to level 3
//! makes the level-3 item a direct child of the level-1 item, and several
//! shallowest items produce a forest.
//!
//! # Example
//!
//! ```text
//! Items: H1, H3, H2
//!
//! H1 ─┬─ H3
//!     └─ H2
//! ```

use std::fmt;

/// Trait for types that have a hierarchical level.
///
/// Implementors must provide a `level()` method returning the item's level
/// in the hierarchy (e.g., 1-99 for section headers).
pub trait Hierarchical {
    /// Returns the hierarchical level of this item.
    fn level(&self) -> usize;
}

/// Stack of "open ancestors" replayed over a pre-order sequence.
///
/// Closed entries are handed to a callback together with the entry that
/// encloses them, so the same stack builds trees (attach the closed node to
/// its parent) and answers ancestry questions (discard closed entries and
/// read what is left open).
#[derive(Debug)]
pub struct AncestryStack<T> {
    open: Vec<T>,
}

impl<T> Default for AncestryStack<T> {
    fn default() -> Self {
        Self { open: Vec::new() }
    }
}

impl<T: Hierarchical> AncestryStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close every open entry at the same or a deeper level than `level`.
    ///
    /// Each closed entry is passed to `close` with its enclosing entry, or
    /// `None` when it was a root.
    pub fn close_from(
        &mut self,
        level: usize,
        mut close: impl FnMut(T, Option<&mut T>),
    ) {
        while self.open.last().is_some_and(|top| top.level() >= level) {
            if let Some(closed) = self.open.pop() {
                close(closed, self.open.last_mut());
            }
        }
    }

    /// Open `item` after closing everything it cannot be nested in.
    pub fn push(&mut self, item: T, close: impl FnMut(T, Option<&mut T>)) {
        self.close_from(item.level(), close);
        self.open.push(item);
    }

    /// Close everything still open.
    pub fn finish(mut self, close: impl FnMut(T, Option<&mut T>)) {
        self.close_from(0, close);
    }

    /// Open entries, root first. After [`push`](Self::push)ing an item,
    /// everything before it is its ancestry.
    pub fn open(&self) -> &[T] {
        &self.open
    }

    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.open.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Mark {
    index: usize,
    level: usize,
}

impl Hierarchical for Mark {
    fn level(&self) -> usize {
        self.level
    }
}

/// Indices of the ancestors of `items[target]`, root first.
///
/// Replays the stack from the start of the list up to (not including) the
/// target; what remains open once the target's level is applied is its
/// ancestry.
pub fn ancestor_indices<T: Hierarchical>(
    items: &[T],
    target: usize,
) -> Vec<usize> {
    let Some(target_item) = items.get(target) else {
        return Vec::new();
    };
    let mut stack = AncestryStack::new();
    for (index, item) in items[..target].iter().enumerate() {
        stack.push(
            Mark {
                index,
                level: item.level(),
            },
            |_, _| {},
        );
    }
    stack.close_from(target_item.level(), |_, _| {});
    stack.open().iter().map(|m| m.index).collect()
}

/// Index one past the last item nested under `items[target]`.
///
/// The subtree ends at the first following item whose level is the same as
/// or shallower than the target's.
pub fn subtree_end<T: Hierarchical>(items: &[T], target: usize) -> usize {
    let Some(target_item) = items.get(target) else {
        return items.len();
    };
    items[target + 1..]
        .iter()
        .position(|item| item.level() <= target_item.level())
        .map_or(items.len(), |offset| target + 1 + offset)
}

/// A node in a hierarchical tree structure.
///
/// # Fields
///
/// - `value`: The wrapped item of type `T`
/// - `children`: Child nodes at deeper levels
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyItem<T> {
    /// The wrapped value
    pub value: T,
    /// Child nodes (items at deeper hierarchical levels)
    pub children: Vec<HierarchyItem<T>>,
}

impl<T> HierarchyItem<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    /// Borrowing pre-order walk: the node itself, then each child subtree.
    pub fn preorder(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.preorder_into(&mut out);
        out
    }

    fn preorder_into<'a>(&'a self, out: &mut Vec<&'a T>) {
        out.push(&self.value);
        for child in &self.children {
            child.preorder_into(out);
        }
    }

    fn flatten_into(self, out: &mut Vec<T>) {
        out.push(self.value);
        for child in self.children {
            child.flatten_into(out);
        }
    }

    /// Helper function to format the tree with a prefix
    fn fmt_with_prefix(
        &self,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
    ) -> fmt::Result
    where
        T: fmt::Display,
    {
        writeln!(f, "{}", self.value)?;

        let child_count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            let is_last_child = i == child_count - 1;

            if is_last_child {
                write!(f, "{}└── ", prefix)?;
            } else {
                write!(f, "{}├── ", prefix)?;
            }

            let child_prefix = if is_last_child {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };

            child.fmt_with_prefix(f, &child_prefix)?;
        }

        Ok(())
    }
}

impl<T: Hierarchical> Hierarchical for HierarchyItem<T> {
    fn level(&self) -> usize {
        self.value.level()
    }
}

impl<T: fmt::Display> fmt::Display for HierarchyItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_prefix(f, "")
    }
}

/// Build a forest from a flat, pre-ordered list of hierarchical items.
///
/// Items with higher levels become children of the closest preceding item
/// with a lower level. Level gaps are accepted as-is.
///
/// # Example
/// Given headings: H1, H2, H3, H2
/// The tree will be: H1 -> [H2 -> [H3], H2]
pub fn build_tree<T: Hierarchical>(
    items: impl IntoIterator<Item = T>,
) -> Vec<HierarchyItem<T>> {
    let mut roots = Vec::new();
    let mut attach =
        |node: HierarchyItem<T>, parent: Option<&mut HierarchyItem<T>>| {
            match parent {
                Some(parent) => parent.children.push(node),
                None => roots.push(node),
            }
        };

    let mut stack = AncestryStack::new();
    for item in items {
        stack.push(HierarchyItem::new(item), &mut attach);
    }
    stack.finish(&mut attach);

    roots
}

/// Keep only nodes that still have children once their own children have
/// been filtered. Decided bottom-up, so a node whose children were all
/// leaves is dropped too.
pub fn retain_branches<T>(
    nodes: Vec<HierarchyItem<T>>,
) -> Vec<HierarchyItem<T>> {
    nodes
        .into_iter()
        .filter_map(|mut node| {
            node.children = retain_branches(node.children);
            (!node.children.is_empty()).then_some(node)
        })
        .collect()
}

/// Build the tree keeping only sections that have subsections.
pub fn build_tree_branches_only<T: Hierarchical>(
    items: impl IntoIterator<Item = T>,
) -> Vec<HierarchyItem<T>> {
    retain_branches(build_tree(items))
}

/// Pre-order flattening, the inverse of [`build_tree`].
pub fn flatten_tree<T>(roots: Vec<HierarchyItem<T>>) -> Vec<T> {
    let mut out = Vec::new();
    for root in roots {
        root.flatten_into(&mut out);
    }
    out
}

// Test
// ====================
