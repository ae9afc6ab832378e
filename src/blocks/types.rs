use crate::hierarchy::Hierarchical;
use crate::section::MAX_LEVEL;
use serde::{Deserialize, Serialize};

/// Largest heading size the editor draws natively.
pub const MAX_VISUAL_LEVEL: usize = 3;

/// Background cycle for nested headings, keyed by `(level - 1) % 6`.
pub const PALETTE: [&str; 6] =
    ["default", "blue", "green", "yellow", "orange", "purple"];

pub fn visual_level(level: usize) -> usize {
    level.clamp(1, MAX_VISUAL_LEVEL)
}

/// Display-only styling. Never read back as structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStyle {
    pub background: String,
    pub indent: usize,
}

impl Default for BlockStyle {
    fn default() -> Self {
        style_for(1)
    }
}

pub fn style_for(level: usize) -> BlockStyle {
    let depth = level.max(1) - 1;
    BlockStyle {
        background: PALETTE[depth % PALETTE.len()].to_string(),
        indent: depth,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingProps {
    pub visual_level: usize,
    /// Authoritative depth. Missing when the block was created by the
    /// editor itself, in which case `visual_level` stands in for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_level: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub style: BlockStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingBlock {
    pub id: String,
    pub props: HeadingProps,
    /// Heading text.
    pub content: String,
    #[serde(default)]
    pub children: Vec<Block>,
}

impl HeadingBlock {
    pub fn new(id: impl Into<String>, title: impl Into<String>, level: usize) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        Self {
            id: id.into(),
            props: HeadingProps {
                visual_level: visual_level(level),
                original_level: Some(level),
                tags: Vec::new(),
                style: style_for(level),
            },
            content: title.into(),
            children: Vec::new(),
        }
    }

    /// Semantic depth, falling back to the visual level.
    pub fn level(&self) -> usize {
        self.props
            .original_level
            .unwrap_or(self.props.visual_level)
            .clamp(1, MAX_LEVEL)
    }

    pub fn set_level(&mut self, level: usize) {
        let level = level.clamp(1, MAX_LEVEL);
        self.props.original_level = Some(level);
        self.props.visual_level = visual_level(level);
        self.props.style = style_for(level);
    }
}

impl Hierarchical for HeadingBlock {
    fn level(&self) -> usize {
        HeadingBlock::level(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParagraphProps {
    #[serde(default)]
    pub style: BlockStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphBlock {
    pub id: String,
    #[serde(default)]
    pub props: ParagraphProps,
    pub content: String,
}

/// A rich-editor node, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Heading(HeadingBlock),
    Paragraph(ParagraphBlock),
}

impl Block {
    pub fn id(&self) -> &str {
        match self {
            Block::Heading(h) => &h.id,
            Block::Paragraph(p) => &p.id,
        }
    }

    pub fn children(&self) -> &[Block] {
        match self {
            Block::Heading(h) => &h.children,
            Block::Paragraph(_) => &[],
        }
    }
}
