use super::types::{
    Block, HeadingBlock, ParagraphBlock, ParagraphProps, style_for,
};
use crate::hierarchy::AncestryStack;
use crate::section::Section;
use uuid::Uuid;

fn paragraph(content: &str, level: usize) -> Block {
    Block::Paragraph(ParagraphBlock {
        id: Uuid::new_v4().to_string(),
        props: ParagraphProps {
            style: style_for(level),
        },
        content: content.to_string(),
    })
}

/// Flat sections → editor block tree.
///
/// Nesting follows the shared ancestry rule. A section's body, when
/// non-empty, becomes a paragraph placed first among its heading's children.
pub fn to_blocks(sections: &[Section]) -> Vec<Block> {
    let mut roots = Vec::new();
    let mut attach = |closed: HeadingBlock, parent: Option<&mut HeadingBlock>| {
        match parent {
            Some(parent) => parent.children.push(Block::Heading(closed)),
            None => roots.push(Block::Heading(closed)),
        }
    };

    let mut stack = AncestryStack::new();
    for section in sections {
        let mut heading =
            HeadingBlock::new(&section.id, &section.title, section.level);
        heading.props.tags = section.tags.clone();
        if !section.content.is_empty() {
            heading
                .children
                .push(paragraph(&section.content, section.level));
        }
        stack.push(heading, &mut attach);
    }
    stack.finish(&mut attach);

    roots
}

/// Editor block tree → flat sections.
///
/// Headings contribute sections at their `original_level`. Paragraph text is
/// appended to the nearest preceding heading; paragraphs before any heading
/// open an untitled level-1 section.
pub fn to_flat(blocks: &[Block]) -> Vec<Section> {
    let mut sections = Vec::new();
    collect(blocks, &mut sections);
    sections
}

fn collect(blocks: &[Block], sections: &mut Vec<Section>) {
    for block in blocks {
        match block {
            Block::Heading(heading) => {
                sections.push(Section {
                    id: heading.id.clone(),
                    title: heading.content.clone(),
                    level: heading.level(),
                    content: String::new(),
                    tags: heading.props.tags.clone(),
                });
                collect(&heading.children, sections);
            }
            Block::Paragraph(p) if p.content.is_empty() => {}
            Block::Paragraph(p) => match sections.last_mut() {
                Some(section) => {
                    if !section.content.is_empty() {
                        section.content.push_str("\n\n");
                    }
                    section.content.push_str(&p.content);
                }
                None => sections
                    .push(Section::new(&p.id, "", 1).with_content(&p.content)),
            },
        }
    }
}
