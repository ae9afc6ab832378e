//! Tests for the block conversion layer.

use super::*;
use crate::parse::parse;
use crate::section::{Section, same_shape};
use pretty_assertions::assert_eq;

fn sections(specs: &[(&str, usize, &str)]) -> Vec<Section> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (title, level, body))| {
            Section::new(format!("s{i}"), *title, *level).with_content(*body)
        })
        .collect()
}

fn outline(blocks: &[Block], depth: usize, out: &mut Vec<String>) {
    for block in blocks {
        let pad = "  ".repeat(depth);
        match block {
            Block::Heading(h) => {
                out.push(format!(
                    "{pad}H{} (orig {:?}) {}",
                    h.props.visual_level, h.props.original_level, h.content
                ));
                outline(&h.children, depth + 1, out);
            }
            Block::Paragraph(p) => out.push(format!("{pad}P {}", p.content)),
        }
    }
}

fn render(blocks: &[Block]) -> String {
    let mut out = Vec::new();
    outline(blocks, 0, &mut out);
    out.join("\n")
}

#[test]
fn test_to_blocks_caps_visual_level() {
    let blocks = to_blocks(&sections(&[
        ("Guide", 1, "intro"),
        ("Deep", 5, "deep body"),
        ("Usage", 2, ""),
    ]));
    insta::assert_snapshot!(render(&blocks), @r"
    H1 (orig Some(1)) Guide
      P intro
      H3 (orig Some(5)) Deep
        P deep body
      H2 (orig Some(2)) Usage
    ");
}

#[test]
fn test_round_trip_keeps_ids_tags_and_levels() {
    let mut input = sections(&[
        ("A", 1, "a"),
        ("B", 4, "b\n\nb2"),
        ("C", 7, ""),
        ("D", 2, "d"),
    ]);
    input[1].tags = vec!["x".to_string(), "y".to_string()];
    let back = to_flat(&to_blocks(&input));
    assert_eq!(back, input);
}

#[test]
fn test_round_trip_of_parsed_markup() {
    let parsed = parse(
        "intro\n# One\n## Two [t]\ntext\n##### Five\n# Again\nend",
        None,
    );
    assert!(same_shape(&to_flat(&to_blocks(&parsed)), &parsed));
}

#[test]
fn test_styling_cycles_palette() {
    let blocks = to_blocks(&sections(&[("A", 1, ""), ("G", 7, "")]));
    let Block::Heading(a) = &blocks[0] else {
        panic!("expected heading");
    };
    let Block::Heading(g) = &a.children[0] else {
        panic!("expected heading");
    };
    assert_eq!(a.props.style.background, PALETTE[0]);
    assert_eq!(g.props.style.background, PALETTE[0]);
    assert_eq!(g.props.style.indent, 6);
}

#[test]
fn test_missing_original_level_falls_back_to_visual() {
    let json = r#"[
        {"type": "heading", "id": "h1", "props": {"visualLevel": 2}, "content": "Editor made"},
        {"type": "paragraph", "id": "p1", "content": "body"}
    ]"#;
    let blocks: Vec<Block> = serde_json::from_str(json).unwrap();
    let flat = to_flat(&blocks);
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].id, "h1");
    assert_eq!(flat[0].level, 2);
    assert_eq!(flat[0].content, "body");
}

#[test]
fn test_paragraphs_join_into_preceding_heading() {
    let mut heading = HeadingBlock::new("h", "Title", 1);
    for text in ["one", "", "two"] {
        heading.children.push(Block::Paragraph(ParagraphBlock {
            id: text.to_string(),
            props: ParagraphProps::default(),
            content: text.to_string(),
        }));
    }
    let flat = to_flat(&[Block::Heading(heading)]);
    assert_eq!(flat[0].content, "one\n\ntwo");
}

#[test]
fn test_leading_paragraph_opens_untitled_section() {
    let blocks = vec![Block::Paragraph(ParagraphBlock {
        id: "p".to_string(),
        props: ParagraphProps::default(),
        content: "orphan".to_string(),
    })];
    let flat = to_flat(&blocks);
    assert_eq!(flat, vec![Section::new("p", "", 1).with_content("orphan")]);
}

#[test]
fn test_indent_propagates_to_descendants() {
    let mut blocks = to_blocks(&sections(&[
        ("Top", 1, ""),
        ("Target", 2, "body"),
        ("Child", 3, ""),
        ("Grandchild", 4, ""),
        ("Sibling", 2, ""),
    ]));
    assert!(indent(&mut blocks, "s1"));

    let levels: Vec<_> = ["s1", "s2", "s3", "s4"]
        .iter()
        .map(|id| {
            let h = find_heading(&blocks, id).unwrap();
            (h.level(), h.props.visual_level)
        })
        .collect();
    assert_eq!(levels, vec![(3, 3), (4, 3), (5, 3), (2, 2)]);
}

#[test]
fn test_outdent_clamps_at_one() {
    let mut blocks = to_blocks(&sections(&[("Top", 1, ""), ("Kid", 2, "")]));
    assert!(!outdent(&mut blocks, "s0"));
    assert_eq!(find_heading(&blocks, "s0").unwrap().level(), 1);
    assert_eq!(find_heading(&blocks, "s1").unwrap().level(), 2);

    assert!(outdent(&mut blocks, "s1"));
    assert_eq!(find_heading(&blocks, "s1").unwrap().level(), 1);
    assert!(!indent(&mut blocks, "missing"));
}

#[test]
fn test_indent_clamps_at_ninety_nine() {
    let mut blocks = to_blocks(&sections(&[("Edge", 99, "")]));
    assert!(!indent(&mut blocks, "s0"));
    assert_eq!(find_heading(&blocks, "s0").unwrap().level(), 99);
}

#[test]
fn test_renest_after_outdent() {
    let mut blocks =
        to_blocks(&sections(&[("A", 1, ""), ("B", 2, ""), ("C", 3, "")]));
    // B becomes a root and carries C along one level up.
    assert!(outdent(&mut blocks, "s1"));
    let renested = renest(&blocks);
    assert_eq!(renested.len(), 2);
    assert_eq!(renested[1].id(), "s1");
    assert_eq!(renested[1].children()[0].id(), "s2");
}
