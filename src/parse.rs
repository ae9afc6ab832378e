//! Markup ⇄ flat sections.
//!
//! The markup is deliberately small: a header line is a run of up to 99 `#`
//! followed by a title and an optional trailing `[tag, tag]` list. Every
//! other line is body text of the most recently opened section.
use crate::section::{MAX_LEVEL, Section};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,99})\s*(.+?)(?:\s*\[(.*?)\])?$")
        .expect("header regex is valid")
});

/// A parsed header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub level: usize,
    pub title: String,
    pub tags: Vec<String>,
}

/// Match a single line against the header grammar.
///
/// Lines that merely look like headers but do not match are body text.
pub fn parse_header(line: &str) -> Option<Header> {
    let caps = HEADER_RE.captures(line)?;
    let level = caps.get(1)?.as_str().len();
    let title = caps.get(2)?.as_str().trim().to_string();
    let tags = caps
        .get(3)
        .map(|m| split_tags(m.as_str()))
        .unwrap_or_default();
    Some(Header { level, title, tags })
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a header line: `#` × level, a space, the title, then ` [tags]`.
pub fn header_line(level: usize, title: &str, tags: &[String]) -> String {
    let level = level.clamp(1, MAX_LEVEL);
    let mut line = format!("{} {}", "#".repeat(level), title);
    if !tags.is_empty() {
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    line
}

fn section_id(index: usize) -> String {
    format!("section-{index}")
}

struct OpenSection {
    header: Header,
    body: Vec<String>,
}

fn join_body(lines: &[String]) -> String {
    lines.join("\n").trim_end().to_string()
}

/// Parse marked-up text into an ordered flat list of sections.
///
/// Text before the first header becomes an implicit level-1 section titled
/// `document_title`. Without a title, non-blank pre-header text is kept as a
/// level-1 section with an empty title. When the text already opens with a
/// level-1 header equal to `document_title` and has no pre-header text, no
/// implicit section is added.
pub fn parse(text: &str, document_title: Option<&str>) -> Vec<Section> {
    let mut preface: Vec<String> = Vec::new();
    let mut opened: Vec<OpenSection> = Vec::new();

    for line in text.lines() {
        if let Some(header) = parse_header(line) {
            opened.push(OpenSection {
                header,
                body: Vec::new(),
            });
        } else if let Some(current) = opened.last_mut() {
            current.body.push(line.to_string());
        } else {
            preface.push(line.to_string());
        }
    }

    let preface = join_body(&preface);
    let mut sections = Vec::with_capacity(opened.len() + 1);

    let already_titled = |title: &str| {
        opened.first().is_some_and(|first| {
            first.header.level == 1
                && first.header.title.eq_ignore_ascii_case(title)
        })
    };
    match document_title {
        Some(title) if !preface.trim().is_empty() || !already_titled(title) => {
            debug!(title, "adding implicit root section");
            sections.push(
                Section::new(section_id(0), title, 1).with_content(preface),
            );
        }
        None if !preface.trim().is_empty() => {
            debug!("keeping untitled pre-header content");
            sections.push(
                Section::new(section_id(0), "", 1).with_content(preface),
            );
        }
        _ => {}
    }

    for open in opened {
        let index = sections.len();
        sections.push(Section {
            id: section_id(index),
            title: open.header.title,
            level: open.header.level,
            content: join_body(&open.body),
            tags: open.header.tags,
        });
    }

    sections
}

/// Serialize sections back into markup.
///
/// A leading level-1 section whose title is `document_title` (or empty when
/// no title is given) is written as pre-header text, mirroring [`parse`].
pub fn to_markup(sections: &[Section], document_title: Option<&str>) -> String {
    let mut out = String::new();
    let mut rest = sections;

    if let Some(first) = sections.first() {
        let implicit = first.level == 1
            && match document_title {
                Some(title) => first.title == title && first.tags.is_empty(),
                None => first.title.is_empty(),
            };
        if implicit {
            if !first.content.is_empty() {
                out.push_str(&first.content);
                out.push_str("\n\n");
            }
            rest = &sections[1..];
        }
    }

    for section in rest {
        out.push_str(&section_markup(section));
        out.push('\n');
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

/// One section as markup: its header line, then its body.
pub fn section_markup(section: &Section) -> String {
    let mut out = header_line(section.level, &section.title, &section.tags);
    out.push('\n');
    if !section.content.is_empty() {
        out.push_str(&section.content);
        out.push('\n');
    }
    out
}
