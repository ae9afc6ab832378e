//! Markdown to HTML for section bodies.
use crate::link::resolve;
use crate::section::Section;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// Turns markdown into HTML. Implementations are pure and total.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// Markup is limited to CommonMark plus a few inline extensions.
pub fn default_opts() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_SMART_PUNCTUATION);
    opts
}

#[derive(Debug, Clone)]
pub struct PulldownRenderer {
    opts: Options,
}

impl Default for PulldownRenderer {
    fn default() -> Self {
        Self {
            opts: default_opts(),
        }
    }
}

impl PulldownRenderer {
    pub fn new(opts: Options) -> Self {
        Self { opts }
    }

    /// Render, rewriting `#ref` and `/path#ref` links to routable hrefs
    /// resolved against `sections`. Other links pass through untouched.
    pub fn render_with_links(&self, markdown: &str, sections: &[Section]) -> String {
        let events = Parser::new_ext(markdown, self.opts).map(|event| match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let dest_url = match resolve(&dest_url, sections) {
                    Some(link) => CowStr::from(link.href()),
                    None => dest_url,
                };
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                })
            }
            other => other,
        });
        let mut out = String::new();
        html::push_html(&mut out, events);
        out
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut out = String::new();
        html::push_html(&mut out, Parser::new_ext(markdown, self.opts));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use insta::assert_snapshot;

    #[test]
    fn test_render_highlighted_snippet() {
        let html = PulldownRenderer::default().render("found **needle** here");
        assert_snapshot!(html.trim_end(), @"<p>found <strong>needle</strong> here</p>");
    }

    #[test]
    fn test_render_with_links() {
        let sections = parse("# Guide\n## Advanced Setup\nknobs", None);
        let markdown =
            "See [setup](#advanced%20setup), [todo](/notes#todo) and [site](https://example.com).";
        let html = PulldownRenderer::default().render_with_links(markdown, &sections);
        assert!(html.contains(r##"href="#section-1""##));
        assert!(html.contains(r##"href="/notes#todo""##));
        assert!(html.contains(r##"href="https://example.com""##));
    }
}
