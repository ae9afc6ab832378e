//! One document open for editing, as markup text or as a block tree.
//!
//! Edits arm a cancel-and-restart autosave timer. Switching representation
//! saves first, so observers never see a half-converted document. A failed
//! save keeps the in-memory content and raises a notice for the UI.
use crate::blocks::{Block, renest, to_blocks, to_flat};
use crate::debounce::Debouncer;
use crate::parse::{parse, to_markup};
use crate::section::{Section, title_for};
use crate::store::DocumentStore;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Markup,
    Blocks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Markup(String),
    Blocks(Vec<Block>),
}

#[derive(Debug)]
pub struct EditorSession<S: DocumentStore> {
    store: S,
    path: String,
    title: String,
    content: Content,
    autosave: Debouncer,
    dirty: bool,
    closed: bool,
    notice: Option<String>,
}

impl<S: DocumentStore> EditorSession<S> {
    /// Open `path` in markup mode. A path the store does not know starts
    /// out empty and is created on the first save.
    pub fn open(store: S, path: &str, autosave_delay: Duration) -> Self {
        let (title, sections) = match store.get_document_by_path(path) {
            Some(document) => (document.title, document.sections),
            None => (title_for(path, &[]), Vec::new()),
        };
        let markup = if sections.is_empty() {
            String::new()
        } else {
            to_markup(&sections, Some(&title))
        };
        Self {
            store,
            path: path.to_string(),
            title,
            content: Content::Markup(markup),
            autosave: Debouncer::new(autosave_delay),
            dirty: false,
            closed: false,
            notice: None,
        }
    }

    pub fn mode(&self) -> EditorMode {
        match self.content {
            Content::Markup(_) => EditorMode::Markup,
            Content::Blocks(_) => EditorMode::Blocks,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Message for the user after a failed save, cleared by the next
    /// successful one.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn markup(&self) -> Option<&str> {
        match &self.content {
            Content::Markup(text) => Some(text),
            Content::Blocks(_) => None,
        }
    }

    pub fn blocks(&self) -> Option<&[Block]> {
        match &self.content {
            Content::Blocks(blocks) => Some(blocks),
            Content::Markup(_) => None,
        }
    }

    /// The current content in flat form, whatever the mode.
    pub fn sections(&self) -> Vec<Section> {
        match &self.content {
            Content::Markup(text) => parse(text, Some(&self.title)),
            Content::Blocks(blocks) => to_flat(blocks),
        }
    }

    fn touched(&mut self, now: Instant) {
        self.dirty = true;
        self.autosave.schedule(now);
    }

    /// Replace the markup text. Ignored outside markup mode.
    pub fn edit_markup(&mut self, text: &str, now: Instant) -> bool {
        if self.closed {
            return false;
        }
        let Content::Markup(current) = &mut self.content else {
            return false;
        };
        *current = text.to_string();
        self.touched(now);
        true
    }

    /// Apply `edit` to the block tree, re-deriving its nesting afterwards.
    /// Ignored outside block mode or when `edit` reports no change.
    pub fn edit_blocks(
        &mut self,
        now: Instant,
        edit: impl FnOnce(&mut Vec<Block>) -> bool,
    ) -> bool {
        if self.closed {
            return false;
        }
        let Content::Blocks(blocks) = &mut self.content else {
            return false;
        };
        if !edit(blocks) {
            return false;
        }
        *blocks = renest(blocks);
        self.touched(now);
        true
    }

    /// Persist the current content. A successful save also refreshes the
    /// document title, so renaming the root heading carries over to the
    /// next markup conversion.
    pub fn save(&mut self) -> bool {
        let sections = self.sections();
        let title = title_for(&self.path, &sections);
        if self.store.upsert_document(&self.path, sections) {
            self.title = title;
            self.dirty = false;
            self.notice = None;
            true
        } else {
            warn!(path = %self.path, "save failed, keeping edits in memory");
            self.notice = Some(format!("Could not save {}. Your changes are kept.", self.path));
            false
        }
    }

    /// Save, then convert to `mode`. On a failed save the mode is kept.
    pub fn switch_mode(&mut self, mode: EditorMode) -> bool {
        if self.closed || mode == self.mode() {
            return false;
        }
        if !self.save() {
            return false;
        }
        self.autosave.cancel();
        let sections = match self.store.get_document_by_path(&self.path) {
            Some(document) => document.sections,
            None => self.sections(),
        };
        self.content = match mode {
            EditorMode::Markup => Content::Markup(to_markup(&sections, Some(&self.title))),
            EditorMode::Blocks => Content::Blocks(to_blocks(&sections)),
        };
        debug!(path = %self.path, ?mode, "switched editor mode");
        true
    }

    /// Run a due autosave. Returns `true` when a save succeeded.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.autosave.poll(now) || !self.dirty {
            return false;
        }
        self.save()
    }

    /// Drop any pending autosave, save, and stop accepting edits.
    pub fn save_and_close(&mut self) -> bool {
        self.autosave.cancel();
        self.closed = true;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{find_heading_mut, indent};
    use crate::section::Document;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    const DELAY: Duration = Duration::from_secs(2);

    fn store() -> MemoryStore {
        MemoryStore::with_documents(vec![Document::new(
            "d",
            "/guide",
            parse("# Guide\nintro\n## Setup\nsteps\n### Deep\nmore", None),
        )])
    }

    /// Refuses every write.
    struct ReadOnly(MemoryStore);

    impl DocumentStore for ReadOnly {
        fn get_document_by_path(&self, path: &str) -> Option<Document> {
            self.0.get_document_by_path(path)
        }
        fn get_all_documents(&self) -> Vec<Document> {
            self.0.get_all_documents()
        }
        fn upsert_document(&mut self, _: &str, _: Vec<Section>) -> bool {
            false
        }
        fn update_section(&mut self, _: &str, _: &str, _: Section) -> bool {
            false
        }
        fn delete_node(&mut self, _: &str) -> bool {
            false
        }
        fn reorder_node(&mut self, _: &str, _: Option<&str>, _: usize) -> bool {
            false
        }
    }

    #[test]
    fn test_open_presents_markup() {
        let session = EditorSession::open(store(), "/guide", DELAY);
        insta::assert_snapshot!(session.markup().unwrap(), @r"
        intro

        ## Setup
        steps

        ### Deep
        more
        ");
    }

    #[test]
    fn test_autosave_fires_after_idle_delay() {
        let start = Instant::now();
        let mut session = EditorSession::open(store(), "/guide", DELAY);
        session.edit_markup("intro\n## Setup\nchanged", start);
        session.edit_markup("intro\n## Setup\nchanged again", start + Duration::from_secs(1));
        assert!(!session.tick(start + Duration::from_secs(2)));
        assert!(session.tick(start + Duration::from_secs(3)));
        assert!(!session.is_dirty());

        let saved = session.store().get_document_by_path("/guide").unwrap();
        assert_eq!(saved.sections[1].content, "changed again");
    }

    #[test]
    fn test_switch_mode_saves_then_converts() {
        let start = Instant::now();
        let mut session = EditorSession::open(store(), "/guide", DELAY);
        session.edit_markup("intro\n## Setup\nsteps\n#### Deeper\nmore", start);
        assert!(session.switch_mode(EditorMode::Blocks));
        assert!(!session.autosave_pending());
        assert_eq!(session.mode(), EditorMode::Blocks);
        let saved = session.store().get_document_by_path("/guide").unwrap();
        assert_eq!(saved.sections[2].level, 4);

        assert!(session.edit_blocks(start, |blocks| indent(blocks, "d/section-1")));
        let levels: Vec<_> = session.sections().iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![1, 3, 5]);

        assert!(session.switch_mode(EditorMode::Markup));
        assert!(session.markup().unwrap().contains("##### Deeper"));
    }

    #[test]
    fn test_renamed_root_survives_mode_round_trip() {
        let start = Instant::now();
        let mut session = EditorSession::open(store(), "/guide", DELAY);
        assert!(session.switch_mode(EditorMode::Blocks));
        assert!(session.edit_blocks(start, |blocks| {
            match find_heading_mut(blocks, "d/section-0") {
                Some(root) => {
                    root.content = "Manual".to_string();
                    true
                }
                None => false,
            }
        }));
        assert!(session.switch_mode(EditorMode::Markup));
        assert!(!session.markup().unwrap().contains("# Guide"));
        assert!(session.save());

        let saved = session.store().get_document_by_path("/guide").unwrap();
        assert_eq!(saved.title, "Manual");
        let outline: Vec<_> = saved
            .sections
            .iter()
            .map(|s| format!("{}:{}", s.level, s.title))
            .collect();
        assert_eq!(outline, vec!["1:Manual", "2:Setup", "3:Deep"]);
    }

    #[test]
    fn test_failed_save_keeps_state_and_sets_notice() {
        let start = Instant::now();
        let mut session = EditorSession::open(ReadOnly(store()), "/guide", DELAY);
        session.edit_markup("rewritten", start);
        assert!(!session.switch_mode(EditorMode::Blocks));
        assert_eq!(session.mode(), EditorMode::Markup);
        assert_eq!(session.markup(), Some("rewritten"));
        assert!(session.is_dirty());
        assert!(session.notice().unwrap().contains("/guide"));
    }

    #[test]
    fn test_save_and_close_cancels_autosave() {
        let start = Instant::now();
        let mut session = EditorSession::open(MemoryStore::new(), "/new/page", DELAY);
        session.edit_markup("# Page\nfirst words", start);
        assert!(session.save_and_close());
        assert!(!session.autosave_pending());
        assert!(!session.edit_markup("late", start));
        assert!(!session.tick(start + Duration::from_secs(10)));

        let doc = session.store().get_document_by_path("/new/page").unwrap();
        assert_eq!(doc.title, "Page");
    }
}
