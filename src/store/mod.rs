//! Persistence boundary for documents.
//!
//! Every operation reports failure as `false` or `None` after logging it;
//! no error crosses this boundary. Writes are last-write-wins.

mod file;
mod memory;
mod ops;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::section::{Document, Section};

pub trait DocumentStore {
    fn get_document_by_path(&self, path: &str) -> Option<Document>;

    fn get_all_documents(&self) -> Vec<Document>;

    /// Replace the sections of the document at `path`, creating the
    /// document when the path is new.
    fn upsert_document(&mut self, path: &str, sections: Vec<Section>) -> bool;

    /// Replace one section of the document at `path` in place.
    fn update_section(
        &mut self,
        path: &str,
        section_id: &str,
        section: Section,
    ) -> bool;

    /// Remove a document with its child documents, or a section with its
    /// nested subsections.
    fn delete_node(&mut self, id: &str) -> bool;

    /// Move a document under `parent_id` (or to the top level) at position
    /// `order_index` among its new siblings.
    fn reorder_node(
        &mut self,
        id: &str,
        parent_id: Option<&str>,
        order_index: usize,
    ) -> bool;
}
