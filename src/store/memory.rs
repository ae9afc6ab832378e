use super::{DocumentStore, ops};
use crate::section::{Document, Section};

/// Documents held in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Vec<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

impl DocumentStore for MemoryStore {
    fn get_document_by_path(&self, path: &str) -> Option<Document> {
        self.documents.iter().find(|d| d.path == path).cloned()
    }

    fn get_all_documents(&self) -> Vec<Document> {
        self.documents.clone()
    }

    fn upsert_document(&mut self, path: &str, sections: Vec<Section>) -> bool {
        ops::upsert(&mut self.documents, path, sections);
        true
    }

    fn update_section(
        &mut self,
        path: &str,
        section_id: &str,
        section: Section,
    ) -> bool {
        ops::update_section(&mut self.documents, path, section_id, section)
    }

    fn delete_node(&mut self, id: &str) -> bool {
        ops::delete_node(&mut self.documents, id)
    }

    fn reorder_node(
        &mut self,
        id: &str,
        parent_id: Option<&str>,
        order_index: usize,
    ) -> bool {
        ops::reorder_node(&mut self.documents, id, parent_id, order_index)
    }
}
