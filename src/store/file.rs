use super::{DocumentStore, ops};
use crate::error::{Error, Result};
use crate::section::{Document, Section};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One pretty-printed JSON file per document, named after its id.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// All documents, sorted by path.
    fn load_all(&self) -> Result<Vec<Document>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        let mut documents = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(&self.dir, e))?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            let document: Document =
                serde_json::from_str(&text).map_err(|e| Error::json(&path, e))?;
            documents.push(document);
        }
        documents.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(documents)
    }

    fn write(&self, document: &Document) -> Result<()> {
        let path = self.file_for(&document.id);
        let text = serde_json::to_string_pretty(document)
            .map_err(|e| Error::json(&path, e))?;
        fs::write(&path, text).map_err(|e| Error::io(&path, e))
    }

    fn remove(&self, id: &str) -> Result<()> {
        let path = self.file_for(id);
        fs::remove_file(&path).map_err(|e| Error::io(&path, e))
    }

    /// Load, edit, then write back only what changed.
    fn try_transact(
        &self,
        edit: impl FnOnce(&mut Vec<Document>) -> bool,
    ) -> Result<bool> {
        let before = self.load_all()?;
        let mut after = before.clone();
        if !edit(&mut after) {
            return Ok(false);
        }
        for document in &after {
            if !before.contains(document) {
                self.write(document)?;
            }
        }
        for document in &before {
            if !after.iter().any(|d| d.id == document.id) {
                self.remove(&document.id)?;
            }
        }
        Ok(true)
    }

    fn transact(
        &self,
        operation: &str,
        edit: impl FnOnce(&mut Vec<Document>) -> bool,
    ) -> bool {
        self.try_transact(edit).unwrap_or_else(|err| {
            warn!(operation, %err, "document store operation failed");
            false
        })
    }
}

impl DocumentStore for FileStore {
    fn get_document_by_path(&self, path: &str) -> Option<Document> {
        match self.load_all() {
            Ok(documents) => documents.into_iter().find(|d| d.path == path),
            Err(err) => {
                warn!(path, %err, "failed to read documents");
                None
            }
        }
    }

    fn get_all_documents(&self) -> Vec<Document> {
        self.load_all().unwrap_or_else(|err| {
            warn!(%err, "failed to read documents");
            Vec::new()
        })
    }

    fn upsert_document(&mut self, path: &str, sections: Vec<Section>) -> bool {
        self.transact("upsert_document", |documents| {
            ops::upsert(documents, path, sections);
            true
        })
    }

    fn update_section(
        &mut self,
        path: &str,
        section_id: &str,
        section: Section,
    ) -> bool {
        self.transact("update_section", |documents| {
            ops::update_section(documents, path, section_id, section)
        })
    }

    fn delete_node(&mut self, id: &str) -> bool {
        self.transact("delete_node", |documents| ops::delete_node(documents, id))
    }

    fn reorder_node(
        &mut self,
        id: &str,
        parent_id: Option<&str>,
        order_index: usize,
    ) -> bool {
        self.transact("reorder_node", |documents| {
            ops::reorder_node(documents, id, parent_id, order_index)
        })
    }
}
