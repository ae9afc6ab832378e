//! Store-agnostic edits on a loaded document set.
use crate::hierarchy::subtree_end;
use crate::section::{Document, Section, title_for};
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

/// Store-wide id of a section: `<document id>/<local id>`.
///
/// `parse` numbers sections per document, so ids are only unique across the
/// store once prefixed with their document's id.
pub fn scoped_id(document_id: &str, id: &str) -> String {
    let prefix = format!("{document_id}/");
    if id.starts_with(&prefix) {
        id.to_string()
    } else {
        format!("{prefix}{id}")
    }
}

fn scope_sections(document_id: &str, sections: &mut [Section]) {
    for section in sections {
        section.id = scoped_id(document_id, &section.id);
    }
}

fn siblings_sorted<'a>(
    documents: &'a [Document],
    parent_id: Option<&str>,
) -> Vec<&'a Document> {
    let mut siblings: Vec<_> = documents
        .iter()
        .filter(|d| d.parent_id.as_deref() == parent_id)
        .collect();
    siblings.sort_by_key(|d| d.order_index);
    siblings
}

pub fn upsert(
    documents: &mut Vec<Document>,
    path: &str,
    mut sections: Vec<Section>,
) {
    if let Some(document) = documents.iter_mut().find(|d| d.path == path) {
        scope_sections(&document.id, &mut sections);
        document.title = title_for(path, &sections);
        document.sections = sections;
        return;
    }
    let id = Uuid::new_v4().to_string();
    scope_sections(&id, &mut sections);
    let mut document = Document::new(id, path, sections);
    document.order_index = siblings_sorted(documents, None).len();
    debug!(path, id = %document.id, "creating document");
    documents.push(document);
}

pub fn update_section(
    documents: &mut [Document],
    path: &str,
    section_id: &str,
    mut section: Section,
) -> bool {
    let Some(document) = documents.iter_mut().find(|d| d.path == path) else {
        return false;
    };
    let Some(slot) = document.sections.iter_mut().find(|s| s.id == section_id)
    else {
        return false;
    };
    section.id = scoped_id(&document.id, &section.id);
    *slot = section;
    document.title = title_for(&document.path, &document.sections);
    true
}

/// `id` and every document below it.
fn descendants(documents: &[Document], id: &str) -> HashSet<String> {
    let mut found = HashSet::from([id.to_string()]);
    let mut frontier = vec![id.to_string()];
    while let Some(parent) = frontier.pop() {
        for child in documents
            .iter()
            .filter(|d| d.parent_id.as_deref() == Some(parent.as_str()))
        {
            if found.insert(child.id.clone()) {
                frontier.push(child.id.clone());
            }
        }
    }
    found
}

pub fn delete_node(documents: &mut Vec<Document>, id: &str) -> bool {
    if documents.iter().any(|d| d.id == id) {
        let doomed = descendants(documents, id);
        documents.retain(|d| !doomed.contains(&d.id));
        return true;
    }
    let owners: Vec<usize> = documents
        .iter()
        .enumerate()
        .filter(|(_, d)| d.sections.iter().any(|s| s.id == id))
        .map(|(i, _)| i)
        .collect();
    let owner = match owners.as_slice() {
        [owner] => *owner,
        [] => return false,
        _ => {
            warn!(
                id,
                documents = owners.len(),
                "section id is ambiguous, not deleting"
            );
            return false;
        }
    };
    let document = &mut documents[owner];
    let Some(index) = document.sections.iter().position(|s| s.id == id) else {
        return false;
    };
    let end = subtree_end(&document.sections, index);
    document.sections.drain(index..end);
    document.title = title_for(&document.path, &document.sections);
    true
}

fn renumber(documents: &mut [Document], order: &[String]) {
    for (position, id) in order.iter().enumerate() {
        if let Some(document) = documents.iter_mut().find(|d| &d.id == id) {
            document.order_index = position;
        }
    }
}

pub fn reorder_node(
    documents: &mut [Document],
    id: &str,
    parent_id: Option<&str>,
    order_index: usize,
) -> bool {
    let Some(old_parent) = documents
        .iter()
        .find(|d| d.id == id)
        .map(|d| d.parent_id.clone())
    else {
        return false;
    };
    if let Some(parent) = parent_id {
        if !documents.iter().any(|d| d.id == parent) {
            return false;
        }
        if descendants(documents, id).contains(parent) {
            debug!(id, parent, "refusing to move a document below itself");
            return false;
        }
    }

    let mut order: Vec<String> = siblings_sorted(documents, parent_id)
        .into_iter()
        .filter(|d| d.id != id)
        .map(|d| d.id.clone())
        .collect();
    order.insert(order_index.min(order.len()), id.to_string());
    if let Some(document) = documents.iter_mut().find(|d| d.id == id) {
        document.parent_id = parent_id.map(str::to_string);
    }
    renumber(documents, &order);

    if old_parent.as_deref() != parent_id {
        let left_behind: Vec<String> =
            siblings_sorted(documents, old_parent.as_deref())
                .into_iter()
                .map(|d| d.id.clone())
                .collect();
        renumber(documents, &left_behind);
    }
    true
}
