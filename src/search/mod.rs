//! Full-text search over an in-memory set of documents.
//!
//! Every document title, section title and section body is scanned; each
//! hit is scored by what matched and how early, then the list is sorted and
//! collapsed to one entry per section (or per document for title hits).

mod session;
mod snippet;

pub use session::{SearchRequest, SearchSession};
pub use snippet::{TextMatch, find_case_insensitive, highlight, snippet};

use crate::extract::ancestor_chain;
use crate::section::{Document, Section};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    DocumentTitle,
    SectionTitle,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub document_id: String,
    pub document_title: String,
    pub document_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    /// Context around the first match, every occurrence wrapped in the
    /// highlight marker.
    pub snippet: String,
    /// Document title, ancestor titles, then the section's own title.
    pub breadcrumb: Vec<String>,
    pub match_type: MatchType,
    pub score: u32,
}

impl SearchResult {
    fn dedup_key(&self) -> (&str, &str) {
        (
            &self.document_id,
            self.section_id.as_deref().unwrap_or(&self.document_id),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Characters of context kept on each side of the first match.
    pub context: usize,
    pub marker: String,
    pub min_query_len: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            context: 60,
            marker: "**".to_string(),
            min_query_len: 2,
        }
    }
}

/// `19 - floor(index / 10)`, floored at zero: earlier matches score higher.
pub fn proximity(char_index: usize) -> u32 {
    19u32.saturating_sub(u32::try_from(char_index / 10).unwrap_or(u32::MAX))
}

fn title_score(exact: bool, exact_score: u32, base: u32, m: &TextMatch) -> u32 {
    if exact {
        exact_score
    } else {
        base + proximity(m.char_index)
    }
}

struct Hit<'a> {
    document: &'a Document,
    section: Option<(usize, &'a Section)>,
    match_type: MatchType,
    snippet: String,
    score: u32,
}

impl Hit<'_> {
    fn into_result(self) -> SearchResult {
        let document = self.document;
        let mut breadcrumb = vec![document.title.clone()];
        if let Some((index, section)) = self.section {
            breadcrumb.extend(
                ancestor_chain(&document.sections, index)
                    .into_iter()
                    .map(|a| a.title),
            );
            breadcrumb.push(section.title.clone());
        }
        let breadcrumb = breadcrumb
            .into_iter()
            .filter(|crumb| !crumb.is_empty())
            .dedup()
            .collect();

        let section_id = self.section.map(|(_, s)| s.id.clone());
        let id = format!(
            "{}:{}:{}",
            document.id,
            section_id.as_deref().unwrap_or("document"),
            match self.match_type {
                MatchType::DocumentTitle => "document-title",
                MatchType::SectionTitle => "section-title",
                MatchType::Content => "content",
            }
        );
        SearchResult {
            id,
            document_id: document.id.clone(),
            document_title: document.title.clone(),
            document_path: document.path.clone(),
            section_id,
            section_title: self.section.map(|(_, s)| s.title.clone()),
            snippet: self.snippet,
            breadcrumb,
            match_type: self.match_type,
            score: self.score,
        }
    }
}

/// Search every document, best first, one result per section.
///
/// Scores: document title 100 exact, else 80 + proximity; section title 70
/// exact, else 50 + proximity; body 30 + proximity.
pub fn search(
    query: &str,
    documents: &[Document],
    options: &SearchOptions,
) -> Vec<SearchResult> {
    let query = query.trim();
    if query.is_empty() || query.chars().count() < options.min_query_len {
        return Vec::new();
    }
    let lowered = query.to_lowercase();
    let mut hits = Vec::new();

    for document in documents {
        if let Some(m) = find_case_insensitive(&document.title, query) {
            hits.push(Hit {
                document,
                section: None,
                match_type: MatchType::DocumentTitle,
                snippet: highlight(&document.title, query, &options.marker),
                score: title_score(
                    document.title.to_lowercase() == lowered,
                    100,
                    80,
                    &m,
                ),
            });
        }

        for (index, section) in document.sections.iter().enumerate() {
            if let Some(m) = find_case_insensitive(&section.title, query) {
                hits.push(Hit {
                    document,
                    section: Some((index, section)),
                    match_type: MatchType::SectionTitle,
                    snippet: highlight(&section.title, query, &options.marker),
                    score: title_score(
                        section.title.to_lowercase() == lowered,
                        70,
                        50,
                        &m,
                    ),
                });
            }
            if let Some(m) = find_case_insensitive(&section.content, query) {
                let context = snippet(&section.content, &m, options.context);
                hits.push(Hit {
                    document,
                    section: Some((index, section)),
                    match_type: MatchType::Content,
                    snippet: highlight(&context, query, &options.marker),
                    score: 30 + proximity(m.char_index),
                });
            }
        }
    }

    let mut results: Vec<SearchResult> =
        hits.into_iter().map(Hit::into_result).collect();
    results.sort_by(|a, b| b.score.cmp(&a.score));

    let mut seen = HashSet::new();
    results.retain(|r| {
        let (doc, section) = r.dedup_key();
        seen.insert((doc.to_string(), section.to_string()))
    });
    results
}
