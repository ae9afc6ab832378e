//! Search over a directory of documents.
use crate::cli::args::{OutputArgs, load_documents};
use folio::config::Config;
use folio::search::search;
use std::path::Path;

pub fn run(
    root: &Path,
    query: &str,
    limit: Option<usize>,
    config: &Config,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let documents = load_documents(root)?;
    let mut results = search(query, &documents, &config.search_options());
    if let Some(limit) = limit {
        results.truncate(limit);
    }
    output.emit(&serde_json::to_string_pretty(&results)?)?;
    Ok(())
}
