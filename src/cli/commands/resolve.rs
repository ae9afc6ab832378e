//! Link resolution against a document and, optionally, its siblings.
use crate::cli::args::{InputArgs, load_documents};
use folio::link::resolve_in;
use std::path::Path;

pub fn run(
    input: &InputArgs,
    target: &str,
    root: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let sections = input.sections()?;
    let documents = match root {
        Some(root) => load_documents(root)?,
        None => Vec::new(),
    };
    match resolve_in(target, &sections, &documents) {
        Some(link) => {
            println!("{}", serde_json::to_string_pretty(&link)?);
            eprintln!("href: {}", link.href());
        }
        None => eprintln!("{target} is not an internal link"),
    }
    Ok(())
}
