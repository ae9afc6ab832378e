//! Shared argument types and document loading for CLI commands.

use clap::Args;
use folio::parse::parse;
use folio::section::{Document, Section};
use folio::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A markup document to read
#[derive(Args, Clone)]
pub struct InputArgs {
    /// Path of the markup file
    pub file: PathBuf,

    /// Title of the implicit root section (defaults to the file stem)
    #[arg(long)]
    pub title: Option<String>,
}

impl InputArgs {
    pub fn title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| file_stem(&self.file))
    }

    pub fn sections(&self) -> Result<Vec<Section>> {
        let text = fs::read_to_string(&self.file).map_err(|e| Error::io(&self.file, e))?;
        Ok(parse(&text, Some(&self.title())))
    }
}

#[derive(Args, Clone)]
pub struct OutputArgs {
    /// Output file to write the result to
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    pub fn emit(&self, out: &str) -> Result<()> {
        match &self.output {
            Some(path) => {
                fs::write(path, out).map_err(|e| Error::io(path, e))?;
                eprintln!("Output written to: {}", path.display());
            }
            None => println!("{out}"),
        }
        Ok(())
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Routable path of `file` relative to `root`: `/dir/name`, no extension.
pub fn route_for(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file).with_extension("");
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("/{}", parts.join("/"))
}

/// Every `.md` file under `root`, each parsed as a document titled after
/// its file stem. Unreadable files are skipped with a warning.
pub fn load_documents(root: &Path) -> Result<Vec<Document>> {
    let mut files = Vec::new();
    collect_markdown(root, &mut files)?;
    files.sort();

    let mut documents = Vec::new();
    for file in files {
        let text = match fs::read_to_string(&file) {
            Ok(text) => text,
            Err(err) => {
                warn!(file = %file.display(), %err, "skipping unreadable document");
                continue;
            }
        };
        let route = route_for(root, &file);
        let sections = parse(&text, Some(&file_stem(&file)));
        documents.push(Document::new(route.clone(), route, sections));
    }
    Ok(documents)
}

fn collect_markdown(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_dir() {
            collect_markdown(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(())
}
