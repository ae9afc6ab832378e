//! Conversions between markup, flat sections, trees and blocks.
use crate::cli::args::{InputArgs, OutputArgs};
use folio::blocks::to_blocks;
use folio::hierarchy::{build_tree, build_tree_branches_only};
use folio::parse::to_markup;
use folio::section::Section;
use folio::Error;
use std::fs;
use std::path::Path;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn parse(input: &InputArgs, output: &OutputArgs) -> CmdResult {
    let sections = input.sections()?;
    output.emit(&serde_json::to_string_pretty(&sections)?)?;
    Ok(())
}

pub fn tree(input: &InputArgs, branches: bool) -> CmdResult {
    let sections = input.sections()?;
    let roots = if branches {
        build_tree_branches_only(sections)
    } else {
        build_tree(sections)
    };
    for root in roots {
        print!("{root}");
    }
    Ok(())
}

pub fn blocks(input: &InputArgs, output: &OutputArgs) -> CmdResult {
    let blocks = to_blocks(&input.sections()?);
    output.emit(&serde_json::to_string_pretty(&blocks)?)?;
    Ok(())
}

pub fn markup(file: &Path, title: Option<&str>, output: &OutputArgs) -> CmdResult {
    let json = fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
    let sections: Vec<Section> =
        serde_json::from_str(&json).map_err(|e| Error::json(file, e))?;
    output.emit(to_markup(&sections, title).trim_end())?;
    Ok(())
}
