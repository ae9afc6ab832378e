//! Drill-down view of one section.
use crate::cli::args::{InputArgs, OutputArgs};
use folio::extract::extract_full;
use folio::link::match_section;

pub fn run(
    input: &InputArgs,
    section: &str,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let sections = input.sections()?;
    let Some(target) = match_section(section, &sections) else {
        return Err(format!("no section matches {section:?}").into());
    };
    let Some(view) = extract_full(&target.id, &sections) else {
        return Err(format!("no section matches {section:?}").into());
    };
    output.emit(&serde_json::to_string_pretty(&view)?)?;
    Ok(())
}
