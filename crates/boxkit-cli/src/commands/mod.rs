pub mod assemble;
pub mod completions;
pub mod inspect;
pub mod man_pages;

use boxkit_core::{load_manifest, AssembleReport, Outcome};
use boxkit_schema::Manifest;
use tracing::debug;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_MANIFEST_ERROR: u8 = 2;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn colorize_outcome(label: &str) -> String {
    use console::Style;
    match label {
        "created" | "removed" => Style::new().green().apply_to(label).to_string(),
        "planned" => Style::new().cyan().apply_to(label).to_string(),
        "exists" => Style::new().yellow().apply_to(label).to_string(),
        "failed" => Style::new().red().bold().apply_to(label).to_string(),
        other => other.to_owned(),
    }
}

/// Load the manifest, narrowed to `name` when one is given.
///
/// `Ok(None)` means `name` is not defined in the manifest.
pub fn load_selected(file: &str, name: Option<&str>) -> Result<Option<Manifest>, String> {
    let mut manifest = load_manifest(file).map_err(|e| e.to_string())?;
    if let Some(name) = name {
        if !manifest.retain_only(name) {
            debug!("no container named '{name}' in {file}");
            return Ok(None);
        }
    }
    Ok(Some(manifest))
}

/// Print a report and choose the exit code: any failed container fails the run.
pub fn print_report(report: &AssembleReport, json: bool) -> Result<u8, String> {
    if json {
        println!("{}", json_pretty(report)?);
    } else {
        for entry in &report.entries {
            match &entry.outcome {
                Outcome::Planned { commands } => {
                    for command in commands {
                        println!("{command}");
                    }
                }
                Outcome::Created { exported } if *exported > 0 => println!(
                    "{}: {} ({exported} exported)",
                    entry.name,
                    colorize_outcome(entry.outcome.label())
                ),
                Outcome::Failed { reason } => println!(
                    "{}: {} ({reason})",
                    entry.name,
                    colorize_outcome(entry.outcome.label())
                ),
                other => println!("{}: {}", entry.name, colorize_outcome(other.label())),
            }
        }
    }
    Ok(if report.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}
