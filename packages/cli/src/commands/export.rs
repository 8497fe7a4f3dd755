use super::Project;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Destination JSON file
    pub file: PathBuf,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let project = Project::open(cwd)?;
    let json = serde_json::to_string_pretty(&**project.engine.document())?;

    fs::write(&args.file, json)?;
    println!(
        "{} Exported document to {}",
        "✓".green(),
        args.file.display()
    );
    Ok(())
}
