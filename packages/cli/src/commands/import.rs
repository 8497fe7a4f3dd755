use super::Project;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_editor::Action;
use sitecraft_workspace::{parse_document, save_document};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON document to load into the store
    pub file: PathBuf,
}

pub fn import(args: ImportArgs, cwd: &str) -> Result<()> {
    let json = fs::read_to_string(&args.file)
        .with_context(|| format!("Cannot read {}", args.file.display()))?;
    let document = parse_document(&json)
        .with_context(|| format!("{} is not a usable Sitecraft document", args.file.display()))?;

    let mut project = Project::open(cwd)?;
    project.engine.dispatch(Action::LoadData {
        document: Box::new(document),
    });
    save_document(&project.store, project.engine.document())?;

    println!(
        "{} Imported {} ({} components)",
        "✓".green(),
        args.file.display(),
        project.engine.document().component_count()
    );
    Ok(())
}
