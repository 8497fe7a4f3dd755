use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_model::Document;
use sitecraft_workspace::{save_document, DocumentStore, STORAGE_KEY};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config and stored document
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Sitecraft site...".bright_blue().bold());

    let config = Config::default();
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let store = config.store(cwd);
    if store.read(STORAGE_KEY)?.is_none() || args.force {
        save_document(&store, &Document::default())?;
        println!(
            "  {} Stored starter site in {}/",
            "✓".green(),
            config.storage_dir
        );
    }

    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: sitecraft components");
    println!("  2. Write an edit script and run: sitecraft apply script.json");
    println!("  3. Preview with: sitecraft render --out index.html");

    Ok(())
}
