mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, components, export, import, init, inspect, render, ApplyArgs, ComponentsArgs,
    ExportArgs, ImportArgs, InitArgs, InspectArgs, RenderArgs,
};
use tracing_subscriber::EnvFilter;

/// Sitecraft CLI - build websites from predefined components
#[derive(Parser, Debug)]
#[command(name = "sitecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine activity (debug level) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create sitecraft.config.json and store the starter site
    Init(InitArgs),

    /// List the component library
    Components(ComponentsArgs),

    /// Print the page, section and component tree
    Inspect(InspectArgs),

    /// Run a JSON edit script against the stored document
    Apply(ApplyArgs),

    /// Render a page to a standalone HTML preview
    Render(RenderArgs),

    /// Write the stored document to a JSON file
    Export(ExportArgs),

    /// Replace the stored document with a JSON file
    Import(ImportArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Components(args) => components(args, &cwd),
        Command::Inspect(args) => inspect(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Import(args) => import(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
