use super::Project;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_model::PageId;
use sitecraft_registry::{render_page, RenderOptions};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page to render
    #[arg(short, long, default_value = "home")]
    pub page: PageId,

    /// Output file (prints to stdout if not specified)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Include sections marked hidden
    #[arg(long)]
    pub include_hidden: bool,

    /// Leave out data-component-id attributes
    #[arg(long)]
    pub no_annotate: bool,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let project = Project::open(cwd)?;

    let options = RenderOptions {
        include_hidden: args.include_hidden,
        annotate: !args.no_annotate,
        ..Default::default()
    };
    let html = render_page(
        project.engine.document(),
        args.page,
        project.engine.registry(),
        options,
    );

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, html)?;
            println!(
                "{} Rendered {} → {}",
                "✓".green(),
                args.page,
                path.display()
            );
        }
        None => print!("{}", html),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn render_to(dir: &TempDir, name: &str, no_annotate: bool) -> String {
        let out = dir.path().join("site").join(name);
        render(
            RenderArgs {
                page: PageId::Home,
                out: Some(out.clone()),
                include_hidden: false,
                no_annotate,
            },
            &dir.path().display().to_string(),
        )
        .unwrap();
        fs::read_to_string(out).unwrap()
    }

    #[test]
    fn test_render_writes_annotated_page() {
        let dir = TempDir::new().unwrap();
        let html = render_to(&dir, "index.html", false);

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("data-section-id=\"default-hero\""));
    }

    #[test]
    fn test_render_without_annotations() {
        let dir = TempDir::new().unwrap();
        let html = render_to(&dir, "plain.html", true);

        assert!(!html.contains("data-component-id"));
        assert!(!html.contains("data-section-id"));
    }
}
