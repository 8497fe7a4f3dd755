use super::Project;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_model::{ComponentNode, Document, PageId};
use std::fmt::Write;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Page to show (home, about, products, contact); all pages if omitted
    #[arg(short, long)]
    pub page: Option<PageId>,
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let project = Project::open(cwd)?;
    let document = project.engine.document();

    let pages = match args.page {
        Some(page) => vec![page],
        None => PageId::ALL.to_vec(),
    };

    for page in pages {
        print!("{}", page_tree(document, page));
    }

    println!(
        "{} components, {} images, {} videos",
        document.component_count(),
        document.media.images.len(),
        document.media.videos.len()
    );
    Ok(())
}

/// Page → sections (by order key) → component tree
fn page_tree(document: &Document, page: PageId) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", page.to_string().bright_blue().bold());

    let Some(page) = document.page(page) else {
        return out;
    };

    if page.sections.is_empty() {
        let _ = writeln!(out, "  {}", "(no sections)".dimmed());
    }

    for section in page.ordered_sections() {
        let hidden = if section.visible { "" } else { " hidden" };
        let _ = writeln!(
            out,
            "  {} {} [{}] #{}{}",
            section.order,
            section.name.bright_white(),
            section.category,
            section.id,
            hidden.yellow()
        );
        for component in &section.components {
            write_node(&mut out, component, 2);
        }
    }
    out.push('\n');
    out
}

fn write_node(out: &mut String, node: &ComponentNode, depth: usize) {
    let _ = writeln!(
        out,
        "{}{} #{}",
        "  ".repeat(depth),
        node.component_type.green(),
        node.id.dimmed()
    );
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}
