use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_registry::{ComponentCategory, ComponentDefinition, ComponentRegistry};

#[derive(Debug, Args)]
pub struct ComponentsArgs {
    /// Only list one category (basic, layout, media, commerce, marketing, forms)
    #[arg(short, long)]
    pub category: Option<ComponentCategory>,
}

pub fn components(args: ComponentsArgs, _cwd: &str) -> Result<()> {
    let registry = ComponentRegistry::builtin();

    let categories = match args.category {
        Some(category) => vec![category],
        None => registry.categories(),
    };

    for category in categories {
        println!("{}", category.to_string().bright_blue().bold());
        for definition in registry.by_category(category) {
            println!("  {}", describe(definition));
        }
        println!();
    }

    Ok(())
}

/// One listing line: type id, label, properties and nesting rules
fn describe(definition: &ComponentDefinition) -> String {
    let mut line = format!(
        "{:<14} {}",
        definition.type_id.bright_white(),
        definition.label
    );

    if !definition.schema.is_empty() {
        let keys: Vec<&str> = definition.schema.iter().map(|p| p.key.as_str()).collect();
        line.push_str(&format!(" ({})", keys.join(", ")).dimmed().to_string());
    }

    if definition.accepts_children {
        let limit = match definition.max_children {
            Some(max) => format!(" container, max {}", max),
            None => " container".to_string(),
        };
        line.push_str(&limit.green().to_string());
    }

    if let Some(parents) = &definition.allowed_parents {
        line.push_str(&format!(" inside {}", parents.join("/")).yellow().to_string());
    }

    line
}
