use super::Project;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Deserialize;
use sitecraft_editor::{Action, Engine};
use sitecraft_model::{PageId, Props, Styles};
use sitecraft_workspace::{acknowledge, save_document, AutoSave, DocumentStore, SaveReport};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// JSON edit script: an array of steps
    pub script: PathBuf,

    /// Record an undo checkpoint after the script
    #[arg(short, long)]
    pub checkpoint: bool,
}

/// One script step
///
/// ```json
/// [
///   { "create": { "type": "button", "id": "buy", "page": "home", "sectionId": "default-hero" } },
///   { "dispatch": { "type": "SELECT_COMPONENT", "componentId": "buy" } }
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Create(CreateStep),
    Dispatch(Action),
}

/// Build a node through the registry and add it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStep {
    #[serde(rename = "type")]
    pub component_type: String,

    /// Fixed id so later steps can refer to the node
    #[serde(default)]
    pub id: Option<String>,

    pub page: PageId,
    pub section_id: String,

    #[serde(default)]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub index: Option<usize>,

    /// Merged over the definition's default props
    #[serde(default)]
    pub props: Props,

    /// Merged over the definition's default styles
    #[serde(default)]
    pub styles: Styles,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let content = fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read {}", args.script.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid edit script {}", args.script.display()))?;

    let Project {
        config,
        store,
        mut engine,
    } = Project::open(cwd)?;

    println!(
        "{} {} steps from {}",
        "▶".bright_blue(),
        steps.len(),
        args.script.display()
    );

    if !config.autosave.enabled {
        run_steps(&mut engine, steps, args.checkpoint)?;
        save_document(&store, engine.document())?;
        print_saved(engine.state().revision);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let store: Arc<dyn DocumentStore> = Arc::new(store);
        let (autosave, mut reports) = AutoSave::spawn(store, config.autosave.clone());
        engine.subscribe(Box::new(autosave.clone()));

        let outcome = run_steps(&mut engine, steps, args.checkpoint);

        // Persist whatever was applied, even if a step failed
        autosave.shutdown();
        while let Some(report) = reports.recv().await {
            acknowledge(&mut engine, &report);
            match report {
                SaveReport::Saved { revision } => print_saved(revision),
                SaveReport::Failed { error, .. } => {
                    anyhow::bail!("Auto-save failed: {}", error)
                }
            }
        }
        outcome
    })
}

/// Apply every step, stopping at the first one that cannot be built
pub fn run_steps(engine: &mut Engine, steps: Vec<Step>, checkpoint: bool) -> Result<()> {
    for (i, step) in steps.into_iter().enumerate() {
        let action = match step {
            Step::Create(create) => build_add(engine, create)
                .with_context(|| format!("Step {} failed", i + 1))?,
            Step::Dispatch(action) => action,
        };
        dispatch_verbose(engine, action);
    }

    if checkpoint {
        dispatch_verbose(engine, Action::SaveState);
    }
    Ok(())
}

fn build_add(engine: &mut Engine, create: CreateStep) -> Result<Action> {
    let mut component = engine.create_component(&create.component_type)?;
    for key in mismatched_props(engine, &create) {
        tracing::warn!("{}.{} does not match its property schema", create.component_type, key);
        println!(
            "  {} {} prop \"{}\" does not fit its editor and may render oddly",
            "⚠️".yellow(),
            create.component_type,
            key
        );
    }
    if let Some(id) = create.id {
        component.id = id;
    }
    component.props.extend(create.props);
    component.styles.extend(create.styles);

    Ok(Action::AddComponent {
        page: create.page,
        section_id: create.section_id,
        parent_id: create.parent_id,
        component,
        index: create.index,
    })
}

/// Script props whose values the definition's schema rejects
fn mismatched_props(engine: &Engine, create: &CreateStep) -> Vec<String> {
    engine
        .registry()
        .get(&create.component_type)
        .map(|definition| {
            definition
                .invalid_props(&create.props)
                .into_iter()
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn dispatch_verbose(engine: &mut Engine, action: Action) {
    let name = action.name();
    let mutates = action.mutates_document();
    let before = engine.state().revision;

    let notice = engine.dispatch(action);
    tracing::debug!("{} -> revision {}", name, engine.state().revision);

    if mutates && engine.state().revision == before {
        println!("  {} {} had no effect", "⚠️".yellow(), name);
    } else {
        println!("  {} {}", "✓".green(), name);
    }
    if let Some(notice) = notice {
        println!("    {}", notice.to_string().dimmed());
    }
}

fn print_saved(revision: u64) {
    println!("{} Saved revision {}", "✅".green(), revision);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sitecraft_model::IdGenerator;

    fn engine() -> Engine {
        Engine::default().with_ids(IdGenerator::from_seed("script"))
    }

    fn steps(value: serde_json::Value) -> Vec<Step> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_create_then_select() {
        let mut engine = engine();
        let script = steps(json!([
            { "create": {
                "type": "button",
                "id": "buy",
                "page": "home",
                "sectionId": "default-intro",
                "index": 0,
                "props": { "label": "Buy now" }
            } },
            { "dispatch": { "type": "SELECT_COMPONENT", "componentId": "buy" } }
        ]));

        run_steps(&mut engine, script, true).unwrap();

        let section = engine.document().section(PageId::Home, "default-intro").unwrap();
        let buy = &section.components[0];
        assert_eq!(buy.id, "buy");
        assert_eq!(buy.prop_str("label"), Some("Buy now"));
        // Remaining defaults kept
        assert!(buy.props.contains_key("variant"));
        assert_eq!(engine.state().selected_component.as_deref(), Some("buy"));
        assert!(engine.can_undo());
    }

    #[test]
    fn test_mismatched_props_are_reported_but_applied() {
        let mut engine = engine();
        let create: CreateStep = serde_json::from_value(json!({
            "type": "button",
            "id": "cta",
            "page": "home",
            "sectionId": "default-intro",
            "props": { "variant": "neon", "label": "Go", "tooltip": 3 }
        }))
        .unwrap();

        assert_eq!(mismatched_props(&engine, &create), vec!["variant".to_string()]);

        let action = build_add(&mut engine, create).unwrap();
        engine.dispatch(action);
        let cta = engine.document().section(PageId::Home, "default-intro").unwrap().find_component("cta").unwrap();
        assert_eq!(cta.prop_str("variant"), Some("neon"));
    }

    #[test]
    fn test_unknown_type_stops_script() {
        let mut engine = engine();
        let script = steps(json!([
            { "dispatch": { "type": "SET_PAGE", "page": "about" } },
            { "create": { "type": "carousel3d", "page": "home", "sectionId": "default-intro" } },
            { "dispatch": { "type": "SET_PAGE", "page": "contact" } }
        ]));

        let err = run_steps(&mut engine, script, false).unwrap_err();
        assert!(format!("{:#}", err).contains("Component definition not found: carousel3d"));
        assert_eq!(engine.state().current_page, PageId::About);
    }

    #[test]
    fn test_apply_persists_without_autosave() {
        let dir = tempfile::TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();
        fs::write(
            dir.path().join(crate::config::DEFAULT_CONFIG_NAME),
            r#"{ "autosave": { "enabled": false } }"#,
        )
        .unwrap();

        let script = dir.path().join("script.json");
        fs::write(
            &script,
            r#"[{ "dispatch": { "type": "REMOVE_SECTION", "page": "home", "sectionId": "default-hero" } }]"#,
        )
        .unwrap();

        apply(
            ApplyArgs {
                script,
                checkpoint: false,
            },
            &cwd,
        )
        .unwrap();

        let project = Project::open(&cwd).unwrap();
        assert!(project
            .engine
            .document()
            .section(PageId::Home, "default-hero")
            .is_none());
    }

    #[test]
    fn test_apply_persists_through_autosave() {
        let dir = tempfile::TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();

        let script = dir.path().join("script.json");
        fs::write(
            &script,
            r#"[{ "dispatch": { "type": "REMOVE_SECTION", "page": "contact", "sectionId": "default-contact" } }]"#,
        )
        .unwrap();

        apply(
            ApplyArgs {
                script,
                checkpoint: true,
            },
            &cwd,
        )
        .unwrap();

        let project = Project::open(&cwd).unwrap();
        assert!(project.engine.document().page(PageId::Contact).unwrap().sections.is_empty());
    }
}
