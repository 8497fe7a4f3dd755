//! Integration tests for the editor engine

use anyhow::Result;
use sitecraft_editor::{
    Action, BuilderState, DropTarget, EditorError, Engine, EngineConfig, Notice, StateObserver,
};
use sitecraft_model::{ComponentPatch, Document, IdGenerator, PageId, Section, SectionCategory};
use sitecraft_registry::{ComponentRegistry, RegistryError};
use std::sync::{Arc, Mutex};

fn engine() -> Engine {
    Engine::new(Arc::new(ComponentRegistry::builtin()), EngineConfig::default())
        .with_ids(IdGenerator::from_seed("it"))
}

#[derive(Default, Clone)]
struct Recorder {
    events: Arc<Mutex<Vec<(u64, bool)>>>,
}

impl StateObserver for Recorder {
    fn state_changed(&mut self, previous: &BuilderState, current: &BuilderState) {
        if previous.revision != current.revision {
            self.events.lock().unwrap().push((current.revision, current.dirty));
        }
    }
}

#[test]
fn test_build_page_from_library() -> Result<()> {
    let mut engine = engine();

    let section_id = "section-it-custom".to_string();
    engine.dispatch(Action::AddSection {
        page: PageId::Products,
        section: Section::new(section_id.clone(), "Featured", SectionCategory::Products),
        index: None,
    });

    let columns = engine.create_component("columns")?;
    let columns_id = columns.id.clone();
    engine.dispatch(Action::AddComponent {
        page: PageId::Products,
        section_id: section_id.clone(),
        parent_id: None,
        component: columns,
        index: None,
    });

    for _ in 0..2 {
        engine.start_drag_from_library("column")?;
        engine.drop_dragged(DropTarget::section(PageId::Products, &section_id).inside(&columns_id))?;
    }

    let section = engine.document().section(PageId::Products, &section_id).unwrap();
    let columns = section.find_component(&columns_id).unwrap();
    assert_eq!(columns.children.len(), 2);
    assert!(columns.children.iter().all(|c| c.component_type == "column"));
    assert!(engine.document().validate().is_ok());
    Ok(())
}

#[test]
fn test_created_nodes_match_registry_defaults() -> Result<()> {
    let mut engine = engine();
    let node = engine.create_component("text")?;
    let definition = engine.registry().get("text").unwrap();

    assert_eq!(node.props, definition.default_props);
    assert_eq!(node.styles, definition.default_styles);
    assert!(node.children.is_empty());
    Ok(())
}

#[test]
fn test_unknown_definition_fails_before_dispatch() {
    let mut engine = engine();
    let revision = engine.state().revision;

    match engine.start_drag_from_library("nonexistent_type_id") {
        Err(EditorError::Registry(RegistryError::DefinitionNotFound(id))) => {
            assert_eq!(id, "nonexistent_type_id")
        }
        other => panic!("expected DefinitionNotFound, got {:?}", other),
    }
    assert!(!engine.state().drag.active);
    assert_eq!(engine.state().revision, revision);
}

#[test]
fn test_disallowed_drop_ends_drag() -> Result<()> {
    let mut engine = engine();
    engine.start_drag_from_library("column")?;

    // Columns only live inside a `columns` container
    engine.drop_dragged(DropTarget::section(PageId::Home, "default-intro"))?;

    assert!(!engine.state().drag.active);
    assert!(!engine.state().dirty);
    assert_eq!(engine.document().section(PageId::Home, "default-intro").unwrap().components.len(), 2);
    Ok(())
}

#[test]
fn test_edit_checkpoint_undo_cycle() {
    let mut engine = engine();
    assert!(!engine.can_undo());

    engine.dispatch(Action::UpdateComponent {
        page: PageId::Home,
        section_id: "default-intro".into(),
        component_id: "default-intro-heading".into(),
        patch: ComponentPatch {
            styles: Some([("color".to_string(), "red".to_string())].into()),
            ..Default::default()
        },
    });
    assert!(engine.state().dirty);
    assert_eq!(engine.dispatch(Action::SaveState), Some(Notice::Checkpointed));
    assert!(!engine.state().dirty);
    assert!(engine.can_undo());

    assert_eq!(engine.dispatch(Action::Undo), Some(Notice::Undone));
    let heading = engine
        .document()
        .section(PageId::Home, "default-intro")
        .unwrap()
        .find_component("default-intro-heading")
        .unwrap();
    assert!(heading.styles.is_empty());
    assert!(engine.can_redo());
    assert_eq!(engine.dispatch(Action::Undo), Some(Notice::NothingToUndo));
}

#[test]
fn test_observers_receive_document_changes() {
    let recorder = Recorder::default();
    let mut engine = engine();
    engine.subscribe(Box::new(recorder.clone()));

    engine.dispatch(Action::SetEditMode { editing: false });
    engine.dispatch(Action::RemoveSection {
        page: PageId::Home,
        section_id: "default-hero".into(),
    });
    engine.dispatch(Action::LoadData {
        document: Box::new(Document::default()),
    });

    assert_eq!(*recorder.events.lock().unwrap(), vec![(1, true), (2, false)]);
}

#[test]
fn test_actions_from_json_script() -> Result<()> {
    let mut engine = engine();
    let script = r#"[
        { "type": "SET_PAGE", "page": "contact" },
        { "type": "SELECT_SECTION", "sectionId": "default-contact" },
        { "type": "UPDATE_SECTION", "page": "contact", "sectionId": "default-contact",
          "patch": { "name": "Get in touch", "visible": false } },
        { "type": "SAVE_STATE" }
    ]"#;

    let actions: Vec<Action> = serde_json::from_str(script)?;
    for action in actions {
        engine.dispatch(action);
    }

    let state = engine.state();
    assert_eq!(state.current_page, PageId::Contact);
    assert_eq!(state.selected_section.as_deref(), Some("default-contact"));

    let section = engine.document().section(PageId::Contact, "default-contact").unwrap();
    assert_eq!(section.name, "Get in touch");
    assert!(!section.visible);
    assert_eq!(engine.state().history.len(), 2);
    Ok(())
}

#[test]
fn test_small_history_limit() {
    let mut engine = Engine::with_document(
        Document::empty(),
        Arc::new(ComponentRegistry::builtin()),
        EngineConfig { history_limit: 2 },
    );

    for _ in 0..5 {
        engine.dispatch(Action::SaveState);
    }
    assert_eq!(engine.state().history.len(), 2);
    assert_eq!(engine.state().history.limit(), 2);
}
