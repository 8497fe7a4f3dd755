//! Reducer behaviour on document-mutating actions
//!
//! This tests:
//! - Snapshot isolation (old documents never change)
//! - Section ordering and renumbering
//! - Selection clean-up on removal
//! - Index-based insertion
//! - Absorbed stale ids and placement violations

use serde_json::json;
use sitecraft_editor::{reduce, Action, BuilderState};
use sitecraft_model::{
    ComponentNode, ComponentPatch, Document, MediaAsset, MediaKind, PageId, Position, Section,
    SectionCategory, SectionPatch, Seo, SettingsPatch, Size, ThemePatch,
};
use sitecraft_registry::ComponentRegistry;
use std::collections::BTreeMap;
use std::sync::Arc;

fn registry() -> ComponentRegistry {
    ComponentRegistry::builtin()
}

fn apply(state: &BuilderState, action: Action) -> BuilderState {
    reduce(state, action, &registry())
}

fn section_ids(state: &BuilderState, page: PageId) -> Vec<String> {
    state
        .document
        .page(page)
        .unwrap()
        .ordered_sections()
        .into_iter()
        .map(|s| s.id.clone())
        .collect()
}

fn orders(state: &BuilderState, page: PageId) -> Vec<u32> {
    state
        .document
        .page(page)
        .unwrap()
        .sections
        .iter()
        .map(|s| s.order)
        .collect()
}

fn add_section(state: &BuilderState, page: PageId, id: &str, index: Option<usize>) -> BuilderState {
    apply(
        state,
        Action::AddSection {
            page,
            section: Section::new(id, id, SectionCategory::Custom),
            index,
        },
    )
}

fn text(id: &str) -> ComponentNode {
    ComponentNode::new(id, "text").with_prop("content", id)
}

#[test]
fn test_mutations_leave_previous_document_untouched() {
    let state = apply(
        &BuilderState::default(),
        Action::AddMedia {
            kind: MediaKind::Video,
            asset: MediaAsset::new("vid-0", "https://cdn.test/intro.mp4", "intro.mp4"),
        },
    );
    let before = Arc::clone(&state.document);
    let serialized = serde_json::to_string(&*before).unwrap();

    let mutations = vec![
        Action::UpdateComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            component_id: "default-intro-text".into(),
            patch: ComponentPatch::props(BTreeMap::from([("content".to_string(), json!("New"))])),
        },
        Action::AddComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            parent_id: None,
            component: text("c-new"),
            index: Some(0),
        },
        Action::RemoveComponent {
            page: PageId::Home,
            section_id: "default-hero".into(),
            component_id: "default-hero-cta".into(),
        },
        Action::UpdateSection {
            page: PageId::Home,
            section_id: "default-hero".into(),
            patch: SectionPatch {
                visible: Some(false),
                ..Default::default()
            },
        },
        Action::RemoveSection {
            page: PageId::Home,
            section_id: "default-intro".into(),
        },
        Action::ReorderSections {
            page: PageId::Home,
            section_ids: vec!["default-intro".into(), "default-hero".into()],
        },
        Action::UpdateTheme {
            patch: ThemePatch {
                colors: Some(BTreeMap::from([("primary".to_string(), "#000000".to_string())])),
                ..Default::default()
            },
        },
        Action::UpdateSettings {
            patch: SettingsPatch {
                seo: Some(Seo {
                    title: "Shop".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            },
        },
        Action::AddMedia {
            kind: MediaKind::Image,
            asset: MediaAsset::new("img-1", "https://cdn.test/a.png", "a.png"),
        },
        Action::RemoveMedia {
            asset_id: "vid-0".into(),
        },
    ];

    for action in mutations {
        let name = action.name();
        let next = apply(&state, action);

        assert!(next.dirty, "{} should set dirty", name);
        assert_eq!(next.revision, state.revision + 1, "{} should bump revision", name);
        assert!(!Arc::ptr_eq(&next.document, &before), "{} should publish a new document", name);
        assert_eq!(serde_json::to_string(&*before).unwrap(), serialized, "{} touched the old document", name);
    }
}

#[test]
fn test_reorder_yields_sequential_order_keys() {
    for n in 0..6usize {
        let mut state = BuilderState::new(Document::empty());
        for i in 0..n {
            state = add_section(&state, PageId::Products, &format!("s{}", i), None);
        }

        let mut ids = section_ids(&state, PageId::Products);
        ids.reverse();
        let next = apply(
            &state,
            Action::ReorderSections {
                page: PageId::Products,
                section_ids: ids.clone(),
            },
        );

        let page = next.document.page(PageId::Products).unwrap();
        let listed: Vec<String> = page.sections.iter().map(|s| s.id.clone()).collect();
        assert_eq!(listed, ids);
        assert_eq!(orders(&next, PageId::Products), (0..n as u32).collect::<Vec<_>>());
    }
}

#[test]
fn test_reorder_rejects_non_permutation() {
    let state = BuilderState::default();

    for ids in [
        vec!["default-hero"],
        vec!["default-hero", "default-hero"],
        vec!["default-hero", "default-intro", "extra"],
    ] {
        let next = apply(
            &state,
            Action::ReorderSections {
                page: PageId::Home,
                section_ids: ids.into_iter().map(String::from).collect(),
            },
        );
        assert!(Arc::ptr_eq(&next.document, &state.document));
        assert_eq!(next.revision, state.revision);
    }
}

#[test]
fn test_add_section_renumbers() {
    let state = BuilderState::default();

    let next = add_section(&state, PageId::Home, "middle", Some(1));
    assert_eq!(section_ids(&next, PageId::Home), vec!["default-hero", "middle", "default-intro"]);
    assert_eq!(orders(&next, PageId::Home), vec![0, 1, 2]);

    let next = add_section(&next, PageId::Home, "last", Some(99));
    assert_eq!(section_ids(&next, PageId::Home).last().unwrap(), "last");
    assert_eq!(orders(&next, PageId::Home), vec![0, 1, 2, 3]);
}

#[test]
fn test_remove_selected_component_clears_selection() {
    let mut state = BuilderState::default();
    state.selected_component = Some("default-intro-text".into());

    let next = apply(
        &state,
        Action::RemoveComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            component_id: "default-intro-text".into(),
        },
    );
    assert_eq!(next.selected_component, None);

    let next = apply(
        &state,
        Action::RemoveComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            component_id: "default-intro-heading".into(),
        },
    );
    assert_eq!(next.selected_component.as_deref(), Some("default-intro-text"));
}

#[test]
fn test_remove_ancestor_clears_selection() {
    let mut state = BuilderState::default();
    state.selected_component = Some("default-hero-cta".into());

    let next = apply(
        &state,
        Action::RemoveComponent {
            page: PageId::Home,
            section_id: "default-hero".into(),
            component_id: "default-hero-banner".into(),
        },
    );
    assert_eq!(next.selected_component, None);
    assert!(!next.document.contains_component("default-hero-cta"));
}

#[test]
fn test_remove_selected_section_clears_both_selections() {
    let mut state = BuilderState::default();
    state.selected_section = Some("default-hero".into());
    state.selected_component = Some("default-hero-cta".into());

    let next = apply(
        &state,
        Action::RemoveSection {
            page: PageId::Home,
            section_id: "default-hero".into(),
        },
    );
    assert_eq!(next.selected_section, None);
    assert_eq!(next.selected_component, None);
    assert_eq!(section_ids(&next, PageId::Home), vec!["default-intro"]);
}

#[test]
fn test_replacing_section_components_clears_selection() {
    let mut state = BuilderState::default();
    state.selected_component = Some("default-intro-text".into());
    state.selected_section = Some("default-intro".into());

    let next = apply(
        &state,
        Action::UpdateSection {
            page: PageId::Home,
            section_id: "default-intro".into(),
            patch: SectionPatch {
                components: Some(vec![]),
                ..Default::default()
            },
        },
    );
    assert!(!next.document.contains_component("default-intro-text"));
    assert_eq!(next.selected_component, None);
    assert_eq!(next.selected_section.as_deref(), Some("default-intro"));
}

#[test]
fn test_replacing_children_clears_selection() {
    let mut state = BuilderState::default();
    state.selected_component = Some("default-hero-cta".into());

    let next = apply(
        &state,
        Action::UpdateComponent {
            page: PageId::Home,
            section_id: "default-hero".into(),
            component_id: "default-hero-banner".into(),
            patch: ComponentPatch {
                children: Some(vec![]),
                ..Default::default()
            },
        },
    );
    assert!(!next.document.contains_component("default-hero-cta"));
    assert_eq!(next.selected_component, None);

    // Selection survives an edit that keeps the node
    let kept = apply(
        &state,
        Action::UpdateComponent {
            page: PageId::Home,
            section_id: "default-hero".into(),
            component_id: "default-hero-banner".into(),
            patch: ComponentPatch::styles(BTreeMap::from([("padding".to_string(), "4rem".to_string())])),
        },
    );
    assert_eq!(kept.selected_component.as_deref(), Some("default-hero-cta"));
}

#[test]
fn test_non_finite_geometry_absorbed() {
    let state = BuilderState::default();
    let mut adrift = text("adrift");
    adrift.size = Some(Size {
        width: f64::INFINITY,
        height: 20.0,
    });

    let rejected = vec![
        Action::UpdateComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            component_id: "default-intro-text".into(),
            patch: ComponentPatch {
                position: Some(Some(Position { x: f64::NAN, y: 0.0 })),
                ..Default::default()
            },
        },
        Action::AddComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            parent_id: None,
            component: adrift.clone(),
            index: None,
        },
        Action::AddSection {
            page: PageId::About,
            section: Section::new("free", "Free", SectionCategory::Custom).with_component(adrift.clone()),
            index: None,
        },
        Action::UpdateSection {
            page: PageId::Home,
            section_id: "default-intro".into(),
            patch: SectionPatch {
                components: Some(vec![adrift]),
                ..Default::default()
            },
        },
    ];

    for action in rejected {
        let name = action.name();
        let next = apply(&state, action);
        assert!(Arc::ptr_eq(&next.document, &state.document), "{} was applied", name);
        assert_eq!(next.revision, state.revision);
        assert_eq!(next.document.validate(), Ok(()));
    }

    let placed = apply(
        &state,
        Action::UpdateComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            component_id: "default-intro-text".into(),
            patch: ComponentPatch {
                position: Some(Some(Position { x: 94.13802247758555, y: 12.0 })),
                ..Default::default()
            },
        },
    );
    assert_eq!(placed.revision, state.revision + 1);
}

#[test]
fn test_add_component_at_index_shifts_rest() {
    let state = BuilderState::default();

    let next = apply(
        &state,
        Action::AddComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            parent_id: None,
            component: text("inserted"),
            index: Some(1),
        },
    );

    let ids: Vec<&str> = next
        .document
        .section(PageId::Home, "default-intro")
        .unwrap()
        .components
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["default-intro-heading", "inserted", "default-intro-text"]);
}

#[test]
fn test_add_component_into_container() {
    let state = BuilderState::default();

    let next = apply(
        &state,
        Action::AddComponent {
            page: PageId::Home,
            section_id: "default-hero".into(),
            parent_id: Some("default-hero-banner".into()),
            component: text("tagline"),
            index: Some(0),
        },
    );

    let banner = next.document.section(PageId::Home, "default-hero").unwrap().components[0].clone();
    assert_eq!(banner.children[0].id, "tagline");
    assert_eq!(banner.children[1].id, "default-hero-cta");
}

#[test]
fn test_add_component_placement_violations_absorbed() {
    let state = BuilderState::default();

    let rejected = vec![
        // Leaf parent
        Action::AddComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            parent_id: Some("default-intro-text".into()),
            component: text("child"),
            index: None,
        },
        // Column outside columns
        Action::AddComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            parent_id: None,
            component: ComponentNode::new("col", "column"),
            index: None,
        },
        // Unregistered type
        Action::AddComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            parent_id: None,
            component: ComponentNode::new("x", "carousel3d"),
            index: None,
        },
        // Id already in use
        Action::AddComponent {
            page: PageId::About,
            section_id: "missing".into(),
            parent_id: None,
            component: text("default-hero-cta"),
            index: None,
        },
    ];

    for action in rejected {
        let next = apply(&state, action);
        assert!(Arc::ptr_eq(&next.document, &state.document));
        assert!(!next.dirty);
    }
}

#[test]
fn test_stale_ids_are_no_ops() {
    let state = BuilderState::default();

    let stale = vec![
        Action::UpdateComponent {
            page: PageId::Home,
            section_id: "default-intro".into(),
            component_id: "gone".into(),
            patch: ComponentPatch::default(),
        },
        Action::RemoveComponent {
            page: PageId::Home,
            section_id: "gone".into(),
            component_id: "default-intro-text".into(),
        },
        Action::UpdateSection {
            page: PageId::About,
            section_id: "default-hero".into(),
            patch: SectionPatch::default(),
        },
        Action::RemoveSection {
            page: PageId::Contact,
            section_id: "gone".into(),
        },
        Action::RemoveMedia {
            asset_id: "gone".into(),
        },
    ];

    for action in stale {
        let next = apply(&state, action);
        assert!(Arc::ptr_eq(&next.document, &state.document));
        assert_eq!(next.revision, state.revision);
    }
}

#[test]
fn test_update_component_shallow_merge() {
    let state = BuilderState::default();

    let next = apply(
        &state,
        Action::UpdateComponent {
            page: PageId::Home,
            section_id: "default-hero".into(),
            component_id: "default-hero-cta".into(),
            patch: ComponentPatch::props(BTreeMap::from([("label".to_string(), json!("Buy"))])),
        },
    );

    let cta = next.document.section(PageId::Home, "default-hero").unwrap().find_component("default-hero-cta").unwrap();
    assert_eq!(cta.prop_str("label"), Some("Buy"));
    // Whole props map replaced
    assert_eq!(cta.props.len(), 1);
}

#[test]
fn test_media_add_and_remove() {
    let state = BuilderState::default();
    let asset = MediaAsset::new("vid-1", "https://cdn.test/v.mp4", "v.mp4");

    let added = apply(
        &state,
        Action::AddMedia {
            kind: MediaKind::Video,
            asset: asset.clone(),
        },
    );
    assert_eq!(added.document.media.assets(MediaKind::Video), &[asset.clone()]);

    let duplicate = apply(&added, Action::AddMedia { kind: MediaKind::Image, asset });
    assert_eq!(duplicate.revision, added.revision);

    let removed = apply(&added, Action::RemoveMedia { asset_id: "vid-1".into() });
    assert!(removed.document.media.assets(MediaKind::Video).is_empty());
}

#[test]
fn test_navigation_selection_rules() {
    let state = BuilderState::default();

    let next = apply(&state, Action::SelectSection { section_id: Some("default-hero".into()) });
    let next = apply(&next, Action::SelectComponent { component_id: Some("default-hero-cta".into()) });
    assert_eq!(next.selected_section.as_deref(), Some("default-hero"));
    assert_eq!(next.selected_component.as_deref(), Some("default-hero-cta"));

    let reselected = apply(&next, Action::SelectSection { section_id: Some("default-intro".into()) });
    assert_eq!(reselected.selected_component, None);

    let moved = apply(&next, Action::SetPage { page: PageId::About });
    assert_eq!(moved.current_page, PageId::About);
    assert_eq!(moved.selected_section, None);
    assert_eq!(moved.selected_component, None);
    assert!(Arc::ptr_eq(&moved.document, &state.document));
    assert!(!moved.dirty);
}

#[test]
fn test_drag_never_touches_document() {
    let state = BuilderState::default();

    let dragging = apply(&state, Action::StartDrag { component: text("dragged") });
    assert!(dragging.drag.active);
    assert_eq!(dragging.drag.payload.as_ref().unwrap().id, "dragged");

    let ended = apply(&dragging, Action::EndDrag);
    assert!(!ended.drag.active);
    assert!(ended.drag.payload.is_none());
    assert!(Arc::ptr_eq(&ended.document, &state.document));
    assert!(!ended.dirty);
}

#[test]
fn test_mark_saved_requires_current_revision() {
    let state = BuilderState::default();
    let edited = apply(&state, Action::RemoveSection { page: PageId::Home, section_id: "default-intro".into() });
    assert!(edited.dirty);

    let stale_ack = apply(&edited, Action::MarkSaved { revision: state.revision });
    assert!(stale_ack.dirty);

    let ack = apply(&edited, Action::MarkSaved { revision: edited.revision });
    assert!(!ack.dirty);
}
