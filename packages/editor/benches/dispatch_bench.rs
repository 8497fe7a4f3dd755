use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sitecraft_editor::{reduce, Action, BuilderState};
use sitecraft_model::{ComponentNode, ComponentPatch, IdGenerator, PageId, Section, SectionCategory};
use sitecraft_registry::ComponentRegistry;
use serde_json::json;

/// Home page with `sections` sections of `per_section` text nodes each
fn large_state(sections: usize, per_section: usize) -> BuilderState {
    let mut ids = IdGenerator::from_seed("bench");
    let mut state = BuilderState::default();
    let registry = ComponentRegistry::builtin();

    for s in 0..sections {
        let mut section = Section::new(ids.section_id(), format!("Section {}", s), SectionCategory::Custom);
        for _ in 0..per_section {
            section.components.push(ComponentNode::new(ids.component_id(), "text"));
        }
        state = reduce(
            &state,
            Action::AddSection {
                page: PageId::Home,
                section,
                index: None,
            },
            &registry,
        );
    }
    state
}

fn dispatch_update_component(c: &mut Criterion) {
    let registry = ComponentRegistry::builtin();
    let state = large_state(20, 25);

    let action = Action::UpdateComponent {
        page: PageId::Home,
        section_id: "default-intro".to_string(),
        component_id: "default-intro-text".to_string(),
        patch: ComponentPatch::props([("content".to_string(), json!("Updated"))].into()),
    };

    c.bench_function("dispatch_update_component", |b| {
        b.iter(|| reduce(black_box(&state), action.clone(), &registry))
    });
}

fn dispatch_reorder_sections(c: &mut Criterion) {
    let registry = ComponentRegistry::builtin();
    let state = large_state(20, 5);

    let mut ids: Vec<String> = state
        .document
        .page(PageId::Home)
        .map(|p| p.sections.iter().map(|s| s.id.clone()).collect())
        .unwrap_or_default();
    ids.reverse();

    let action = Action::ReorderSections {
        page: PageId::Home,
        section_ids: ids,
    };

    c.bench_function("dispatch_reorder_sections", |b| {
        b.iter(|| reduce(black_box(&state), action.clone(), &registry))
    });
}

fn checkpoint_at_capacity(c: &mut Criterion) {
    let registry = ComponentRegistry::builtin();
    let mut state = large_state(5, 5);
    for _ in 0..60 {
        state = reduce(&state, Action::SaveState, &registry);
    }

    c.bench_function("checkpoint_at_capacity", |b| {
        b.iter(|| reduce(black_box(&state), Action::SaveState, &registry))
    });
}

criterion_group!(
    benches,
    dispatch_update_component,
    dispatch_reorder_sections,
    checkpoint_at_capacity
);
criterion_main!(benches);
