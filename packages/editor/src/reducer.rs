//! # Reducer
//!
//! `(state, action) → state'`. This is the only place the document and the
//! session selection change.
//!
//! ## Rules
//!
//! 1. **No in-place mutation**: document changes clone the live document,
//!    edit the clone, and publish it as a new `Arc`. Anyone holding the old
//!    `Arc` (the history, a panel, the auto-save task) sees no change.
//! 2. **Absorb, don't fail**: an action that names a section or component
//!    that no longer exists, or that would break a structural rule, returns
//!    the state unchanged. Two UI events racing against a removal must not
//!    crash the builder.
//! 3. **Shallow patches**: field updates replace whole fields, see
//!    `sitecraft_model::patch`.

use crate::actions::Action;
use crate::session::BuilderState;
use sitecraft_model::{ComponentNode, Document, MediaKind, MediaAsset, PageId, Section};
use sitecraft_registry::{ComponentRegistry, PlacementError};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Why a document-mutating action was turned into a no-op
#[derive(Debug, Clone, PartialEq)]
enum Absorbed {
    MissingPage(PageId),
    StaleSection(String),
    StaleComponent(String),
    StaleMedia(String),
    DuplicateId(String),
    NonFiniteGeometry(String),
    Placement(PlacementError),
    NotAPermutation,
}

impl Absorbed {
    /// Stale ids are expected during normal use; everything else is a
    /// caller mistake worth a warning
    fn is_stale(&self) -> bool {
        matches!(
            self,
            Absorbed::StaleSection(_) | Absorbed::StaleComponent(_) | Absorbed::StaleMedia(_)
        )
    }
}

impl fmt::Display for Absorbed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Absorbed::MissingPage(page) => write!(f, "page {} missing from document", page),
            Absorbed::StaleSection(id) => write!(f, "section {} not found", id),
            Absorbed::StaleComponent(id) => write!(f, "component {} not found", id),
            Absorbed::StaleMedia(id) => write!(f, "media asset {} not found", id),
            Absorbed::DuplicateId(id) => write!(f, "id {} already in use", id),
            Absorbed::NonFiniteGeometry(id) => {
                write!(f, "component {} has a non-finite position or size", id)
            }
            Absorbed::Placement(err) => write!(f, "{}", err),
            Absorbed::NotAPermutation => {
                write!(f, "section order must list every section exactly once")
            }
        }
    }
}

impl From<PlacementError> for Absorbed {
    fn from(err: PlacementError) -> Self {
        Absorbed::Placement(err)
    }
}

type Outcome = Result<(), Absorbed>;

/// Compute the next state
pub fn reduce(state: &BuilderState, action: Action, registry: &ComponentRegistry) -> BuilderState {
    let name = action.name();

    match action {
        // Navigation
        Action::SetPage { page } => {
            let mut next = state.clone();
            next.current_page = page;
            next.selected_component = None;
            next.selected_section = None;
            next
        }

        Action::SelectComponent { component_id } => {
            let mut next = state.clone();
            next.selected_component = component_id;
            next
        }

        Action::SelectSection { section_id } => {
            let mut next = state.clone();
            next.selected_section = section_id;
            next.selected_component = None;
            next
        }

        Action::SetPreviewMode { mode } => {
            let mut next = state.clone();
            next.preview_mode = mode;
            next
        }

        Action::SetEditMode { editing } => {
            let mut next = state.clone();
            next.editing = editing;
            next
        }

        // Drag lifecycle
        Action::StartDrag { component } => {
            let mut next = state.clone();
            next.drag.active = true;
            next.drag.payload = Some(component);
            next
        }

        Action::EndDrag => {
            let mut next = state.clone();
            next.drag.active = false;
            next.drag.payload = None;
            next
        }

        // Document mutations
        Action::UpdateComponent {
            page,
            section_id,
            component_id,
            patch,
        } => mutate(state, name, |doc| {
            let section = find_section(doc, page, &section_id)?;
            let node = section
                .find_component_mut(&component_id)
                .ok_or_else(|| Absorbed::StaleComponent(component_id.clone()))?;
            patch.apply(node);
            ensure_finite_geometry([&*node])?;
            if patch.children.is_some() {
                ensure_unique_components(doc)?;
            }
            Ok(())
        }),

        Action::AddComponent {
            page,
            section_id,
            parent_id,
            component,
            index,
        } => {
            let added_id = component.id.clone();
            let next = mutate(state, name, |doc| {
                add_component(doc, registry, page, &section_id, parent_id.as_deref(), component, index)
            });
            if next.revision != state.revision {
                tracing::debug!("Added component {} to section {}", added_id, section_id);
            }
            next
        }

        Action::RemoveComponent {
            page,
            section_id,
            component_id,
        } => mutate(state, name, |doc| {
            let section = find_section(doc, page, &section_id)?;
            section
                .remove_component(&component_id)
                .map(|_| ())
                .ok_or_else(|| Absorbed::StaleComponent(component_id.clone()))
        }),

        Action::UpdateSection {
            page,
            section_id,
            patch,
        } => mutate(state, name, |doc| {
            let section = find_section(doc, page, &section_id)?;
            patch.apply(section);
            if patch.components.is_some() {
                ensure_finite_geometry(&section.components)?;
                ensure_unique_components(doc)?;
            }
            Ok(())
        }),

        Action::AddSection {
            page,
            section,
            index,
        } => mutate(state, name, |doc| add_section(doc, page, section, index)),

        Action::RemoveSection { page, section_id } => mutate(state, name, |doc| {
            let page = doc.page_mut(page).ok_or(Absorbed::MissingPage(page))?;
            let pos = page
                .sections
                .iter()
                .position(|s| s.id == section_id)
                .ok_or_else(|| Absorbed::StaleSection(section_id.clone()))?;
            page.sections.remove(pos);
            Ok(())
        }),

        Action::ReorderSections { page, section_ids } => {
            mutate(state, name, |doc| reorder_sections(doc, page, section_ids))
        }

        Action::UpdateTheme { patch } => mutate(state, name, |doc| {
            patch.apply(&mut doc.theme);
            Ok(())
        }),

        Action::UpdateSettings { patch } => mutate(state, name, |doc| {
            patch.apply(&mut doc.settings);
            Ok(())
        }),

        Action::AddMedia { kind, asset } => mutate(state, name, |doc| add_media(doc, kind, asset)),

        Action::RemoveMedia { asset_id } => mutate(state, name, |doc| {
            doc.media
                .remove(&asset_id)
                .map(|_| ())
                .ok_or_else(|| Absorbed::StaleMedia(asset_id.clone()))
        }),

        // History
        Action::SaveState => {
            let mut next = state.clone();
            next.history.commit(Arc::clone(&next.document));
            next.dirty = false;
            next
        }

        Action::Undo => {
            let mut next = state.clone();
            match next.history.undo() {
                Some(document) => restore(next, document),
                None => state.clone(),
            }
        }

        Action::Redo => {
            let mut next = state.clone();
            match next.history.redo() {
                Some(document) => restore(next, document),
                None => state.clone(),
            }
        }

        // Lifecycle
        Action::LoadData { document } => {
            let mut next = state.clone();
            next.document = Arc::new(*document);
            next.history.reset(Arc::clone(&next.document));
            next.selected_component = None;
            next.selected_section = None;
            next.dirty = false;
            next.revision += 1;
            next
        }

        Action::MarkSaved { revision } => {
            if revision != state.revision {
                return state.clone();
            }
            let mut next = state.clone();
            next.dirty = false;
            next
        }
    }
}

/// Clone the document, run `edit` on the clone, publish it on success
///
/// Selections left pointing at ids the edit removed are cleared.
fn mutate(
    state: &BuilderState,
    action: &str,
    edit: impl FnOnce(&mut Document) -> Outcome,
) -> BuilderState {
    let mut document = (*state.document).clone();

    match edit(&mut document) {
        Ok(()) => {
            let mut next = state.clone();
            next.document = Arc::new(document);
            next.dirty = true;
            next.revision += 1;
            next.prune_selection();
            next
        }
        Err(reason) => {
            if reason.is_stale() {
                tracing::debug!("{} ignored: {}", action, reason);
            } else {
                tracing::warn!("{} rejected: {}", action, reason);
            }
            state.clone()
        }
    }
}

/// Make a history checkpoint the live document
fn restore(mut next: BuilderState, document: Arc<Document>) -> BuilderState {
    next.document = document;
    next.dirty = true;
    next.revision += 1;
    next.prune_selection();
    next
}

fn find_section<'a>(doc: &'a mut Document, page: PageId, section_id: &str) -> Result<&'a mut Section, Absorbed> {
    let page_ref = doc.page_mut(page).ok_or(Absorbed::MissingPage(page))?;
    page_ref
        .section_mut(section_id)
        .ok_or_else(|| Absorbed::StaleSection(section_id.to_string()))
}

fn ensure_unique_components(doc: &Document) -> Outcome {
    let mut seen = HashSet::new();
    for id in doc.component_ids() {
        if !seen.insert(id) {
            return Err(Absorbed::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

fn ensure_finite_geometry<'a>(nodes: impl IntoIterator<Item = &'a ComponentNode>) -> Outcome {
    for node in nodes {
        if let Some(bad) = node.non_finite_geometry() {
            return Err(Absorbed::NonFiniteGeometry(bad.id.clone()));
        }
    }
    Ok(())
}

/// Reject nodes whose ids (or descendants' ids) collide with the document
/// or with each other
fn ensure_fresh_ids<'a>(doc: &Document, nodes: impl IntoIterator<Item = &'a ComponentNode>) -> Outcome {
    let existing: HashSet<&str> = doc.component_ids().into_iter().collect();
    let mut incoming = HashSet::new();
    for node in nodes {
        for id in node.subtree_ids() {
            if existing.contains(id) || !incoming.insert(id) {
                return Err(Absorbed::DuplicateId(id.to_string()));
            }
        }
    }
    Ok(())
}

fn add_component(
    doc: &mut Document,
    registry: &ComponentRegistry,
    page: PageId,
    section_id: &str,
    parent_id: Option<&str>,
    component: ComponentNode,
    index: Option<usize>,
) -> Outcome {
    ensure_fresh_ids(doc, [&component])?;
    ensure_finite_geometry([&component])?;

    let section = find_section(doc, page, section_id)?;
    let siblings = match parent_id {
        None => {
            registry.check_placement(None, &component.component_type)?;
            &mut section.components
        }
        Some(parent_id) => {
            let parent = section
                .find_component_mut(parent_id)
                .ok_or_else(|| Absorbed::StaleComponent(parent_id.to_string()))?;
            registry.check_placement(Some(&*parent), &component.component_type)?;
            &mut parent.children
        }
    };

    insert_at(siblings, component, index);
    Ok(())
}

fn add_section(doc: &mut Document, page: PageId, section: Section, index: Option<usize>) -> Outcome {
    if doc.contains_section(&section.id) {
        return Err(Absorbed::DuplicateId(section.id));
    }
    ensure_fresh_ids(doc, &section.components)?;
    ensure_finite_geometry(&section.components)?;

    let page_ref = doc.page_mut(page).ok_or(Absorbed::MissingPage(page))?;
    page_ref.sort_sections();
    insert_at(&mut page_ref.sections, section, index);
    page_ref.renumber_sections();
    Ok(())
}

fn reorder_sections(doc: &mut Document, page: PageId, section_ids: Vec<String>) -> Outcome {
    let page_ref = doc.page_mut(page).ok_or(Absorbed::MissingPage(page))?;
    if section_ids.len() != page_ref.sections.len() {
        return Err(Absorbed::NotAPermutation);
    }

    let mut by_id: HashMap<String, Section> = page_ref
        .sections
        .drain(..)
        .map(|s| (s.id.clone(), s))
        .collect();

    let mut reordered = Vec::with_capacity(section_ids.len());
    for id in &section_ids {
        match by_id.remove(id) {
            Some(section) => reordered.push(section),
            None => return Err(Absorbed::NotAPermutation),
        }
    }

    // Everything was consumed, so `by_id` is empty and no section is lost
    page_ref.sections = reordered;
    page_ref.renumber_sections();
    Ok(())
}

fn add_media(doc: &mut Document, kind: MediaKind, asset: MediaAsset) -> Outcome {
    if doc.media.contains(&asset.id) {
        return Err(Absorbed::DuplicateId(asset.id));
    }
    doc.media.assets_mut(kind).push(asset);
    Ok(())
}

/// Insert at `index` clamped to the list length, or append
fn insert_at<T>(list: &mut Vec<T>, item: T, index: Option<usize>) {
    match index {
        Some(i) => list.insert(i.min(list.len()), item),
        None => list.push(item),
    }
}
