//! The relationship editor.
//!
//! Maintains the parent/child graph under interactive edits: link
//! operations, role changes, undo/redo history, and the presentation
//! queries the relations view is built from. The editor never owns the
//! catalog; every operation takes it explicitly.
//!
//! History is linear: each structural mutation pushes a deep-copy
//! snapshot of the entity collection and clears the redo stack. Undo and
//! redo are silent no-ops on an empty stack. Operations on unresolved
//! ids are silent no-ops as well; bad input from a drag-drop surface is
//! recoverable, not a crash.

use crate::catalog::Catalog;
use crate::links;
use strand_core::{EntityId, Hairstyle, Relation, Role};
use tracing::debug;

/// What kind of item a drag started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Parent,
    Child,
}

/// The item currently being dragged, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragItem {
    pub kind: DragKind,
    pub id: EntityId,
}

/// Which children the relations view lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildrenView {
    /// Only children with no resolvable parent.
    #[default]
    Unpaired,
    /// Every child.
    All,
}

/// One rendered tree: a parent and its resolvable children.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<'a> {
    pub parent: &'a Hairstyle,
    pub children: Vec<&'a Hairstyle>,
}

/// Interactive editor state over a shared [`Catalog`].
#[derive(Debug, Default)]
pub struct RelationsEditor {
    search: String,
    children_view: ChildrenView,
    undo_stack: Vec<Vec<Hairstyle>>,
    redo_stack: Vec<Vec<Hairstyle>>,
    drag: Option<DragItem>,
}

impl RelationsEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An editor resuming previously saved history stacks. View state
    /// starts fresh; only the snapshots carry over.
    pub fn with_history(undo: Vec<Vec<Hairstyle>>, redo: Vec<Vec<Hairstyle>>) -> Self {
        Self {
            undo_stack: undo,
            redo_stack: redo,
            ..Self::default()
        }
    }

    /// The history stacks in persistable form.
    pub fn history(&self) -> (&[Vec<Hairstyle>], &[Vec<Hairstyle>]) {
        (&self.undo_stack, &self.redo_stack)
    }

    // ── link operations ─────────────────────────────────────────────

    /// Links a child under a parent, both directions, idempotent.
    /// Returns true when the catalog changed.
    pub fn add_link(&mut self, catalog: &mut Catalog, child: EntityId, parent: EntityId) -> bool {
        self.mutate(catalog, |entities| links::link(entities, child, parent))
    }

    /// Detaches a child from all of its parents.
    pub fn remove_link(&mut self, catalog: &mut Catalog, child: EntityId) -> bool {
        self.mutate(catalog, |entities| links::detach_child(entities, child))
    }

    /// Detaches every child from a parent.
    pub fn remove_all_children(&mut self, catalog: &mut Catalog, parent: EntityId) -> bool {
        self.mutate(catalog, |entities| links::detach_children(entities, parent))
    }

    /// Changes an entity's structural role.
    ///
    /// The discarded direction's reverse links are retracted from the
    /// affected peers, so a parent demoted to child does not linger in
    /// its former children's parent lists. Same-role calls are no-ops.
    pub fn change_role(&mut self, catalog: &mut Catalog, id: EntityId, role: Role) -> bool {
        self.mutate(catalog, |entities| {
            let Some(entity) = entities.iter().find(|h| h.id == id) else {
                debug!(id, "role change target unresolved, ignoring");
                return false;
            };
            if entity.role() == Some(role) {
                return false;
            }
            links::retract(entities, id);
            if let Some(entity) = entities.iter_mut().find(|h| h.id == id) {
                entity.relation = Some(Relation::empty(role));
            }
            true
        })
    }

    /// Runs a structural mutation with snapshot discipline: push the
    /// current collection to the undo stack, apply, and on a no-op roll
    /// the snapshot back off so history only records real changes.
    fn mutate<F>(&mut self, catalog: &mut Catalog, op: F) -> bool
    where
        F: FnOnce(&mut Vec<Hairstyle>) -> bool,
    {
        self.undo_stack.push(catalog.entities().to_vec());
        let changed = op(catalog.entities_mut());
        if changed {
            self.redo_stack.clear();
        } else {
            self.undo_stack.pop();
        }
        changed
    }

    // ── history ─────────────────────────────────────────────────────

    /// Restores the previous snapshot. No-op on empty history.
    pub fn undo(&mut self, catalog: &mut Catalog) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(catalog.entities().to_vec());
        catalog.replace_entities(snapshot);
        true
    }

    /// Mirror of [`undo`](Self::undo). No-op on empty redo stack.
    pub fn redo(&mut self, catalog: &mut Catalog) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(catalog.entities().to_vec());
        catalog.replace_entities(snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    // ── transient view state ────────────────────────────────────────

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_children_view(&mut self, view: ChildrenView) {
        self.children_view = view;
    }

    pub fn children_view(&self) -> ChildrenView {
        self.children_view
    }

    pub fn begin_drag(&mut self, kind: DragKind, id: EntityId) {
        self.drag = Some(DragItem { kind, id });
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn drag(&self) -> Option<DragItem> {
        self.drag
    }

    // ── presentation queries ────────────────────────────────────────

    /// Children with no resolvable parent: empty parent list, or every
    /// listed parent id dangling.
    pub fn unpaired_children<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Hairstyle> {
        catalog
            .entities()
            .iter()
            .filter(|h| h.is_child() && !has_resolvable(h.parent_ids(), catalog))
            .collect()
    }

    /// Children listed by the relations view, honoring the view mode and
    /// the search filter.
    pub fn visible_children<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Hairstyle> {
        let base: Vec<&Hairstyle> = match self.children_view {
            ChildrenView::All => catalog.entities().iter().filter(|h| h.is_child()).collect(),
            ChildrenView::Unpaired => self.unpaired_children(catalog),
        };
        base.into_iter()
            .filter(|h| self.matches_search(h))
            .collect()
    }

    /// Trees shown in the relations view: parents with at least one
    /// resolvable child, and parents with no children at all. A parent
    /// whose every child is dangling counts as having none and is shown
    /// with an empty tree.
    pub fn trees<'a>(&self, catalog: &'a Catalog) -> Vec<Tree<'a>> {
        catalog
            .entities()
            .iter()
            .filter(|h| h.is_parent() && self.matches_search(h))
            .map(|parent| {
                // Dangling ids simply do not resolve, so a parent whose
                // children are all dangling renders as an empty tree.
                let children: Vec<&Hairstyle> = parent
                    .children_ids()
                    .iter()
                    .filter_map(|id| catalog.get(*id))
                    .collect();
                Tree { parent, children }
            })
            .collect()
    }

    fn matches_search(&self, entity: &Hairstyle) -> bool {
        let query = self.search.trim().to_lowercase();
        query.is_empty() || entity.name.to_lowercase().contains(&query)
    }
}

fn has_resolvable(ids: &[EntityId], catalog: &Catalog) -> bool {
    ids.iter().any(|id| catalog.contains(*id))
}
