//! The single mutation path for parent/child edges.
//!
//! Every structural change to a link goes through these functions, which
//! update the child's parent list and the parent's children list in one
//! step. Nothing else in the crate writes to either list, which is what
//! keeps the two redundant edge directions in sync.

use strand_core::{EntityId, Hairstyle, Relation};
use tracing::debug;

/// Establishes child -> parent in both directions. Idempotent per side.
///
/// No-op unless the entity at `child_id` has the child role and the one
/// at `parent_id` has the parent role.
pub(crate) fn link(entities: &mut [Hairstyle], child_id: EntityId, parent_id: EntityId) -> bool {
    if child_id == parent_id {
        debug!(id = child_id, "refusing self link");
        return false;
    }
    let (child_ok, parent_ok) = (
        entities
            .iter()
            .any(|h| h.id == child_id && h.is_child()),
        entities
            .iter()
            .any(|h| h.id == parent_id && h.is_parent()),
    );
    if !child_ok || !parent_ok {
        debug!(child_id, parent_id, "link endpoints unresolved, ignoring");
        return false;
    }

    for entity in entities.iter_mut() {
        if entity.id == child_id {
            if let Some(Relation::Child { parents }) = &mut entity.relation {
                if !parents.contains(&parent_id) {
                    parents.push(parent_id);
                }
            }
        } else if entity.id == parent_id {
            if let Some(Relation::Parent { children }) = &mut entity.relation {
                if !children.contains(&child_id) {
                    children.push(child_id);
                }
            }
        }
    }
    true
}

/// Detaches a child from every parent: clears its parent list and removes
/// its id from every children list. Missing id is a no-op.
pub(crate) fn detach_child(entities: &mut [Hairstyle], child_id: EntityId) -> bool {
    if !entities.iter().any(|h| h.id == child_id) {
        debug!(child_id, "detach target unresolved, ignoring");
        return false;
    }
    for entity in entities.iter_mut() {
        match &mut entity.relation {
            Some(Relation::Child { parents }) if entity.id == child_id => parents.clear(),
            Some(Relation::Parent { children }) => children.retain(|id| *id != child_id),
            _ => {}
        }
    }
    true
}

/// Detaches every child of a parent: removes the parent from each child's
/// parent list, then clears the parent's children list.
pub(crate) fn detach_children(entities: &mut [Hairstyle], parent_id: EntityId) -> bool {
    let child_ids: Vec<EntityId> = match entities.iter().find(|h| h.id == parent_id) {
        Some(parent) => parent.children_ids().to_vec(),
        None => {
            debug!(parent_id, "parent unresolved, ignoring");
            return false;
        }
    };
    for entity in entities.iter_mut() {
        if entity.id == parent_id {
            if let Some(Relation::Parent { children }) = &mut entity.relation {
                children.clear();
            }
        } else if child_ids.contains(&entity.id) {
            if let Some(Relation::Child { parents }) = &mut entity.relation {
                parents.retain(|id| *id != parent_id);
            }
        }
    }
    true
}

/// Removes `id` from every other entity's link list, in both directions.
/// Used when an entity is deleted or changes role.
pub(crate) fn retract(entities: &mut [Hairstyle], id: EntityId) {
    for entity in entities.iter_mut() {
        if entity.id == id {
            continue;
        }
        match &mut entity.relation {
            Some(Relation::Parent { children }) => children.retain(|c| *c != id),
            Some(Relation::Child { parents }) => parents.retain(|p| *p != id),
            None => {}
        }
    }
}
