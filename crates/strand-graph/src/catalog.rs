//! The entity collection and favorites set.
//!
//! Single source of truth for every other component. Keeps insertion
//! order, guarantees id uniqueness, and routes relationship cleanup
//! through the shared link primitives.

use crate::links;
use serde::{Deserialize, Serialize};
use strand_core::{next_id, Attributes, Bangs, EntityDraft, EntityId, Hairstyle, Relation, Role};
use tracing::debug;

/// The in-memory catalog: an ordered entity collection plus favorites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    entities: Vec<Hairstyle>,
    favorites: Vec<EntityId>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from loaded state. Entities with duplicate ids are
    /// dropped (first occurrence wins).
    pub fn from_parts(entities: Vec<Hairstyle>, favorites: Vec<EntityId>) -> Self {
        let mut seen: Vec<EntityId> = Vec::new();
        let entities = entities
            .into_iter()
            .filter(|h| {
                if seen.contains(&h.id) {
                    debug!(id = h.id, "dropping duplicate id on load");
                    false
                } else {
                    seen.push(h.id);
                    true
                }
            })
            .collect();
        Self {
            entities,
            favorites,
        }
    }

    pub fn entities(&self) -> &[Hairstyle] {
        &self.entities
    }

    /// Replaces the whole collection. Used by undo/redo snapshot restore
    /// and dataset import.
    pub fn replace_entities(&mut self, entities: Vec<Hairstyle>) {
        self.entities = entities;
    }

    pub fn favorites(&self) -> &[EntityId] {
        &self.favorites
    }

    pub fn replace_favorites(&mut self, favorites: Vec<EntityId>) {
        self.favorites = favorites;
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Hairstyle> {
        self.entities.iter().find(|h| h.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Hairstyle> {
        self.entities.iter_mut().find(|h| h.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Mutable view of the entity collection for the editor's link
    /// operations. Not public: all outside mutation goes through methods.
    pub(crate) fn entities_mut(&mut self) -> &mut Vec<Hairstyle> {
        &mut self.entities
    }

    /// Inserts a fully formed entity, e.g. from the initial dataset.
    /// Rejected (returns false) when the id is already taken.
    pub fn insert(&mut self, entity: Hairstyle) -> bool {
        if self.contains(entity.id) {
            debug!(id = entity.id, "insert rejected, duplicate id");
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Creates an entity from a validated draft and returns its new id.
    ///
    /// Ids are max existing + 1 (1 for an empty catalog). Drafts without
    /// attributes get the catalog defaults, with swept bangs.
    pub fn create(&mut self, draft: EntityDraft) -> EntityId {
        let id = next_id(&self.entities);
        let mut entity = Hairstyle::new(id, draft.name, draft.description);
        entity.length = draft.length;
        entity.style = draft.style;
        entity.tags = draft.tags;
        entity.emoji = draft.emoji;
        entity.image = draft.image;
        entity.attributes = Some(draft.attributes.unwrap_or(Attributes {
            bangs: Bangs::Swept,
            ..Attributes::default()
        }));
        entity.relation = relation_from_draft(draft.role, draft.parent_ids, draft.children_ids);
        self.entities.push(entity);
        id
    }

    /// Applies a draft to an existing entity in place. Returns false when
    /// the id does not resolve.
    pub fn update(&mut self, id: EntityId, draft: EntityDraft) -> bool {
        let Some(entity) = self.entities.iter_mut().find(|h| h.id == id) else {
            return false;
        };
        entity.name = draft.name;
        entity.description = draft.description;
        entity.length = draft.length;
        entity.style = draft.style;
        entity.tags = draft.tags;
        if draft.emoji.is_some() {
            entity.emoji = draft.emoji;
        }
        if draft.image.is_some() {
            entity.image = draft.image;
        }
        if draft.attributes.is_some() {
            entity.attributes = draft.attributes;
        }
        if draft.role.is_some() || draft.parent_ids.is_some() || draft.children_ids.is_some() {
            let previous = entity.role();
            let role = draft.role.or(previous);
            entity.relation = relation_from_draft(role, draft.parent_ids, draft.children_ids);
            // Switching sides invalidates every link peers still hold to
            // this id, not just the ones the draft replaced.
            if previous.is_some() && role != previous {
                links::retract(&mut self.entities, id);
            }
        }
        true
    }

    /// Deletes an entity: retracts its id from every peer's link list and
    /// from the favorites set. Returns false when the id does not resolve.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if !self.contains(id) {
            return false;
        }
        links::retract(&mut self.entities, id);
        self.entities.retain(|h| h.id != id);
        self.favorites.retain(|f| *f != id);
        true
    }

    /// Toggles favorite status. Returns true when the id is now a favorite.
    /// Unknown ids are tolerated: the stale entry is filtered at read time.
    pub fn toggle_favorite(&mut self, id: EntityId) -> bool {
        if let Some(pos) = self.favorites.iter().position(|f| *f == id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(id);
            true
        }
    }

    pub fn is_favorite(&self, id: EntityId) -> bool {
        self.favorites.contains(&id)
    }
}

fn relation_from_draft(
    role: Option<Role>,
    parent_ids: Option<Vec<EntityId>>,
    children_ids: Option<Vec<EntityId>>,
) -> Option<Relation> {
    match role {
        Some(Role::Parent) => Some(Relation::Parent {
            children: children_ids.unwrap_or_default(),
        }),
        Some(Role::Child) => Some(Relation::Child {
            parents: parent_ids.unwrap_or_default(),
        }),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_core::FormPayload;

    fn draft(name: &str) -> EntityDraft {
        FormPayload {
            name: name.to_string(),
            description: "test entry".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_create_assigns_next_id() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.create(draft("first")), 1);
        assert_eq!(catalog.create(draft("second")), 2);

        catalog.insert(Hairstyle::new(10, "tenth", ""));
        assert_eq!(catalog.create(draft("eleventh")), 11);
    }

    #[test]
    fn test_create_defaults_attributes_with_swept_bangs() {
        let mut catalog = Catalog::new();
        let id = catalog.create(draft("plain"));
        let attrs = catalog.get(id).unwrap().attributes.unwrap();
        assert_eq!(attrs.bangs, Bangs::Swept);
        assert_eq!(attrs.sides, Attributes::default().sides);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(Hairstyle::new(1, "a", "")));
        assert!(!catalog.insert(Hairstyle::new(1, "b", "")));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_from_parts_drops_duplicate_ids() {
        let catalog = Catalog::from_parts(
            vec![
                Hairstyle::new(1, "a", ""),
                Hairstyle::new(2, "b", ""),
                Hairstyle::new(1, "dupe", ""),
            ],
            vec![],
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().name, "a");
    }

    #[test]
    fn test_remove_retracts_links_and_favorites() {
        let mut catalog = Catalog::new();
        let mut parent = Hairstyle::new(1, "parent", "");
        parent.relation = Some(Relation::Parent { children: vec![2] });
        let mut child = Hairstyle::new(2, "child", "");
        child.relation = Some(Relation::Child { parents: vec![1] });
        catalog.insert(parent);
        catalog.insert(child);
        catalog.toggle_favorite(2);

        assert!(catalog.remove(2));
        assert_eq!(catalog.get(1).unwrap().children_ids(), &[] as &[EntityId]);
        assert!(catalog.favorites().is_empty());
        assert!(!catalog.remove(2));
    }

    #[test]
    fn test_update_role_change_retracts_stale_links() {
        let mut catalog = Catalog::new();
        let mut parent = Hairstyle::new(1, "parent", "");
        parent.relation = Some(Relation::Parent { children: vec![2] });
        let mut child = Hairstyle::new(2, "child", "");
        child.relation = Some(Relation::Child { parents: vec![1] });
        catalog.insert(parent);
        catalog.insert(child);

        let mut demote = draft("parent");
        demote.role = Some(Role::Child);
        assert!(catalog.update(1, demote));

        assert_eq!(catalog.get(1).unwrap().role(), Some(Role::Child));
        assert_eq!(catalog.get(2).unwrap().parent_ids(), &[] as &[EntityId]);
    }

    #[test]
    fn test_toggle_favorite() {
        let mut catalog = Catalog::new();
        catalog.insert(Hairstyle::new(1, "a", ""));
        assert!(catalog.toggle_favorite(1));
        assert!(catalog.is_favorite(1));
        assert!(!catalog.toggle_favorite(1));
        assert!(!catalog.is_favorite(1));
    }

    #[test]
    fn test_update_merges_in_place() {
        let mut catalog = Catalog::new();
        let id = catalog.create(draft("before"));
        let mut next = draft("after");
        next.role = Some(Role::Child);
        next.parent_ids = Some(vec![7]);
        assert!(catalog.update(id, next));

        let entity = catalog.get(id).unwrap();
        assert_eq!(entity.name, "after");
        assert_eq!(entity.parent_ids(), &[7]);
        assert!(!catalog.update(99, draft("nope")));
    }
}
