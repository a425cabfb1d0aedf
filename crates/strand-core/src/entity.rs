//! The catalog entity and its parent/child relation.
//!
//! The relation is a tagged union: an entity is a parent with children,
//! a child with parents, or standalone. Both link lists populated at once
//! is unrepresentable. On disk we keep the historical document shape
//! (`"type"` plus `"parentIds"`/`"childrenIds"`), converted through a raw
//! mirror struct so stale documents with stray fields still load.

use crate::attributes::Attributes;
use serde::{Deserialize, Serialize};

/// Stable identity key for a catalog entity. Positive, unique.
pub type EntityId = u32;

/// Structural role of an entity in the variant graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Child,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Parent => write!(f, "parent"),
            Role::Child => write!(f, "child"),
        }
    }
}

/// An entity's position in the parent/child graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    /// Groups variant children.
    Parent { children: Vec<EntityId> },
    /// Declares one or more parents.
    Child { parents: Vec<EntityId> },
}

impl Relation {
    /// An empty relation for the given role.
    pub fn empty(role: Role) -> Self {
        match role {
            Role::Parent => Relation::Parent { children: Vec::new() },
            Role::Child => Relation::Child { parents: Vec::new() },
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Relation::Parent { .. } => Role::Parent,
            Relation::Child { .. } => Role::Child,
        }
    }
}

/// A catalog entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawHairstyle", into = "RawHairstyle")]
pub struct Hairstyle {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub length: String,
    pub style: String,
    /// Filter tags; insertion order kept, order is not meaningful.
    pub tags: Vec<String>,
    /// Data URI or relative path. Falls back to `emoji` for display.
    pub image: Option<String>,
    pub emoji: Option<String>,
    /// Attribute vector for the matching engine. Entities without one
    /// score zero but stay eligible.
    pub attributes: Option<Attributes>,
    /// Parent/child position, or `None` for standalone entries.
    pub relation: Option<Relation>,
}

impl Hairstyle {
    /// Creates a standalone entity with the given identity and display text.
    pub fn new(id: EntityId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            length: String::new(),
            style: String::new(),
            tags: Vec::new(),
            image: None,
            emoji: None,
            attributes: None,
            relation: None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.relation.as_ref().map(Relation::role)
    }

    /// Declared parent ids. Empty unless this entity is a child.
    pub fn parent_ids(&self) -> &[EntityId] {
        match &self.relation {
            Some(Relation::Child { parents }) => parents,
            _ => &[],
        }
    }

    /// Declared children ids. Empty unless this entity is a parent.
    pub fn children_ids(&self) -> &[EntityId] {
        match &self.relation {
            Some(Relation::Parent { children }) => children,
            _ => &[],
        }
    }

    pub fn is_parent(&self) -> bool {
        matches!(self.relation, Some(Relation::Parent { .. }))
    }

    pub fn is_child(&self) -> bool {
        matches!(self.relation, Some(Relation::Child { .. }))
    }
}

/// Assigns the next unused id: max existing + 1, or 1 for an empty catalog.
pub fn next_id(entities: &[Hairstyle]) -> EntityId {
    entities.iter().map(|h| h.id).max().map_or(1, |max| max + 1)
}

/// On-disk shape of an entity. The `type` field decides which id list is
/// live; the other is dropped on load, which is what collapses historical
/// documents with both lists into a representable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHairstyle {
    id: EntityId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    length: String,
    #[serde(default)]
    style: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attributes: Option<Attributes>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_ids: Option<Vec<EntityId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children_ids: Option<Vec<EntityId>>,
}

impl From<RawHairstyle> for Hairstyle {
    fn from(raw: RawHairstyle) -> Self {
        let relation = match raw.role {
            Some(Role::Parent) => Some(Relation::Parent {
                children: raw.children_ids.unwrap_or_default(),
            }),
            Some(Role::Child) => Some(Relation::Child {
                parents: raw.parent_ids.unwrap_or_default(),
            }),
            None => None,
        };
        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            length: raw.length,
            style: raw.style,
            tags: raw.tags,
            image: raw.image,
            emoji: raw.emoji,
            attributes: raw.attributes,
            relation,
        }
    }
}

impl From<Hairstyle> for RawHairstyle {
    fn from(entity: Hairstyle) -> Self {
        let (role, parent_ids, children_ids) = match entity.relation {
            Some(Relation::Parent { children }) => (Some(Role::Parent), None, Some(children)),
            Some(Relation::Child { parents }) => (Some(Role::Child), Some(parents), None),
            None => (None, None, None),
        };
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            length: entity.length,
            style: entity.style,
            tags: entity.tags,
            image: entity.image,
            emoji: entity.emoji,
            attributes: entity.attributes,
            role,
            parent_ids,
            children_ids,
        }
    }
}
