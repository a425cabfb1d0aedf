//! Advisory graph consistency checks.
//!
//! Validation reports the first violation found and never blocks an
//! edit; transient inconsistency is allowed, silence about it is not.

use strand_core::{EntityId, Hairstyle};
use thiserror::Error;

/// A structural consistency violation. Advisory text, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("entity {id} lists itself as its own parent or child")]
    SelfLoop { id: EntityId },
    #[error("entities {a} and {b} list each other as children")]
    MutualCycle { a: EntityId, b: EntityId },
}

/// Scans the collection and reports the first violation, in priority
/// order: self-loops first, then mutual 2-cycles. `None` means the graph
/// is consistent.
pub fn validate(entities: &[Hairstyle]) -> Option<Violation> {
    for entity in entities {
        if entity.children_ids().contains(&entity.id) || entity.parent_ids().contains(&entity.id) {
            return Some(Violation::SelfLoop { id: entity.id });
        }
    }
    for entity in entities {
        for child_id in entity.children_ids() {
            let reciprocal = entities
                .iter()
                .find(|h| h.id == *child_id)
                .is_some_and(|child| child.children_ids().contains(&entity.id));
            if reciprocal {
                return Some(Violation::MutualCycle {
                    a: entity.id,
                    b: *child_id,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_core::Relation;

    fn parent(id: EntityId, children: Vec<EntityId>) -> Hairstyle {
        let mut entity = Hairstyle::new(id, format!("p{id}"), "");
        entity.relation = Some(Relation::Parent { children });
        entity
    }

    fn child(id: EntityId, parents: Vec<EntityId>) -> Hairstyle {
        let mut entity = Hairstyle::new(id, format!("c{id}"), "");
        entity.relation = Some(Relation::Child { parents });
        entity
    }

    #[test]
    fn test_consistent_graph() {
        let entities = vec![parent(1, vec![2]), child(2, vec![1])];
        assert_eq!(validate(&entities), None);
    }

    #[test]
    fn test_self_loop_in_children() {
        let entities = vec![parent(1, vec![1])];
        assert_eq!(validate(&entities), Some(Violation::SelfLoop { id: 1 }));
    }

    #[test]
    fn test_self_loop_in_parents() {
        let entities = vec![child(2, vec![2])];
        assert_eq!(validate(&entities), Some(Violation::SelfLoop { id: 2 }));
    }

    #[test]
    fn test_mutual_cycle() {
        let entities = vec![parent(1, vec![2]), parent(2, vec![1])];
        assert_eq!(
            validate(&entities),
            Some(Violation::MutualCycle { a: 1, b: 2 })
        );
    }

    #[test]
    fn test_self_loop_reported_before_cycle() {
        // Entity 1 is both a self-loop and half of a mutual cycle; only
        // the self-loop is reported in this pass.
        let entities = vec![parent(1, vec![1, 2]), parent(2, vec![1])];
        assert_eq!(validate(&entities), Some(Violation::SelfLoop { id: 1 }));
    }

    #[test]
    fn test_dangling_child_is_not_a_violation() {
        let entities = vec![parent(1, vec![99])];
        assert_eq!(validate(&entities), None);
    }
}
