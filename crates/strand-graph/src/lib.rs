//! Strand Graph - catalog store and relationship editing
//!
//! This crate owns the mutable side of Strand: the ordered entity
//! collection with its favorites set, the parent/child relationship
//! editor with undo/redo history and cycle validation, and persistence
//! (a sled key-value store plus the static JSON dataset and export).
//!
//! # Architecture
//!
//! All structural link mutations funnel through one private code path
//! (`links`), which updates both edge directions together. The editor
//! and the catalog never touch a peer's id list directly, so the
//! bidirectional invariant holds after every operation.
//!
//! # Example
//!
//! ```
//! use strand_core::{Hairstyle, Relation, Role};
//! use strand_graph::{Catalog, RelationsEditor};
//!
//! let mut catalog = Catalog::new();
//! let mut parent = Hairstyle::new(1, "Fade", "The fade family");
//! parent.relation = Some(Relation::empty(Role::Parent));
//! let mut child = Hairstyle::new(2, "Mid Fade", "A fade variant");
//! child.relation = Some(Relation::empty(Role::Child));
//! catalog.insert(parent);
//! catalog.insert(child);
//!
//! let mut editor = RelationsEditor::new();
//! editor.add_link(&mut catalog, 2, 1);
//! assert_eq!(catalog.get(1).unwrap().children_ids(), &[2]);
//! ```

mod catalog;
mod dataset;
mod editor;
mod links;
mod store;
mod validate;

pub use catalog::Catalog;
pub use dataset::{export_document, load_dataset, parse_import, Dataset, DatasetError, ImportData};
pub use editor::{ChildrenView, DragItem, DragKind, RelationsEditor, Tree};
pub use store::{CatalogStore, StoreError};
pub use validate::{validate, Violation};
