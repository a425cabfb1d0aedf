//! Strand Core - Entity model for the hairstyle catalog
//!
//! This crate defines the domain types shared by every other Strand crate:
//! the catalog entity, its closed attribute vocabulary, and the validated
//! form payload used to create and edit entries.
//!
//! # Example
//!
//! ```
//! use strand_core::{Hairstyle, Role};
//!
//! let entity = Hairstyle::new(1, "Pompadour", "Volume on top, tight sides");
//! assert_eq!(entity.role(), None); // standalone until the editor links it
//! ```

mod attributes;
mod entity;
mod filters;
mod form;

pub use attributes::{Attributes, Bangs, Finish, Sides, Top, VocabError};
pub use entity::{next_id, EntityId, Hairstyle, Relation, Role};
pub use filters::{
    by_tag, by_tags, favorites_view, paginate, search, sort_by_name, tag_statistics, unique_tags,
    Page, TagCount,
};
pub use form::{
    check_image, parse_id_list, parse_tags, EntityDraft, FormError, FormPayload,
    ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES,
};
