//! Form payload validation.
//!
//! The admin surface hands the core a raw payload of user-typed strings;
//! this module turns it into a validated [`EntityDraft`] or rejects it
//! without touching any state.

use crate::attributes::Attributes;
use crate::entity::{EntityId, Role};
use thiserror::Error;

/// Largest accepted image, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Accepted image media types.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Input validation failure. Surfaced to the user; nothing was mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("name is required")]
    MissingName,
    #[error("description is required")]
    MissingDescription,
    #[error("image is too large ({size} bytes, max {MAX_IMAGE_BYTES})")]
    ImageTooLarge { size: u64 },
    #[error("unsupported image type: {media_type}")]
    ImageUnsupportedType { media_type: String },
}

/// A raw, unvalidated form submission.
#[derive(Debug, Clone, Default)]
pub struct FormPayload {
    pub name: String,
    pub description: String,
    pub length: String,
    pub style: String,
    /// Comma-separated tag input, e.g. `"Krótkie, Klasyczny"`.
    pub tags: String,
    pub emoji: Option<String>,
    /// Data URI or relative path; constraints checked separately when the
    /// caller reads a file (see [`check_image`]).
    pub image: Option<String>,
    pub attributes: Option<Attributes>,
    pub role: Option<Role>,
    /// Comma-separated integer input; non-numeric tokens are dropped.
    pub parent_ids: String,
    pub children_ids: String,
}

/// A validated entity payload ready to create or update a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDraft {
    pub name: String,
    pub description: String,
    pub length: String,
    pub style: String,
    pub tags: Vec<String>,
    pub emoji: Option<String>,
    pub image: Option<String>,
    pub attributes: Option<Attributes>,
    pub role: Option<Role>,
    /// `None` means "field not applicable", distinct from an empty list.
    pub parent_ids: Option<Vec<EntityId>>,
    pub children_ids: Option<Vec<EntityId>>,
}

impl FormPayload {
    /// Validates the payload. Required fields must be non-empty after
    /// trimming; everything else is normalized best-effort.
    pub fn validate(self) -> Result<EntityDraft, FormError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(FormError::MissingDescription);
        }

        let parent_ids = non_empty(parse_id_list(&self.parent_ids));
        let children_ids = non_empty(parse_id_list(&self.children_ids));

        Ok(EntityDraft {
            name,
            description,
            length: self.length.trim().to_string(),
            style: self.style.trim().to_string(),
            tags: parse_tags(&self.tags),
            emoji: self.emoji.filter(|e| !e.trim().is_empty()),
            image: self.image,
            attributes: self.attributes,
            role: self.role,
            parent_ids,
            children_ids,
        })
    }
}

/// Parses comma-separated tag input: trimmed, empty entries dropped,
/// duplicates removed keeping first occurrence.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for token in input.split(',') {
        let tag = token.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Parses comma-separated ids, dropping non-numeric tokens.
pub fn parse_id_list(input: &str) -> Vec<EntityId> {
    input
        .split(',')
        .filter_map(|token| {
            let token = token.trim();
            if token.is_empty() {
                return None;
            }
            match token.parse::<EntityId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::debug!(token, "dropping non-numeric id token");
                    None
                }
            }
        })
        .collect()
}

/// Checks upload constraints for an attached image file.
pub fn check_image(media_type: &str, size: u64) -> Result<(), FormError> {
    if size > MAX_IMAGE_BYTES {
        return Err(FormError::ImageTooLarge { size });
    }
    if !ALLOWED_IMAGE_TYPES.contains(&media_type) {
        return Err(FormError::ImageUnsupportedType {
            media_type: media_type.to_string(),
        });
    }
    Ok(())
}

fn non_empty(ids: Vec<EntityId>) -> Option<Vec<EntityId>> {
    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let payload = FormPayload {
            name: "   ".to_string(),
            description: "desc".to_string(),
            ..Default::default()
        };
        assert_eq!(payload.validate().unwrap_err(), FormError::MissingName);

        let payload = FormPayload {
            name: "Pompadour".to_string(),
            description: "".to_string(),
            ..Default::default()
        };
        assert_eq!(
            payload.validate().unwrap_err(),
            FormError::MissingDescription
        );
    }

    #[test]
    fn test_parse_tags_dedupes_and_trims() {
        let tags = parse_tags(" short , classic,, short ,modern ");
        assert_eq!(tags, vec!["short", "classic", "modern"]);
    }

    #[test]
    fn test_parse_id_list_drops_bad_tokens() {
        assert_eq!(parse_id_list("1, x, 3,  , 12"), vec![1, 3, 12]);
        assert!(parse_id_list("").is_empty());
    }

    #[test]
    fn test_empty_id_list_omits_field() {
        let payload = FormPayload {
            name: "Quiff".to_string(),
            description: "Swept up front".to_string(),
            parent_ids: "a, b".to_string(),
            children_ids: "4,5".to_string(),
            ..Default::default()
        };
        let draft = payload.validate().unwrap();
        // All tokens invalid -> field not applicable, not an empty list.
        assert_eq!(draft.parent_ids, None);
        assert_eq!(draft.children_ids, Some(vec![4, 5]));
    }

    #[test]
    fn test_check_image() {
        assert!(check_image("image/png", 1024).is_ok());
        assert_eq!(
            check_image("image/png", MAX_IMAGE_BYTES + 1).unwrap_err(),
            FormError::ImageTooLarge {
                size: MAX_IMAGE_BYTES + 1
            }
        );
        assert!(matches!(
            check_image("image/bmp", 10).unwrap_err(),
            FormError::ImageUnsupportedType { .. }
        ));
    }
}
