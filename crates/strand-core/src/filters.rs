//! Catalog filter and browse helpers.
//!
//! Pure read-side functions over an entity slice; the store never changes
//! under them.

use crate::entity::{EntityId, Hairstyle};

/// Entities carrying the given tag. `"all"` disables the filter.
pub fn by_tag<'a>(entities: &'a [Hairstyle], tag: &str) -> Vec<&'a Hairstyle> {
    if tag == "all" {
        return entities.iter().collect();
    }
    entities
        .iter()
        .filter(|h| h.tags.iter().any(|t| t == tag))
        .collect()
}

/// Entities carrying every one of the given tags (`"all"` entries skipped).
pub fn by_tags<'a>(entities: &'a [Hairstyle], tags: &[&str]) -> Vec<&'a Hairstyle> {
    entities
        .iter()
        .filter(|h| {
            tags.iter()
                .filter(|t| **t != "all")
                .all(|t| h.tags.iter().any(|tag| tag == t))
        })
        .collect()
}

/// Case-insensitive substring search over names and descriptions.
/// A blank query matches everything.
pub fn search<'a>(entities: &'a [Hairstyle], query: &str) -> Vec<&'a Hairstyle> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entities.iter().collect();
    }
    entities
        .iter()
        .filter(|h| {
            h.name.to_lowercase().contains(&query) || h.description.to_lowercase().contains(&query)
        })
        .collect()
}

/// Entities sorted by name, ascending.
pub fn sort_by_name(entities: &[Hairstyle]) -> Vec<&Hairstyle> {
    let mut sorted: Vec<&Hairstyle> = entities.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

/// All distinct tags, sorted.
pub fn unique_tags(entities: &[Hairstyle]) -> Vec<String> {
    let mut tags: Vec<String> = entities
        .iter()
        .flat_map(|h| h.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Tag usage count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Usage statistics for every distinct tag.
pub fn tag_statistics(entities: &[Hairstyle]) -> Vec<TagCount> {
    unique_tags(entities)
        .into_iter()
        .map(|tag| {
            let count = entities
                .iter()
                .filter(|h| h.tags.iter().any(|t| *t == tag))
                .count();
            TagCount { tag, count }
        })
        .collect()
}

/// Favorite entities in favorite-insertion order. Stale ids that no longer
/// resolve are dropped here rather than surfaced.
pub fn favorites_view<'a>(entities: &'a [Hairstyle], favorites: &[EntityId]) -> Vec<&'a Hairstyle> {
    favorites
        .iter()
        .filter_map(|id| entities.iter().find(|h| h.id == *id))
        .collect()
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// Splits results into pages of `per_page`. Pages are 1-based; a page past
/// the end is empty, not an error.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = (start + per_page).min(total_items);
    Page {
        items: items[start..end].to_vec(),
        current_page: page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(id: EntityId, name: &str, tags: &[&str]) -> Hairstyle {
        let mut entity = Hairstyle::new(id, name, "test entry");
        entity.tags = tags.iter().map(|t| t.to_string()).collect();
        entity
    }

    #[test]
    fn test_by_tag_and_all_sentinel() {
        let entities = vec![
            tagged(1, "Crew Cut", &["short", "classic"]),
            tagged(2, "Man Bun", &["long"]),
        ];
        assert_eq!(by_tag(&entities, "short").len(), 1);
        assert_eq!(by_tag(&entities, "all").len(), 2);
        assert!(by_tag(&entities, "curly").is_empty());
    }

    #[test]
    fn test_by_tags_requires_every_tag() {
        let entities = vec![
            tagged(1, "Crew Cut", &["short", "classic"]),
            tagged(2, "Buzz", &["short"]),
        ];
        let hits = by_tags(&entities, &["short", "classic"]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
        // "all" entries are skipped, not required
        assert_eq!(by_tags(&entities, &["all", "short"]).len(), 2);
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let mut entity = Hairstyle::new(1, "Pompadour", "Big volume on top");
        entity.description = "Big VOLUME on top".to_string();
        let entities = vec![entity, Hairstyle::new(2, "Buzz", "Clipper cut")];

        assert_eq!(search(&entities, "pompa").len(), 1);
        assert_eq!(search(&entities, "volume").len(), 1);
        assert_eq!(search(&entities, "  ").len(), 2);
    }

    #[test]
    fn test_favorites_view_drops_stale_ids() {
        let entities = vec![tagged(1, "a", &[]), tagged(2, "b", &[])];
        let favs = vec![2, 99, 1];
        let view = favorites_view(&entities, &favs);
        assert_eq!(view.iter().map(|h| h.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=10).collect();
        let page = paginate(&items, 2, 4);
        assert_eq!(page.items, vec![5, 6, 7, 8]);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(page.has_prev());

        let past_end = paginate(&items, 9, 4);
        assert!(past_end.items.is_empty());
    }
}
