//! Scoring and candidate selection.

use crate::weights::Weights;
use strand_core::{Attributes, Hairstyle};
use tracing::debug;

/// A candidate paired with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub entity: &'a Hairstyle,
    pub score: u8,
}

/// Scores one entity against the criteria.
///
/// Each attribute contributes its full weight on exact equality and
/// nothing otherwise. Entities without an attribute vector score 0 but
/// remain eligible candidates.
pub fn score(criteria: &Attributes, entity: &Hairstyle, weights: &Weights) -> u8 {
    let Some(attrs) = &entity.attributes else {
        debug!(entity = %entity.name, "no attributes, scoring 0");
        return 0;
    };

    // Accumulate wide: weights from a validated source sum to 100, but a
    // hand-built struct literal could push four u8 terms past 255.
    let mut score = 0u32;
    if attrs.sides == criteria.sides {
        score += u32::from(weights.sides);
    }
    if attrs.top == criteria.top {
        score += u32::from(weights.top);
    }
    if attrs.bangs == criteria.bangs {
        score += u32::from(weights.bangs);
    }
    if attrs.style == criteria.style {
        score += u32::from(weights.style);
    }
    score.min(u32::from(u8::MAX)) as u8
}

/// Picks the single best candidate.
///
/// Stable scan replacing only on strict improvement, so the first
/// candidate in input order wins among ties. Empty input is an explicit
/// empty outcome, not an error.
pub fn best_match<'a>(
    criteria: &Attributes,
    candidates: &'a [Hairstyle],
    weights: &Weights,
) -> Option<Match<'a>> {
    let mut best: Option<Match<'a>> = None;
    for entity in candidates {
        let score = score(criteria, entity, weights);
        let improved = best.as_ref().map_or(true, |b| score > b.score);
        if improved {
            best = Some(Match { entity, score });
        }
    }
    if let Some(b) = &best {
        debug!(entity = %b.entity.name, score = b.score, "best match");
    }
    best
}

/// Scores every candidate, sorted descending by score.
///
/// The sort is stable: candidates with equal scores keep their input
/// order. `limit` optionally truncates the result.
pub fn all_matches<'a>(
    criteria: &Attributes,
    candidates: &'a [Hairstyle],
    weights: &Weights,
    limit: Option<usize>,
) -> Vec<Match<'a>> {
    let mut matches: Vec<Match<'a>> = candidates
        .iter()
        .map(|entity| Match {
            entity,
            score: score(criteria, entity, weights),
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));

    if let Some(limit) = limit {
        matches.truncate(limit);
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_core::{Bangs, Finish, Sides, Top};

    fn entity_with(id: u32, name: &str, attrs: Attributes) -> Hairstyle {
        let mut entity = Hairstyle::new(id, name, "test entry");
        entity.attributes = Some(attrs);
        entity
    }

    fn criteria() -> Attributes {
        Attributes {
            sides: Sides::MidFade,
            top: Top::WithVolume,
            bangs: Bangs::Swept,
            style: Finish::Classic,
        }
    }

    fn disjoint() -> Attributes {
        Attributes {
            sides: Sides::Undercut,
            top: Top::Messy,
            bangs: Bangs::None,
            style: Finish::Retro,
        }
    }

    #[test]
    fn test_identical_attributes_score_100() {
        let entity = entity_with(1, "Side Part", criteria());
        assert_eq!(score(&criteria(), &entity, &Weights::default()), 100);
    }

    #[test]
    fn test_disjoint_attributes_score_0() {
        let entity = entity_with(1, "Shag", disjoint());
        assert_eq!(score(&criteria(), &entity, &Weights::default()), 0);
    }

    #[test]
    fn test_missing_attributes_score_0_but_eligible() {
        let bare = Hairstyle::new(1, "No Attrs", "");
        assert_eq!(score(&criteria(), &bare, &Weights::default()), 0);

        // Still eligible: with no better candidate it is returned.
        let candidates = [bare];
        let hit = best_match(&criteria(), &candidates, &Weights::default()).unwrap();
        assert_eq!(hit.entity.id, 1);
        assert_eq!(hit.score, 0);
    }

    #[test]
    fn test_partial_match_uses_weights() {
        let mut attrs = disjoint();
        attrs.sides = Sides::MidFade;
        attrs.style = Finish::Classic;
        let entity = entity_with(1, "Half", attrs);

        assert_eq!(score(&criteria(), &entity, &Weights::default()), 50);

        let weights = Weights::new(40, 30, 20, 10).unwrap();
        assert_eq!(score(&criteria(), &entity, &weights), 50);
    }

    #[test]
    fn test_best_match_tie_break_first_wins() {
        let first = entity_with(1, "First", criteria());
        let second = entity_with(2, "Second", criteria());

        let candidates = [first, second];
        let hit = best_match(&criteria(), &candidates, &Weights::default()).unwrap();
        assert_eq!(hit.entity.id, 1);
        assert_eq!(hit.score, 100);
    }

    #[test]
    fn test_best_match_empty_candidates() {
        assert!(best_match(&criteria(), &[], &Weights::default()).is_none());
    }

    #[test]
    fn test_all_matches_stable_descending() {
        let mut half = disjoint();
        half.sides = Sides::MidFade;
        half.top = Top::WithVolume;

        let candidates = vec![
            entity_with(1, "Zero", disjoint()),
            entity_with(2, "Half A", half),
            entity_with(3, "Full", criteria()),
            entity_with(4, "Half B", half),
        ];

        let matches = all_matches(&criteria(), &candidates, &Weights::default(), None);
        let ids: Vec<u32> = matches.iter().map(|m| m.entity.id).collect();
        // Equal scores keep input order: Half A before Half B.
        assert_eq!(ids, vec![3, 2, 4, 1]);

        let limited = all_matches(&criteria(), &candidates, &Weights::default(), Some(2));
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].entity.id, 3);
    }
}
