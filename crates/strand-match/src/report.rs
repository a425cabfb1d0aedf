//! Match quality banding and the detailed per-attribute report.

use crate::engine::score;
use crate::weights::Weights;
use serde::{Deserialize, Serialize};
use strand_core::{Attributes, Hairstyle};

/// Quality band for a score. Used only to pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchCategory {
    /// Deterministic banding: 100, [75,100), [50,75), [0,50).
    pub fn from_score(score: u8) -> Self {
        match score {
            100 => MatchCategory::Excellent,
            75..=99 => MatchCategory::Good,
            50..=74 => MatchCategory::Fair,
            _ => MatchCategory::Poor,
        }
    }

    /// True only for a full 100-point match.
    pub fn is_perfect(score: u8) -> bool {
        score == 100
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchCategory::Excellent => "excellent",
            MatchCategory::Good => "good",
            MatchCategory::Fair => "fair",
            MatchCategory::Poor => "poor",
        }
    }

    /// User-facing message for this band.
    pub fn message(&self) -> &'static str {
        match self {
            MatchCategory::Excellent => "Perfect match! This cut fits your preferences exactly.",
            MatchCategory::Good => "Very good match. You should like this one.",
            MatchCategory::Fair => {
                "Closest available match. Adjust the criteria to find a better fit."
            }
            MatchCategory::Poor => {
                "No close match found. Consider changing the search criteria."
            }
        }
    }
}

impl std::fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One attribute where the entity differs from the criteria.
/// Reports are produced for display, never read back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDiff {
    pub attribute: &'static str,
    pub expected: String,
    pub actual: String,
}

/// Per-attribute breakdown of a single entity's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub overall_score: u8,
    pub category: MatchCategory,
    pub sides_match: bool,
    pub top_match: bool,
    pub bangs_match: bool,
    pub style_match: bool,
    pub differences: Vec<AttributeDiff>,
}

impl MatchReport {
    /// Builds the report, or `None` when the entity has no attributes to
    /// compare.
    pub fn build(criteria: &Attributes, entity: &Hairstyle, weights: &Weights) -> Option<Self> {
        let attrs = entity.attributes.as_ref()?;
        let overall_score = score(criteria, entity, weights);

        let mut differences = Vec::new();
        if attrs.sides != criteria.sides {
            differences.push(AttributeDiff {
                attribute: "sides",
                expected: criteria.sides.to_string(),
                actual: attrs.sides.to_string(),
            });
        }
        if attrs.top != criteria.top {
            differences.push(AttributeDiff {
                attribute: "top",
                expected: criteria.top.to_string(),
                actual: attrs.top.to_string(),
            });
        }
        if attrs.bangs != criteria.bangs {
            differences.push(AttributeDiff {
                attribute: "bangs",
                expected: criteria.bangs.to_string(),
                actual: attrs.bangs.to_string(),
            });
        }
        if attrs.style != criteria.style {
            differences.push(AttributeDiff {
                attribute: "style",
                expected: criteria.style.to_string(),
                actual: attrs.style.to_string(),
            });
        }

        Some(Self {
            overall_score,
            category: MatchCategory::from_score(overall_score),
            sides_match: attrs.sides == criteria.sides,
            top_match: attrs.top == criteria.top,
            bangs_match: attrs.bangs == criteria.bangs,
            style_match: attrs.style == criteria.style,
            differences,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_core::{Bangs, Finish, Sides, Top};

    #[test]
    fn test_banding() {
        assert_eq!(MatchCategory::from_score(100), MatchCategory::Excellent);
        assert_eq!(MatchCategory::from_score(99), MatchCategory::Good);
        assert_eq!(MatchCategory::from_score(75), MatchCategory::Good);
        assert_eq!(MatchCategory::from_score(74), MatchCategory::Fair);
        assert_eq!(MatchCategory::from_score(50), MatchCategory::Fair);
        assert_eq!(MatchCategory::from_score(49), MatchCategory::Poor);
        assert_eq!(MatchCategory::from_score(0), MatchCategory::Poor);
    }

    #[test]
    fn test_is_perfect() {
        assert!(MatchCategory::is_perfect(100));
        assert!(!MatchCategory::is_perfect(99));
    }

    #[test]
    fn test_report_lists_differences() {
        let criteria = Attributes {
            sides: Sides::MidFade,
            top: Top::WithVolume,
            bangs: Bangs::Swept,
            style: Finish::Classic,
        };
        let mut entity = Hairstyle::new(1, "Side Part", "");
        entity.attributes = Some(Attributes {
            sides: Sides::MidFade,
            top: Top::Slick,
            bangs: Bangs::Swept,
            style: Finish::Classic,
        });

        let report = MatchReport::build(&criteria, &entity, &Weights::default()).unwrap();
        assert_eq!(report.overall_score, 75);
        assert_eq!(report.category, MatchCategory::Good);
        assert!(report.sides_match && report.bangs_match && report.style_match);
        assert!(!report.top_match);
        assert_eq!(report.differences.len(), 1);
        assert_eq!(report.differences[0].attribute, "top");
        assert_eq!(report.differences[0].expected, "with-volume");
        assert_eq!(report.differences[0].actual, "slick");
    }

    #[test]
    fn test_report_none_without_attributes() {
        let entity = Hairstyle::new(1, "Bare", "");
        let criteria = Attributes::default();
        assert!(MatchReport::build(&criteria, &entity, &Weights::default()).is_none());
    }
}
