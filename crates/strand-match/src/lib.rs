//! Strand Match - weighted attribute matching
//!
//! Scores catalog entities against a criteria vector and picks the best
//! fit. Everything here is a pure function over its arguments: no hidden
//! state, deterministic, safe to call from anywhere.
//!
//! # Example
//!
//! ```
//! use strand_core::{Attributes, Hairstyle};
//! use strand_match::{best_match, Weights};
//!
//! let mut entity = Hairstyle::new(1, "Pompadour", "Volume on top");
//! entity.attributes = Some(Attributes::default());
//!
//! let criteria = Attributes::default();
//! let entities = [entity];
//! let hit = best_match(&criteria, &entities, &Weights::default()).unwrap();
//! assert_eq!(hit.score, 100);
//! ```

mod engine;
mod report;
mod weights;

pub use engine::{all_matches, best_match, score, Match};
pub use report::{AttributeDiff, MatchCategory, MatchReport};
pub use weights::{Weights, WeightsError};
