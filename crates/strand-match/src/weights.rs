//! Per-attribute score weights.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when custom weights do not sum to 100.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("weights must sum to 100, got {sum}")]
pub struct WeightsError {
    pub sum: u32,
}

/// How many points each matching attribute contributes.
///
/// The four weights always sum to 100, so a full match scores exactly 100.
/// Deserialization goes through [`Weights::new`], so stored weights that
/// break the invariant are rejected rather than silently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWeights")]
pub struct Weights {
    pub sides: u8,
    pub top: u8,
    pub bangs: u8,
    pub style: u8,
}

/// Unvalidated wire shape for [`Weights`].
#[derive(Deserialize)]
struct RawWeights {
    sides: u8,
    top: u8,
    bangs: u8,
    style: u8,
}

impl TryFrom<RawWeights> for Weights {
    type Error = WeightsError;

    fn try_from(raw: RawWeights) -> Result<Self, Self::Error> {
        Weights::new(raw.sides, raw.top, raw.bangs, raw.style)
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            sides: 25,
            top: 25,
            bangs: 25,
            style: 25,
        }
    }
}

impl Weights {
    /// Builds a custom weighting, rejecting any that does not sum to 100.
    pub fn new(sides: u8, top: u8, bangs: u8, style: u8) -> Result<Self, WeightsError> {
        let sum = u32::from(sides) + u32::from(top) + u32::from(bangs) + u32::from(style);
        if sum != 100 {
            return Err(WeightsError { sum });
        }
        Ok(Self {
            sides,
            top,
            bangs,
            style,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sums_to_100() {
        let w = Weights::default();
        assert_eq!(
            u32::from(w.sides) + u32::from(w.top) + u32::from(w.bangs) + u32::from(w.style),
            100
        );
    }

    #[test]
    fn test_new_rejects_bad_sum() {
        assert_eq!(
            Weights::new(25, 25, 25, 30).unwrap_err(),
            WeightsError { sum: 105 }
        );
        assert!(Weights::new(40, 30, 20, 10).is_ok());
    }

    #[test]
    fn test_deserialize_enforces_sum() {
        let good: Weights =
            serde_json::from_str(r#"{"sides":40,"top":30,"bangs":20,"style":10}"#).unwrap();
        assert_eq!(good, Weights::new(40, 30, 20, 10).unwrap());

        // 4 x 255 would overflow a naive u8 accumulator as well.
        let bad = serde_json::from_str::<Weights>(
            r#"{"sides":255,"top":255,"bangs":255,"style":255}"#,
        );
        assert!(bad.is_err());
    }
}
