//! The closed attribute vocabulary used for matching.
//!
//! Each attribute is a small enum rather than a free string so that an
//! out-of-vocabulary value is a parse error, not a silent zero-score.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Raised when a string is not part of an attribute's vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {attribute} value: {value:?}")]
pub struct VocabError {
    pub attribute: &'static str,
    pub value: String,
}

macro_rules! vocab_enum {
    ($(#[$meta:meta])* $name:ident, $label:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)+
        }

        impl $name {
            /// All values, in vocabulary order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The serialized form of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = VocabError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(VocabError {
                        attribute: $label,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

vocab_enum!(
    /// How the sides are cut.
    Sides, "sides", {
        MidFade => "mid-fade",
        LowFade => "low-fade",
        HighFade => "high-fade",
        Undercut => "undercut",
        Uniform => "uniform",
        Long => "long",
    }
);

vocab_enum!(
    /// How the top is worn.
    Top, "top", {
        WithVolume => "with-volume",
        Slick => "slick",
        Textured => "textured",
        Messy => "messy",
        Short => "short",
        Long => "long",
    }
);

vocab_enum!(
    /// Fringe treatment.
    Bangs, "bangs", {
        WithTexture => "with-texture",
        Swept => "swept",
        Curtain => "curtain",
        None => "none",
        Long => "long",
    }
);

vocab_enum!(
    /// Overall finish of the cut.
    Finish, "style", {
        Modern => "modern",
        Classic => "classic",
        Retro => "retro",
        Alternative => "alternative",
    }
);

/// The attribute vector scored by the matching engine.
///
/// Also used as the criteria shape: a criteria vector is just a fully
/// specified attribute vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub sides: Sides,
    pub top: Top,
    pub bangs: Bangs,
    pub style: Finish,
}

impl Default for Attributes {
    /// Catalog defaults for entries created without explicit attributes.
    fn default() -> Self {
        Self {
            sides: Sides::MidFade,
            top: Top::WithVolume,
            bangs: Bangs::WithTexture,
            style: Finish::Modern,
        }
    }
}
