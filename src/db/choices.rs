//! Closed vocabularies for every categorical column of the database.
//!
//! Each vocabulary is an enum whose full value set is a `const` slice, so the
//! allowed values are fixed at compile time and shared by the whole process.

use std::fmt;

/// A categorical value drawn from a fixed vocabulary.
pub trait Choice: Copy + Eq + fmt::Debug + 'static {
    /// Name of the filter field, used in error messages.
    const FIELD: &'static str;

    /// Every member of the vocabulary, in canonical order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    /// The vocabulary rendered for error messages.
    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

macro_rules! choice {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }
    };
}

choice! {
    /// Partition of the clients.
    Group, "group" {
        World => "world",
        Dev => "dev",
        Eval => "eval",
    }
}

choice! {
    Gender, "gender" {
        Male => "m",
        Female => "w",
    }
}

choice! {
    /// Role of a file in an evaluation.
    Purpose, "purpose" {
        Enrol => "enrol",
        Probe => "probe",
    }
}

choice! {
    Session, "session" {
        First => "first",
        Second => "second",
    }
}

choice! {
    Expression, "expression" {
        Neutral => "neutral",
        Smile => "smile",
        Anger => "anger",
        Scream => "scream",
    }
}

choice! {
    Illumination, "illumination" {
        Front => "front",
        Left => "left",
        Right => "right",
        All => "all",
    }
}

choice! {
    Occlusion, "occlusion" {
        None => "none",
        Sunglasses => "sunglasses",
        Scarf => "scarf",
    }
}

choice! {
    /// Evaluation protocols; each names a set of in-scope
    /// (expression, illumination, occlusion) triples in the `protocol` table.
    ProtocolName, "protocol" {
        All => "all",
        Expression => "expression",
        Illumination => "illumination",
        Occlusion => "occlusion",
        OcclusionAndIllumination => "occlusion_and_illumination",
    }
}

impl Default for ProtocolName {
    fn default() -> Self {
        ProtocolName::All
    }
}
