//! Shared primitive types used across the whole panel.

use chrono::{DateTime, Utc};

/// A stable identifier for a record within its collection.
pub type EntityId = String;

/// A monetary amount in Algerian dinar (DZD).
pub type Amount = f64;

/// Every record timestamp is a UTC instant.
pub type Timestamp = DateTime<Utc>;

/// Declares a closed enum whose variants carry the exact labels shown in the
/// panel and used on the wire (e.g. `"Pending Review"`, `"Paper-based"`).
///
/// Generates `ALL`, `label()`, `Display`, `FromStr` and serde impls that all
/// agree on the same label.
#[macro_export]
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::PanelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == s)
                    .ok_or_else(|| $crate::error::PanelError::UnknownLabel {
                        kind:  stringify!($name),
                        label: s.to_string(),
                    })
            }
        }
    };
}
