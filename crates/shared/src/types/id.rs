//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `BillId` where a `PersonId` is expected.
//!
//! IDs are opaque strings. New ones are UUID v7, but any non-empty string
//! read from a snapshot is accepted, so exports carrying ULIDs still load.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error returned when parsing an empty ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ID must not be empty")]
pub struct EmptyIdError;

/// Macro to generate typed ID wrappers.
///
/// IDs are totally ordered so that sets of them iterate (and serialize)
/// deterministically.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid.to_string())
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = EmptyIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_from(s.to_string())
            }
        }

        impl TryFrom<String> for $name {
            type Error = EmptyIdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                if value.trim().is_empty() {
                    return Err(EmptyIdError);
                }
                Ok(Self(value))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(PersonId, "Unique identifier for a person.");
typed_id!(GroupId, "Unique identifier for a group of people sharing bills.");
typed_id!(CircleId, "Unique identifier for a circle (sub-grouping) inside a group.");
typed_id!(BillId, "Unique identifier for a bill.");
typed_id!(ProductId, "Unique identifier for a product line on a bill.");
