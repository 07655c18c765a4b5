//! Opaque identifiers for tasks and columns.
//!
//! Generated identifiers take the form `<kind>-<uuid v7>`: the UUID v7
//! carries a millisecond timestamp followed by random bits, which is enough
//! for process-wide uniqueness without a global counter. Identifiers
//! supplied by an embedding application (fixtures, seeds) may be any
//! string.

use std::borrow::Borrow;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an identifier names. Selects the generated prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// A task card.
    Task,
    /// A board column.
    Column,
}

impl IdKind {
    /// Returns the prefix used for generated identifiers of this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Column => "column",
        }
    }
}

/// Generates a new unique identifier string for the given kind.
#[must_use]
pub fn new_id(kind: IdKind) -> String {
    format!("{}-{}", kind.prefix(), Uuid::now_v7().simple())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Allocates a fresh, process-unique identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(new_id($kind))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifier of a task. Unique and immutable after creation.
    TaskId,
    IdKind::Task
);

string_id!(
    /// Identifier of a column.
    ColumnId,
    IdKind::Column
);
