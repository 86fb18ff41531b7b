//! Core identifier types

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database identifier
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying integer value
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

id_newtype! {
    /// Mod identifier.
    ///
    /// Assigned monotonically by the database at creation time; the catalog
    /// cursor relies on this ordering.
    ModId
}

id_newtype! {
    /// Creator identifier
    CreatorId
}

id_newtype! {
    /// Mod version identifier
    VersionId
}
