//! Typed ID wrappers for compile-time type safety.
//!
//! These types wrap the database-generated integer keys to prevent
//! accidental mixing of different entity IDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use utoipa::ToSchema;

/// Macro to generate typed ID wrappers with common trait implementations.
macro_rules! typed_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            sqlx::Type,
            ToSchema,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database key.
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw key value.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(JobId, "Unique identifier for a job record.");
typed_id!(AuditLogId, "Unique identifier for an audit log entry.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_display_and_parse_roundtrip() {
        let id = JobId::new(42);
        let parsed: JobId = id.to_string().parse().expect("parse id");
        assert_eq!(parsed, id);
        assert_eq!(parsed.as_i64(), 42);
    }

    #[test]
    fn job_id_rejects_non_numeric_input() {
        assert!("abc".parse::<JobId>().is_err());
    }

    #[test]
    fn job_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&JobId::new(7)).expect("serialize id");
        assert_eq!(json, "7");
    }
}
