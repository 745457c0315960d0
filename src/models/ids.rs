//! Opaque identifiers issued by the remote service.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

opaque_id!(
    /// Durable cross-title player identifier. Resolved once per player per run.
    Puuid
);

opaque_id!(
    /// Platform-scoped summoner identifier used by the league endpoints.
    SummonerId
);

opaque_id!(
    /// Match identifier, e.g. `EUW1_7001234567`.
    MatchId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = Puuid::new("abc-123");
        assert_eq!(format!("{}", id), "abc-123");
    }

    #[test]
    fn test_id_debug_names_type() {
        let id = MatchId::from("EUW1_1");
        assert_eq!(format!("{:?}", id), "MatchId(EUW1_1)");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = SummonerId::from("sid".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"sid\"");

        let parsed: SummonerId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_match_ids_deserialize_from_array() {
        let ids: Vec<MatchId> = serde_json::from_str(r#"["NA1_3", "NA1_2"]"#).unwrap();
        assert_eq!(ids, vec![MatchId::from("NA1_3"), MatchId::from("NA1_2")]);
    }
}
