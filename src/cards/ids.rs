//! String identifiers for content records.
//!
//! Content is authored externally and keyed by slug (`"signet_ring"`,
//! `"high_council"`), so ids are thin newtypes over `String` that serialise
//! transparently.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id from a slug.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw slug.
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
                Self::new(id)
            }
        }
    };
}

string_id! {
    /// Imperium card id.
    CardId
}

string_id! {
    /// Board location id.
    LocationId
}

string_id! {
    /// Intrigue card id.
    IntrigueId
}

string_id! {
    /// Leader id.
    LeaderId
}

string_id! {
    /// Conflict card id.
    ConflictId
}

string_id! {
    /// Agent placement symbol (e.g. `"fremen"`, `"spice_trade"`).
    Symbol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_eq() {
        let id = CardId::new("signet_ring");
        assert_eq!(id.to_string(), "signet_ring");
        assert_eq!(id, CardId::from("signet_ring"));
        assert_eq!(id.as_str(), "signet_ring");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = LocationId::new("arrakeen");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"arrakeen\"");

        let back: LocationId = serde_json::from_str("\"arrakeen\"").unwrap();
        assert_eq!(back, id);
    }
}
