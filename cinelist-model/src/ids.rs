use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;

/// Identifier assigned to a movie by the remote store.
///
/// The catalog API has shipped both numeric (`7`) and string (`"7"`,
/// `"a1b2"`) identifiers. The canonical form is kept as a string; ids that
/// are plain unsigned integers serialize back as JSON numbers so PATCH and
/// query payloads keep the shape the server handed out.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidId(
                "Movie ID cannot be empty".to_string(),
            ));
        }
        if trimmed.len() == id.len() {
            Ok(MovieId(id))
        } else {
            Ok(MovieId(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value when the id is a plain unsigned integer.
    pub fn as_number(&self) -> Option<u64> {
        // Leading zeros would not survive a number round trip.
        if self.0.len() > 1 && self.0.starts_with('0') {
            return None;
        }
        self.0.parse().ok()
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        MovieId(id.to_string())
    }
}

impl FromStr for MovieId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MovieId::new(s)
    }
}

impl AsRef<str> for MovieId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for MovieId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_number() {
            Some(n) => serializer.serialize_u64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MovieIdVisitor;

        impl Visitor<'_> for MovieIdVisitor {
            type Value = MovieId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-empty string or unsigned integer id")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<MovieId, E> {
                Ok(MovieId::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<MovieId, E> {
                u64::try_from(v).map(MovieId::from).map_err(|_| {
                    E::invalid_value(de::Unexpected::Signed(v), &self)
                })
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MovieId, E> {
                MovieId::new(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MovieIdVisitor)
    }
}

/// Identifier of a catalog viewer.
///
/// There are no user accounts behind the catalog API; a single configured
/// viewer id stands in for the logged-in user.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ViewerId(pub u64);

impl ViewerId {
    pub const fn new(id: u64) -> Self {
        ViewerId(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Default for ViewerId {
    fn default() -> Self {
        ViewerId(1)
    }
}

impl FromStr for ViewerId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(ViewerId)
            .map_err(|e| ModelError::InvalidId(format!("viewer id {s:?}: {e}")))
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_round_trip_as_numbers() {
        let id: MovieId = serde_json::from_str("7").unwrap();
        assert_eq!(id.as_str(), "7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }

    #[test]
    fn string_ids_keep_their_shape() {
        let id: MovieId = serde_json::from_str("\"a1b2\"").unwrap();
        assert_eq!(id.as_number(), None);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a1b2\"");

        let padded: MovieId = serde_json::from_str("\"007\"").unwrap();
        assert_eq!(serde_json::to_string(&padded).unwrap(), "\"007\"");
    }

    #[test]
    fn numeric_string_ids_equal_numeric_ids() {
        let from_str: MovieId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(from_str, MovieId::from(12));
    }

    #[test]
    fn empty_ids_are_rejected() {
        assert!(MovieId::new("  ").is_err());
        assert!(serde_json::from_str::<MovieId>("\"\"").is_err());
        assert!(serde_json::from_str::<MovieId>("-3").is_err());
    }

    #[test]
    fn viewer_id_parses_from_text() {
        assert_eq!("42".parse::<ViewerId>().unwrap(), ViewerId(42));
        assert!("abc".parse::<ViewerId>().is_err());
        assert_eq!(ViewerId::default(), ViewerId(1));
    }
}
