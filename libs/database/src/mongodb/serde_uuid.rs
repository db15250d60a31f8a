//! Serialize UUIDs as hyphenated strings in every format.
//!
//! The BSON serializer is not human-readable, so a bare `Uuid` field is
//! written as binary while `doc!` filters built from `id.to_string()` are
//! strings. Fields stored through these helpers always compare equal to
//! string filters.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Product {
//!     #[serde(rename = "_id", with = "database::mongodb::serde_uuid")]
//!     id: Uuid,
//!     #[serde(with = "database::mongodb::serde_uuid::vec")]
//!     related: Vec<Uuid>,
//! }
//! ```

use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use uuid::Uuid;

pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&id.hyphenated().to_string())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Uuid::parse_str(&raw).map_err(D::Error::custom)
}

/// Same encoding for `Vec<Uuid>`.
pub mod vec {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S: Serializer>(ids: &[Uuid], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(ids.len()))?;
        for id in ids {
            seq.serialize_element(&id.hyphenated().to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Uuid>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|raw| Uuid::parse_str(raw).map_err(D::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, Bson};
    use serde::Serialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        #[serde(rename = "_id", with = "super")]
        id: Uuid,
        #[serde(with = "super::vec")]
        items: Vec<Uuid>,
    }

    #[test]
    fn test_bson_stores_strings() {
        let doc = Doc {
            id: Uuid::now_v7(),
            items: vec![Uuid::now_v7()],
        };

        let raw = bson::to_raw_document_buf(&doc).unwrap();
        let id = raw.get_str("_id").unwrap();
        assert_eq!(id, doc.id.to_string());

        let back: Doc = bson::from_slice(raw.as_bytes()).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_to_bson_matches_string_filter() {
        let id = Uuid::now_v7();
        let doc = Doc { id, items: vec![] };
        let bson = bson::to_document(&doc).unwrap();
        assert_eq!(bson.get("_id"), Some(&Bson::String(id.to_string())));
    }

    #[test]
    fn test_json_round_trip() {
        let doc = Doc {
            id: Uuid::now_v7(),
            items: vec![Uuid::now_v7(), Uuid::now_v7()],
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["_id"], doc.id.to_string());
        let back: Doc = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_rejects_malformed_id() {
        let json = serde_json::json!({ "_id": "nope", "items": [] });
        assert!(serde_json::from_value::<Doc>(json).is_err());
    }
}
