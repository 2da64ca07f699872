//! # Domain Model
//!
//! Core data types for wallz: [`WallId`], [`WallMeta`], [`WallItem`] and
//! [`NewWallItem`].
//!
//! All of these are plain serializable records. No entity holds a live
//! reference to another: relationships (membership, hierarchy, items) are
//! expressed purely through id lookups in [`crate::store::wall_store`].
//!
//! ## Wire Format
//!
//! Stored values are JSON with camelCase field names, matching the backend
//! key table in the store module:
//!
//! ```json
//! { "id": "mf2k1x-a9q3zt", "title": "Hi", "message": "First post",
//!   "createdAt": 1756100000000, "ownedByMe": true }
//! ```
//!
//! `ownedByMe` may be absent in stored data (items that arrived from
//! elsewhere); it defaults to `false` on read.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a wall.
///
/// No format is guaranteed: remote-issued ids and locally generated ones
/// share this one representation, an uninterpreted token that must survive
/// being embedded in a URL path segment. The store performs no
/// normalization — callers trim user-typed ids before lookup/insert, and a
/// non-trimmed id silently names a distinct wall.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallId(String);

impl WallId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WallId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for WallId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Locally known metadata for a wall.
///
/// Present only for walls whose title has been set on this device; walls
/// joined by typing an id are known by id alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A single post on a wall. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallItem {
    /// Locally generated, unique within this process's id space.
    pub id: String,
    pub title: String,
    pub message: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// True for every item created on this device.
    #[serde(default)]
    pub owned_by_me: bool,
}

/// Caller-supplied fields for a new post.
///
/// The store does not validate these; rejecting blank title/message is the
/// caller's job before invocation.
#[derive(Debug, Clone)]
pub struct NewWallItem {
    pub title: String,
    pub message: String,
}

impl NewWallItem {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_item_wire_shape_is_camel_case() {
        let item = WallItem {
            id: "mf2k1x-a9q3zt".to_string(),
            title: "Hi".to_string(),
            message: "First post".to_string(),
            created_at: 1756100000000,
            owned_by_me: true,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "mf2k1x-a9q3zt");
        assert_eq!(json["createdAt"], 1756100000000i64);
        assert_eq!(json["ownedByMe"], true);
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_wall_item_owned_by_me_defaults_to_false() {
        let raw = r#"{"id":"x","title":"T","message":"M","createdAt":1}"#;
        let item: WallItem = serde_json::from_str(raw).unwrap();
        assert!(!item.owned_by_me);
    }

    #[test]
    fn test_wall_id_serializes_as_bare_string() {
        let id = WallId::new("abc DEF 123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc DEF 123\"");

        let back: WallId = serde_json::from_str("\"abc DEF 123\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_wall_meta_omits_absent_title() {
        let meta = WallMeta::default();
        assert_eq!(serde_json::to_string(&meta).unwrap(), "{}");

        let meta = WallMeta {
            title: Some("Our Wall".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&meta).unwrap(),
            r#"{"title":"Our Wall"}"#
        );
    }
}
