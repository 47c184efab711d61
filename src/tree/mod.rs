//! The in-memory bookmark tree and its JSON shape.
//!
//! Field declaration order matches the wire order of the producing system,
//! and every struct rejects unknown fields: near-miss garbage must fail to
//! decode rather than be silently accepted, because strict decoding is one
//! of the checks standing between coincidental bytes and a verified
//! recovered document.

pub mod walk;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Blob, Guid, NodeType, Source, Version, WebkitTime};

pub use walk::{Walk, WalkItem};

/// String-keyed metadata attached to documents and nodes. A `BTreeMap`
/// keeps encoding deterministic regardless of insertion order.
pub type MetaInfo = BTreeMap<String, String>;

/// A decoded bookmark database.
///
/// `checksum` is whatever the file declared; whether it matches the value
/// recomputed from the tree is reported separately by
/// [`decode`](crate::codec::decode) — validity is advisory, not a decode
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub checksum: String,
    pub roots: Roots,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_metadata: Option<Blob>,
    pub version: Version,
    #[serde(default, skip_serializing_if = "meta_is_empty")]
    pub meta_info: Option<MetaInfo>,
    #[serde(default, skip_serializing_if = "meta_is_empty")]
    pub unsynced_meta_info: Option<MetaInfo>,
}

/// The three permanent root folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Roots {
    pub bookmark_bar: Node,
    pub other: Node,
    pub synced: Node,
}

/// One folder or bookmark.
///
/// Shape invariant (checked by the codec, not by serde): `children` is
/// present exactly when `node_type` is [`NodeType::Folder`], and `url`
/// exactly when it is [`NodeType::Url`]. An empty folder carries
/// `Some(vec![])`, which is distinct from absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "WebkitTime::is_zero")]
    pub date_added: WebkitTime,
    #[serde(default, skip_serializing_if = "WebkitTime::is_zero")]
    pub date_last_used: WebkitTime,
    #[serde(default, skip_serializing_if = "WebkitTime::is_zero")]
    pub date_modified: WebkitTime,
    pub guid: Guid,
    #[serde(with = "id_string")]
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub show_icon: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "meta_is_empty")]
    pub meta_info: Option<MetaInfo>,
    #[serde(default, skip_serializing_if = "meta_is_empty")]
    pub unsynced_meta_info: Option<MetaInfo>,
}

impl Document {
    /// Depth-first, pre-order traversal over all three roots in wire order
    /// (bookmark_bar, then other, then synced).
    pub fn walk(&self) -> Walk<'_> {
        Walk::over_roots(&self.roots)
    }
}

impl Node {
    /// Creates a folder node with the given children.
    pub fn folder(id: i64, name: impl Into<String>, guid: Guid, children: Vec<Node>) -> Node {
        Node {
            children: Some(children),
            date_added: WebkitTime::default(),
            date_last_used: WebkitTime::default(),
            date_modified: WebkitTime::default(),
            guid,
            id,
            name: name.into(),
            show_icon: false,
            source: None,
            node_type: NodeType::Folder,
            url: None,
            meta_info: None,
            unsynced_meta_info: None,
        }
    }

    /// Creates a bookmark node pointing at `url`.
    pub fn url(id: i64, name: impl Into<String>, guid: Guid, url: impl Into<String>) -> Node {
        Node {
            children: None,
            date_added: WebkitTime::default(),
            date_last_used: WebkitTime::default(),
            date_modified: WebkitTime::default(),
            guid,
            id,
            name: name.into(),
            show_icon: false,
            source: None,
            node_type: NodeType::Url,
            url: Some(url.into()),
            meta_info: None,
            unsynced_meta_info: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.node_type == NodeType::Folder
    }

    /// Depth-first, pre-order traversal rooted at this node.
    pub fn walk(&self) -> Walk<'_> {
        Walk::over_node(self)
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn meta_is_empty(m: &Option<MetaInfo>) -> bool {
    m.as_ref().map_or(true, BTreeMap::is_empty)
}

mod id_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<i64>().map_err(serde::de::Error::custom)
    }
}
