//! Closed-set wire tags. Decoding is strict: a value outside the set is a
//! decode error, which is one of the structural checks that separates
//! plausible garbage from a genuine recovered document while carving.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::errors::UnsupportedVersion;

/// The bookmark file format version. Only version 1 exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Version(u32);

impl Version {
    pub const CURRENT: Version = Version(1);

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::CURRENT
    }
}

impl TryFrom<u32> for Version {
    type Error = UnsupportedVersion;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        if v == 1 {
            Ok(Version(v))
        } else {
            Err(UnsupportedVersion(v))
        }
    }
}

impl From<Version> for u32 {
    fn from(v: Version) -> u32 {
        v.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminates folders from bookmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Url,
    Folder,
}

impl NodeType {
    /// The literal tag bytes as they appear on the wire and in the checksum.
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeType::Url => "url",
            NodeType::Folder => "folder",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a node entered the store. Written by a non-reference implementation
/// (MS Edge); decoded and re-encoded but never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    UserAdd,
    ImportFre,
    Unknown,
}
