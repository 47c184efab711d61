use std::fmt;
use std::io;

// === GuidError ===

/// Errors from parsing a GUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidError {
    /// Wrong length or hyphens not at positions 8/13/18/23.
    InvalidFormat,
    /// A character outside `[0-9a-fA-F]` where a hex digit was expected.
    InvalidHex,
}

impl fmt::Display for GuidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuidError::InvalidFormat => write!(f, "invalid guid format"),
            GuidError::InvalidHex => write!(f, "invalid guid hex char"),
        }
    }
}

impl std::error::Error for GuidError {}

// === UnsupportedVersion ===

/// The bookmark file declares a format version this crate does not handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedVersion(pub u32);

impl fmt::Display for UnsupportedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported bookmarks version {}", self.0)
    }
}

impl std::error::Error for UnsupportedVersion {}

// === DecodeError ===

/// Errors from strict bookmark document decoding.
///
/// A checksum mismatch is deliberately *not* represented here; `decode`
/// reports it through its validity flag instead.
#[derive(Debug)]
pub enum DecodeError {
    /// JSON syntax error, unknown field, wrong type, or an out-of-set value.
    Json(serde_json::Error),
    /// A node violates the tree shape: `children` must be present exactly
    /// on folders, `url` exactly on url nodes.
    NodeShape { id: i64, detail: &'static str },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Json(err) => write!(f, "parse bookmarks: {}", err),
            DecodeError::NodeShape { id, detail } => {
                write!(f, "node {}: {}", id, detail)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Json(err) => Some(err),
            DecodeError::NodeShape { .. } => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err)
    }
}

// === EncodeError ===

/// Errors from re-serializing a bookmark document.
#[derive(Debug)]
pub enum EncodeError {
    /// Serialization failed (e.g. an invalid version slipped into the tree).
    Json(serde_json::Error),
    /// The underlying writer failed.
    Io(io::Error),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Json(err) => write!(f, "encode bookmarks: {}", err),
            EncodeError::Io(err) => write!(f, "write bookmarks: {}", err),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Json(err) => Some(err),
            EncodeError::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Json(err)
    }
}

impl From<io::Error> for EncodeError {
    fn from(err: io::Error) -> Self {
        EncodeError::Io(err)
    }
}
