//! Strict decoding, byte-stable encoding, and the authenticity checksum.

use std::io::Write;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::tree::{Document, Node};
use crate::types::errors::{DecodeError, EncodeError};
use crate::types::NodeType;

/// Strictly decodes a bookmark document.
///
/// The returned bool reports whether the declared checksum matches the
/// value recomputed from the tree. A mismatch is *not* an error — callers
/// decide whether an untrusted document is acceptable. Errors are reserved
/// for structural failures: malformed JSON, unknown fields, out-of-set tag
/// values, or a tree-shape violation. Bytes after the first JSON value are
/// ignored.
pub fn decode(bytes: &[u8]) -> Result<(Document, bool), DecodeError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let doc = Document::deserialize(&mut de)?;
    validate_shape(&doc)?;
    let valid = doc.checksum == checksum(&doc);
    Ok((doc, valid))
}

/// Re-serializes a document into `w` with the producing system's layout:
/// three-space indent and a trailing newline. Output of this function is
/// itself carveable — both magic markers appear verbatim.
pub fn encode_to<W: Write>(mut w: W, doc: &Document) -> Result<(), EncodeError> {
    {
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"   ");
        let mut ser = serde_json::Serializer::with_formatter(&mut w, fmt);
        doc.serialize(&mut ser)?;
    }
    w.write_all(b"\n")?;
    Ok(())
}

/// Re-serializes a document to bytes. See [`encode_to`].
pub fn encode(doc: &Document) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    encode_to(&mut out, doc)?;
    Ok(out)
}

/// Recomputes the authoritative checksum over the tree.
///
/// Frozen wire contract replicated from the external system: a streaming
/// MD5 over the pre-order walk of bookmark_bar, other, synced. Each node
/// contributes its id as decimal bytes, its name re-encoded as UTF-16LE,
/// and its type tag literal; url nodes additionally contribute the raw URL
/// bytes. There is no internal self-check — any deviation here silently
/// yields "always invalid", never an error.
pub fn checksum(doc: &Document) -> String {
    let mut hash = Md5::new();
    for item in doc.walk() {
        digest_node(&mut hash, item.node);
    }
    hex::encode(hash.finalize())
}

fn digest_node(hash: &mut Md5, node: &Node) {
    hash.update(node.id.to_string().as_bytes());
    hash.update(utf16le_bytes(&node.name));
    hash.update(node.node_type.as_str().as_bytes());
    if node.node_type == NodeType::Url {
        if let Some(url) = &node.url {
            hash.update(url.as_bytes());
        }
    }
}

fn utf16le_bytes(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() * 2);
    for unit in s.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

fn validate_shape(doc: &Document) -> Result<(), DecodeError> {
    for item in doc.walk() {
        let node = item.node;
        match node.node_type {
            NodeType::Folder => {
                if node.children.is_none() {
                    return Err(DecodeError::NodeShape {
                        id: node.id,
                        detail: "folder node without children",
                    });
                }
                if node.url.is_some() {
                    return Err(DecodeError::NodeShape {
                        id: node.id,
                        detail: "folder node with url",
                    });
                }
            }
            NodeType::Url => {
                if node.children.is_some() {
                    return Err(DecodeError::NodeShape {
                        id: node.id,
                        detail: "url node with children",
                    });
                }
                if node.url.is_none() {
                    return Err(DecodeError::NodeShape {
                        id: node.id,
                        detail: "url node without url",
                    });
                }
            }
        }
    }
    Ok(())
}
