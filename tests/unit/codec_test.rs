//! Unit tests for strict decoding, byte-stable encoding, and the checksum,
//! pinned against a golden fixture whose digest was computed with the
//! external system's hashing rules.

use bookcarve::types::errors::DecodeError;
use bookcarve::types::{Blob, Guid, Version};
use bookcarve::{checksum, decode, encode, Document, Node, Roots};

const FIXTURE: &[u8] = include_bytes!("../data/bookmarks_valid.json");
const FIXTURE_CHECKSUM: &str = "5e5a01acf80aec5ef071d55dab97f7ae";

fn fixture_string() -> String {
    String::from_utf8(FIXTURE.to_vec()).unwrap()
}

/// Helper: a minimal self-consistent document.
fn small_document() -> Document {
    let mut doc = Document {
        checksum: String::new(),
        roots: Roots {
            bookmark_bar: Node::folder(
                1,
                "Bookmarks bar",
                Guid::from([1; 16]),
                vec![Node::url(
                    4,
                    "Rust",
                    Guid::from([4; 16]),
                    "https://www.rust-lang.org/",
                )],
            ),
            other: Node::folder(2, "Other bookmarks", Guid::from([2; 16]), vec![]),
            synced: Node::folder(3, "Mobile bookmarks", Guid::from([3; 16]), vec![]),
        },
        sync_metadata: None,
        version: Version::CURRENT,
        meta_info: None,
        unsynced_meta_info: None,
    };
    doc.checksum = checksum(&doc);
    doc
}

#[test]
fn test_fixture_decodes_valid() {
    let (doc, valid) = decode(FIXTURE).unwrap();
    assert!(valid, "fixture checksum must verify");
    assert_eq!(doc.checksum, FIXTURE_CHECKSUM);
    assert_eq!(doc.version, Version::CURRENT);
    assert_eq!(
        doc.roots.bookmark_bar.guid.to_string(),
        "0bc5d13f-2cba-5d74-951f-3f233fe6c908"
    );
}

#[test]
fn test_fixture_reencodes_byte_identical() {
    let (doc, valid) = decode(FIXTURE).unwrap();
    assert!(valid);
    let encoded = encode(&doc).unwrap();
    assert_eq!(
        encoded, FIXTURE,
        "re-encoding must reproduce the fixture byte for byte"
    );
}

#[test]
fn test_fixture_tree_contents() {
    let (doc, _) = decode(FIXTURE).unwrap();
    let names: Vec<String> = doc.walk().map(|i| i.node.name.clone()).collect();
    assert_eq!(
        names,
        vec![
            "Bookmarks bar",
            "Rust Programming Language",
            "Café reading",
            "serde — Rust",
            "Other bookmarks",
            "MDN Web Docs 🦀",
            "Mobile bookmarks",
        ]
    );

    // Vendor-extension fields are carried, not interpreted.
    let mdn = doc
        .walk()
        .find(|i| i.node.id == 8)
        .expect("node 8 present");
    assert!(mdn.node.show_icon);
    assert_eq!(
        mdn.node.source,
        Some(bookcarve::types::Source::UserAdd)
    );

    // sync_metadata is opaque bytes, base64 on the wire.
    assert_eq!(
        doc.sync_metadata.as_ref().map(|b| b.as_ref().to_vec()),
        Some(b"\n\x05hello\x12\x05world".to_vec())
    );
}

#[test]
fn test_checksum_mismatch_is_valid_false_not_error() {
    // Flip one checksum digit: still structurally perfect.
    let tampered = fixture_string().replacen("5e5a01ac", "5e5a01ad", 1);
    let (doc, valid) = decode(tampered.as_bytes()).unwrap();
    assert!(!valid, "tampered checksum must fail verification");
    assert_eq!(doc.checksum, "5e5a01adf80aec5ef071d55dab97f7ae");
}

#[test]
fn test_unknown_top_level_field_rejected() {
    let s = fixture_string().replacen(
        "\"version\": 1",
        "\"version\": 1,\n   \"extra_field\": true",
        1,
    );
    assert!(matches!(
        decode(s.as_bytes()),
        Err(DecodeError::Json(_))
    ));
}

#[test]
fn test_unknown_node_field_rejected() {
    let s = fixture_string().replacen(
        "\"name\": \"Rust Programming Language\"",
        "\"name\": \"Rust Programming Language\",\n               \"pinned\": true",
        1,
    );
    assert!(matches!(
        decode(s.as_bytes()),
        Err(DecodeError::Json(_))
    ));
}

#[test]
fn test_unsupported_version_rejected() {
    let s = fixture_string().replacen("\"version\": 1", "\"version\": 2", 1);
    assert!(decode(s.as_bytes()).is_err());
}

#[test]
fn test_numeric_id_rejected() {
    // Ids are decimal strings on the wire, never JSON numbers.
    let s = fixture_string().replacen("\"id\": \"5\"", "\"id\": 5", 1);
    assert!(decode(s.as_bytes()).is_err());
}

#[test]
fn test_numeric_timestamp_rejected() {
    let s = fixture_string().replacen(
        "\"date_added\": \"13285932883880131\"",
        "\"date_added\": 13285932883880131",
        1,
    );
    assert!(decode(s.as_bytes()).is_err());
}

#[test]
fn test_malformed_guid_rejected() {
    let s = fixture_string().replacen(
        "c8a3e252-7d4b-4a5e-9c2f-30587de94c11",
        "c8a3e252-7d4b-4a5e-9c2f-30587de94cZZ",
        1,
    );
    assert!(decode(s.as_bytes()).is_err());
}

#[test]
fn test_out_of_set_node_type_rejected() {
    let s = fixture_string().replacen("\"type\": \"url\"", "\"type\": \"link\"", 1);
    assert!(decode(s.as_bytes()).is_err());
}

#[test]
fn test_out_of_set_source_rejected() {
    let s = fixture_string().replacen(
        "\"source\": \"user_add\"",
        "\"source\": \"sync\"",
        1,
    );
    assert!(decode(s.as_bytes()).is_err());
}

#[test]
fn test_url_node_with_children_rejected() {
    let mut doc = small_document();
    let children = doc.roots.bookmark_bar.children.as_mut().unwrap();
    children[0].children = Some(vec![]);
    doc.checksum = checksum(&doc);
    let bytes = encode(&doc).unwrap();
    assert!(matches!(
        decode(&bytes),
        Err(DecodeError::NodeShape { id: 4, .. })
    ));
}

#[test]
fn test_folder_without_children_rejected() {
    let mut doc = small_document();
    doc.roots.synced.children = None;
    doc.checksum = checksum(&doc);
    let bytes = encode(&doc).unwrap();
    assert!(matches!(
        decode(&bytes),
        Err(DecodeError::NodeShape { id: 3, .. })
    ));
}

#[test]
fn test_empty_folder_distinct_from_absent() {
    let (doc, _) = decode(FIXTURE).unwrap();
    assert_eq!(doc.roots.synced.children, Some(vec![]));
    let encoded = String::from_utf8(encode(&doc).unwrap()).unwrap();
    assert!(encoded.contains("\"children\": []"));
}

#[test]
fn test_sync_metadata_three_states() {
    // Absent and null both decode to None.
    let mut doc = small_document();
    doc.sync_metadata = None;
    let bytes = encode(&doc).unwrap();
    let (back, _) = decode(&bytes).unwrap();
    assert_eq!(back.sync_metadata, None);

    let s = fixture_string().replacen(
        "\"sync_metadata\": \"CgVoZWxsbxIFd29ybGQ=\"",
        "\"sync_metadata\": null",
        1,
    );
    let (back, _) = decode(s.as_bytes()).unwrap();
    assert_eq!(back.sync_metadata, None);

    // Present-but-empty survives a round trip as Some(empty).
    doc.sync_metadata = Some(Blob::default());
    let bytes = encode(&doc).unwrap();
    assert!(String::from_utf8(bytes.clone())
        .unwrap()
        .contains("\"sync_metadata\": \"\""));
    let (back, _) = decode(&bytes).unwrap();
    assert_eq!(back.sync_metadata, Some(Blob::default()));
}

#[test]
fn test_invalid_base64_sync_metadata_rejected() {
    let s = fixture_string().replacen(
        "\"sync_metadata\": \"CgVoZWxsbxIFd29ybGQ=\"",
        "\"sync_metadata\": \"!!not base64!!\"",
        1,
    );
    assert!(decode(s.as_bytes()).is_err());
}

#[test]
fn test_trailing_bytes_ignored() {
    let mut bytes = FIXTURE.to_vec();
    bytes.extend_from_slice(b"\n\ntrailing junk");
    let (_, valid) = decode(&bytes).unwrap();
    assert!(valid);
}

#[test]
fn test_empty_and_garbage_inputs_error() {
    assert!(decode(b"").is_err());
    assert!(decode(b"not json at all").is_err());
    assert!(decode(b"[1, 2, 3]").is_err());
}

#[test]
fn test_missing_root_rejected() {
    let s = fixture_string().replacen("\"synced\"", "\"mobile\"", 1);
    assert!(decode(s.as_bytes()).is_err());
}

#[test]
fn test_encode_decode_roundtrip_is_valid() {
    let doc = small_document();
    let bytes = encode(&doc).unwrap();
    let (back, valid) = decode(&bytes).unwrap();
    assert!(valid);
    assert_eq!(back, doc);
    assert_eq!(back.checksum, doc.checksum);
}

#[test]
fn test_zero_dates_encode_as_absence() {
    let doc = small_document();
    let encoded = String::from_utf8(encode(&doc).unwrap()).unwrap();
    assert!(!encoded.contains("date_added"));
    assert!(!encoded.contains("\"0\""));
}
