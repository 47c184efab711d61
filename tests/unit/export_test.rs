//! Byte-exact tests for the Netscape HTML exporter.

use bookcarve::export::export;
use bookcarve::types::{Guid, Version, WebkitTime};
use bookcarve::{Document, Node, Roots};

fn guid(n: u8) -> Guid {
    Guid::from([n; 16])
}

fn sample() -> Document {
    let mut example = Node::url(4, "Example", guid(4), "https://example.com/");
    example.date_added = WebkitTime::from_raw(13_285_932_883_880_131);

    let docs = Node::url(6, "Docs & <Refs>", guid(6), "https://docs.example/?q=\"x\"");
    let mut stuff = Node::folder(5, "Stuff", guid(5), vec![docs]);
    stuff.date_added = WebkitTime::from_raw(13_285_932_880_000_000);
    stuff.date_modified = WebkitTime::from_raw(13_285_932_950_000_000);

    let mobile = Node::url(7, "Mobile", guid(7), "https://m.example/");

    Document {
        checksum: String::new(),
        roots: Roots {
            bookmark_bar: Node::folder(1, "Bookmarks bar", guid(1), vec![example, stuff]),
            other: Node::folder(2, "Other bookmarks", guid(2), vec![mobile]),
            synced: Node::folder(3, "Mobile bookmarks", guid(3), vec![]),
        },
        sync_metadata: None,
        version: Version::CURRENT,
        meta_info: None,
        unsynced_meta_info: None,
    }
}

fn render<F: FnMut(&str) -> Option<String>>(doc: &Document, favicon: F) -> String {
    let mut out = Vec::new();
    export(&mut out, doc, favicon).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_full_export_layout() {
    let html = render(&sample(), |url| {
        (url == "https://example.com/").then(|| "data:image/png;base64,AAAA".to_string())
    });

    let expected = concat!(
        "<!DOCTYPE NETSCAPE-Bookmark-file-1>\r\n",
        "<!-- This is an automatically generated file.\r\n",
        "     It will be read and overwritten.\r\n",
        "     DO NOT EDIT! -->\r\n",
        "<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\r\n",
        "<TITLE>Bookmarks</TITLE>\r\n",
        "<H1>Bookmarks</H1>\r\n",
        "<DL><p>\r\n",
        "    <DT><H3 PERSONAL_TOOLBAR_FOLDER=\"true\">Bookmarks bar</H3>\r\n",
        "    <DL><p>\r\n",
        "        <DT><A HREF=\"https://example.com/\" ADD_DATE=\"1641459283\" ",
        "ICON=\"data:image/png;base64,AAAA\">Example</A>\r\n",
        "        <DT><H3 ADD_DATE=\"1641459280\" LAST_MODIFIED=\"1641459350\">Stuff</H3>\r\n",
        "        <DL><p>\r\n",
        "            <DT><A HREF=\"https://docs.example/?q=&quot;x&quot;\">",
        "Docs &amp; &lt;Refs&gt;</A>\r\n",
        "        </DL><p>\r\n",
        "    </DL><p>\r\n",
        "    <DT><A HREF=\"https://m.example/\">Mobile</A>\r\n",
        "</DL><p>\r\n",
    );
    assert_eq!(html, expected);
}

#[test]
fn test_other_and_synced_roots_flattened() {
    let html = render(&sample(), |_| None);
    // Neither flattened root appears as a folder heading.
    assert!(!html.contains("Other bookmarks"));
    assert!(!html.contains("Mobile bookmarks"));
    // But their children do appear.
    assert!(html.contains("Mobile</A>"));
}

#[test]
fn test_no_icon_without_lookup() {
    let html = render(&sample(), |_| None);
    assert!(!html.contains("ICON="));
}

#[test]
fn test_zero_dates_omit_attributes() {
    let doc = sample();
    let html = render(&doc, |_| None);
    // The mobile bookmark has no dates set.
    assert!(html.contains("<DT><A HREF=\"https://m.example/\">Mobile</A>"));
}

#[test]
fn test_empty_bar_exports_header_and_empty_list() {
    let doc = Document {
        checksum: String::new(),
        roots: Roots {
            bookmark_bar: Node::folder(1, "Bookmarks bar", guid(1), vec![]),
            other: Node::folder(2, "Other bookmarks", guid(2), vec![]),
            synced: Node::folder(3, "Mobile bookmarks", guid(3), vec![]),
        },
        sync_metadata: None,
        version: Version::CURRENT,
        meta_info: None,
        unsynced_meta_info: None,
    };
    let html = render(&doc, |_| None);
    assert!(html.starts_with("<!DOCTYPE NETSCAPE-Bookmark-file-1>\r\n"));
    assert!(html.contains("PERSONAL_TOOLBAR_FOLDER=\"true\">Bookmarks bar</H3>"));
    assert!(html.ends_with("</DL><p>\r\n"));
}
