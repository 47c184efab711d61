//! Netscape bookmark file export.
//!
//! Produces the interchange format every major browser can import. Layout
//! quirks are deliberate and match the reference exporter: CRLF line
//! endings, four-space indent per depth, the `other` and `synced` roots
//! flattened into the top level, and `PERSONAL_TOOLBAR_FOLDER` on the bar.

use std::io::{self, BufWriter, Write};

use crate::tree::{Document, Node};
use crate::types::NodeType;

const HEADER: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>\r\n\
<!-- This is an automatically generated file.\r\n\
     It will be read and overwritten.\r\n\
     DO NOT EDIT! -->\r\n\
<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\r\n\
<TITLE>Bookmarks</TITLE>\r\n\
<H1>Bookmarks</H1>\r\n\
<DL><p>\r\n";

/// Which permanent root a top-level call renders.
#[derive(Clone, Copy, PartialEq)]
enum RootKind {
    Bar,
    Flattened,
    Plain,
}

/// Writes an HTML bookmark export of `doc` to `w`.
///
/// `favicon` maps a bookmark URL to a data URL for its icon; return `None`
/// when no icon is available (pass `|_| None` to skip icons entirely).
pub fn export<W, F>(w: W, doc: &Document, mut favicon: F) -> io::Result<()>
where
    W: Write,
    F: FnMut(&str) -> Option<String>,
{
    let mut w = BufWriter::new(w);
    w.write_all(HEADER.as_bytes())?;
    export_node(&mut w, &doc.roots.bookmark_bar, &mut favicon, 1, RootKind::Bar)?;
    export_node(&mut w, &doc.roots.other, &mut favicon, 1, RootKind::Flattened)?;
    export_node(&mut w, &doc.roots.synced, &mut favicon, 1, RootKind::Flattened)?;
    w.write_all(b"</DL><p>\r\n")?;
    w.flush()
}

fn export_node<W, F>(
    w: &mut W,
    node: &Node,
    favicon: &mut F,
    indent: usize,
    kind: RootKind,
) -> io::Result<()>
where
    W: Write,
    F: FnMut(&str) -> Option<String>,
{
    match node.node_type {
        NodeType::Url => {
            write_indent(w, indent)?;
            w.write_all(b"<DT><A")?;
            if let Some(url) = node.url.as_deref().filter(|u| !u.is_empty()) {
                write!(w, " HREF=\"{}\"", escape_attr(url))?;
            }
            if !node.date_added.is_zero() {
                write!(w, " ADD_DATE=\"{}\"", node.date_added.to_unix_secs())?;
            }
            if let Some(icon) = node.url.as_deref().and_then(|u| favicon(u)) {
                write!(w, " ICON=\"{}\"", escape_attr(&icon))?;
            }
            write!(w, ">{}</A>\r\n", escape_text(&node.name))?;
        }
        NodeType::Folder => match kind {
            // The other/synced roots have no folder of their own in the
            // export; their children join the top level.
            RootKind::Flattened => {
                for child in node.children.iter().flatten() {
                    export_node(w, child, favicon, indent, RootKind::Plain)?;
                }
            }
            RootKind::Bar | RootKind::Plain => {
                write_indent(w, indent)?;
                w.write_all(b"<DT><H3")?;
                if !node.date_added.is_zero() {
                    write!(w, " ADD_DATE=\"{}\"", node.date_added.to_unix_secs())?;
                }
                if !node.date_modified.is_zero() {
                    write!(w, " LAST_MODIFIED=\"{}\"", node.date_modified.to_unix_secs())?;
                }
                if kind == RootKind::Bar {
                    w.write_all(b" PERSONAL_TOOLBAR_FOLDER=\"true\"")?;
                }
                write!(w, ">{}</H3>\r\n", escape_text(&node.name))?;
                write_indent(w, indent)?;
                w.write_all(b"<DL><p>\r\n")?;
                for child in node.children.iter().flatten() {
                    export_node(w, child, favicon, indent + 1, RootKind::Plain)?;
                }
                write_indent(w, indent)?;
                w.write_all(b"</DL><p>\r\n")?;
            }
        },
    }
    Ok(())
}

fn write_indent<W: Write>(w: &mut W, indent: usize) -> io::Result<()> {
    for _ in 0..indent {
        w.write_all(b"    ")?;
    }
    Ok(())
}

fn escape_attr(s: &str) -> String {
    s.replace('"', "&quot;")
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}
