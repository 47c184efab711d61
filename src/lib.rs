//! bookcarve — recover and validate Chromium bookmark databases.
//!
//! Decodes, re-encodes and authenticates the browser's `Bookmarks` JSON
//! store, and carves verified copies of it out of arbitrary byte streams
//! such as disk images, memory dumps, or unallocated-space extracts.
//!
//! Replicates the byte encoding rules of Chromium's bookmark codec as of
//! Chrome 106 (should hold at least as far back as Chrome 40). See
//! `components/bookmarks/browser/bookmark_codec.cc` and
//! `chrome/browser/bookmarks/bookmark_html_writer.cc` upstream.

pub mod carve;
pub mod codec;
pub mod export;
pub mod report;
pub mod source;
pub mod tree;
pub mod types;

pub use carve::{carve, CarveMatch, Carver};
pub use codec::{checksum, decode, encode, encode_to};
pub use report::Summary;
pub use source::{ReadAt, Section};
pub use tree::{Document, Node, Roots};
