//! Aggregate facts about a decoded document, for reporting layers.

use serde::Serialize;

use crate::tree::Document;
use crate::types::{NodeType, WebkitTime};

/// Folder/bookmark counts and the most recent timestamp in a tree.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Summary {
    pub folders: u64,
    pub urls: u64,
    /// Most recent of every added/last-used/modified date in the tree;
    /// the unset sentinel when no node carries a date.
    pub most_recent: WebkitTime,
}

impl Summary {
    pub fn of(doc: &Document) -> Summary {
        let mut folders = 0;
        let mut urls = 0;
        let mut most_recent = WebkitTime::default();
        for item in doc.walk() {
            let node = item.node;
            match node.node_type {
                NodeType::Folder => folders += 1,
                NodeType::Url => urls += 1,
            }
            most_recent = most_recent
                .max(node.date_added)
                .max(node.date_last_used)
                .max(node.date_modified);
        }
        Summary {
            folders,
            urls,
            most_recent,
        }
    }
}
