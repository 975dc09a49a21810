use crate::types::{ItemId, TimestampMillis};

/// A unit of text within a thread: an article, a post or a (nested) reply.
///
/// Items are immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadItem {
    pub id: ItemId,
    /// `None` (or the item's own id) marks a root item.
    pub parent_id: Option<ItemId>,
    pub text: String,
    pub timestamp_millis: TimestampMillis,
    /// Extra source fields copied verbatim into every output row for this item.
    pub metadata: Vec<String>,
    /// The submission a comment belongs to, whatever its direct parent.
    pub post_id: Option<ItemId>,
}

impl ThreadItem {
    pub fn new(
        id: &str,
        parent_id: Option<&str>,
        text: &str,
        timestamp_millis: TimestampMillis,
    ) -> Self {
        ThreadItem {
            id: id.to_string(),
            parent_id: parent_id.map(|parent_id| parent_id.to_string()),
            text: text.to_string(),
            timestamp_millis,
            metadata: Vec::new(),
            post_id: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Vec<String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_post_id(mut self, post_id: Option<&str>) -> Self {
        self.post_id = post_id.map(|post_id| post_id.to_string());
        self
    }

    /// The parent id, unless the item is a root.
    pub fn effective_parent_id(&self) -> Option<&str> {
        self.parent_id
            .as_deref()
            .filter(|parent_id| !parent_id.is_empty() && *parent_id != self.id)
    }

    pub fn is_root(&self) -> bool {
        self.effective_parent_id().is_none()
    }
}
