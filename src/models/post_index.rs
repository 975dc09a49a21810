use crate::models::ThreadItem;
use crate::types::{ItemId, OutputRow, TimestampMillis};
use std::collections::HashMap;

#[derive(Debug)]
struct PostContext {
    metadata: Vec<String>,
    timestamp_millis: TimestampMillis,
}

/// Submission fields joined into the rows of every comment beneath them.
#[derive(Debug, Default)]
pub struct PostIndex {
    posts: HashMap<ItemId, PostContext>,
    metadata_width: usize,
}

impl PostIndex {
    pub fn from_items(posts: &[ThreadItem]) -> Self {
        let metadata_width = posts
            .iter()
            .map(|post| post.metadata.len())
            .max()
            .unwrap_or(0);

        let mut index = HashMap::with_capacity(posts.len());
        for post in posts {
            // First occurrence wins, matching the resolved ticker map
            index.entry(post.id.clone()).or_insert_with(|| PostContext {
                metadata: post.metadata.clone(),
                timestamp_millis: post.timestamp_millis,
            });
        }

        PostIndex {
            posts: index,
            metadata_width,
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn contains(&self, post_id: &str) -> bool {
        self.posts.contains_key(post_id)
    }

    /// `[post_id, post metadata.., post_timestamp]`.
    ///
    /// Always the same width; fields of an unknown post are left empty.
    pub fn post_columns(&self, post_id: Option<&str>) -> OutputRow {
        let width = self.metadata_width + 2;
        let mut columns = Vec::with_capacity(width);
        columns.push(post_id.unwrap_or_default().to_string());

        match post_id.and_then(|post_id| self.posts.get(post_id)) {
            Some(post) => {
                columns.extend(post.metadata.iter().cloned());
                columns.resize(width - 1, String::new());
                columns.push(post.timestamp_millis.to_string());
            }
            None => columns.resize(width, String::new()),
        }

        columns
    }
}
