use crate::models::{
    AliasConflictPolicy, AliasTrieConfig, ItemCsvLayout, OrderingViolationPolicy,
    RecordSplitterConfig,
};

pub const DEFAULT_ALIAS_TRIE_CONFIG: &AliasTrieConfig = &AliasTrieConfig {
    conflict_policy: AliasConflictPolicy::LastWriteWins,
};

pub const DEFAULT_RECORD_SPLITTER_CONFIG: &RecordSplitterConfig = &RecordSplitterConfig {
    ordering_violation_policy: OrderingViolationPolicy::Warn,
};

pub const NEWS_ARTICLE_LAYOUT: &ItemCsvLayout = &ItemCsvLayout {
    id_column: "url",
    parent_id_column: None,
    text_columns: &["title", "body"],
    timestamp_column: "datetime",
    metadata_columns: &["domain"],
    post_id_column: None,
};

pub const REDDIT_SUBMISSION_LAYOUT: &ItemCsvLayout = &ItemCsvLayout {
    id_column: "id",
    parent_id_column: None,
    text_columns: &["title", "body"],
    timestamp_column: "dt",
    metadata_columns: &["domain", "flair", "subreddit", "score", "downs"],
    post_id_column: None,
};

pub const REDDIT_COMMENT_LAYOUT: &ItemCsvLayout = &ItemCsvLayout {
    id_column: "id",
    parent_id_column: Some("parent_id"),
    text_columns: &["body"],
    timestamp_column: "dt",
    metadata_columns: &["score"],
    post_id_column: Some("post_id"),
};
