mod config;
pub use config::{
    DEFAULT_ALIAS_TRIE_CONFIG, DEFAULT_RECORD_SPLITTER_CONFIG, NEWS_ARTICLE_LAYOUT,
    REDDIT_COMMENT_LAYOUT, REDDIT_SUBMISSION_LAYOUT,
};
pub mod constants;
pub mod models;
pub use models::{
    AliasConflictPolicy, AliasDictionaryPreprocessor, AliasTrie, AliasTrieConfig,
    BoundaryScanner, CsvDirectorySink, Error, ItemCsvLayout, MemorySink,
    OrderingViolationPolicy, PostIndex, RecordSplitter, RecordSplitterConfig, Resolution,
    RowLayout, SplitStats, TaggedSpan, ThreadItem, ThreadItemReader, ThreadPropagator, TickerSink,
};
pub mod types;
mod utils;
pub use types::{
    Alias, AliasList, ItemId, OutputRow, ResolvedTickerMap, TickerRef, TickerSymbol,
    TimestampMillis,
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

/// Tags `text` against an already built alias trie, starting from `seed_ticker_symbol`
/// (pass `""` for none).
pub fn tag_text(
    text: &str,
    seed_ticker_symbol: &TickerRef,
    alias_trie: &AliasTrie,
) -> Vec<TaggedSpan> {
    BoundaryScanner::new(alias_trie).scan(text, seed_ticker_symbol)
}

/// Builds a trie from `alias_list` with the default config and tags `text` with it.
///
/// Prefer building the trie once and calling `tag_text` when tagging many documents.
pub fn tag_text_with_alias_list(
    text: &str,
    seed_ticker_symbol: &TickerRef,
    alias_list: &AliasList,
) -> Result<Vec<TaggedSpan>, Error> {
    let alias_trie = AliasTrie::from_alias_list(alias_list, DEFAULT_ALIAS_TRIE_CONFIG)?;

    Ok(tag_text(text, seed_ticker_symbol, &alias_trie))
}
