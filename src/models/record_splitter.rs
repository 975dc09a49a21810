use crate::models::{
    AliasTrie, OrderingViolationPolicy, PostIndex, TaggedSpan, ThreadItem, ThreadPropagator,
    TickerSink,
};
use crate::types::{OutputRow, TickerRef};
use crate::Error;
use log::{debug, info};

pub struct RecordSplitterConfig {
    pub ordering_violation_policy: OrderingViolationPolicy,
}

/// Counters for one split batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitStats {
    pub items: usize,
    /// Items scanned with a non-empty inherited ticker.
    pub seeded_items: usize,
    /// Items which resolved to a non-empty dominant ticker.
    pub tagged_items: usize,
    pub rows_written: usize,
    pub ordering_violations: usize,
}

/// Column layout of every row written for one batch.
///
/// A batch uses a single layout, so rows for the same ticker always have the same width
/// whether they came from a root or a reply.
#[derive(Debug, Clone, Copy)]
pub enum RowLayout<'p> {
    /// `[id, text, metadata.., timestamp]`
    Root,
    /// `[id, text, timestamp, parent_id, seed_ticker, metadata..]`
    ///
    /// Roots in the batch get empty `parent_id` and `seed_ticker` fields.
    Reply,
    /// `Reply` followed by `[post_id, post metadata.., post_timestamp]`.
    ReplyWithPost(&'p PostIndex),
}

impl RowLayout<'_> {
    pub fn output_row(
        &self,
        item: &ThreadItem,
        span: &TaggedSpan,
        seed_ticker_symbol: &TickerRef,
    ) -> OutputRow {
        let mut row = vec![item.id.clone(), span.text.clone()];

        match self {
            RowLayout::Root => {
                row.extend(item.metadata.iter().cloned());
                row.push(item.timestamp_millis.to_string());
            }
            RowLayout::Reply | RowLayout::ReplyWithPost(_) => {
                row.push(item.timestamp_millis.to_string());
                row.push(item.parent_id.clone().unwrap_or_default());
                row.push(seed_ticker_symbol.to_string());
                row.extend(item.metadata.iter().cloned());
            }
        }

        if let RowLayout::ReplyWithPost(post_index) = self {
            row.extend(post_index.post_columns(item.post_id.as_deref()));
        }

        row
    }
}

/// Drives tagging for batches of thread items and routes tagged spans to a `TickerSink`.
pub struct RecordSplitter<'a> {
    config: &'a RecordSplitterConfig,
    alias_trie: &'a AliasTrie,
}

impl<'a> RecordSplitter<'a> {
    pub fn new(config: &'a RecordSplitterConfig, alias_trie: &'a AliasTrie) -> Self {
        RecordSplitter { config, alias_trie }
    }

    /// A fresh propagator (with its own resolved ticker map) for one run.
    pub fn propagator(&self) -> ThreadPropagator<'a> {
        ThreadPropagator::new(self.alias_trie, self.config.ordering_violation_policy)
    }

    /// Splits one homogeneous batch.
    ///
    /// Roots are resolved first in source order with an empty seed, then the remaining items
    /// by ascending timestamp, each seeded with its parent's resolved ticker. Untagged spans
    /// produce no rows, but every item still lands in the propagator's map.
    pub fn split_batch<S: TickerSink + ?Sized>(
        &self,
        propagator: &mut ThreadPropagator<'a>,
        items: Vec<ThreadItem>,
        row_layout: RowLayout<'_>,
        sink: &mut S,
    ) -> Result<SplitStats, Error> {
        let (roots, mut replies): (Vec<ThreadItem>, Vec<ThreadItem>) =
            items.into_iter().partition(|item| item.is_root());

        propagator.expect_items(&roots);
        propagator.expect_items(&replies);

        ThreadPropagator::sort_by_timestamp(&mut replies);

        let violations_before = propagator.ordering_violation_count();
        let mut stats = SplitStats::default();

        for item in roots.iter().chain(replies.iter()) {
            self.split_item(propagator, item, row_layout, sink, &mut stats)?;
        }

        stats.ordering_violations = propagator.ordering_violation_count() - violations_before;

        info!(
            "Split {} items ({} roots, {} seeded, {} tagged): {} rows written, {} ordering violations",
            stats.items,
            roots.len(),
            stats.seeded_items,
            stats.tagged_items,
            stats.rows_written,
            stats.ordering_violations
        );

        Ok(stats)
    }

    fn split_item<S: TickerSink + ?Sized>(
        &self,
        propagator: &mut ThreadPropagator<'a>,
        item: &ThreadItem,
        row_layout: RowLayout<'_>,
        sink: &mut S,
        stats: &mut SplitStats,
    ) -> Result<(), Error> {
        let resolution = propagator.resolve_and_record(item)?;

        stats.items += 1;
        if !resolution.seed_ticker_symbol.is_empty() {
            stats.seeded_items += 1;
        }
        if !resolution.dominant_ticker_symbol.is_empty() {
            stats.tagged_items += 1;
        }

        for span in resolution.spans.iter().filter(|span| span.is_tagged()) {
            let row = row_layout.output_row(item, span, &resolution.seed_ticker_symbol);
            sink.write_row(&span.ticker_symbol, &row)?;
            stats.rows_written += 1;
        }

        debug!(
            "Item {}: {} spans, dominant {:?}",
            item.id,
            resolution.spans.len(),
            resolution.dominant_ticker_symbol
        );

        Ok(())
    }

    /// News flow: every item is a root; the sink is finished afterwards.
    pub fn split_articles<S: TickerSink + ?Sized>(
        &self,
        items: Vec<ThreadItem>,
        sink: &mut S,
    ) -> Result<SplitStats, Error> {
        let mut propagator = self.propagator();

        let stats = self.split_batch(&mut propagator, items, RowLayout::Root, sink)?;
        sink.finish()?;

        Ok(stats)
    }

    /// Submissions-then-comments flow sharing a single resolved ticker map, so that comments
    /// inherit from their post or parent comment. Comment rows carry their submission's
    /// fields. Both sinks are finished afterwards.
    pub fn split_threads<P, C>(
        &self,
        posts: Vec<ThreadItem>,
        comments: Vec<ThreadItem>,
        post_sink: &mut P,
        comment_sink: &mut C,
    ) -> Result<(SplitStats, SplitStats), Error>
    where
        P: TickerSink + ?Sized,
        C: TickerSink + ?Sized,
    {
        let mut propagator = self.propagator();
        let post_index = PostIndex::from_items(&posts);

        let post_stats = self.split_batch(&mut propagator, posts, RowLayout::Root, post_sink)?;
        post_sink.finish()?;

        info!(
            "Sorting {} comments ({} posts indexed)",
            comments.len(),
            post_index.len()
        );
        let comment_stats = self.split_batch(
            &mut propagator,
            comments,
            RowLayout::ReplyWithPost(&post_index),
            comment_sink,
        )?;
        comment_sink.finish()?;

        info!(
            "{} inherited matches of {} comments",
            comment_stats.seeded_items, comment_stats.items
        );

        Ok((post_stats, comment_stats))
    }
}
