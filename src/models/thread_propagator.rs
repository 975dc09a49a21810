use crate::models::{AliasTrie, BoundaryScanner, TaggedSpan, ThreadItem};
use crate::types::{
    ItemId, ResolvedTickerMap, TickerRef, TickerSpanLengths, TickerSymbol, TimestampMillis,
};
use crate::utils::{aggregate_ticker_span_lengths, get_dominant_ticker};
use crate::Error;
use log::{debug, warn};
use std::collections::HashMap;

/// What to do when a reply is reached before its parent has been resolved, or carries a
/// timestamp older than its parent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingViolationPolicy {
    /// Log, count, and carry on. A reply whose parent is not resolved yet gets an empty seed.
    Warn,
    /// Fail with `Error::OrderingError`.
    Reject,
}

/// The outcome of scanning one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The ticker the scan started with (inherited from the parent).
    pub seed_ticker_symbol: TickerSymbol,
    /// The ticker with the greatest total span length; empty if nothing was tagged.
    pub dominant_ticker_symbol: TickerSymbol,
    pub ticker_span_lengths: TickerSpanLengths,
    pub spans: Vec<TaggedSpan>,
}

/// Resolves each item's dominant ticker and seeds replies with their parent's.
///
/// Owns the `ResolvedTickerMap` for one run. Items must be resolved parent-first; the map is
/// not synchronized, so concurrent batches each need their own propagator.
pub struct ThreadPropagator<'a> {
    boundary_scanner: BoundaryScanner<'a>,
    ordering_violation_policy: OrderingViolationPolicy,
    resolved_ticker_map: ResolvedTickerMap,
    // Every item announced to this run, resolved or not
    known_timestamps: HashMap<ItemId, TimestampMillis>,
    ordering_violation_count: usize,
}

impl<'a> ThreadPropagator<'a> {
    pub fn new(
        alias_trie: &'a AliasTrie,
        ordering_violation_policy: OrderingViolationPolicy,
    ) -> Self {
        ThreadPropagator {
            boundary_scanner: BoundaryScanner::new(alias_trie),
            ordering_violation_policy,
            resolved_ticker_map: ResolvedTickerMap::new(),
            known_timestamps: HashMap::new(),
            ordering_violation_count: 0,
        }
    }

    /// Scans `item` seeded with `parent_ticker_symbol` and picks its dominant ticker.
    ///
    /// Does not touch the resolved ticker map.
    pub fn resolve(&self, item: &ThreadItem, parent_ticker_symbol: &TickerRef) -> Resolution {
        let spans = self.boundary_scanner.scan(&item.text, parent_ticker_symbol);
        let ticker_span_lengths = aggregate_ticker_span_lengths(&spans);
        let dominant_ticker_symbol = get_dominant_ticker(&ticker_span_lengths);

        Resolution {
            seed_ticker_symbol: parent_ticker_symbol.to_string(),
            dominant_ticker_symbol,
            ticker_span_lengths,
            spans,
        }
    }

    /// Announces items which are about to be resolved so that a reply reached before its
    /// parent can be detected.
    pub fn expect_items(&mut self, items: &[ThreadItem]) {
        for item in items {
            self.known_timestamps
                .entry(item.id.clone())
                .or_insert(item.timestamp_millis);
        }
    }

    /// The parent's resolved ticker, or an empty ticker for roots and unknown parents.
    pub fn parent_ticker_symbol(&self, item: &ThreadItem) -> &TickerRef {
        item.effective_parent_id()
            .and_then(|parent_id| self.resolved_ticker_map.get(parent_id))
            .map_or("", |ticker_symbol| ticker_symbol.as_str())
    }

    /// Resolves `item` with its inherited seed and records its dominant ticker for its
    /// descendants.
    pub fn resolve_and_record(&mut self, item: &ThreadItem) -> Result<Resolution, Error> {
        self.check_parent_order(item)?;

        let resolution = self.resolve(item, self.parent_ticker_symbol(item));

        debug!(
            "Resolved {} (seed {:?}) -> {:?}",
            item.id, resolution.seed_ticker_symbol, resolution.dominant_ticker_symbol
        );

        if self.resolved_ticker_map.contains_key(&item.id) {
            warn!(
                "Item {} was already resolved; keeping its first resolution",
                item.id
            );
        } else {
            self.resolved_ticker_map
                .insert(item.id.clone(), resolution.dominant_ticker_symbol.clone());
            self.known_timestamps
                .entry(item.id.clone())
                .or_insert(item.timestamp_millis);
        }

        Ok(resolution)
    }

    fn check_parent_order(&mut self, item: &ThreadItem) -> Result<(), Error> {
        let parent_id = match item.effective_parent_id() {
            Some(parent_id) => parent_id,
            None => return Ok(()),
        };

        let parent_timestamp = match self.known_timestamps.get(parent_id) {
            Some(&parent_timestamp) => parent_timestamp,
            // Parent is not part of this run at all
            None => return Ok(()),
        };

        let is_parent_resolved = self.resolved_ticker_map.contains_key(parent_id);
        if is_parent_resolved && item.timestamp_millis >= parent_timestamp {
            return Ok(());
        }

        self.ordering_violation_count += 1;

        let (msg, consequence) = if is_parent_resolved {
            (
                format!(
                    "Item {} (t={}) is older than its parent {} (t={})",
                    item.id, item.timestamp_millis, parent_id, parent_timestamp
                ),
                "keeping the inherited seed",
            )
        } else {
            (
                format!(
                    "Item {} (t={}) reached before its parent {} (t={})",
                    item.id, item.timestamp_millis, parent_id, parent_timestamp
                ),
                "scanning with an empty seed",
            )
        };

        match self.ordering_violation_policy {
            OrderingViolationPolicy::Reject => Err(Error::OrderingError(msg)),
            OrderingViolationPolicy::Warn => {
                warn!("{}; {}", msg, consequence);
                Ok(())
            }
        }
    }

    pub fn resolved_ticker_symbol(&self, item_id: &str) -> Option<&TickerRef> {
        self.resolved_ticker_map
            .get(item_id)
            .map(|ticker_symbol| ticker_symbol.as_str())
    }

    pub fn resolved_ticker_map(&self) -> &ResolvedTickerMap {
        &self.resolved_ticker_map
    }

    pub fn ordering_violation_count(&self) -> usize {
        self.ordering_violation_count
    }

    /// Sorts items by timestamp ascending, keeping source order for equal timestamps.
    pub fn sort_by_timestamp(items: &mut [ThreadItem]) {
        items.sort_by_key(|item| item.timestamp_millis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AliasList;
    use crate::DEFAULT_ALIAS_TRIE_CONFIG;

    fn build_trie() -> AliasTrie {
        let alias_list: AliasList = vec![
            (
                "TSLA".to_string(),
                vec!["Tesla".to_string(), "TSLA".to_string()],
            ),
            ("GM".to_string(), vec!["GM".to_string()]),
        ];

        AliasTrie::from_alias_list(&alias_list, DEFAULT_ALIAS_TRIE_CONFIG).unwrap()
    }

    #[test]
    fn test_dominant_ticker_by_span_length() {
        let trie = build_trie();
        let propagator = ThreadPropagator::new(&trie, OrderingViolationPolicy::Warn);

        // "TSLA is great news" + " " = 20 chars, "GM ok" = 5 chars
        let item = ThreadItem::new("p1", None, "TSLA is great news, GM ok", 0);
        let resolution = propagator.resolve(&item, "");

        assert_eq!(
            resolution.ticker_span_lengths,
            vec![("TSLA".to_string(), 20), ("GM".to_string(), 5)]
        );
        assert_eq!(resolution.dominant_ticker_symbol, "TSLA");
    }

    #[test]
    fn test_reply_inherits_parent_ticker() {
        let trie = build_trie();
        let mut propagator = ThreadPropagator::new(&trie, OrderingViolationPolicy::Warn);

        let post = ThreadItem::new("p1", None, "Tesla deliveries are out", 1_000);
        let reply = ThreadItem::new("c1", Some("p1"), "Huge numbers, to the moon", 2_000);
        let nested = ThreadItem::new("c2", Some("c1"), "agreed", 3_000);

        propagator.resolve_and_record(&post).unwrap();
        let reply_resolution = propagator.resolve_and_record(&reply).unwrap();
        let nested_resolution = propagator.resolve_and_record(&nested).unwrap();

        assert_eq!(reply_resolution.seed_ticker_symbol, "TSLA");
        assert_eq!(
            reply_resolution.spans,
            vec![TaggedSpan::new(
                "TSLA".to_string(),
                "Huge numbers, to the moon".to_string()
            )]
        );
        assert_eq!(nested_resolution.dominant_ticker_symbol, "TSLA");
        assert_eq!(propagator.resolved_ticker_symbol("c2"), Some("TSLA"));
    }

    #[test]
    fn test_untagged_item_records_empty_ticker() {
        let trie = build_trie();
        let mut propagator = ThreadPropagator::new(&trie, OrderingViolationPolicy::Warn);

        let post = ThreadItem::new("p1", None, "Nothing relevant", 0);
        let reply = ThreadItem::new("c1", Some("p1"), "Still nothing", 1);

        propagator.resolve_and_record(&post).unwrap();
        let resolution = propagator.resolve_and_record(&reply).unwrap();

        assert_eq!(propagator.resolved_ticker_symbol("p1"), Some(""));
        assert_eq!(resolution.seed_ticker_symbol, "");
        assert_eq!(resolution.dominant_ticker_symbol, "");
    }

    #[test]
    fn test_missing_parent_means_empty_seed() {
        let trie = build_trie();
        let mut propagator = ThreadPropagator::new(&trie, OrderingViolationPolicy::Reject);

        let orphan = ThreadItem::new("c1", Some("gone"), "GM again", 0);
        let resolution = propagator.resolve_and_record(&orphan).unwrap();

        assert_eq!(resolution.seed_ticker_symbol, "");
        assert_eq!(resolution.dominant_ticker_symbol, "GM");
        assert_eq!(propagator.ordering_violation_count(), 0);
    }

    #[test]
    fn test_reply_before_parent_is_counted() {
        let trie = build_trie();
        let mut propagator = ThreadPropagator::new(&trie, OrderingViolationPolicy::Warn);

        let post = ThreadItem::new("p1", None, "Tesla", 5_000);
        let reply = ThreadItem::new("c1", Some("p1"), "nice", 1_000);
        propagator.expect_items(&[post.clone(), reply.clone()]);

        let resolution = propagator.resolve_and_record(&reply).unwrap();

        assert_eq!(resolution.seed_ticker_symbol, "");
        assert_eq!(propagator.ordering_violation_count(), 1);
    }

    #[test]
    fn test_reply_before_parent_is_rejected() {
        let trie = build_trie();
        let mut propagator = ThreadPropagator::new(&trie, OrderingViolationPolicy::Reject);

        let post = ThreadItem::new("p1", None, "Tesla", 5_000);
        let reply = ThreadItem::new("c1", Some("p1"), "nice", 1_000);
        propagator.expect_items(&[post, reply.clone()]);

        let result = propagator.resolve_and_record(&reply);
        assert!(matches!(result, Err(Error::OrderingError(_))));
    }

    #[test]
    fn test_reply_older_than_resolved_parent_is_counted() {
        let trie = build_trie();
        let mut propagator = ThreadPropagator::new(&trie, OrderingViolationPolicy::Warn);

        let post = ThreadItem::new("p1", None, "Tesla", 5_000);
        let reply = ThreadItem::new("c1", Some("p1"), "nice", 1_000);
        let sibling = ThreadItem::new("c2", Some("p1"), "same time", 5_000);

        propagator.resolve_and_record(&post).unwrap();
        let resolution = propagator.resolve_and_record(&reply).unwrap();
        propagator.resolve_and_record(&sibling).unwrap();

        assert_eq!(resolution.seed_ticker_symbol, "TSLA");
        assert_eq!(propagator.ordering_violation_count(), 1);
    }

    #[test]
    fn test_reply_older_than_resolved_parent_is_rejected() {
        let trie = build_trie();
        let mut propagator = ThreadPropagator::new(&trie, OrderingViolationPolicy::Reject);

        propagator
            .resolve_and_record(&ThreadItem::new("p1", None, "Tesla", 5_000))
            .unwrap();
        let reply = ThreadItem::new("c1", Some("p1"), "nice", 1_000);
        let result = propagator.resolve_and_record(&reply);

        assert!(matches!(result, Err(Error::OrderingError(_))));
        assert_eq!(propagator.resolved_ticker_symbol("c1"), None);
    }

    #[test]
    fn test_first_resolution_is_kept() {
        let trie = build_trie();
        let mut propagator = ThreadPropagator::new(&trie, OrderingViolationPolicy::Warn);

        propagator
            .resolve_and_record(&ThreadItem::new("p1", None, "Tesla", 0))
            .unwrap();
        propagator
            .resolve_and_record(&ThreadItem::new("p1", None, "GM", 1))
            .unwrap();

        assert_eq!(propagator.resolved_ticker_symbol("p1"), Some("TSLA"));
    }

    #[test]
    fn test_sort_by_timestamp_is_stable() {
        let mut items = vec![
            ThreadItem::new("c3", Some("p1"), "", 30),
            ThreadItem::new("c1", Some("p1"), "", 10),
            ThreadItem::new("c2a", Some("c1"), "", 20),
            ThreadItem::new("c2b", Some("c1"), "", 20),
        ];
        ThreadPropagator::sort_by_timestamp(&mut items);

        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2a", "c2b", "c3"]);
    }
}
