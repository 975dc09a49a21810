use crate::models::AliasDictionaryPreprocessor;
use crate::types::{AliasList, TickerRef, TickerSymbol};
use crate::Error;
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// How to handle two different tickers claiming the same alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasConflictPolicy {
    /// The ticker inserted last (by dictionary row order) keeps the alias. Every collision is
    /// logged and counted.
    LastWriteWins,
    /// The first collision fails the build with `Error::ConfigError`.
    Reject,
}

#[derive(Debug, Clone)]
pub struct AliasTrieConfig {
    pub conflict_policy: AliasConflictPolicy,
}

/// A single node of the alias prefix tree.
#[derive(Debug, Default)]
pub struct TrieNode {
    children: HashMap<char, TrieNode>,
    ticker_symbol: Option<TickerSymbol>,
}

impl TrieNode {
    /// Follows the edge labelled `c`, if there is one.
    pub fn child(&self, c: char) -> Option<&TrieNode> {
        self.children.get(&c)
    }

    /// The ticker of the alias which ends at this node, if any.
    pub fn terminal_ticker(&self) -> Option<&TickerRef> {
        self.ticker_symbol.as_deref()
    }

    fn count_nodes(&self) -> usize {
        1 + self
            .children
            .values()
            .map(|child| child.count_nodes())
            .sum::<usize>()
    }
}

/// Prefix tree mapping alias character sequences to ticker symbols.
///
/// Built once and immutable afterwards, so a single instance can be shared across any number
/// of concurrent scans.
#[derive(Debug, Default)]
pub struct AliasTrie {
    root: TrieNode,
    alias_count: usize,
    ticker_count: usize,
    conflict_count: usize,
}

impl AliasTrie {
    pub fn from_alias_list(
        alias_list: &AliasList,
        config: &AliasTrieConfig,
    ) -> Result<Self, Error> {
        let mut trie = AliasTrie::default();

        for (ticker_symbol, aliases) in alias_list {
            if ticker_symbol.is_empty() {
                return Err(Error::ConfigError(
                    "Ticker symbols must not be empty".to_string(),
                ));
            }

            // Shorter aliases first; only matters for same-ticker duplicates
            let mut aliases: Vec<&str> = aliases
                .iter()
                .map(|alias| alias.as_str())
                .filter(|alias| !alias.is_empty())
                .collect();
            aliases.sort_by_key(|alias| alias.chars().count());

            for alias in aliases {
                trie.insert(ticker_symbol, alias, config)?;
            }
        }

        trie.ticker_count = alias_list
            .iter()
            .map(|(ticker_symbol, _)| ticker_symbol)
            .collect::<HashSet<_>>()
            .len();

        info!(
            "Built alias trie: {} tickers, {} aliases, {} nodes, {} conflicts",
            trie.ticker_count,
            trie.alias_count,
            trie.node_count(),
            trie.conflict_count
        );

        Ok(trie)
    }

    pub fn from_path<P: AsRef<Path>>(path: P, config: &AliasTrieConfig) -> Result<Self, Error> {
        let alias_list = AliasDictionaryPreprocessor::read_alias_list_from_path(path)?;

        Self::from_alias_list(&alias_list, config)
    }

    fn insert(
        &mut self,
        ticker_symbol: &TickerRef,
        alias: &str,
        config: &AliasTrieConfig,
    ) -> Result<(), Error> {
        let mut node = &mut self.root;
        for c in alias.chars() {
            node = node.children.entry(c).or_default();
        }

        match node.ticker_symbol.as_deref() {
            Some(existing) if existing != ticker_symbol => {
                self.conflict_count += 1;

                match config.conflict_policy {
                    AliasConflictPolicy::Reject => {
                        return Err(Error::ConfigError(format!(
                            "Alias {:?} is claimed by both {} and {}",
                            alias, existing, ticker_symbol
                        )));
                    }
                    AliasConflictPolicy::LastWriteWins => {
                        warn!(
                            "Alias {:?} reassigned from {} to {}",
                            alias, existing, ticker_symbol
                        );
                    }
                }
            }
            Some(_) => {}
            None => self.alias_count += 1,
        }

        node.ticker_symbol = Some(ticker_symbol.to_string());

        Ok(())
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    pub fn child<'a>(&self, node: &'a TrieNode, c: char) -> Option<&'a TrieNode> {
        node.child(c)
    }

    pub fn is_terminal<'a>(&self, node: &'a TrieNode) -> Option<&'a TickerRef> {
        node.terminal_ticker()
    }

    /// Number of distinct alias strings stored.
    pub fn alias_count(&self) -> usize {
        self.alias_count
    }

    pub fn ticker_count(&self) -> usize {
        self.ticker_count
    }

    pub fn conflict_count(&self) -> usize {
        self.conflict_count
    }

    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }

    pub fn is_empty(&self) -> bool {
        self.alias_count == 0
    }
}
