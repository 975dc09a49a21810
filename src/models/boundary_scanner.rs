use crate::constants::{END_PHRASE_CHARS, START_PHRASE_CHARS};
use crate::models::{AliasTrie, TaggedSpan};
use crate::types::{TickerRef, TickerSymbol};

/// Segments text into ticker-attributed spans in a single left-to-right pass.
///
/// An alias only counts when it starts at the beginning of the text or right after one of
/// `START_PHRASE_CHARS`, and ends at the end of the text or right before one of
/// `END_PHRASE_CHARS`. At each start position the longest such alias wins; rejected
/// positions are never retried from another offset inside the same word.
pub struct BoundaryScanner<'a> {
    alias_trie: &'a AliasTrie,
}

impl<'a> BoundaryScanner<'a> {
    pub fn new(alias_trie: &'a AliasTrie) -> Self {
        BoundaryScanner { alias_trie }
    }

    /// Scans `text`, starting out attributed to `seed_ticker_symbol` (which may be empty).
    ///
    /// The current ticker only changes at a recognized alias. When no ticker has been seen
    /// yet, the first matched ticker claims everything before it as well.
    pub fn scan(&self, text: &str, seed_ticker_symbol: &TickerRef) -> Vec<TaggedSpan> {
        let chars: Vec<char> = text.chars().collect();
        let byte_offsets: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();

        let mut spans = Vec::new();
        let mut current_ticker_symbol: TickerSymbol = seed_ticker_symbol.to_string();

        // Byte offset where the pending (not yet emitted) span begins
        let mut working_start = 0;
        let mut is_valid_start = true;

        for (char_idx, c) in chars.iter().enumerate() {
            if is_valid_start {
                if let Some(matched_ticker_symbol) = self.longest_match_at(&chars, char_idx) {
                    if current_ticker_symbol.is_empty() {
                        current_ticker_symbol = matched_ticker_symbol.to_string();
                    } else if current_ticker_symbol != matched_ticker_symbol {
                        let byte_offset = byte_offsets[char_idx];

                        let previous_ticker_symbol = std::mem::replace(
                            &mut current_ticker_symbol,
                            matched_ticker_symbol.to_string(),
                        );

                        // Nothing is pending when the seed is overridden at the first char
                        if byte_offset > working_start {
                            spans.push(TaggedSpan::new(
                                previous_ticker_symbol,
                                text[working_start..byte_offset].to_string(),
                            ));
                        }

                        working_start = byte_offset;
                    }
                }
            }

            is_valid_start = START_PHRASE_CHARS.contains(c);
        }

        if working_start < text.len() {
            spans.push(TaggedSpan::new(
                current_ticker_symbol,
                text[working_start..].to_string(),
            ));
        }

        spans
    }

    /// Walks the trie from `start` for as long as it has edges, returning the ticker of the
    /// longest alias which ends on a phrase boundary.
    ///
    /// Each call uses its own cursor; no walk state survives between start positions.
    pub fn longest_match_at(&self, chars: &[char], start: usize) -> Option<&'a TickerRef> {
        let mut node = self.alias_trie.root();
        let mut candidate = None;

        for (char_idx, &c) in chars.iter().enumerate().skip(start) {
            node = match self.alias_trie.child(node, c) {
                Some(child) => child,
                None => break,
            };

            let is_end_boundary = chars
                .get(char_idx + 1)
                .map_or(true, |next| END_PHRASE_CHARS.contains(next));

            if is_end_boundary {
                if let Some(ticker_symbol) = self.alias_trie.is_terminal(node) {
                    candidate = Some(ticker_symbol);
                }
            }
        }

        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AliasList;
    use crate::DEFAULT_ALIAS_TRIE_CONFIG;

    fn build_trie(entries: &[(&str, Vec<&str>)]) -> AliasTrie {
        let alias_list: AliasList = entries
            .iter()
            .map(|(ticker, aliases)| {
                (
                    ticker.to_string(),
                    aliases.iter().map(|alias| alias.to_string()).collect(),
                )
            })
            .collect();

        AliasTrie::from_alias_list(&alias_list, DEFAULT_ALIAS_TRIE_CONFIG).unwrap()
    }

    fn span_pairs(spans: &[TaggedSpan]) -> Vec<(&str, &str)> {
        spans
            .iter()
            .map(|span| (span.ticker_symbol.as_str(), span.text.as_str()))
            .collect()
    }

    fn reconstruct(spans: &[TaggedSpan]) -> String {
        spans.iter().map(|span| span.text.as_str()).collect()
    }

    #[test]
    fn test_alias_followed_by_period_matches() {
        let trie = build_trie(&[("AOS", vec!["AOS"])]);
        let scanner = BoundaryScanner::new(&trie);

        assert_eq!(
            span_pairs(&scanner.scan("I like AOS.", "")),
            vec![("AOS", "I like AOS.")]
        );
        assert_eq!(
            span_pairs(&scanner.scan("I like AOS.", "GM")),
            vec![("GM", "I like "), ("AOS", "AOS.")]
        );
    }

    #[test]
    fn test_alias_without_end_boundary_does_not_match() {
        let trie = build_trie(&[("AOS", vec!["AOS"])]);
        let scanner = BoundaryScanner::new(&trie);

        assert_eq!(
            span_pairs(&scanner.scan("I like AOSX.", "")),
            vec![("", "I like AOSX.")]
        );
        assert_eq!(
            span_pairs(&scanner.scan("I like AOSX.", "GM")),
            vec![("GM", "I like AOSX.")]
        );
    }

    #[test]
    fn test_alias_without_start_boundary_does_not_match() {
        let trie = build_trie(&[("AAPL", vec!["pple"])]);
        let scanner = BoundaryScanner::new(&trie);

        assert_eq!(
            span_pairs(&scanner.scan("Apple.", "")),
            vec![("", "Apple.")]
        );
    }

    #[test]
    fn test_longest_match_wins() {
        let trie = build_trie(&[("AAPL", vec!["Apple"]), ("AAPL2", vec!["Apple Inc"])]);
        let scanner = BoundaryScanner::new(&trie);

        assert_eq!(
            span_pairs(&scanner.scan("(Apple Inc)", "")),
            vec![("AAPL2", "(Apple Inc)")]
        );
        assert_eq!(
            span_pairs(&scanner.scan("(Apple Inc)", "MSFT")),
            vec![("MSFT", "("), ("AAPL2", "Apple Inc)")]
        );
    }

    #[test]
    fn test_shorter_candidate_kept_when_longer_walk_fails() {
        let trie = build_trie(&[("AAPL", vec!["Apple"]), ("AAPL2", vec!["Apple Inc"])]);
        let scanner = BoundaryScanner::new(&trie);

        assert_eq!(
            span_pairs(&scanner.scan("Apple Ink", "MSFT")),
            vec![("AAPL", "Apple Ink")]
        );
    }

    #[test]
    fn test_ticker_changes_split_spans() {
        let trie = build_trie(&[("TSLA", vec!["Tesla"]), ("GM", vec!["General Motors"])]);
        let scanner = BoundaryScanner::new(&trie);

        let text = "Tesla beat estimates while General Motors lagged. Tesla again!";
        let spans = scanner.scan(text, "");

        assert_eq!(
            span_pairs(&spans),
            vec![
                ("TSLA", "Tesla beat estimates while "),
                ("GM", "General Motors lagged. "),
                ("TSLA", "Tesla again!"),
            ]
        );
        assert_eq!(reconstruct(&spans), text);
    }

    #[test]
    fn test_repeated_ticker_extends_span() {
        let trie = build_trie(&[("TSLA", vec!["Tesla", "TSLA"])]);
        let scanner = BoundaryScanner::new(&trie);

        assert_eq!(
            span_pairs(&scanner.scan("Tesla and TSLA\tand \"Tesla\"", "")),
            vec![("TSLA", "Tesla and TSLA\tand \"Tesla\"")]
        );
    }

    #[test]
    fn test_leading_text_joins_first_ticker_without_seed() {
        let trie = build_trie(&[("GM", vec!["GM"])]);
        let scanner = BoundaryScanner::new(&trie);

        assert_eq!(
            span_pairs(&scanner.scan("Thoughts on GM?", "")),
            vec![("GM", "Thoughts on GM?")]
        );
    }

    #[test]
    fn test_seed_overridden_at_first_char_emits_no_empty_span() {
        let trie = build_trie(&[("GM", vec!["GM"])]);
        let scanner = BoundaryScanner::new(&trie);

        assert_eq!(
            span_pairs(&scanner.scan("GM: buy", "TSLA")),
            vec![("GM", "GM: buy")]
        );
    }

    #[test]
    fn test_empty_text_yields_no_spans() {
        let trie = build_trie(&[("GM", vec!["GM"])]);
        let scanner = BoundaryScanner::new(&trie);

        assert!(scanner.scan("", "").is_empty());
        assert!(scanner.scan("", "TSLA").is_empty());
    }

    #[test]
    fn test_empty_dictionary_returns_single_seed_span() {
        let trie = build_trie(&[]);
        let scanner = BoundaryScanner::new(&trie);

        assert_eq!(
            span_pairs(&scanner.scan("Nothing to see here.", "")),
            vec![("", "Nothing to see here.")]
        );
        assert_eq!(
            span_pairs(&scanner.scan("Nothing to see here.", "TSLA")),
            vec![("TSLA", "Nothing to see here.")]
        );
    }

    #[test]
    fn test_inherited_seed_without_mention_is_single_span() {
        let trie = build_trie(&[("GM", vec!["GM"])]);
        let scanner = BoundaryScanner::new(&trie);

        assert_eq!(
            span_pairs(&scanner.scan("To the moon with this one", "TSLA")),
            vec![("TSLA", "To the moon with this one")]
        );
    }

    #[test]
    fn test_multibyte_text_reconstructs() {
        let trie = build_trie(&[("NSRGY", vec!["Nestlé"]), ("GM", vec!["GM"])]);
        let scanner = BoundaryScanner::new(&trie);

        let text = "Prix de Nestlé: ↑ 3 % — GM flat";
        let spans = scanner.scan(text, "X");

        assert_eq!(
            span_pairs(&spans),
            vec![
                ("X", "Prix de "),
                ("NSRGY", "Nestlé: ↑ 3 % — "),
                ("GM", "GM flat"),
            ]
        );
        assert_eq!(reconstruct(&spans), text);
    }

    #[test]
    fn test_span_retagged_in_isolation_is_unchanged() {
        let trie = build_trie(&[("TSLA", vec!["Tesla"]), ("GM", vec!["GM"])]);
        let scanner = BoundaryScanner::new(&trie);

        let spans = scanner.scan("Tesla rallied. GM slipped (GM) today. Tesla", "");
        assert_eq!(spans.len(), 3);

        for span in &spans {
            let retagged = scanner.scan(&span.text, &span.ticker_symbol);
            assert_eq!(retagged, vec![span.clone()]);
        }
    }

    #[test]
    fn test_longest_match_at_reports_boundary_aligned_ticker() {
        let trie = build_trie(&[("AOS", vec!["AOS", "A. O. Smith"])]);
        let scanner = BoundaryScanner::new(&trie);

        let chars: Vec<char> = "A. O. Smith Corporation".chars().collect();
        assert_eq!(scanner.longest_match_at(&chars, 0), Some("AOS"));
        assert_eq!(scanner.longest_match_at(&chars, 3), None);
    }
}
