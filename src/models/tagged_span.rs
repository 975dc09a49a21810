use crate::types::TickerSymbol;

/// A contiguous piece of scanned text attributed to a single ticker.
///
/// Spans produced by one scan concatenate back to the scanned text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSpan {
    /// Empty when the text is not attributed to any ticker.
    pub ticker_symbol: TickerSymbol,
    pub text: String,
}

impl TaggedSpan {
    pub fn new(ticker_symbol: TickerSymbol, text: String) -> Self {
        TaggedSpan {
            ticker_symbol,
            text,
        }
    }

    pub fn is_tagged(&self) -> bool {
        !self.ticker_symbol.is_empty()
    }

    /// Length of the span text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
