use crate::models::TaggedSpan;
use crate::types::TickerSpanLengths;

/// Sums span text lengths (in characters) per non-empty ticker, in order of first appearance.
pub fn aggregate_ticker_span_lengths(spans: &[TaggedSpan]) -> TickerSpanLengths {
    let mut ticker_span_lengths = TickerSpanLengths::new();

    for span in spans.iter().filter(|span| span.is_tagged()) {
        let span_length = span.char_len();

        match ticker_span_lengths
            .iter_mut()
            .find(|(ticker_symbol, _)| *ticker_symbol == span.ticker_symbol)
        {
            Some((_, total_length)) => *total_length += span_length,
            None => ticker_span_lengths.push((span.ticker_symbol.clone(), span_length)),
        }
    }

    ticker_span_lengths
}
