use crate::types::{TickerSpanLengths, TickerSymbol};

/// Picks the ticker with the strictly greatest aggregate length.
///
/// Ties go to the ticker which appeared first. Returns an empty ticker symbol when nothing has
/// a positive length.
pub fn get_dominant_ticker(ticker_span_lengths: &TickerSpanLengths) -> TickerSymbol {
    let mut max_length = 0;
    let mut dominant_ticker_symbol = "";

    for (ticker_symbol, length) in ticker_span_lengths {
        if *length > max_length {
            max_length = *length;
            dominant_ticker_symbol = ticker_symbol;
        }
    }

    dominant_ticker_symbol.to_string()
}
