use crate::types::TickerRef;
use crate::Error;

/// Destination for tagged output rows, one logical stream per ticker.
///
/// Owned by the caller and handed to the splitter, so the engine itself holds no output state.
pub trait TickerSink {
    /// Appends `row` to the stream for `ticker_symbol`, opening it on first use.
    fn write_row(&mut self, ticker_symbol: &TickerRef, row: &[String]) -> Result<(), Error>;

    /// Flushes and closes every opened stream.
    fn finish(&mut self) -> Result<(), Error>;
}
