use std::collections::HashMap;

// Types listed here are either shared across multiple files and/or exposed via the library.

/// Represents a ticker symbol (e.g., stock ticker) as an owned `String`.
///
/// An empty ticker symbol is meaningful: it tags text which is not attributed to any ticker.
pub type TickerSymbol = String;

/// Represents a borrowed view of a ticker symbol as a `str`.
pub type TickerRef = str;

/// A literal string form under which a ticker may be mentioned in text.
pub type Alias = String;

/// A list of alias groups, where each entry includes:
/// - `TickerSymbol`: The ticker the aliases resolve to.
/// - `Vec<Alias>`: The search terms which identify the ticker.
///
/// Entries are kept in dictionary row order; that order decides cross-ticker collisions.
pub type AliasList = Vec<(TickerSymbol, Vec<Alias>)>;

/// Identifies a thread item (article URL, post id, comment id).
pub type ItemId = String;

/// Milliseconds since the Unix epoch.
pub type TimestampMillis = i64;

/// The dominant ticker resolved for each processed item, keyed by item id.
/// Items without any tagged text map to an empty ticker symbol.
pub type ResolvedTickerMap = HashMap<ItemId, TickerSymbol>;

/// Aggregated span text length (in characters) per non-empty ticker, in order of first
/// appearance.
pub type TickerSpanLengths = Vec<(TickerSymbol, usize)>;

/// A single output row handed to a `TickerSink`.
pub type OutputRow = Vec<String>;
