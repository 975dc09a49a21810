pub mod aggregate_ticker_span_lengths;
pub use aggregate_ticker_span_lengths::aggregate_ticker_span_lengths;

pub mod get_dominant_ticker;
pub use get_dominant_ticker::get_dominant_ticker;

pub mod normalize_parent_id;
pub use normalize_parent_id::normalize_parent_id;
