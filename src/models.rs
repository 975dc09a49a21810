pub mod alias_dictionary_preprocessor;
pub use alias_dictionary_preprocessor::AliasDictionaryPreprocessor;

pub mod alias_trie;
pub use alias_trie::{AliasConflictPolicy, AliasTrie, AliasTrieConfig, TrieNode};

pub mod boundary_scanner;
pub use boundary_scanner::BoundaryScanner;

pub mod csv_directory_sink;
pub use csv_directory_sink::CsvDirectorySink;

pub mod error;
pub use error::Error;

pub mod memory_sink;
pub use memory_sink::MemorySink;

pub mod post_index;
pub use post_index::PostIndex;

pub mod record_splitter;
pub use record_splitter::{RecordSplitter, RecordSplitterConfig, RowLayout, SplitStats};

pub mod tagged_span;
pub use tagged_span::TaggedSpan;

pub mod thread_item;
pub use thread_item::ThreadItem;

pub mod thread_item_reader;
pub use thread_item_reader::{ItemCsvLayout, ThreadItemReader};

pub mod thread_propagator;
pub use thread_propagator::{OrderingViolationPolicy, Resolution, ThreadPropagator};

pub mod ticker_sink;
pub use ticker_sink::TickerSink;
