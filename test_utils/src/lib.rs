use std::fs::{self, read_dir};
use std::path::{Path, PathBuf};
pub mod constants;
use constants::{COMMENT_PREFIX, EXPECTED_DOMINANT_PREFIX, EXPECTED_PREFIX, SEED_PREFIX};

/// A tagging fixture: header lines followed by the text to tag.
///
/// Header lines:
/// - `EXPECTED: <TICKER>` once per expected span, in order (blank for an untagged span)
/// - `EXPECTED_DOMINANT: <TICKER>` the expected dominant ticker (blank for none)
/// - `SEED: <TICKER>` optional inherited ticker
/// - `COMMENT: ...` ignored
#[derive(Debug, Clone)]
pub struct TestFixture {
    pub path: PathBuf,
    pub text: String,
    pub seed_ticker_symbol: String,
    pub expected_span_tickers: Vec<String>,
    pub expected_dominant_ticker: String,
}

fn is_header_line(line: &str) -> bool {
    let line = line.trim_start();

    [
        EXPECTED_DOMINANT_PREFIX,
        EXPECTED_PREFIX,
        SEED_PREFIX,
        COMMENT_PREFIX,
    ]
    .iter()
    .any(|prefix| line.starts_with(prefix))
}

// Helper function to get the values of all header lines with the given prefix
fn get_header_values(content: &str, prefix: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            line.strip_prefix(prefix).map(|value| value.trim().to_string())
        })
        .collect()
}

pub fn load_test_fixture(file_path: &Path) -> TestFixture {
    let content = fs::read_to_string(file_path).expect("Failed to read test file");

    // Filter out header lines
    let text: String = content
        .lines()
        .filter(|line| !is_header_line(line))
        .collect::<Vec<&str>>()
        .join("\n");

    TestFixture {
        path: file_path.to_path_buf(),
        text,
        seed_ticker_symbol: get_header_values(&content, SEED_PREFIX)
            .pop()
            .unwrap_or_default(),
        expected_span_tickers: get_header_values(&content, EXPECTED_PREFIX),
        expected_dominant_ticker: get_header_values(&content, EXPECTED_DOMINANT_PREFIX)
            .pop()
            .unwrap_or_default(),
    }
}

/// All fixture files in `directory`, sorted by path.
pub fn get_test_file_paths(directory: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = read_dir(directory)
        .expect("Failed to read test files directory")
        .map(|entry| entry.expect("Failed to read directory entry").path())
        .filter(|path| path.is_file())
        .collect();

    paths.sort();
    paths
}

/// A scratch directory unique to this process, emptied on creation.
pub fn create_scratch_directory(name: &str) -> PathBuf {
    let directory =
        std::env::temp_dir().join(format!("ticker-splitter-{}-{}", name, std::process::id()));

    let _ = fs::remove_dir_all(&directory);
    fs::create_dir_all(&directory).expect("Failed to create scratch directory");

    directory
}
