#![allow(unused)] // Ignore due to all constants not being utilized across all environemnts

use std::path::PathBuf;
use std::sync::LazyLock;

macro_rules! define_path {
    ($($segment:expr),*) => {{
        PathBuf::from_iter(vec![$($segment),*])
    }};
}

// Lazy-initialized static variables
pub static TEST_FILES_DIRECTORY: LazyLock<PathBuf> =
    LazyLock::new(|| define_path!("tests", "test_files"));

pub static TEST_SEARCH_TERMS_CSV_PATH: LazyLock<PathBuf> =
    LazyLock::new(|| define_path!("tests", "test_data_files", "test_search_terms.csv"));

pub static EXPECTED_PREFIX: &str = "EXPECTED:";
pub static EXPECTED_DOMINANT_PREFIX: &str = "EXPECTED_DOMINANT:";
pub static SEED_PREFIX: &str = "SEED:";
pub static COMMENT_PREFIX: &str = "COMMENT:";
