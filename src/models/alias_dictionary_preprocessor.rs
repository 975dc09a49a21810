use crate::constants::{ALIAS_DELIMITER, GZIP_FILE_EXTENSION};
use crate::types::{Alias, AliasList, TickerSymbol};
use crate::Error;
use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use log::debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Reads the two-column alias dictionary (ticker, `|`-delimited aliases).
///
/// Any malformed row fails the whole read; no partial alias list is ever returned.
pub struct AliasDictionaryPreprocessor {}

impl AliasDictionaryPreprocessor {
    pub fn read_alias_list_from_string(csv: &str) -> Result<AliasList, Error> {
        Self::read_alias_list_from_reader(Cursor::new(csv))
    }

    pub fn read_alias_list_from_reader<R: Read>(reader: R) -> Result<AliasList, Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true) // Header row is skipped
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::ConfigError(format!("Failed to read headers: {}", e)))?
            .clone();

        if headers.len() < 2 {
            return Err(Error::ConfigError(format!(
                "Missing header row (expected ticker and search terms columns, found {} column(s))",
                headers.len()
            )));
        }

        let mut alias_list = AliasList::new();
        let mut ticker_positions: HashMap<TickerSymbol, usize> = HashMap::new();

        for (row_idx, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                Error::ConfigError(format!("Failed to read record {}: {}", row_idx + 1, e))
            })?;

            let ticker_symbol = record
                .get(0)
                .map(|symbol| symbol.trim())
                .filter(|symbol| !symbol.is_empty())
                .ok_or_else(|| {
                    Error::ConfigError(format!("Missing ticker symbol in record {}", row_idx + 1))
                })?;

            let search_terms = record.get(1).ok_or_else(|| {
                Error::ConfigError(format!("Missing search terms in record {}", row_idx + 1))
            })?;

            let aliases: Vec<Alias> = search_terms
                .split(ALIAS_DELIMITER)
                .filter(|alias| !alias.is_empty())
                .map(|alias| alias.to_string())
                .collect();

            // Rows sharing a ticker are merged into the ticker's first entry
            match ticker_positions.get(ticker_symbol) {
                Some(&position) => alias_list[position].1.extend(aliases),
                None => {
                    ticker_positions.insert(ticker_symbol.to_string(), alias_list.len());
                    alias_list.push((ticker_symbol.to_string(), aliases));
                }
            }
        }

        debug!("Read {} ticker alias groups", alias_list.len());

        Ok(alias_list)
    }

    /// Decompress and parse an alias dictionary from gzip compressed bytes
    pub fn extract_alias_list_from_bytes(read_bytes: &[u8]) -> Result<AliasList, Error> {
        let mut decoder = GzDecoder::new(read_bytes);
        let mut decompressed_data = String::new();
        decoder
            .read_to_string(&mut decompressed_data)
            .map_err(|e| Error::ConfigError(format!("Failed to decompress dictionary: {}", e)))?;

        Self::read_alias_list_from_string(&decompressed_data)
    }

    /// Reads a dictionary from disk, transparently decompressing `*.gz` files.
    pub fn read_alias_list_from_path<P: AsRef<Path>>(path: P) -> Result<AliasList, Error> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            Error::ConfigError(format!("Unable to read search term file {:?}: {}", path, e))
        })?;

        let is_gzip = path
            .extension()
            .map_or(false, |extension| extension == GZIP_FILE_EXTENSION);

        if is_gzip {
            Self::read_alias_list_from_reader(GzDecoder::new(file))
        } else {
            Self::read_alias_list_from_reader(file)
        }
    }
}
