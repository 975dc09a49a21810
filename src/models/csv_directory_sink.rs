use crate::constants::OUTPUT_FILE_EXTENSION;
use crate::models::TickerSink;
use crate::types::{TickerRef, TickerSymbol};
use crate::Error;
use csv::{Writer, WriterBuilder};
use log::{debug, info};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Writes one `<directory>/<TICKER>.csv` file per ticker.
///
/// Files are opened lazily in append mode, so running twice against the same directory
/// accumulates duplicate rows. Truncate the directory first if that matters.
pub struct CsvDirectorySink {
    directory: PathBuf,
    writers: HashMap<TickerSymbol, Writer<File>>,
}

impl CsvDirectorySink {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        CsvDirectorySink {
            directory: directory.as_ref().to_path_buf(),
            writers: HashMap::new(),
        }
    }

    /// Path of the output file for `ticker_symbol`, rejecting symbols which would escape
    /// the output directory.
    pub fn ticker_file_path(&self, ticker_symbol: &TickerRef) -> Result<PathBuf, Error> {
        let is_unsafe = ticker_symbol.is_empty()
            || ticker_symbol == "."
            || ticker_symbol.contains("..")
            || ticker_symbol.contains(|c: char| c == '/' || c == '\\');

        if is_unsafe {
            return Err(Error::OutputWriteError(format!(
                "Ticker symbol {:?} cannot be used as a file name",
                ticker_symbol
            )));
        }

        Ok(self
            .directory
            .join(format!("{}.{}", ticker_symbol, OUTPUT_FILE_EXTENSION)))
    }

    fn open_writer(&self, ticker_symbol: &TickerRef) -> Result<Writer<File>, Error> {
        let path = self.ticker_file_path(ticker_symbol)?;

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| {
                Error::OutputWriteError(format!("Failed to open {:?}: {}", path, e))
            })?;

        debug!("Opened output file {:?}", path);

        Ok(WriterBuilder::new().has_headers(false).from_writer(file))
    }

    pub fn open_ticker_count(&self) -> usize {
        self.writers.len()
    }
}

impl TickerSink for CsvDirectorySink {
    fn write_row(&mut self, ticker_symbol: &TickerRef, row: &[String]) -> Result<(), Error> {
        if !self.writers.contains_key(ticker_symbol) {
            let writer = self.open_writer(ticker_symbol)?;
            self.writers.insert(ticker_symbol.to_string(), writer);
        }

        let writer = self.writers.get_mut(ticker_symbol).ok_or_else(|| {
            Error::OutputWriteError(format!("No writer for ticker {}", ticker_symbol))
        })?;

        writer.write_record(row).map_err(|e| {
            Error::OutputWriteError(format!("Failed to append to {}: {}", ticker_symbol, e))
        })
    }

    fn finish(&mut self) -> Result<(), Error> {
        let ticker_count = self.writers.len();

        for (ticker_symbol, mut writer) in self.writers.drain() {
            writer.flush().map_err(|e| {
                Error::OutputWriteError(format!("Failed to flush {}: {}", ticker_symbol, e))
            })?;
        }

        info!(
            "Closed {} ticker output files in {:?}",
            ticker_count, self.directory
        );

        Ok(())
    }
}
