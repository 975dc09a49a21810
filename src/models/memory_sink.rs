use crate::models::TickerSink;
use crate::types::{OutputRow, TickerRef, TickerSymbol};
use crate::Error;
use std::collections::BTreeMap;

/// Keeps output rows in memory, grouped by ticker.
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: BTreeMap<TickerSymbol, Vec<OutputRow>>,
    is_finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self, ticker_symbol: &TickerRef) -> &[OutputRow] {
        self.rows
            .get(ticker_symbol)
            .map(|rows| rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn ticker_symbols(&self) -> Vec<&TickerRef> {
        self.rows.keys().map(|ticker_symbol| ticker_symbol.as_str()).collect()
    }

    pub fn total_rows(&self) -> usize {
        self.rows.values().map(|rows| rows.len()).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn into_rows(self) -> BTreeMap<TickerSymbol, Vec<OutputRow>> {
        self.rows
    }
}

impl TickerSink for MemorySink {
    fn write_row(&mut self, ticker_symbol: &TickerRef, row: &[String]) -> Result<(), Error> {
        self.rows
            .entry(ticker_symbol.to_string())
            .or_default()
            .push(row.to_vec());

        Ok(())
    }

    fn finish(&mut self) -> Result<(), Error> {
        self.is_finished = true;

        Ok(())
    }
}
