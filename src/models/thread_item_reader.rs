use crate::models::ThreadItem;
use crate::types::TimestampMillis;
use crate::utils::normalize_parent_id;
use crate::Error;
use csv::{ReaderBuilder, StringRecord};
use log::{info, warn};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Column names used to decode thread items from a CSV file.
#[derive(Debug, Clone)]
pub struct ItemCsvLayout {
    pub id_column: &'static str,
    pub parent_id_column: Option<&'static str>,
    /// Joined with a newline, e.g. title then body.
    pub text_columns: &'static [&'static str],
    /// Milliseconds since the Unix epoch.
    pub timestamp_column: &'static str,
    pub metadata_columns: &'static [&'static str],
    /// Links a comment to its submission so submission fields can be joined in.
    pub post_id_column: Option<&'static str>,
}

struct ColumnPositions {
    id: usize,
    parent_id: Option<usize>,
    text: Vec<usize>,
    timestamp: usize,
    metadata: Vec<usize>,
    post_id: Option<usize>,
}

/// Reads thread items from CSV; malformed rows are logged and skipped.
pub struct ThreadItemReader<'a> {
    layout: &'a ItemCsvLayout,
}

impl<'a> ThreadItemReader<'a> {
    pub fn new(layout: &'a ItemCsvLayout) -> Self {
        ThreadItemReader { layout }
    }

    pub fn read_items_from_string(&self, csv: &str) -> Result<Vec<ThreadItem>, Error> {
        self.read_items_from_reader(Cursor::new(csv))
    }

    pub fn read_items_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<ThreadItem>, Error> {
        let path = path.as_ref();
        let file = File::open(path)?;

        info!("Reading thread items from {:?}", path);

        self.read_items_from_reader(file)
    }

    pub fn read_items_from_reader<R: Read>(&self, reader: R) -> Result<Vec<ThreadItem>, Error> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::ParserError(format!("Failed to read headers: {}", e)))?
            .clone();

        let positions = self.column_positions(&headers)?;

        let mut items = Vec::new();
        let mut skipped_count = 0;

        for (row_idx, record) in reader.records().enumerate() {
            let decoded = record
                .map_err(|e| Error::RecordDecodeError(e.to_string()))
                .and_then(|record| self.decode_record(&positions, &record));

            match decoded {
                Ok(item) => items.push(item),
                Err(err) => {
                    skipped_count += 1;
                    warn!("Skipping row {}: {}", row_idx + 1, err);
                }
            }
        }

        info!(
            "Read {} thread items ({} skipped)",
            items.len(),
            skipped_count
        );

        Ok(items)
    }

    fn column_positions(&self, headers: &StringRecord) -> Result<ColumnPositions, Error> {
        let position = |column: &str| -> Result<usize, Error> {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| Error::ParserError(format!("Missing '{}' column", column)))
        };

        Ok(ColumnPositions {
            id: position(self.layout.id_column)?,
            parent_id: self.layout.parent_id_column.map(position).transpose()?,
            text: self
                .layout
                .text_columns
                .iter()
                .map(|&column| position(column))
                .collect::<Result<_, _>>()?,
            timestamp: position(self.layout.timestamp_column)?,
            metadata: self
                .layout
                .metadata_columns
                .iter()
                .map(|&column| position(column))
                .collect::<Result<_, _>>()?,
            post_id: self.layout.post_id_column.map(position).transpose()?,
        })
    }

    fn decode_record(
        &self,
        positions: &ColumnPositions,
        record: &StringRecord,
    ) -> Result<ThreadItem, Error> {
        let id = field(record, positions.id)?.trim();
        if id.is_empty() {
            return Err(Error::RecordDecodeError("Empty item id".to_string()));
        }

        let parent_id = match positions.parent_id {
            Some(position) => Some(normalize_parent_id(field(record, position)?.trim()))
                .filter(|parent_id| !parent_id.is_empty()),
            None => None,
        };

        let text = positions
            .text
            .iter()
            .map(|&position| field(record, position))
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");

        let raw_timestamp = field(record, positions.timestamp)?.trim();
        let timestamp_millis: TimestampMillis = raw_timestamp.parse().map_err(|_| {
            Error::RecordDecodeError(format!("Invalid timestamp {:?}", raw_timestamp))
        })?;

        let metadata = positions
            .metadata
            .iter()
            .map(|&position| field(record, position).map(|value| value.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        let post_id = match positions.post_id {
            Some(position) => Some(normalize_parent_id(field(record, position)?.trim()))
                .filter(|post_id| !post_id.is_empty()),
            None => None,
        };

        Ok(ThreadItem::new(id, parent_id, &text, timestamp_millis)
            .with_metadata(metadata)
            .with_post_id(post_id))
    }
}

fn field(record: &StringRecord, position: usize) -> Result<&str, Error> {
    record
        .get(position)
        .ok_or_else(|| Error::RecordDecodeError(format!("Missing field at column {}", position)))
}
