//! CSV file loading
//!
//! Expected columns, in order: `instrument_guid, trade_date, price, exchange,
//! product_type`. The header row is skipped. Every token is trimmed. Rows
//! with fewer than five columns are skipped with a warning; a price token
//! that fails numeric parse is kept verbatim on the record so the validator
//! and the report can show it.

use std::io;
use std::path::Path;

use chrono::NaiveDate;

use crate::model::PriceRecord;
use crate::observability::Logger;

use super::errors::{ParseError, ParseResult};

/// Trade date format accepted by the feed.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loads and parses a pricing CSV file.
///
/// Fails only on file-level problems: a non-`.csv` path, unreadable file, or
/// malformed CSV structure.
pub fn load_file(path: &Path) -> ParseResult<Vec<PriceRecord>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        return Err(ParseError::UnsupportedFormat(path.display().to_string()));
    }

    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let records = parse_records(reader)?;

    let path_str = path.display().to_string();
    let count = records.len().to_string();
    Logger::info("CSV_PARSED", &[("path", &path_str), ("records", &count)]);
    Ok(records)
}

fn parse_records<R: io::Read>(mut reader: csv::Reader<R>) -> ParseResult<Vec<PriceRecord>> {
    let mut records = Vec::new();

    // Header is line 1; data starts at line 2
    for (offset, row) in reader.records().enumerate() {
        let line = (offset + 2).to_string();
        let row = row?;

        if row.len() < 5 {
            let cols = row.len().to_string();
            Logger::warn("ROW_SKIPPED", &[("line", &line), ("columns", &cols)]);
            continue;
        }

        records.push(parse_row(&row, &line));
    }

    Ok(records)
}

fn parse_row(row: &csv::StringRecord, line: &str) -> PriceRecord {
    let field = |i: usize| -> Option<String> {
        match row.get(i).map(str::trim) {
            Some("") | None => None,
            Some(v) => Some(v.to_string()),
        }
    };

    let mut record = PriceRecord::new(field(0), None, None, field(3), field(4));

    if let Some(raw_date) = field(1) {
        match NaiveDate::parse_from_str(&raw_date, DATE_FORMAT) {
            Ok(date) => record.trade_date = Some(date),
            Err(_) => {
                // Left absent; validation reports the missing trade date
                Logger::warn("INVALID_DATE", &[("line", line), ("value", &raw_date)]);
            }
        }
    }

    if let Some(token) = field(2) {
        match token.parse::<f64>() {
            Ok(price) => record.price = Some(price),
            Err(_) => {
                Logger::warn("INVALID_PRICE_TOKEN", &[("line", line), ("value", &token)]);
                record.original_price_token = Some(token);
            }
        }
    }

    record
}
