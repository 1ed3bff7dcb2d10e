//! Derived validation report
//!
//! The report is a disposable view over the record collection: rebuilt from
//! scratch after every load and mutation, never mutated in place, and holding
//! no state of its own.

use super::record::PriceRecord;

/// Aggregated counts and detail lists for the current collection state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub total_records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    pub duplicate_records: usize,

    pub missing_price: usize,
    pub invalid_price_format: usize,
    pub negative_price: usize,
    pub zero_price: usize,
    pub missing_instrument_guid: usize,
    pub missing_trade_date: usize,
    pub missing_exchange: usize,
    pub missing_product_type: usize,
    pub invalid_exchange: usize,
    pub invalid_product_type: usize,

    /// Full listing in presentation order (blank-GUID rows pinned, the rest
    /// sorted numeric-first).
    pub all_records: Vec<PriceRecord>,
    /// Invalid records in storage order.
    pub invalid_records_list: Vec<PriceRecord>,
    /// `"<guid> - <trade date>"` summaries of records flagged duplicate.
    pub duplicate_records_list: Vec<String>,
}

impl ValidationReport {
    /// Sum of the five missing-field counters. Not deduplicated: a record
    /// missing both price and GUID contributes to both.
    pub fn missing_total(&self) -> usize {
        self.missing_price
            + self.missing_instrument_guid
            + self.missing_trade_date
            + self.missing_exchange
            + self.missing_product_type
    }
}
