//! JSON view types
//!
//! Views render records the way operators expect from the legacy surface:
//! blanks for absent fields, the raw unparseable token in the price column,
//! and an explicit VALID/INVALID status. Storage index annotations keep rows
//! addressable even when GUIDs are blank or duplicated.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::model::{PriceRecord, ValidationReport};
use crate::report::display_order_indices;
use crate::store::PricingStore;

/// One record as shown over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub instrument_guid: String,
    pub trade_date: String,
    /// Number when parsed, raw token string when unparseable, `""` when the
    /// column was empty.
    pub price: Value,
    pub exchange: String,
    pub product_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,
}

impl RecordView {
    pub fn new(index: Option<usize>, record: &PriceRecord) -> Self {
        let price = match record.price {
            Some(price) => Value::from(price),
            None => match record.original_price_token.as_deref() {
                Some(token) if !token.trim().is_empty() => Value::from(token),
                _ => Value::from(""),
            },
        };

        Self {
            index,
            instrument_guid: record.guid().unwrap_or("").to_string(),
            trade_date: record
                .trade_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            price,
            exchange: blank_or(record.exchange.as_deref()),
            product_type: blank_or(record.product_type.as_deref()),
            status: if record.is_valid() { "VALID" } else { "INVALID" }.to_string(),
            validation_error: record.validation_error(),
        }
    }
}

fn blank_or(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => String::new(),
    }
}

/// Summary returned by `POST /load`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    pub message: String,
    pub total_records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub duplicate_records: usize,
    pub missing_values: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl LoadSummary {
    pub fn new(report: &ValidationReport) -> Self {
        Self {
            message: "Data loaded and validated successfully!".to_string(),
            total_records: report.total_records,
            valid_records: report.valid_records,
            invalid_records: report.invalid_records,
            duplicate_records: report.duplicate_records,
            missing_values: report.missing_total(),
        }
    }
}

/// Full report view returned by `GET /report`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub total_records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    pub duplicate_records: usize,
    pub missing_values: usize,
    /// Non-zero counters only, keyed by the breakdown labels of the text
    /// report.
    pub error_breakdown: BTreeMap<String, usize>,
    pub invalid_records_list: Vec<RecordView>,
    pub duplicate_records_list: Vec<String>,
    pub all_records: Vec<RecordView>,
}

impl ReportView {
    /// Builds the view straight from the store so every row carries its
    /// storage index.
    pub fn build(store: &PricingStore) -> Self {
        let report = store.report();
        let records = store.get_all();

        let mut error_breakdown = BTreeMap::new();
        let breakdown: [(&str, usize); 9] = [
            ("Missing Price", report.missing_price),
            ("Invalid Price Format", report.invalid_price_format),
            ("Missing instrument_guid", report.missing_instrument_guid),
            ("Missing trade_date", report.missing_trade_date),
            ("Missing exchange", report.missing_exchange),
            ("Missing product_type", report.missing_product_type),
            ("Invalid exchange", report.invalid_exchange),
            ("Invalid product_type", report.invalid_product_type),
            ("Duplicate Records", report.duplicate_records),
        ];
        for (label, count) in breakdown {
            if count > 0 {
                error_breakdown.insert(label.to_string(), count);
            }
        }

        let invalid_records_list = records
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.is_valid())
            .map(|(index, r)| RecordView::new(Some(index), r))
            .collect();

        let all_records = display_order_indices(&records)
            .into_iter()
            .map(|index| RecordView::new(Some(index), &records[index]))
            .collect();

        Self {
            total_records: report.total_records,
            valid_records: report.valid_records,
            invalid_records: report.invalid_records,
            duplicate_records: report.duplicate_records,
            missing_values: report.missing_total(),
            error_breakdown,
            invalid_records_list,
            duplicate_records_list: report.duplicate_records_list.clone(),
            all_records,
        }
    }
}

/// 409 body listing the candidates behind an ambiguous GUID.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbiguousResponse {
    pub message: String,
    pub count: usize,
    pub records: Vec<RecordView>,
    pub instruction: String,
}

impl AmbiguousResponse {
    pub fn new(guid_display: &str, path_guid: &str, records: Vec<RecordView>) -> Self {
        Self {
            message: format!("Multiple records found with GUID: {}", guid_display),
            count: records.len(),
            records,
            instruction: format!(
                "Retry with /api/pricing/records/{}?index={{index}} to address a specific record",
                path_guid
            ),
        }
    }
}

/// Ack body for successful mutations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub message: String,
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordView>,
}
