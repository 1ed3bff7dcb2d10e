//! Report Invariant Tests
//!
//! The report is rebuilt from scratch on every call, counts by violation
//! kind, and its missing total is the plain sum of the five missing-field
//! counters.

use chrono::NaiveDate;
use pricedesk::model::PriceRecord;
use pricedesk::report::{build_report, render_text_report};
use pricedesk::validator::validate_all;

// =============================================================================
// Helper Functions
// =============================================================================

fn record(guid: Option<&str>, price: Option<f64>) -> PriceRecord {
    PriceRecord::new(
        guid.map(str::to_string),
        NaiveDate::from_ymd_opt(2024, 3, 15),
        price,
        Some("CME".to_string()),
        Some("FUT".to_string()),
    )
}

// =============================================================================
// Counting Tests
// =============================================================================

/// missing total == sum of the five missing counters, always.
#[test]
fn test_missing_total_is_sum_of_five_counters() {
    let mut records = vec![
        // Missing price and GUID: contributes to two counters
        PriceRecord::new(None, NaiveDate::from_ymd_opt(2024, 1, 1), None,
            Some("CME".to_string()), Some("FUT".to_string())),
        // Missing everything: contributes to all five
        PriceRecord::default(),
        // Duplicate pair: must not leak into the missing total
        record(Some("A"), Some(1.0)),
        record(Some("A"), Some(2.0)),
    ];
    validate_all(&mut records);

    let report = build_report(&records);

    assert_eq!(
        report.missing_total(),
        report.missing_price
            + report.missing_instrument_guid
            + report.missing_trade_date
            + report.missing_exchange
            + report.missing_product_type
    );
    assert_eq!(report.missing_total(), 7);
    assert_eq!(report.duplicate_records, 1);
}

/// A record with several violations increments several counters.
#[test]
fn test_multi_violation_record_counts_once_per_kind() {
    let mut records = vec![PriceRecord::new(
        None,
        None,
        Some(0.0),
        Some("ICE".to_string()),
        Some("SWAP".to_string()),
    )];
    validate_all(&mut records);

    let report = build_report(&records);

    assert_eq!(report.zero_price, 1);
    assert_eq!(report.invalid_exchange, 1);
    assert_eq!(report.invalid_product_type, 1);
    assert_eq!(report.missing_instrument_guid, 1);
    assert_eq!(report.missing_trade_date, 1);
    assert_eq!(report.invalid_records, 1);
}

/// valid + invalid always partitions the total.
#[test]
fn test_valid_invalid_partition() {
    let mut records = vec![
        record(Some("1"), Some(1.0)),
        record(Some("2"), Some(-1.0)),
        record(Some("3"), None),
        record(None, Some(4.0)),
    ];
    validate_all(&mut records);

    let report = build_report(&records);

    assert_eq!(report.total_records, 4);
    assert_eq!(report.valid_records + report.invalid_records, 4);
    assert_eq!(report.valid_records, 1);
    assert_eq!(report.invalid_records_list.len(), 3);
}

/// Unparseable price tokens count as invalid format, not missing.
#[test]
fn test_invalid_format_distinct_from_missing() {
    let mut token_record = record(Some("1"), None);
    token_record.original_price_token = Some("n/a".to_string());
    let mut records = vec![token_record, record(Some("2"), None)];
    validate_all(&mut records);

    let report = build_report(&records);

    assert_eq!(report.invalid_price_format, 1);
    assert_eq!(report.missing_price, 1);
}

/// The report is rebuilt, not patched: same input, same output.
#[test]
fn test_rebuild_is_deterministic() {
    let mut records = vec![
        record(Some("9"), None),
        record(Some("9"), Some(1.0)),
        record(None, Some(2.0)),
    ];
    validate_all(&mut records);

    let first = build_report(&records);
    let second = build_report(&records);

    assert_eq!(first, second);
}

/// Duplicate summaries carry GUID and trade date.
#[test]
fn test_duplicate_list_format() {
    let mut records = vec![record(Some("X-1"), Some(1.0)), record(Some("X-1"), Some(2.0))];
    validate_all(&mut records);

    let report = build_report(&records);

    assert_eq!(report.duplicate_records_list, vec!["X-1 - 2024-03-15"]);
}

// =============================================================================
// Text Rendering Tests
// =============================================================================

/// The rendered report reflects the counts it was built from.
#[test]
fn test_rendered_report_matches_counts() {
    let mut records = vec![
        record(Some("2"), Some(10.0)),
        record(Some("10"), None),
        record(Some("2"), Some(5.0)),
    ];
    validate_all(&mut records);
    let report = build_report(&records);

    let text = render_text_report(&report);

    assert!(text.contains("Total Records: 3"));
    assert!(text.contains("Valid Records: 1"));
    assert!(text.contains("Invalid Records: 2"));
    assert!(text.contains("Duplicate Records: 1"));
    assert!(text.contains("Missing Values: 1"));
    // Presentation order puts GUID 2 first in the ALL RECORDS table
    let all_records_at = text.find("ALL RECORDS").unwrap();
    let table = &text[all_records_at..];
    assert!(table.find("2 ").unwrap() < table.find("10 ").unwrap());
}
