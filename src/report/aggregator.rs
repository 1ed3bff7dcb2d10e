//! Report aggregation
//!
//! Derives the `ValidationReport` from the current record state. Counts are
//! keyed by violation kind; a record carrying several violations increments
//! every matching counter.

use crate::model::{PriceRecord, ValidationReport, Violation};

use super::ordering::display_order;

/// Builds a fresh report over the collection in its current state.
///
/// `invalid_records_list` keeps storage order; `all_records` is the
/// presentation-ordered listing.
pub fn build_report(records: &[PriceRecord]) -> ValidationReport {
    let mut report = ValidationReport {
        total_records: records.len(),
        all_records: display_order(records),
        ..Default::default()
    };

    for record in records {
        if record.is_valid() {
            report.valid_records += 1;
            continue;
        }
        report.invalid_records += 1;
        report.invalid_records_list.push(record.clone());

        let mut is_duplicate = false;
        for violation in record.violations() {
            match violation {
                Violation::MissingPrice => report.missing_price += 1,
                Violation::InvalidPriceFormat { .. } => report.invalid_price_format += 1,
                Violation::NegativePrice => report.negative_price += 1,
                Violation::ZeroPrice => report.zero_price += 1,
                Violation::MissingExchange => report.missing_exchange += 1,
                Violation::InvalidExchange { .. } => report.invalid_exchange += 1,
                Violation::MissingProductType => report.missing_product_type += 1,
                Violation::InvalidProductType { .. } => report.invalid_product_type += 1,
                Violation::MissingGuid => report.missing_instrument_guid += 1,
                Violation::MissingTradeDate => report.missing_trade_date += 1,
                Violation::DuplicateGuid => is_duplicate = true,
            }
        }

        if is_duplicate {
            report.duplicate_records += 1;
            report.duplicate_records_list.push(format!(
                "{} - {}",
                record.guid().unwrap_or(""),
                record
                    .trade_date
                    .map(|d| d.to_string())
                    .unwrap_or_default()
            ));
        }
    }

    report
}
