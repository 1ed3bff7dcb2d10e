//! Validation engine for pricing records
//!
//! Two passes, always run as a pair in this order:
//! 1. per-record field rules (`validate_record` over every record)
//! 2. one cross-record duplicate scan (`identify_duplicates`)
//!
//! Both passes write only the records' violation state; they never abort and
//! never touch the data fields. The validator does not log; callers own the
//! operational narrative.

mod duplicates;
mod rules;

pub use duplicates::identify_duplicates;
pub use rules::{validate_record, VALID_EXCHANGES, VALID_PRODUCT_TYPES};

use crate::model::PriceRecord;

/// Runs the full validation sequence over a collection: every record through
/// the field rules, then a single duplicate scan.
pub fn validate_all(records: &mut [PriceRecord]) {
    for record in records.iter_mut() {
        validate_record(record);
    }
    identify_duplicates(records);
}
