//! Per-field validation rules
//!
//! Violations accumulate in a fixed order (price, exchange, product type,
//! GUID, trade date) so the joined error string reads the same way for every
//! record. The order affects readability only, never the validity verdict.

use crate::model::{PriceRecord, Violation};

/// Exchanges accepted by the price feed. Matched case-insensitively.
pub const VALID_EXCHANGES: [&str; 4] = ["CME", "NYMEX", "CBOT", "COMEX"];

/// Recognized product types. Matched case-insensitively.
pub const VALID_PRODUCT_TYPES: [&str; 2] = ["FUT", "OPT"];

fn in_whitelist(value: &str, whitelist: &[&str]) -> bool {
    whitelist.iter().any(|w| w.eq_ignore_ascii_case(value))
}

fn is_blank(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => v.trim().is_empty(),
    }
}

/// Re-derives a single record's violation state from its fields.
///
/// Resets the record to valid first, so a record that was previously flagged
/// (including as a duplicate) starts clean; the caller re-runs the duplicate
/// scan afterwards when cross-record state matters.
pub fn validate_record(record: &mut PriceRecord) {
    record.clear_violations();

    match record.price {
        None => {
            // The loader keeps the raw token when a price was present but
            // unparseable; that phrase wins over "missing".
            if let Some(token) = record.original_price_token.clone() {
                record.push_violation(Violation::InvalidPriceFormat { token });
            } else {
                record.push_violation(Violation::MissingPrice);
            }
        }
        Some(price) if price < 0.0 => record.push_violation(Violation::NegativePrice),
        Some(price) if price == 0.0 => record.push_violation(Violation::ZeroPrice),
        Some(_) => {}
    }

    let exchange_violation = match record.exchange.as_deref() {
        value if is_blank(value) => Some(Violation::MissingExchange),
        Some(value) if !in_whitelist(value, &VALID_EXCHANGES) => Some(Violation::InvalidExchange {
            value: value.to_string(),
        }),
        _ => None,
    };
    if let Some(violation) = exchange_violation {
        record.push_violation(violation);
    }

    let product_violation = match record.product_type.as_deref() {
        value if is_blank(value) => Some(Violation::MissingProductType),
        Some(value) if !in_whitelist(value, &VALID_PRODUCT_TYPES) => {
            Some(Violation::InvalidProductType {
                value: value.to_string(),
            })
        }
        _ => None,
    };
    if let Some(violation) = product_violation {
        record.push_violation(violation);
    }

    if record.guid().is_none() {
        record.push_violation(Violation::MissingGuid);
    }

    if record.trade_date.is_none() {
        record.push_violation(Violation::MissingTradeDate);
    }
}
