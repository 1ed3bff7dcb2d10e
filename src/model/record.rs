//! Pricing record entity and partial-update type

use chrono::NaiveDate;
use serde::Deserialize;

use super::violation::Violation;

/// A single pricing record.
///
/// All five data fields are optional: the loader captures whatever the source
/// row carried and validation decides what is acceptable. The violation list
/// is owned by the validation passes; presentation layers read validity, they
/// never write it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceRecord {
    /// Intended primary key. Blank/whitespace-only values count as absent.
    pub instrument_guid: Option<String>,
    pub trade_date: Option<NaiveDate>,
    /// Parsed price. Absent when the column was empty or the token failed
    /// numeric parse.
    pub price: Option<f64>,
    /// Raw price token kept when parsing failed, for display and the
    /// "Invalid price format" phrase. Mutually exclusive with `price`.
    pub original_price_token: Option<String>,
    pub exchange: Option<String>,
    pub product_type: Option<String>,
    violations: Vec<Violation>,
}

impl PriceRecord {
    pub fn new(
        instrument_guid: Option<String>,
        trade_date: Option<NaiveDate>,
        price: Option<f64>,
        exchange: Option<String>,
        product_type: Option<String>,
    ) -> Self {
        Self {
            instrument_guid,
            trade_date,
            price,
            original_price_token: None,
            exchange,
            product_type,
            violations: Vec::new(),
        }
    }

    /// Normalized GUID: trimmed, `None` when absent or blank.
    pub fn guid(&self) -> Option<&str> {
        match self.instrument_guid.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(g) => Some(g),
        }
    }

    /// A record is valid iff it carries no violations.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation phrases joined with `"; "`, `None` when the record is valid.
    pub fn validation_error(&self) -> Option<String> {
        if self.violations.is_empty() {
            return None;
        }
        Some(
            self.violations
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn has_violation(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }

    /// Writes a parsed price, clearing any unparsed token it supersedes.
    pub fn set_price(&mut self, price: f64) {
        self.price = Some(price);
        self.original_price_token = None;
    }

    pub(crate) fn clear_violations(&mut self) {
        self.violations.clear();
    }

    pub(crate) fn push_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

/// Partial update for a record.
///
/// Absent fields are skip-markers, never clear-markers: a patch can set a
/// field to a new value but cannot blank one out. `instrument_guid` is only
/// honored by `correct` (renames carry a uniqueness guard); `update` ignores
/// it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordPatch {
    pub instrument_guid: Option<String>,
    pub trade_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub exchange: Option<String>,
    pub product_type: Option<String>,
}

impl RecordPatch {
    /// True when every field is absent; such a patch is a legal no-op.
    pub fn is_empty(&self) -> bool {
        self.instrument_guid.is_none()
            && self.trade_date.is_none()
            && self.price.is_none()
            && self.exchange.is_none()
            && self.product_type.is_none()
    }

    /// Trimmed rename target, `None` when the patch does not rename.
    pub fn guid(&self) -> Option<&str> {
        match self.instrument_guid.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(g) => Some(g),
        }
    }
}
