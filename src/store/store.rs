//! The pricing record store

use crate::model::{PriceRecord, RecordPatch, ValidationReport};
use crate::observability::Logger;
use crate::report::{build_report, display_order};
use crate::validator::{identify_duplicates, validate_all, validate_record};

use super::outcome::{RejectReason, WriteOutcome};
use super::selector::{RecordSelector, Resolution};

/// Ordered collection of pricing records plus the current derived report.
///
/// The report is rebuilt after `load` and after every successful mutation;
/// reads never recompute it.
#[derive(Debug, Default)]
pub struct PricingStore {
    records: Vec<PriceRecord>,
    report: ValidationReport,
}

impl PricingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire collection with a fresh batch, runs the full
    /// validation sequence and rebuilds the report.
    pub fn load(&mut self, records: Vec<PriceRecord>) -> &ValidationReport {
        self.records = records;
        validate_all(&mut self.records);
        self.rebuild_report();

        let total = self.records.len().to_string();
        let valid = self.report.valid_records.to_string();
        let invalid = self.report.invalid_records.to_string();
        Logger::info(
            "DATASET_LOADED",
            &[("total", &total), ("valid", &valid), ("invalid", &invalid)],
        );
        &self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot copy in storage order.
    pub fn get_all(&self) -> Vec<PriceRecord> {
        self.records.clone()
    }

    /// Snapshot copy in presentation order.
    pub fn get_all_sorted(&self) -> Vec<PriceRecord> {
        display_order(&self.records)
    }

    pub fn get(&self, index: usize) -> Option<&PriceRecord> {
        self.records.get(index)
    }

    /// First record (storage order) matching the normalized GUID; a blank
    /// query addresses the no-GUID bucket.
    ///
    /// With duplicates present this silently returns the first holder; use
    /// [`PricingStore::get_all_by_guid`] or [`PricingStore::resolve`] when
    /// ambiguity matters.
    pub fn get_by_guid(&self, guid: &str) -> Option<&PriceRecord> {
        let mut matches = self.matching_indices(guid).into_iter();
        matches.next().map(|i| &self.records[i])
    }

    /// All records matching the normalized GUID, storage order.
    pub fn get_all_by_guid(&self, guid: &str) -> Vec<&PriceRecord> {
        self.matching_indices(guid)
            .into_iter()
            .map(|i| &self.records[i])
            .collect()
    }

    /// Current derived report.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Resolves a selector to a storage index, surfacing ambiguity as its own
    /// outcome.
    pub fn resolve(&self, selector: &RecordSelector) -> Resolution {
        match selector {
            RecordSelector::Index(index) => {
                if *index < self.records.len() {
                    Resolution::One(*index)
                } else {
                    Resolution::NotFound
                }
            }
            RecordSelector::Guid(guid) => {
                let matches = self.matching_indices(guid);
                match matches.len() {
                    0 => Resolution::NotFound,
                    1 => Resolution::One(matches[0]),
                    _ => Resolution::Ambiguous(matches),
                }
            }
        }
    }

    /// Merges the patch's present fields into the target record.
    ///
    /// The patch's `instrument_guid` is ignored here. Renames go through
    /// [`PricingStore::correct`]. After the merge the mutated record is
    /// re-validated, the whole collection is re-scanned for duplicates (a
    /// field edit cannot move a GUID, but the single re-scan path keeps every
    /// mutation's behavior identical) and the report is rebuilt.
    pub fn update(&mut self, selector: &RecordSelector, patch: &RecordPatch) -> WriteOutcome {
        let index = match self.resolve(selector) {
            Resolution::One(index) => index,
            Resolution::Ambiguous(matches) => return WriteOutcome::Ambiguous { matches },
            Resolution::NotFound => {
                Logger::warn("RECORD_NOT_FOUND", &[("operation", "update")]);
                return WriteOutcome::NotFound;
            }
        };

        if let Some(reason) = price_guard(patch) {
            return WriteOutcome::Rejected(reason);
        }

        apply_patch(&mut self.records[index], patch, None);
        self.revalidate_after_mutation(index);

        let index_str = index.to_string();
        Logger::info("RECORD_UPDATED", &[("index", &index_str)]);
        WriteOutcome::Applied { index }
    }

    /// `update` plus GUID rename.
    ///
    /// A rename is rejected when the normalized target GUID already belongs
    /// to a different record. Both guards run before any field is written, so
    /// a rejected correction leaves the record exactly as it was.
    pub fn correct(&mut self, selector: &RecordSelector, patch: &RecordPatch) -> WriteOutcome {
        let index = match self.resolve(selector) {
            Resolution::One(index) => index,
            Resolution::Ambiguous(matches) => return WriteOutcome::Ambiguous { matches },
            Resolution::NotFound => {
                Logger::warn("RECORD_NOT_FOUND", &[("operation", "correct")]);
                return WriteOutcome::NotFound;
            }
        };

        if let Some(reason) = price_guard(patch) {
            return WriteOutcome::Rejected(reason);
        }

        let rename = patch.guid().map(str::to_string);
        if let Some(new_guid) = rename.as_deref() {
            let taken = self
                .records
                .iter()
                .enumerate()
                .any(|(i, r)| i != index && r.guid() == Some(new_guid));
            if taken {
                Logger::warn("GUID_COLLISION", &[("guid", new_guid)]);
                return WriteOutcome::Rejected(RejectReason::GuidTaken(new_guid.to_string()));
            }
        }

        apply_patch(&mut self.records[index], patch, rename.as_deref());
        self.revalidate_after_mutation(index);

        let index_str = index.to_string();
        Logger::info("RECORD_CORRECTED", &[("index", &index_str)]);
        WriteOutcome::Applied { index }
    }

    /// Removes the target record, shifting every later index down by one,
    /// then rebuilds the report.
    ///
    /// Known limitation, kept deliberately: deletion does not re-run the
    /// duplicate scan, so removing the first holder of a GUID leaves the
    /// surviving duplicate flagged until the next mutation re-scans.
    pub fn delete(&mut self, selector: &RecordSelector) -> WriteOutcome {
        let index = match self.resolve(selector) {
            Resolution::One(index) => index,
            Resolution::Ambiguous(matches) => return WriteOutcome::Ambiguous { matches },
            Resolution::NotFound => {
                Logger::warn("RECORD_NOT_FOUND", &[("operation", "delete")]);
                return WriteOutcome::NotFound;
            }
        };

        self.records.remove(index);
        self.rebuild_report();

        let index_str = index.to_string();
        Logger::info("RECORD_DELETED", &[("index", &index_str)]);
        WriteOutcome::Applied { index }
    }

    /// Appends a record at the end (the new highest index), then validates,
    /// re-scans duplicates and rebuilds the report.
    pub fn create(&mut self, record: PriceRecord) -> WriteOutcome {
        if let Some(price) = record.price {
            if price <= 0.0 {
                return WriteOutcome::Rejected(RejectReason::NonPositivePrice(price));
            }
        }

        self.records.push(record);
        let index = self.records.len() - 1;
        self.revalidate_after_mutation(index);

        let index_str = index.to_string();
        Logger::info("RECORD_CREATED", &[("index", &index_str)]);
        WriteOutcome::Applied { index }
    }

    /// Storage indices whose normalized GUID matches the (trimmed) query; a
    /// blank query collects the no-GUID bucket.
    fn matching_indices(&self, guid: &str) -> Vec<usize> {
        let target = guid.trim();
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                if target.is_empty() {
                    record.guid().is_none()
                } else {
                    record.guid() == Some(target)
                }
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn revalidate_after_mutation(&mut self, index: usize) {
        validate_record(&mut self.records[index]);
        identify_duplicates(&mut self.records);
        self.rebuild_report();
    }

    fn rebuild_report(&mut self) {
        self.report = build_report(&self.records);
    }
}

/// Shared price guard: any present patch price must be strictly positive.
fn price_guard(patch: &RecordPatch) -> Option<RejectReason> {
    match patch.price {
        Some(price) if price <= 0.0 => {
            let price_str = price.to_string();
            Logger::warn("PRICE_REJECTED", &[("price", &price_str)]);
            Some(RejectReason::NonPositivePrice(price))
        }
        _ => None,
    }
}

/// Merges present patch fields into the record; `rename` carries the
/// already-guarded new GUID when the caller allows renames.
fn apply_patch(record: &mut PriceRecord, patch: &RecordPatch, rename: Option<&str>) {
    if let Some(price) = patch.price {
        // Also clears any unparsed token the loader kept
        record.set_price(price);
    }
    if let Some(date) = patch.trade_date {
        record.trade_date = Some(date);
    }
    if let Some(exchange) = &patch.exchange {
        record.exchange = Some(exchange.clone());
    }
    if let Some(product_type) = &patch.product_type {
        record.product_type = Some(product_type.clone());
    }
    if let Some(new_guid) = rename {
        record.instrument_guid = Some(new_guid.to_string());
    }
}
