//! Cross-record duplicate detection
//!
//! The GUID is the intended primary key, but the storage layer accepts
//! collisions; this pass flags them. First occurrence in storage order wins
//! and is never penalized, regardless of that record's own validity.

use std::collections::HashSet;

use crate::model::{PriceRecord, Violation};

/// Flags every record whose normalized GUID was already seen earlier in
/// storage order.
///
/// Records with an absent GUID are skipped (the field rules already flag
/// them). The pass is idempotent: a record already carrying the duplicate
/// violation is not flagged again. The pass only adds flags; a stale duplicate
/// flag on a record that is no longer a duplicate is left for the field-rule
/// reset on that record's next validation.
pub fn identify_duplicates(records: &mut [PriceRecord]) {
    let mut seen: HashSet<String> = HashSet::new();

    for record in records.iter_mut() {
        let guid = match record.guid() {
            Some(g) => g.to_string(),
            None => continue,
        };

        if seen.contains(&guid) {
            if !record.has_violation(&Violation::DuplicateGuid) {
                record.push_violation(Violation::DuplicateGuid);
            }
        } else {
            seen.insert(guid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate_record;
    use chrono::NaiveDate;

    fn record(guid: Option<&str>) -> PriceRecord {
        PriceRecord::new(
            guid.map(str::to_string),
            NaiveDate::from_ymd_opt(2024, 1, 2),
            Some(10.0),
            Some("CME".to_string()),
            Some("FUT".to_string()),
        )
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut records = vec![record(Some("A")), record(Some("A")), record(Some("B"))];
        for r in records.iter_mut() {
            validate_record(r);
        }

        identify_duplicates(&mut records);

        assert!(records[0].is_valid());
        assert_eq!(
            records[1].validation_error().unwrap(),
            "Duplicate GUID (primary key violation)"
        );
        assert!(records[2].is_valid());
    }

    #[test]
    fn test_rescan_is_idempotent() {
        let mut records = vec![record(Some("A")), record(Some("A"))];
        for r in records.iter_mut() {
            validate_record(r);
        }

        identify_duplicates(&mut records);
        identify_duplicates(&mut records);
        identify_duplicates(&mut records);

        let duplicate_flags = records[1]
            .violations()
            .iter()
            .filter(|v| **v == Violation::DuplicateGuid)
            .count();
        assert_eq!(duplicate_flags, 1);
        assert_eq!(
            records[1].validation_error().unwrap(),
            "Duplicate GUID (primary key violation)"
        );
    }

    #[test]
    fn test_absent_guids_are_skipped() {
        let mut records = vec![record(None), record(Some("  ")), record(None)];
        for r in records.iter_mut() {
            validate_record(r);
        }

        identify_duplicates(&mut records);

        for r in &records {
            assert!(!r.has_violation(&Violation::DuplicateGuid));
        }
    }

    #[test]
    fn test_guid_comparison_is_trimmed() {
        let mut records = vec![record(Some(" A ")), record(Some("A"))];
        for r in records.iter_mut() {
            validate_record(r);
        }

        identify_duplicates(&mut records);

        assert!(records[0].is_valid());
        assert!(records[1].has_violation(&Violation::DuplicateGuid));
    }

    #[test]
    fn test_invalid_first_occurrence_still_wins() {
        // The first holder keeps the GUID claim even when it fails field rules
        let mut records = vec![record(Some("A")), record(Some("A"))];
        records[0].price = None;
        for r in records.iter_mut() {
            validate_record(r);
        }

        identify_duplicates(&mut records);

        assert!(!records[0].has_violation(&Violation::DuplicateGuid));
        assert!(records[1].has_violation(&Violation::DuplicateGuid));
    }

    #[test]
    fn test_duplicate_appends_to_existing_errors() {
        let mut records = vec![record(Some("A")), record(Some("A"))];
        records[1].price = None;
        for r in records.iter_mut() {
            validate_record(r);
        }

        identify_duplicates(&mut records);

        assert_eq!(
            records[1].validation_error().unwrap(),
            "Missing price value; Duplicate GUID (primary key violation)"
        );
    }
}
