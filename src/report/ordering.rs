//! Presentation ordering
//!
//! Produces a display sequence without touching storage order: records with a
//! blank GUID stay pinned at their original positions, everything else is
//! sorted numeric-first. Storage indices remain the only addressing identity;
//! this view is read-only.

use std::cmp::Ordering;

use crate::model::PriceRecord;

/// Returns the records in presentation order.
///
/// Blank-GUID records keep their storage positions (a fixed "hole" pattern);
/// the remaining records are sorted with [`compare_guids`] and poured back
/// into the holes in ascending position order. The sort is stable, so keys
/// that tie under the comparator (`"7"` vs `"07"`) keep their storage order.
pub fn display_order(records: &[PriceRecord]) -> Vec<PriceRecord> {
    display_order_indices(records)
        .into_iter()
        .map(|index| records[index].clone())
        .collect()
}

/// Storage indices in presentation order, the same sequence as
/// [`display_order`], for callers that need to keep each row tied to its
/// storage identity.
pub fn display_order_indices(records: &[PriceRecord]) -> Vec<usize> {
    let mut slots: Vec<Option<usize>> = vec![None; records.len()];
    let mut keyed: Vec<usize> = Vec::new();

    for (position, record) in records.iter().enumerate() {
        if record.guid().is_none() {
            slots[position] = Some(position);
        } else {
            keyed.push(position);
        }
    }

    keyed.sort_by(|&a, &b| {
        // Both sides have a GUID by construction
        compare_guids(
            records[a].guid().unwrap_or(""),
            records[b].guid().unwrap_or(""),
        )
    });

    let mut keyed = keyed.into_iter();
    slots
        .into_iter()
        .map(|slot| match slot {
            Some(position) => position,
            // Guaranteed present: holes + keyed records partition the input
            None => keyed.next().expect("sorted records fill every open slot"),
        })
        .collect()
}

/// Three-way GUID comparator: integer pairs compare numerically, an integer
/// sorts before any non-integer, and non-integer pairs fall back to plain
/// string comparison.
fn compare_guids(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(a_num), Ok(b_num)) => a_num.cmp(&b_num),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(guid: Option<&str>) -> PriceRecord {
        PriceRecord::new(
            guid.map(str::to_string),
            None,
            Some(1.0),
            Some("CME".to_string()),
            Some("FUT".to_string()),
        )
    }

    fn guids(records: &[PriceRecord]) -> Vec<Option<String>> {
        records
            .iter()
            .map(|r| r.guid().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_comparator_orders_numeric_before_alpha() {
        assert_eq!(compare_guids("2", "10"), Ordering::Less);
        assert_eq!(compare_guids("10", "2"), Ordering::Greater);
        assert_eq!(compare_guids("10", "abc"), Ordering::Less);
        assert_eq!(compare_guids("abc", "10"), Ordering::Greater);
        assert_eq!(compare_guids("abc", "abd"), Ordering::Less);
        assert_eq!(compare_guids("7", "07"), Ordering::Equal);
    }

    #[test]
    fn test_blank_guids_stay_at_their_positions() {
        let records = vec![
            record(Some("10")),
            record(Some("2")),
            record(None),
            record(Some("9")),
            record(Some("abc")),
        ];

        let ordered = display_order(&records);

        assert_eq!(
            guids(&ordered),
            vec![
                Some("2".to_string()),
                Some("9".to_string()),
                None,
                Some("10".to_string()),
                Some("abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_numerically_equal_keys_keep_storage_order() {
        let mut first = record(Some("7"));
        first.price = Some(1.0);
        let mut second = record(Some("07"));
        second.price = Some(2.0);

        let ordered = display_order(&[first, second]);

        // "7" came first in storage and the tie must preserve that
        assert_eq!(ordered[0].instrument_guid.as_deref(), Some("7"));
        assert_eq!(ordered[1].instrument_guid.as_deref(), Some("07"));
    }

    #[test]
    fn test_output_length_matches_input() {
        let records = vec![record(None), record(None), record(Some("5"))];
        let ordered = display_order(&records);
        assert_eq!(ordered.len(), 3);
        assert_eq!(guids(&ordered)[0], None);
        assert_eq!(guids(&ordered)[1], None);
    }

    #[test]
    fn test_indices_follow_display_order() {
        let records = vec![record(Some("10")), record(Some("2")), record(None)];
        assert_eq!(display_order_indices(&records), vec![1, 0, 2]);
    }

    #[test]
    fn test_empty_input() {
        assert!(display_order(&[]).is_empty());
    }
}
