use super::*;
use crate::{
    error::ErrorClass,
    ledger::MemoryLedger,
    model::{Bill, Payment},
    obs::{metrics_report, metrics_reset_all},
    test_support::{bill, payment},
};
use proptest::prelude::*;

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn store_bills(ledger: &mut MemoryLedger, ids: &[&str]) {
    for id in ids {
        RecordStore::put(ledger, &bill(id, "u1", "2016-06-15")).unwrap();
    }
}

fn index(ledger: &mut MemoryLedger, entries: &[(&str, &str)]) {
    let index = OwnerIndex::default();
    for (owner, id) in entries {
        index.index_record(ledger, "bill", owner, id).unwrap();
    }
}

//
// range
//

#[test]
fn range_is_start_inclusive_end_exclusive() {
    let mut ledger = MemoryLedger::new();
    store_bills(&mut ledger, &["b1", "b2", "b3"]);

    let rows = range_rows(&ledger, "BILLb1", "BILLb3").unwrap();

    let keys: Vec<&str> = rows.iter().map(|row| row.key.as_str()).collect();
    assert_eq!(keys, vec!["BILLb1", "BILLb2"]);
    let first: serde_json::Value = serde_json::from_str(rows[0].record_json()).unwrap();
    assert_eq!(first["id"], "b1");
    assert_eq!(ledger.open_cursors(), 0);
}

#[test]
fn range_with_empty_start_skips_composite_keys() {
    let mut ledger = MemoryLedger::new();
    store_bills(&mut ledger, &["b1"]);
    index(&mut ledger, &[("u1", "b1")]);

    let rows = range_rows(&ledger, "", "").unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, "BILLb1");
}

#[test]
fn range_serializes_with_key_and_record_fields() {
    let mut ledger = MemoryLedger::new();
    ledger.put_state("a", b"100").unwrap();
    ledger.put_state("b", b"plain text").unwrap();

    let rows = range_rows(&ledger, "a", "c").unwrap();
    let json = serde_json::to_string(&rows).unwrap();

    assert_eq!(
        json,
        r#"[{"Key":"a","Record":100},{"Key":"b","Record":"plain text"}]"#
    );
}

#[test]
fn range_emits_stored_json_verbatim() {
    let mut ledger = MemoryLedger::new();
    ledger.put_state("k", br#"{"z":"1","a":2.50}"#).unwrap();

    let rows = range_rows(&ledger, "k", "l").unwrap();

    assert_eq!(rows[0].record_json(), r#"{"z":"1","a":2.50}"#);
    assert_eq!(
        serde_json::to_string(&rows).unwrap(),
        r#"[{"Key":"k","Record":{"z":"1","a":2.50}}]"#
    );
}

#[test]
fn range_failure_returns_no_partial_rows() {
    let mut ledger = MemoryLedger::new();
    store_bills(&mut ledger, &["b1", "b2", "b3"]);
    ledger.fail_scans_after(2);

    let err = range_rows(&ledger, "BILL", "").unwrap_err();

    assert_eq!(err.class, ErrorClass::Unavailable);
    assert_eq!(ledger.open_cursors(), 0);
}

#[test]
fn range_close_failure_fails_the_query() {
    let mut ledger = MemoryLedger::new();
    store_bills(&mut ledger, &["b1"]);
    ledger.fail_cursor_close();

    assert!(range_rows(&ledger, "BILL", "").is_err());
}

#[test]
fn range_records_scan_metrics() {
    let mut ledger = MemoryLedger::new();
    store_bills(&mut ledger, &["b1", "b2"]);
    metrics_reset_all();

    range_rows(&ledger, "BILL", "").unwrap();

    let report = metrics_report();
    assert_eq!(report.ops.range_scans, 1);
    assert_eq!(report.ops.rows_scanned, 2);
    assert_eq!(report.ops.rows_returned, 2);
}

//
// owner
//

#[test]
fn owner_ids_count_matches_creations_across_interleaved_owners() {
    let mut ledger = MemoryLedger::new();
    index(
        &mut ledger,
        &[("u1", "b1"), ("u2", "b2"), ("u1", "b3"), ("u2", "b4"), ("u1", "b5")],
    );

    let ids = owner_record_ids(&ledger, &OwnerIndex::default(), "u1").unwrap();

    assert_eq!(ids, vec!["b1", "b3", "b5"]);
}

#[test]
fn owner_records_skip_ids_of_other_types() {
    let mut ledger = MemoryLedger::new();
    RecordStore::put(&mut ledger, &payment("p1", "u1")).unwrap();
    store_bills(&mut ledger, &["b1"]);
    index(&mut ledger, &[("u1", "b1"), ("u1", "p1")]);

    let payments: Vec<Payment> =
        owner_records(&ledger, &OwnerIndex::default(), "u1").unwrap();
    let bills: Vec<Bill> = owner_records(&ledger, &OwnerIndex::default(), "u1").unwrap();

    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].id, "p1");
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].id, "b1");
}

#[test]
fn owner_records_propagate_point_read_failure() {
    let mut ledger = MemoryLedger::new();
    RecordStore::put(&mut ledger, &payment("p1", "u1")).unwrap();
    index(&mut ledger, &[("u1", "p1")]);
    ledger.fail_get_on("PAYMENTp1");

    let result: Result<Vec<Payment>, _> = owner_records(&ledger, &OwnerIndex::default(), "u1");

    assert_eq!(result.unwrap_err().class, ErrorClass::Unavailable);
    assert_eq!(ledger.open_cursors(), 0);
}

//
// due date
//

#[test]
fn due_date_bounds_are_exclusive() {
    let mut ledger = MemoryLedger::new();
    let mirror = CollectionMirror::<Bill>::default();
    for (id, due) in [("b1", "2016-01-01"), ("b2", "2016-06-15"), ("b3", "2017-01-01")] {
        mirror.append(&mut ledger, &bill(id, "u1", due)).unwrap();
    }

    let found = due_between(&ledger, &mirror, date("2016-01-01"), date("2017-01-01")).unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "b2");
}

#[test]
fn unparseable_due_dates_never_match() {
    let records = vec![
        bill("b1", "u1", "15/06/2016"),
        bill("b2", "u1", ""),
        bill("b3", "u1", "2016-6-15"),
        bill("b4", "u1", "2016-06-15"),
    ];

    let found = retain_strictly_between(records, date("2016-01-01"), date("2017-01-01"));

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "b4");
}

#[test]
fn due_filter_on_missing_mirror_is_empty() {
    let ledger = MemoryLedger::new();

    let found = due_between(
        &ledger,
        &CollectionMirror::<Bill>::default(),
        date("2000-01-01"),
        date("2100-01-01"),
    )
    .unwrap();

    assert!(found.is_empty());
}

proptest! {
    #[test]
    fn filter_keeps_mirror_order_and_only_interior_dates(
        days in prop::collection::vec(1u8..=28, 0..24),
        lo in 1u8..=28,
        hi in 1u8..=28,
    ) {
        let records: Vec<Bill> = days
            .iter()
            .enumerate()
            .map(|(i, d)| bill(&format!("b{i}"), "u1", &format!("2016-02-{d:02}")))
            .collect();
        let from = Date::new_checked(2016, 2, lo).unwrap();
        let to = Date::new_checked(2016, 2, hi).unwrap();

        let found = retain_strictly_between(records.clone(), from, to);
        let expected: Vec<Bill> = records
            .into_iter()
            .zip(&days)
            .filter(|(_, d)| **d > lo && **d < hi)
            .map(|(b, _)| b)
            .collect();

        prop_assert_eq!(found, expected);
    }
}
