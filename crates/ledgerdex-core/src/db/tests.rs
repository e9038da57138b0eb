use super::*;
use crate::{
    error::{ErrorClass, ErrorOrigin},
    ledger::MemoryLedger,
    model::{Bill, Payment},
    obs::{metrics_report, metrics_reset_all},
    test_support::{bill, payment},
};
use proptest::prelude::*;

fn db() -> Db<MemoryLedger> {
    let mut db = Db::new(MemoryLedger::new());
    db.reset_mirror::<Bill>().unwrap();
    db.reset_mirror::<Payment>().unwrap();
    db
}

#[test]
fn save_writes_record_index_and_mirror() {
    let mut db = db();
    let bill = bill("b1", "u1", "2016-06-15");

    assert_eq!(db.save(&bill).unwrap(), 1);

    assert_eq!(db.load::<Bill>("b1").unwrap(), Some(bill.clone()));
    assert_eq!(db.owner_record_ids("u1").unwrap(), vec!["b1"]);
    assert_eq!(db.mirror::<Bill>().all(db.ledger()).unwrap(), vec![bill]);
}

#[test]
fn load_raw_returns_stored_json() {
    let mut db = db();
    db.save(&payment("p1", "u1")).unwrap();

    let raw = db.load_raw::<Payment>("p1").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();

    assert_eq!(value["samount"], "100");
    assert_eq!(db.load_raw::<Payment>("nope").unwrap(), None);
}

#[test]
fn duplicate_id_yields_two_mirror_entries_but_one_record() {
    let mut db = db();
    let mut second = bill("b1", "u1", "2016-06-15");
    second.amount = "99.00".to_string();

    db.save(&bill("b1", "u1", "2016-06-15")).unwrap();
    db.save(&second).unwrap();

    assert_eq!(db.mirror::<Bill>().len(db.ledger()).unwrap(), 2);
    assert_eq!(db.load::<Bill>("b1").unwrap().unwrap().amount, "99.00");
    assert_eq!(db.owner_record_ids("u1").unwrap(), vec!["b1"]);
}

#[test]
fn mirror_write_failure_leaves_record_and_index_in_place() {
    let mut db = db();
    db.ledger_mut().fail_put_on("_billindex");

    let err = db.save(&bill("b1", "u1", "2016-06-15")).unwrap_err();

    assert_eq!(err.class, ErrorClass::Unavailable);
    assert!(db.load::<Bill>("b1").unwrap().is_some());
    assert_eq!(db.owner_record_ids("u1").unwrap(), vec!["b1"]);
    assert_eq!(db.mirror::<Bill>().len(db.ledger()).unwrap(), 0);
}

#[test]
fn reserved_owner_id_is_rejected_before_any_write() {
    let mut db = Db::new(MemoryLedger::new());

    let err = db.save(&bill("b1", "u\u{0}1", "2016-06-15")).unwrap_err();

    assert_eq!(err.class, ErrorClass::MalformedInput);
    assert_eq!(err.origin, ErrorOrigin::Key);
    assert!(db.ledger().is_empty());
}

#[test]
fn reserved_record_id_is_rejected_before_any_write() {
    let mut db = Db::new(MemoryLedger::new());

    let err = db
        .save_without_mirror(&payment("p\u{10FFFF}", "u1"))
        .unwrap_err();

    assert_eq!(err.class, ErrorClass::MalformedInput);
    assert!(db.ledger().is_empty());
}

#[test]
fn save_without_mirror_skips_append() {
    let mut db = db();

    db.save_without_mirror(&payment("p1", "u1")).unwrap();

    assert!(db.load::<Payment>("p1").unwrap().is_some());
    assert_eq!(db.owner_records::<Payment>("u1").unwrap().len(), 1);
    assert_eq!(db.mirror::<Payment>().len(db.ledger()).unwrap(), 0);
}

#[test]
fn require_init_policy_rejects_save_before_reset_without_writing() {
    let mut db = Db::new(MemoryLedger::new()).with_mirror_policy(MirrorPolicy::RequireInit);

    let err = db.save(&bill("b1", "u1", "2016-06-15")).unwrap_err();
    assert!(err.is_not_found());
    assert!(db.ledger().is_empty());

    db.reset_mirror::<Bill>().unwrap();
    assert_eq!(db.save(&bill("b2", "u1", "2016-06-15")).unwrap(), 1);
}

#[test]
fn due_between_reads_through_mirror() {
    let mut db = db();
    for (id, due) in [("b1", "2016-01-01"), ("b2", "2016-06-15"), ("b3", "2017-01-01")] {
        db.save(&bill(id, "u1", due)).unwrap();
    }

    let found: Vec<Bill> = db
        .due_between(
            Date::parse("2016-01-01").unwrap(),
            Date::parse("2017-01-01").unwrap(),
        )
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].bill_due_date, "2016-06-15");
}

#[test]
fn save_records_write_metrics() {
    let mut db = db();
    metrics_reset_all();

    db.save(&bill("b1", "u1", "2016-06-15")).unwrap();

    let report = metrics_report();
    assert_eq!(report.ops.write_calls, 1);
    assert_eq!(report.ops.records_written, 1);
    assert_eq!(report.ops.index_inserts, 1);
    assert_eq!(report.records["bill"].mirror_len, 1);
}

proptest! {
    #[test]
    fn owner_query_returns_each_created_id_once(
        owners in prop::collection::vec(0u8..4, 1..20),
    ) {
        let mut db = db();
        for (i, owner) in owners.iter().enumerate() {
            db.save(&bill(&format!("b{i:02}"), &format!("u{owner}"), "2016-06-15")).unwrap();
        }

        for owner in 0u8..4 {
            let mut expected: Vec<String> = owners
                .iter()
                .enumerate()
                .filter(|(_, o)| **o == owner)
                .map(|(i, _)| format!("b{i:02}"))
                .collect();
            expected.sort();

            let ids = db.owner_record_ids(&format!("u{owner}")).unwrap();
            prop_assert_eq!(ids, expected);
        }
    }
}
