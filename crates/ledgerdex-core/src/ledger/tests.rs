use super::*;

fn seeded() -> MemoryLedger {
    let mut ledger = MemoryLedger::new();
    for key in ["a", "b", "c", "d"] {
        ledger.put_state(key, key.as_bytes()).unwrap();
    }

    ledger
}

fn keys<C: StateCursor>(guard: ScanGuard<C>) -> Vec<String> {
    guard.map(|entry| entry.unwrap().key).collect()
}

#[test]
fn get_absent_key_is_none_not_error() {
    let ledger = MemoryLedger::new();

    assert_eq!(ledger.get_state("missing").unwrap(), None);
}

#[test]
fn delete_absent_key_is_noop() {
    let mut ledger = seeded();
    ledger.del_state("zzz").unwrap();
    ledger.del_state("a").unwrap();

    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.get_state("a").unwrap(), None);
}

#[test]
fn range_is_start_inclusive_end_exclusive() {
    let ledger = seeded();
    let guard = ScanGuard::new(ledger.state_by_range("b", "d").unwrap());

    assert_eq!(keys(guard), vec!["b", "c"]);
    assert_eq!(ledger.open_cursors(), 0);
}

#[test]
fn range_with_empty_end_is_unbounded() {
    let ledger = seeded();
    let guard = ScanGuard::new(ledger.state_by_range("c", "").unwrap());

    assert_eq!(keys(guard), vec!["c", "d"]);
}

#[test]
fn inverted_range_is_empty() {
    let ledger = seeded();
    let guard = ScanGuard::new(ledger.state_by_range("d", "a").unwrap());

    assert!(keys(guard).is_empty());
}

#[test]
fn prefix_scan_stops_at_first_non_matching_key() {
    let mut ledger = MemoryLedger::new();
    for key in ["ab1", "ab2", "abc", "ac", "b"] {
        ledger.put_state(key, b"x").unwrap();
    }

    let guard = ScanGuard::new(ledger.state_by_prefix("ab").unwrap());

    assert_eq!(keys(guard), vec!["ab1", "ab2", "abc"]);
}

#[test]
fn guard_closes_cursor_on_early_drop() {
    let ledger = seeded();
    {
        let mut guard = ScanGuard::new(ledger.state_by_range("a", "").unwrap());
        assert_eq!(ledger.open_cursors(), 1);
        let _ = guard.next();
    }

    assert_eq!(ledger.open_cursors(), 0);
}

#[test]
fn finish_reports_close_failure() {
    let mut ledger = seeded();
    ledger.fail_cursor_close();

    let guard = ScanGuard::new(ledger.state_by_range("a", "").unwrap());
    let err = guard.finish().unwrap_err();

    assert!(err.message.contains("close"), "unexpected error: {err:?}");
    assert_eq!(ledger.open_cursors(), 0);
}

#[test]
fn exhausted_scan_surfaces_close_failure_as_last_item() {
    let mut ledger = seeded();
    ledger.fail_cursor_close();

    let items: Vec<_> = ScanGuard::new(ledger.state_by_range("c", "").unwrap()).collect();

    assert_eq!(items.len(), 3);
    assert!(items[2].is_err());
}

#[test]
fn injected_scan_failure_yields_error_then_stops() {
    let mut ledger = seeded();
    ledger.fail_scans_after(2);

    let items: Vec<_> = ScanGuard::new(ledger.state_by_range("a", "").unwrap()).collect();

    assert_eq!(items.len(), 3);
    assert!(items[0].is_ok());
    assert!(items[1].is_ok());
    assert!(items[2].is_err());
    assert_eq!(ledger.open_cursors(), 0);
}

#[test]
fn cursor_snapshot_ignores_later_writes() {
    let mut ledger = seeded();
    let snapshot: Vec<_> = ledger
        .state_by_range("a", "")
        .unwrap()
        .map(|entry| entry.unwrap().key)
        .collect();
    ledger.put_state("e", b"e").unwrap();

    assert_eq!(snapshot, vec!["a", "b", "c", "d"]);
}

#[test]
fn injected_put_and_get_failures() {
    let mut ledger = MemoryLedger::new();
    ledger.fail_put_on("x");
    ledger.fail_get_on("y");

    assert!(ledger.put_state("x", b"1").is_err());
    assert!(ledger.get_state("y").is_err());

    ledger.clear_faults();
    ledger.put_state("x", b"1").unwrap();
    assert_eq!(ledger.get_state("x").unwrap(), Some(b"1".to_vec()));
}
