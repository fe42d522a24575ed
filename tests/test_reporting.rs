//! Integration tests for the reporting path: message shapes, the failure
//! log, summary idempotence, and the key-value cache contract.

use vtest::{expect, expect_eq, BufferConsole, Harness, TestValue};

fn buffered() -> (Harness, BufferConsole) {
    let sink = BufferConsole::new();
    let harness = Harness::with_console(Box::new(sink.clone()));
    (harness, sink)
}

#[test]
fn pass_line_carries_entry_name_line_and_case() {
    let (mut h, sink) = buffered();
    h.add("named", |h| {
        expect!(h, true);
    });
    h.run_all();
    let out = sink.contents();
    assert!(out.contains("PASS named, line"));
    assert!(out.contains("case 0"));
}

#[test]
fn error_line_strips_the_source_directory() {
    let (mut h, sink) = buffered();
    h.add("named", |h| {
        expect!(h, false);
    });
    h.run_all();
    let out = sink.contents();
    assert!(out.contains("ERROR named, line"));
    // file!() yields a path with directories; only the base name is shown.
    assert!(out.contains("test_reporting.rs"));
    assert!(!out.contains("tests/test_reporting.rs"));
}

#[test]
fn mismatch_renders_both_operands_before_the_error() {
    let (mut h, sink) = buffered();
    h.add("compare", |h| {
        expect_eq!(h, 1.5f64, "1.5");
    });
    h.run_all();
    let out = sink.contents();
    let tip_at = out.find("Expect: 1.500000, Return Value: 1.5").unwrap();
    let err_at = out.find("ERROR compare").unwrap();
    assert!(tip_at < err_at);
}

#[test]
fn summary_totals_match_the_counters() {
    let (mut h, sink) = buffered();
    h.add("mixed", |h| {
        expect!(h, true);
        expect!(h, false);
    });
    h.run_all();
    assert!(sink.contents().contains("Run 1, Test 2, Pass 1, Failed 1"));
}

#[test]
fn summary_reprints_failures_when_detail_is_enabled() {
    let (mut h, sink) = buffered();
    h.add("named", |h| {
        expect!(h, false);
    });
    h.run_all();
    let out = sink.contents();
    // Once when the check failed, once in the summary detail.
    assert_eq!(out.matches("ERROR named, line").count(), 2);
}

#[test]
fn summary_detail_can_be_disabled() {
    let (mut h, sink) = buffered();
    h.set_report_detail(false);
    h.add("named", |h| {
        expect!(h, false);
    });
    h.run_all();
    assert_eq!(sink.contents().matches("ERROR named, line").count(), 1);
}

#[test]
fn summary_is_idempotent() {
    let (mut h, sink) = buffered();
    h.add("ok", |h| {
        expect!(h, true);
    });
    h.run_all();
    h.summary();
    let out = sink.contents();
    assert_eq!(out.matches("Run 1, Test 1, Pass 1, Failed 0").count(), 2);
}

#[test]
fn failure_log_preserves_order() {
    let (mut h, _sink) = buffered();
    h.add("first_fail", |h| {
        expect!(h, false);
    });
    h.add("second_fail", |h| {
        expect!(h, false);
    });
    h.run_all();
    let failures = h.stats().failures();
    assert_eq!(failures.len(), 2);
    assert!(failures[0].contains("first_fail"));
    assert!(failures[1].contains("second_fail"));
}

#[test]
fn exit_on_failure_prints_summary_at_the_failing_check() {
    let (mut h, sink) = buffered();
    h.set_exit_on_failure(true);
    h.add("doomed", |h| {
        expect!(h, false);
    });
    h.run_all();
    let out = sink.contents();
    assert!(out.contains("Run 1, Test 1, Pass 0, Failed 1"));
    // The normal end banner never prints on the abort path.
    assert!(!out.contains("Unit test end."));
}

#[test]
fn kv_cache_passes_state_between_entries() {
    fn producer(h: &mut Harness) {
        h.kv_set("token", TestValue::from("issued"));
    }
    fn consumer(h: &mut Harness) {
        expect_eq!(h, h.kv_get("token"), "issued");
    }
    let (mut h, _sink) = buffered();
    h.add("producer", producer);
    h.add("consumer", consumer);
    assert_eq!(h.run_all(), 0);
}

#[test]
fn kv_cache_miss_reads_as_false() {
    let (mut h, _sink) = buffered();
    h.add("reader", |h| {
        expect_eq!(h, h.kv_get("never_set"), false);
    });
    assert_eq!(h.run_all(), 0);
}
