//! Integration tests for the run loop: ordering, waves, region filtering,
//! and the abort signal. Each test drives a full session through a buffer
//! sink and inspects the emitted `[Run]` lines and counters.

use vtest::{expect, BufferConsole, Config, Harness};

fn buffered() -> (Harness, BufferConsole) {
    let sink = BufferConsole::new();
    let harness = Harness::with_console(Box::new(sink.clone()));
    (harness, sink)
}

fn noop(_h: &mut Harness) {}

fn passing(h: &mut Harness) {
    expect!(h, true);
}

fn failing(h: &mut Harness) {
    expect!(h, false);
}

#[test]
fn entries_run_in_insertion_order() {
    let (mut h, sink) = buffered();
    h.add("alpha", noop);
    h.add("beta", noop);
    h.add("gamma", noop);
    assert_eq!(h.run_all(), 0);
    let out = sink.contents();
    let a = out.find("[Run] alpha").unwrap();
    let b = out.find("[Run] beta").unwrap();
    let c = out.find("[Run] gamma").unwrap();
    assert!(a < b && b < c);
    assert_eq!(h.stats().run, 3);
}

#[test]
fn add_first_runs_before_previously_queued_entries() {
    let (mut h, sink) = buffered();
    h.add("later1", noop);
    h.add("later2", noop);
    h.add_first("setup", noop);
    h.run_all();
    let out = sink.contents();
    let setup = out.find("[Run] setup").unwrap();
    let later1 = out.find("[Run] later1").unwrap();
    assert!(setup < later1);
}

#[test]
fn duplicate_names_run_independently() {
    let (mut h, _sink) = buffered();
    h.add("same", passing);
    h.add("same", passing);
    assert_eq!(h.run_all(), 0);
    assert_eq!(h.stats().run, 2);
    assert_eq!(h.stats().checked, 2);
}

#[test]
fn reentrant_registration_runs_in_a_later_wave() {
    fn spawner(h: &mut Harness) {
        h.add("late", passing);
    }
    let (mut h, sink) = buffered();
    h.add("spawner", spawner);
    h.add("sibling", noop);
    assert_eq!(h.run_all(), 0);
    let out = sink.contents();
    let spawner_at = out.find("[Run] spawner").unwrap();
    let sibling_at = out.find("[Run] sibling").unwrap();
    let late_at = out.find("[Run] late").unwrap();
    // The new entry lands in the next wave, after the whole first wave.
    assert!(spawner_at < sibling_at && sibling_at < late_at);
    assert_eq!(h.stats().run, 3);
    assert_eq!(h.stats().passed, 1);
}

#[test]
fn reentrant_chain_drains_across_waves() {
    fn third(h: &mut Harness) {
        expect!(h, true);
    }
    fn second(h: &mut Harness) {
        h.add("third", third);
    }
    fn first(h: &mut Harness) {
        h.add("second", second);
    }
    let (mut h, _sink) = buffered();
    h.add("first", first);
    assert_eq!(h.run_all(), 0);
    assert_eq!(h.stats().run, 3);
    assert_eq!(h.stats().passed, 1);
}

#[test]
fn denied_region_is_skipped() {
    let (mut h, sink) = buffered();
    h.add("rooted", noop);
    h.set_region("k1");
    h.add("in_k1", noop);
    h.end_region();
    h.set_region("k2");
    h.add("in_k2", noop);
    h.end_region();

    h.deny_region("k1");
    assert_eq!(h.run_all(), 0);
    assert_eq!(h.stats().run, 2);
    let out = sink.contents();
    assert!(out.contains("[Run] rooted"));
    assert!(!out.contains("[Run] in_k1"));
    assert!(out.contains("[Run] in_k2"));
}

#[test]
fn disable_all_regions_runs_only_explicit_allows() {
    let (mut h, sink) = buffered();
    h.add("rooted", noop);
    h.set_region("k1");
    h.add("in_k1", noop);
    h.end_region();
    h.set_region("k2");
    h.add("in_k2", noop);
    h.end_region();

    h.disable_all_regions();
    h.allow_region("k1");
    assert_eq!(h.run_all(), 0);
    assert_eq!(h.stats().run, 1);
    assert!(sink.contents().contains("[Run] in_k1"));
    assert!(!sink.contents().contains("[Run] rooted"));
}

#[test]
fn end_region_resets_to_root_not_the_enclosing_label() {
    let (mut h, _sink) = buffered();
    h.set_region("k2");
    h.set_region("k1");
    h.add("inner", noop);
    h.end_region();
    // After end_region the label is __root__, not k2.
    h.add("after", noop);
    h.deny_region("__root__");
    h.run_all();
    assert_eq!(h.stats().run, 1);
}

#[test]
fn exit_on_failure_stops_subsequent_entries() {
    let (mut h, sink) = buffered();
    h.set_exit_on_failure(true);
    h.add("doomed", failing);
    h.add("never", passing);
    let failed = h.run_all();
    assert_eq!(failed, 1);
    assert!(h.aborted());
    assert_eq!(h.stats().run, 1);
    assert!(!sink.contents().contains("[Run] never"));
}

#[test]
fn exit_on_failure_ignores_checks_after_the_abort() {
    fn two_checks(h: &mut Harness) {
        expect!(h, false);
        expect!(h, true);
    }
    let (mut h, _sink) = buffered();
    h.set_exit_on_failure(true);
    h.add("two_checks", two_checks);
    assert_eq!(h.run_all(), 1);
    assert_eq!(h.stats().checked, 1);
}

#[test]
fn without_exit_on_failure_the_run_continues() {
    let (mut h, sink) = buffered();
    h.add("doomed", failing);
    h.add("still_runs", passing);
    assert_eq!(h.run_all(), 1);
    assert_eq!(h.stats().run, 2);
    assert!(sink.contents().contains("[Run] still_runs"));
}

#[test]
fn run_all_returns_checked_minus_passed() {
    fn mixed(h: &mut Harness) {
        expect!(h, true);
        expect!(h, false);
        expect!(h, false);
    }
    let (mut h, _sink) = buffered();
    h.add("mixed", mixed);
    assert_eq!(h.run_all(), 2);
    assert_eq!(h.stats().checked, 3);
    assert_eq!(h.stats().passed, 1);
}

#[test]
fn cli_config_drives_the_filter() {
    let (mut h, _sink) = buffered();
    Config::from_args(["-rx", "-ra=k1"]).apply(&mut h);
    h.add("rooted", noop);
    h.set_region("k1");
    h.add("in_k1", noop);
    h.end_region();
    h.run_all();
    assert_eq!(h.stats().run, 1);
}

#[test]
fn independent_sessions_do_not_share_state() {
    let (mut first, _s1) = buffered();
    first.add("fails", failing);
    assert_eq!(first.run_all(), 1);

    let (mut second, _s2) = buffered();
    second.add("passes", passing);
    assert_eq!(second.run_all(), 0);
    assert_eq!(second.stats().checked, 1);
}
