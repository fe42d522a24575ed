//! End-to-end tour of the harness: registration, region blocks, batch
//! tables, the key-value cache, and CLI-driven configuration.
//!
//! Try it with the recognized flags, e.g.:
//!
//! ```text
//! demo -rd=k1          # skip the k1 region
//! demo -rx -ra=k2      # run only the k2 region
//! demo -e              # stop at the first failing check
//! ```

use std::process::ExitCode;
use vtest::{bat_check, expect, expect_eq, table, tip, vexpect_eq, Config, Harness, TestValue};

fn init_env(h: &mut Harness) {
    tip!(h, "init unit test env here...");
    h.kv_set("base", TestValue::from(10i32));
}

fn t_values(h: &mut Harness) {
    tip!(h, "comparison value tour...");
    expect!(h, TestValue::from(true) == TestValue::from(true));
    expect_eq!(h, 1i16, 1u64);
    expect_eq!(h, -1i32, 4294967295u32);
    expect_eq!(h, 1.0f32, 1.0f64);
    expect_eq!(h, "1", "1");
    expect!(h, TestValue::from("1") != TestValue::from(1i32));
}

fn count(a: i32, b: i32) -> i32 {
    a + b
}

fn t_batch(h: &mut Harness) {
    tip!(h, "batch test of count with multiple cases...");
    // Row format: expected output, then inputs.
    let cases = table![[2i32, 1i32, 1i32], [3i32, 1i32, 2i32]];
    vtest::vbat_check!(
        h,
        |args: &[TestValue]| count(args[0].as_i32().unwrap(), args[1].as_i32().unwrap()),
        cases
    );
}

fn t_predicates(h: &mut Harness) {
    let cases = table![[4i32, 4i32], [7i32, 7i32]];
    bat_check!(h, |row: &[TestValue]| row[0] == row[1], cases);
}

fn t_cache(h: &mut Harness) {
    vexpect_eq!(h, "value stored by init_env", h.kv_get("base"), 10i32);
}

fn t_late(h: &mut Harness) {
    tip!(h, "registered while the run was already underway");
    expect!(h, true);
}

fn t_reentrant(h: &mut Harness) {
    h.add("t_late", t_late);
    expect!(h, true);
}

fn t_k1(h: &mut Harness) {
    tip!(h, "k1, from demo");
}

fn t_k2(h: &mut Harness) {
    tip!(h, "k2, from demo");
}

fn main() -> ExitCode {
    let mut h = Harness::new();
    Config::from_env().apply(&mut h);

    h.add("t_values", t_values);
    h.add("t_batch", t_batch);
    h.add("t_predicates", t_predicates);
    h.add("t_cache", t_cache);
    h.add("t_reentrant", t_reentrant);

    h.set_region("k1");
    h.add("t_k1", t_k1);
    h.end_region();

    h.set_region("k2");
    h.add("t_k2", t_k2);
    h.end_region();

    // Runs before everything queued above.
    h.add_first("init_env", init_env);

    let failed = h.run_all();
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(failed.min(u8::MAX as u32) as u8)
    }
}
