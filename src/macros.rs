//! Assertion and batch-check macros.
//!
//! These are thin sugar over [`crate::Harness::check`] and
//! [`crate::Harness::check_eq`]: they capture the call site (line, file,
//! case index) and build [`crate::TestValue`]s from raw operands. The batch
//! variants iterate value tables and report each row with its index; no new
//! semantics live here.

/// Emits a cyan tip line. Accepts `format!` arguments.
#[macro_export]
macro_rules! tip {
    ($h:expr, $($arg:tt)*) => {
        $h.tip(&format!($($arg)*))
    };
}

/// Checks a boolean condition.
#[macro_export]
macro_rules! expect {
    ($h:expr, $cond:expr) => {
        $h.check(
            $cond,
            $crate::CheckSite {
                line: line!(),
                file: file!(),
                case: 0,
            },
        )
    };
}

/// Emits a tip line, then checks a boolean condition.
#[macro_export]
macro_rules! vexpect {
    ($h:expr, $text:expr, $cond:expr) => {{
        $crate::tip!($h, "{}", $text);
        $crate::expect!($h, $cond);
    }};
}

/// Compares two operands of any supported primitive kind under the
/// cross-kind equality relation.
///
/// # Examples
///
/// ```rust
/// use vtest::{expect_eq, Harness, BufferConsole};
/// let mut h = Harness::with_console(Box::new(BufferConsole::new()));
/// h.add("widths", |h| {
///     expect_eq!(h, -1i32, 4294967295u32);
///     expect_eq!(h, 1.0f32, 1.0f64 + 1e-12);
/// });
/// assert_eq!(h.run_all(), 0);
/// ```
#[macro_export]
macro_rules! expect_eq {
    ($h:expr, $a:expr, $b:expr) => {
        $h.check_eq(
            $crate::TestValue::from($a),
            $crate::TestValue::from($b),
            $crate::CheckSite {
                line: line!(),
                file: file!(),
                case: 0,
            },
        )
    };
}

/// Emits a tip line, then compares two operands.
#[macro_export]
macro_rules! vexpect_eq {
    ($h:expr, $text:expr, $a:expr, $b:expr) => {{
        $crate::tip!($h, "{}", $text);
        $crate::expect_eq!($h, $a, $b);
    }};
}

/// Runs a predicate over every row of a value table, expecting a truthy
/// result for each; failures report the row index as the case number.
///
/// The callable receives the whole row as `&[TestValue]`.
#[macro_export]
macro_rules! bat_check {
    ($h:expr, $f:expr, $table:expr) => {
        for (i, row) in $table.iter().enumerate() {
            let got = $crate::TestValue::from($f(&row[..]));
            $h.check_eq(
                $crate::TestValue::from(true),
                got,
                $crate::CheckSite {
                    line: line!(),
                    file: file!(),
                    case: i,
                },
            );
        }
    };
}

/// Like [`bat_check!`], but the first column of each row is the expected
/// value and the callable receives the remaining columns.
#[macro_export]
macro_rules! vbat_check {
    ($h:expr, $f:expr, $table:expr) => {
        for (i, row) in $table.iter().enumerate() {
            let got = $crate::TestValue::from($f(&row[1..]));
            $h.check_eq(
                row[0].clone(),
                got,
                $crate::CheckSite {
                    line: line!(),
                    file: file!(),
                    case: i,
                },
            );
        }
    };
}

/// Builds one row of [`crate::TestValue`]s from mixed primitives.
#[macro_export]
macro_rules! vals {
    ($($v:expr),* $(,)?) => {
        vec![$($crate::TestValue::from($v)),*]
    };
}

/// Builds a [`crate::ValueTable`] from bracketed rows of mixed primitives.
///
/// ```rust
/// use vtest::{table, ValueTable};
/// let t: ValueTable = table![[1i32, 2i32, 3i32], [10i32, 20i32, 30i32]];
/// assert_eq!(t.len(), 2);
/// ```
#[macro_export]
macro_rules! table {
    ($([$($v:expr),* $(,)?]),* $(,)?) => {
        vec![$(vec![$($crate::TestValue::from($v)),*]),*]
    };
}
