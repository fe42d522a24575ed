//! The dynamically-typed comparison value used by every assertion macro.
//!
//! A `TestValue` carries one of a fixed set of primitive kinds and supports a
//! cross-kind equality relation so a single `expect_eq!` can compare, say, an
//! `i32` against a `u64` or an `f32` against an `f64`. The coercion rules are
//! deliberate and documented on [`PartialEq`] below; they favor predictability
//! over mathematical purity (absolute-epsilon floats, unsigned wrap-around
//! integers).

use std::fmt;
use thiserror::Error;

/// Absolute tolerance for floating-point equality and float truthiness.
///
/// This is an absolute epsilon, not a relative one, so comparisons of very
/// large magnitudes lose precision. Downstream suites depend on the exact
/// threshold.
pub const FLOAT_EPSILON: f64 = 1e-11;

/// Error returned by the checked accessors when the stored kind does not
/// match the requested one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("expected a {expected} value, found {actual}")]
    KindMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// A value of one of the supported primitive kinds.
///
/// The discriminant and payload are set together by construction and only
/// change by whole-value reassignment. Default is `Bool(false)`, which is
/// also what the key-value cache hands back on a miss.
///
/// # Examples
///
/// ```rust
/// use vtest::TestValue;
/// let v = TestValue::from(42i32);
/// assert_eq!(v.type_name(), "Int32");
/// assert_eq!(v.as_i32(), Ok(42));
/// assert!(TestValue::default() == TestValue::from(false));
/// ```
#[derive(Debug, Clone)]
pub enum TestValue {
    Bool(bool),
    Char8(i8),
    UChar8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
    WideStr(Vec<u16>),
}

/// A table of value rows, consumed by the batch-check macros.
pub type ValueTable = Vec<Vec<TestValue>>;

impl Default for TestValue {
    fn default() -> Self {
        TestValue::Bool(false)
    }
}

/// Coarse classification used by the equality table.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Class {
    Bool,
    Integer,
    Float,
    Narrow,
    Wide,
}

impl TestValue {
    /// Returns the kind name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            TestValue::Bool(_) => "Bool",
            TestValue::Char8(_) => "Char8",
            TestValue::UChar8(_) => "UChar8",
            TestValue::Int16(_) => "Int16",
            TestValue::UInt16(_) => "UInt16",
            TestValue::Int32(_) => "Int32",
            TestValue::UInt32(_) => "UInt32",
            TestValue::Int64(_) => "Int64",
            TestValue::UInt64(_) => "UInt64",
            TestValue::Float32(_) => "Float32",
            TestValue::Float64(_) => "Float64",
            TestValue::Str(_) => "Str",
            TestValue::WideStr(_) => "WideStr",
        }
    }

    fn class(&self) -> Class {
        match self {
            TestValue::Bool(_) => Class::Bool,
            TestValue::Char8(_)
            | TestValue::UChar8(_)
            | TestValue::Int16(_)
            | TestValue::UInt16(_)
            | TestValue::Int32(_)
            | TestValue::UInt32(_)
            | TestValue::Int64(_)
            | TestValue::UInt64(_) => Class::Integer,
            TestValue::Float32(_) | TestValue::Float64(_) => Class::Float,
            TestValue::Str(_) => Class::Narrow,
            TestValue::WideStr(_) => Class::Wide,
        }
    }

    /// Widens any integer kind to `u64` through its signed interpretation at
    /// the declared width. Negative values (and unsigned values whose sign
    /// bit is set) wrap to large unsigned magnitudes, so `Int32(-1)` and
    /// `UInt32(u32::MAX)` widen to the same `u64`.
    fn unsigned_widened(&self) -> u64 {
        match self {
            TestValue::Char8(v) => *v as i64 as u64,
            TestValue::UChar8(v) => *v as i8 as i64 as u64,
            TestValue::Int16(v) => *v as i64 as u64,
            TestValue::UInt16(v) => *v as i16 as i64 as u64,
            TestValue::Int32(v) => *v as i64 as u64,
            TestValue::UInt32(v) => *v as i32 as i64 as u64,
            TestValue::Int64(v) => *v as u64,
            TestValue::UInt64(v) => *v,
            _ => 0,
        }
    }

    fn float_payload(&self) -> f64 {
        match self {
            TestValue::Float32(v) => *v as f64,
            TestValue::Float64(v) => *v,
            _ => 0.0,
        }
    }

    fn kind_error(&self, expected: &'static str) -> ValueError {
        ValueError::KindMismatch {
            expected,
            actual: self.type_name(),
        }
    }

    // ------------------------------------------------------------------
    // Checked accessors. Same-width integer kinds are interchangeable by
    // bit reinterpretation; every other cross-kind request is an error.
    // ------------------------------------------------------------------

    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            TestValue::Bool(v) => Ok(*v),
            _ => Err(self.kind_error("Bool")),
        }
    }

    pub fn as_i8(&self) -> Result<i8, ValueError> {
        match self {
            TestValue::Char8(v) => Ok(*v),
            TestValue::UChar8(v) => Ok(*v as i8),
            _ => Err(self.kind_error("Char8")),
        }
    }

    pub fn as_u8(&self) -> Result<u8, ValueError> {
        match self {
            TestValue::UChar8(v) => Ok(*v),
            TestValue::Char8(v) => Ok(*v as u8),
            _ => Err(self.kind_error("UChar8")),
        }
    }

    pub fn as_i16(&self) -> Result<i16, ValueError> {
        match self {
            TestValue::Int16(v) => Ok(*v),
            TestValue::UInt16(v) => Ok(*v as i16),
            _ => Err(self.kind_error("Int16")),
        }
    }

    pub fn as_u16(&self) -> Result<u16, ValueError> {
        match self {
            TestValue::UInt16(v) => Ok(*v),
            TestValue::Int16(v) => Ok(*v as u16),
            _ => Err(self.kind_error("UInt16")),
        }
    }

    pub fn as_i32(&self) -> Result<i32, ValueError> {
        match self {
            TestValue::Int32(v) => Ok(*v),
            TestValue::UInt32(v) => Ok(*v as i32),
            _ => Err(self.kind_error("Int32")),
        }
    }

    pub fn as_u32(&self) -> Result<u32, ValueError> {
        match self {
            TestValue::UInt32(v) => Ok(*v),
            TestValue::Int32(v) => Ok(*v as u32),
            _ => Err(self.kind_error("UInt32")),
        }
    }

    pub fn as_i64(&self) -> Result<i64, ValueError> {
        match self {
            TestValue::Int64(v) => Ok(*v),
            TestValue::UInt64(v) => Ok(*v as i64),
            _ => Err(self.kind_error("Int64")),
        }
    }

    pub fn as_u64(&self) -> Result<u64, ValueError> {
        match self {
            TestValue::UInt64(v) => Ok(*v),
            TestValue::Int64(v) => Ok(*v as u64),
            _ => Err(self.kind_error("UInt64")),
        }
    }

    pub fn as_f32(&self) -> Result<f32, ValueError> {
        match self {
            TestValue::Float32(v) => Ok(*v),
            _ => Err(self.kind_error("Float32")),
        }
    }

    pub fn as_f64(&self) -> Result<f64, ValueError> {
        match self {
            TestValue::Float64(v) => Ok(*v),
            _ => Err(self.kind_error("Float64")),
        }
    }

    pub fn as_str(&self) -> Result<&str, ValueError> {
        match self {
            TestValue::Str(v) => Ok(v),
            _ => Err(self.kind_error("Str")),
        }
    }

    pub fn as_wide(&self) -> Result<&[u16], ValueError> {
        match self {
            TestValue::WideStr(v) => Ok(v),
            _ => Err(self.kind_error("WideStr")),
        }
    }
}

// ============================================================================
// Cross-kind equality
// ============================================================================

/// The cross-kind equality relation driving every assertion.
///
/// - Bool vs Bool: same truth value.
/// - Bool vs float: the float is truthy iff `|v| > 1e-11`.
/// - Bool vs integer: the integer is truthy iff its widened value is `> 0`.
/// - Float vs float: `|a - b| < 1e-11`, any mix of widths.
/// - Float vs integer: the integer widens (unsigned) to `f64` first.
/// - Integer vs integer: equal as unsigned 64-bit after sign-preserving
///   widening, so `Int32(-1) == UInt32(4294967295)`.
/// - Strings compare only against the same string kind, by exact content.
/// - Every other pairing is unequal.
impl PartialEq for TestValue {
    fn eq(&self, other: &Self) -> bool {
        use Class::*;
        match (self.class(), other.class()) {
            (Bool, Bool) => {
                matches!((self, other),
                    (TestValue::Bool(a), TestValue::Bool(b)) if a == b)
            }
            (Bool, Float) => other.truthy_float() == self.truthy_bool(),
            (Float, Bool) => self.truthy_float() == other.truthy_bool(),
            (Bool, Integer) => other.truthy_integer() == self.truthy_bool(),
            (Integer, Bool) => self.truthy_integer() == other.truthy_bool(),
            (Float, Float) => {
                (self.float_payload() - other.float_payload()).abs() < FLOAT_EPSILON
            }
            (Float, Integer) => {
                (self.float_payload() - other.unsigned_widened() as f64).abs() < FLOAT_EPSILON
            }
            (Integer, Float) => {
                (self.unsigned_widened() as f64 - other.float_payload()).abs() < FLOAT_EPSILON
            }
            (Integer, Integer) => self.unsigned_widened() == other.unsigned_widened(),
            (Narrow, Narrow) => {
                matches!((self, other),
                    (TestValue::Str(a), TestValue::Str(b)) if a == b)
            }
            (Wide, Wide) => {
                matches!((self, other),
                    (TestValue::WideStr(a), TestValue::WideStr(b)) if a == b)
            }
            _ => false,
        }
    }
}

impl TestValue {
    fn truthy_bool(&self) -> bool {
        matches!(self, TestValue::Bool(true))
    }

    fn truthy_float(&self) -> bool {
        self.float_payload().abs() > FLOAT_EPSILON
    }

    fn truthy_integer(&self) -> bool {
        self.unsigned_widened() > 0
    }
}

// ============================================================================
// Construction from primitives
// ============================================================================

macro_rules! impl_from {
    ($($prim:ty => $variant:ident),* $(,)?) => {
        $(impl From<$prim> for TestValue {
            fn from(v: $prim) -> Self {
                TestValue::$variant(v)
            }
        })*
    };
}

impl_from! {
    bool => Bool,
    i8 => Char8,
    u8 => UChar8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    String => Str,
}

impl From<&str> for TestValue {
    fn from(v: &str) -> Self {
        TestValue::Str(v.to_string())
    }
}

impl From<Vec<u16>> for TestValue {
    fn from(v: Vec<u16>) -> Self {
        TestValue::WideStr(v)
    }
}

impl From<&[u16]> for TestValue {
    fn from(v: &[u16]) -> Self {
        TestValue::WideStr(v.to_vec())
    }
}

// ============================================================================
// Render
// ============================================================================

impl fmt::Display for TestValue {
    /// Renders the value in its short diagnostic form: booleans as
    /// `true`/`false`, `Char8` as a character, other integers in base 10,
    /// floats with six fixed decimals, narrow strings verbatim. Wide strings
    /// have no defined render form and produce nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestValue::Bool(v) => write!(f, "{}", v),
            TestValue::Char8(v) => write!(f, "{}", *v as u8 as char),
            TestValue::UChar8(v) => write!(f, "{}", v),
            TestValue::Int16(v) => write!(f, "{}", v),
            TestValue::UInt16(v) => write!(f, "{}", v),
            TestValue::Int32(v) => write!(f, "{}", v),
            TestValue::UInt32(v) => write!(f, "{}", v),
            TestValue::Int64(v) => write!(f, "{}", v),
            TestValue::UInt64(v) => write!(f, "{}", v),
            TestValue::Float32(v) => write!(f, "{:.6}", v),
            TestValue::Float64(v) => write!(f, "{:.6}", v),
            TestValue::Str(v) => write!(f, "{}", v),
            TestValue::WideStr(_) => Ok(()),
        }
    }
}
