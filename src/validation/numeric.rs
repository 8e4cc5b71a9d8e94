//! Exact numeric comparison and deep equality over JSON values

use num_cmp::NumCmp;
use serde_json::{Number, Value};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
enum Repr {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl Repr {
    fn of(number: &Number) -> Option<Self> {
        if let Some(v) = number.as_u64() {
            Some(Repr::Unsigned(v))
        } else if let Some(v) = number.as_i64() {
            Some(Repr::Signed(v))
        } else {
            number.as_f64().map(Repr::Float)
        }
    }
}

/// Compare two JSON numbers by mathematical value without lossy casts.
///
/// Returns `None` only when a comparison involves NaN, which `serde_json` never produces.
pub fn compare(left: &Number, right: &Number) -> Option<Ordering> {
    let (left, right) = (Repr::of(left)?, Repr::of(right)?);
    match (left, right) {
        (Repr::Unsigned(a), Repr::Unsigned(b)) => Some(a.cmp(&b)),
        (Repr::Unsigned(a), Repr::Signed(b)) => NumCmp::num_cmp(a, b),
        (Repr::Unsigned(a), Repr::Float(b)) => NumCmp::num_cmp(a, b),
        (Repr::Signed(a), Repr::Unsigned(b)) => NumCmp::num_cmp(a, b),
        (Repr::Signed(a), Repr::Signed(b)) => Some(a.cmp(&b)),
        (Repr::Signed(a), Repr::Float(b)) => NumCmp::num_cmp(a, b),
        (Repr::Float(a), Repr::Unsigned(b)) => NumCmp::num_cmp(a, b),
        (Repr::Float(a), Repr::Signed(b)) => NumCmp::num_cmp(a, b),
        (Repr::Float(a), Repr::Float(b)) => a.partial_cmp(&b),
    }
}

/// Structural equality: numbers by value, arrays element-wise, objects by key set.
///
/// Booleans and numbers are never equal to each other.
pub fn deep_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => compare(a, b) == Some(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| deep_equal(x, y)))
        }
        _ => false,
    }
}
