//! Picks the narrowest numeric type for a value.
//!
//! Integral values try `int8`, `int16` and `int32` in that order.  Anything
//! else becomes `float32` if it fits the float32 magnitude limit and survives a
//! round trip through single precision exactly, otherwise `float64`.  The
//! choice is advisory and never overrides an explicit template entry.

use crate::primitive::{FLOAT32_MAX_MAGNITUDE, Primitive};
use crate::value::Value;

const INT_CANDIDATES: [Primitive; 3] = [Primitive::I8, Primitive::I16, Primitive::I32];

/// Infers the primitive for a numeric value, or `None` for struct values.
pub fn infer_value(value: &Value) -> Option<Primitive> {
    match value {
        Value::Int(_) | Value::UInt(_) => value.as_integer().map(infer_integer),
        Value::Float(f) => Some(infer_number(*f)),
        Value::Struct(_) => None,
    }
}

/// Infers the primitive for an integer.
///
/// Past int32 there's no wider integer type to pick, so large integers become
/// floats.  Anything float64 can't hold exactly (above 2^53 in magnitude,
/// unless it happens to be representable) loses precision when written.
/// Callers that need such values intact should put an explicit type in the
/// template.
pub fn infer_integer(n: i128) -> Primitive {
    if let Some(p) = narrowest_int(n) {
        return p;
    }

    // Saturating casts both ways, so this only holds when it's exact.
    let as_f32 = n as f32;
    if (as_f32 as f64).abs() <= FLOAT32_MAX_MAGNITUDE && as_f32 as i128 == n {
        Primitive::F32
    } else {
        Primitive::F64
    }
}

/// Infers the primitive for an arbitrary number.
pub fn infer_number(v: f64) -> Primitive {
    if !v.is_finite() {
        return Primitive::F64;
    }

    if v.fract() == 0.0 && v.abs() <= i32::MAX as f64 + 1.0 {
        if let Some(p) = narrowest_int(v as i128) {
            return p;
        }
    }

    if v.abs() <= FLOAT32_MAX_MAGNITUDE && (v as f32) as f64 == v {
        Primitive::F32
    } else {
        Primitive::F64
    }
}

fn narrowest_int(n: i128) -> Option<Primitive> {
    INT_CANDIDATES.into_iter().find(|p| {
        p.int_range()
            .is_some_and(|(min, max)| (min..=max).contains(&n))
    })
}
