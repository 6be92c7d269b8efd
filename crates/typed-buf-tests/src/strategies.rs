//! Value strategies for every standard type.

use std::ops::Range;

use proptest::array::uniform12;
use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Union};
use strata_typed_buf::Value as BufValue;
use strata_typed_buf_types::{
    BrickColor, CFrame, Color3, DateTime, TweenInfo, UDim, UDim2, Vector2, Vector2int16, Vector3,
    Vector3int16,
};

/// Finite doubles, wide enough to hit every exponent we care about.
pub fn finite_f64() -> Range<f64> {
    -1e300f64..1e300f64
}

/// Singles within the float32 magnitude limit.
pub fn finite_f32() -> Range<f32> {
    -3.4e38f32..3.4e38f32
}

/// `unsigned8` values.
pub fn unsigned8() -> impl Strategy<Value = BufValue> {
    any::<u8>().prop_map(BufValue::from)
}

/// `unsigned16` values.
pub fn unsigned16() -> impl Strategy<Value = BufValue> {
    any::<u16>().prop_map(BufValue::from)
}

/// `unsigned32` values.
pub fn unsigned32() -> impl Strategy<Value = BufValue> {
    any::<u32>().prop_map(BufValue::from)
}

/// `int8` values.
pub fn int8() -> impl Strategy<Value = BufValue> {
    any::<i8>().prop_map(BufValue::from)
}

/// `int16` values.
pub fn int16() -> impl Strategy<Value = BufValue> {
    any::<i16>().prop_map(BufValue::from)
}

/// `int32` values.
pub fn int32() -> impl Strategy<Value = BufValue> {
    any::<i32>().prop_map(BufValue::from)
}

/// `float32` values, already at single precision so they round-trip exactly.
pub fn float32() -> impl Strategy<Value = BufValue> {
    finite_f32().prop_map(BufValue::from)
}

/// `float64` values.
pub fn float64() -> impl Strategy<Value = BufValue> {
    finite_f64().prop_map(BufValue::from)
}

/// `Vector2` values.
pub fn vector2() -> impl Strategy<Value = BufValue> {
    (finite_f64(), finite_f64()).prop_map(|(x, y)| Vector2::new(x, y).into())
}

/// `Vector3` values.
pub fn vector3() -> impl Strategy<Value = BufValue> {
    (finite_f64(), finite_f64(), finite_f64()).prop_map(|(x, y, z)| Vector3::new(x, y, z).into())
}

/// `Vector2int16` values.
pub fn vector2int16() -> impl Strategy<Value = BufValue> {
    any::<(i16, i16)>().prop_map(|(x, y)| Vector2int16::new(x, y).into())
}

/// `Vector3int16` values.
pub fn vector3int16() -> impl Strategy<Value = BufValue> {
    any::<(i16, i16, i16)>().prop_map(|(x, y, z)| Vector3int16::new(x, y, z).into())
}

/// `CFrame` values.
pub fn cframe() -> impl Strategy<Value = BufValue> {
    uniform12(finite_f64()).prop_map(|m| {
        CFrame::new(
            m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], m[9], m[10], m[11],
        )
        .into()
    })
}

/// `Color3` values.
pub fn color3() -> impl Strategy<Value = BufValue> {
    (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(r, g, b)| Color3::new(r, g, b).into())
}

/// `BrickColor` values.
pub fn brick_color() -> impl Strategy<Value = BufValue> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| BrickColor::from(Color3::from_rgb8(r, g, b)).into())
}

/// `DateTime` values.
pub fn date_time() -> impl Strategy<Value = BufValue> {
    any::<i64>().prop_map(|ms| DateTime::new(ms).into())
}

/// `TweenInfo` values.
pub fn tween_info() -> impl Strategy<Value = BufValue> {
    (
        0.0f32..1e6,
        any::<u8>(),
        any::<u8>(),
        any::<i32>(),
        any::<bool>(),
        0.0f64..1e6,
    )
        .prop_map(|(time, style, dir, repeat, reverses, delay)| {
            TweenInfo::new(time, style, dir, repeat, reverses, delay).into()
        })
}

/// `UDim` values.
pub fn udim() -> impl Strategy<Value = BufValue> {
    (finite_f64(), any::<i64>()).prop_map(|(s, o)| UDim::new(s, o).into())
}

/// `UDim2` values.
pub fn udim2() -> impl Strategy<Value = BufValue> {
    (finite_f64(), any::<i64>(), finite_f64(), any::<i64>())
        .prop_map(|(xs, xo, ys, yo)| UDim2::new(xs, xo, ys, yo).into())
}

/// Any standard type paired with a value for it.
pub fn any_typed_value() -> impl Strategy<Value = (&'static str, BufValue)> {
    fn tag(
        name: &'static str,
        s: impl Strategy<Value = BufValue> + 'static,
    ) -> BoxedStrategy<(&'static str, BufValue)> {
        s.prop_map(move |v| (name, v)).boxed()
    }

    Union::new(vec![
        tag("BrickColor", brick_color()),
        tag("CFrame", cframe()),
        tag("Color3", color3()),
        tag("DateTime", date_time()),
        tag("TweenInfo", tween_info()),
        tag("UDim", udim()),
        tag("UDim2", udim2()),
        tag("Vector2", vector2()),
        tag("Vector2int16", vector2int16()),
        tag("Vector3", vector3()),
        tag("Vector3int16", vector3int16()),
        tag("unsigned8", unsigned8()),
        tag("unsigned16", unsigned16()),
        tag("unsigned32", unsigned32()),
        tag("int8", int8()),
        tag("int16", int16()),
        tag("int32", int32()),
        tag("float32", float32()),
        tag("float64", float64()),
    ])
}
