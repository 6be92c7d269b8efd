//! Fixed-width numeric primitives and their little-endian wire layout.

use std::fmt;

use crate::errors::{CodecError, CodecResult};
use crate::value::Value;

/// Largest float32 magnitude we accept, per the wire contract.
pub const FLOAT32_MAX_MAGNITUDE: f64 = 3.4e38;

/// How a primitive's bits are interpreted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NumKind {
    /// Two's complement signed integer.
    Signed,

    /// Unsigned integer.
    Unsigned,

    /// IEEE-754 float.
    Float,
}

impl fmt::Display for NumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Signed => "signed",
            Self::Unsigned => "unsigned",
            Self::Float => "float",
        })
    }
}

/// Fixed-width primitive.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Primitive {
    /// `unsigned8`
    U8,
    /// `unsigned16`
    U16,
    /// `unsigned32`
    U32,
    /// 8 byte unsigned, raw access only.
    U64,
    /// `int8`
    I8,
    /// `int16`
    I16,
    /// `int32`
    I32,
    /// 8 byte signed, raw access only.
    I64,
    /// `float32`
    F32,
    /// `float64`
    F64,
}

impl Primitive {
    /// The primitives that have registry names, in registration order.
    pub const NAMED: [Primitive; 8] = [
        Self::U8,
        Self::U16,
        Self::U32,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::F32,
        Self::F64,
    ];

    /// Resolves a raw width/kind pair.
    pub fn from_parts(width: usize, kind: NumKind) -> CodecResult<Self> {
        let p = match (kind, width) {
            (NumKind::Unsigned, 1) => Self::U8,
            (NumKind::Unsigned, 2) => Self::U16,
            (NumKind::Unsigned, 4) => Self::U32,
            (NumKind::Unsigned, 8) => Self::U64,
            (NumKind::Signed, 1) => Self::I8,
            (NumKind::Signed, 2) => Self::I16,
            (NumKind::Signed, 4) => Self::I32,
            (NumKind::Signed, 8) => Self::I64,
            (NumKind::Float, 4) => Self::F32,
            (NumKind::Float, 8) => Self::F64,
            _ => return Err(CodecError::InvalidPrimitive { width, kind }),
        };
        Ok(p)
    }

    /// Width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }

    /// Numeric kind.
    pub const fn kind(self) -> NumKind {
        match self {
            Self::U8 | Self::U16 | Self::U32 | Self::U64 => NumKind::Unsigned,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 => NumKind::Signed,
            Self::F32 | Self::F64 => NumKind::Float,
        }
    }

    /// Type name, matching the registry name for the named primitives.
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "unsigned8",
            Self::U16 => "unsigned16",
            Self::U32 => "unsigned32",
            Self::U64 => "unsigned64",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }

    /// Inclusive integer range, or `None` for floats.
    pub const fn int_range(self) -> Option<(i128, i128)> {
        match self {
            Self::U8 => Some((0, u8::MAX as i128)),
            Self::U16 => Some((0, u16::MAX as i128)),
            Self::U32 => Some((0, u32::MAX as i128)),
            Self::U64 => Some((0, u64::MAX as i128)),
            Self::I8 => Some((i8::MIN as i128, i8::MAX as i128)),
            Self::I16 => Some((i16::MIN as i128, i16::MAX as i128)),
            Self::I32 => Some((i32::MIN as i128, i32::MAX as i128)),
            Self::I64 => Some((i64::MIN as i128, i64::MAX as i128)),
            Self::F32 | Self::F64 => None,
        }
    }

    fn out_of_range(self, value: &Value) -> CodecError {
        CodecError::OutOfRange {
            target: self,
            value: value.clone(),
        }
    }

    /// Converts a value into an integer within this primitive's range.
    ///
    /// Floats are accepted if they're integral.
    pub fn fit_integer(self, value: &Value) -> CodecResult<i128> {
        let (min, max) = self.int_range().ok_or_else(|| self.out_of_range(value))?;

        let n = match value {
            Value::Int(_) | Value::UInt(_) => value.as_integer(),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                // Anything past this isn't going to fit any of our ranges.
                if f.abs() > u64::MAX as f64 {
                    None
                } else {
                    Some(*f as i128)
                }
            }
            Value::Float(_) => None,
            Value::Struct(_) => return Err(shape_mismatch(self, value)),
        };

        match n {
            Some(n) if (min..=max).contains(&n) => Ok(n),
            _ => Err(self.out_of_range(value)),
        }
    }

    /// Converts a value into a float this primitive can hold.
    pub fn fit_float(self, value: &Value) -> CodecResult<f64> {
        if self.kind() != NumKind::Float {
            return Err(self.out_of_range(value));
        }

        let f = value.as_f64().ok_or_else(|| shape_mismatch(self, value))?;
        if self == Self::F32 && f.abs() > FLOAT32_MAX_MAGNITUDE {
            return Err(self.out_of_range(value));
        }

        Ok(f)
    }

    /// Encodes a value into `out`, which must be exactly [`Self::width`]
    /// bytes.  Nothing is written if the value doesn't fit.
    pub fn encode(self, value: &Value, out: &mut [u8]) -> CodecResult<()> {
        debug_assert_eq!(out.len(), self.width(), "primitive: wrong slot width");
        match self {
            Self::U8 => out.copy_from_slice(&(self.fit_integer(value)? as u8).to_le_bytes()),
            Self::U16 => out.copy_from_slice(&(self.fit_integer(value)? as u16).to_le_bytes()),
            Self::U32 => out.copy_from_slice(&(self.fit_integer(value)? as u32).to_le_bytes()),
            Self::U64 => out.copy_from_slice(&(self.fit_integer(value)? as u64).to_le_bytes()),
            Self::I8 => out.copy_from_slice(&(self.fit_integer(value)? as i8).to_le_bytes()),
            Self::I16 => out.copy_from_slice(&(self.fit_integer(value)? as i16).to_le_bytes()),
            Self::I32 => out.copy_from_slice(&(self.fit_integer(value)? as i32).to_le_bytes()),
            Self::I64 => out.copy_from_slice(&(self.fit_integer(value)? as i64).to_le_bytes()),
            Self::F32 => out.copy_from_slice(&(self.fit_float(value)? as f32).to_le_bytes()),
            Self::F64 => out.copy_from_slice(&self.fit_float(value)?.to_le_bytes()),
        }
        Ok(())
    }

    /// Decodes a value from `bytes`, which must be exactly [`Self::width`]
    /// bytes.
    pub fn decode(self, bytes: &[u8]) -> Value {
        debug_assert_eq!(bytes.len(), self.width(), "primitive: wrong slot width");
        match self {
            Self::U8 => u8::from_le_bytes(arr(bytes)).into(),
            Self::U16 => u16::from_le_bytes(arr(bytes)).into(),
            Self::U32 => u32::from_le_bytes(arr(bytes)).into(),
            Self::U64 => u64::from_le_bytes(arr(bytes)).into(),
            Self::I8 => i8::from_le_bytes(arr(bytes)).into(),
            Self::I16 => i16::from_le_bytes(arr(bytes)).into(),
            Self::I32 => i32::from_le_bytes(arr(bytes)).into(),
            Self::I64 => i64::from_le_bytes(arr(bytes)).into(),
            Self::F32 => f32::from_le_bytes(arr(bytes)).into(),
            Self::F64 => f64::from_le_bytes(arr(bytes)).into(),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn shape_mismatch(p: Primitive, value: &Value) -> CodecError {
    CodecError::ShapeMismatch {
        expected: p.name().to_owned(),
        found: value.shape().to_owned(),
    }
}

fn arr<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut buf = [0; N];
    buf.copy_from_slice(&bytes[..N]);
    buf
}

/// Rust scalar types that map onto one primitive.
///
/// Used by plugin codecs built with [`crate::impl_struct_codec`].
pub trait Scalar: Copy {
    /// The primitive this type is laid out as.
    const PRIMITIVE: Primitive;

    /// Wraps into a [`Value`].
    fn into_value(self) -> Value;

    /// Extracts from a [`Value`], checking the range.
    fn from_value(value: &Value) -> CodecResult<Self>;
}

/// Simple macro to wrap the fixed size int types, not much to see.
macro_rules! impl_int_scalar {
    ( $ity:ident $prim:ident ) => {
        impl Scalar for $ity {
            const PRIMITIVE: Primitive = Primitive::$prim;

            fn into_value(self) -> Value {
                self.into()
            }

            fn from_value(value: &Value) -> CodecResult<Self> {
                Primitive::$prim.fit_integer(value).map(|n| n as $ity)
            }
        }
    };
}

impl_int_scalar!(u8 U8);
impl_int_scalar!(u16 U16);
impl_int_scalar!(u32 U32);
impl_int_scalar!(u64 U64);
impl_int_scalar!(i8 I8);
impl_int_scalar!(i16 I16);
impl_int_scalar!(i32 I32);
impl_int_scalar!(i64 I64);

impl Scalar for f32 {
    const PRIMITIVE: Primitive = Primitive::F32;

    fn into_value(self) -> Value {
        self.into()
    }

    fn from_value(value: &Value) -> CodecResult<Self> {
        Primitive::F32.fit_float(value).map(|f| f as f32)
    }
}

impl Scalar for f64 {
    const PRIMITIVE: Primitive = Primitive::F64;

    fn into_value(self) -> Value {
        self.into()
    }

    fn from_value(value: &Value) -> CodecResult<Self> {
        Primitive::F64.fit_float(value)
    }
}

impl Scalar for bool {
    const PRIMITIVE: Primitive = Primitive::U8;

    fn into_value(self) -> Value {
        Value::UInt(self as u64)
    }

    fn from_value(value: &Value) -> CodecResult<Self> {
        match value.as_integer() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(Primitive::U8.out_of_range(value)),
        }
    }
}
