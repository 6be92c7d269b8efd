//! Dynamically typed values moved through templates.

use std::fmt;

use crate::errors::{CodecError, CodecResult};

/// A value that can be written into or read out of a typed buffer.
///
/// Signed and unsigned integers are kept apart so the full `u64` and `i64`
/// ranges survive, but they compare equal when they hold the same number.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Signed integer.
    Int(i64),

    /// Unsigned integer.
    UInt(u64),

    /// Floating point number.
    Float(f64),

    /// Composite value handled by a plugin codec.
    Struct(StructValue),
}

impl Value {
    /// Returns the value as an integer if it's one of the integer variants.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(*v as i128),
            Self::UInt(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// Returns the value as a float if it's numeric at all.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::UInt(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Struct(_) => None,
        }
    }

    /// Returns if this is one of the numeric variants.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Struct(_))
    }

    /// Short description of the value's shape, used in errors.
    pub fn shape(&self) -> &str {
        match self {
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Struct(s) => s.shape(),
        }
    }

    /// Gets the fields of a struct value, checking its shape and field count.
    pub fn struct_fields(&self, shape: &str, count: usize) -> CodecResult<&[Value]> {
        match self {
            Self::Struct(s) if s.shape() == shape && s.fields().len() == count => Ok(s.fields()),
            _ => Err(CodecError::ShapeMismatch {
                expected: shape.to_owned(),
                found: self.shape().to_owned(),
            }),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Struct(a), Self::Struct(b)) => a == b,
            _ => match (self.as_integer(), other.as_integer()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Struct(s) => {
                write!(f, "{}(", s.shape())?;
                for (i, field) in s.fields().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str(")")
            }
        }
    }
}

macro_rules! impl_value_from {
    ( $variant:ident : $wide:ty => $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(<$wide>::from(v))
                }
            }
        )*
    };
}

impl_value_from!(Int: i64 => i8, i16, i32, i64);
impl_value_from!(UInt: u64 => u8, u16, u32, u64);
impl_value_from!(Float: f64 => f32, f64);

impl From<StructValue> for Value {
    fn from(v: StructValue) -> Self {
        Self::Struct(v)
    }
}

/// Composite value with a named shape and ordered fields.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructValue {
    shape: String,
    fields: Vec<Value>,
}

impl StructValue {
    /// Constructs a new instance.
    pub fn new(shape: impl Into<String>, fields: Vec<Value>) -> Self {
        Self {
            shape: shape.into(),
            fields,
        }
    }

    /// Gets the shape name.
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Gets the fields.
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    /// Converts into the field list.
    pub fn into_fields(self) -> Vec<Value> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_uint_compare_numerically() {
        assert_eq!(Value::Int(100), Value::UInt(100));
        assert_ne!(Value::Int(-1), Value::UInt(u64::MAX));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn test_struct_fields_checks_shape() {
        let v = Value::Struct(StructValue::new(
            "Vector2",
            vec![Value::Float(1.0), Value::Float(2.0)],
        ));
        assert_eq!(v.struct_fields("Vector2", 2).unwrap().len(), 2);
        assert!(matches!(
            v.struct_fields("Vector3", 3),
            Err(CodecError::ShapeMismatch { .. })
        ));
        assert!(v.struct_fields("Vector2", 3).is_err());
        assert!(Value::Int(3).struct_fields("Vector2", 2).is_err());
    }

    #[test]
    fn test_display() {
        let v = Value::Struct(StructValue::new("UDim", vec![Value::Float(0.5), Value::Int(-4)]));
        assert_eq!(v.to_string(), "UDim(0.5, -4)");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
    }
}
