use thiserror::Error;

use crate::primitive::{NumKind, Primitive};
use crate::registry::TypeId;
use crate::value::Value;

/// Errors from strata-typed-buf.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A type name has no registry entry.
    #[error("unknown type {0:?}")]
    UnknownType(String),

    /// A value can't be represented by the target primitive.
    #[error("value {value} out of range for {target}")]
    OutOfRange {
        /// Primitive we tried to fit the value into.
        target: Primitive,
        /// The offending value.
        value: Value,
    },

    /// A raw width/kind pair that doesn't name a primitive, like a 2 byte
    /// float.
    #[error("no {kind} primitive is {width} bytes wide")]
    InvalidPrimitive {
        /// Requested width in bytes.
        width: usize,
        /// Requested numeric kind.
        kind: NumKind,
    },

    /// If we tried to move or access past either end of the buffer.
    #[error("offset {offset} outside buffer of length {len}")]
    OutOfBounds {
        /// The offending end offset, which might be negative.
        offset: i64,
        /// Length of the buffer.
        len: usize,
    },

    /// Value list length disagrees with the template.
    #[error("template has {expected} entries but got {found} values")]
    TemplateMismatch {
        /// Number of template entries.
        expected: usize,
        /// Number of values provided.
        found: usize,
    },

    /// Buffer length disagrees with the template in strict mode.
    #[error("template needs exactly {expected} bytes but buffer has {found}")]
    LengthMismatch {
        /// Bytes the template describes.
        expected: usize,
        /// Bytes in the attached buffer.
        found: usize,
    },

    /// A value's shape doesn't match what the codec encodes.
    #[error("expected {expected} value, found {found}")]
    ShapeMismatch {
        /// Shape the codec wanted.
        expected: String,
        /// Shape of the value we got.
        found: String,
    },

    /// A codec wrote past the size it was registered with.
    #[error("codec for {ty:?} overran its {size} byte slot")]
    CodecOverrun {
        /// Type whose codec misbehaved.
        ty: String,
        /// Registered size.
        size: usize,
    },

    /// A codec decoded fewer bytes than the size it was registered with.
    #[error("codec for {ty:?} consumed {consumed} bytes of its {size} byte slot")]
    CodecUnderrun {
        /// Type whose codec misbehaved.
        ty: String,
        /// Registered size.
        size: usize,
        /// Bytes the codec reported.
        consumed: usize,
    },

    /// Numeric inference or shape matching found no registered type.
    #[error("no registered type can hold {0}")]
    Unresolvable(Value),

    /// Registering a name that's already taken.
    #[error("type {0:?} already registered")]
    DuplicateType(String),

    /// Registering an id that's already taken.
    #[error("type id {0} already registered")]
    DuplicateTypeId(TypeId),

    /// Registering a codec that encodes into zero bytes.
    #[error("type {0:?} has zero size")]
    ZeroSizedType(String),

    /// Operation on a cursor or codec after it was destroyed.
    #[error("use after destroy")]
    DestroyedUse,

    /// Operation that needs a buffer while none is attached.
    #[error("no buffer attached")]
    Unbound,
}

/// Wrapper result type.
pub type CodecResult<T> = Result<T, CodecError>;
