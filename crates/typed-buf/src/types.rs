use std::fmt;
use std::marker::PhantomData;

use crate::cursor::Cursor;
use crate::errors::CodecResult;
use crate::primitive::Primitive;
use crate::value::Value;

/// Encode/decode behavior for one registered type.
///
/// Codecs are plugged into a [`crate::TypeRegistry`] under a name.  They
/// operate against a [`Cursor`], which has already checked that the type's
/// whole slot fits in the buffer before `encode` or `decode` is called.
pub trait TypeCodec: fmt::Debug + Send + Sync {
    /// Number of bytes this type occupies.  Must be nonzero.
    fn size(&self) -> usize;

    /// Encodes the value at the cursor's pointer, advancing it.
    fn encode(&self, cur: &mut Cursor<'_, '_>, value: &Value) -> CodecResult<()>;

    /// Decodes a value starting at `at` without moving the cursor.  Returns
    /// the value and the number of bytes consumed.
    fn decode(&self, cur: &Cursor<'_, '_>, at: usize) -> CodecResult<(Value, usize)>;

    /// Returns if this codec is the natural encoding for a non-numeric value.
    ///
    /// Numeric values are handled by inference instead, so primitive codecs
    /// leave this as the default.
    fn accepts(&self, _value: &Value) -> bool {
        false
    }
}

/// Codec for a single fixed-width primitive.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PrimitiveCodec(Primitive);

impl PrimitiveCodec {
    /// Constructs a new instance.
    pub fn new(prim: Primitive) -> Self {
        Self(prim)
    }

    /// Gets the primitive.
    pub fn primitive(&self) -> Primitive {
        self.0
    }
}

impl TypeCodec for PrimitiveCodec {
    fn size(&self) -> usize {
        self.0.width()
    }

    fn encode(&self, cur: &mut Cursor<'_, '_>, value: &Value) -> CodecResult<()> {
        cur.write_primitive(self.0, value)?;
        Ok(())
    }

    fn decode(&self, cur: &Cursor<'_, '_>, at: usize) -> CodecResult<(Value, usize)> {
        let v = cur.read_primitive_at(at, self.0)?;
        Ok((v, self.0.width()))
    }
}

/// Composite type laid out as a flat run of scalars.
///
/// You probably want [`crate::impl_struct_codec`] rather than implementing
/// this directly.
pub trait FlatStruct:
    Sized + Into<Value> + for<'v> TryFrom<&'v Value, Error = crate::CodecError>
{
    /// Shape name, also used as the registry name.
    const SHAPE: &'static str;

    /// Encoded size in bytes.
    const SIZE: usize;

    /// Writes each field in order at the cursor's pointer.
    fn encode_fields(&self, cur: &mut Cursor<'_, '_>) -> CodecResult<()>;

    /// Reads each field in order starting at `at`.
    fn decode_fields(cur: &Cursor<'_, '_>, at: usize) -> CodecResult<Self>;
}

/// Registry codec adapter for a [`FlatStruct`].
pub struct StructCodec<T>(PhantomData<fn() -> T>);

impl<T> StructCodec<T> {
    /// Constructs a new instance.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for StructCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FlatStruct> fmt::Debug for StructCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StructCodec({})", T::SHAPE)
    }
}

impl<T: FlatStruct> TypeCodec for StructCodec<T> {
    fn size(&self) -> usize {
        T::SIZE
    }

    fn encode(&self, cur: &mut Cursor<'_, '_>, value: &Value) -> CodecResult<()> {
        T::try_from(value)?.encode_fields(cur)
    }

    fn decode(&self, cur: &Cursor<'_, '_>, at: usize) -> CodecResult<(Value, usize)> {
        let v = T::decode_fields(cur, at)?;
        Ok((v.into(), T::SIZE))
    }

    fn accepts(&self, value: &Value) -> bool {
        matches!(value, Value::Struct(s) if s.shape() == T::SHAPE)
    }
}
