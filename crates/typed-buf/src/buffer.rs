//! Fixed-length byte buffer with bounds-checked primitive access.

use crate::errors::{CodecError, CodecResult};
use crate::primitive::Primitive;
use crate::value::Value;

/// Fixed-length, zero-initialized byte buffer.
///
/// The length is set at creation and never changes.  When a different size is
/// needed a new buffer gets allocated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ByteBuffer(Box<[u8]>);

impl ByteBuffer {
    /// Allocates a new zeroed buffer.
    pub fn new(len: usize) -> Self {
        Self(vec![0; len].into_boxed_slice())
    }

    /// Returns the length of the buffer.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns the contents mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }

    /// Converts into a vec.
    pub fn into_vec(self) -> Vec<u8> {
        self.0.into_vec()
    }

    /// Reads a primitive at an offset.
    pub fn get(&self, at: usize, prim: Primitive) -> CodecResult<Value> {
        get_primitive(&self.0, at, prim)
    }

    /// Writes a primitive at an offset.
    pub fn set(&mut self, at: usize, prim: Primitive, value: &Value) -> CodecResult<()> {
        set_primitive(&mut self.0, at, prim, value)
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(v: Vec<u8>) -> Self {
        Self(v.into_boxed_slice())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for ByteBuffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

/// Checks that `width` bytes starting at `at` fit in a buffer of `len`,
/// returning the end offset.
pub(crate) fn check_span(len: usize, at: usize, width: usize) -> CodecResult<usize> {
    match at.checked_add(width) {
        Some(end) if end <= len => Ok(end),
        _ => Err(CodecError::OutOfBounds {
            offset: i64::try_from(at)
                .unwrap_or(i64::MAX)
                .saturating_add(width as i64),
            len,
        }),
    }
}

/// Reads a primitive from a byte slice at an offset.
pub fn get_primitive(buf: &[u8], at: usize, prim: Primitive) -> CodecResult<Value> {
    let end = check_span(buf.len(), at, prim.width())?;
    Ok(prim.decode(&buf[at..end]))
}

/// Writes a primitive into a byte slice at an offset.
pub fn set_primitive(buf: &mut [u8], at: usize, prim: Primitive, value: &Value) -> CodecResult<()> {
    let end = check_span(buf.len(), at, prim.width())?;
    prim.encode(value, &mut buf[at..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let buf = ByteBuffer::new(5);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.as_slice(), &[0; 5]);
        assert!(ByteBuffer::new(0).is_empty());
    }

    #[test]
    fn test_get_set() {
        let mut buf = ByteBuffer::new(6);
        buf.set(0, Primitive::I16, &Value::Int(-2)).unwrap();
        buf.set(2, Primitive::F32, &Value::Float(1.5)).unwrap();
        assert_eq!(buf.get(0, Primitive::I16).unwrap(), Value::Int(-2));
        assert_eq!(buf.get(2, Primitive::F32).unwrap(), Value::Float(1.5));
    }

    #[test]
    fn test_bounds() {
        let mut buf = ByteBuffer::new(4);
        assert!(buf.set(0, Primitive::U32, &Value::UInt(1)).is_ok());

        match buf.set(1, Primitive::U32, &Value::UInt(1)) {
            Err(CodecError::OutOfBounds { offset: 5, len: 4 }) => {}
            r => panic!("test: expected OutOfBounds (got {r:?})"),
        }

        assert!(buf.get(4, Primitive::U8).is_err());
        assert!(buf.get(usize::MAX, Primitive::U8).is_err());
        assert!(buf.get(3, Primitive::U8).is_ok());
    }
}
