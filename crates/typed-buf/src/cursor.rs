//! Cursor over a byte buffer.

use tracing::trace;

use crate::buffer::{ByteBuffer, check_span, get_primitive, set_primitive};
use crate::errors::{CodecError, CodecResult};
use crate::primitive::{NumKind, Primitive, Scalar};
use crate::registry::TypeRegistry;
use crate::value::Value;

/// Where a cursor's bytes live.
#[derive(Debug)]
enum Backing<'b> {
    /// Allocated by the cursor.
    Owned(ByteBuffer),

    /// Borrowed from the caller.
    Attached(&'b mut [u8]),
}

impl Backing<'_> {
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Owned(buf) => buf.as_slice(),
            Self::Attached(buf) => buf,
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Owned(buf) => buf.as_mut_slice(),
            Self::Attached(buf) => buf,
        }
    }
}

/// Read/write position over a byte buffer, with type-dispatched access
/// through a [`TypeRegistry`].
///
/// The pointer always stays within `0..=len`.  Raw [`Cursor::write`] advances
/// the pointer but raw [`Cursor::read`] doesn't, the type-dispatched
/// [`Cursor::write_type`] and [`Cursor::read_type`] both advance.
///
/// Mutators return `&mut Self` so calls can be chained:
///
/// ```
/// use strata_typed_buf::{Cursor, NumKind, TypeRegistry};
///
/// let reg = TypeRegistry::with_primitives();
/// let mut cur = Cursor::new(&reg);
/// cur.alloc_buffer(3)?
///     .write(1, NumKind::Unsigned, 7u8)?
///     .write(2, NumKind::Signed, -2i16)?;
/// assert_eq!(cur.bytes()?, &[7, 0xfe, 0xff]);
/// # Ok::<(), strata_typed_buf::CodecError>(())
/// ```
#[derive(Debug)]
pub struct Cursor<'r, 'b> {
    registry: &'r TypeRegistry,
    buffer: Option<Backing<'b>>,
    pointer: usize,
    destroyed: bool,
}

impl<'r, 'b> Cursor<'r, 'b> {
    /// Constructs a new cursor with no buffer attached.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            buffer: None,
            pointer: 0,
            destroyed: false,
        }
    }

    /// Constructs a new cursor over a caller-owned buffer.
    pub fn attached(registry: &'r TypeRegistry, buf: &'b mut [u8]) -> Self {
        Self {
            buffer: Some(Backing::Attached(buf)),
            ..Self::new(registry)
        }
    }

    /// Gets the registry this cursor dispatches through.
    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Returns the current pointer.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Returns if [`Cursor::destroy`] has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Returns if a buffer is attached.
    pub fn is_bound(&self) -> bool {
        self.buffer.is_some()
    }

    fn ensure_live(&self) -> CodecResult<()> {
        if self.destroyed {
            return Err(CodecError::DestroyedUse);
        }
        Ok(())
    }

    fn backing(&self) -> CodecResult<&Backing<'b>> {
        self.ensure_live()?;
        self.buffer.as_ref().ok_or(CodecError::Unbound)
    }

    /// Returns the attached buffer's contents.
    pub fn bytes(&self) -> CodecResult<&[u8]> {
        self.backing().map(Backing::bytes)
    }

    /// Returns the attached buffer's contents mutably.
    fn bytes_mut(&mut self) -> CodecResult<&mut [u8]> {
        self.ensure_live()?;
        self.buffer
            .as_mut()
            .map(Backing::bytes_mut)
            .ok_or(CodecError::Unbound)
    }

    /// Returns the length of the attached buffer.
    pub fn len(&self) -> CodecResult<usize> {
        self.bytes().map(<[u8]>::len)
    }

    /// Returns the number of bytes past the pointer.
    pub fn remaining(&self) -> CodecResult<usize> {
        Ok(self.len()? - self.pointer)
    }

    /// Attaches a caller-owned buffer, or detaches with `None`.  Resets the
    /// pointer.
    pub fn set_buffer(&mut self, buf: Option<&'b mut [u8]>) -> CodecResult<&mut Self> {
        self.ensure_live()?;
        self.buffer = buf.map(Backing::Attached);
        self.pointer = 0;
        Ok(self)
    }

    /// Allocates a new zeroed buffer owned by this cursor, dropping whatever
    /// was attached before.  Resets the pointer.
    pub fn alloc_buffer(&mut self, len: usize) -> CodecResult<&mut Self> {
        self.ensure_live()?;
        self.buffer = Some(Backing::Owned(ByteBuffer::new(len)));
        self.pointer = 0;
        Ok(self)
    }

    /// Takes the buffer if this cursor owns it, leaving the cursor unbound.
    ///
    /// Returns `None` if the buffer is attached rather than owned, in which
    /// case it stays attached.
    pub fn take_buffer(&mut self) -> CodecResult<Option<ByteBuffer>> {
        self.ensure_live()?;
        match self.buffer.take() {
            Some(Backing::Owned(buf)) => {
                self.pointer = 0;
                Ok(Some(buf))
            }
            other => {
                self.buffer = other;
                Ok(None)
            }
        }
    }

    /// Moves the pointer by a signed amount.
    ///
    /// Fails without moving if the result would leave the buffer.
    pub fn increment_pointer(&mut self, amount: isize) -> CodecResult<&mut Self> {
        let len = self.len()?;
        let target = (self.pointer as i64).saturating_add(amount as i64);
        if target < 0 || target > len as i64 {
            return Err(CodecError::OutOfBounds {
                offset: target,
                len,
            });
        }
        self.pointer = target as usize;
        Ok(self)
    }

    /// Sets the pointer to an absolute offset.
    pub fn set_pointer(&mut self, value: usize) -> CodecResult<&mut Self> {
        let len = self.len()?;
        check_span(len, value, 0)?;
        self.pointer = value;
        Ok(self)
    }

    /// Writes a raw primitive at the pointer and advances past it.
    pub fn write_primitive(&mut self, prim: Primitive, value: &Value) -> CodecResult<&mut Self> {
        let at = self.pointer;
        set_primitive(self.bytes_mut()?, at, prim, value)?;
        self.pointer += prim.width();
        Ok(self)
    }

    /// Writes a raw `width`-byte primitive of the given kind at the pointer
    /// and advances past it.
    pub fn write(
        &mut self,
        width: usize,
        kind: NumKind,
        value: impl Into<Value>,
    ) -> CodecResult<&mut Self> {
        self.ensure_live()?;
        let prim = Primitive::from_parts(width, kind)?;
        self.write_primitive(prim, &value.into())
    }

    /// Writes a scalar at the pointer and advances past it.
    pub fn write_scalar<S: Scalar>(&mut self, value: S) -> CodecResult<&mut Self> {
        self.write_primitive(S::PRIMITIVE, &value.into_value())
    }

    /// Reads a raw primitive at an absolute offset.
    pub fn read_primitive_at(&self, at: usize, prim: Primitive) -> CodecResult<Value> {
        get_primitive(self.bytes()?, at, prim)
    }

    /// Reads a raw `width`-byte primitive at an absolute offset.
    pub fn read_at(&self, at: usize, width: usize, kind: NumKind) -> CodecResult<Value> {
        self.ensure_live()?;
        let prim = Primitive::from_parts(width, kind)?;
        self.read_primitive_at(at, prim)
    }

    /// Reads a raw `width`-byte primitive at the pointer.  Does not advance
    /// the pointer.
    pub fn read(&self, width: usize, kind: NumKind) -> CodecResult<Value> {
        self.read_at(self.pointer, width, kind)
    }

    /// Reads a scalar at an absolute offset.
    pub fn read_scalar<S: Scalar>(&self, at: usize) -> CodecResult<S> {
        S::from_value(&self.read_primitive_at(at, S::PRIMITIVE)?)
    }

    /// Writes a value as a registered type at the pointer, advancing past the
    /// type's whole slot.
    ///
    /// The slot is bounds checked before the codec runs so a short buffer is
    /// never partially written.
    pub fn write_type(&mut self, name: &str, value: &Value) -> CodecResult<&mut Self> {
        self.ensure_live()?;
        let registry = self.registry;
        let desc = registry.descriptor(name)?;

        let start = self.pointer;
        let end = check_span(self.len()?, start, desc.size())?;

        if let Err(e) = desc.codec().encode(self, value) {
            self.pointer = start;
            return Err(e);
        }

        if self.pointer > end {
            self.pointer = start;
            return Err(CodecError::CodecOverrun {
                ty: name.to_owned(),
                size: desc.size(),
            });
        }

        self.pointer = end;
        Ok(self)
    }

    /// Reads a value as a registered type.
    ///
    /// With an offset this is a pure probe at that offset and the pointer is
    /// left alone.  Without one it reads at the pointer and advances.  Returns
    /// the value and the number of bytes consumed.
    pub fn read_type(&mut self, name: &str, offset: Option<usize>) -> CodecResult<(Value, usize)> {
        let at = offset.unwrap_or(self.pointer);
        let (v, consumed) = self.probe_type(name, at)?;
        if offset.is_none() {
            // probe_type guarantees the codec consumed exactly its slot.
            self.pointer = at + consumed;
        }
        Ok((v, consumed))
    }

    /// Reads a value as a registered type at an absolute offset without
    /// touching the pointer.
    ///
    /// The codec has to consume exactly the type's registered size, anything
    /// else would misalign every field after it.
    pub fn probe_type(&self, name: &str, at: usize) -> CodecResult<(Value, usize)> {
        self.ensure_live()?;
        let desc = self.registry.descriptor(name)?;
        check_span(self.len()?, at, desc.size())?;

        let (v, consumed) = desc.codec().decode(self, at)?;
        let size = desc.size();
        if consumed > size {
            return Err(CodecError::CodecOverrun {
                ty: name.to_owned(),
                size,
            });
        }
        if consumed < size {
            return Err(CodecError::CodecUnderrun {
                ty: name.to_owned(),
                size,
                consumed,
            });
        }

        Ok((v, consumed))
    }

    /// Releases the buffer and zeroes the pointer.  Everything after this
    /// fails with [`CodecError::DestroyedUse`].
    pub fn destroy(&mut self) -> CodecResult<()> {
        self.ensure_live()?;
        trace!(pointer = %self.pointer, "destroying cursor");
        self.buffer = None;
        self.pointer = 0;
        self.destroyed = true;
        Ok(())
    }
}
