//! Whole-structure serialization driven by a template.

use tracing::{debug, trace};

use crate::buffer::ByteBuffer;
use crate::cursor::Cursor;
use crate::errors::{CodecError, CodecResult};
use crate::primitive::NumKind;
use crate::registry::TypeRegistry;
use crate::template::Template;
use crate::value::Value;

/// Knobs for a [`TemplatedCodec`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateConfig {
    strict_length: bool,
}

impl TemplateConfig {
    /// Constructs a new instance with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires buffers being deserialized to be exactly as long as the
    /// template, rather than at least as long.
    pub fn with_strict_length(mut self, strict: bool) -> Self {
        self.strict_length = strict;
        self
    }

    /// Returns if strict length checking is on.
    pub fn strict_length(&self) -> bool {
        self.strict_length
    }
}

/// Serializes lists of values against a [`Template`].
///
/// ```
/// use strata_typed_buf::{TemplatedCodec, TypeRegistry, Value};
///
/// let reg = TypeRegistry::with_primitives();
/// let mut codec = TemplatedCodec::new(&reg, ["unsigned8", "unsigned16"]);
/// let mut bytes = codec
///     .serialize(&[Value::from(100u8), Value::from(5000u16)])?
///     .to_vec();
/// assert_eq!(bytes.len(), 3);
///
/// let mut reader = TemplatedCodec::new(&reg, ["unsigned8", "unsigned16"]);
/// let values = reader.import_buffer(&mut bytes)?.deserialize()?;
/// assert_eq!(values, [Value::UInt(100), Value::UInt(5000)]);
/// # Ok::<(), strata_typed_buf::CodecError>(())
/// ```
#[derive(Debug)]
pub struct TemplatedCodec<'r, 'b> {
    cursor: Cursor<'r, 'b>,
    template: Template,
    config: TemplateConfig,
}

impl<'r, 'b> TemplatedCodec<'r, 'b> {
    /// Constructs a new instance with default config and no buffer.
    pub fn new(registry: &'r TypeRegistry, template: impl Into<Template>) -> Self {
        Self::with_config(registry, template, TemplateConfig::default())
    }

    /// Constructs a new instance with the given config and no buffer.
    pub fn with_config(
        registry: &'r TypeRegistry,
        template: impl Into<Template>,
        config: TemplateConfig,
    ) -> Self {
        Self {
            cursor: Cursor::new(registry),
            template: template.into(),
            config,
        }
    }

    /// Gets the template.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Gets the config.
    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Gets the underlying cursor.
    pub fn cursor(&self) -> &Cursor<'r, 'b> {
        &self.cursor
    }

    fn ensure_live(&self) -> CodecResult<()> {
        if self.cursor.is_destroyed() {
            return Err(CodecError::DestroyedUse);
        }
        Ok(())
    }

    /// Replaces the template.
    ///
    /// Any buffer sized for the old template is detached, so a new one has to
    /// be made or imported before reading or writing again.
    pub fn set_template(&mut self, template: impl Into<Template>) -> CodecResult<&mut Self> {
        self.ensure_live()?;
        self.template = template.into();
        self.cursor.set_buffer(None)?;
        Ok(self)
    }

    /// Allocates an owned buffer sized for the template.
    pub fn make_new_buffer(&mut self) -> CodecResult<&mut Self> {
        self.ensure_live()?;
        let len = self.template.byte_len(self.cursor.registry())?;
        self.cursor.alloc_buffer(len)?;
        Ok(self)
    }

    /// Attaches a caller-owned buffer.
    ///
    /// The length isn't checked here, a short buffer fails when a field is
    /// decoded past its end.
    pub fn import_buffer(&mut self, buf: &'b mut [u8]) -> CodecResult<&mut Self> {
        self.cursor.set_buffer(Some(buf))?;
        Ok(self)
    }

    /// Serializes values into a fresh buffer, returning its contents.
    ///
    /// On failure the partially written buffer is dropped and the codec is
    /// left without a buffer.
    pub fn serialize(&mut self, values: &[Value]) -> CodecResult<&[u8]> {
        self.ensure_live()?;
        if values.len() != self.template.len() {
            return Err(CodecError::TemplateMismatch {
                expected: self.template.len(),
                found: values.len(),
            });
        }

        self.make_new_buffer()?;
        if let Err(e) = self.write_all(values) {
            self.cursor.set_buffer(None)?;
            return Err(e);
        }

        let bytes = self.cursor.bytes()?;
        trace!(fields = %values.len(), len = %bytes.len(), "serialized template");
        Ok(bytes)
    }

    fn write_all(&mut self, values: &[Value]) -> CodecResult<()> {
        for (i, (ty, v)) in self.template.iter().zip(values).enumerate() {
            if let Err(e) = self.cursor.write_type(ty, v) {
                debug!(field = %i, %ty, err = %e, "serialize aborted");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Infers a template from the values, installs it, and serializes.
    pub fn serialize_auto(&mut self, values: &[Value]) -> CodecResult<&[u8]> {
        self.ensure_live()?;
        let template = Template::infer(self.cursor.registry(), values)?;
        self.set_template(template)?;
        self.serialize(values)
    }

    /// Deserializes the attached buffer from the start.
    pub fn deserialize(&mut self) -> CodecResult<Vec<Value>> {
        self.ensure_live()?;
        self.cursor.set_pointer(0)?;

        if self.config.strict_length {
            let expected = self.template.byte_len(self.cursor.registry())?;
            let found = self.cursor.len()?;
            if expected != found {
                return Err(CodecError::LengthMismatch { expected, found });
            }
        }

        let mut values = Vec::with_capacity(self.template.len());
        for (i, ty) in self.template.iter().enumerate() {
            match self.cursor.read_type(ty, None) {
                Ok((v, _)) => values.push(v),
                Err(e) => {
                    debug!(field = %i, %ty, err = %e, "deserialize aborted");
                    return Err(e);
                }
            }
        }

        trace!(fields = %values.len(), "deserialized template");
        Ok(values)
    }

    /// Takes the buffer if it's owned, leaving the codec without one.
    pub fn take_buffer(&mut self) -> CodecResult<Option<ByteBuffer>> {
        self.cursor.take_buffer()
    }

    /// Raw write through the cursor, see [`Cursor::write`].
    pub fn write(
        &mut self,
        width: usize,
        kind: NumKind,
        value: impl Into<Value>,
    ) -> CodecResult<&mut Self> {
        self.cursor.write(width, kind, value)?;
        Ok(self)
    }

    /// Raw read through the cursor, see [`Cursor::read`].
    pub fn read(&self, width: usize, kind: NumKind) -> CodecResult<Value> {
        self.cursor.read(width, kind)
    }

    /// Moves the cursor's pointer, see [`Cursor::increment_pointer`].
    pub fn increment_pointer(&mut self, amount: isize) -> CodecResult<&mut Self> {
        self.cursor.increment_pointer(amount)?;
        Ok(self)
    }

    /// Sets the cursor's pointer, see [`Cursor::set_pointer`].
    pub fn set_pointer(&mut self, value: usize) -> CodecResult<&mut Self> {
        self.cursor.set_pointer(value)?;
        Ok(self)
    }

    /// Destroys the cursor.  Everything after this fails with
    /// [`CodecError::DestroyedUse`].
    pub fn destroy(&mut self) -> CodecResult<()> {
        self.cursor.destroy()
    }
}
