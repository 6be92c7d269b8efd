//! Fixed-layout typed buffer codec.
//!
//! Values are packed into a byte buffer according to a [`Template`], an
//! ordered list of type names looked up in a [`TypeRegistry`].  A [`Cursor`]
//! tracks the read/write offset and dispatches each field to the codec its
//! type was registered with.  Composite types plug in as [`TypeCodec`]s,
//! usually generated with [`impl_struct_codec`].
//!
//! Everything is little-endian.

mod buffer;
pub use buffer::{ByteBuffer, get_primitive, set_primitive};

mod cursor;
pub use cursor::Cursor;

mod errors;
pub use errors::{CodecError, CodecResult};

mod macros;

pub mod numeric;

mod primitive;
pub use primitive::{FLOAT32_MAX_MAGNITUDE, NumKind, Primitive, Scalar};

mod registry;
pub use registry::{TypeDescriptor, TypeId, TypeRegistry};

mod template;
pub use template::Template;

mod templated;
pub use templated::{TemplateConfig, TemplatedCodec};

mod types;
pub use types::{FlatStruct, PrimitiveCodec, StructCodec, TypeCodec};

mod value;
pub use value::{StructValue, Value};
