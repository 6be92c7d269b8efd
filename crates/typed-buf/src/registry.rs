//! Registry of named types.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::errors::{CodecError, CodecResult};
use crate::numeric;
use crate::primitive::Primitive;
use crate::types::{FlatStruct, PrimitiveCodec, StructCodec, TypeCodec};
use crate::value::Value;

/// Alias for type IDs.
pub type TypeId = u16;

/// Registry entry for one type.
#[derive(Debug)]
pub struct TypeDescriptor {
    id: TypeId,
    name: String,
    size: usize,
    codec: Box<dyn TypeCodec>,
}

impl TypeDescriptor {
    /// Gets the type ID.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Gets the type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the encoded size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the codec.
    pub fn codec(&self) -> &dyn TypeCodec {
        self.codec.as_ref()
    }
}

/// Table of type name <-> id <-> size and codec.
///
/// Built once at startup and then shared by reference with cursors.  Nothing
/// is ever removed.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    by_id: BTreeMap<TypeId, TypeDescriptor>,
    by_name: HashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Constructs an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a registry holding just the named numeric primitives.
    pub fn with_primitives() -> Self {
        let mut reg = Self::new();
        for prim in Primitive::NAMED {
            reg.register_primitive(prim)
                .expect("registry: primitive names and ids are distinct");
        }
        reg
    }

    /// Registers a codec under a name, using the next free id.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        codec: impl TypeCodec + 'static,
    ) -> CodecResult<TypeId> {
        let id = self
            .by_id
            .last_key_value()
            .map(|(id, _)| id.saturating_add(1))
            .unwrap_or(0);
        self.register_with_id(name, id, codec)?;
        Ok(id)
    }

    /// Registers a codec under a name and a specific id.
    pub fn register_with_id(
        &mut self,
        name: impl Into<String>,
        id: TypeId,
        codec: impl TypeCodec + 'static,
    ) -> CodecResult<()> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(CodecError::DuplicateType(name));
        }

        if self.by_id.contains_key(&id) {
            return Err(CodecError::DuplicateTypeId(id));
        }

        let size = codec.size();
        if size == 0 {
            return Err(CodecError::ZeroSizedType(name));
        }

        debug!(%name, %id, %size, "registered type");

        self.by_name.insert(name.clone(), id);
        self.by_id.insert(
            id,
            TypeDescriptor {
                id,
                name,
                size,
                codec: Box::new(codec),
            },
        );

        Ok(())
    }

    /// Registers a named primitive under its canonical name.
    pub fn register_primitive(&mut self, prim: Primitive) -> CodecResult<TypeId> {
        self.register(prim.name(), PrimitiveCodec::new(prim))
    }

    /// Registers a flat struct type under its shape name.
    pub fn register_struct<T: FlatStruct + 'static>(&mut self) -> CodecResult<TypeId> {
        self.register(T::SHAPE, StructCodec::<T>::new())
    }

    /// Gets the descriptor for a name.
    pub fn descriptor(&self, name: &str) -> CodecResult<&TypeDescriptor> {
        self.by_name
            .get(name)
            .and_then(|id| self.by_id.get(id))
            .ok_or_else(|| CodecError::UnknownType(name.to_owned()))
    }

    /// Gets the encoded size of a type.
    pub fn size_of(&self, name: &str) -> CodecResult<usize> {
        self.descriptor(name).map(TypeDescriptor::size)
    }

    /// Gets the id of a type.
    pub fn type_to_id(&self, name: &str) -> CodecResult<TypeId> {
        self.descriptor(name).map(TypeDescriptor::id)
    }

    /// Gets the name of the type with an id, if there is one.
    pub fn id_to_type(&self, id: TypeId) -> Option<&str> {
        self.by_id.get(&id).map(TypeDescriptor::name)
    }

    /// Picks a registered type that can hold a value.
    ///
    /// Numbers go through [`numeric::infer_value`]; the result is only
    /// returned if that type is registered here.  Struct values match the
    /// first type, by id, whose codec accepts their shape.
    pub fn resolve_type(&self, value: &Value) -> Option<&str> {
        match numeric::infer_value(value) {
            Some(prim) => self.descriptor(prim.name()).ok().map(TypeDescriptor::name),
            None => self
                .iter()
                .find(|d| d.codec().accepts(value))
                .map(TypeDescriptor::name),
        }
    }

    /// Iterates over the entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.by_id.values()
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cursor;

    /// Codec that claims to take no space.
    #[derive(Debug)]
    struct EmptyCodec;

    impl TypeCodec for EmptyCodec {
        fn size(&self) -> usize {
            0
        }

        fn encode(&self, _cur: &mut Cursor<'_, '_>, _value: &Value) -> CodecResult<()> {
            Ok(())
        }

        fn decode(&self, _cur: &Cursor<'_, '_>, _at: usize) -> CodecResult<(Value, usize)> {
            Ok((Value::UInt(0), 0))
        }
    }

    #[test]
    fn test_primitive_sizes() {
        let reg = TypeRegistry::with_primitives();
        assert_eq!(reg.len(), 8);
        for (name, size) in [
            ("unsigned8", 1),
            ("unsigned16", 2),
            ("unsigned32", 4),
            ("int8", 1),
            ("int16", 2),
            ("int32", 4),
            ("float32", 4),
            ("float64", 8),
        ] {
            assert_eq!(reg.size_of(name).unwrap(), size, "test: size of {name}");
        }
    }

    #[test]
    fn test_with_primitives_ids() {
        let reg = TypeRegistry::with_primitives();
        for (id, prim) in Primitive::NAMED.into_iter().enumerate() {
            assert_eq!(reg.id_to_type(id as TypeId), Some(prim.name()));
        }
    }

    #[test]
    fn test_unknown_type() {
        let reg = TypeRegistry::with_primitives();
        match reg.size_of("int64") {
            Err(CodecError::UnknownType(n)) => assert_eq!(n, "int64"),
            r => panic!("test: expected UnknownType (got {r:?})"),
        }
        assert!(reg.type_to_id("Vector3").is_err());
        assert_eq!(reg.id_to_type(999), None);
    }

    #[test]
    fn test_bijection() {
        let reg = TypeRegistry::with_primitives();
        for d in reg.iter() {
            assert_eq!(reg.id_to_type(reg.type_to_id(d.name()).unwrap()), Some(d.name()));
            assert_eq!(reg.type_to_id(reg.id_to_type(d.id()).unwrap()).unwrap(), d.id());
        }
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut reg = TypeRegistry::with_primitives();
        assert!(matches!(
            reg.register_primitive(Primitive::U8),
            Err(CodecError::DuplicateType(_))
        ));
        assert!(matches!(
            reg.register_with_id("other", 0, PrimitiveCodec::new(Primitive::U8)),
            Err(CodecError::DuplicateTypeId(0))
        ));
        assert_eq!(reg.len(), 8);
    }

    #[test]
    fn test_register_rejects_zero_size() {
        let mut reg = TypeRegistry::new();
        assert!(matches!(
            reg.register("nothing", EmptyCodec),
            Err(CodecError::ZeroSizedType(_))
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_ids_follow_registration_order() {
        let mut reg = TypeRegistry::new();
        reg.register_with_id("late", 10, PrimitiveCodec::new(Primitive::U8))
            .unwrap();
        let id = reg
            .register("next", PrimitiveCodec::new(Primitive::U16))
            .unwrap();
        assert_eq!(id, 11);
        assert_eq!(reg.id_to_type(11), Some("next"));
    }

    #[test]
    fn test_resolve_numbers() {
        let reg = TypeRegistry::with_primitives();
        assert_eq!(reg.resolve_type(&Value::Int(127)), Some("int8"));
        assert_eq!(reg.resolve_type(&Value::Int(128)), Some("int16"));
        assert_eq!(reg.resolve_type(&Value::Int(32767)), Some("int16"));
        assert_eq!(reg.resolve_type(&Value::Int(32768)), Some("int32"));
        assert_eq!(reg.resolve_type(&Value::Float(3.14)), Some("float64"));
        assert_eq!(reg.resolve_type(&Value::Float(456.75)), Some("float32"));
    }

    #[test]
    fn test_resolve_needs_registration() {
        let mut reg = TypeRegistry::new();
        reg.register_primitive(Primitive::I16).unwrap();
        assert_eq!(reg.resolve_type(&Value::Int(1)), None);
        assert_eq!(reg.resolve_type(&Value::Int(1000)), Some("int16"));

        let s = Value::Struct(crate::StructValue::new("Vector3", vec![]));
        assert_eq!(reg.resolve_type(&s), None);
    }
}
