//! The standard registry.

use strata_typed_buf::{
    CodecResult, FlatStruct, Primitive, PrimitiveCodec, StructCodec, TypeId, TypeRegistry,
};

use crate::{
    BrickColor, CFrame, Color3, DateTime, TweenInfo, UDim, UDim2, Vector2, Vector2int16, Vector3,
    Vector3int16,
};

/// Names of the standard types in id order.
pub const STANDARD_TYPES: [&str; 19] = [
    "BrickColor",
    "CFrame",
    "Color3",
    "DateTime",
    "TweenInfo",
    "UDim",
    "UDim2",
    "Vector2",
    "Vector2int16",
    "Vector3",
    "Vector3int16",
    "unsigned8",
    "unsigned16",
    "unsigned32",
    "int8",
    "int16",
    "int32",
    "float32",
    "float64",
];

/// Registers every standard type, giving them ids from `base` upwards in
/// [`STANDARD_TYPES`] order.
pub fn register_standard_types(reg: &mut TypeRegistry, base: TypeId) -> CodecResult<()> {
    let mut id = base;
    let mut next = || {
        let cur = id;
        id = id.saturating_add(1);
        cur
    };

    reg.register_with_id(BrickColor::SHAPE, next(), StructCodec::<BrickColor>::new())?;
    reg.register_with_id(CFrame::SHAPE, next(), StructCodec::<CFrame>::new())?;
    reg.register_with_id(Color3::SHAPE, next(), StructCodec::<Color3>::new())?;
    reg.register_with_id(DateTime::SHAPE, next(), StructCodec::<DateTime>::new())?;
    reg.register_with_id(TweenInfo::SHAPE, next(), StructCodec::<TweenInfo>::new())?;
    reg.register_with_id(UDim::SHAPE, next(), StructCodec::<UDim>::new())?;
    reg.register_with_id(UDim2::SHAPE, next(), StructCodec::<UDim2>::new())?;
    reg.register_with_id(Vector2::SHAPE, next(), StructCodec::<Vector2>::new())?;
    reg.register_with_id(Vector2int16::SHAPE, next(), StructCodec::<Vector2int16>::new())?;
    reg.register_with_id(Vector3::SHAPE, next(), StructCodec::<Vector3>::new())?;
    reg.register_with_id(Vector3int16::SHAPE, next(), StructCodec::<Vector3int16>::new())?;

    for prim in Primitive::NAMED {
        reg.register_with_id(prim.name(), next(), PrimitiveCodec::new(prim))?;
    }

    Ok(())
}

/// Constructs a registry holding every standard type with ids starting at 0.
pub fn standard_registry() -> TypeRegistry {
    let mut reg = TypeRegistry::new();
    register_standard_types(&mut reg, 0).expect("types: standard names and ids are distinct");
    reg
}

#[cfg(test)]
mod tests {
    use strata_typed_buf::{CodecError, Value};

    use super::*;

    const SIZES: [(&str, usize); 19] = [
        ("BrickColor", 24),
        ("CFrame", 96),
        ("Color3", 24),
        ("DateTime", 8),
        ("TweenInfo", 19),
        ("UDim", 16),
        ("UDim2", 32),
        ("Vector2", 16),
        ("Vector2int16", 4),
        ("Vector3", 24),
        ("Vector3int16", 6),
        ("unsigned8", 1),
        ("unsigned16", 2),
        ("unsigned32", 4),
        ("int8", 1),
        ("int16", 2),
        ("int32", 4),
        ("float32", 4),
        ("float64", 8),
    ];

    #[test]
    fn test_wire_sizes() {
        let reg = standard_registry();
        assert_eq!(reg.len(), SIZES.len());
        for (name, size) in SIZES {
            assert_eq!(reg.size_of(name).unwrap(), size, "test: size of {name}");
        }
    }

    #[test]
    fn test_ids_in_table_order() {
        let reg = standard_registry();
        for (i, name) in STANDARD_TYPES.iter().enumerate() {
            assert_eq!(reg.type_to_id(name).unwrap(), i as TypeId);
            assert_eq!(reg.id_to_type(i as TypeId), Some(*name));
        }
        assert_eq!(reg.id_to_type(STANDARD_TYPES.len() as TypeId), None);
    }

    #[test]
    fn test_register_twice_fails() {
        let mut reg = standard_registry();
        assert!(matches!(
            register_standard_types(&mut reg, 100),
            Err(CodecError::DuplicateType(_))
        ));
    }

    #[test]
    fn test_resolve_struct_values() {
        let reg = standard_registry();
        let v: Value = Vector3::new(1.0, 2.0, 3.0).into();
        assert_eq!(reg.resolve_type(&v), Some("Vector3"));
        let v: Value = BrickColor::default().into();
        assert_eq!(reg.resolve_type(&v), Some("BrickColor"));
        let v: Value = UDim2::default().into();
        assert_eq!(reg.resolve_type(&v), Some("UDim2"));
    }
}
