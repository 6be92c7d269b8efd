//! Property testing macros and utilities for strata-typed-buf.
//!
//! The main export is the `generate_type_tests!` macro, which generates
//! property tests for one registered type of the standard registry.  The
//! [`strategies`] module has value generators for every standard type.

use std::sync::OnceLock;

use strata_typed_buf::TypeRegistry;

// Re-export dependencies for macro usage
pub use paste;
pub use proptest;
pub use strata_typed_buf;
pub use strata_typed_buf_types;

pub mod strategies;

/// Returns a process-wide standard registry for tests.
pub fn registry() -> &'static TypeRegistry {
    static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(strata_typed_buf_types::standard_registry)
}

/// Generates property tests for a type of the standard registry using
/// proptest.
///
/// This macro creates property tests to verify that:
/// 1. Serializing then deserializing through a one-entry template produces the
///    original value (round-trip property)
/// 2. The encoding is deterministic (same input always produces same output)
/// 3. A template of `n` copies of the type serializes to `n` times its size
///
/// # Example
/// ```rust,no_run
/// use strata_typed_buf_tests::{generate_type_tests, strategies};
///
/// generate_type_tests!("Vector3", strategies::vector3(), "vector3");
/// ```
#[macro_export]
macro_rules! generate_type_tests {
    ($ty:literal, $strategy:expr, $name:literal) => {
        $crate::paste::paste! {
            mod [<proptest_ $name _type>] {
                use super::*;
                use $crate::proptest::{collection, prelude::prop_assert_eq};
                use $crate::strata_typed_buf::{Template, TemplatedCodec};

                $crate::proptest::proptest! {
                    #[test]
                    fn [<test_type_roundtrip>](value in $strategy) {
                        let reg = $crate::registry();
                        let mut codec = TemplatedCodec::new(reg, [$ty]);
                        let mut bytes = codec
                            .serialize(std::slice::from_ref(&value))
                            .expect("test: serialize should succeed")
                            .to_vec();

                        let mut reader = TemplatedCodec::new(reg, [$ty]);
                        let decoded = reader
                            .import_buffer(&mut bytes)
                            .expect("test: import should succeed")
                            .deserialize()
                            .expect("test: deserialize should succeed");
                        prop_assert_eq!(decoded, vec![value]);
                    }

                    #[test]
                    fn [<test_type_deterministic>](value in $strategy) {
                        let reg = $crate::registry();
                        let mut codec = TemplatedCodec::new(reg, [$ty]);
                        let encoded1 = codec
                            .serialize(std::slice::from_ref(&value))
                            .expect("test: serialize should succeed")
                            .to_vec();
                        let encoded2 = codec
                            .serialize(std::slice::from_ref(&value))
                            .expect("test: serialize should succeed")
                            .to_vec();
                        prop_assert_eq!(encoded1, encoded2, "test: unexpected inequality");
                    }

                    #[test]
                    fn [<test_type_size_additive>](values in collection::vec($strategy, 0..8)) {
                        let reg = $crate::registry();
                        let template: Template = std::iter::repeat($ty).take(values.len()).collect();
                        let mut codec = TemplatedCodec::new(reg, template);
                        let len = codec
                            .serialize(&values)
                            .expect("test: serialize should succeed")
                            .len();
                        let size = reg.size_of($ty).expect("test: registered type");
                        prop_assert_eq!(len, size * values.len());
                    }
                }
            }
        }
    };
}
