//! Macros for plugin codecs.

/// Generates a struct made of [`Scalar`](crate::Scalar) fields along with its
/// [`FlatStruct`](crate::FlatStruct) impl and conversions to and from
/// [`Value`](crate::Value).
///
/// The quoted name after `as` is the shape name, which is also the name the
/// type gets registered under.  Fields are laid out in declaration order with
/// no padding.
#[macro_export]
macro_rules! impl_struct_codec {
    {
        $( #[ $sattr:meta ] )*
        $v:vis struct $name:ident as $shape:literal {
            $(
                $( #[ $fattr:meta ] )*
                $fname:ident : $fty:ty,
            )*
        }
    } => {
        $( #[ $sattr ] )*
        $v struct $name {
            $(
                $( #[ $fattr ] )*
                $fname : $fty,
            )*
        }

        impl $name {
            /// Number of fields.
            $v const FIELDS: usize = [$( stringify!($fname) ),*].len();

            /// Constructs a new instance.
            #[allow(clippy::too_many_arguments)]
            $v fn new($( $fname : $fty ),*) -> Self {
                Self { $( $fname ),* }
            }

            $(
                #[doc = concat!("Gets the `", stringify!($fname), "` field.")]
                $v fn $fname(&self) -> $fty {
                    self.$fname
                }
            )*
        }

        impl $crate::FlatStruct for $name {
            const SHAPE: &'static str = $shape;
            const SIZE: usize = 0 $( + <$fty as $crate::Scalar>::PRIMITIVE.width() )*;

            fn encode_fields(
                &self,
                cur: &mut $crate::Cursor<'_, '_>,
            ) -> Result<(), $crate::CodecError> {
                $( cur.write_scalar(self.$fname)?; )*
                Ok(())
            }

            #[allow(unused_assignments)]
            fn decode_fields(
                cur: &$crate::Cursor<'_, '_>,
                at: usize,
            ) -> Result<Self, $crate::CodecError> {
                let mut at = at;
                $(
                    let $fname = cur.read_scalar::<$fty>(at)?;
                    at += <$fty as $crate::Scalar>::PRIMITIVE.width();
                )*
                Ok(Self { $( $fname ),* })
            }
        }

        impl From<$name> for $crate::Value {
            fn from(v: $name) -> Self {
                $crate::Value::Struct($crate::StructValue::new(
                    $shape,
                    vec![ $( <$fty as $crate::Scalar>::into_value(v.$fname) ),* ],
                ))
            }
        }

        impl TryFrom<&$crate::Value> for $name {
            type Error = $crate::CodecError;

            fn try_from(value: &$crate::Value) -> Result<Self, Self::Error> {
                let fields = value.struct_fields($shape, $name::FIELDS)?;
                let mut fields = fields.iter();
                $(
                    let f = fields.next().ok_or_else(|| $crate::CodecError::ShapeMismatch {
                        expected: $shape.to_owned(),
                        found: value.shape().to_owned(),
                    })?;
                    let $fname = <$fty as $crate::Scalar>::from_value(f)?;
                )*
                Ok(Self { $( $fname ),* })
            }
        }
    }
}
