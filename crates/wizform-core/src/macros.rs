// entity
/// Declare a backing entity: the struct, its field accessors, and its
/// static `EntityModel` with rules.
///
/// ```ignore
/// entity! {
///     pub struct Car : "fleet::Car" extends Vehicle {
///         kind: Option<String>,
///         wheels: Option<i64>,
///     }
///     rules {
///         wheels => Equal { target: 4 },
///     }
/// }
/// ```
///
/// `extends` makes the parent's rules apply to this type too; the fields
/// the parent validates must be declared again here.
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $path:literal $(extends $parent:ty)? {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
        rules {
            $( $rfield:ident => $validator:expr ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        $vis struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::traits::Path for $name {
            const PATH: &'static str = $path;
        }

        impl $crate::traits::FieldValues for $name {
            fn get_value(&self, field: &str) -> Option<$crate::value::Value> {
                match field {
                    $( stringify!($field) => Some($crate::traits::FieldValue::to_value(&self.$field)), )*
                    _ => None,
                }
            }
        }

        impl $crate::traits::FieldAssign for $name {
            fn set_value(
                &mut self,
                field: &str,
                value: &$crate::value::Value,
            ) -> Result<(), $crate::traits::FieldAssignError> {
                match field {
                    $(
                        stringify!($field) => {
                            self.$field = <$ty as $crate::traits::FieldValue>::from_value(value)
                                .ok_or_else(|| {
                                    $crate::traits::FieldAssignError::type_mismatch(field, value)
                                })?;

                            Ok(())
                        }
                    )*
                    _ => Err($crate::traits::FieldAssignError::UnknownField(field.to_string())),
                }
            }
        }

        impl $crate::traits::EntityKind for $name {
            const MODEL: &'static $crate::model::EntityModel = &$crate::model::EntityModel {
                path: $path,
                entity_name: stringify!($name),
                fields: &[ $( stringify!($field) ),* ],
                rules: &[
                    $(
                        $crate::model::FieldRule {
                            field: stringify!($rfield),
                            validator: &$validator,
                        },
                    )*
                ],
                parent: $crate::__entity_parent!($($parent)?),
                constructor: Some($crate::model::construct::<$name>),
            };
        }
    };
}

// __entity_parent
#[doc(hidden)]
#[macro_export]
macro_rules! __entity_parent {
    () => {
        None
    };
    ($parent:ty) => {
        Some(<$parent as $crate::traits::EntityKind>::MODEL)
    };
}
