/// Implements `len()`, indexing, `Copy`, `Clone`, `Default`, `Debug` and `PartialEq` for a
/// `#[repr(C)]` struct whose fields all share the type parameter, and generates tests
/// asserting that the indexing follows the field order.
///
/// ## Arguments
/// * `$type_name` - The struct name.
/// * `$type_param` - The name of the single type parameter.
/// * `$field` - The struct fields, in declaration order.
#[macro_export]
macro_rules! impl_standard_traits {
    ($type_name:ident, $type_param:ident, $($field:ident),+ $(,)?) => {
        impl<$type_param> $type_name<$type_param> {
            /// Returns the number of fields.
            #[inline(always)]
            #[allow(unused)]
            pub const fn len(&self) -> usize {
                [$(stringify!($field)),+].len()
            }
        }

        impl<$type_param> core::ops::Index<usize> for $type_name<$type_param> {
            type Output = $type_param;

            #[inline(always)]
            fn index(&self, index: usize) -> &Self::Output {
                let fields = [$(&self.$field),+];
                match fields.get(index) {
                    Some(field) => *field,
                    None => panic!("Index out of bounds"),
                }
            }
        }

        impl<$type_param> core::ops::IndexMut<usize> for $type_name<$type_param> {
            #[inline(always)]
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                let fields = [$(&mut self.$field),+];
                match fields.into_iter().nth(index) {
                    Some(field) => field,
                    None => panic!("Index out of bounds"),
                }
            }
        }

        impl<$type_param> Copy for $type_name<$type_param> where $type_param: Copy {}

        impl<$type_param> Clone for $type_name<$type_param>
        where
            $type_param: Clone,
        {
            fn clone(&self) -> Self {
                Self {
                    $($field: self.$field.clone()),+
                }
            }
        }

        impl<$type_param> Default for $type_name<$type_param>
        where
            $type_param: Default,
        {
            #[inline]
            fn default() -> Self {
                Self {
                    $($field: Default::default()),+
                }
            }
        }

        impl<$type_param> core::fmt::Debug for $type_name<$type_param>
        where
            $type_param: core::fmt::Debug,
        {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($type_name))
                    $(.field(stringify!($field), &self.$field))+
                    .finish()
            }
        }

        impl<$type_param> PartialEq for $type_name<$type_param>
        where
            $type_param: PartialEq,
        {
            fn eq(&self, other: &Self) -> bool {
                true $(&& self.$field == other.$field)+
            }
        }

        #[cfg(test)]
        paste::paste! {
            #[cfg(test)]
            mod [<tests_gen_ $type_name:lower>] {
                use super::*;

                #[test]
                fn test_len() {
                    let value = $type_name::<f32>::default();
                    assert_eq!(value.len(), [$(stringify!($field)),+].len());
                }

                #[test]
                fn test_index_follows_field_order() {
                    let mut value = $type_name::<f32>::default();
                    let mut next = 0.0_f32;
                    $(
                        next += 1.0;
                        value.$field = next;
                    )+

                    for i in 0..value.len() {
                        assert_eq!(value[i], (i + 1) as f32);
                    }
                }

                #[test]
                fn test_copy_eq() {
                    let value = $type_name::<f64>::default();
                    let copy = value;
                    assert_eq!(value, copy);
                }
            }
        }
    };
}

/// Emits a `defmt` debug message when the `defmt` feature is enabled; compiles to nothing otherwise.
///
/// Only used on cold paths (solver transitions, retuning), never in the control tick.
macro_rules! debug {
    ($($arg:tt)+) => {
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)+);
    };
}

pub(crate) use debug;
