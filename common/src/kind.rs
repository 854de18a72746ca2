//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         Sphere = 2,
///     }
/// }
///
/// assert_eq!(Kind::Sphere.to_string(), "SPHERE");
/// assert_eq!(Kind::from_u8(1), Some(Kind::Cube));
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }

            /// Converts the provided [`u8`] representation back, if it
            /// denotes any variant.
            #[must_use]
            pub const fn from_u8(v: u8) -> Option<Self> {
                $(
                    if v == Self::$variant.u8() {
                        return Some(Self::$variant);
                    }
                )*
                None
            }
        }

        $crate::__kind_serde!($name);
    };
}

/// Implements [`serde`] traits for a [`define_kind!`] enum via its string
/// representation.
#[cfg(feature = "serde")]
#[doc(hidden)]
#[macro_export]
macro_rules! __kind_serde {
    ($name:ident) => {
        impl $crate::private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::private::serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> $crate::private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::private::serde::Deserializer<'de>,
            {
                let s = <::std::string::String as $crate::private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                ::core::str::FromStr::from_str(&s).map_err(|_| {
                    <D::Error as $crate::private::serde::de::Error>::custom(
                        ::std::format!(
                            "invalid `{}` value: {s}",
                            ::core::stringify!($name),
                        ),
                    )
                })
            }
        }
    };
}

/// No-op without [`serde`] support.
#[cfg(not(feature = "serde"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __kind_serde {
    ($name:ident) => {};
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    crate::define_kind! {
        #[doc = "Kind used in tests."]
        enum Shape {
            #[doc = "Cube."]
            Cube = 1,

            #[doc = "Sphere."]
            SolidSphere = 2,
        }
    }

    #[test]
    fn string_representation() {
        assert_eq!(Shape::SolidSphere.to_string(), "SOLID_SPHERE");
        assert_eq!(Shape::from_str("CUBE").unwrap(), Shape::Cube);
        assert!(Shape::from_str("cube").is_err());
    }

    #[test]
    fn u8_representation() {
        assert_eq!(Shape::Cube.u8(), 1);
        assert_eq!(Shape::from_u8(2), Some(Shape::SolidSphere));
        assert_eq!(Shape::from_u8(0), None);
    }
}
