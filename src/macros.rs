//! Declarative macros for XDR enums and unions.

/// Declare an XDR enum: a `#[repr(i32)]` Rust enum with explicit values,
/// a name table, [`Discriminant`](crate::Discriminant) and serde impls that
/// put the value on the wire as a signed 32-bit integer.
///
/// ```rust
/// use xdr_variant::{xdr_enum, from_bytes, to_bytes, Error};
///
/// xdr_enum! {
///     pub enum Color {
///         Red = 0,
///         Green = 1,
///         Unset = -1,
///     }
/// }
///
/// assert_eq!(to_bytes(&Color::Unset).unwrap(), [0xFF; 4]);
/// assert_eq!(Color::Green.name(), "Green");
/// assert_eq!(from_bytes::<Color>(&[0, 0, 0, 9]), Err(Error::UnknownDiscriminant(9)));
/// ```
#[macro_export]
macro_rules! xdr_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(i32)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const VARIANTS: &'static [$name] = &[ $( $name::$variant ),+ ];

            pub const fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant), )+
                }
            }

            pub const fn value(self) -> i32 {
                self as i32
            }
        }

        impl $crate::Discriminant for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn to_i32(self) -> i32 {
                self as i32
            }

            fn from_i32(value: i32) -> $crate::Result<Self> {
                $( if value == $value { return ::core::result::Result::Ok($name::$variant); } )+
                ::core::result::Result::Err($crate::union::reject_discriminant::<Self>(stringify!($name), value))
            }
        }

        impl ::core::convert::TryFrom<i32> for $name {
            type Error = $crate::Error;

            fn try_from(value: i32) -> $crate::Result<Self> {
                <$name as $crate::Discriminant>::from_i32(value)
            }
        }

        impl ::core::convert::From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value as i32
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S: $crate::__serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error> {
                serializer.serialize_i32(*self as i32)
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D: $crate::__serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error> {
                let raw = <i32 as $crate::__serde::Deserialize>::deserialize(deserializer)?;
                <$name as $crate::Discriminant>::from_i32(raw).map_err(|_| {
                    $crate::union::reject_discriminant_de::<$name, D::Error>(
                        stringify!($name),
                        raw,
                        &[ $( stringify!($variant) ),+ ],
                    )
                })
            }
        }
    };
}

/// Declare an XDR discriminated union.
///
/// ```text
/// union Name switch (DiscriminantType) {
///     arms NameArm {
///         VoidArm,
///         TypedArm: Payload => accessor / must_accessor,
///     }
///     cases {
///         DISC_A => VariantA in VoidArm,
///         DISC_B => VariantB(Payload) in TypedArm,
///         DISC_C => VariantC(Payload) in TypedArm,   // fall-through
///     }
///     default => Other in VoidArm                    // optional
/// }
/// ```
///
/// Each case becomes an enum variant. Cases sharing an arm must carry that
/// arm's payload type. A `default` arm is void and its variant stores the
/// discriminant. On the wire a union is its discriminant as `int` followed
/// by the active payload.
#[macro_export]
macro_rules! xdr_union {
    // ── helpers ────────────────────────────────────────────────────────────

    (@bind $name:ident $variant:ident $p:ident) => { $name::$variant };
    (@bind $name:ident $variant:ident $p:ident $pty:ty) => { $name::$variant($p) };

    (@payload $p:ident) => { &() as &dyn ::core::any::Any };
    (@payload $p:ident $pty:ty) => { $p as &dyn ::core::any::Any };

    (@construct $name:ident $variant:ident $armty:ident $carm:ident $payload:ident) => {
        ::core::result::Result::Ok($name::$variant)
    };
    (@construct $name:ident $variant:ident $armty:ident $carm:ident $payload:ident $pty:ty) => {
        match $payload.map(|b| b.downcast::<$pty>()) {
            ::core::option::Option::Some(::core::result::Result::Ok(value)) => {
                ::core::result::Result::Ok($name::$variant(*value))
            }
            _ => ::core::result::Result::Err($crate::union::wrong_payload(
                stringify!($name),
                <$armty as $crate::UnionArm>::name($armty::$carm),
            )),
        }
    };

    (@construct_default $name:ident $raw:ident $d:ident) => {
        ::core::result::Result::Err($crate::union::reject_discriminant::< <Self as $crate::XdrUnion>::Discriminant>(
            stringify!($name),
            $raw,
        ))
    };
    (@construct_default $name:ident $raw:ident $d:ident $dvariant:ident) => {
        ::core::result::Result::Ok($name::$dvariant($d))
    };

    (@resolve_default $armty:ident $raw:ident $disc:ty) => { ::core::option::Option::None };
    (@resolve_default $armty:ident $raw:ident $disc:ty, $darm:ident) => {
        <$disc as $crate::Discriminant>::from_i32($raw)
            .ok()
            .map(|_| $armty::$darm)
    };

    (@serialize $s:ident, $dv:expr, $p:ident) => {{
        let mut tuple = $s.serialize_tuple(1)?;
        tuple.serialize_element(&$dv)?;
        tuple.end()
    }};
    (@serialize $s:ident, $dv:expr, $p:ident $pty:ty) => {{
        let mut tuple = $s.serialize_tuple(2)?;
        tuple.serialize_element(&$dv)?;
        tuple.serialize_element($p)?;
        tuple.end()
    }};

    (@deserialize $seq:ident $name:ident $variant:ident) => {
        ::core::result::Result::Ok($name::$variant)
    };
    (@deserialize $seq:ident $name:ident $variant:ident $pty:ty) => {
        match $seq.next_element::<$pty>()? {
            ::core::option::Option::Some(value) => ::core::result::Result::Ok($name::$variant(value)),
            ::core::option::Option::None => ::core::result::Result::Err(
                $crate::__serde::de::Error::custom(concat!(
                    "missing payload for ",
                    stringify!($name),
                    "::",
                    stringify!($variant)
                )),
            ),
        }
    };

    (@deserialize_default $name:ident $raw:ident $disc:ty, $cases:ident) => {
        ::core::result::Result::Err($crate::union::reject_discriminant_de::<$disc, _>(
            stringify!($name),
            $raw,
            $cases,
        ))
    };
    (@deserialize_default $name:ident $raw:ident $disc:ty, $cases:ident $dvariant:ident) => {
        match <$disc as $crate::Discriminant>::from_i32($raw) {
            ::core::result::Result::Ok(d) => ::core::result::Result::Ok($name::$dvariant(d)),
            ::core::result::Result::Err(_) => ::core::result::Result::Err(
                $crate::union::reject_discriminant_de::<$disc, _>(stringify!($name), $raw, $cases),
            ),
        }
    };

    // ── entry point ────────────────────────────────────────────────────────

    (
        $(#[$meta:meta])*
        $vis:vis union $name:ident switch ($disc:ty) {
            arms $armty:ident {
                $( $(#[$ameta:meta])* $arm:ident $( : $aty:ty => $get:ident / $must:ident )? ),+ $(,)?
            }
            cases {
                $( $d:expr => $variant:ident $( ( $pty:ty ) )? in $carm:ident ),+ $(,)?
            }
            $( default => $dvariant:ident in $darm:ident $(,)? )?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis enum $name {
            $( $variant $( ($pty) )?, )+
            $(
                #[doc = "Any other legal discriminant (void)."]
                $dvariant($disc),
            )?
        }

        #[doc = concat!("Arms of [`", stringify!($name), "`].")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $armty {
            $( $(#[$ameta])* $arm, )+
        }

        impl $crate::UnionArm for $armty {
            fn name(self) -> &'static str {
                match self {
                    $( $armty::$arm => stringify!($arm), )+
                }
            }
        }

        impl ::core::fmt::Display for $armty {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::UnionArm::name(*self))
            }
        }

        impl $crate::XdrUnion for $name {
            type Discriminant = $disc;
            type Arm = $armty;

            const NAME: &'static str = stringify!($name);

            fn resolve_arm(discriminant: i32) -> ::core::option::Option<$armty> {
                $(
                    if discriminant == <$disc as $crate::Discriminant>::to_i32($d) {
                        return ::core::option::Option::Some($armty::$carm);
                    }
                )+
                $crate::xdr_union!(@resolve_default $armty discriminant $disc $(, $darm)?)
            }

            fn discriminant(&self) -> $disc {
                match self {
                    $( $crate::xdr_union!(@bind $name $variant _p $($pty)?) => $d, )+
                    $( $name::$dvariant(d) => *d, )?
                }
            }

            fn arm(&self) -> $armty {
                match self {
                    $( $crate::xdr_union!(@bind $name $variant _p $($pty)?) => $armty::$carm, )+
                    $( $name::$dvariant(_) => $armty::$darm, )?
                }
            }

            fn payload(&self) -> &dyn ::core::any::Any {
                match self {
                    $(
                        $crate::xdr_union!(@bind $name $variant p $($pty)?) =>
                            $crate::xdr_union!(@payload p $($pty)?),
                    )+
                    $( $name::$dvariant(_) => &() as &dyn ::core::any::Any, )?
                }
            }

            #[allow(unused_variables)]
            fn construct(
                discriminant: $disc,
                payload: ::core::option::Option<::std::boxed::Box<dyn ::core::any::Any>>,
            ) -> $crate::Result<Self> {
                let raw = <$disc as $crate::Discriminant>::to_i32(discriminant);
                $(
                    if raw == <$disc as $crate::Discriminant>::to_i32($d) {
                        return $crate::xdr_union!(@construct $name $variant $armty $carm payload $($pty)?);
                    }
                )+
                $crate::xdr_union!(@construct_default $name raw discriminant $($dvariant)?)
            }
        }

        impl $name {
            $($(
                #[doc = concat!("Payload of arm `", stringify!($arm), "`, if it is the active one.")]
                pub fn $get(&self) -> ::core::option::Option<&$aty> {
                    $crate::XdrUnion::get(self, $armty::$arm)
                        .and_then(|p| p.downcast_ref::<$aty>())
                }

                #[doc = concat!("Payload of arm `", stringify!($arm), "`.")]
                #[doc = ""]
                #[doc = "# Panics"]
                #[doc = ""]
                #[doc = "When another arm is active. Only for callers that already checked the discriminant."]
                #[track_caller]
                pub fn $must(&self) -> &$aty {
                    match self.$get() {
                        ::core::option::Option::Some(value) => value,
                        ::core::option::Option::None => $crate::union::absent_arm(
                            stringify!($name),
                            stringify!($arm),
                            $crate::UnionArm::name($crate::XdrUnion::arm(self)),
                        ),
                    }
                }
            )?)+
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S: $crate::__serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error> {
                use $crate::__serde::ser::SerializeTuple as _;
                if let ::core::result::Result::Err(err) = $crate::XdrUnion::validate(self) {
                    return $crate::union::refuse_encode(serializer, err);
                }
                match self {
                    $(
                        $crate::xdr_union!(@bind $name $variant p $($pty)?) => $crate::xdr_union!(
                            @serialize serializer,
                            <$disc as $crate::Discriminant>::to_i32($d),
                            p $($pty)?
                        ),
                    )+
                    $(
                        $name::$dvariant(d) => $crate::xdr_union!(
                            @serialize serializer,
                            <$disc as $crate::Discriminant>::to_i32(*d),
                            d
                        ),
                    )?
                }
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D: $crate::__serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error> {
                struct UnionVisitor;

                impl<'de> $crate::__serde::de::Visitor<'de> for UnionVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                        f.write_str(concat!("XDR union ", stringify!($name)))
                    }

                    fn visit_seq<A: $crate::__serde::de::SeqAccess<'de>>(
                        self,
                        mut seq: A,
                    ) -> ::core::result::Result<$name, A::Error> {
                        const CASES: &[&str] = &[ $( stringify!($variant) ),+ ];
                        let raw: i32 = match seq.next_element()? {
                            ::core::option::Option::Some(raw) => raw,
                            ::core::option::Option::None => {
                                return ::core::result::Result::Err(
                                    $crate::__serde::de::Error::invalid_length(0, &self),
                                );
                            }
                        };
                        $(
                            if raw == <$disc as $crate::Discriminant>::to_i32($d) {
                                return $crate::xdr_union!(@deserialize seq $name $variant $($pty)?);
                            }
                        )+
                        $crate::xdr_union!(@deserialize_default $name raw $disc, CASES $($dvariant)?)
                    }
                }

                deserializer.deserialize_tuple(2, UnionVisitor)
            }
        }
    };
}
