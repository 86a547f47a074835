//! Discriminated unions.
//!
//! An XDR `union switch` becomes a Rust enum with one variant per listed
//! discriminant value (plus a variant carrying the raw discriminant when the
//! schema has a `default:` arm). Several variants may share one *arm*: the
//! named payload slot that a discriminant resolves to. [`XdrUnion`] exposes
//! the resolver, the untyped constructor and accessors; the typed surface is
//! generated by [`xdr_union!`](crate::xdr_union).
//!
//! ```rust
//! use xdr_variant::{xdr_union, Error, XdrUnion};
//!
//! xdr_union! {
//!     pub union Reading switch (i32) {
//!         arms ReadingArm {
//!             Empty,
//!             Value: i32 => value / must_value,
//!         }
//!         cases {
//!             0 => Empty in Empty,
//!             1 => Value(i32) in Value,
//!         }
//!     }
//! }
//!
//! let r = Reading::construct(1, Some(Box::new(42i32))).unwrap();
//! assert_eq!(r.value(), Some(&42));
//! assert_eq!(Reading::resolve_arm(0), Some(ReadingArm::Empty));
//! assert_eq!(Reading::construct(2, None), Err(Error::UnknownDiscriminant(2)));
//! ```

use crate::REJECTED_UNION_TOKEN;
use crate::error::{Error, Result};
use std::any::Any;
use std::fmt::Debug;
use tracing::debug;

/// A type a union can switch on: an XDR enum or plain `int`.
pub trait Discriminant: Copy + Eq + Debug + 'static {
    const TYPE_NAME: &'static str;

    fn to_i32(self) -> i32;

    /// Fails with [`Error::UnknownDiscriminant`] for values outside the type.
    fn from_i32(value: i32) -> Result<Self>;
}

impl Discriminant for i32 {
    const TYPE_NAME: &'static str = "int";

    fn to_i32(self) -> i32 {
        self
    }

    fn from_i32(value: i32) -> Result<Self> {
        Ok(value)
    }
}

/// Identity of a union arm.
pub trait UnionArm: Copy + Eq + Debug + 'static {
    fn name(self) -> &'static str;
}

pub trait XdrUnion: Sized + 'static {
    type Discriminant: Discriminant;
    type Arm: UnionArm;

    const NAME: &'static str;

    /// Arm selected by a raw discriminant, `None` when no case and no
    /// `default:` arm covers it. Total over `i32`.
    fn resolve_arm(discriminant: i32) -> Option<Self::Arm>;

    fn discriminant(&self) -> Self::Discriminant;

    /// Arm populated by this value.
    fn arm(&self) -> Self::Arm;

    /// Active payload; `()` for void arms.
    fn payload(&self) -> &dyn Any;

    /// Build a value from a discriminant and an untyped payload.
    ///
    /// Void arms ignore `payload`. Typed arms require a payload of exactly
    /// the arm's type, otherwise [`Error::WrongPayloadType`]. Discriminants
    /// without a case or `default:` arm give [`Error::UnknownDiscriminant`].
    fn construct(discriminant: Self::Discriminant, payload: Option<Box<dyn Any>>) -> Result<Self>;

    /// [`construct`](Self::construct) from the wire value of the discriminant.
    fn construct_raw(discriminant: i32, payload: Option<Box<dyn Any>>) -> Result<Self> {
        let discriminant = <Self::Discriminant as Discriminant>::from_i32(discriminant)
            .map_err(|_| reject_discriminant::<Self::Discriminant>(Self::NAME, discriminant))?;
        Self::construct(discriminant, payload)
    }

    /// Payload of `arm`, present only when `arm` is the one the stored
    /// discriminant resolves to.
    fn get(&self, arm: Self::Arm) -> Option<&dyn Any> {
        (Self::resolve_arm(self.discriminant().to_i32()) == Some(arm)).then(|| self.payload())
    }

    /// Check that the stored discriminant resolves to the populated arm.
    /// Only a `default:` variant holding a listed discriminant can fail.
    fn validate(&self) -> Result<()> {
        let raw = self.discriminant().to_i32();
        match Self::resolve_arm(raw) {
            Some(arm) if arm == self.arm() => Ok(()),
            Some(arm) => Err(wrong_payload(Self::NAME, arm.name())),
            None => Err(reject_discriminant::<Self::Discriminant>(Self::NAME, raw)),
        }
    }
}

/// `type_name` is the enum or union being built; `D` is what it switches on.
#[doc(hidden)]
pub fn reject_discriminant<D: Discriminant>(type_name: &'static str, value: i32) -> Error {
    debug!(type_name, switch = D::TYPE_NAME, value, "unknown discriminant");
    Error::UnknownDiscriminant(value)
}

#[doc(hidden)]
pub fn reject_discriminant_de<D: Discriminant, E: serde::de::Error>(
    type_name: &'static str,
    value: i32,
    expected: &'static [&'static str],
) -> E {
    debug!(type_name, switch = D::TYPE_NAME, value, "unknown discriminant on the wire");
    E::unknown_variant(&value.to_string(), expected)
}

#[doc(hidden)]
pub fn wrong_payload(union: &'static str, arm: &'static str) -> Error {
    debug!(union, arm, "payload does not match arm");
    Error::WrongPayloadType { union, arm }
}

/// Fail the encode of a union whose variant disagrees with its arm.
///
/// The XDR serializer recognises the rejection token and returns the typed
/// [`Error::WrongPayloadType`] from inside nested values. Other serializers
/// see a plain custom error.
#[doc(hidden)]
pub fn refuse_encode<S: serde::Serializer>(
    serializer: S,
    err: Error,
) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::{Error as _, SerializeStruct};

    if let Error::WrongPayloadType { union, arm } = err {
        let mut rejected = serializer.serialize_struct(REJECTED_UNION_TOKEN, 2)?;
        rejected.serialize_field(union, &())?;
        rejected.serialize_field(arm, &())?;
    }
    Err(S::Error::custom(err))
}

#[doc(hidden)]
#[track_caller]
pub fn absent_arm(union: &'static str, wanted: &'static str, active: &'static str) -> ! {
    panic!("{union}: arm {wanted} is not set (active arm is {active})")
}
