//! Serde helper module for XDR fixed-length opaque data (RFC 4506 §4.9).
//!
//! Fixed-length opaque is encoded as the raw bytes followed only by 0–3
//! zero-padding bytes. There is **no length prefix**. Hashes, keys and
//! signature hints in the schema types all use it.
//!
//! # Usage
//!
//! Annotate any `[u8; N]` field with `#[serde(with = "xdr_variant::fixed_opaque")]`:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use xdr_variant::{from_bytes, to_bytes};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! pub struct Hint {
//!     pub weight: u32,
//!     #[serde(with = "xdr_variant::fixed_opaque")]
//!     pub tag: [u8; 5],
//! }
//!
//! let hint = Hint { weight: 7, tag: *b"abcde" };
//!
//! let bytes = to_bytes(&hint).unwrap();
//! // 4 bytes (weight) + 5 bytes (tag) + 3 bytes padding
//! assert_eq!(bytes.len(), 12);
//! assert_eq!(&bytes[4..], b"abcde\0\0\0");
//!
//! let decoded: Hint = from_bytes(&bytes).unwrap();
//! assert_eq!(hint, decoded);
//! ```
//!
//! Without the annotation serde treats `[u8; 32]` as a 32-tuple of `u8`,
//! each promoted to a 4-byte unsigned int: 128 bytes instead of 32.

use std::fmt;
use std::marker::PhantomData;

mod private {
    pub trait Sealed {}
}

/// Types that can be written as XDR fixed-length opaque data.
///
/// Sealed: only `[u8; N]` implements it.
pub trait XdrFixedOpaque: private::Sealed + Sized {
    /// The byte length on the wire (before padding).
    fn fixed_len() -> usize;
    fn as_bytes(&self) -> &[u8];
    /// Construct from a slice of exactly `fixed_len()` bytes.
    fn from_exact_bytes(bytes: &[u8]) -> Option<Self>;
}

impl<const N: usize> private::Sealed for [u8; N] {}

impl<const N: usize> XdrFixedOpaque for [u8; N] {
    fn fixed_len() -> usize {
        N
    }
    fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }
    fn from_exact_bytes(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok()
    }
}

/// Serialize `value` as raw bytes + 0–3 padding. No length prefix is written.
pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: XdrFixedOpaque,
    S: serde::Serializer,
{
    serializer.serialize_newtype_struct(crate::FIXED_OPAQUE_TOKEN, &RawBytes(value.as_bytes()))
}

/// Consume exactly `N` bytes + padding. No length prefix is read.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: XdrFixedOpaque,
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_newtype_struct(
        crate::FIXED_OPAQUE_TOKEN,
        FixedOpaqueVisitor::<T>(PhantomData),
    )
}

/// Forwards to `serialize_bytes`; the XDR serializer drops the prefix once
/// the token has been seen.
struct RawBytes<'a>(&'a [u8]);

impl serde::Serialize for RawBytes<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0)
    }
}

struct FixedOpaqueVisitor<T>(PhantomData<T>);

impl<'de, T: XdrFixedOpaque> serde::de::Visitor<'de> for FixedOpaqueVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fixed-length opaque ({} bytes)", T::fixed_len())
    }

    fn visit_newtype_struct<D: serde::Deserializer<'de>>(self, de: D) -> Result<T, D::Error> {
        de.deserialize_tuple(T::fixed_len(), self)
    }

    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<T, E> {
        T::from_exact_bytes(v).ok_or_else(|| E::invalid_length(v.len(), &self))
    }

    fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<T, A::Error> {
        let mut buf = Vec::with_capacity(T::fixed_len());
        while let Some(b) = seq.next_element::<u8>()? {
            buf.push(b);
        }
        T::from_exact_bytes(&buf).ok_or_else(|| serde::de::Error::invalid_length(buf.len(), &self))
    }
}
