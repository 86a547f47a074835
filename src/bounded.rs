//! Length-bounded XDR collections: `T<MAX>`, `opaque<MAX>` and `string<MAX>`.
//!
//! The maximum is a const generic, so it is part of the type and can be read
//! at compile time through `MAX_LEN`. Construction refuses anything longer.
//! On the wire each wrapper announces its maximum to the XDR codec, which
//! checks the length prefix against it in both directions; a decode never
//! reads an element past the declared bound.

use crate::error::{Error, Result};
use crate::BOUNDED_TOKEN;
use serde::de::{self, DeserializeSeed, SeqAccess, Visitor};
use serde::ser::SerializeTupleStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use tracing::debug;

fn check_len(got: usize, max: u32) -> Result<()> {
    if got > max as usize {
        debug!(max, got, "bounded collection over its maximum");
        return Err(Error::BoundsViolation {
            max: max as usize,
            got,
        });
    }
    Ok(())
}

// ── BoundedVec ─────────────────────────────────────────────────────────────

/// Variable-length array `T<MAX>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundedVec<T, const MAX: u32> {
    inner: Vec<T>,
}

impl<T, const MAX: u32> BoundedVec<T, MAX> {
    pub const MAX_LEN: u32 = MAX;

    pub fn new() -> Self {
        BoundedVec { inner: Vec::new() }
    }

    /// Append `item`, failing with `BoundsViolation` when already full.
    pub fn push(&mut self, item: T) -> Result<()> {
        check_len(self.inner.len() + 1, MAX)?;
        self.inner.push(item);
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.inner
    }

    pub fn into_inner(self) -> Vec<T> {
        self.inner
    }
}

impl<T, const MAX: u32> Default for BoundedVec<T, MAX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const MAX: u32> Deref for BoundedVec<T, MAX> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.inner
    }
}

impl<T, const MAX: u32> TryFrom<Vec<T>> for BoundedVec<T, MAX> {
    type Error = Error;

    fn try_from(inner: Vec<T>) -> Result<Self> {
        check_len(inner.len(), MAX)?;
        Ok(BoundedVec { inner })
    }
}

impl<T: Clone, const MAX: u32> TryFrom<&[T]> for BoundedVec<T, MAX> {
    type Error = Error;

    fn try_from(items: &[T]) -> Result<Self> {
        Self::try_from(items.to_vec())
    }
}

impl<T, const MAX: u32> From<BoundedVec<T, MAX>> for Vec<T> {
    fn from(v: BoundedVec<T, MAX>) -> Vec<T> {
        v.inner
    }
}

impl<'a, T, const MAX: u32> IntoIterator for &'a BoundedVec<T, MAX> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<T: Serialize, const MAX: u32> Serialize for BoundedVec<T, MAX> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_tuple_struct(BOUNDED_TOKEN, MAX as usize)?;
        st.serialize_field(&self.inner)?;
        st.end()
    }
}

impl<'de, T: Deserialize<'de>, const MAX: u32> Deserialize<'de> for BoundedVec<T, MAX> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct VecVisitor<T, const MAX: u32>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>, const MAX: u32> Visitor<'de> for VecVisitor<T, MAX> {
            type Value = BoundedVec<T, MAX>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an array of at most {} elements", MAX)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
                let items: Vec<T> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                BoundedVec::try_from(items).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_tuple_struct(BOUNDED_TOKEN, MAX as usize, VecVisitor(PhantomData))
    }
}

// ── BoundedBytes ───────────────────────────────────────────────────────────

/// Variable-length opaque `opaque<MAX>`.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundedBytes<const MAX: u32> {
    inner: Vec<u8>,
}

impl<const MAX: u32> BoundedBytes<MAX> {
    pub const MAX_LEN: u32 = MAX;

    pub fn new() -> Self {
        BoundedBytes { inner: Vec::new() }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.inner
    }
}

impl<const MAX: u32> fmt::Debug for BoundedBytes<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundedBytes<{}>({})", MAX, hex::encode(&self.inner))
    }
}

impl<const MAX: u32> Deref for BoundedBytes<MAX> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.inner
    }
}

impl<const MAX: u32> TryFrom<Vec<u8>> for BoundedBytes<MAX> {
    type Error = Error;

    fn try_from(inner: Vec<u8>) -> Result<Self> {
        check_len(inner.len(), MAX)?;
        Ok(BoundedBytes { inner })
    }
}

impl<const MAX: u32> TryFrom<&[u8]> for BoundedBytes<MAX> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::try_from(bytes.to_vec())
    }
}

impl<const MAX: u32> Serialize for BoundedBytes<MAX> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_tuple_struct(BOUNDED_TOKEN, MAX as usize)?;
        st.serialize_field(&ByteSlice(&self.inner))?;
        st.end()
    }
}

impl<'de, const MAX: u32> Deserialize<'de> for BoundedBytes<MAX> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct BytesVisitor<const MAX: u32>;

        impl<'de, const MAX: u32> Visitor<'de> for BytesVisitor<MAX> {
            type Value = BoundedBytes<MAX>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "opaque data of at most {} bytes", MAX)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
                let bytes = seq
                    .next_element_seed(ByteBufSeed)?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                BoundedBytes::try_from(bytes).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_tuple_struct(BOUNDED_TOKEN, MAX as usize, BytesVisitor::<MAX>)
    }
}

/// Writes through `serialize_bytes` (length prefix + padded data).
struct ByteSlice<'a>(&'a [u8]);

impl Serialize for ByteSlice<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0)
    }
}

/// Reads through `deserialize_byte_buf`, so opaque data is not taken for an
/// array of 4-byte integers.
struct ByteBufSeed;

impl<'de> DeserializeSeed<'de> for ByteBufSeed {
    type Value = Vec<u8>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
        deserializer.deserialize_byte_buf(self)
    }
}

impl<'de> Visitor<'de> for ByteBufSeed {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("opaque bytes")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Vec<u8>, E> {
        Ok(v.to_vec())
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> std::result::Result<Vec<u8>, E> {
        Ok(v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Vec<u8>, A::Error> {
        let mut out = Vec::new();
        while let Some(b) = seq.next_element::<u8>()? {
            out.push(b);
        }
        Ok(out)
    }
}

// ── BoundedString ──────────────────────────────────────────────────────────

/// XDR `string<MAX>`. The bound counts bytes, not characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundedString<const MAX: u32> {
    inner: String,
}

impl<const MAX: u32> BoundedString<MAX> {
    pub const MAX_LEN: u32 = MAX;

    pub fn new() -> Self {
        BoundedString {
            inner: String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn into_inner(self) -> String {
        self.inner
    }
}

impl<const MAX: u32> Deref for BoundedString<MAX> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.inner
    }
}

impl<const MAX: u32> fmt::Display for BoundedString<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl<const MAX: u32> TryFrom<String> for BoundedString<MAX> {
    type Error = Error;

    fn try_from(inner: String) -> Result<Self> {
        check_len(inner.len(), MAX)?;
        Ok(BoundedString { inner })
    }
}

impl<const MAX: u32> TryFrom<&str> for BoundedString<MAX> {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::try_from(s.to_owned())
    }
}

impl<const MAX: u32> std::str::FromStr for BoundedString<MAX> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s)
    }
}

impl<const MAX: u32> Serialize for BoundedString<MAX> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_tuple_struct(BOUNDED_TOKEN, MAX as usize)?;
        st.serialize_field(self.inner.as_str())?;
        st.end()
    }
}

impl<'de, const MAX: u32> Deserialize<'de> for BoundedString<MAX> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct StringVisitor<const MAX: u32>;

        impl<'de, const MAX: u32> Visitor<'de> for StringVisitor<MAX> {
            type Value = BoundedString<MAX>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a string of at most {} bytes", MAX)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
                let s: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                BoundedString::try_from(s).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_tuple_struct(BOUNDED_TOKEN, MAX as usize, StringVisitor::<MAX>)
    }
}
