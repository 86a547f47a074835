//! XDR Serializer (RFC 4506)
//!
//! The [`Serializer`] is generic over any `W: std::io::Write`, enabling both
//! in-memory serialization (`to_bytes`) and streaming serialization (`to_writer`).
//!
//! ## Wire format summary
//! - All values are big-endian (network byte order)
//! - All items are padded to a multiple of 4 bytes
//! - Integers: 4 bytes (signed or unsigned), Hyper: 8 bytes
//! - Strings/Bytes: 4-byte length prefix + data + 0–3 zero-padding bytes
//! - Sequences: 4-byte count prefix + elements
//! - Structs/Tuples: fields encoded consecutively, no length prefix
//! - Options: 4-byte bool discriminant (0=None, 1=Some) + optional value
//! - Unions: 4-byte signed discriminant + the active arm only
//!
//! Bounded wrappers announce their maximum before writing their body; the
//! next length prefix written is checked against it.

use crate::error::{Error, Result};
use crate::{BOUNDED_TOKEN, FIXED_OPAQUE_TOKEN, REJECTED_UNION_TOKEN};
use serde::ser::{self, Serialize};
use std::io::Write;
use tracing::debug;

// ── Public entry points ────────────────────────────────────────────────────

/// Serialize `value` into a freshly allocated `Vec<u8>` of XDR bytes.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut ser = Serializer::new(Vec::new());
    value.serialize(&mut ser)?;
    Ok(ser.into_writer())
}

/// Serialize `value` as XDR bytes, writing directly into `writer`.
pub fn to_writer<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    let mut ser = Serializer::new(&mut writer);
    value.serialize(&mut ser)
}

// ── Serializer ─────────────────────────────────────────────────────────────

/// The XDR serializer. Generic over any `W: Write`.
///
/// ```rust
/// use xdr_variant::ser::Serializer;
/// use serde::Serialize;
///
/// let mut buf = Vec::new();
/// let mut ser = Serializer::new(&mut buf);
/// (-1i32).serialize(&mut ser).unwrap();
/// assert_eq!(buf, [0xFF, 0xFF, 0xFF, 0xFF]);
/// ```
pub struct Serializer<W: Write> {
    writer: W,
    /// Maximum announced by a bounded wrapper; consumed by the next length prefix.
    pending_bound: Option<usize>,
    /// The next `serialize_bytes` call is fixed-length opaque (no prefix).
    fixed_opaque: bool,
    /// Set while a union that failed validation names itself; holds the
    /// union name once the first key has been seen.
    rejected_union: Option<Option<&'static str>>,
}

impl<W: Write> Serializer<W> {
    /// Create a new serializer that writes into `writer`.
    pub fn new(writer: W) -> Self {
        Serializer {
            writer,
            pending_bound: None,
            fixed_opaque: false,
            rejected_union: None,
        }
    }

    /// Consume the serializer and return the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer
            .write_all(bytes)
            .map_err(|e| Error::Io(e.to_string()))
    }

    fn write_u32(&mut self, v: u32) -> Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    /// Write a length prefix, checking it against any announced bound and
    /// against the 32-bit wire limit.
    fn write_length(&mut self, len: usize) -> Result<()> {
        let max = self.pending_bound.take().unwrap_or(u32::MAX as usize);
        if len > max {
            debug!(max, got = len, "refusing to encode over-long collection");
            return Err(Error::BoundsViolation { max, got: len });
        }
        self.write_u32(len as u32)
    }

    /// Write `bytes` followed by enough zero bytes to reach a 4-byte boundary.
    fn write_padded_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_all(bytes)?;
        let pad = (4 - bytes.len() % 4) % 4;
        self.write_all(&[0u8; 3][..pad])
    }

    /// XDR variable-length opaque: 4-byte length + padded data.
    fn write_opaque_variable(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_length(bytes.len())?;
        self.write_padded_bytes(bytes)
    }
}

macro_rules! widen_to_word {
    ($($method:ident($ty:ty) => $word:ty),+ $(,)?) => {
        $(
            fn $method(self, v: $ty) -> Result<()> {
                self.write_all(&<$word>::from(v).to_be_bytes())
            }
        )+
    };
}

macro_rules! write_be_bytes {
    ($($method:ident($ty:ty)),+ $(,)?) => {
        $(
            fn $method(self, v: $ty) -> Result<()> {
                self.write_all(&v.to_be_bytes())
            }
        )+
    };
}

// ── serde::Serializer impl ─────────────────────────────────────────────────

impl<'a, W: Write> ser::Serializer for &'a mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    // ── Primitives ─────────────────────────────────────────────────────────

    /// 0 or 1 as an unsigned int.
    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_u32(u32::from(v))
    }

    // Narrow integers widen to the 4-byte XDR int/unsigned int.
    widen_to_word! {
        serialize_i8(i8) => i32,
        serialize_i16(i16) => i32,
        serialize_i32(i32) => i32,
        serialize_u8(u8) => u32,
        serialize_u16(u16) => u32,
        serialize_u32(u32) => u32,
    }

    // hyper, unsigned hyper, float and double are already whole words.
    write_be_bytes! {
        serialize_i64(i64),
        serialize_u64(u64),
        serialize_f32(f32),
        serialize_f64(f64),
    }

    /// Unicode scalar value as an unsigned int.
    fn serialize_char(self, v: char) -> Result<()> {
        self.write_u32(u32::from(v))
    }

    /// Length-prefixed UTF-8, padded to a word.
    fn serialize_str(self, v: &str) -> Result<()> {
        self.write_opaque_variable(v.as_bytes())
    }

    /// Variable-length opaque, or fixed-length opaque when announced by
    /// `fixed_opaque`.
    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        if std::mem::take(&mut self.fixed_opaque) {
            self.write_padded_bytes(v)
        } else {
            self.write_opaque_variable(v)
        }
    }

    fn serialize_none(self) -> Result<()> {
        self.write_u32(0)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<()> {
        self.write_u32(1)?;
        value.serialize(self)
    }

    /// Void: nothing on the wire.
    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    /// Unit enum variant → 4-byte unsigned discriminant (variant index)
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        self.write_u32(variant_index)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<()> {
        if name == FIXED_OPAQUE_TOKEN {
            self.fixed_opaque = true;
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<()> {
        self.write_u32(variant_index)?;
        value.serialize(self)
    }

    /// XDR variable-length array → 4-byte element count + elements
    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        let len = len.ok_or(Error::LengthRequired)?;
        self.write_length(len)?;
        Ok(self)
    }

    /// Fixed-length array or union body: no count prefix.
    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        if name == BOUNDED_TOKEN {
            self.pending_bound = Some(len);
        }
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.write_u32(variant_index)?;
        Ok(self)
    }

    /// Map → 4-byte pair count + alternating key/value pairs
    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        let len = len.ok_or(Error::LengthRequired)?;
        self.write_length(len)?;
        Ok(self)
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        if name == REJECTED_UNION_TOKEN {
            self.rejected_union = Some(None);
        }
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.write_u32(variant_index)?;
        Ok(self)
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}

// ── Compound serializer impls ──────────────────────────────────────────────

macro_rules! forward_serialize_element {
    ($t:ty, $method:ident) => {
        impl<W: Write> $t for &mut Serializer<W> {
            type Ok = ();
            type Error = Error;
            fn $method<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
                value.serialize(&mut **self)
            }
            fn end(self) -> Result<()> {
                Ok(())
            }
        }
    };
}

macro_rules! forward_serialize_field {
    ($t:ty) => {
        impl<W: Write> $t for &mut Serializer<W> {
            type Ok = ();
            type Error = Error;
            fn serialize_field<T: Serialize + ?Sized>(
                &mut self,
                _key: &'static str,
                value: &T,
            ) -> Result<()> {
                value.serialize(&mut **self)
            }
            fn end(self) -> Result<()> {
                Ok(())
            }
        }
    };
}

forward_serialize_element!(ser::SerializeSeq, serialize_element);
forward_serialize_element!(ser::SerializeTuple, serialize_element);
forward_serialize_element!(ser::SerializeTupleStruct, serialize_field);
forward_serialize_element!(ser::SerializeTupleVariant, serialize_field);
forward_serialize_field!(ser::SerializeStructVariant);

impl<W: Write> ser::SerializeStruct for &mut Serializer<W> {
    type Ok = ();
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        match self.rejected_union {
            None => value.serialize(&mut **self),
            Some(None) => {
                self.rejected_union = Some(Some(key));
                Ok(())
            }
            Some(Some(union)) => {
                self.rejected_union = None;
                debug!(union, arm = key, "refusing to encode union with mismatched arm");
                Err(Error::WrongPayloadType { union, arm: key })
            }
        }
    }
    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<W: Write> ser::SerializeMap for &mut Serializer<W> {
    type Ok = ();
    type Error = Error;
    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        key.serialize(&mut **self)
    }
    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<()> {
        Ok(())
    }
}
