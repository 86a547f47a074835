//! XDR Deserializer (RFC 4506)
//!
//! Reads from a byte slice with a cursor. Every compound value (struct,
//! tuple, union, array, present optional) counts one level against
//! [`DecodeOptions::max_depth`], so attacker-controlled nesting of
//! self-referential types stops with [`Error::RecursionLimitExceeded`].

use crate::error::{Error, Result};
use crate::options::DecodeOptions;
use crate::{BOUNDED_TOKEN, FIXED_OPAQUE_TOKEN};
use serde::de::{
    self, Deserialize, DeserializeOwned, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
};
use std::io::Read;
use tracing::{debug, trace_span};

/// Deserialize a value from XDR bytes. The whole input must be consumed.
pub fn from_bytes<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    from_bytes_with_options(input, DecodeOptions::default())
}

/// Deserialize a value from XDR bytes under explicit decode limits.
pub fn from_bytes_with_options<T: DeserializeOwned>(
    input: &[u8],
    options: DecodeOptions,
) -> Result<T> {
    let _span = trace_span!("xdr_decode", input_len = input.len()).entered();
    let mut de = Deserializer::with_options(input, options)?;
    let value = T::deserialize(&mut de)?;
    let left = de.remaining().len();
    if left != 0 {
        debug!(left, "decoded value did not consume the whole input");
        return Err(Error::TrailingBytes(left));
    }
    Ok(value)
}

/// Deserialize a value from XDR bytes, also returning remaining unconsumed bytes.
pub fn from_bytes_partial<'de, T: Deserialize<'de>>(input: &'de [u8]) -> Result<(T, &'de [u8])> {
    let _span = trace_span!("xdr_decode_partial", input_len = input.len()).entered();
    let mut de = Deserializer::with_options(input, DecodeOptions::default())?;
    let value = T::deserialize(&mut de)?;
    Ok((value, de.remaining()))
}

/// Read all of `reader` (up to the default input limit) and decode it.
pub fn from_reader<R: Read, T: DeserializeOwned>(reader: R) -> Result<T> {
    from_reader_with_options(reader, DecodeOptions::default())
}

/// Read all of `reader` (up to `options.max_input_len`) and decode it.
pub fn from_reader_with_options<R: Read, T: DeserializeOwned>(
    reader: R,
    options: DecodeOptions,
) -> Result<T> {
    let limit = options.max_input_len;
    let mut buf = Vec::new();
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| Error::Io(e.to_string()))?;
    from_bytes_with_options(&buf, options)
}

/// The XDR deserializer. Reads from a byte slice, maintaining a cursor position.
pub struct Deserializer<'de> {
    input: &'de [u8],
    pos: usize,
    options: DecodeOptions,
    depth: u32,
    /// Maximum announced by a bounded wrapper; consumed by the next length prefix.
    pending_bound: Option<usize>,
}

impl<'de> Deserializer<'de> {
    pub fn new(input: &'de [u8]) -> Self {
        Deserializer {
            input,
            pos: 0,
            options: DecodeOptions::default(),
            depth: 0,
            pending_bound: None,
        }
    }

    /// Create a deserializer with explicit limits. Fails if `input` is
    /// already larger than `options.max_input_len`.
    pub fn with_options(input: &'de [u8], options: DecodeOptions) -> Result<Self> {
        if input.len() > options.max_input_len {
            debug!(len = input.len(), limit = options.max_input_len, "input too large");
            return Err(Error::InputTooLarge {
                limit: options.max_input_len,
            });
        }
        Ok(Deserializer {
            options,
            ..Deserializer::new(input)
        })
    }

    /// Returns the unconsumed portion of the input buffer.
    pub fn remaining(&self) -> &'de [u8] {
        &self.input[self.pos..]
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Consume exactly `n` bytes, returning a slice. Fails with UnexpectedEof.
    fn take(&mut self, n: usize) -> Result<&'de [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::UnexpectedEof)?;
        if end > self.input.len() {
            return Err(Error::UnexpectedEof);
        }
        let slice = &self.input[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    /// Read a big-endian u32 (XDR basic block)
    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    /// Read a length prefix, checking it against a pending bound.
    fn read_length(&mut self) -> Result<usize> {
        let len = self.read_u32()? as usize;
        if let Some(max) = self.pending_bound.take() {
            if len > max {
                debug!(max, got = len, "length prefix exceeds declared maximum");
                return Err(Error::BoundsViolation { max, got: len });
            }
        }
        Ok(len)
    }

    /// Read `n` bytes of data plus their 0–3 padding bytes.
    /// Returns a slice into the original input (zero-copy).
    fn read_padded_bytes(&mut self, n: usize) -> Result<&'de [u8]> {
        let data = self.take(n)?;
        let padding_len = (4 - n % 4) % 4;
        let padding = self.take(padding_len)?;
        if self.options.strict_padding && padding.iter().any(|&b| b != 0) {
            return Err(Error::InvalidPadding);
        }
        Ok(data)
    }

    /// Variable-length opaque or string: 4-byte length n, then n bytes + padding.
    fn read_variable_opaque(&mut self) -> Result<&'de [u8]> {
        let n = self.read_length()?;
        self.read_padded_bytes(n)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            debug!(max_depth = self.options.max_depth, "decode nesting limit reached");
            return Err(Error::RecursionLimitExceeded {
                max_depth: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn visit_nested_seq<V: Visitor<'de>>(&mut self, count: usize, visitor: V) -> Result<V::Value> {
        self.enter()?;
        let value = visitor.visit_seq(SeqDeserializer::new(self, count));
        self.leave();
        value
    }
}

macro_rules! read_word {
    ($($method:ident => $read:ident, $visit:ident;)+) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                visitor.$visit(self.$read()?)
            }
        )+
    };
}

// ── Main Deserializer impl ─────────────────────────────────────────────────

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::Unsupported(
            "deserialize_any (XDR is not self-describing)",
        ))
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.read_u32()? {
            0 => visitor.visit_bool(false),
            1 => visitor.visit_bool(true),
            v => Err(Error::InvalidBool(v)),
        }
    }

    // Narrow integers travel as full words; the visitor range-checks them.
    read_word! {
        deserialize_i8 => read_i32, visit_i32;
        deserialize_i16 => read_i32, visit_i32;
        deserialize_i32 => read_i32, visit_i32;
        deserialize_i64 => read_i64, visit_i64;
        deserialize_u8 => read_u32, visit_u32;
        deserialize_u16 => read_u32, visit_u32;
        deserialize_u32 => read_u32, visit_u32;
        deserialize_u64 => read_u64, visit_u64;
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_f32(f32::from_be_bytes(self.take_array()?))
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_f64(f64::from_be_bytes(self.take_array()?))
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let v = self.read_u32()?;
        let c = char::from_u32(v).ok_or(Error::InvalidString)?;
        visitor.visit_char(c)
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let bytes = self.read_variable_opaque()?;
        let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidString)?;
        visitor.visit_borrowed_str(s)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        de::Deserializer::deserialize_str(self, visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let bytes = self.read_variable_opaque()?;
        visitor.visit_borrowed_bytes(bytes)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        de::Deserializer::deserialize_bytes(self, visitor)
    }

    /// XDR optional-data: 4-byte bool, then the value when present.
    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.read_u32()? {
            0 => visitor.visit_none(),
            1 => {
                self.enter()?;
                let value = visitor.visit_some(&mut *self);
                self.leave();
                value
            }
            v => Err(Error::InvalidOption(v)),
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        if name == FIXED_OPAQUE_TOKEN {
            visitor.visit_newtype_struct(FixedOpaqueDeserializer { de: self })
        } else {
            visitor.visit_newtype_struct(self)
        }
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let count = self.read_length()?;
        self.visit_nested_seq(count, visitor)
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        // Fixed-length: no count prefix
        self.visit_nested_seq(len, visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        if name == BOUNDED_TOKEN {
            // A bounded wrapper: one field (the length-prefixed body), `len`
            // carries the declared maximum.
            self.pending_bound = Some(len);
            let value = visitor.visit_seq(SeqDeserializer::new(&mut *self, 1));
            self.pending_bound = None;
            return value;
        }
        self.visit_nested_seq(len, visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let count = self.read_length()?;
        self.enter()?;
        let value = visitor.visit_map(MapDeserializer::new(&mut *self, count));
        self.leave();
        value
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        // XDR structure: fields in order, no count prefix
        self.visit_nested_seq(fields.len(), visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        self.enter()?;
        let value = visitor.visit_enum(EnumDeserializer::new(&mut *self));
        self.leave();
        value
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        // Field and variant identifiers arrive as plain indices.
        visitor.visit_u32(self.read_u32()?)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::Unsupported(
            "deserialize_ignored_any (XDR is not self-describing)",
        ))
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}

// ── SeqDeserializer: fixed count ───────────────────────────────────────────

struct SeqDeserializer<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
    remaining: usize,
}

impl<'a, 'de> SeqDeserializer<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>, count: usize) -> Self {
        SeqDeserializer {
            de,
            remaining: count,
        }
    }
}

impl<'de> SeqAccess<'de> for SeqDeserializer<'_, 'de> {
    type Error = Error;

    fn next_element_seed<T: de::DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

// ── MapDeserializer ────────────────────────────────────────────────────────

struct MapDeserializer<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
    remaining: usize,
}

impl<'a, 'de> MapDeserializer<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>, count: usize) -> Self {
        MapDeserializer {
            de,
            remaining: count,
        }
    }
}

impl<'de> MapAccess<'de> for MapDeserializer<'_, 'de> {
    type Error = Error;

    fn next_key_seed<K: de::DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn next_value_seed<V: de::DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        seed.deserialize(&mut *self.de)
    }
}

// ── EnumDeserializer ───────────────────────────────────────────────────────
//
// Plain serde-derived enums use their variant index as the discriminant.
// Schema unions with explicit values go through `xdr_union!` instead.

struct EnumDeserializer<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
}

impl<'a, 'de> EnumDeserializer<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>) -> Self {
        EnumDeserializer { de }
    }
}

impl<'de> EnumAccess<'de> for EnumDeserializer<'_, 'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V: de::DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, Self::Variant)> {
        let variant_index = self.de.read_u32()?;
        let val = seed.deserialize(de::value::U32Deserializer::<Error>::new(variant_index))?;
        Ok((val, self))
    }
}

impl<'de> VariantAccess<'de> for EnumDeserializer<'_, 'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T: de::DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        seed.deserialize(self.de)
    }

    fn tuple_variant<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        visitor.visit_seq(SeqDeserializer::new(self.de, len))
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_seq(SeqDeserializer::new(self.de, fields.len()))
    }
}

// ── FixedOpaqueDeserializer ────────────────────────────────────────────────
//
// Handed to the `fixed_opaque` visitor. The only supported request is
// `deserialize_tuple(N)`, answered with N raw bytes (padding consumed).

struct FixedOpaqueDeserializer<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
}

impl<'de> de::Deserializer<'de> for FixedOpaqueDeserializer<'_, 'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::Unsupported(
            "fixed-length opaque must be read with a known length",
        ))
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        let bytes = self.de.read_padded_bytes(len)?;
        visitor.visit_borrowed_bytes(bytes)
    }

    fn is_human_readable(&self) -> bool {
        false
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple_struct
        map struct enum identifier ignored_any
    }
}
