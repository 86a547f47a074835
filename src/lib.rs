//! # xdr-variant
//!
//! XDR (eXternal Data Representation, RFC 4506) discriminated unions and
//! bounded collections on top of a `serde` codec, with a subset of the
//! Stellar protocol schema expressed through them.
//!
//! ## Overview
//!
//! XDR is big-endian and every item occupies a multiple of 4 bytes. A
//! `union switch` is written as its discriminant followed by the payload of
//! the single arm that discriminant selects. Here a union is a Rust enum, so
//! a value can never hold a discriminant and a payload that disagree.
//!
//! * [`xdr_enum!`] and [`xdr_union!`] declare enums and unions.
//! * [`XdrUnion`] is the arm resolver, untyped constructor and accessor.
//! * [`BoundedVec`], [`BoundedBytes`] and [`BoundedString`] carry their
//!   schema maximum in the type and are checked on construct, encode and
//!   decode.
//! * [`DecodeOptions`] caps nesting depth and input size.
//!
//! ## Serde type mapping
//!
//! | Rust / serde type | XDR encoding |
//! |-------------------|--------------|
//! | `bool`            | 4-byte unsigned int: 0 (false) or 1 (true) |
//! | `i8`, `i16`, `i32` | 4-byte signed int (sign-extended) |
//! | `i64`             | 8-byte hyper integer |
//! | `u8`, `u16`, `u32` | 4-byte unsigned int (zero-extended) |
//! | `u64`             | 8-byte unsigned hyper integer |
//! | `&str`, `String`  | 4-byte length + UTF-8 bytes + 0-3 zero-padding bytes |
//! | `Option<T>`       | 4-byte bool discriminant + optional encoded T |
//! | `()` / unit struct | 0 bytes (XDR void) |
//! | `Vec<T>` / seq    | 4-byte count + encoded elements |
//! | Struct / tuple    | fields encoded consecutively (no count prefix) |
//! | `xdr_enum!`       | 4-byte signed value |
//! | `xdr_union!`      | 4-byte signed discriminant + active arm |
//! | `BoundedVec<T, N>` | as `Vec<T>`, count checked against `N` |
//! | `[u8; N]` with [`fixed_opaque`] | N bytes + 0-3 zero-padding bytes |
//!
//! ## Example
//!
//! ```rust
//! use xdr_variant::types::{Memo, MemoArm};
//! use xdr_variant::{from_bytes, to_bytes, XdrUnion};
//!
//! let memo = Memo::from_id(7);
//! let bytes = to_bytes(&memo).unwrap();
//! assert_eq!(bytes, [0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 7]);
//!
//! let decoded: Memo = from_bytes(&bytes).unwrap();
//! assert_eq!(decoded.arm(), MemoArm::Id);
//! assert_eq!(decoded.id(), Some(&7));
//! assert_eq!(decoded.text(), None);
//! ```

pub mod bounded;
pub mod de;
pub mod encoding;
pub mod error;
pub mod fixed_opaque;
mod macros;
pub mod options;
pub mod ser;
pub mod types;
pub mod union;

pub use bounded::{BoundedBytes, BoundedString, BoundedVec};
pub use de::{
    Deserializer, from_bytes, from_bytes_partial, from_bytes_with_options, from_reader,
    from_reader_with_options,
};
pub use encoding::{from_base64, from_base64_with_options, to_base64};
pub use error::{Error, Result};
pub use options::DecodeOptions;
pub use ser::{Serializer, to_bytes, to_writer};
pub use union::{Discriminant, UnionArm, XdrUnion};

pub use serde::{Deserialize, Serialize};

#[doc(hidden)]
pub use serde as __serde;

/// Newtype name marking fixed-length opaque data (no length prefix).
pub(crate) const FIXED_OPAQUE_TOKEN: &str = "$xdr_variant::FixedOpaque";

/// Tuple-struct name marking a bounded collection; the tuple length carries
/// the maximum.
pub(crate) const BOUNDED_TOKEN: &str = "$xdr_variant::Bounded";

/// Struct name a union serializes under when it fails validation; its two
/// field keys are the union and arm names.
pub(crate) const REJECTED_UNION_TOKEN: &str = "$xdr_variant::RejectedUnion";
