use serde::{de, ser};
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while constructing, encoding or decoding XDR values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A custom error message from serde
    #[error("{0}")]
    Message(String),

    /// Attempted to read past the end of the input buffer
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A sequence or map length was not known ahead of time (XDR requires it)
    #[error("sequence length must be known before serialization (XDR requires a length prefix)")]
    LengthRequired,

    /// A string contained non-UTF-8 bytes
    #[error("string contains invalid bytes")]
    InvalidString,

    /// The discriminant has no arm in the union (or no variant in the enum)
    /// and no default arm covers it.
    #[error("unknown discriminant {0}")]
    UnknownDiscriminant(i32),

    /// A payload did not match the arm its discriminant resolves to.
    #[error("wrong payload type for arm {arm} of {union}")]
    WrongPayloadType {
        /// Union type name.
        union: &'static str,
        /// Arm selected by the discriminant.
        arm: &'static str,
    },

    /// A bounded collection (or its wire length prefix) exceeds its maximum.
    #[error("length {got} exceeds maximum {max}")]
    BoundsViolation { max: usize, got: usize },

    /// The boolean encoding was neither 0 nor 1
    #[error("invalid boolean encoding: {0} (must be 0 or 1)")]
    InvalidBool(u32),

    /// An optional value had an invalid discriminant (must be 0 or 1)
    #[error("invalid optional discriminant: {0} (must be 0 or 1)")]
    InvalidOption(u32),

    /// Padding bytes were non-zero
    #[error("non-zero padding bytes")]
    InvalidPadding,

    /// Decoding finished with unconsumed input left over.
    #[error("{0} trailing bytes after decoded value")]
    TrailingBytes(usize),

    /// Nested values went deeper than the configured ceiling.
    #[error("decode depth exceeded (max={max_depth})")]
    RecursionLimitExceeded { max_depth: u32 },

    /// Input is larger than the configured decode limit.
    #[error("input exceeds limit of {limit} bytes")]
    InputTooLarge { limit: usize },

    /// XDR does not support this serde data model type
    #[error("XDR does not support type: {0}")]
    Unsupported(&'static str),

    /// An I/O error occurred during reading or writing
    #[error("I/O error: {0}")]
    Io(String),

    /// Base64 text could not be decoded.
    #[error("base64: {0}")]
    Base64(String),

    /// An asset code was empty, too long, or not alphanumeric.
    #[error("invalid asset code {0:?}")]
    InvalidAssetCode(String),

    /// Not a `G...` account address.
    #[error("invalid account address {0:?}")]
    InvalidAddress(String),

    /// An asset string or asset type name could not be parsed.
    #[error("invalid asset {0:?}")]
    InvalidAsset(String),
}

impl Error {
    /// True for failures caused by bytes that are not valid XDR for the
    /// requested type, as opposed to schema or configuration violations.
    pub fn is_malformed_wire(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedEof
                | Error::InvalidString
                | Error::InvalidBool(_)
                | Error::InvalidOption(_)
                | Error::InvalidPadding
                | Error::TrailingBytes(_)
        )
    }
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    // Union and enum visitors report unknown discriminants by their decimal
    // value; keep those typed.
    fn unknown_variant(variant: &str, expected: &'static [&'static str]) -> Self {
        match variant.parse::<i32>() {
            Ok(value) => Error::UnknownDiscriminant(value),
            Err(_) => Error::Message(format!(
                "unknown variant `{}`, expected one of {:?}",
                variant, expected
            )),
        }
    }
}
