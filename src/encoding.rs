//! Base64 text form of XDR values, as used for envelopes and ledger entries
//! passed around in JSON and URLs.

use crate::de::from_bytes_with_options;
use crate::error::{Error, Result};
use crate::options::DecodeOptions;
use crate::ser::to_bytes;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encode `value` as XDR and then as standard (padded) base64.
pub fn to_base64<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(STANDARD.encode(to_bytes(value)?))
}

/// Decode standard base64 text holding exactly one XDR value.
pub fn from_base64<T: DeserializeOwned>(text: &str) -> Result<T> {
    from_base64_with_options(text, DecodeOptions::default())
}

pub fn from_base64_with_options<T: DeserializeOwned>(
    text: &str,
    options: DecodeOptions,
) -> Result<T> {
    let bytes = STANDARD
        .decode(text)
        .map_err(|e| Error::Base64(e.to_string()))?;
    from_bytes_with_options(&bytes, options)
}
