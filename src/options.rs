//! Decode limits.

/// Default ceiling for nested compound values (structs, unions, optionals,
/// arrays) during decode.
pub const DEFAULT_MAX_DEPTH: u32 = 500;

/// Default ceiling for the total input accepted by a single decode call.
pub const DEFAULT_MAX_INPUT_LEN: usize = i32::MAX as usize;

/// Runtime limits and behavior switches for XDR decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting depth of compound values.
    pub max_depth: u32,
    /// Maximum number of input bytes.
    pub max_input_len: usize,
    /// Reject non-zero padding bytes.
    pub strict_padding: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            strict_padding: true,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    /// Accept non-zero padding. Some legacy encoders leave garbage there.
    pub fn with_strict_padding(mut self, strict_padding: bool) -> Self {
        self.strict_padding = strict_padding;
        self
    }
}
