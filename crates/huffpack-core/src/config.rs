//! Codec configuration.

use serde::{Deserialize, Serialize};

/// Default ceiling on the original payload size (50 MiB).
pub const DEFAULT_MAX_INPUT_SIZE: usize = 50 * 1024 * 1024;

/// Configuration shared by encode and decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest original payload accepted, in bytes. Applies to the input of
    /// encode and to the output size a stream header declares on decode.
    pub max_input_size: usize,
    /// Reject streams whose trailing padding bits are not all zero.
    pub strict_padding: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            strict_padding: true,
        }
    }
}

impl CodecConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payload size ceiling.
    pub fn with_max_input_size(mut self, max_input_size: usize) -> Self {
        self.max_input_size = max_input_size;
        self
    }

    /// Enable or disable the zero-padding check on decode.
    pub fn with_strict_padding(mut self, strict_padding: bool) -> Self {
        self.strict_padding = strict_padding;
        self
    }
}
