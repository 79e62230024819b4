//! # Huffpack Core
//!
//! Core traits, types, and configuration for the huffpack Huffman codec.
//!
//! ## Design Philosophy
//!
//! - **Pure transforms**: Every operation maps an in-memory byte buffer to
//!   another, with no I/O inside the codec
//! - **No shared state**: Codecs hold only immutable configuration, so one
//!   instance can serve any number of threads
//! - **Distinct failures**: Empty input, malformed headers, and corrupt payloads
//!   are separate error variants
//!
//! ## Core Traits
//!
//! - [`Compressor`] - One-shot compression operations
//! - [`Decompressor`] - One-shot decompression operations
//! - [`Codec`] - Combined compress/decompress capability
//!
//! ## Example
//!
//! ```ignore
//! use huffpack_core::{Codec, Compressor, Decompressor};
//! use huffpack::HuffmanCodec;
//!
//! let codec = HuffmanCodec::new();
//! let compressed = codec.compress(data)?;
//! let original = codec.decompress(&compressed)?;
//! ```

pub mod config;
pub mod error;
pub mod stats;
pub mod traits;
pub mod types;

pub use config::CodecConfig;
pub use error::{Error, Result};
pub use stats::{CompressionStats, Metrics};
pub use traits::{Codec, Compressor, Decompressor};
pub use types::CompressionRatio;
