//! # Huffpack
//!
//! Lossless Huffman coding of byte sequences into a single self-describing
//! stream.
//!
//! ## Pipeline
//!
//! - **Frequency model**: count occurrences of each byte value
//! - **Code tree**: greedy two-lowest-weight merge with a deterministic
//!   `(weight, insertion sequence)` tie-break
//! - **Code table**: depth-first code derivation, `0` left and `1` right
//! - **Codec**: header with the frequency table, a padding field, and the
//!   MSB-first packed code bits
//!
//! The decoder rebuilds the identical tree from the frequency table in the
//! header, so no tree shape travels on the wire.
//!
//! ## Example
//!
//! ```
//! use huffpack::HuffmanCodec;
//! use huffpack_core::{Compressor, Decompressor};
//!
//! let codec = HuffmanCodec::new();
//! let compressed = codec.compress(b"abracadabra")?;
//! let original = codec.decompress(&compressed)?;
//! assert_eq!(original, b"abracadabra");
//! # Ok::<(), huffpack_core::Error>(())
//! ```

pub mod bits;
pub mod codec;
pub mod codes;
pub mod frequency;
pub mod header;
pub mod tree;

// Re-export main types
pub use codec::{build_code_table, decode, encode, padding_bits, HuffmanCodec};
pub use codes::{Code, CodeTable};
pub use frequency::FrequencyTable;
pub use header::EncodedStream;
pub use tree::CodeTree;

pub use huffpack_core::{CodecConfig, CompressionStats, Error, Result};
