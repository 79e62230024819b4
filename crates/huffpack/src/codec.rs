//! Huffman codec: encode and decode of self-describing streams.

use std::io::{Read, Write};
use std::time::Instant;

use huffpack_core::{
    Codec, CodecConfig, CompressionStats, Compressor, Decompressor, Error, Result,
};
use tracing::debug;

use crate::bits::{BitReader, BitWriter};
use crate::codes::{Code, CodeTable};
use crate::frequency::{FrequencyTable, MAX_SYMBOLS};
use crate::header::{header_size, write_header, EncodedStream};
use crate::tree::CodeTree;

/// Zero bits needed to extend `bit_len` to a byte boundary (0-7, never 8).
#[inline]
pub fn padding_bits(bit_len: u64) -> u8 {
    ((8 - bit_len % 8) % 8) as u8
}

/// Code table used on the wire for `freq`.
///
/// One distinct symbol gets the fixed one-bit code `0`; anything else goes
/// through tree construction and derivation.
pub fn build_code_table(freq: &FrequencyTable) -> Result<CodeTable> {
    if freq.distinct() == 1 {
        if let Some((symbol, _)) = freq.iter().next() {
            return Ok(CodeTable::single(symbol));
        }
    }
    let tree = CodeTree::build(freq)?;
    Ok(CodeTable::derive(&tree))
}

/// Encode `data` with the default configuration.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().encode(data)
}

/// Decode `stream` with the default configuration.
pub fn decode(stream: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().decode(stream)
}

/// Huffman codec.
///
/// Holds only configuration; every call builds its own frequency table, tree
/// and code table, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    /// Create a new codec with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `data` into a header plus packed payload.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.compress_with_stats(data).map(|(stream, _)| stream)
    }

    /// Encode and report statistics for the operation.
    pub fn compress_with_stats(&self, data: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        let start = Instant::now();

        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if data.len() > self.config.max_input_size {
            return Err(Error::input_too_large(
                data.len() as u64,
                self.config.max_input_size as u64,
            ));
        }

        let freq = FrequencyTable::count(data);
        let table = build_code_table(&freq)?;

        let mut codes = [Code::EMPTY; MAX_SYMBOLS];
        let mut payload_bits = 0u64;
        for (symbol, code) in table.iter() {
            codes[symbol as usize] = code;
            payload_bits += freq.get(symbol) * code.len() as u64;
        }
        let padding = padding_bits(payload_bits);
        let data_bytes = ((payload_bits + padding as u64) / 8) as usize;

        let header_len = header_size(freq.distinct());
        let mut out = Vec::with_capacity(header_len + 1 + data_bytes);
        write_header(&freq, &mut out);

        let mut writer = BitWriter::with_capacity(1 + data_bytes);
        writer.write_bits(padding as u64, 8);
        for &byte in data {
            writer.write_code(codes[byte as usize]);
        }
        out.extend_from_slice(&writer.finish());

        let stats = CompressionStats {
            original_size: data.len(),
            compressed_size: out.len(),
            header_size: header_len,
            time_us: start.elapsed().as_micros() as u64,
            distinct_symbols: freq.distinct(),
            payload_bits,
            padding_bits: padding,
            max_code_len: table.max_len(),
        };

        debug!(
            original = stats.original_size,
            encoded = stats.compressed_size,
            distinct = stats.distinct_symbols,
            payload_bits,
            padding,
            max_code_len = stats.max_code_len,
            "huffman encode"
        );

        Ok((out, stats))
    }

    /// Encode UTF-8 text, e.g. text extracted from a document.
    pub fn compress_text(&self, text: &str) -> Result<Vec<u8>> {
        self.encode(text.as_bytes())
    }

    /// Read `reader` to the end and encode its contents.
    ///
    /// Reads at most one byte past the configured limit before failing with
    /// [`Error::InputTooLarge`].
    pub fn compress_reader<R: Read>(&self, reader: R) -> Result<Vec<u8>> {
        let limit = self.config.max_input_size as u64;
        let mut data = Vec::new();
        reader.take(limit.saturating_add(1)).read_to_end(&mut data)?;
        self.encode(&data)
    }

    /// Decode a stream produced by [`HuffmanCodec::encode`].
    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let stream = EncodedStream::parse(input)?;
        let expected = stream.frequencies.total();

        if expected > self.config.max_input_size as u64 {
            return Err(Error::input_too_large(
                expected,
                self.config.max_input_size as u64,
            ));
        }

        // Every symbol takes at least one bit.
        let data_bits = stream.data_bits();
        if expected > data_bits {
            return Err(Error::corrupt_stream(format!(
                "header declares {expected} symbols but only {data_bits} bits follow"
            )));
        }

        if self.config.strict_padding && stream.padding > 0 {
            let last = stream.data.last().copied().unwrap_or(0);
            if last & ((1u8 << stream.padding) - 1) != 0 {
                return Err(Error::corrupt_at("non-zero padding bits", data_bits));
            }
        }

        let table = build_code_table(&stream.frequencies)?;
        let output = decode_symbols(&table, stream.data, data_bits, expected)?;

        debug!(
            encoded = input.len(),
            decoded = output.len(),
            distinct = table.len(),
            padding = stream.padding,
            max_code_len = table.max_len(),
            "huffman decode"
        );

        Ok(output)
    }

    /// Decode `input` and write the original bytes to `writer`.
    ///
    /// Nothing is written unless the whole stream decodes.
    pub fn decompress_into<W: Write>(&self, input: &[u8], mut writer: W) -> Result<usize> {
        let output = self.decode(input)?;
        writer.write_all(&output)?;
        Ok(output.len())
    }
}

/// Accumulate bits until they match a code, emit its symbol, repeat.
fn decode_symbols(
    table: &CodeTable,
    data: &[u8],
    data_bits: u64,
    expected: u64,
) -> Result<Vec<u8>> {
    let mut reader = BitReader::with_len(data, data_bits);
    let mut output = Vec::with_capacity(expected as usize);
    let mut current = Code::EMPTY;

    while let Some(bit) = reader.read_bit() {
        current = current.push(bit);

        if let Some(symbol) = table.symbol(&current) {
            if output.len() as u64 == expected {
                return Err(Error::corrupt_at(
                    format!("more than the declared {expected} symbols"),
                    reader.position(),
                ));
            }
            output.push(symbol);
            current = Code::EMPTY;
        } else if current.len() >= table.max_len() {
            return Err(Error::corrupt_at(
                format!("{}-bit run {current} matches no code", current.len()),
                reader.position(),
            ));
        }
    }

    if !current.is_empty() {
        return Err(Error::corrupt_at(
            format!("{} unmatched trailing bits", current.len()),
            reader.position(),
        ));
    }
    if output.len() as u64 != expected {
        return Err(Error::corrupt_stream(format!(
            "decoded {} symbols, header declares {expected}",
            output.len()
        )));
    }

    Ok(output)
}

impl Compressor for HuffmanCodec {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.encode(input)
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        // A Huffman code never costs more than 8 bits per byte.
        header_size(input_len.min(MAX_SYMBOLS)) + 1 + input_len
    }
}

impl Decompressor for HuffmanCodec {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decode(input)
    }
}

impl Codec for HuffmanCodec {
    fn new() -> Self {
        HuffmanCodec::new()
    }

    fn with_config(config: CodecConfig) -> Self {
        HuffmanCodec::with_config(config)
    }
}
