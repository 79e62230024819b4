//! Self-describing stream header.
//!
//! ```text
//! offset  size   field
//! 0       3      magic "HUF"
//! 3       1      format version
//! 4       2      distinct symbol count N (u16 LE, 1..=256)
//! 6       9*N    entries: symbol (u8), count (u64 LE); strictly ascending symbols
//! 6+9N    1      padding bit count (0..=7)
//! 7+9N    ...    packed code bits, MSB first
//! ```

use huffpack_core::{Error, Result};

use crate::frequency::{FrequencyTable, MAX_SYMBOLS};

/// Stream magic bytes.
pub const MAGIC: [u8; 3] = *b"HUF";

/// Current format version.
pub const VERSION: u8 = 1;

/// Bytes before the frequency entries (magic, version, symbol count).
pub const PREAMBLE_SIZE: usize = 6;

/// Bytes per frequency entry.
pub const ENTRY_SIZE: usize = 9;

/// Header size for a table with `distinct` symbols.
pub const fn header_size(distinct: usize) -> usize {
    PREAMBLE_SIZE + distinct * ENTRY_SIZE
}

/// Append the header for `freq` to `out`.
pub fn write_header(freq: &FrequencyTable, out: &mut Vec<u8>) {
    out.reserve(header_size(freq.distinct()));
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&(freq.distinct() as u16).to_le_bytes());
    for (symbol, count) in freq.iter() {
        out.push(symbol);
        out.extend_from_slice(&count.to_le_bytes());
    }
}

/// A parsed stream: frequency table, padding field, and packed code bits.
#[derive(Debug, Clone)]
pub struct EncodedStream<'a> {
    /// Frequency table recovered from the header.
    pub frequencies: FrequencyTable,
    /// Trailing zero bits in the last data byte (0-7).
    pub padding: u8,
    /// Packed code bits following the padding field.
    pub data: &'a [u8],
    /// Header size in bytes.
    pub header_len: usize,
}

impl<'a> EncodedStream<'a> {
    /// Split `input` into header and payload.
    ///
    /// Header inconsistencies fail with [`Error::MalformedHeader`]; a missing
    /// or out-of-range padding field fails with [`Error::CorruptStream`].
    pub fn parse(input: &'a [u8]) -> Result<Self> {
        let (frequencies, header_len) = read_header(input)?;
        let payload = &input[header_len..];

        let (&padding, data) = payload
            .split_first()
            .ok_or_else(|| Error::corrupt_stream("missing padding field"))?;
        if padding > 7 {
            return Err(Error::corrupt_stream(format!(
                "padding field {padding} out of range 0..=7"
            )));
        }
        if padding as usize > data.len() * 8 {
            return Err(Error::corrupt_stream(format!(
                "padding of {padding} bits exceeds {} data bits",
                data.len() * 8
            )));
        }

        Ok(Self {
            frequencies,
            padding,
            data,
            header_len,
        })
    }

    /// Number of meaningful code bits (padding excluded).
    pub fn data_bits(&self) -> u64 {
        self.data.len() as u64 * 8 - self.padding as u64
    }

    /// Length of the packed payload, padding field included.
    pub fn payload_len(&self) -> usize {
        self.data.len() + 1
    }
}

/// Parse the header, returning the table and the header length.
pub fn read_header(input: &[u8]) -> Result<(FrequencyTable, usize)> {
    if input.len() < PREAMBLE_SIZE {
        return Err(Error::malformed_header(format!(
            "stream of {} bytes is shorter than the {PREAMBLE_SIZE}-byte preamble",
            input.len()
        )));
    }
    if input[..3] != MAGIC {
        return Err(Error::malformed_header("bad magic"));
    }
    if input[3] != VERSION {
        return Err(Error::malformed_header(format!(
            "unsupported version {}",
            input[3]
        )));
    }

    let distinct = u16::from_le_bytes([input[4], input[5]]) as usize;
    if distinct == 0 || distinct > MAX_SYMBOLS {
        return Err(Error::malformed_header(format!(
            "symbol count {distinct} out of range 1..={MAX_SYMBOLS}"
        )));
    }

    let header_len = header_size(distinct);
    if input.len() < header_len {
        return Err(Error::malformed_header(format!(
            "{distinct} symbols need {} entry bytes, only {} remain",
            distinct * ENTRY_SIZE,
            input.len() - PREAMBLE_SIZE
        )));
    }

    let entries = &input[PREAMBLE_SIZE..header_len];
    let mut previous: Option<u8> = None;
    let mut pairs = Vec::with_capacity(distinct);
    for entry in entries.chunks_exact(ENTRY_SIZE) {
        let symbol = entry[0];
        if previous.is_some_and(|p| symbol <= p) {
            return Err(Error::malformed_header(format!(
                "symbol {symbol} out of order"
            )));
        }
        previous = Some(symbol);

        let mut count = [0u8; 8];
        count.copy_from_slice(&entry[1..]);
        pairs.push((symbol, u64::from_le_bytes(count)));
    }

    Ok((FrequencyTable::from_pairs(pairs)?, header_len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_for(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        write_header(&FrequencyTable::count(data), &mut out);
        out
    }

    #[test]
    fn test_header_layout() {
        let header = header_for(b"aaaaaaaab");
        assert_eq!(header.len(), header_size(2));
        assert_eq!(&header[..3], b"HUF");
        assert_eq!(header[3], VERSION);
        assert_eq!(&header[4..6], &[2, 0]);
        assert_eq!(header[6], b'a');
        assert_eq!(&header[7..15], &8u64.to_le_bytes());
        assert_eq!(header[15], b'b');
        assert_eq!(&header[16..24], &1u64.to_le_bytes());
    }

    #[test]
    fn test_read_header_roundtrip() {
        let data = b"mississippi";
        let header = header_for(data);
        let (freq, len) = read_header(&header).unwrap();
        assert_eq!(freq, FrequencyTable::count(data));
        assert_eq!(len, header.len());
    }

    #[test]
    fn test_rejects_short_and_foreign_input() {
        assert!(matches!(
            read_header(b"HUF"),
            Err(Error::MalformedHeader { .. })
        ));
        assert!(matches!(
            read_header(b"PK\x03\x04\x00\x00\x00"),
            Err(Error::MalformedHeader { .. })
        ));

        let mut header = header_for(b"abc");
        header[3] = 9;
        assert!(matches!(
            read_header(&header),
            Err(Error::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_rejects_symbol_count_out_of_range() {
        let mut header = header_for(b"abc");
        header[4] = 0;
        header[5] = 0;
        assert!(matches!(
            read_header(&header),
            Err(Error::MalformedHeader { .. })
        ));

        header[4] = 0x01;
        header[5] = 0x01; // 257
        assert!(matches!(
            read_header(&header),
            Err(Error::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_rejects_count_inconsistent_with_length() {
        let mut header = header_for(b"abc");
        header[4] = 4;
        assert!(matches!(
            read_header(&header),
            Err(Error::MalformedHeader { .. })
        ));

        let header = header_for(b"abc");
        assert!(matches!(
            read_header(&header[..header.len() - 1]),
            Err(Error::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_or_unordered_symbols() {
        let mut header = header_for(b"ab");
        header[PREAMBLE_SIZE + ENTRY_SIZE] = b'a';
        assert!(matches!(
            read_header(&header),
            Err(Error::MalformedHeader { .. })
        ));

        let mut header = header_for(b"ab");
        header[PREAMBLE_SIZE] = b'c';
        assert!(matches!(
            read_header(&header),
            Err(Error::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_count() {
        let mut header = header_for(b"ab");
        header[PREAMBLE_SIZE + 1..PREAMBLE_SIZE + ENTRY_SIZE].fill(0);
        assert!(matches!(
            read_header(&header),
            Err(Error::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_parse_payload_fields() {
        let mut stream = header_for(b"ab");
        stream.extend_from_slice(&[6, 0b0100_0000]);
        let parsed = EncodedStream::parse(&stream).unwrap();
        assert_eq!(parsed.padding, 6);
        assert_eq!(parsed.data, &[0b0100_0000]);
        assert_eq!(parsed.data_bits(), 2);
        assert_eq!(parsed.payload_len(), 2);
        assert_eq!(parsed.header_len, header_size(2));
    }

    #[test]
    fn test_parse_rejects_bad_padding() {
        let header = header_for(b"ab");

        assert!(matches!(
            EncodedStream::parse(&header),
            Err(Error::CorruptStream { .. })
        ));

        let mut stream = header.clone();
        stream.extend_from_slice(&[8, 0]);
        assert!(matches!(
            EncodedStream::parse(&stream),
            Err(Error::CorruptStream { .. })
        ));

        let mut stream = header;
        stream.push(3);
        assert!(matches!(
            EncodedStream::parse(&stream),
            Err(Error::CorruptStream { .. })
        ));
    }
}
