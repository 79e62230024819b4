//! MSB-first bit packing.

use crate::codes::Code;

/// Widest chunk accepted by [`BitWriter::write_bits`]. Together with at most 7
/// pending bits this stays within the 64-bit accumulator.
const MAX_CHUNK_BITS: u8 = 56;

#[inline]
fn low_mask(n: u8) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Bit writer that fills each byte from its most significant bit.
pub struct BitWriter {
    data: Vec<u8>,
    bit_buf: u64,
    bit_count: u8,
}

impl BitWriter {
    /// Create a new bit writer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create with capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            bit_buf: 0,
            bit_count: 0,
        }
    }

    /// Write the low `n` bits of `value`, high bit first. `n` must be at most 56.
    #[inline]
    pub fn write_bits(&mut self, value: u64, n: u8) {
        debug_assert!(n <= MAX_CHUNK_BITS);
        self.bit_buf = (self.bit_buf << n) | (value & low_mask(n));
        self.bit_count += n;

        while self.bit_count >= 8 {
            self.bit_count -= 8;
            self.data.push((self.bit_buf >> self.bit_count) as u8);
        }
        self.bit_buf &= low_mask(self.bit_count);
    }

    /// Write a whole code.
    #[inline]
    pub fn write_code(&mut self, code: Code) {
        let mut remaining = code.len();
        while remaining > 0 {
            let take = remaining.min(MAX_CHUNK_BITS);
            let chunk = (code.bits() >> (remaining - take)) as u64;
            self.write_bits(chunk, take);
            remaining -= take;
        }
    }

    /// Flush remaining bits, padding the final byte with zeros.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.data.push((self.bit_buf << (8 - self.bit_count)) as u8);
        }
        self.data
    }

    /// Bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.data.len() as u64 * 8 + self.bit_count as u64
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.bit_count == 0
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Bit reader over the first `bit_len` bits of a byte slice, MSB first.
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: u64,
    bit_len: u64,
}

impl<'a> BitReader<'a> {
    /// Read every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_len(data, data.len() as u64 * 8)
    }

    /// Read only the first `bit_len` bits of `data` (clamped to its size).
    pub fn with_len(data: &'a [u8], bit_len: u64) -> Self {
        Self {
            data,
            pos: 0,
            bit_len: bit_len.min(data.len() as u64 * 8),
        }
    }

    /// Read one bit, or `None` at the end.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.pos >= self.bit_len {
            return None;
        }
        let byte = self.data[(self.pos / 8) as usize];
        let bit = (byte >> (7 - (self.pos % 8))) & 1;
        self.pos += 1;
        Some(bit == 1)
    }

    /// Bits consumed so far.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Bits left to read.
    pub fn remaining(&self) -> u64 {
        self.bit_len - self.pos
    }
}
