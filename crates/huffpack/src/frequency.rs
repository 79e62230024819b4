//! Byte frequency model.

use huffpack_core::{Error, Result};

/// Number of distinct symbols (one per byte value).
pub const MAX_SYMBOLS: usize = 256;

/// Per-symbol occurrence counts.
///
/// Only symbols with a non-zero count are considered present. The total of all
/// counts is tracked alongside and never overflows `u64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; MAX_SYMBOLS],
    distinct: usize,
    total: u64,
}

impl FrequencyTable {
    /// Count symbol occurrences in `data`.
    ///
    /// Uses 4 interleaved histograms so consecutive equal bytes do not stall on
    /// the same counter.
    pub fn count(data: &[u8]) -> Self {
        let mut freq0 = [0u64; MAX_SYMBOLS];
        let mut freq1 = [0u64; MAX_SYMBOLS];
        let mut freq2 = [0u64; MAX_SYMBOLS];
        let mut freq3 = [0u64; MAX_SYMBOLS];

        let chunks = data.chunks_exact(8);
        let remainder = chunks.remainder();

        for chunk in chunks {
            freq0[chunk[0] as usize] += 1;
            freq1[chunk[1] as usize] += 1;
            freq2[chunk[2] as usize] += 1;
            freq3[chunk[3] as usize] += 1;
            freq0[chunk[4] as usize] += 1;
            freq1[chunk[5] as usize] += 1;
            freq2[chunk[6] as usize] += 1;
            freq3[chunk[7] as usize] += 1;
        }

        for &byte in remainder {
            freq0[byte as usize] += 1;
        }

        for i in 0..MAX_SYMBOLS {
            freq0[i] += freq1[i] + freq2[i] + freq3[i];
        }

        let distinct = freq0.iter().filter(|&&c| c > 0).count();
        Self {
            counts: freq0,
            distinct,
            total: data.len() as u64,
        }
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    ///
    /// Fails with [`Error::MalformedHeader`] on a zero count, a repeated
    /// symbol, or a total that overflows `u64`.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0u64; MAX_SYMBOLS];
        let mut distinct = 0;
        let mut total = 0u64;

        for (symbol, count) in pairs {
            if count == 0 {
                return Err(Error::malformed_header(format!(
                    "symbol {symbol} has zero count"
                )));
            }
            if counts[symbol as usize] != 0 {
                return Err(Error::malformed_header(format!(
                    "symbol {symbol} declared twice"
                )));
            }
            total = total
                .checked_add(count)
                .ok_or_else(|| Error::malformed_header("symbol counts overflow"))?;
            counts[symbol as usize] = count;
            distinct += 1;
        }

        Ok(Self {
            counts,
            distinct,
            total,
        })
    }

    /// Occurrence count of `symbol` (zero when absent).
    #[inline]
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    /// Sum of all counts; equals the length of the counted input.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// True when no symbol is present.
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}
