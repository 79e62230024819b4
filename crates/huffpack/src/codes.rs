//! Code table derivation.

use std::collections::HashMap;
use std::fmt;

use crate::frequency::MAX_SYMBOLS;
use crate::tree::{CodeTree, NodeId, NodeKind};

/// A variable-length bit code, most significant bit first.
///
/// Codes are bounded by the tree depth. A tree over counts whose total fits in
/// `u64` is at most 92 levels deep, so 128 bits are always enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    /// The zero-length code.
    pub const EMPTY: Code = Code { bits: 0, len: 0 };

    /// Create a code from its low `len` bits.
    pub fn new(bits: u128, len: u8) -> Self {
        debug_assert!(len <= 128);
        let mask = if len >= 128 { u128::MAX } else { (1u128 << len) - 1 };
        Self {
            bits: bits & mask,
            len,
        }
    }

    /// Code value in the low `len()` bits.
    #[inline]
    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// Length in bits.
    #[inline]
    pub fn len(&self) -> u8 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one bit.
    #[inline]
    pub fn push(self, bit: bool) -> Self {
        Self {
            bits: (self.bits << 1) | bit as u128,
            len: self.len + 1,
        }
    }

    /// True when `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len == 0 {
            return true;
        }
        self.len <= other.len && (other.bits >> (other.len - self.len)) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            let bit = (self.bits >> i) & 1;
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

/// Bidirectional symbol/code mapping.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Option<Code>; MAX_SYMBOLS],
    symbols: HashMap<Code, u8>,
    max_len: u8,
}

impl CodeTable {
    /// Derive codes from `tree` by a depth-first walk, appending `0` on the
    /// left branch and `1` on the right.
    ///
    /// A single-leaf tree yields the empty code for its symbol; see
    /// [`CodeTable::single`] for the code actually used on the wire.
    pub fn derive(tree: &CodeTree) -> Self {
        let mut table = Self::with_capacity(tree.len() / 2 + 1);
        let mut stack: Vec<(NodeId, Code)> = vec![(tree.root(), Code::EMPTY)];

        while let Some((id, code)) = stack.pop() {
            match tree.node(id).kind {
                NodeKind::Leaf(symbol) => table.insert(symbol, code),
                NodeKind::Internal { left, right } => {
                    stack.push((right, code.push(true)));
                    stack.push((left, code.push(false)));
                }
            }
        }

        table
    }

    /// Table for a stream with one distinct symbol: the fixed one-bit code `0`.
    pub fn single(symbol: u8) -> Self {
        let mut table = Self::with_capacity(1);
        table.insert(symbol, Code::new(0, 1));
        table
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            codes: [None; MAX_SYMBOLS],
            symbols: HashMap::with_capacity(capacity),
            max_len: 0,
        }
    }

    fn insert(&mut self, symbol: u8, code: Code) {
        self.codes[symbol as usize] = Some(code);
        self.symbols.insert(code, symbol);
        self.max_len = self.max_len.max(code.len());
    }

    /// Code assigned to `symbol`.
    #[inline]
    pub fn code(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Symbol whose code is exactly `code`.
    #[inline]
    pub fn symbol(&self, code: &Code) -> Option<u8> {
        self.symbols.get(code).copied()
    }

    /// Longest code length in bits.
    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols with their codes, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }
}
