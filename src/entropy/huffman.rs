//! Huffman coding implementation
//!
//! Classical order-0 Huffman coding over byte symbols: tree construction from
//! a frequency table, prefix code generation, bit-packed encoding, and
//! decoding bounded by an exact bit count.
//!
//! Tree construction is fully deterministic: the two lowest-weight nodes are
//! merged repeatedly, and ties are broken by node insertion order (leaves are
//! inserted in ascending symbol order, merged nodes in creation order). The
//! same input therefore always yields the same tree, the same code table and
//! the same packed bytes, in any process.

use crate::entropy::frequency::FrequencyTable;
use crate::error::{PixoraError, Result};
use crate::io::bit_stream::{BitReader, BitWriter};
use std::collections::{BinaryHeap, HashMap};

/// Node in the Huffman tree
///
/// Each internal node exclusively owns its two children; the tree is a strict
/// binary tree with no sharing and no parent pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HuffmanNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }
}

/// Heap entry carrying the deterministic extraction key
#[derive(Debug)]
struct HeapEntry {
    weight: u64,
    order: u32,
    node: HuffmanNode,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.order == other.order
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse ordering for min-heap behavior; insertion order breaks ties
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Huffman prefix-code tree built from symbol frequencies
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: HuffmanNode,
    leaf_count: usize,
}

impl HuffmanTree {
    /// Build a tree from a frequency table
    ///
    /// Fails with `InvalidInput` when the table is empty; callers are
    /// expected to treat an empty input as "nothing to compress" before
    /// reaching tree construction.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(PixoraError::invalid_input(
                "cannot build a Huffman tree from an empty frequency table",
            ));
        }

        let mut heap = BinaryHeap::new();
        let mut order = 0u32;

        for (symbol, count) in frequencies.iter_present() {
            heap.push(HeapEntry {
                weight: count,
                order,
                node: HuffmanNode::Leaf {
                    symbol,
                    weight: count,
                },
            });
            order += 1;
        }
        let leaf_count = heap.len();

        while heap.len() > 1 {
            let first = heap.pop().expect("heap holds at least two nodes");
            let second = heap.pop().expect("heap holds at least two nodes");

            let weight = first.weight + second.weight;
            heap.push(HeapEntry {
                weight,
                order,
                node: HuffmanNode::Internal {
                    weight,
                    left: Box::new(first.node),
                    right: Box::new(second.node),
                },
            });
            order += 1;
        }

        let root = heap.pop().expect("heap holds the root").node;
        Ok(Self { root, leaf_count })
    }

    /// Build a tree directly from a pixel buffer
    pub fn from_pixels(pixels: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_pixels(pixels))
    }

    /// Number of distinct symbols the tree covers
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    fn root(&self) -> &HuffmanNode {
        &self.root
    }
}

/// Bijective symbol <-> code mapping generated from a tree
///
/// Codes are prefix-free by construction: `0` is appended on left descent and
/// `1` on right descent. A tree with a single leaf gets the fixed one-bit
/// code `0` so the decoder's matching loop always consumes at least one bit
/// per symbol.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: HashMap<u8, Vec<bool>>,
    by_code: HashMap<Vec<bool>, u8>,
    max_code_len: usize,
}

impl CodeTable {
    /// Generate the code table for a tree
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = HashMap::new();
        let mut max_code_len = 0;

        match tree.root() {
            HuffmanNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, vec![false]);
                max_code_len = 1;
            }
            root => {
                // Iterative depth-first walk with an explicit stack
                let mut stack: Vec<(&HuffmanNode, Vec<bool>)> = vec![(root, Vec::new())];
                while let Some((node, prefix)) = stack.pop() {
                    match node {
                        HuffmanNode::Leaf { symbol, .. } => {
                            max_code_len = max_code_len.max(prefix.len());
                            codes.insert(*symbol, prefix);
                        }
                        HuffmanNode::Internal { left, right, .. } => {
                            let mut left_code = prefix.clone();
                            left_code.push(false);
                            let mut right_code = prefix;
                            right_code.push(true);
                            stack.push((right, right_code));
                            stack.push((left, left_code));
                        }
                    }
                }
            }
        }

        let by_code = codes.iter().map(|(&s, c)| (c.clone(), s)).collect();
        Self {
            codes,
            by_code,
            max_code_len,
        }
    }

    /// Rebuild a code table from explicit `(symbol, code)` entries
    ///
    /// This is the decode path: entries come from a deserialized artifact and
    /// are validated rather than trusted. Fails with `CorruptStream` on empty
    /// codes or duplicate symbols/codes.
    pub fn from_codes(entries: &[(u8, Vec<bool>)]) -> Result<Self> {
        let mut codes = HashMap::new();
        let mut by_code = HashMap::new();
        let mut max_code_len = 0;

        for (symbol, code) in entries {
            if code.is_empty() {
                return Err(PixoraError::corrupt_stream(format!(
                    "empty code for symbol {}",
                    symbol
                )));
            }
            max_code_len = max_code_len.max(code.len());
            if codes.insert(*symbol, code.clone()).is_some() {
                return Err(PixoraError::corrupt_stream(format!(
                    "duplicate code table entry for symbol {}",
                    symbol
                )));
            }
            if by_code.insert(code.clone(), *symbol).is_some() {
                return Err(PixoraError::corrupt_stream(format!(
                    "code reused by symbol {}",
                    symbol
                )));
            }
        }

        Ok(Self {
            codes,
            by_code,
            max_code_len,
        })
    }

    /// Get the code for a symbol
    pub fn code(&self, symbol: u8) -> Option<&Vec<bool>> {
        self.codes.get(&symbol)
    }

    /// Inverse lookup: the symbol a complete code maps to
    pub fn symbol_for(&self, code: &[bool]) -> Option<u8> {
        self.by_code.get(code).copied()
    }

    /// Length in bits of the longest code
    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Number of symbols in the table
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check whether the table holds no codes
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All `(symbol, code)` entries in ascending symbol order
    ///
    /// The ascending order makes serialized artifacts byte-identical across
    /// processes regardless of hash map iteration order.
    pub fn entries(&self) -> Vec<(u8, Vec<bool>)> {
        let mut entries: Vec<(u8, Vec<bool>)> = self
            .codes
            .iter()
            .map(|(&s, c)| (s, c.clone()))
            .collect();
        entries.sort_by_key(|(symbol, _)| *symbol);
        entries
    }
}

/// Encodes a symbol stream into a packed bitstream using a code table
#[derive(Debug)]
pub struct HuffmanEncoder {
    table: CodeTable,
}

impl HuffmanEncoder {
    /// Create an encoder over an existing code table
    pub fn from_table(table: CodeTable) -> Self {
        Self { table }
    }

    /// Build the table from the pixel buffer itself and wrap an encoder
    pub fn from_pixels(pixels: &[u8]) -> Result<Self> {
        let tree = HuffmanTree::from_pixels(pixels)?;
        Ok(Self::from_table(CodeTable::from_tree(&tree)))
    }

    /// Encode a pixel buffer into packed bytes plus the exact bit count
    ///
    /// Fails with `MissingCode` if a symbol has no table entry; this implies
    /// the table was built over different data.
    pub fn encode(&self, pixels: &[u8]) -> Result<(Vec<u8>, u64)> {
        let mut writer = BitWriter::with_capacity(pixels.len());

        for &symbol in pixels {
            let code = self
                .table
                .code(symbol)
                .ok_or_else(|| PixoraError::missing_code(symbol))?;
            writer.push_bits(code);
        }

        Ok(writer.finish())
    }

    /// The code table the encoder writes with
    pub fn table(&self) -> &CodeTable {
        &self.table
    }
}

/// Decoding tree node; slots stay empty until a code claims them
#[derive(Debug)]
enum DecodeNode {
    Leaf(u8),
    Branch {
        zero: Option<Box<DecodeNode>>,
        one: Option<Box<DecodeNode>>,
    },
}

/// Decodes a packed bitstream back into the original symbol stream
///
/// The decoder works from a decoding tree rebuilt out of explicit codes; it
/// never touches the encoder's in-memory tree. For the table-matching form,
/// see [`HuffmanDecoder::decode_with_table`].
#[derive(Debug)]
pub struct HuffmanDecoder {
    root: DecodeNode,
}

impl HuffmanDecoder {
    /// Rebuild a decoding tree from a code table
    ///
    /// Fails with `CorruptStream` if any code is a prefix of another; such a
    /// table cannot come from a well-formed tree.
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        let mut root = DecodeNode::Branch {
            zero: None,
            one: None,
        };

        for (symbol, code) in table.entries() {
            if code.is_empty() {
                continue;
            }
            let mut node = &mut root;
            for &bit in &code[..code.len() - 1] {
                node = match node {
                    DecodeNode::Branch { zero, one } => {
                        let slot = if bit { one } else { zero };
                        &mut **slot.get_or_insert_with(|| {
                            Box::new(DecodeNode::Branch {
                                zero: None,
                                one: None,
                            })
                        })
                    }
                    _ => {
                        return Err(PixoraError::corrupt_stream(format!(
                            "code for symbol {} extends another symbol's code",
                            symbol
                        )));
                    }
                };
            }
            match node {
                DecodeNode::Branch { zero, one } => {
                    let slot = if code[code.len() - 1] { one } else { zero };
                    if slot.is_some() {
                        return Err(PixoraError::corrupt_stream(format!(
                            "code for symbol {} collides with an existing code",
                            symbol
                        )));
                    }
                    *slot = Some(Box::new(DecodeNode::Leaf(symbol)));
                }
                _ => {
                    return Err(PixoraError::corrupt_stream(format!(
                        "code for symbol {} extends another symbol's code",
                        symbol
                    )));
                }
            }
        }

        Ok(Self { root })
    }

    /// Build a decoder straight from an in-memory tree
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        Self::from_code_table(&CodeTable::from_tree(tree))
    }

    /// Decode exactly `bit_len` bits of `payload` into `expected` symbols
    ///
    /// Stops at the declared bit count and never reads trailing padding.
    /// Fails with `CorruptStream` when the bits run out mid-code, when a bit
    /// pattern matches no code, or when more than `expected` symbols decode
    /// cleanly. Producing fewer than `expected` symbols is left to the caller
    /// to diagnose as a shape mismatch.
    pub fn decode(&self, payload: &[u8], bit_len: u64, expected: usize) -> Result<Vec<u8>> {
        let mut reader = BitReader::new(payload, bit_len)?;
        let mut output = Vec::with_capacity(expected);
        let mut node = &self.root;

        while let Some(bit) = reader.next_bit() {
            let DecodeNode::Branch { zero, one } = node else {
                // Unreachable: leaves reset to the root immediately below
                return Err(PixoraError::corrupt_stream("decoder desynchronized"));
            };
            let next = if bit { one } else { zero };
            node = match next {
                Some(child) => &**child,
                None => {
                    return Err(PixoraError::corrupt_stream(
                        "bit pattern matches no code in the table",
                    ))
                }
            };

            if let DecodeNode::Leaf(symbol) = node {
                if output.len() == expected {
                    return Err(PixoraError::corrupt_stream(
                        "bitstream holds more symbols than the declared shape",
                    ));
                }
                output.push(*symbol);
                node = &self.root;
            }
        }

        if !std::ptr::eq(node, &self.root) {
            return Err(PixoraError::corrupt_stream(
                "bitstream ended in the middle of a code",
            ));
        }

        Ok(output)
    }

    /// Decode by accumulator matching against the explicit code table
    ///
    /// Functionally equivalent to [`HuffmanDecoder::decode`]; this is the
    /// mapping-driven form for callers that hold a `CodeTable` rather than a
    /// rebuilt tree.
    pub fn decode_with_table(
        table: &CodeTable,
        payload: &[u8],
        bit_len: u64,
        expected: usize,
    ) -> Result<Vec<u8>> {
        let mut reader = BitReader::new(payload, bit_len)?;
        let mut output = Vec::with_capacity(expected);
        let mut accumulator: Vec<bool> = Vec::with_capacity(table.max_code_len());

        while let Some(bit) = reader.next_bit() {
            accumulator.push(bit);
            if accumulator.len() > table.max_code_len() {
                return Err(PixoraError::corrupt_stream(
                    "bit pattern matches no code in the table",
                ));
            }
            if let Some(symbol) = table.symbol_for(&accumulator) {
                if output.len() == expected {
                    return Err(PixoraError::corrupt_stream(
                        "bitstream holds more symbols than the declared shape",
                    ));
                }
                output.push(symbol);
                accumulator.clear();
            }
        }

        if !accumulator.is_empty() {
            return Err(PixoraError::corrupt_stream(
                "bitstream ended in the middle of a code",
            ));
        }

        Ok(output)
    }
}
