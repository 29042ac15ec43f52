//! Huffman coding of arbitrary hashable values.
//!
//! Builds a minimum-redundancy prefix code from the frequencies of a value
//! sequence, then maps the sequence through it.
//!
//! # Tie-breaking
//!
//! Trees are extracted by ascending frequency. Equal frequencies are
//! resolved by a sequence number: leaves are numbered in first-seen order
//! and every merged tree is numbered after all trees that exist before it.
//! The first tree extracted becomes the `0` branch, the second the `1`
//! branch. Code lengths are optimal whatever the tie-break; only the exact
//! bit patterns depend on it.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;
use tracing::{debug, trace};

/// Huffman tree node. Leaves refer to symbols by first-seen index.
#[derive(Debug)]
enum Node {
    Leaf {
        symbol: usize,
        freq: usize,
    },
    Internal {
        left: Box<Node>,
        right: Box<Node>,
        freq: usize,
    },
}

impl Node {
    fn freq(&self) -> usize {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }
}

/// A tree waiting in the forest.
#[derive(Debug)]
struct Queued {
    node: Node,
    seq: usize,
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue on (freq, seq)
        other
            .node
            .freq()
            .cmp(&self.node.freq())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

/// Value to codeword mapping produced by [`build_codes`].
///
/// Entries are kept in the order their values first appeared.
#[derive(Debug, Clone)]
pub struct CodeBook<V> {
    symbols: Vec<V>,
    codes: Vec<String>,
    index: HashMap<V, usize>,
}

impl<V> CodeBook<V>
where
    V: Eq + Hash + Clone,
{
    /// Codeword for `value`, if it was in the coded sequence.
    pub fn get(&self, value: &V) -> Option<&str> {
        self.index.get(value).map(|&i| self.codes[i].as_str())
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the book has no entries.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// `(value, code)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, &str)> {
        self.symbols
            .iter()
            .zip(self.codes.iter().map(String::as_str))
    }

    /// Copy of the book as a plain map.
    pub fn to_map(&self) -> HashMap<V, String> {
        self.iter()
            .map(|(value, code)| (value.clone(), code.to_owned()))
            .collect()
    }

    /// Longest codeword length.
    pub fn max_len(&self) -> usize {
        self.codes.iter().map(String::len).max().unwrap_or(0)
    }

    /// Total encoded length, `sum(freq * len(code))`, for a frequency table.
    ///
    /// Values missing from the book contribute nothing.
    pub fn weighted_length(&self, frequencies: &[(V, usize)]) -> usize {
        frequencies
            .iter()
            .filter_map(|(value, freq)| self.get(value).map(|code| freq * code.len()))
            .sum()
    }
}

/// Count occurrences of each distinct value, in first-seen order.
pub fn frequencies<V>(values: &[V]) -> Vec<(V, usize)>
where
    V: Eq + Hash + Clone,
{
    let mut index: HashMap<&V, usize> = HashMap::new();
    let mut counts: Vec<(V, usize)> = Vec::new();
    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }
    counts
}

/// Build a Huffman code for `values` and encode them with it.
///
/// Returns the codeword of every element, in input order, and the code book.
///
/// # Errors
/// Returns `Error::InvalidInput` if `values` is empty.
pub fn build_codes<V>(values: &[V]) -> Result<(Vec<String>, CodeBook<V>)>
where
    V: Eq + Hash + Clone,
{
    if values.is_empty() {
        return Err(Error::InvalidInput(
            "cannot build a Huffman code for an empty sequence".to_string(),
        ));
    }

    let counts = frequencies(values);
    let root = build_tree(&counts);

    let mut codes = vec![String::new(); counts.len()];
    assign_codes(&root, String::new(), &mut codes);

    let symbols: Vec<V> = counts.into_iter().map(|(value, _)| value).collect();
    let index = symbols
        .iter()
        .enumerate()
        .map(|(i, value)| (value.clone(), i))
        .collect();
    let book = CodeBook {
        symbols,
        codes,
        index,
    };

    debug!(
        values = values.len(),
        distinct = book.len(),
        max_code_len = book.max_len(),
        "huffman code built"
    );

    let encoded = values
        .iter()
        .map(|value| {
            // Every value was counted, so every value has a code.
            book.index
                .get(value)
                .map(|&i| book.codes[i].clone())
                .unwrap_or_default()
        })
        .collect();

    Ok((encoded, book))
}

/// Decode a concatenated bit string back into values.
///
/// Bits are consumed greedily: the first codeword the buffered bits match is
/// emitted, which is unambiguous for a prefix-free book.
///
/// # Errors
/// Returns `Error::InvalidCode` on characters other than `0`/`1`, or if the
/// bits do not split into whole codewords.
pub fn decode<V>(bits: &str, book: &CodeBook<V>) -> Result<Vec<V>>
where
    V: Eq + Hash + Clone,
{
    let lookup: HashMap<&str, usize> = book
        .codes
        .iter()
        .enumerate()
        .map(|(i, code)| (code.as_str(), i))
        .collect();
    let max_len = book.max_len();

    let mut out = Vec::new();
    let mut start = 0;
    for (pos, bit) in bits.char_indices() {
        if bit != '0' && bit != '1' {
            return Err(Error::InvalidCode(format!(
                "unexpected character {bit:?} at offset {pos}"
            )));
        }
        let word = &bits[start..=pos];
        if let Some(&i) = lookup.get(word) {
            out.push(book.symbols[i].clone());
            start = pos + 1;
        } else if word.len() >= max_len {
            return Err(Error::InvalidCode(format!(
                "no codeword matches bits at offset {start}"
            )));
        }
    }

    if start != bits.len() {
        return Err(Error::InvalidCode(format!(
            "{} trailing bits do not form a codeword",
            bits.len() - start
        )));
    }
    Ok(out)
}

/// Merge the forest down to a single tree. `counts` must be non-empty.
fn build_tree<V>(counts: &[(V, usize)]) -> Node {
    let mut pq: BinaryHeap<Queued> = counts
        .iter()
        .enumerate()
        .map(|(symbol, (_, freq))| Queued {
            node: Node::Leaf {
                symbol,
                freq: *freq,
            },
            seq: symbol,
        })
        .collect();
    let mut next_seq = counts.len();

    loop {
        let (lo, hi) = match (pq.pop(), pq.pop()) {
            (Some(lo), Some(hi)) => (lo, hi),
            (Some(root), None) => return root.node,
            // Unreachable for non-empty counts; a zero-weight leaf keeps this total.
            _ => return Node::Leaf { symbol: 0, freq: 0 },
        };
        let freq = lo.node.freq() + hi.node.freq();
        trace!(lo = lo.node.freq(), hi = hi.node.freq(), "merge");
        pq.push(Queued {
            node: Node::Internal {
                left: Box::new(lo.node),
                right: Box::new(hi.node),
                freq,
            },
            seq: next_seq,
        });
        next_seq += 1;
    }
}

fn assign_codes(node: &Node, prefix: String, codes: &mut [String]) {
    match node {
        Node::Leaf { symbol, .. } => {
            // A lone leaf still needs a usable codeword.
            codes[*symbol] = if prefix.is_empty() {
                "0".to_string()
            } else {
                prefix
            };
        }
        Node::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push('0');
            assign_codes(left, left_prefix, codes);

            let mut right_prefix = prefix;
            right_prefix.push('1');
            assign_codes(right, right_prefix, codes);
        }
    }
}
