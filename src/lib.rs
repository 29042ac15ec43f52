//! # shelfcode
//!
//! *Pick the most profitable items for a shelf, then compress their prices.*
//!
//! ## Intuition First
//!
//! A shelf holds a fixed total weight. Each gadget has a weight and a price,
//! and each can go on the shelf at most once. The 0/1 knapsack picks the set
//! with the highest total price that still fits. The prices of that set are
//! then Huffman coded: prices that repeat get short bit strings, rare ones
//! get longer strings, and no string is a prefix of another.
//!
//! ## The Problem
//!
//! Greedy selection by price-per-weight is fast but not optimal for the
//! 0/1 variant. Dynamic programming over (item prefix, weight budget) is
//! exact, and its table also tells us *which* items to take.
//!
//! ```text
//! table[0][j] = table[i][0] = 0
//! table[i][j] = table[i-1][j]                                   if w_i > j
//!             = max(table[i-1][j], p_i + table[i-1][j - w_i])  otherwise
//! ```
//!
//! Huffman's greedy merge of the two rarest subtrees yields a prefix code
//! minimising `sum(freq * len(code))`.
//!
//! ## Complexity Analysis
//!
//! - **Knapsack**: $O(nW)$ time and space for the table, $O(n)$ traceback.
//! - **Huffman**: $O(n)$ counting plus $O(m \log m)$ heap work for $m$
//!   distinct values.
//!
//! ## Failure Modes
//!
//! 1. **Large capacity**: the table is dense, so memory grows with `W`.
//! 2. **Zero-weight items**: column 0 is pinned to zero, so an item of
//!    weight 0 only contributes when the budget is at least 1.
//!
//! ## Example
//!
//! ```
//! use shelfcode::{build_codes, solve, Item};
//!
//! let items = vec![Item::new(0, 2, 3u32), Item::new(1, 3, 4), Item::new(2, 4, 5)];
//! let selection = solve(&items, 5).unwrap();
//! assert_eq!(selection.max_profit, 7);
//!
//! let (encoded, book) = build_codes(&selection.prices()).unwrap();
//! assert_eq!(encoded.len(), 2);
//! assert_eq!(book.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod huffman;
pub mod item;
pub mod knapsack;

pub use error::{Error, Result};
pub use huffman::{build_codes, decode, frequencies, CodeBook};
pub use item::{Item, Selection};
pub use knapsack::{solve, trace_back, DpTable};
