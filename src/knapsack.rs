//! 0/1 knapsack by dynamic programming.
//!
//! The table has one row per item prefix and one column per weight budget:
//! `table[i][j]` is the best profit reachable with the first `i` items and
//! total weight at most `j`. Row 0 and column 0 are all zero.
//!
//! # Tie-breaking
//!
//! When including item `i` gives exactly the same profit as leaving it out,
//! the item is left out. Traceback only records an item when its row
//! differs from the row above, so among several optimal subsets the one
//! returned is fixed by this rule.

use crate::error::{Error, Result};
use crate::item::{Item, Selection};
use std::ops::Add;
use tracing::{debug, trace};

/// Dense `(n + 1) x (capacity + 1)` profit table, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DpTable<P> {
    cells: Vec<P>,
    cols: usize,
}

impl<P> DpTable<P>
where
    P: Copy + PartialOrd + Add<Output = P> + Default,
{
    /// Fill the table for `items` under `capacity`.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if `capacity` or any weight is negative,
    /// or if the table would not fit in addressable memory.
    pub fn build(items: &[Item<P>], capacity: i64) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        let weights = check_weights(items)?;

        let rows = items.len() + 1;
        let cols = capacity + 1;
        let len = rows.checked_mul(cols).ok_or_else(|| {
            Error::InvalidInput(format!("table of {rows} x {cols} cells is too large"))
        })?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|e| {
            Error::InvalidInput(format!("table of {rows} x {cols} cells: {e}"))
        })?;
        cells.resize(len, P::default());
        let mut table = Self { cells, cols };

        for (i, (item, &weight)) in items.iter().zip(&weights).enumerate() {
            let i = i + 1;
            for j in 1..cols {
                let exclude = table.get(i - 1, j);
                let best = if weight > j {
                    exclude
                } else {
                    let include = item.price + table.get(i - 1, j - weight);
                    // Strict: equal profit keeps the item out.
                    if include > exclude {
                        include
                    } else {
                        exclude
                    }
                };
                table.set(i, j, best);
            }
        }

        Ok(table)
    }

    /// Profit at row `i` (item prefix length) and column `j` (budget).
    ///
    /// # Panics
    /// Panics if `i >= rows()` or `j >= cols()`.
    pub fn get(&self, i: usize, j: usize) -> P {
        self.cells[i * self.cols + j]
    }

    fn set(&mut self, i: usize, j: usize, value: P) {
        self.cells[i * self.cols + j] = value;
    }

    /// Number of rows, i.e. item count plus one.
    pub fn rows(&self) -> usize {
        self.cells.len() / self.cols
    }

    /// Number of columns, i.e. capacity plus one.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Optimal profit for all items at full capacity.
    pub fn max_profit(&self) -> P {
        self.get(self.rows() - 1, self.cols - 1)
    }
}

/// Recover the selected items from a filled table.
///
/// Walks from the bottom-right cell upwards. A row that differs from the
/// one above means its item was used, and the budget drops by its weight.
/// The result is in input order.
///
/// # Errors
/// Returns `Error::InvalidInput` if `table` was not built for `items`.
pub fn trace_back<P>(table: &DpTable<P>, items: &[Item<P>]) -> Result<Vec<Item<P>>>
where
    P: Copy + PartialOrd + Add<Output = P> + Default,
{
    if table.rows() != items.len() + 1 {
        return Err(Error::InvalidInput(format!(
            "table has {} rows but there are {} items",
            table.rows(),
            items.len()
        )));
    }
    let weights = check_weights(items)?;

    let mut selected = Vec::new();
    let mut i = items.len();
    let mut j = table.cols() - 1;

    while i > 0 && j > 0 {
        if table.get(i, j) != table.get(i - 1, j) {
            trace!(row = i, budget = j, id = items[i - 1].id, "item taken");
            selected.push(items[i - 1]);
            // A changed row means the include branch won, so weight <= j.
            j -= weights[i - 1];
        }
        i -= 1;
    }

    selected.reverse();
    Ok(selected)
}

/// Select the most profitable subset of `items` whose weight fits `capacity`.
///
/// # Errors
/// Returns `Error::InvalidInput` if `capacity` or any weight is negative, or
/// if the table for a non-empty item list cannot be allocated.
pub fn solve<P>(items: &[Item<P>], capacity: i64) -> Result<Selection<P>>
where
    P: Copy + PartialOrd + Add<Output = P> + Default,
{
    if items.is_empty() {
        check_capacity(capacity)?;
        return Ok(Selection {
            items: Vec::new(),
            max_profit: P::default(),
        });
    }

    let table = DpTable::build(items, capacity)?;
    let max_profit = table.max_profit();
    let selected = trace_back(&table, items)?;

    debug!(
        items = items.len(),
        capacity,
        selected = selected.len(),
        "knapsack solved"
    );

    Ok(Selection {
        items: selected,
        max_profit,
    })
}

fn check_capacity(capacity: i64) -> Result<usize> {
    if capacity < 0 {
        return Err(Error::InvalidInput(format!(
            "capacity must be non-negative, got {capacity}"
        )));
    }
    usize::try_from(capacity).map_err(|_| {
        Error::InvalidInput(format!("capacity {capacity} is not addressable"))
    })
}

fn check_weights<P>(items: &[Item<P>]) -> Result<Vec<usize>> {
    items
        .iter()
        .map(|item| {
            if item.weight < 0 {
                return Err(Error::InvalidInput(format!(
                    "item {} has negative weight {}",
                    item.id, item.weight
                )));
            }
            // Too heavy for any addressable table, so never selectable.
            Ok(usize::try_from(item.weight).unwrap_or(usize::MAX))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn items(pairs: &[(i64, u32)]) -> Vec<Item<u32>> {
        pairs
            .iter()
            .enumerate()
            .map(|(id, &(w, p))| Item::new(id, w, p))
            .collect()
    }

    #[test]
    fn test_reference_instance() {
        let items = items(&[(2, 3), (3, 4), (4, 5), (5, 6)]);
        let selection = solve(&items, 5).unwrap();
        assert_eq!(selection.max_profit, 7);
        assert_eq!(selection.items, vec![items[0], items[1]]);
    }

    #[test]
    fn test_gadget_shelf() {
        let items = items(&[
            (5, 20),
            (3, 14),
            (8, 35),
            (2, 10),
            (10, 1),
            (20, 2),
            (30, 3),
            (40, 4),
            (50, 5),
            (60, 6),
            (3, 5),
            (2, 3),
            (1, 2),
            (5, 9),
            (4, 7),
            (6, 12),
        ]);
        let selection = solve(&items, 10).unwrap();
        assert_eq!(selection.max_profit, 45);
        let ids: Vec<usize> = selection.items.iter().map(|item| item.id).collect();
        // {2, 3} is the only subset reaching 45.
        assert_eq!(ids, vec![2, 3]);
        assert!(selection.total_weight() <= 10);
        assert_eq!(selection.total_price(), 45);
    }

    #[test]
    fn test_empty_items() {
        let selection = solve::<u32>(&[], 10).unwrap();
        assert!(selection.is_empty());
        assert_eq!(selection.max_profit, 0);
    }

    #[test]
    fn test_zero_capacity() {
        let items = items(&[(1, 10), (2, 20)]);
        let selection = solve(&items, 0).unwrap();
        assert!(selection.is_empty());
        assert_eq!(selection.max_profit, 0);
    }

    #[test]
    fn test_too_heavy_item_is_never_selected() {
        let items = items(&[(11, 1000), (4, 1)]);
        let selection = solve(&items, 10).unwrap();
        assert_eq!(selection.items, vec![items[1]]);
        assert_eq!(selection.max_profit, 1);
    }

    #[test]
    fn test_tie_prefers_exclusion() {
        // Either item alone is optimal; the later one is dropped in favour
        // of the earlier.
        let items = items(&[(3, 5), (3, 5)]);
        let selection = solve(&items, 3).unwrap();
        assert_eq!(selection.items, vec![items[0]]);

        // {0} and {1, 2} both give 6; item 2 ties at the last row and is
        // left out, which forces {0}.
        let items = self::items(&[(4, 6), (2, 3), (2, 3)]);
        let selection = solve(&items, 4).unwrap();
        assert_eq!(selection.max_profit, 6);
        assert_eq!(selection.items, vec![items[0]]);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let bad = vec![Item::new(7, -1, 3u32)];
        assert!(matches!(solve(&bad, 5), Err(Error::InvalidInput(_))));
        let good = items(&[(1, 1)]);
        assert!(matches!(solve(&good, -1), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_unaddressable_capacity_rejected() {
        let selection = solve::<u32>(&[], i64::MAX).unwrap();
        assert!(selection.is_empty());
        assert_eq!(selection.max_profit, 0);

        let items = items(&[(1, 1)]);
        assert!(matches!(solve(&items, i64::MAX), Err(Error::InvalidInput(_))));
        assert!(matches!(
            DpTable::build(&items, i64::MAX),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_weight_item_misses_pinned_column() {
        // Column 0 stays zero, so the weight-0 item cannot stack under the
        // weight-1 item at budget 1: 5, not the subset optimum of 8.
        let items = items(&[(0, 3), (1, 5)]);
        let selection = solve(&items, 1).unwrap();
        assert_eq!(selection.max_profit, 5);
        assert_eq!(selection.items, vec![items[1]]);
    }

    #[test]
    fn test_trace_back_rejects_foreign_table() {
        let a = items(&[(1, 1), (2, 2)]);
        let table = DpTable::build(&a, 3).unwrap();
        assert!(trace_back(&table, &a[..1]).is_err());
    }

    #[test]
    fn test_float_prices() {
        let items = vec![
            Item::new(0, 1, 1.5f64),
            Item::new(1, 2, 2.25),
            Item::new(2, 3, 3.0),
        ];
        let selection = solve(&items, 3).unwrap();
        assert_eq!(selection.max_profit, 3.75);
        assert_eq!(selection.items, vec![items[0], items[1]]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_table_is_monotone(
            pairs in prop::collection::vec((0i64..15, 0u32..50), 0..10),
            capacity in 0i64..30,
        ) {
            let items = items(&pairs);
            let table = DpTable::build(&items, capacity).unwrap();
            prop_assert_eq!(table.rows(), items.len() + 1);
            prop_assert_eq!(table.cols(), capacity as usize + 1);
            for i in 0..table.rows() {
                prop_assert_eq!(table.get(i, 0), 0);
                for j in 0..table.cols() {
                    if i == 0 {
                        prop_assert_eq!(table.get(0, j), 0);
                    } else {
                        prop_assert!(table.get(i, j) >= table.get(i - 1, j));
                    }
                    if j > 0 {
                        prop_assert!(table.get(i, j) >= table.get(i, j - 1));
                    }
                }
            }
        }
    }
}
