//! Item records shared by the solver and its callers.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// An immutable item offered to the knapsack.
///
/// Weights are signed so that bad data from files or the command line is
/// representable; [`crate::knapsack::solve`] rejects negative weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item<P> {
    /// Caller-assigned identifier. Not required to be unique.
    pub id: usize,
    /// Weight consumed when the item is selected.
    pub weight: i64,
    /// Profit gained when the item is selected.
    pub price: P,
}

impl<P> Item<P> {
    /// Create a new item.
    pub fn new(id: usize, weight: i64, price: P) -> Self {
        Self { id, weight, price }
    }
}

/// Items chosen by the solver together with their optimal profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection<P> {
    /// Selected items, in input order.
    pub items: Vec<Item<P>>,
    /// Profit of the selection; equals the last cell of the DP table.
    pub max_profit: P,
}

impl<P> Selection<P>
where
    P: Copy + Add<Output = P> + Default,
{
    /// Sum of the selected weights.
    pub fn total_weight(&self) -> i64 {
        self.items.iter().map(|item| item.weight).sum()
    }

    /// Sum of the selected prices, recomputed from the items.
    pub fn total_price(&self) -> P {
        self.items
            .iter()
            .fold(P::default(), |acc, item| acc + item.price)
    }

    /// Price values of the selected items in selection order.
    pub fn prices(&self) -> Vec<P> {
        self.items.iter().map(|item| item.price).collect()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_totals() {
        let selection = Selection {
            items: vec![Item::new(0, 2, 3u32), Item::new(1, 3, 4)],
            max_profit: 7,
        };
        assert_eq!(selection.total_weight(), 5);
        assert_eq!(selection.total_price(), 7);
        assert_eq!(selection.prices(), vec![3, 4]);
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_item_json_shape() {
        let item: Item<u32> = serde_json::from_str(r#"{"id":4,"weight":10,"price":1}"#).unwrap();
        assert_eq!(item, Item::new(4, 10, 1));
    }
}
