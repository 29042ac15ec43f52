#![no_main]
use libfuzzer_sys::fuzz_target;
use shelfcode::{solve, Item};

fuzz_target!(|data: (Vec<(u8, u16)>, u8)| {
    let (pairs, capacity) = data;
    if pairs.len() > 64 {
        return;
    }

    let items: Vec<Item<u64>> = pairs
        .iter()
        .enumerate()
        .map(|(id, &(w, p))| Item::new(id, w as i64, p as u64))
        .collect();
    let capacity = capacity as i64;

    let selection = solve(&items, capacity).unwrap();
    assert!(selection.total_weight() <= capacity);
    assert_eq!(selection.total_price(), selection.max_profit);
    assert!(selection.items.windows(2).all(|w| w[0].id < w[1].id));
});
