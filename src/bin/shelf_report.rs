use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use shelfcode::{build_codes, solve, Item};
use std::{fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fill a shelf with the most profitable gadgets and Huffman code their prices.
#[derive(Parser, Debug)]
#[command(name = "shelf_report", version)]
struct Args {
    /// Shelf weight capacity
    #[arg(long, default_value_t = 10)]
    capacity: i64,

    /// JSON file with an array of {"id", "weight", "price"} items
    #[arg(long)]
    items: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    selected: Vec<Item<u64>>,
    max_profit: u64,
    compressed_prices: Vec<(u64, String)>,
    code_book: Vec<(u64, String)>,
}

const GADGETS: [(i64, u64); 16] = [
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
];

fn load_items(path: Option<&PathBuf>) -> Result<Vec<Item<u64>>> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(GADGETS
            .iter()
            .enumerate()
            .map(|(id, &(weight, price))| Item::new(id, weight, price))
            .collect()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let items = load_items(args.items.as_ref())?;
    info!(items = items.len(), capacity = args.capacity, "solving");

    let selection = solve(&items, args.capacity)?;
    let prices = selection.prices();

    let (compressed_prices, code_book) = if prices.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        let (encoded, book) = build_codes(&prices)?;
        let compressed = prices.iter().copied().zip(encoded).collect();
        let entries = book
            .iter()
            .map(|(price, code)| (*price, code.to_string()))
            .collect();
        (compressed, entries)
    };

    let report = Report {
        selected: selection.items,
        max_profit: selection.max_profit,
        compressed_prices,
        code_book,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Selected Items:");
    for item in &report.selected {
        println!("  #{:<3} weight {:>3}  price {:>4}", item.id, item.weight, item.price);
    }
    println!("Max Profit: {}", report.max_profit);
    println!("Compressed Prices:");
    for (price, code) in &report.compressed_prices {
        println!("  {price}: {code}");
    }
    println!("Huffman Code Book:");
    for (price, code) in &report.code_book {
        println!("  {price} -> {code}");
    }
    Ok(())
}
