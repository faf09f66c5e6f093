use rust_decimal::Decimal;

use super::{Category, CategoryId, Entry, EntryId, MonthLedger, Owner};

/// Colors handed to new categories, cycled by the month's category count.
pub const PALETTE: [&str; 8] = [
    "#67e8f9", "#f59e0b", "#34d399", "#a78bfa", "#f87171", "#fb923c", "#38bdf8", "#e879f9",
];

const SEED_CATEGORIES: [(&str, &str, &str); 4] = [
    ("internet", "Internet", "#67e8f9"),
    ("energia", "Energisa", "#f59e0b"),
    ("aguas", "Águas", "#34d399"),
    ("aluguel", "Aluguel", "#a78bfa"),
];

// (category, description, owner, value in cents)
const SEED_ENTRIES: [(&str, &str, Owner, i64); 8] = [
    ("internet", "Fibra", Owner::Lion, 15663),
    ("energia", "Unidade Lion", Owner::Lion, 95596),
    ("energia", "Unidade Primo", Owner::Primo, 54016),
    ("aguas", "Fatura 1", Owner::Lion, 22420),
    ("aguas", "Fatura 2", Owner::Lion, 22420),
    ("aguas", "Fatura 3", Owner::Primo, 23239),
    ("aluguel", "Imóvel 1", Owner::Lion, 161213),
    ("aluguel", "Imóvel 2", Owner::Primo, 161213),
];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// The bootstrap template used when a month is started fresh.
///
/// Entry ids here are template ids (1..=8); the store re-mints them when the
/// template is installed into a month.
pub fn seed_ledger() -> MonthLedger {
    let categories = SEED_CATEGORIES
        .iter()
        .map(|(id, label, color)| {
            Category::new(CategoryId::new(*id), (*label).to_string(), (*color).to_string())
        })
        .collect();

    let entries = SEED_ENTRIES
        .iter()
        .zip(1u64..)
        .map(|((cat, desc, owner, cents), id)| {
            Entry::new(
                EntryId::new(id),
                CategoryId::new(*cat),
                (*desc).to_string(),
                *owner,
                Decimal::new(*cents, 2),
            )
        })
        .collect();

    MonthLedger::new(categories, entries)
}
