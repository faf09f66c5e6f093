mod category;
mod entry;
mod ledger;
mod month;
mod owner;
mod seed;

pub use category::{Category, CategoryId};
pub use entry::{Entry, EntryField, EntryId};
pub use ledger::MonthLedger;
pub use month::MonthKey;
pub use owner::Owner;
pub use seed::{palette_color, seed_ledger};
#[cfg(test)]
pub use seed::PALETTE;

#[cfg(test)]
mod tests;
