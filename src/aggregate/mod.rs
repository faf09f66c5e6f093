//! Derived figures: per-month totals, category shares, and month-over-month
//! history. Nothing here is stored; everything is recomputed from ledger
//! snapshots.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::models::{Category, CategoryId, MonthKey, MonthLedger, Owner};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    pub(crate) owner_totals: BTreeMap<Owner, Decimal>,
    pub(crate) grand_total: Decimal,
    pub(crate) by_category: HashMap<CategoryId, Decimal>,
}

impl Totals {
    pub(crate) fn owner(&self, owner: Owner) -> Decimal {
        self.owner_totals.get(&owner).copied().unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn category(&self, id: &CategoryId) -> Decimal {
        self.by_category.get(id).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Sum a month's entries by owner and by category in one pass.
/// A missing ledger yields zero totals and empty maps. Sums saturate at
/// `Decimal::MAX` instead of overflowing.
pub(crate) fn compute_totals(ledger: Option<&MonthLedger>) -> Totals {
    let mut totals = Totals::default();
    let Some(ledger) = ledger else {
        return totals;
    };

    for entry in ledger.entries() {
        let owner = totals.owner_totals.entry(entry.owner).or_default();
        *owner = owner.saturating_add(entry.value);
        let category = totals.by_category.entry(entry.cat_id.clone()).or_default();
        *category = category.saturating_add(entry.value);
    }
    totals.grand_total = totals
        .owner_totals
        .values()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v));
    totals
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct History {
    pub(crate) months: Vec<MonthKey>,
    pub(crate) per_owner: BTreeMap<Owner, Vec<Decimal>>,
    pub(crate) grand: Vec<Decimal>,
}

impl History {
    pub(crate) fn len(&self) -> usize {
        self.months.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub(crate) fn series(&self, owner: Owner) -> &[Decimal] {
        self.per_owner.get(&owner).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Build one total per initialized month, oldest first, for every owner and
/// for the grand total. Months without entries for an owner contribute zero.
pub(crate) fn compute_history<'a>(
    ledgers: impl IntoIterator<Item = (MonthKey, &'a MonthLedger)>,
) -> History {
    let mut ledgers: Vec<(MonthKey, &MonthLedger)> = ledgers.into_iter().collect();
    ledgers.sort_by_key(|(key, _)| *key);

    let mut history = History {
        months: Vec::with_capacity(ledgers.len()),
        per_owner: Owner::all()
            .iter()
            .map(|o| (*o, Vec::with_capacity(ledgers.len())))
            .collect(),
        grand: Vec::with_capacity(ledgers.len()),
    };

    for (key, ledger) in ledgers {
        let totals = compute_totals(Some(ledger));
        history.months.push(key);
        for (owner, series) in history.per_owner.iter_mut() {
            series.push(totals.owner(*owner));
        }
        history.grand.push(totals.grand_total);
    }
    history
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub(crate) fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Flat => "=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Delta {
    pub(crate) percent: Decimal,
    pub(crate) trend: Trend,
}

/// Relative change from `prev` to `cur` in percent. Suppressed when there is
/// no previous total or it is zero.
pub(crate) fn percent_delta(prev: Option<Decimal>, cur: Decimal) -> Option<Delta> {
    let prev = prev.filter(|p| !p.is_zero())?;
    let diff = cur.checked_sub(prev)?;
    let percent = diff.checked_div(prev)?.checked_mul(Decimal::ONE_HUNDRED)?;
    let trend = if diff > Decimal::ZERO {
        Trend::Up
    } else if diff < Decimal::ZERO {
        Trend::Down
    } else {
        Trend::Flat
    };
    Some(Delta { percent, trend })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryShare {
    pub(crate) category: Category,
    pub(crate) subtotal: Decimal,
    pub(crate) entry_count: usize,
    /// Share of the month's grand total, 0-100.
    pub(crate) percent: Decimal,
}

/// Per-category subtotal and share of the grand total, in ledger order.
pub(crate) fn category_breakdown(ledger: &MonthLedger, totals: &Totals) -> Vec<CategoryShare> {
    ledger
        .categories()
        .iter()
        .map(|cat| {
            let subtotal = totals.category(&cat.id);
            let percent = if totals.grand_total.is_zero() {
                Decimal::ZERO
            } else {
                subtotal
                    .checked_div(totals.grand_total)
                    .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
                    .unwrap_or(Decimal::ZERO)
            };
            CategoryShare {
                category: cat.clone(),
                subtotal,
                entry_count: ledger.entry_count_in(&cat.id),
                percent,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthSummary {
    pub(crate) month: MonthKey,
    pub(crate) owner_totals: BTreeMap<Owner, Decimal>,
    pub(crate) grand_total: Decimal,
    /// Change against the previous initialized month, which need not be the
    /// previous calendar month.
    pub(crate) delta: Option<Delta>,
}

impl MonthSummary {
    pub(crate) fn owner(&self, owner: Owner) -> Decimal {
        self.owner_totals.get(&owner).copied().unwrap_or(Decimal::ZERO)
    }
}

/// One row per initialized month, oldest first.
pub(crate) fn history_rows(history: &History) -> Vec<MonthSummary> {
    history
        .months
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let owner_totals = Owner::all()
                .iter()
                .map(|owner| (*owner, history.series(*owner).get(i).copied().unwrap_or_default()))
                .collect();
            let prev = i.checked_sub(1).map(|p| history.grand[p]);
            MonthSummary {
                month: *month,
                owner_totals,
                grand_total: history.grand[i],
                delta: percent_delta(prev, history.grand[i]),
            }
        })
        .collect()
}
