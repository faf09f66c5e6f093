mod activity;
mod error;

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::aggregate::{self, History, MonthSummary, Totals};
use crate::amount::parse_amount;
use crate::models::*;

pub(crate) use activity::{ActivityLog, EntityRef, StoreEvent, DEFAULT_LOG_CAPACITY};
pub(crate) use error::{LedgerError, Missing};

pub(crate) type StoreResult<T> = Result<T, LedgerError>;

const NEW_ENTRY_DESC: &str = "New entry";
const FIRST_ENTRY_DESC: &str = "Entry 1";

/// Ids minted by the store start above the seed template's own ids.
const FIRST_MINTED_ID: u64 = 200;

/// Where a new month's categories and entries come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MonthSource {
    Seed,
    CopyFrom(MonthKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InitOutcome {
    Copied { from: MonthKey },
    StartedFresh,
}

/// Owner of every month ledger for the session.
///
/// Reads hand out `Arc` snapshots. Every mutation works on a private copy of
/// the affected month and swaps it in only on success, so a snapshot never
/// changes under its holder and a rejected call leaves no trace.
#[derive(Debug)]
pub(crate) struct LedgerStore {
    months: BTreeMap<MonthKey, Arc<MonthLedger>>,
    last_id: u64,
    activity: ActivityLog,
    events: Vec<StoreEvent>,
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl LedgerStore {
    pub(crate) fn new(log_capacity: usize) -> Self {
        Self {
            months: BTreeMap::new(),
            last_id: FIRST_MINTED_ID,
            activity: ActivityLog::new(log_capacity),
            events: Vec::new(),
        }
    }

    // ── Reads ─────────────────────────────────────────────────

    pub(crate) fn ledger(&self, key: MonthKey) -> Option<Arc<MonthLedger>> {
        self.months.get(&key).cloned()
    }

    pub(crate) fn contains(&self, key: MonthKey) -> bool {
        self.months.contains_key(&key)
    }

    /// Initialized months, oldest first.
    pub(crate) fn months(&self) -> Vec<MonthKey> {
        self.months.keys().copied().collect()
    }

    pub(crate) fn ledgers(&self) -> impl Iterator<Item = (MonthKey, &MonthLedger)> {
        self.months.iter().map(|(k, l)| (*k, l.as_ref()))
    }

    pub(crate) fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub(crate) fn totals(&self, key: MonthKey) -> Totals {
        aggregate::compute_totals(self.months.get(&key).map(|l| l.as_ref()))
    }

    /// Totals of the calendar month before `key`, if it was initialized.
    pub(crate) fn previous_totals(&self, key: MonthKey) -> Option<Totals> {
        let prev = self.months.get(&key.previous())?;
        Some(aggregate::compute_totals(Some(prev.as_ref())))
    }

    pub(crate) fn history(&self) -> History {
        aggregate::compute_history(self.ledgers())
    }

    pub(crate) fn history_rows(&self) -> Vec<MonthSummary> {
        aggregate::history_rows(&self.history())
    }

    /// Drain pending notifications.
    pub(crate) fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    /// Record a message that is not tied to a mutation (e.g. session start).
    pub(crate) fn note(&mut self, message: impl Into<String>) {
        self.record(message);
    }

    // ── Month lifecycle ───────────────────────────────────────

    pub(crate) fn init_month(&mut self, key: MonthKey, source: MonthSource) -> StoreResult<InitOutcome> {
        if self.months.contains_key(&key) {
            log::debug!("init_month({key}) ignored: already initialized");
            return Err(LedgerError::AlreadyExists { month: key });
        }

        let copy_source = match source {
            MonthSource::CopyFrom(from) => self.months.get(&from).map(|l| (from, Arc::clone(l))),
            MonthSource::Seed => None,
        };
        let (template, outcome) = match copy_source {
            Some((from, ledger)) => (ledger, InitOutcome::Copied { from }),
            None => (Arc::new(seed_ledger()), InitOutcome::StartedFresh),
        };

        let ledger = template.with_fresh_ids(|| self.mint_entry_id());
        self.months.insert(key, Arc::new(ledger));

        let message = match outcome {
            InitOutcome::Copied { from } => format!("{} copied from {}", key.label(), from.label()),
            InitOutcome::StartedFresh => format!("{} started fresh", key.label()),
        };
        log::info!("{message}");
        self.record(message);
        self.highlight(EntityRef::Month(key));
        Ok(outcome)
    }

    pub(crate) fn delete_month(&mut self, key: MonthKey) -> StoreResult<()> {
        if self.months.remove(&key).is_none() {
            return Err(LedgerError::NotFound(Missing::Month(key)));
        }
        log::info!("deleted month {key}");
        self.record(format!("✕ {} deleted", key.label()));
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    /// Add a category with one empty entry so it is never empty.
    pub(crate) fn add_category(&mut self, key: MonthKey, label: &str) -> StoreResult<CategoryId> {
        let name = label.trim();
        if name.is_empty() {
            return Err(LedgerError::invalid("Category name cannot be empty"));
        }
        let count = self.require(key)?.categories().len();

        let cat_id = CategoryId::new(format!("cat_{}", self.mint()));
        let entry_id = self.mint_entry_id();
        let category = Category::new(cat_id.clone(), name.to_string(), palette_color(count).to_string());
        let entry = Entry::new(
            entry_id,
            cat_id.clone(),
            FIRST_ENTRY_DESC.to_string(),
            Owner::Lion,
            Decimal::ZERO,
        );

        self.modify(key, |ledger| {
            ledger.push_category(category);
            ledger.push_entry(entry);
            Ok(())
        })?;

        log::debug!("{key}: added category {cat_id} ({name})");
        self.record(format!("+ Category \"{name}\""));
        self.highlight(EntityRef::Category(cat_id.clone()));
        self.highlight(EntityRef::Entry(entry_id));
        Ok(cat_id)
    }

    /// Remove a category and all of its entries. The last category of a
    /// month is protected.
    pub(crate) fn remove_category(&mut self, key: MonthKey, cat_id: &CategoryId) -> StoreResult<()> {
        let label = self.modify(key, |ledger| {
            let label = ledger
                .category(cat_id)
                .map(|c| c.label.clone())
                .ok_or_else(|| LedgerError::NotFound(Missing::Category(cat_id.clone())))?;
            if ledger.categories().len() <= 1 {
                return Err(LedgerError::LastItemProtected {
                    item: "category of the month".into(),
                });
            }
            ledger.remove_category(cat_id);
            Ok(label)
        })?;

        log::debug!("{key}: removed category {cat_id}");
        self.record(format!("✕ Category \"{label}\" removed"));
        Ok(())
    }

    /// Relabel a category. An empty label is accepted here; the UI decides
    /// whether to allow committing one.
    pub(crate) fn rename_category(&mut self, key: MonthKey, cat_id: &CategoryId, label: &str) -> StoreResult<()> {
        self.modify(key, |ledger| {
            let category = ledger
                .category_mut(cat_id)
                .ok_or_else(|| LedgerError::NotFound(Missing::Category(cat_id.clone())))?;
            category.label = label.to_string();
            Ok(())
        })?;

        self.record(format!("✎ Category → {label}"));
        self.highlight(EntityRef::Category(cat_id.clone()));
        Ok(())
    }

    // ── Entries ───────────────────────────────────────────────

    pub(crate) fn add_entry(&mut self, key: MonthKey, cat_id: &CategoryId) -> StoreResult<EntryId> {
        let label = self
            .require(key)?
            .category(cat_id)
            .map(|c| c.label.clone())
            .ok_or_else(|| LedgerError::NotFound(Missing::Category(cat_id.clone())))?;

        let id = self.mint_entry_id();
        let entry = Entry::new(id, cat_id.clone(), NEW_ENTRY_DESC.to_string(), Owner::Lion, Decimal::ZERO);
        self.modify(key, |ledger| {
            ledger.push_entry(entry);
            Ok(())
        })?;

        log::debug!("{key}: added entry {id} to {cat_id}");
        self.record(format!("+ {label} · new entry"));
        self.highlight(EntityRef::Entry(id));
        Ok(id)
    }

    /// Remove an entry unless it is the last one of its category.
    pub(crate) fn remove_entry(&mut self, key: MonthKey, entry_id: EntryId) -> StoreResult<()> {
        let desc = self.modify(key, |ledger| {
            let (cat_id, desc) = ledger
                .entry(entry_id)
                .map(|e| (e.cat_id.clone(), e.desc.clone()))
                .ok_or(LedgerError::NotFound(Missing::Entry(entry_id)))?;
            if ledger.entry_count_in(&cat_id) <= 1 {
                let label = ledger.category(&cat_id).map_or(cat_id.to_string(), |c| c.label.clone());
                return Err(LedgerError::LastItemProtected {
                    item: format!("entry of \"{label}\""),
                });
            }
            ledger.remove_entry(entry_id);
            Ok(desc)
        })?;

        log::debug!("{key}: removed entry {entry_id}");
        self.record(format!("✕ \"{desc}\" removed"));
        Ok(())
    }

    /// Set one field of an entry from raw user text. Values go through
    /// `parse_amount`; owners must be one of the known two.
    pub(crate) fn update_entry_field(
        &mut self,
        key: MonthKey,
        entry_id: EntryId,
        field: EntryField,
        raw: &str,
    ) -> StoreResult<()> {
        let owner = match field {
            EntryField::Owner => Some(
                Owner::parse(raw)
                    .ok_or_else(|| LedgerError::invalid(format!("Unknown owner '{raw}'. Use lion or primo")))?,
            ),
            _ => None,
        };

        self.modify(key, |ledger| {
            let entry = ledger
                .entry_mut(entry_id)
                .ok_or(LedgerError::NotFound(Missing::Entry(entry_id)))?;
            match (field, owner) {
                (EntryField::Owner, Some(owner)) => entry.owner = owner,
                (EntryField::Value, _) => entry.value = parse_amount(raw),
                _ => entry.desc = raw.to_string(),
            }
            Ok(())
        })?;

        log::debug!("{key}: entry {entry_id} {field} = {raw:?}");
        self.record(format!("✎ [{field}] → {raw}"));
        self.highlight(EntityRef::Entry(entry_id));
        Ok(())
    }

    /// Flip an entry between the two owners.
    pub(crate) fn toggle_owner(&mut self, key: MonthKey, entry_id: EntryId) -> StoreResult<Owner> {
        let owner = self.modify(key, |ledger| {
            let entry = ledger
                .entry_mut(entry_id)
                .ok_or(LedgerError::NotFound(Missing::Entry(entry_id)))?;
            entry.owner = entry.owner.toggle();
            Ok(entry.owner)
        })?;

        self.record(format!("✎ [owner] → {owner}"));
        self.highlight(EntityRef::Entry(entry_id));
        Ok(owner)
    }

    // ── Internals ─────────────────────────────────────────────

    fn require(&self, key: MonthKey) -> StoreResult<&MonthLedger> {
        self.months
            .get(&key)
            .map(|l| l.as_ref())
            .ok_or(LedgerError::NotFound(Missing::Month(key)))
    }

    /// Copy-on-write update of one month: `f` edits a private copy that
    /// replaces the stored ledger only if `f` succeeds.
    fn modify<T>(
        &mut self,
        key: MonthKey,
        f: impl FnOnce(&mut MonthLedger) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut draft = self.require(key)?.clone();
        match f(&mut draft) {
            Ok(out) => {
                self.months.insert(key, Arc::new(draft));
                Ok(out)
            }
            Err(e) => {
                log::debug!("{key}: rejected: {e}");
                Err(e)
            }
        }
    }

    fn mint(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn mint_entry_id(&mut self) -> EntryId {
        EntryId::new(self.mint())
    }

    fn record(&mut self, message: impl Into<String>) {
        let entry = self.activity.push(message);
        self.events.push(StoreEvent::Logged(entry));
    }

    fn highlight(&mut self, target: EntityRef) {
        self.events.push(StoreEvent::Highlight(target));
    }
}
