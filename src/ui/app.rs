use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::amount::format_amount;
use crate::config::Settings;
use crate::models::*;
use crate::store::{EntityRef, LedgerStore, MonthSource, StoreEvent, StoreResult};

/// How long a changed row stays highlighted.
pub(crate) const FLASH_DURATION: Duration = Duration::from_millis(750);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Expenses,
    Summary,
    History,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Expenses, Self::Summary, Self::History]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expenses => write!(f, "Expenses"),
            Self::Summary => write!(f, "Summary"),
            Self::History => write!(f, "History"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteMonth(MonthKey),
}

/// What the inline editor writes back to on Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EditTarget {
    EntryDesc(EntryId),
    EntryValue(EntryId),
    CategoryLabel(CategoryId),
    NewCategory,
}

impl EditTarget {
    pub(crate) fn prompt(&self) -> &'static str {
        match self {
            Self::EntryDesc(_) => "desc> ",
            Self::EntryValue(_) => "value> ",
            Self::CategoryLabel(_) => "rename> ",
            Self::NewCategory => "new category> ",
        }
    }
}

/// One line of the expenses table: a category header or one of its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExpenseRow {
    Category(CategoryId),
    Entry { id: EntryId, cat_id: CategoryId },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) current_month: MonthKey,
    pub(crate) store: LedgerStore,

    // Expenses
    pub(crate) rows: Vec<ExpenseRow>,
    pub(crate) row_index: usize,
    pub(crate) row_scroll: usize,

    // History
    pub(crate) history_index: usize,

    // Editing
    pub(crate) edit_target: Option<EditTarget>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Highlights, keyed by what changed
    pub(crate) flashed: HashMap<EntityRef, Instant>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(settings: &Settings) -> Self {
        let mut store = LedgerStore::new(settings.log_capacity);
        store.note("Session started");
        if settings.seed_on_start {
            if let Err(e) = store.init_month(settings.start_month, MonthSource::Seed) {
                log::warn!("Could not seed {}: {e}", settings.start_month);
            }
        }
        store.take_events();

        let mut app = Self {
            running: true,
            screen: Screen::Expenses,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            current_month: settings.start_month,
            store,

            rows: Vec::new(),
            row_index: 0,
            row_scroll: 0,

            history_index: 0,

            edit_target: None,

            pending_action: None,
            confirm_message: String::new(),

            flashed: HashMap::new(),

            visible_rows: 20,
        };
        app.refresh_rows();
        app
    }

    pub(crate) fn ledger(&self) -> Option<Arc<MonthLedger>> {
        self.store.ledger(self.current_month)
    }

    /// Rebuild the flattened expenses table from the current snapshot.
    pub(crate) fn refresh_rows(&mut self) {
        self.rows = match self.ledger() {
            Some(ledger) => ledger
                .categories()
                .iter()
                .flat_map(|cat| {
                    std::iter::once(ExpenseRow::Category(cat.id.clone())).chain(
                        ledger.entries_in(&cat.id).map(move |e| ExpenseRow::Entry {
                            id: e.id,
                            cat_id: cat.id.clone(),
                        }),
                    )
                })
                .collect(),
            None => Vec::new(),
        };
        if self.row_index >= self.rows.len() {
            self.row_index = self.rows.len().saturating_sub(1);
        }
        if self.row_scroll > self.row_index {
            self.row_scroll = self.row_index;
        }
    }

    pub(crate) fn selected_row(&self) -> Option<&ExpenseRow> {
        self.rows.get(self.row_index)
    }

    pub(crate) fn selected_entry(&self) -> Option<EntryId> {
        match self.selected_row()? {
            ExpenseRow::Entry { id, .. } => Some(*id),
            ExpenseRow::Category(_) => None,
        }
    }

    /// The selected category, or the category of the selected entry.
    pub(crate) fn selected_category(&self) -> Option<CategoryId> {
        match self.selected_row()? {
            ExpenseRow::Category(id) => Some(id.clone()),
            ExpenseRow::Entry { cat_id, .. } => Some(cat_id.clone()),
        }
    }

    pub(crate) fn select_entry(&mut self, id: EntryId) {
        if let Some(pos) = self
            .rows
            .iter()
            .position(|r| matches!(r, ExpenseRow::Entry { id: e, .. } if *e == id))
        {
            self.row_index = pos;
        }
    }

    pub(crate) fn select_category(&mut self, id: &CategoryId) {
        if let Some(pos) = self
            .rows
            .iter()
            .position(|r| matches!(r, ExpenseRow::Category(c) if c == id))
        {
            self.row_index = pos;
        }
    }

    /// Look a category up by id, then by label.
    pub(crate) fn resolve_category(&self, text: &str) -> Option<CategoryId> {
        let ledger = self.ledger()?;
        let text = text.trim();
        ledger
            .category(&CategoryId::new(text))
            .or_else(|| Category::find_by_label(ledger.categories(), text))
            .map(|c| c.id.clone())
    }

    pub(crate) fn go_to_month(&mut self, key: MonthKey) {
        self.current_month = key;
        self.row_index = 0;
        self.row_scroll = 0;
        self.refresh_rows();
        if self.store.contains(key) {
            self.set_status(format!("Month: {}", key.label()));
        } else {
            self.set_status(format!(
                "No data for {}. Press i to start fresh or c to copy {}",
                key.label(),
                key.previous().label()
            ));
        }
    }

    pub(crate) fn next_month(&mut self) {
        self.go_to_month(self.current_month.next());
    }

    pub(crate) fn prev_month(&mut self) {
        self.go_to_month(self.current_month.previous());
    }

    /// Initialize the current month from the seed, or from the previous
    /// calendar month when `copy` is set.
    pub(crate) fn init_current(&mut self, copy: bool) {
        let source = if copy {
            MonthSource::CopyFrom(self.current_month.previous())
        } else {
            MonthSource::Seed
        };
        let result = self.store.init_month(self.current_month, source);
        self.check(result);
    }

    /// Surface a store rejection as a status message; never propagates.
    pub(crate) fn check<T>(&mut self, result: StoreResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.refresh_rows();
                self.sync_events(Instant::now());
                Some(value)
            }
            Err(e) => {
                self.set_status(e.to_string());
                None
            }
        }
    }

    /// Apply pending store notifications: log messages become the status
    /// line, highlights start their flash timer.
    pub(crate) fn sync_events(&mut self, now: Instant) {
        for event in self.store.take_events() {
            match event {
                StoreEvent::Logged(entry) => self.status_message = entry.message,
                StoreEvent::Highlight(target) => {
                    self.flashed.insert(target, now);
                }
            }
        }
    }

    pub(crate) fn expire_highlights(&mut self, now: Instant) {
        self.flashed
            .retain(|_, started| now.duration_since(*started) < FLASH_DURATION);
    }

    pub(crate) fn is_flashed(&self, target: &EntityRef) -> bool {
        self.flashed.contains_key(target)
    }

    pub(crate) fn begin_edit(&mut self, target: EditTarget) {
        let ledger = self.ledger();
        let initial = match (&target, ledger.as_deref()) {
            (EditTarget::EntryDesc(id), Some(l)) => l.entry(*id).map(|e| e.desc.clone()),
            (EditTarget::EntryValue(id), Some(l)) => l.entry(*id).map(|e| format_amount(e.value)),
            (EditTarget::CategoryLabel(id), Some(l)) => l.category(id).map(|c| c.label.clone()),
            _ => None,
        };
        self.command_input = initial.unwrap_or_default();
        self.edit_target = Some(target);
        self.input_mode = InputMode::Editing;
    }

    /// Write the editor buffer back through the store.
    pub(crate) fn commit_edit(&mut self) {
        let text = std::mem::take(&mut self.command_input);
        self.input_mode = InputMode::Normal;
        let Some(target) = self.edit_target.take() else {
            return;
        };
        let key = self.current_month;
        match target {
            EditTarget::EntryDesc(id) => {
                let result = self.store.update_entry_field(key, id, EntryField::Desc, &text);
                self.check(result);
            }
            EditTarget::EntryValue(id) => {
                let result = self.store.update_entry_field(key, id, EntryField::Value, &text);
                self.check(result);
            }
            EditTarget::CategoryLabel(id) => {
                if text.trim().is_empty() {
                    self.set_status("Category name cannot be empty");
                    return;
                }
                let result = self.store.rename_category(key, &id, text.trim());
                self.check(result);
            }
            EditTarget::NewCategory => {
                let result = self.store.add_category(key, &text);
                if let Some(id) = self.check(result) {
                    self.select_category(&id);
                }
            }
        }
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.command_input.clear();
        self.edit_target = None;
        self.input_mode = InputMode::Normal;
        self.set_status("Edit cancelled");
    }

    pub(crate) fn request_confirm(&mut self, action: PendingAction, message: String) {
        self.pending_action = Some(action);
        self.confirm_message = message;
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self) {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::DeleteMonth(key) => {
                    let result = self.store.delete_month(key);
                    self.check(result);
                    if self.history_index > 0 {
                        self.history_index -= 1;
                    }
                }
            }
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
