use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::models::{CategoryId, EntryId, MonthKey};

pub(crate) const DEFAULT_LOG_CAPACITY: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActivityEntry {
    pub(crate) at: DateTime<Local>,
    pub(crate) message: String,
}

/// Append-only audit trail that keeps the newest `capacity` messages.
#[derive(Debug, Clone)]
pub(crate) struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl ActivityLog {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn push(&mut self, message: impl Into<String>) -> ActivityEntry {
        let entry = ActivityEntry {
            at: Local::now(),
            message: message.into(),
        };
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.clone());
        entry
    }

    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    pub(crate) fn last(&self) -> Option<&ActivityEntry> {
        self.entries.back()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

/// Something the UI may briefly highlight after a change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum EntityRef {
    Month(MonthKey),
    Category(CategoryId),
    Entry(EntryId),
}

/// Outbound notifications, drained by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreEvent {
    Logged(ActivityEntry),
    Highlight(EntityRef),
}
