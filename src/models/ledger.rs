use super::{Category, CategoryId, Entry, EntryId};

/// Categories and entries of one calendar month.
///
/// Only the store mutates a ledger, and always on a private copy; readers get
/// shared snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthLedger {
    categories: Vec<Category>,
    entries: Vec<Entry>,
}

impl MonthLedger {
    pub fn new(categories: Vec<Category>, entries: Vec<Entry>) -> Self {
        Self {
            categories,
            entries,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        Category::find_by_id(&self.categories, id)
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries_in<'a>(&'a self, cat_id: &'a CategoryId) -> impl Iterator<Item = &'a Entry> {
        self.entries.iter().filter(move |e| &e.cat_id == cat_id)
    }

    pub fn entry_count_in(&self, cat_id: &CategoryId) -> usize {
        self.entries_in(cat_id).count()
    }

    /// Deep copy with every entry re-keyed through `mint`. Category ids,
    /// labels and colors are kept.
    pub fn with_fresh_ids(&self, mut mint: impl FnMut() -> EntryId) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|e| Entry {
                id: mint(),
                ..e.clone()
            })
            .collect();
        Self {
            categories: self.categories.clone(),
            entries,
        }
    }

    pub(crate) fn category_mut(&mut self, id: &CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| &c.id == id)
    }

    pub(crate) fn entry_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn push_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub(crate) fn push_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Drops the category and every entry filed under it.
    pub(crate) fn remove_category(&mut self, id: &CategoryId) {
        self.categories.retain(|c| &c.id != id);
        self.entries.retain(|e| &e.cat_id != id);
    }

    pub(crate) fn remove_entry(&mut self, id: EntryId) {
        self.entries.retain(|e| e.id != id);
    }
}
