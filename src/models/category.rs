/// Stable category identifier; survives renames and is shared by the same
/// category across copied months.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
    /// Display color as a `#rrggbb` tag.
    pub color: String,
}

impl Category {
    pub fn new(id: CategoryId, label: String, color: String) -> Self {
        Self { id, label, color }
    }

    /// Find a category by label (case-insensitive) in a slice.
    pub fn find_by_label<'a>(categories: &'a [Category], label: &str) -> Option<&'a Category> {
        let lower = label.trim().to_lowercase();
        categories.iter().find(|c| c.label.to_lowercase() == lower)
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id<'a>(categories: &'a [Category], id: &CategoryId) -> Option<&'a Category> {
        categories.iter().find(|c| &c.id == id)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}
