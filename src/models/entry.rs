use rust_decimal::Decimal;

use super::{CategoryId, Owner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u64);

impl EntryId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.get())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub cat_id: CategoryId,
    pub desc: String,
    pub owner: Owner,
    /// Always non-negative; see `amount::parse_amount`.
    pub value: Decimal,
}

impl Entry {
    pub fn new(id: EntryId, cat_id: CategoryId, desc: String, owner: Owner, value: Decimal) -> Self {
        Self {
            id,
            cat_id,
            desc,
            owner,
            value,
        }
    }
}

/// The editable fields of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Desc,
    Owner,
    Value,
}

impl EntryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desc => "desc",
            Self::Owner => "owner",
            Self::Value => "value",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "desc" | "description" => Some(Self::Desc),
            "owner" => Some(Self::Owner),
            "value" | "amount" => Some(Self::Value),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
