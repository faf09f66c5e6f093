#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Owner {
    Lion,
    Primo,
}

impl Owner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lion => "lion",
            Self::Primo => "primo",
        }
    }

    /// Strict parse: only the two known owners are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lion" => Some(Self::Lion),
            "primo" => Some(Self::Primo),
            _ => None,
        }
    }

    pub fn all() -> &'static [Owner] {
        &[Self::Lion, Self::Primo]
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Lion => Self::Primo,
            Self::Primo => Self::Lion,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Lion => "Lion",
            Self::Primo => "Primo",
        }
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
