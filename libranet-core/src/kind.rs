use serde::{Deserialize, Serialize};

/// Item type tags for all supported catalog entry kinds.
///
/// This enum centralizes item-kind identity (canonical tag and accepted
/// aliases) in one place, replacing ad-hoc string matching in queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Book,
    Audiobook,
    EMagazine,
}

/// All kind variants in registration order.
const ALL_KINDS: &[ItemKind] = &[ItemKind::Book, ItemKind::Audiobook, ItemKind::EMagazine];

impl ItemKind {
    /// Canonical tag used in summaries and type queries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "Book",
            Self::Audiobook => "Audiobook",
            Self::EMagazine => "E-Magazine",
        }
    }

    /// All accepted names for this kind (case-insensitive matching).
    ///
    /// Includes the canonical tag plus common alternatives used in
    /// queries and CLI arguments.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Book => &["book"],
            Self::Audiobook => &["audiobook", "audio book"],
            Self::EMagazine => &["e-magazine", "emagazine", "magazine"],
        }
    }

    /// All kind variants.
    pub fn all() -> &'static [ItemKind] {
        ALL_KINDS
    }

    /// Parse a kind from any recognized name, or `None` for blank or
    /// unrecognized input.
    pub fn from_str_loose(s: &str) -> Option<ItemKind> {
        let lower = s.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        for &kind in ALL_KINDS {
            if kind.as_str().to_lowercase() == lower {
                return Some(kind);
            }
            for alias in kind.aliases() {
                if *alias == lower {
                    return Some(kind);
                }
            }
        }
        None
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string cannot be parsed into an `ItemKind`.
#[derive(Debug, Clone)]
pub struct KindParseError(pub String);

impl std::fmt::Display for KindParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown item kind: '{}'", self.0)
    }
}

impl std::error::Error for KindParseError {}

impl std::str::FromStr for ItemKind {
    type Err = KindParseError;

    /// Parse a kind from any recognized name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::from_str_loose(s).ok_or_else(|| KindParseError(s.to_string()))
    }
}
