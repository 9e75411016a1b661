use std::fmt;
use std::str::FromStr;

use crate::error::DrillError;

/// The five filtered views over an exam's question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    All,
    Favorites,
    Answered,
    Unanswered,
    Incorrect,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::All,
        Tab::Favorites,
        Tab::Answered,
        Tab::Unanswered,
        Tab::Incorrect,
    ];

    /// Position of the tab in [`Tab::ALL`], used as a slot index.
    pub fn ordinal(self) -> usize {
        match self {
            Tab::All => 0,
            Tab::Favorites => 1,
            Tab::Answered => 2,
            Tab::Unanswered => 3,
            Tab::Incorrect => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::All => "ALL QUESTIONS",
            Tab::Favorites => "FAVORITES",
            Tab::Answered => "ANSWERED",
            Tab::Unanswered => "UNANSWERED",
            Tab::Incorrect => "INCORRECT",
        }
    }

    /// Placeholder shown when the tab's subsequence is empty.
    pub fn empty_message(self) -> &'static str {
        match self {
            Tab::All => "This topic has no questions.",
            Tab::Favorites => "There are no favorited questions.",
            Tab::Answered => "There are no answered questions yet.",
            Tab::Unanswered => "There are no unanswered questions.",
            Tab::Incorrect => "No incorrect questions in this topic.",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::All => write!(f, "all"),
            Tab::Favorites => write!(f, "favorites"),
            Tab::Answered => write!(f, "answered"),
            Tab::Unanswered => write!(f, "unanswered"),
            Tab::Incorrect => write!(f, "incorrect"),
        }
    }
}

impl FromStr for Tab {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "a" => Ok(Tab::All),
            "favorites" | "favourites" | "fav" | "f" => Ok(Tab::Favorites),
            "answered" | "ans" => Ok(Tab::Answered),
            "unanswered" | "u" => Ok(Tab::Unanswered),
            "incorrect" | "i" => Ok(Tab::Incorrect),
            _ => Err(DrillError::Other(format!(
                "unknown tab '{s}', expected one of: all, favorites, answered, unanswered, incorrect"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_match_all_order() {
        for (i, tab) in Tab::ALL.iter().enumerate() {
            assert_eq!(tab.ordinal(), i);
        }
    }

    #[test]
    fn test_parse_roundtrips_display() {
        for tab in Tab::ALL {
            assert_eq!(tab.to_string().parse::<Tab>().unwrap(), tab);
        }
        assert_eq!("FAV".parse::<Tab>().unwrap(), Tab::Favorites);
        assert!("starred".parse::<Tab>().is_err());
    }
}
