//! Conflict model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::matcher::MatchStrategy;
use crate::models::Record;
use crate::Error;

/// Reason recorded for every password mismatch.
pub const DIFFERENT_PASSWORDS: &str = "Different passwords for same account";

/// Which input collection a decision refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(Error::InvalidArgument(format!(
                "unknown side '{other}' (expected left or right)"
            ))),
        }
    }
}

/// A matched pair whose passwords differ.
///
/// `left` always comes from the collection passed as `left` to the merge,
/// whatever the direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub id: String,
    pub left: Record,
    pub right: Record,
    pub reason: String,
    pub strategy: MatchStrategy,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub chosen_side: Option<Side>,
}

impl Conflict {
    /// Create an unresolved conflict for a password mismatch
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        left: Record,
        right: Record,
        strategy: MatchStrategy,
    ) -> Self {
        Self {
            id: id.into(),
            left,
            right,
            reason: format!("{DIFFERENT_PASSWORDS} (matched by {strategy})"),
            strategy,
            resolved: false,
            chosen_side: None,
        }
    }

    /// Record on the given side
    #[must_use]
    pub const fn side(&self, side: Side) -> &Record {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Title for listings, preferring the left record
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.left.title.trim().is_empty() {
            self.right.display_title()
        } else {
            &self.left.title
        }
    }
}

/// A user decision for one conflict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub conflict_id: String,
    pub side: Side,
}

impl Resolution {
    #[must_use]
    pub fn new(conflict_id: impl Into<String>, side: Side) -> Self {
        Self {
            conflict_id: conflict_id.into(),
            side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Origin;

    #[test]
    fn side_parses_case_insensitively() {
        assert_eq!("LEFT".parse::<Side>().unwrap(), Side::Left);
        assert_eq!(" right ".parse::<Side>().unwrap(), Side::Right);
        assert!(matches!(
            "middle".parse::<Side>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn conflict_reason_names_strategy() {
        let conflict = Conflict::new(
            "conflict-0",
            Record::new("apple-0", Origin::Apple),
            Record::new("google-0", Origin::Google),
            MatchStrategy::DomainAndUser,
        );
        assert_eq!(
            conflict.reason,
            "Different passwords for same account (matched by domain + username)"
        );
        assert!(!conflict.resolved);
        assert_eq!(conflict.chosen_side, None);
    }

    #[test]
    fn display_title_falls_back_to_right() {
        let conflict = Conflict::new(
            "conflict-0",
            Record::new("apple-0", Origin::Apple),
            Record::new("google-0", Origin::Google).with_title("Mail"),
            MatchStrategy::UniqueUsername,
        );
        assert_eq!(conflict.display_title(), "Mail");
    }
}
