//! Cycle length of a recurring definition.

use std::fmt;

/// How long one cycle of a definition lasts.
///
/// Tokens other than `week`, `month` and `year` are kept as [`Period::Other`]
/// so the definition still participates in a run: it never resets and its
/// instances are due the day they are posted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Period {
    /// Monday through Sunday.
    Week,
    /// First to last day of a calendar month.
    Month,
    /// January 1 to December 31.
    Year,
    /// Unrecognised token, lower-cased.
    Other(String),
}

impl Period {
    /// Parses a period token, case-insensitively and ignoring surrounding whitespace.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim().to_lowercase();
        match token.as_str() {
            "week" => Self::Week,
            "month" => Self::Month,
            "year" => Self::Year,
            _ => Self::Other(token),
        }
    }

    /// The normalized token, as used in identity keys.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::Other(token) => token,
        }
    }

    /// Returns `true` for week, month and year.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.token())
    }
}
