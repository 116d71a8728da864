//! API version tokens
//!
//! A version token is either a calendar-dated release (`2024-10-23`) or one of
//! the two sentinels `preview` and `private preview`. Dated tokens are totally
//! ordered by date. Sentinels sort after every dated token and are only
//! comparable to themselves, so `partial_cmp` between `preview` and
//! `private preview` is `None`.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::VersionParseError;

pub const PREVIEW: &str = "preview";
pub const PRIVATE_PREVIEW: &str = "private preview";

const DATED_PATTERN: &str = r"^(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VersionToken {
    /// A generally-available API release
    Dated(NaiveDate),
    /// Public preview of unreleased functionality
    Preview,
    /// Gated functionality not available under any dated release
    PrivatePreview,
}

impl VersionToken {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            VersionToken::Dated(date) => Some(*date),
            VersionToken::Preview | VersionToken::PrivatePreview => None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.date().is_none()
    }

    /// Parse a version as typed by a user, where an empty string means "latest"
    pub fn parse_requested(input: &str) -> Result<Option<Self>, VersionParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }

    /// Render the token as a single shell word
    pub fn shell_word(&self) -> String {
        match self {
            VersionToken::PrivatePreview => format!("\"{PRIVATE_PREVIEW}\""),
            other => other.to_string(),
        }
    }

    /// Render the token for use inside identifiers and file names
    pub fn slug(&self) -> String {
        self.to_string().replace(' ', "_")
    }
}

impl FromStr for VersionToken {
    type Err = VersionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            PREVIEW => return Ok(VersionToken::Preview),
            PRIVATE_PREVIEW => return Ok(VersionToken::PrivatePreview),
            _ => {}
        }

        let invalid = || VersionParseError {
            input: input.to_string(),
        };
        let re = Regex::new(DATED_PATTERN).map_err(|_| invalid())?;
        let caps = re.captures(input).ok_or_else(invalid)?;

        // The pattern guarantees ASCII digits, so only calendar validity can fail
        let year: i32 = caps["year"].parse().map_err(|_| invalid())?;
        let month: u32 = caps["month"].parse().map_err(|_| invalid())?;
        let day: u32 = caps["day"].parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(VersionToken::Dated)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for VersionToken {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionToken> for String {
    fn from(value: VersionToken) -> Self {
        value.to_string()
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionToken::Dated(date) => write!(
                f,
                "{:04}-{:02}-{:02}",
                date.year(),
                date.month(),
                date.day()
            ),
            VersionToken::Preview => f.write_str(PREVIEW),
            VersionToken::PrivatePreview => f.write_str(PRIVATE_PREVIEW),
        }
    }
}

impl PartialOrd for VersionToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (VersionToken::Dated(a), VersionToken::Dated(b)) => Some(a.cmp(b)),
            (VersionToken::Dated(_), _) => Some(Ordering::Less),
            (_, VersionToken::Dated(_)) => Some(Ordering::Greater),
            (a, b) if a == b => Some(Ordering::Equal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> VersionToken {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_dated() {
        assert_eq!(
            v("2024-10-23"),
            VersionToken::Dated(NaiveDate::from_ymd_opt(2024, 10, 23).unwrap())
        );
        assert_eq!(v("2024-10-23").to_string(), "2024-10-23");
    }

    #[test]
    fn test_parse_sentinels() {
        assert_eq!(v("preview"), VersionToken::Preview);
        assert_eq!(v("private preview"), VersionToken::PrivatePreview);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "2024-1-05",
            "2024-02-30",
            "24-01-01",
            "2024-01-01.upcoming",
            "Preview",
            "private-preview",
            "latest",
            "",
        ] {
            assert!(bad.parse::<VersionToken>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_parse_requested_empty_means_latest() {
        assert_eq!(VersionToken::parse_requested("").unwrap(), None);
        assert_eq!(VersionToken::parse_requested("  ").unwrap(), None);
        assert_eq!(
            VersionToken::parse_requested(" preview ").unwrap(),
            Some(VersionToken::Preview)
        );
    }

    #[test]
    fn test_ordering() {
        assert!(v("2023-01-01") < v("2024-05-30"));
        assert!(v("2099-12-31") < v("preview"));
        assert!(v("2099-12-31") < v("private preview"));
        assert!(v("preview") > v("2023-01-01"));
        assert_eq!(v("preview").partial_cmp(&v("preview")), Some(Ordering::Equal));
        assert_eq!(v("preview").partial_cmp(&v("private preview")), None);
        assert_eq!(v("private preview").partial_cmp(&v("preview")), None);
    }

    #[test]
    fn test_shell_word_and_slug() {
        assert_eq!(v("private preview").shell_word(), "\"private preview\"");
        assert_eq!(v("2024-08-05").shell_word(), "2024-08-05");
        assert_eq!(v("private preview").slug(), "private_preview");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&v("2023-02-01")).unwrap();
        assert_eq!(json, "\"2023-02-01\"");
        let back: VersionToken = serde_json::from_str("\"private preview\"").unwrap();
        assert_eq!(back, VersionToken::PrivatePreview);
        assert!(serde_json::from_str::<VersionToken>("\"soon\"").is_err());
    }
}
