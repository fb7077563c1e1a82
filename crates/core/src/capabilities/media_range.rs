//! Media types and media ranges
//!
//! A [`MediaRange`] is a `main/sub` pair where either half may be the `*`
//! wildcard (`*/sub` is rejected). Parameters after `;` are dropped, and both
//! halves are lowercased so comparisons are case-insensitive.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Wildcard placeholder for a whole type or subtype.
pub const WILDCARD: &str = "*";

/// Parsed media type or media range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRange {
    main: String,
    sub: String,
}

impl MediaRange {
    /// Parse a media type such as `text/turtle` or `text/*; charset=utf-8`.
    pub fn parse(value: &str) -> Result<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();

        let (main, sub) = essence
            .split_once('/')
            .ok_or_else(|| Error::InvalidMediaType(format!("missing '/' in '{}'", value)))?;

        if !is_token(main) || !is_token(sub) {
            return Err(Error::InvalidMediaType(format!(
                "'{}' is not of the form type/subtype",
                value
            )));
        }

        if main == WILDCARD && sub != WILDCARD {
            return Err(Error::InvalidMediaType(format!(
                "'{}' has a wildcard type with a concrete subtype",
                value
            )));
        }

        Ok(Self {
            main: main.to_ascii_lowercase(),
            sub: sub.to_ascii_lowercase(),
        })
    }

    /// Top-level type (e.g. `text`).
    pub fn main_type(&self) -> &str {
        &self.main
    }

    /// Subtype (e.g. `turtle`).
    pub fn sub_type(&self) -> &str {
        &self.sub
    }

    /// True for `main/*` and `*/*`.
    pub fn is_wildcard(&self) -> bool {
        self.sub == WILDCARD
    }

    /// 2 for a concrete type, 1 for `main/*`, 0 for `*/*`.
    pub fn specificity(&self) -> u8 {
        match (self.main.as_str(), self.sub.as_str()) {
            (WILDCARD, _) => 0,
            (_, WILDCARD) => 1,
            _ => 2,
        }
    }

    /// Whether this range, used as a pattern, covers `other`.
    pub fn covers(&self, other: &MediaRange) -> bool {
        (self.main == WILDCARD || self.main == other.main)
            && (self.sub == WILDCARD || self.sub == other.sub)
    }

    /// Symmetric wildcard-aware match: either side may be a range.
    pub fn matches(&self, other: &MediaRange) -> bool {
        self.covers(other) || other.covers(self)
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main, self.sub)
    }
}

impl FromStr for MediaRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Check whether two media types match, allowing wildcards on either side.
///
/// Unparseable input never matches.
pub fn matching_media_type(left: &str, right: &str) -> bool {
    match (MediaRange::parse(left), MediaRange::parse(right)) {
        (Ok(left), Ok(right)) => left.matches(&right),
        _ => false,
    }
}

fn is_token(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_graphic() && !matches!(c, '/' | ';' | ',' | '"'))
}
