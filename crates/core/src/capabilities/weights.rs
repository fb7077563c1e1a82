//! Weighted media type lists
//!
//! [`MediaTypeWeights`] is used on both sides of a negotiation: for the
//! requester's preferences and for the types a converter supports. Keys are
//! unique; entry order is kept because negotiation breaks ties by it.

use serde::{Deserialize, Serialize};

use super::media_range::MediaRange;
use crate::error::{Error, Result};

fn default_weight() -> f32 {
    1.0
}

/// A media type (or range) with its preference weight in `[0, 1]`.
///
/// A weight of 0 marks the type as explicitly not acceptable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMediaTypeWeight", into = "RawMediaTypeWeight")]
pub struct MediaTypeWeight {
    range: MediaRange,
    weight: f32,
}

#[derive(Serialize, Deserialize)]
struct RawMediaTypeWeight {
    #[serde(rename = "type")]
    media_type: String,
    #[serde(default = "default_weight")]
    weight: f32,
}

impl MediaTypeWeight {
    /// Create a weighted media type, validating syntax and weight.
    pub fn new(media_type: &str, weight: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(Error::InvalidPreferences(format!(
                "weight {} for '{}' is outside [0, 1]",
                weight, media_type
            )));
        }

        Ok(Self {
            range: MediaRange::parse(media_type)?,
            weight,
        })
    }

    /// Weighted media type without explicit weight (counts as 1).
    pub fn unweighted(media_type: &str) -> Result<Self> {
        Self::new(media_type, default_weight())
    }

    /// Parsed media range.
    pub fn range(&self) -> &MediaRange {
        &self.range
    }

    /// Normalized `type/subtype` string.
    pub fn media_type(&self) -> String {
        self.range.to_string()
    }

    /// Preference weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }
}

impl TryFrom<RawMediaTypeWeight> for MediaTypeWeight {
    type Error = Error;

    fn try_from(raw: RawMediaTypeWeight) -> Result<Self> {
        Self::new(&raw.media_type, raw.weight)
    }
}

impl From<MediaTypeWeight> for RawMediaTypeWeight {
    fn from(value: MediaTypeWeight) -> Self {
        Self {
            media_type: value.media_type(),
            weight: value.weight,
        }
    }
}

/// Ordered mapping of media type to weight with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MediaTypeWeight>", into = "Vec<MediaTypeWeight>")]
pub struct MediaTypeWeights {
    entries: Vec<MediaTypeWeight>,
}

impl MediaTypeWeights {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(media type, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on malformed media types, weights outside `[0, 1]`, or duplicate keys.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f32)>,
        S: AsRef<str>,
    {
        let mut weights = Self::new();
        for (media_type, weight) in pairs {
            weights.insert(MediaTypeWeight::new(media_type.as_ref(), weight)?)?;
        }
        Ok(weights)
    }

    /// Append an entry, rejecting duplicates.
    pub fn insert(&mut self, entry: MediaTypeWeight) -> Result<()> {
        if self.contains(entry.range()) {
            return Err(Error::InvalidPreferences(format!(
                "duplicate type preference: {}",
                entry.range()
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Insert an entry or, when the key exists, keep the higher weight.
    ///
    /// An existing key keeps its position.
    pub fn merge_max(&mut self, entry: MediaTypeWeight) {
        match self.entries.iter_mut().find(|e| e.range == entry.range) {
            Some(existing) => {
                if entry.weight > existing.weight {
                    existing.weight = entry.weight;
                }
            }
            None => self.entries.push(entry),
        }
    }

    /// Whether the exact key is present (regardless of weight).
    pub fn contains(&self, range: &MediaRange) -> bool {
        self.entries.iter().any(|e| &e.range == range)
    }

    /// Weight for an exact key, if present.
    pub fn weight_of(&self, range: &MediaRange) -> Option<f32> {
        self.entries
            .iter()
            .find(|e| &e.range == range)
            .map(|e| e.weight)
    }

    /// Weight for a media type string; absent or unparseable types weigh 0.
    pub fn get(&self, media_type: &str) -> f32 {
        MediaRange::parse(media_type)
            .ok()
            .and_then(|range| self.weight_of(&range))
            .unwrap_or(0.0)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MediaTypeWeight> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Media types in insertion order.
    pub fn media_types(&self) -> Vec<String> {
        self.entries.iter().map(MediaTypeWeight::media_type).collect()
    }

    /// Entries rendered as `type;q=weight`, for diagnostics.
    pub fn describe(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{};q={}", e.range, e.weight))
            .collect()
    }
}

impl TryFrom<Vec<MediaTypeWeight>> for MediaTypeWeights {
    type Error = Error;

    fn try_from(entries: Vec<MediaTypeWeight>) -> Result<Self> {
        let mut weights = Self::new();
        for entry in entries {
            weights.insert(entry)?;
        }
        Ok(weights)
    }
}

impl From<MediaTypeWeights> for Vec<MediaTypeWeight> {
    fn from(weights: MediaTypeWeights) -> Self {
        weights.entries
    }
}

impl<'a> IntoIterator for &'a MediaTypeWeights {
    type Item = &'a MediaTypeWeight;
    type IntoIter = std::slice::Iter<'a, MediaTypeWeight>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
