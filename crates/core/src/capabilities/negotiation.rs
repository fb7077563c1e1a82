//! Media type negotiation algorithm
//!
//! Matches a requester's weighted preferences against the types a converter
//! supports and orders the acceptable types by combined score.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::media_range::MediaRange;
use super::weights::MediaTypeWeights;
use crate::error::Error;

// =============================================================================
// Negotiation Types
// =============================================================================

/// A supported media type accepted by the requester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMatch {
    /// Concrete media type (e.g., "text/turtle")
    pub media_type: String,
    /// Preference weight multiplied by the supported weight
    pub score: f32,
}

/// No supported type is acceptable to the requester.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("No acceptable media type: requested [{}], available [{}]", requested.join(", "), supported.join(", "))]
pub struct NoMatch {
    /// Requester preferences as `type;q=weight`
    pub requested: Vec<String>,
    /// Supported types as `type;q=weight`
    pub supported: Vec<String>,
}

impl NoMatch {
    fn new(preferences: &MediaTypeWeights, supported: &MediaTypeWeights) -> Self {
        Self {
            requested: preferences.describe(),
            supported: supported.describe(),
        }
    }
}

impl From<NoMatch> for Error {
    fn from(no_match: NoMatch) -> Self {
        Error::NotAcceptable {
            requested: no_match.requested,
            supported: no_match.supported,
        }
    }
}

// =============================================================================
// Negotiation Algorithm
// =============================================================================

/// Weight the requester gives to `candidate`.
///
/// The most specific matching preference wins (`main/sub` over `main/*` over
/// `*/*`), so `text/*;q=1, text/turtle;q=0` still rejects Turtle.
fn preference_weight(preferences: &MediaTypeWeights, candidate: &MediaRange) -> Option<f32> {
    preferences
        .iter()
        .filter(|pref| pref.range().covers(candidate))
        .max_by_key(|pref| pref.range().specificity())
        .map(|pref| pref.weight())
}

/// Compute every acceptable supported type, best first.
///
/// Scores are `preference weight × supported weight`. Ties keep the order of
/// `supported`. Wildcard entries in `supported` are not concrete output types
/// and are skipped.
///
/// # Errors
///
/// Returns [`NoMatch`] when no supported type has a nonzero score, which
/// includes empty preferences and empty supported types.
pub fn negotiate(
    preferences: &MediaTypeWeights,
    supported: &MediaTypeWeights,
) -> Result<Vec<TypeMatch>, NoMatch> {
    let mut matches: Vec<TypeMatch> = supported
        .iter()
        .filter(|entry| entry.weight() > 0.0)
        .filter(|entry| {
            if entry.range().is_wildcard() {
                tracing::trace!("Skipping wildcard supported type {}", entry.range());
                return false;
            }
            true
        })
        .filter_map(|entry| {
            let preference = preference_weight(preferences, entry.range())?;
            let score = preference * entry.weight();
            (score > 0.0).then(|| TypeMatch {
                media_type: entry.media_type(),
                score,
            })
        })
        .collect();

    if matches.is_empty() {
        return Err(NoMatch::new(preferences, supported));
    }

    // sort_by is stable: equal scores stay in supported order
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(matches)
}

/// The single highest-scoring acceptable type.
pub fn best_match(
    preferences: &MediaTypeWeights,
    supported: &MediaTypeWeights,
) -> Result<TypeMatch, NoMatch> {
    negotiate(preferences, supported).map(|mut matches| matches.swap_remove(0))
}
