//! Conversion request validation
//!
//! Checks whether a converter's declared types fit an input content type and
//! a requester's output preferences, without touching any payload.

use super::media_range::MediaRange;
use super::negotiation::{best_match, TypeMatch};
use super::weights::MediaTypeWeights;
use crate::error::{Error, Result};

/// Check that `content_type` is accepted by one of `input_types`.
///
/// Wildcards are allowed on both sides; entries with weight 0 do not count.
///
/// # Errors
///
/// * [`Error::MissingContentType`] if there is no content type
/// * [`Error::UnsupportedMediaType`] if no input type matches
pub fn validate_input_type(content_type: Option<&str>, input_types: &MediaTypeWeights) -> Result<()> {
    let content_type = content_type.ok_or(Error::MissingContentType)?;

    let unsupported = || Error::UnsupportedMediaType {
        content_type: content_type.to_string(),
        supported: input_types.media_types(),
    };

    let range = MediaRange::parse(content_type).map_err(|_| unsupported())?;

    if input_types
        .iter()
        .any(|entry| entry.weight() > 0.0 && entry.range().matches(&range))
    {
        Ok(())
    } else {
        Err(unsupported())
    }
}

/// Validate a full conversion: input type first, then output negotiation.
///
/// Returns the output type that would be produced.
///
/// # Errors
///
/// Any error of [`validate_input_type`], or [`Error::NotAcceptable`] when no
/// output type satisfies `preferences`.
pub fn validate_conversion(
    content_type: Option<&str>,
    preferences: &MediaTypeWeights,
    input_types: &MediaTypeWeights,
    output_types: &MediaTypeWeights,
) -> Result<TypeMatch> {
    validate_input_type(content_type, input_types)?;
    Ok(best_match(preferences, output_types)?)
}
