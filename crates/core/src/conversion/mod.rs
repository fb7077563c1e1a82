//! Representation converters
//!
//! A converter turns a [`Representation`] of one media type into one of
//! another, picking the output type by negotiation against the requester's
//! preferences.
//!
//! # Lifecycle
//!
//! 1. [`RepresentationConverter::can_handle()`] checks the input type and
//!    that an acceptable output type exists, without touching the payload
//! 2. [`RepresentationConverter::convert()`] negotiates the output type and
//!    returns a new representation whose payload is produced lazily
//! 3. The caller consumes (or drops) the returned payload stream
//!
//! `can_handle` failures are recoverable ([`Error::is_recoverable`]); a
//! selection loop such as [`WaterfallConverter`] moves on to the next
//! converter. Errors raised while the converted stream is read surface as
//! [`Error::ConversionFailure`].
//!
//! [`Error::is_recoverable`]: crate::Error::is_recoverable
//! [`Error::ConversionFailure`]: crate::Error::ConversionFailure
//!
//! # Example
//!
//! ```ignore
//! use represent_core::conversion::{ConversionRequest, QuadToRdfConverter, RepresentationConverter};
//!
//! let converter = QuadToRdfConverter::default();
//! let request = ConversionRequest::new(identifier, representation, preferences);
//!
//! converter.can_handle(&request).await?;
//! let turtle = converter.convert(request).await?;
//! ```

use async_trait::async_trait;

use crate::capabilities::{validate_conversion, MediaTypeWeights};
use crate::data::{Representation, RepresentationPreferences, ResourceIdentifier};
use crate::error::Result;

pub mod quad_to_rdf;
pub mod waterfall;

pub use quad_to_rdf::QuadToRdfConverter;
pub use waterfall::WaterfallConverter;

/// Input of a conversion.
#[derive(Debug)]
pub struct ConversionRequest {
    /// Resource being converted, used for error context
    pub identifier: ResourceIdentifier,
    /// Representation to convert
    pub representation: Representation,
    /// Accepted output types
    pub preferences: RepresentationPreferences,
}

impl ConversionRequest {
    /// Create a request
    pub fn new(
        identifier: ResourceIdentifier,
        representation: Representation,
        preferences: RepresentationPreferences,
    ) -> Self {
        Self {
            identifier,
            representation,
            preferences,
        }
    }
}

/// A unit converting representations between media types.
///
/// # Implementing a Converter
///
/// Only the type lists and [`convert`](Self::convert) are required. The
/// default [`can_handle`](Self::can_handle) validates a request against
/// [`input_types`](Self::input_types) and [`output_types`](Self::output_types).
#[async_trait]
pub trait RepresentationConverter: Send + Sync {
    /// Converter name (for logging)
    fn name(&self) -> &str;

    /// Media types accepted as input
    ///
    /// May be recomputed on every call; do not cache.
    async fn input_types(&self) -> Result<MediaTypeWeights>;

    /// Media types that can be produced
    ///
    /// May be recomputed on every call; do not cache.
    async fn output_types(&self) -> Result<MediaTypeWeights>;

    /// Check that `request` can be converted, without converting it
    ///
    /// # Errors
    ///
    /// Recoverable errors ([`Error::UnsupportedMediaType`],
    /// [`Error::NotAcceptable`], [`Error::MissingContentType`]) when the
    /// request does not fit this converter.
    ///
    /// [`Error::UnsupportedMediaType`]: crate::Error::UnsupportedMediaType
    /// [`Error::NotAcceptable`]: crate::Error::NotAcceptable
    /// [`Error::MissingContentType`]: crate::Error::MissingContentType
    async fn can_handle(&self, request: &ConversionRequest) -> Result<()> {
        let input_types = self.input_types().await?;
        let output_types = self.output_types().await?;

        let chosen = validate_conversion(
            request.representation.content_type(),
            &request.preferences.content_type,
            &input_types,
            &output_types,
        )?;

        tracing::trace!(
            "{} can convert {} to {}",
            self.name(),
            request.identifier,
            chosen.media_type
        );
        Ok(())
    }

    /// Convert the request's representation
    ///
    /// Callers should have checked [`can_handle`](Self::can_handle) first;
    /// a request that does not fit fails with the same errors.
    async fn convert(&self, request: ConversionRequest) -> Result<Representation>;

    /// [`can_handle`](Self::can_handle) followed by [`convert`](Self::convert)
    async fn handle_safe(&self, request: ConversionRequest) -> Result<Representation> {
        self.can_handle(&request).await?;
        self.convert(request).await
    }
}
