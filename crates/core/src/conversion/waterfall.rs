//! Converter selection over an ordered list of candidates
//!
//! [`WaterfallConverter`] tries its members in order and hands a request to
//! the first one that can handle it. Members that do not fit fail with a
//! recoverable error, which moves the search along; anything else stops it.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ConversionRequest, RepresentationConverter};
use crate::capabilities::MediaTypeWeights;
use crate::data::Representation;
use crate::error::{Error, Result};

/// Ordered chain of converters acting as one.
#[derive(Clone, Default)]
pub struct WaterfallConverter {
    converters: Vec<Arc<dyn RepresentationConverter>>,
}

impl WaterfallConverter {
    /// Chain over `converters`, tried in the given order
    pub fn new(converters: Vec<Arc<dyn RepresentationConverter>>) -> Self {
        Self { converters }
    }

    /// Builder: append a converter
    pub fn with_converter(mut self, converter: Arc<dyn RepresentationConverter>) -> Self {
        self.converters.push(converter);
        self
    }

    /// Number of member converters
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Whether the chain has no members
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// First member that can handle `request`.
    ///
    /// # Errors
    ///
    /// The first non-recoverable error of any member, otherwise the last
    /// recoverable one; [`Error::NotAcceptable`] when there are no members.
    async fn select(&self, request: &ConversionRequest) -> Result<&Arc<dyn RepresentationConverter>> {
        let mut last_error = None;

        for converter in &self.converters {
            match converter.can_handle(request).await {
                Ok(()) => {
                    tracing::debug!(
                        "Selected converter {} for {}",
                        converter.name(),
                        request.identifier
                    );
                    return Ok(converter);
                }
                Err(e) if e.is_recoverable() => {
                    tracing::trace!(
                        "Converter {} cannot handle {}: {}",
                        converter.name(),
                        request.identifier,
                        e
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| Error::NotAcceptable {
            requested: request.preferences.content_type.describe(),
            supported: Vec::new(),
        }))
    }
}

/// First occurrence keeps its position, the highest weight wins.
fn merge_into(union: &mut MediaTypeWeights, types: MediaTypeWeights) {
    for entry in &types {
        union.merge_max(entry.clone());
    }
}

#[async_trait]
impl RepresentationConverter for WaterfallConverter {
    fn name(&self) -> &str {
        "waterfall"
    }

    async fn input_types(&self) -> Result<MediaTypeWeights> {
        let mut union = MediaTypeWeights::new();
        for converter in &self.converters {
            merge_into(&mut union, converter.input_types().await?);
        }
        Ok(union)
    }

    async fn output_types(&self) -> Result<MediaTypeWeights> {
        let mut union = MediaTypeWeights::new();
        for converter in &self.converters {
            merge_into(&mut union, converter.output_types().await?);
        }
        Ok(union)
    }

    async fn can_handle(&self, request: &ConversionRequest) -> Result<()> {
        self.select(request).await.map(|_| ())
    }

    async fn convert(&self, request: ConversionRequest) -> Result<Representation> {
        let converter = self.select(&request).await?.clone();
        converter.convert(request).await
    }
}
