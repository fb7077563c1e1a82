//! Quad to RDF serialization converter
//!
//! Turns an `internal/quads` representation into a byte stream in whichever
//! RDF serialization best fits the requester's preferences. The formats on
//! offer come from a [`SerializerRegistry`] and are looked up on every call.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use super::{ConversionRequest, RepresentationConverter};
use crate::capabilities::{
    best_match, validate_conversion, validate_input_type, MediaTypeWeight, MediaTypeWeights,
};
use crate::data::{byte_stream, DataType, Representation, CONTENT_TYPE_QUADS};
use crate::error::{Error, Result};
use crate::serialize::{RdfSerializerRegistry, SerializerRegistry};

/// Converts quad streams to serialized RDF.
pub struct QuadToRdfConverter<R: SerializerRegistry = RdfSerializerRegistry> {
    registry: Arc<R>,
}

impl QuadToRdfConverter<RdfSerializerRegistry> {
    /// Converter backed by a default [`RdfSerializerRegistry`]
    pub fn new() -> Self {
        Self::with_registry(Arc::new(RdfSerializerRegistry::new()))
    }
}

impl Default for QuadToRdfConverter<RdfSerializerRegistry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SerializerRegistry> QuadToRdfConverter<R> {
    /// Converter backed by a shared registry
    pub fn with_registry(registry: Arc<R>) -> Self {
        Self { registry }
    }
}

/// The payload must be quads, whatever the declared content type says.
fn check_payload(representation: &Representation) -> Result<()> {
    match representation.data_type() {
        DataType::Quads => Ok(()),
        DataType::Binary => Err(Error::UnsupportedMediaType {
            content_type: representation
                .content_type()
                .map(|content_type| format!("{} ({} payload)", content_type, DataType::Binary))
                .unwrap_or_else(|| DataType::Binary.to_string()),
            supported: vec![CONTENT_TYPE_QUADS.to_string()],
        }),
    }
}

#[async_trait]
impl<R: SerializerRegistry + 'static> RepresentationConverter for QuadToRdfConverter<R> {
    fn name(&self) -> &str {
        "quad-to-rdf"
    }

    async fn input_types(&self) -> Result<MediaTypeWeights> {
        let mut types = MediaTypeWeights::new();
        types.insert(MediaTypeWeight::new(CONTENT_TYPE_QUADS, 1.0)?)?;
        Ok(types)
    }

    async fn output_types(&self) -> Result<MediaTypeWeights> {
        self.registry.content_types().await
    }

    async fn can_handle(&self, request: &ConversionRequest) -> Result<()> {
        let input_types = self.input_types().await?;
        let output_types = self.output_types().await?;

        let chosen = validate_conversion(
            request.representation.content_type(),
            &request.preferences.content_type,
            &input_types,
            &output_types,
        )?;
        check_payload(&request.representation)?;

        tracing::trace!(
            "{} can convert {} to {}",
            self.name(),
            request.identifier,
            chosen.media_type
        );
        Ok(())
    }

    async fn convert(&self, request: ConversionRequest) -> Result<Representation> {
        let ConversionRequest {
            identifier,
            representation,
            preferences,
        } = request;

        validate_input_type(representation.content_type(), &self.input_types().await?)?;
        check_payload(&representation)?;

        let output_types = self.output_types().await?;
        let chosen = best_match(&preferences.content_type, &output_types)?;

        tracing::debug!(
            "Converting {} from {} to {} (score {})",
            identifier,
            CONTENT_TYPE_QUADS,
            chosen.media_type,
            chosen.score
        );

        let metadata = representation
            .metadata
            .replace_content_type(chosen.media_type.clone());
        let quads = representation.into_quads()?;

        let serialized = self.registry.serialize(quads, &chosen.media_type).await?;

        let resource = identifier.to_string();
        let data = byte_stream(serialized.map(move |chunk| {
            chunk.map_err(|e| {
                tracing::warn!("Serializing {} failed: {}", resource, e);
                Error::conversion_failure(resource.as_str(), &e)
            })
        }));

        Ok(Representation::binary(metadata, data))
    }
}
