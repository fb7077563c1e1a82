//! Serializer registry
//!
//! Converters do not encode RDF themselves; they ask a [`SerializerRegistry`]
//! which content types it can produce and for a byte stream in one of them.
//!
//! # Built-in Formats
//!
//! [`RdfSerializerRegistry`] ships streaming writers for:
//!
//! | Format | Content type | Default weight |
//! |--------|--------------|----------------|
//! | N-Quads | `application/n-quads` | 1.0 |
//! | TriG | `application/trig` | 0.95 |
//! | JSON-LD | `application/ld+json` | 0.9 |
//! | N-Triples | `application/n-triples` | 0.8 |
//! | Turtle | `text/turtle` | 0.6 |
//! | N3 | `text/n3` | 0.35 |
//!
//! Weights can be changed and formats disabled at runtime; every
//! [`SerializerRegistry::content_types`] call reflects the current table.
//!
//! # Implementing a Registry
//!
//! ```ignore
//! use represent_core::serialize::SerializerRegistry;
//!
//! pub struct ExternalRegistry { /* ... */ }
//!
//! #[async_trait]
//! impl SerializerRegistry for ExternalRegistry {
//!     async fn content_types(&self) -> Result<MediaTypeWeights> {
//!         MediaTypeWeights::from_pairs([("application/rdf+xml", 1.0)])
//!     }
//!
//!     async fn serialize(&self, quads: QuadStream, content_type: &str) -> Result<ByteStream> {
//!         Ok(rdf_xml::write(quads))
//!     }
//! }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::capabilities::{MediaRange, MediaTypeWeight, MediaTypeWeights};
use crate::config::SerializerConfig;
use crate::data::{byte_stream, ByteStream, QuadStream};
use crate::error::{Error, Result};

mod jsonld;
mod ntriples;

/// Source of serializers for quad streams.
///
/// Implementations may compute their content types on every call; callers
/// must not cache the result across requests.
#[async_trait]
pub trait SerializerRegistry: Send + Sync {
    /// Content types this registry can produce, with priorities
    async fn content_types(&self) -> Result<MediaTypeWeights>;

    /// Lazily serialize `quads` as `content_type`
    ///
    /// The returned stream must not buffer the whole input. Dropping it must
    /// drop `quads`.
    async fn serialize(&self, quads: QuadStream, content_type: &str) -> Result<ByteStream>;
}

/// RDF serialization formats with a built-in writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RdfFormat {
    /// N-Quads
    NQuads,
    /// TriG
    Trig,
    /// Expanded JSON-LD
    JsonLd,
    /// N-Triples
    NTriples,
    /// Turtle
    Turtle,
    /// Notation3
    N3,
}

impl RdfFormat {
    /// All formats in default priority order
    pub const ALL: [RdfFormat; 6] = [
        RdfFormat::NQuads,
        RdfFormat::Trig,
        RdfFormat::JsonLd,
        RdfFormat::NTriples,
        RdfFormat::Turtle,
        RdfFormat::N3,
    ];

    /// Media type of this format
    pub fn content_type(&self) -> &'static str {
        match self {
            RdfFormat::NQuads => "application/n-quads",
            RdfFormat::Trig => "application/trig",
            RdfFormat::JsonLd => "application/ld+json",
            RdfFormat::NTriples => "application/n-triples",
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::N3 => "text/n3",
        }
    }

    /// Priority used when nothing is configured
    pub fn default_weight(&self) -> f32 {
        match self {
            RdfFormat::NQuads => 1.0,
            RdfFormat::Trig => 0.95,
            RdfFormat::JsonLd => 0.9,
            RdfFormat::NTriples => 0.8,
            RdfFormat::Turtle => 0.6,
            RdfFormat::N3 => 0.35,
        }
    }

    /// Whether the format can express named graphs
    pub fn supports_named_graphs(&self) -> bool {
        matches!(self, RdfFormat::NQuads | RdfFormat::Trig | RdfFormat::JsonLd)
    }

    /// Look up a format by media type (parameters and case are ignored)
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let range = MediaRange::parse(content_type).ok()?;
        Self::ALL
            .into_iter()
            .find(|format| format.content_type() == range.to_string())
    }

    fn writer(self, quads: QuadStream) -> ByteStream {
        match self {
            RdfFormat::JsonLd => jsonld::serialize(quads),
            line_format => byte_stream(quads.map(move |quad| -> Result<Bytes> {
                let quad = quad?;
                let statement = ntriples::write_statement(line_format, &quad)?;
                Ok(Bytes::from(statement))
            })),
        }
    }
}

#[derive(Debug, Clone)]
struct FormatEntry {
    format: RdfFormat,
    weight: f32,
    enabled: bool,
}

/// Built-in registry of streaming RDF writers.
pub struct RdfSerializerRegistry {
    formats: RwLock<Vec<FormatEntry>>,
}

impl RdfSerializerRegistry {
    /// Registry with every format enabled at its default weight
    pub fn new() -> Self {
        let formats = RdfFormat::ALL
            .into_iter()
            .map(|format| FormatEntry {
                format,
                weight: format.default_weight(),
                enabled: true,
            })
            .collect();

        Self {
            formats: RwLock::new(formats),
        }
    }

    /// Registry from configuration; listed formats come first, in order.
    ///
    /// Formats missing from the configuration keep their defaults.
    pub fn from_config(config: &SerializerConfig) -> Result<Self> {
        config.validate()?;

        let mut formats: Vec<FormatEntry> = config
            .formats
            .iter()
            .map(|entry| FormatEntry {
                format: entry.format,
                weight: entry.weight.unwrap_or_else(|| entry.format.default_weight()),
                enabled: entry.enabled,
            })
            .collect();

        for format in RdfFormat::ALL {
            if !formats.iter().any(|entry| entry.format == format) {
                formats.push(FormatEntry {
                    format,
                    weight: format.default_weight(),
                    enabled: true,
                });
            }
        }

        tracing::debug!(
            "Serializer registry configured with {} enabled format(s)",
            formats.iter().filter(|entry| entry.enabled).count()
        );

        Ok(Self {
            formats: RwLock::new(formats),
        })
    }

    /// Change the priority of a format
    pub fn set_weight(&self, format: RdfFormat, weight: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(Error::ConfigError(format!(
                "weight {} for {} is outside [0, 1]",
                weight,
                format.content_type()
            )));
        }

        let mut formats = self.formats.write();
        if let Some(entry) = formats.iter_mut().find(|entry| entry.format == format) {
            entry.weight = weight;
        }
        Ok(())
    }

    /// Enable or disable a format
    pub fn set_enabled(&self, format: RdfFormat, enabled: bool) {
        let mut formats = self.formats.write();
        if let Some(entry) = formats.iter_mut().find(|entry| entry.format == format) {
            entry.enabled = enabled;
        }
    }

    fn enabled_types(&self) -> Vec<String> {
        self.formats
            .read()
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| entry.format.content_type().to_string())
            .collect()
    }

    fn is_available(&self, format: RdfFormat) -> bool {
        self.formats
            .read()
            .iter()
            .any(|entry| entry.format == format && entry.enabled && entry.weight > 0.0)
    }
}

impl Default for RdfSerializerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SerializerRegistry for RdfSerializerRegistry {
    async fn content_types(&self) -> Result<MediaTypeWeights> {
        let formats = self.formats.read().clone();

        let mut weights = MediaTypeWeights::new();
        for entry in formats.iter().filter(|entry| entry.enabled && entry.weight > 0.0) {
            weights.insert(MediaTypeWeight::new(
                entry.format.content_type(),
                entry.weight,
            )?)?;
        }
        Ok(weights)
    }

    async fn serialize(&self, quads: QuadStream, content_type: &str) -> Result<ByteStream> {
        let format = RdfFormat::from_content_type(content_type)
            .filter(|format| self.is_available(*format))
            .ok_or_else(|| Error::NotAcceptable {
                requested: vec![content_type.to_string()],
                supported: self.enabled_types(),
            })?;

        tracing::trace!("Serializing quads as {}", format.content_type());
        Ok(format.writer(quads))
    }
}
