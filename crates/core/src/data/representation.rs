//! Representations: metadata plus a lazily produced payload
//!
//! A [`Representation`] is consumed by value, so its single-pass payload
//! stream can only be read once. Dropping it (or a stream taken out of it)
//! releases whatever produces the data.

use std::collections::BTreeMap;
use std::fmt;
use std::pin::Pin;

use bytes::Bytes;
use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};

use super::quad::Quad;
use crate::capabilities::MediaTypeWeights;
use crate::error::{Error, Result};

/// Internal content type of quad payloads.
pub const CONTENT_TYPE_QUADS: &str = "internal/quads";

/// Lazy, single-pass stream of quads.
///
/// `Sync` so a request holding one can be borrowed across `.await` points.
pub type QuadStream = Pin<Box<dyn Stream<Item = Result<Quad>> + Send + Sync>>;

/// Lazy, single-pass stream of serialized bytes.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send + Sync>>;

/// Box a stream of quads
pub fn quad_stream<S>(stream: S) -> QuadStream
where
    S: Stream<Item = Result<Quad>> + Send + Sync + 'static,
{
    Box::pin(stream)
}

/// Box a stream of bytes
pub fn byte_stream<S>(stream: S) -> ByteStream
where
    S: Stream<Item = Result<Bytes>> + Send + Sync + 'static,
{
    Box::pin(stream)
}

/// Kind of payload a representation carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Structured quads
    Quads,
    /// Raw bytes in some serialization
    Binary,
}

impl DataType {
    /// Tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Quads => "quads",
            DataType::Binary => "binary",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a representation.
pub enum RepresentationData {
    /// Structured quads
    Quads(QuadStream),
    /// Serialized bytes
    Binary(ByteStream),
}

impl RepresentationData {
    /// Tag derived from the payload variant
    pub fn data_type(&self) -> DataType {
        match self {
            RepresentationData::Quads(_) => DataType::Quads,
            RepresentationData::Binary(_) => DataType::Binary,
        }
    }
}

impl fmt::Debug for RepresentationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RepresentationData::{}", self.data_type())
    }
}

/// Descriptive metadata of a representation.
///
/// Besides the content type it carries arbitrary fields, which converters
/// copy over unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepresentationMetadata {
    /// Media type of the payload
    #[serde(
        default,
        rename = "contentType",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,

    /// Other descriptive fields
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RepresentationMetadata {
    /// Metadata with only a content type
    pub fn with_content_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            extra: BTreeMap::new(),
        }
    }

    /// Builder: add a descriptive field
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Content type, if set
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Copy of this metadata with the content type replaced
    pub fn replace_content_type(&self, content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            extra: self.extra.clone(),
        }
    }
}

/// A payload with its metadata.
#[derive(Debug)]
pub struct Representation {
    /// Descriptive metadata
    pub metadata: RepresentationMetadata,
    /// Single-pass payload
    pub data: RepresentationData,
}

impl Representation {
    /// Quad representation
    pub fn quads(metadata: RepresentationMetadata, quads: QuadStream) -> Self {
        Self {
            metadata,
            data: RepresentationData::Quads(quads),
        }
    }

    /// Quad representation over an in-memory list, tagged `internal/quads`
    pub fn from_quads(quads: Vec<Quad>) -> Self {
        Self::quads(
            RepresentationMetadata::with_content_type(CONTENT_TYPE_QUADS),
            quad_stream(stream::iter(quads.into_iter().map(Ok))),
        )
    }

    /// Binary representation
    pub fn binary(metadata: RepresentationMetadata, bytes: ByteStream) -> Self {
        Self {
            metadata,
            data: RepresentationData::Binary(bytes),
        }
    }

    /// Payload kind
    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    /// Declared content type
    pub fn content_type(&self) -> Option<&str> {
        self.metadata.content_type()
    }

    /// Take the quad stream out, failing for binary payloads
    pub fn into_quads(self) -> Result<QuadStream> {
        match self.data {
            RepresentationData::Quads(quads) => Ok(quads),
            RepresentationData::Binary(_) => Err(Error::UnsupportedMediaType {
                content_type: self.metadata.content_type.unwrap_or_default(),
                supported: vec![CONTENT_TYPE_QUADS.to_string()],
            }),
        }
    }

    /// Take the byte stream out, failing for quad payloads
    pub fn into_binary(self) -> Result<ByteStream> {
        match self.data {
            RepresentationData::Binary(bytes) => Ok(bytes),
            RepresentationData::Quads(_) => Err(Error::UnsupportedMediaType {
                content_type: self
                    .metadata
                    .content_type
                    .unwrap_or_else(|| CONTENT_TYPE_QUADS.to_string()),
                supported: vec![DataType::Binary.to_string()],
            }),
        }
    }
}

/// What a requester is willing to accept for the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepresentationPreferences {
    /// Weighted output content types
    #[serde(default, rename = "type")]
    pub content_type: MediaTypeWeights,
}

impl RepresentationPreferences {
    /// Preferences over output content types
    pub fn new(content_type: MediaTypeWeights) -> Self {
        Self { content_type }
    }

    /// Build from `(media type, weight)` pairs
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f32)>,
        S: AsRef<str>,
    {
        Ok(Self::new(MediaTypeWeights::from_pairs(pairs)?))
    }
}

/// Identifier of the resource a representation belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Resource path or IRI
    pub path: String,
}

impl ResourceIdentifier {
    /// Create an identifier
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
