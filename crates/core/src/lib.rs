//! Represent Core - Representation conversion with content negotiation
//!
//! This crate converts resource representations between media types. A
//! converter declares the types it accepts and produces; requesters state
//! weighted preferences; negotiation picks the output type both sides like
//! best, and the payload is converted lazily as it is read.
//!
//! # Architecture
//!
//! - [`capabilities`]: media ranges, weighted type lists and negotiation
//! - [`data`]: quads, representations and preferences
//! - [`conversion`]: the [`RepresentationConverter`](conversion::RepresentationConverter)
//!   contract, the quad-to-RDF converter and converter chains
//! - [`serialize`]: the serializer registry seam and built-in RDF writers
//! - [`config`]: TOML/YAML/JSON configuration of the built-in writers
//!
//! # Example
//!
//! ```ignore
//! use represent_core::conversion::{ConversionRequest, QuadToRdfConverter, RepresentationConverter};
//! use represent_core::data::{Representation, RepresentationPreferences, ResourceIdentifier};
//!
//! #[tokio::main]
//! async fn main() -> represent_core::Result<()> {
//!     represent_core::init()?;
//!
//!     let request = ConversionRequest::new(
//!         ResourceIdentifier::new("http://example.com/alice"),
//!         Representation::from_quads(load_quads()),
//!         RepresentationPreferences::from_pairs([("text/turtle", 1.0)])?,
//!     );
//!
//!     let converter = QuadToRdfConverter::default();
//!     let turtle = converter.handle_safe(request).await?;
//!     println!("{:?}", turtle.content_type());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capabilities;
pub mod config;
pub mod conversion;
pub mod data;
pub mod serialize;

mod error;

pub use error::{Error, Result};

/// Initialize logging for the conversion library
///
/// Installs a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
/// Call once at startup; later calls fail with [`Error::ConfigError`].
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| Error::ConfigError(format!("Logging already initialized: {}", e)))?;

    tracing::info!("Represent core initialized");
    Ok(())
}
