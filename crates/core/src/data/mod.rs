//! Data structures flowing through converters
//!
//! This module contains the representation model shared by all converters:
//! - Quad / Term: structured RDF payload items
//! - Representation: metadata plus a lazy, single-pass payload stream
//! - RepresentationPreferences: what a requester accepts as output
//! - ResourceIdentifier: the resource a conversion is performed for

pub mod quad;
pub mod representation;

pub use quad::{GraphName, Quad, Term, RDF_LANG_STRING, XSD_STRING};
pub use representation::{
    byte_stream, quad_stream, ByteStream, DataType, QuadStream, Representation,
    RepresentationData, RepresentationMetadata, RepresentationPreferences, ResourceIdentifier,
    CONTENT_TYPE_QUADS,
};
