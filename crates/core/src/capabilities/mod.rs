//! Media type capabilities and negotiation
//!
//! Converters declare the media types they accept and produce as weighted
//! lists. A requester states its preferences the same way, and negotiation
//! picks the type both sides like best.
//!
//! # Features
//!
//! - **Media ranges**: `type/subtype` with `type/*` and `*/*` wildcards
//! - **Weighted lists**: ordered, duplicate-free `type → weight` mappings
//! - **Negotiation**: multiplicative scoring with most-specific-range precedence
//! - **Validation**: input/output checks used by converters before converting
//!
//! # Example
//!
//! ```
//! use represent_core::capabilities::{best_match, MediaTypeWeights};
//!
//! let preferences = MediaTypeWeights::from_pairs([
//!     ("application/ld+json", 0.5),
//!     ("text/turtle", 0.9),
//! ]).unwrap();
//! let supported = MediaTypeWeights::from_pairs([
//!     ("text/turtle", 1.0),
//!     ("application/ld+json", 1.0),
//! ]).unwrap();
//!
//! let winner = best_match(&preferences, &supported).unwrap();
//! assert_eq!(winner.media_type, "text/turtle");
//! ```

// Media type parsing and matching
pub mod media_range;

// Weighted media type lists
pub mod weights;

// Negotiation algorithm
pub mod negotiation;

// Conversion request checks
pub mod validation;

pub use media_range::{matching_media_type, MediaRange, WILDCARD};
pub use negotiation::{best_match, negotiate, NoMatch, TypeMatch};
pub use validation::{validate_conversion, validate_input_type};
pub use weights::{MediaTypeWeight, MediaTypeWeights};
