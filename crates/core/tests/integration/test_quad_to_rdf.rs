//! Integration tests for the quad-to-RDF converter
//!
//! Covers the check-then-convert lifecycle end to end: negotiation against
//! the built-in registry, serialized output per format, and failure surfacing.

use bytes::Bytes;
use futures::{stream, StreamExt, TryStreamExt};
use represent_core::config::ConversionConfig;
use represent_core::conversion::{ConversionRequest, QuadToRdfConverter, RepresentationConverter};
use represent_core::data::{
    byte_stream, quad_stream, DataType, GraphName, Quad, Representation, RepresentationMetadata,
    RepresentationPreferences, ResourceIdentifier, Term, CONTENT_TYPE_QUADS,
};
use represent_core::serialize::{RdfFormat, RdfSerializerRegistry};
use represent_core::Error;
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

const RESOURCE: &str = "http://example.com/people/alice";

fn alice() -> Vec<Quad> {
    vec![
        Quad::new(
            Term::named(RESOURCE),
            Term::named("http://xmlns.com/foaf/0.1/name"),
            Term::lang_literal("Alice", "en"),
        ),
        Quad::new(
            Term::named(RESOURCE),
            Term::named("http://xmlns.com/foaf/0.1/knows"),
            Term::blank("bob"),
        ),
    ]
}

fn request(quads: Vec<Quad>, prefs: &[(&str, f32)]) -> ConversionRequest {
    ConversionRequest::new(
        ResourceIdentifier::new(RESOURCE),
        Representation::from_quads(quads),
        RepresentationPreferences::from_pairs(prefs.iter().copied()).expect("valid preferences"),
    )
}

async fn read_body(representation: Representation) -> Result<String, Error> {
    let chunks: Vec<Bytes> = representation.into_binary()?.try_collect().await?;
    Ok(String::from_utf8(chunks.concat()).expect("utf-8 output"))
}

#[tokio::test]
async fn test_turtle_requested_from_weighted_outputs() {
    // Turtle is the only overlap, even though JSON-LD has a higher weight
    let registry = Arc::new(RdfSerializerRegistry::new());
    registry.set_weight(RdfFormat::Turtle, 0.8).unwrap();
    registry.set_weight(RdfFormat::JsonLd, 1.0).unwrap();
    let converter = QuadToRdfConverter::with_registry(registry);

    let req = request(alice(), &[("text/turtle", 1.0)]);
    assert_ok!(converter.can_handle(&req).await);

    let result = assert_ok!(converter.convert(req).await);
    assert_eq!(result.data_type(), DataType::Binary);
    assert_eq!(result.content_type(), Some("text/turtle"));

    let body = read_body(result).await.unwrap();
    assert_eq!(
        body,
        "<http://example.com/people/alice> <http://xmlns.com/foaf/0.1/name> \"Alice\"@en .\n\
         <http://example.com/people/alice> <http://xmlns.com/foaf/0.1/knows> _:bob .\n"
    );
}

#[tokio::test]
async fn test_preference_weights_pick_format() {
    let registry = Arc::new(RdfSerializerRegistry::new());
    registry.set_weight(RdfFormat::Turtle, 1.0).unwrap();
    registry.set_weight(RdfFormat::JsonLd, 1.0).unwrap();
    let converter = QuadToRdfConverter::with_registry(registry);

    let req = request(
        alice(),
        &[("application/ld+json", 0.5), ("text/turtle", 0.9)],
    );
    let result = converter.handle_safe(req).await.unwrap();
    assert_eq!(result.content_type(), Some("text/turtle"));
}

#[tokio::test]
async fn test_json_ld_output_is_valid_json() {
    let converter = QuadToRdfConverter::new();
    let req = request(alice(), &[("application/ld+json", 1.0)]);

    let result = converter.handle_safe(req).await.unwrap();
    assert_eq!(result.content_type(), Some("application/ld+json"));

    let body = read_body(result).await.unwrap();
    let doc: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(doc.as_array().map(Vec::len), Some(2));
    assert_eq!(doc[1]["http://xmlns.com/foaf/0.1/knows"][0]["@id"], "_:bob");
}

#[tokio::test]
async fn test_wildcard_preference_takes_registry_favourite() {
    let converter = QuadToRdfConverter::new();
    let result = converter
        .handle_safe(request(alice(), &[("*/*", 1.0)]))
        .await
        .unwrap();
    assert_eq!(result.content_type(), Some("application/n-quads"));

    let result = converter
        .handle_safe(request(alice(), &[("text/*", 1.0)]))
        .await
        .unwrap();
    assert_eq!(result.content_type(), Some("text/turtle"));
}

#[tokio::test]
async fn test_unsupported_input_type() {
    let converter = QuadToRdfConverter::new();
    let html = ConversionRequest::new(
        ResourceIdentifier::new(RESOURCE),
        Representation::binary(
            RepresentationMetadata::with_content_type("text/html"),
            byte_stream(stream::iter(vec![Ok(Bytes::from_static(b"<html/>"))])),
        ),
        RepresentationPreferences::from_pairs([("text/turtle", 1.0)]).unwrap(),
    );

    let err = assert_err!(converter.can_handle(&html).await);
    assert!(err.is_recoverable());
    match err {
        Error::UnsupportedMediaType { content_type, supported } => {
            assert_eq!(content_type, "text/html");
            assert_eq!(supported, vec![CONTENT_TYPE_QUADS]);
        }
        other => panic!("expected UnsupportedMediaType, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_acceptable_output() {
    let converter = QuadToRdfConverter::new();
    let req = request(alice(), &[("application/xml", 1.0)]);

    let err = assert_err!(converter.can_handle(&req).await);
    assert!(matches!(err, Error::NotAcceptable { .. }));

    // convert without a successful check fails the same way
    let err = assert_err!(converter.convert(req).await);
    assert!(matches!(err, Error::NotAcceptable { .. }));
}

#[tokio::test]
async fn test_named_graph_in_triple_format_fails_while_reading() {
    let converter = QuadToRdfConverter::new();
    let mut quads = alice();
    quads.push(
        Quad::new(
            Term::named(RESOURCE),
            Term::named("http://xmlns.com/foaf/0.1/age"),
            Term::typed_literal("42", "http://www.w3.org/2001/XMLSchema#integer"),
        )
        .in_graph(GraphName::NamedNode {
            iri: "http://example.com/graphs/private".to_string(),
        }),
    );

    let result = converter
        .handle_safe(request(quads, &[("text/turtle", 1.0)]))
        .await
        .unwrap();

    let mut output = result.into_binary().unwrap();
    assert!(output.next().await.unwrap().is_ok());
    assert!(output.next().await.unwrap().is_ok());
    match output.next().await {
        Some(Err(Error::ConversionFailure { identifier, reason })) => {
            assert_eq!(identifier, RESOURCE);
            assert!(reason.contains("named graph"));
        }
        other => panic!("expected ConversionFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upstream_errors_are_wrapped() {
    let converter = QuadToRdfConverter::new();
    let upstream = quad_stream(stream::iter(vec![
        Ok(alice().remove(0)),
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "source closed",
        ))),
    ]));
    let req = ConversionRequest::new(
        ResourceIdentifier::new(RESOURCE),
        Representation::quads(
            RepresentationMetadata::with_content_type(CONTENT_TYPE_QUADS),
            upstream,
        ),
        RepresentationPreferences::from_pairs([("application/n-quads", 1.0)]).unwrap(),
    );

    let result = converter.handle_safe(req).await.unwrap();
    let err = read_body(result).await.unwrap_err();
    assert!(matches!(err, Error::ConversionFailure { .. }));
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_configured_registry() {
    let config = ConversionConfig::from_toml_str(
        r#"
        [[serializers.formats]]
        format = "turtle"
        weight = 1.0

        [[serializers.formats]]
        format = "n-quads"
        enabled = false
        "#,
    )
    .unwrap();
    let registry = RdfSerializerRegistry::from_config(&config.serializers).unwrap();
    let converter = QuadToRdfConverter::with_registry(Arc::new(registry));

    let outputs = converter.output_types().await.unwrap();
    assert_eq!(outputs.media_types()[0], "text/turtle");
    assert_eq!(outputs.get("application/n-quads"), 0.0);

    let result = converter
        .handle_safe(request(alice(), &[("*/*", 1.0)]))
        .await
        .unwrap();
    assert_eq!(result.content_type(), Some("text/turtle"));
}

async fn convert_one(
    converter: &QuadToRdfConverter,
    content_type: &str,
) -> Result<(Option<String>, String), Error> {
    let result = converter
        .handle_safe(request(alice(), &[(content_type, 1.0)]))
        .await?;
    let chosen = result.content_type().map(str::to_string);
    Ok((chosen, read_body(result).await?))
}

#[tokio::test]
async fn test_concurrent_conversions_share_converter() {
    let converter = Arc::new(QuadToRdfConverter::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let converter = converter.clone();
            let content_type = if i % 2 == 0 {
                "application/n-triples"
            } else {
                "application/trig"
            };
            tokio::spawn(async move { convert_one(&converter, content_type).await })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (content_type, body) = handle.await.unwrap().unwrap();
        let expected = if i % 2 == 0 { "application/n-triples" } else { "application/trig" };
        assert_eq!(content_type.as_deref(), Some(expected));
        assert_eq!(body.lines().count(), 2);
    }
}

#[tokio::test]
async fn test_unwritable_terms_fail_instead_of_corrupting_output() {
    let converter = QuadToRdfConverter::new();
    let injected = vec![
        Quad::new(
            Term::named(RESOURCE),
            Term::named("http://xmlns.com/foaf/0.1/name"),
            Term::lang_literal("Alice", "en us\" ."),
        ),
        Quad::new(
            Term::blank("a b"),
            Term::named("http://xmlns.com/foaf/0.1/knows"),
            Term::named(RESOURCE),
        ),
    ];

    for quad in injected {
        for content_type in ["application/n-triples", "application/n-quads", "application/ld+json"] {
            let result = converter
                .handle_safe(request(vec![quad.clone()], &[(content_type, 1.0)]))
                .await
                .unwrap();
            let err = read_body(result).await.unwrap_err();
            assert!(
                matches!(err, Error::ConversionFailure { .. }),
                "{} accepted {:?}",
                content_type,
                quad
            );
        }
    }
}
