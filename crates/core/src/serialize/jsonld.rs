//! Streaming JSON-LD writer
//!
//! Produces expanded-form JSON-LD: a top-level array holding one node object
//! per quad. Quads in a named graph are wrapped in `{"@id": g, "@graph": [..]}`.
//! Repeated subjects are legal in expanded form, so no grouping (and no
//! buffering) is needed.

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use serde_json::{json, Map, Value};

use super::ntriples::check_positions;
use crate::data::{byte_stream, ByteStream, Quad, QuadStream, Term, XSD_STRING};
use crate::error::{Error, Result};

/// Serialize a quad stream as a JSON-LD document, one node object at a time.
pub(crate) fn serialize(quads: QuadStream) -> ByteStream {
    let open = stream::once(async { Ok::<_, Error>(Bytes::from_static(b"[")) });

    let body = quads.enumerate().map(|(index, quad)| -> Result<Bytes> {
        let quad = quad?;
        let mut buf = if index == 0 { b"\n".to_vec() } else { b",\n".to_vec() };
        serde_json::to_writer(&mut buf, &node_object(&quad)?)?;
        Ok(Bytes::from(buf))
    });

    let close = stream::once(async { Ok::<_, Error>(Bytes::from_static(b"\n]\n")) });

    byte_stream(open.chain(body).chain(close))
}

fn node_object(quad: &Quad) -> Result<Value> {
    check_positions(quad)?;

    let predicate = match &quad.predicate {
        Term::NamedNode { iri } => iri.clone(),
        _ => return Err(Error::Serialization("predicate must be a named node".to_string())),
    };

    let mut node = Map::new();
    node.insert("@id".to_string(), Value::String(node_id(&quad.subject)));
    node.insert(predicate, Value::Array(vec![object_value(&quad.object)]));

    Ok(match quad.graph.as_term() {
        None => Value::Object(node),
        Some(graph) => json!({
            "@id": node_id(&graph),
            "@graph": [Value::Object(node)],
        }),
    })
}

fn node_id(term: &Term) -> String {
    match term {
        Term::NamedNode { iri } => iri.clone(),
        Term::BlankNode { id } => format!("_:{}", id),
        // Positions are checked before this is reached
        Term::Literal { value, .. } => value.clone(),
    }
}

fn object_value(term: &Term) -> Value {
    match term {
        Term::Literal {
            value,
            language: Some(language),
            ..
        } => json!({ "@value": value, "@language": language }),
        Term::Literal {
            value,
            datatype: Some(datatype),
            ..
        } if datatype != XSD_STRING => json!({ "@value": value, "@type": datatype }),
        Term::Literal { value, .. } => json!({ "@value": value }),
        other => json!({ "@id": node_id(other) }),
    }
}
