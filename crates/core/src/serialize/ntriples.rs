//! Line-based writers: N-Quads, N-Triples, Turtle, N3 and TriG
//!
//! Every quad becomes one self-contained statement. N-Triples statements are
//! valid Turtle and N3, so the triple formats share one writer; TriG wraps
//! named-graph statements in a `graph { ... }` block.

use std::fmt::Write;

use super::RdfFormat;
use crate::data::{Quad, Term, RDF_LANG_STRING, XSD_STRING};
use crate::error::{Error, Result};

/// Reject quads no RDF syntax can express.
///
/// Checks term positions, blank node labels, language tags and
/// `rdf:langString` literals without a language, so every writer accepts
/// and rejects the same quads.
pub(crate) fn check_positions(quad: &Quad) -> Result<()> {
    if quad.subject.is_literal() {
        return Err(Error::Serialization(
            "literal in subject position".to_string(),
        ));
    }
    if !matches!(quad.predicate, Term::NamedNode { .. }) {
        return Err(Error::Serialization(
            "predicate must be a named node".to_string(),
        ));
    }

    check_term(&quad.subject)?;
    check_term(&quad.object)?;
    if let Some(graph) = quad.graph.as_term() {
        check_term(&graph)?;
    }
    Ok(())
}

fn check_term(term: &Term) -> Result<()> {
    match term {
        Term::NamedNode { .. } => Ok(()),
        Term::BlankNode { id } if is_blank_label(id) => Ok(()),
        Term::BlankNode { id } => Err(Error::Serialization(format!(
            "invalid blank node label '{}'",
            id
        ))),
        Term::Literal {
            language: Some(language),
            ..
        } if !is_language_tag(language) => Err(Error::Serialization(format!(
            "invalid language tag '{}'",
            language
        ))),
        Term::Literal {
            language: None,
            datatype: Some(datatype),
            ..
        } if datatype == RDF_LANG_STRING => Err(Error::Serialization(
            "rdf:langString literal without a language tag".to_string(),
        )),
        Term::Literal { .. } => Ok(()),
    }
}

/// `[a-zA-Z]+ ('-' [a-zA-Z0-9]+)*`
fn is_language_tag(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let primary_ok = subtags
        .next()
        .is_some_and(|primary| !primary.is_empty() && primary.chars().all(|c| c.is_ascii_alphabetic()));

    primary_ok
        && subtags.all(|subtag| !subtag.is_empty() && subtag.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// `(PN_CHARS_U | [0-9]) ((PN_CHARS | '.')* PN_CHARS)?`
fn is_blank_label(label: &str) -> bool {
    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(is_pn_chars_u(first) || first.is_ascii_digit()) {
        return false;
    }
    if label.ends_with('.') {
        return false;
    }
    chars.all(|c| is_pn_chars(c) || c == '.')
}

fn is_pn_chars_base(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_pn_chars_u(c: char) -> bool {
    is_pn_chars_base(c) || c == '_'
}

fn is_pn_chars(c: char) -> bool {
    is_pn_chars_u(c)
        || c == '-'
        || c.is_ascii_digit()
        || matches!(c, '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Render one quad as a statement in `format`.
pub(crate) fn write_statement(format: RdfFormat, quad: &Quad) -> Result<String> {
    check_positions(quad)?;

    let graph = quad.graph.as_term();
    if graph.is_some() && !format.supports_named_graphs() {
        return Err(Error::Serialization(format!(
            "{} cannot hold quads in a named graph",
            format.content_type()
        )));
    }

    let mut out = String::with_capacity(128);
    match (format, graph) {
        (_, None) => {
            write_triple(&mut out, quad);
            out.push_str(" .\n");
        }
        (RdfFormat::NQuads, Some(graph)) => {
            write_triple(&mut out, quad);
            out.push(' ');
            write_term(&mut out, &graph);
            out.push_str(" .\n");
        }
        (RdfFormat::Trig, Some(graph)) => {
            write_term(&mut out, &graph);
            out.push_str(" { ");
            write_triple(&mut out, quad);
            out.push_str(" . }\n");
        }
        (format, Some(_)) => {
            return Err(Error::Serialization(format!(
                "{} has no line syntax for named graphs",
                format.content_type()
            )));
        }
    }
    Ok(out)
}

fn write_triple(out: &mut String, quad: &Quad) {
    write_term(out, &quad.subject);
    out.push(' ');
    write_term(out, &quad.predicate);
    out.push(' ');
    write_term(out, &quad.object);
}

/// Append a term in N-Triples syntax.
pub(crate) fn write_term(out: &mut String, term: &Term) {
    match term {
        Term::NamedNode { iri } => write_iri(out, iri),
        Term::BlankNode { id } => {
            out.push_str("_:");
            out.push_str(id);
        }
        Term::Literal {
            value,
            language,
            datatype,
        } => {
            out.push('"');
            escape_string(out, value);
            out.push('"');
            if let Some(language) = language {
                out.push('@');
                out.push_str(language);
            } else if let Some(datatype) = datatype {
                if datatype != XSD_STRING {
                    out.push_str("^^");
                    write_iri(out, datatype);
                }
            }
        }
    }
}

fn write_iri(out: &mut String, iri: &str) {
    out.push('<');
    for c in iri.chars() {
        match c {
            '\u{0}'..='\u{20}' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('>');
}

fn escape_string(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
}
