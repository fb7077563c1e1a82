//! RDF terms and quads
//!
//! The structured payload of a quad representation. Terms carry just enough
//! information for serializers; no IRI validation happens here.

use serde::{Deserialize, Serialize};

/// `xsd:string`, the implicit datatype of plain literals.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// `rdf:langString`, the datatype of language-tagged literals.
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "termType", rename_all = "camelCase")]
pub enum Term {
    /// IRI reference
    NamedNode {
        /// Absolute IRI
        iri: String,
    },
    /// Blank node
    BlankNode {
        /// Local identifier (without the `_:` prefix)
        id: String,
    },
    /// Literal value
    Literal {
        /// Lexical form
        value: String,
        /// Language tag, if language-tagged
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        /// Datatype IRI; `None` means `xsd:string`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
    },
}

impl Term {
    /// Create a named node.
    pub fn named(iri: impl Into<String>) -> Self {
        Term::NamedNode { iri: iri.into() }
    }

    /// Create a blank node.
    pub fn blank(id: impl Into<String>) -> Self {
        Term::BlankNode { id: id.into() }
    }

    /// Create a plain string literal.
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// Create a language-tagged literal.
    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// Create a typed literal.
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    /// Whether this term is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }
}

/// Graph a quad belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "termType", rename_all = "camelCase")]
pub enum GraphName {
    /// The default graph
    #[default]
    DefaultGraph,
    /// A graph named by an IRI
    NamedNode {
        /// Graph IRI
        iri: String,
    },
    /// A graph named by a blank node
    BlankNode {
        /// Local identifier
        id: String,
    },
}

impl GraphName {
    /// Whether this is the default graph.
    pub fn is_default(&self) -> bool {
        matches!(self, GraphName::DefaultGraph)
    }

    /// The graph name as a term, `None` for the default graph.
    pub fn as_term(&self) -> Option<Term> {
        match self {
            GraphName::DefaultGraph => None,
            GraphName::NamedNode { iri } => Some(Term::named(iri.clone())),
            GraphName::BlankNode { id } => Some(Term::blank(id.clone())),
        }
    }
}

/// A single RDF statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quad {
    /// Subject (named or blank node)
    pub subject: Term,
    /// Predicate (named node)
    pub predicate: Term,
    /// Object (any term)
    pub object: Term,
    /// Graph
    #[serde(default)]
    pub graph: GraphName,
}

impl Quad {
    /// Create a quad in the default graph.
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph: GraphName::DefaultGraph,
        }
    }

    /// Builder: place the quad in a graph
    pub fn in_graph(mut self, graph: GraphName) -> Self {
        self.graph = graph;
        self
    }
}
