//! Defines the seam between feed generation and the host's content graph:
//! the [`Query`] that is issued, the [`QueryData`] that comes back, and the
//! [`ContentGraph`] trait that answers queries.

use serde::Deserialize;
use std::fmt;

/// The length to which document excerpts are pruned.
pub const EXCERPT_LENGTH: usize = 280;

/// A request for site metadata plus the documents whose source file path
/// matches `pattern`, newest first, capped at `limit`.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    /// A regular expression matched against each document's absolute source
    /// file path.
    pub pattern: String,

    /// The maximum number of documents to return. Must be positive.
    pub limit: usize,

    /// The number of characters to which each excerpt is pruned.
    pub excerpt_length: usize,
}

impl Query {
    pub fn new(pattern: &str, limit: usize) -> Query {
        Query {
            pattern: pattern.to_owned(),
            limit,
            excerpt_length: EXCERPT_LENGTH,
        }
    }
}

impl fmt::Display for Query {
    /// Renders the query in the content graph's textual form, mostly for
    /// logging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ site {{ title description siteUrl author {{ name }} }} \
             documents(filter: {{ path: {{ regex: {:?} }} }}, sort: {{ date: DESC }}, limit: {}) \
             {{ id excerpt(pruneLength: {}) title date url }} }}",
            self.pattern, self.limit, self.excerpt_length
        )
    }
}

/// The site author as exposed by the content graph.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Author {
    pub name: String,
}

/// Site-wide metadata. Owned by the host; read-only here.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SiteMetadata {
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// The absolute URL of the site, without a trailing slash. Document URLs
    /// are appended to it verbatim.
    pub site_url: String,

    pub author: Author,
}

/// A published article matched by a [`Query`].
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,

    /// Plain-text summary, already pruned to the query's excerpt length.
    pub excerpt: String,

    pub title: String,

    /// The publish date as written by the author; see [`crate::date::parse`].
    pub date: String,

    /// The document's URL relative to the site root, e.g. `/blog/hello/`.
    pub url: String,
}

/// The successful result of a [`Query`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryData {
    pub site: SiteMetadata,

    /// Matched documents, newest first, at most `limit` of them.
    pub documents: Vec<Document>,
}

/// A single problem reported by the content graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryError {
    pub message: String,
}

impl QueryError {
    pub fn new<S: Into<String>>(message: S) -> QueryError {
        QueryError {
            message: message.into(),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.message.fmt(f)
    }
}

impl std::error::Error for QueryError {}

/// Anything that can answer a [`Query`]. Errors come back as a list, since
/// the graph may report several problems for one query.
pub trait ContentGraph {
    fn query(&self, query: &Query) -> Result<QueryData, Vec<QueryError>>;
}

impl<G: ContentGraph + ?Sized> ContentGraph for &G {
    fn query(&self, query: &Query) -> Result<QueryData, Vec<QueryError>> {
        (**self).query(query)
    }
}
