//! The library code for `sitefeed`, which turns a static site's published
//! articles into Atom, RSS 2.0 and JSON feeds once the host site generator has
//! finished compiling content. The work happens in a single pass per
//! configured feed:
//!
//! 1. Resolving plugin options against defaults ([`crate::options`])
//! 2. Querying the content graph for matching documents ([`crate::query`])
//! 3. Building a format-neutral feed from the results ([`crate::build`],
//!    [`crate::feed`])
//! 4. Encoding the feed three ways and writing the files ([`crate::write`])
//!
//! The host hands over its content graph through the
//! [`query::ContentGraph`] trait. [`graph::MarkdownGraph`] is a ready-made
//! graph over a directory of markdown posts, which the `sitefeed` binary uses
//! together with a project file ([`crate::config`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod date;
pub mod feed;
pub mod graph;
pub mod markdown;
pub mod options;
pub mod post;
pub mod query;
pub mod util;
pub mod write;

pub use build::{build_feed, generate_feed, on_post_build};
pub use options::{FeedOptions, PluginOptions, ResolvedOptions};
pub use query::{ContentGraph, Document, Query, QueryData, QueryError, SiteMetadata};
