//! An in-memory [`ContentGraph`] over a directory of markdown posts.

use crate::markdown;
use crate::post::{Error as PostError, Post};
use crate::query::{ContentGraph, Document, Query, QueryData, QueryError, SiteMetadata};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const MARKDOWN_EXTENSION: &str = "md";

/// Site metadata plus every post found under a content directory, ordered
/// newest first.
pub struct MarkdownGraph {
    site: SiteMetadata,
    posts: Vec<Post>,
}

impl MarkdownGraph {
    /// Builds a graph directly from already-parsed posts.
    pub fn new(site: SiteMetadata, mut posts: Vec<Post>) -> MarkdownGraph {
        posts.sort_by(|a, b| b.published.cmp(&a.published));
        MarkdownGraph { site, posts }
    }

    /// Walks `content_directory` recursively and parses every `.md` file in
    /// it.
    pub fn load(site: SiteMetadata, content_directory: &Path) -> Result<MarkdownGraph> {
        let root = fs::canonicalize(content_directory).map_err(|err| Error::Open {
            path: content_directory.to_owned(),
            err,
        })?;

        let mut posts = Vec::new();
        for result in WalkDir::new(&root).sort_by(|a, b| a.file_name().cmp(b.file_name())) {
            let entry = result?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().map_or(true, |ext| ext != MARKDOWN_EXTENSION)
            {
                continue;
            }
            posts.push(load_post(&root, path)?);
        }

        debug!(
            directory = %root.display(),
            posts = posts.len(),
            "loaded content graph"
        );
        Ok(MarkdownGraph::new(site, posts))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }
}

fn load_post(root: &Path, path: &Path) -> Result<Post> {
    // `path` comes out of a walk rooted at `root`
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    let id = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let contents = fs::read_to_string(path).map_err(|err| Error::Open {
        path: path.to_owned(),
        err,
    })?;
    Post::from_str(&id, path, &contents).map_err(|err| Error::Post {
        path: path.to_owned(),
        err,
    })
}

impl ContentGraph for MarkdownGraph {
    fn query(&self, query: &Query) -> std::result::Result<QueryData, Vec<QueryError>> {
        let mut errors = Vec::new();
        let pattern = match Regex::new(&query.pattern) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                errors.push(QueryError::new(format!(
                    "invalid regex `{}`: {}",
                    query.pattern, err
                )));
                None
            }
        };
        if query.limit < 1 {
            errors.push(QueryError::new(format!(
                "limit must be a positive integer, got {}",
                query.limit
            )));
        }
        let pattern = match pattern {
            Some(pattern) if errors.is_empty() => pattern,
            _ => return Err(errors),
        };

        let documents = self
            .posts
            .iter()
            .filter(|post| pattern.is_match(&post.source_path.to_string_lossy()))
            .take(query.limit)
            .map(|post| Document {
                id: post.id.clone(),
                excerpt: markdown::excerpt(&post.body, query.excerpt_length),
                title: post.title.clone(),
                date: post.date.clone(),
                url: post.url.clone(),
            })
            .collect();

        Ok(QueryData {
            site: self.site.clone(),
            documents,
        })
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading the content graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when walking the content directory fails.
    #[error("walking content directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Returned when a path can't be opened or read.
    #[error("opening '{}': {err}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when a post can't be parsed.
    #[error("parsing post '{}': {err}", path.display())]
    Post {
        path: PathBuf,
        #[source]
        err: PostError,
    },
}
