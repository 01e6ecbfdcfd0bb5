//! Exports [`on_post_build`], which stitches together the steps of generating
//! feeds once the host has finished compiling content: resolving the plugin
//! options ([`crate::options`]), querying the content graph
//! ([`crate::query`]), building a [`Feed`] ([`build_feed`]), and writing it
//! out in every format ([`crate::write`]).

use crate::date;
use crate::feed::{Feed, FeedConfig, FeedLinks, Item, Person};
use crate::options::{Error as OptionsError, PluginOptions, ResolvedOptions};
use crate::query::{ContentGraph, Document, Query, QueryError, SiteMetadata};
use crate::write::{write_feed, Error as WriteError};
use chrono::{DateTime, Datelike, FixedOffset, Utc};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Generates every configured feed into `output_directory`. Feeds are
/// generated one after another; the first failure stops the run, leaving
/// files written for earlier feeds in place. Configuration errors are raised
/// before the content graph is queried at all.
pub fn on_post_build<G: ContentGraph>(
    graph: &G,
    plugin_options: &PluginOptions,
    output_directory: &Path,
) -> Result<()> {
    let feeds = plugin_options.resolve()?;
    info!(feeds = feeds.len(), "generating feeds");
    for options in &feeds {
        generate_feed(graph, options, output_directory)?;
    }
    Ok(())
}

/// Queries the content graph for one feed configuration, builds the feed and
/// writes its three encodings.
pub fn generate_feed<G: ContentGraph>(
    graph: &G,
    options: &ResolvedOptions,
    output_directory: &Path,
) -> Result<()> {
    let query = Query::new(&options.pattern, options.limit);
    info!(pattern = %options.pattern, limit = options.limit, "querying content graph");
    debug!(query = %query, "issuing query");

    let data = graph.query(&query).map_err(Error::Query)?;
    debug!(documents = data.documents.len(), "query returned");

    let now: DateTime<FixedOffset> = Utc::now().into();
    let feed = build_feed(&data.documents, &data.site, options, now)?;
    write_feed(&feed, &options.output, output_directory)?;
    Ok(())
}

/// Maps site metadata and matched documents into a [`Feed`]. `now` stamps the
/// feed's update time and the year in the default copyright.
pub fn build_feed(
    documents: &[Document],
    site: &SiteMetadata,
    options: &ResolvedOptions,
    now: DateTime<FixedOffset>,
) -> Result<Feed> {
    let overrides = &options.metadata;
    let author_name = overrides.author().unwrap_or(&site.author.name);
    let output = &options.output;

    let mut feed = Feed::new(FeedConfig {
        title: overrides.title().unwrap_or(&site.title).to_owned(),
        description: overrides
            .description()
            .unwrap_or(&site.description)
            .to_owned(),
        link: overrides.link().unwrap_or(&site.site_url).to_owned(),
        id: overrides.id().unwrap_or(&site.site_url).to_owned(),
        copyright: match overrides.copyright() {
            Some(copyright) => copyright.to_owned(),
            None => format!(
                "All rights reserved {}, {}",
                now.with_timezone(&Utc).year(),
                author_name
            ),
        },
        updated: now,
        feed_links: FeedLinks {
            atom: format!("{}/{}", site.site_url, output.atom),
            rss2: format!("{}/{}", site.site_url, output.rss2),
            json: format!("{}/{}", site.site_url, output.json),
        },
        author: Person {
            name: author_name.to_owned(),
            email: overrides.email.clone(),
            link: Some(site.site_url.clone()),
        },
    });

    for document in documents {
        let url = format!("{}{}", site.site_url, document.url);
        feed.add_item(Item {
            title: document.title.clone(),
            id: url.clone(),
            link: url,
            date: date::parse(&document.date).map_err(|err| Error::Date {
                document: document.id.clone(),
                date: document.date.clone(),
                err,
            })?,
            content: document.excerpt.clone(),
            authors: vec![Person {
                name: author_name.to_owned(),
                email: overrides.email.clone(),
                link: Some(overrides.link().unwrap_or(&site.site_url).to_owned()),
            }],
        });
    }

    // The contributor takes the email override as given, with no fallback
    // of its own.
    feed.add_contributor(Person {
        name: site.author.name.clone(),
        email: overrides.email.clone(),
        link: Some(site.site_url.clone()),
    });

    Ok(feed)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for generating feeds.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the plugin options are malformed. Nothing has been
    /// queried or written.
    #[error("configuration error: {0}")]
    Configuration(#[from] OptionsError),

    /// Returned when the content graph reports errors for a feed's query.
    #[error("query error: {}", QueryErrors(.0))]
    Query(Vec<QueryError>),

    /// Returned when a document's date can't be parsed.
    #[error("parsing date `{date}` of document `{document}`: {err}")]
    Date {
        document: String,
        date: String,
        #[source]
        err: chrono::ParseError,
    },

    /// Returned for errors encoding or writing the feed files.
    #[error(transparent)]
    Write(#[from] WriteError),
}

struct QueryErrors<'a>(&'a [QueryError]);

impl fmt::Display for QueryErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            err.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::options::FeedOptions;
    use crate::query::{Author, QueryData};
    use std::cell::RefCell;

    fn site() -> SiteMetadata {
        SiteMetadata {
            title: "Example".to_owned(),
            description: "An example site".to_owned(),
            site_url: "https://example.org".to_owned(),
            author: Author {
                name: "Jo".to_owned(),
            },
        }
    }

    fn document(id: &str, date: &str) -> Document {
        Document {
            id: id.to_owned(),
            excerpt: format!("Excerpt of {}.", id),
            title: format!("Title of {}", id),
            date: date.to_owned(),
            url: format!("/blog/{}/", id),
        }
    }

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2021-06-01T08:00:00+00:00").unwrap()
    }

    fn options(yaml: &str) -> ResolvedOptions {
        serde_yaml::from_str::<FeedOptions>(yaml).unwrap().resolve()
    }

    #[test]
    fn test_build_feed_defaults_from_site() -> Result<()> {
        let feed = build_feed(&[], &site(), &ResolvedOptions::default(), now())?;
        let config = &feed.config;
        assert_eq!("Example", config.title);
        assert_eq!("An example site", config.description);
        assert_eq!("https://example.org", config.link);
        assert_eq!("https://example.org", config.id);
        assert_eq!("All rights reserved 2021, Jo", config.copyright);
        assert_eq!(now(), config.updated);
        assert_eq!(
            FeedLinks {
                atom: "https://example.org/atom.xml".to_owned(),
                rss2: "https://example.org/rss.xml".to_owned(),
                json: "https://example.org/feed.json".to_owned(),
            },
            config.feed_links
        );
        assert_eq!(
            Person {
                name: "Jo".to_owned(),
                email: None,
                link: Some("https://example.org".to_owned()),
            },
            config.author
        );
        assert!(feed.items.is_empty());
        assert_eq!(
            vec![Person {
                name: "Jo".to_owned(),
                email: None,
                link: Some("https://example.org".to_owned()),
            }],
            feed.contributors
        );
        Ok(())
    }

    #[test]
    fn test_build_feed_applies_overrides() -> Result<()> {
        let options = options(
            r#"
title: Notes
description: Short notes
link: https://notes.example.org
id: urn:notes
author: Sam
email: sam@example.org
output:
  atom: notes.atom
"#,
        );
        let feed = build_feed(&[document("a", "2021-01-01")], &site(), &options, now())?;
        let config = &feed.config;
        assert_eq!("Notes", config.title);
        assert_eq!("Short notes", config.description);
        assert_eq!("https://notes.example.org", config.link);
        assert_eq!("urn:notes", config.id);
        assert_eq!("All rights reserved 2021, Sam", config.copyright);
        assert_eq!("https://example.org/notes.atom", config.feed_links.atom);
        assert_eq!("Sam", config.author.name);
        assert_eq!(Some("sam@example.org".to_owned()), config.author.email);
        // the feed author always links to the site
        assert_eq!(Some("https://example.org".to_owned()), config.author.link);

        let author = &feed.items[0].authors[0];
        assert_eq!("Sam", author.name);
        assert_eq!(Some("sam@example.org".to_owned()), author.email);
        assert_eq!(Some("https://notes.example.org".to_owned()), author.link);

        // the contributor is always the site author
        assert_eq!("Jo", feed.contributors[0].name);
        assert_eq!(Some("sam@example.org".to_owned()), feed.contributors[0].email);
        Ok(())
    }

    #[test]
    fn test_build_feed_copyright_override() -> Result<()> {
        let feed = build_feed(&[], &site(), &options("copyright: CC-BY"), now())?;
        assert_eq!("CC-BY", feed.config.copyright);
        Ok(())
    }

    #[test]
    fn test_build_feed_maps_documents() -> Result<()> {
        let documents = vec![document("new", "2021-03-01"), document("old", "2020-03-01")];
        let feed = build_feed(&documents, &site(), &ResolvedOptions::default(), now())?;
        assert_eq!(2, feed.items.len());

        let item = &feed.items[0];
        assert_eq!("Title of new", item.title);
        assert_eq!("https://example.org/blog/new/", item.id);
        assert_eq!("https://example.org/blog/new/", item.link);
        assert_eq!("2021-03-01T00:00:00+00:00", item.date.to_rfc3339());
        assert_eq!("Excerpt of new.", item.content);
        assert_eq!(
            vec![Person {
                name: "Jo".to_owned(),
                email: None,
                link: Some("https://example.org".to_owned()),
            }],
            item.authors
        );
        assert_eq!("Title of old", feed.items[1].title);
        Ok(())
    }

    #[test]
    fn test_build_feed_bad_date() {
        let result = build_feed(
            &[document("a", "sometime")],
            &site(),
            &ResolvedOptions::default(),
            now(),
        );
        assert!(matches!(result, Err(Error::Date { document, .. }) if document == "a"));
    }

    /// Records every query it receives and answers from fixed data.
    struct FakeGraph {
        queries: RefCell<Vec<Query>>,
        result: std::result::Result<QueryData, Vec<QueryError>>,
    }

    impl FakeGraph {
        fn new(result: std::result::Result<QueryData, Vec<QueryError>>) -> FakeGraph {
            FakeGraph {
                queries: RefCell::new(Vec::new()),
                result,
            }
        }
    }

    impl ContentGraph for FakeGraph {
        fn query(&self, query: &Query) -> std::result::Result<QueryData, Vec<QueryError>> {
            self.queries.borrow_mut().push(query.clone());
            self.result.clone()
        }
    }

    fn plugin_options(yaml: &str) -> PluginOptions {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_on_post_build_rejects_non_list_before_querying() {
        let dir = tempfile::TempDir::new().unwrap();
        let graph = FakeGraph::new(Ok(QueryData::default()));
        let result = on_post_build(
            &graph,
            &plugin_options("feeds:\n  title: nope\n"),
            dir.path(),
        );
        assert!(matches!(result, Err(Error::Configuration(_))));
        assert!(graph.queries.borrow().is_empty());
        assert_eq!(0, std::fs::read_dir(dir.path()).unwrap().count());
    }

    #[test]
    fn test_on_post_build_queries_each_feed_in_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let graph = FakeGraph::new(Ok(QueryData {
            site: site(),
            documents: Vec::new(),
        }));
        on_post_build(
            &graph,
            &plugin_options(
                r#"
feeds:
  - match: "/blog/"
    limit: 3
  - match: "/notes/"
    output: { atom: notes.xml, rss2: notes.rss, json: notes.json }
"#,
            ),
            dir.path(),
        )
        .unwrap();

        let queries = graph.queries.borrow();
        assert_eq!(
            vec![Query::new("/blog/", 3), Query::new("/notes/", 20)],
            *queries
        );
        for name in &[
            "atom.xml",
            "rss.xml",
            "feed.json",
            "notes.xml",
            "notes.rss",
            "notes.json",
        ] {
            assert!(dir.path().join(name).is_file(), "missing {}", name);
        }
    }

    #[test]
    fn test_on_post_build_propagates_query_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let graph = FakeGraph::new(Err(vec![
            QueryError::new("first problem"),
            QueryError::new("second problem"),
        ]));
        let err = on_post_build(&graph, &PluginOptions::default(), dir.path()).unwrap_err();
        assert_eq!(
            "query error: first problem; second problem",
            err.to_string()
        );
        assert_eq!(1, graph.queries.borrow().len());
        assert_eq!(0, std::fs::read_dir(dir.path()).unwrap().count());
    }
}
