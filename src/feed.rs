//! A format-neutral feed object and its encoders. A [`Feed`] is built once
//! from the feed metadata, filled with [`Item`]s and contributors, then
//! encoded as Atom 1.0 ([`Feed::atom1`]), RSS 2.0 ([`Feed::rss2`]) and JSON
//! Feed 1.0 ([`Feed::json1`]).

use chrono::{DateTime, FixedOffset};

mod atom;
mod json;
mod rss2;

/// The name written into each format's generator field.
pub const GENERATOR: &str = env!("CARGO_PKG_NAME");

/// A person attached to a feed or an item. `email` and `link` are left out of
/// the encoded output when unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub email: Option<String>,
    pub link: Option<String>,
}

/// Self links to the feed in each of its encodings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedLinks {
    pub atom: String,
    pub rss2: String,
    pub json: String,
}

/// Bundled metadata for creating a feed.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedConfig {
    pub title: String,
    pub description: String,
    pub link: String,
    pub id: String,
    pub copyright: String,
    pub updated: DateTime<FixedOffset>,
    pub feed_links: FeedLinks,
    pub author: Person,
}

/// A single entry in a feed.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub title: String,
    pub id: String,
    pub link: String,
    pub date: DateTime<FixedOffset>,

    /// HTML or plain text; encoded as the entry content.
    pub content: String,

    pub authors: Vec<Person>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Feed {
    pub config: FeedConfig,
    pub items: Vec<Item>,
    pub contributors: Vec<Person>,
}

impl Feed {
    pub fn new(config: FeedConfig) -> Feed {
        Feed {
            config,
            items: Vec::new(),
            contributors: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn add_contributor(&mut self, contributor: Person) {
        self.contributors.push(contributor);
    }

    /// Encodes the feed as an Atom 1.0 document.
    pub fn atom1(&self) -> String {
        atom::encode(self)
    }

    /// Encodes the feed as an RSS 2.0 document.
    pub fn rss2(&self) -> String {
        rss2::encode(self)
    }

    /// Encodes the feed as a JSON Feed 1.0 document.
    pub fn json1(&self) -> Result<String, serde_json::Error> {
        json::encode(self)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub(crate) fn date(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    /// A feed with two items and a contributor. The first item's author has
    /// an email, the second's doesn't.
    pub(crate) fn sample_feed() -> Feed {
        let mut feed = Feed::new(FeedConfig {
            title: "Example".to_owned(),
            description: "An example site".to_owned(),
            link: "https://example.org".to_owned(),
            id: "https://example.org".to_owned(),
            copyright: "All rights reserved 2021, Jo".to_owned(),
            updated: date("2021-05-01T12:00:00+00:00"),
            feed_links: FeedLinks {
                atom: "https://example.org/atom.xml".to_owned(),
                rss2: "https://example.org/rss.xml".to_owned(),
                json: "https://example.org/feed.json".to_owned(),
            },
            author: Person {
                name: "Jo".to_owned(),
                email: None,
                link: Some("https://example.org".to_owned()),
            },
        });
        feed.add_item(Item {
            title: "Second post".to_owned(),
            id: "https://example.org/blog/second/".to_owned(),
            link: "https://example.org/blog/second/".to_owned(),
            date: date("2021-04-02T00:00:00+00:00"),
            content: "Second body.".to_owned(),
            authors: vec![Person {
                name: "Jo".to_owned(),
                email: Some("jo@example.org".to_owned()),
                link: Some("https://example.org".to_owned()),
            }],
        });
        feed.add_item(Item {
            title: "First post".to_owned(),
            id: "https://example.org/blog/first/".to_owned(),
            link: "https://example.org/blog/first/".to_owned(),
            date: date("2021-04-01T00:00:00+00:00"),
            content: "First body.".to_owned(),
            authors: vec![Person {
                name: "Jo".to_owned(),
                email: None,
                link: Some("https://example.org".to_owned()),
            }],
        });
        feed.add_contributor(Person {
            name: "Jo".to_owned(),
            email: None,
            link: Some("https://example.org".to_owned()),
        });
        feed
    }

    #[test]
    fn test_add_item_keeps_order() {
        let feed = sample_feed();
        let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(vec!["Second post", "First post"], titles);
        assert_eq!(1, feed.contributors.len());
    }
}
