//! JSON Feed 1.0 encoding. JSON Feed authors have no email field, so emails
//! never appear in this encoding.

use super::{Feed, Item, Person};
use serde::Serialize;

const VERSION: &str = "https://jsonfeed.org/version/1";

#[derive(Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    feed_url: &'a str,
    description: &'a str,
    author: JsonAuthor<'a>,
    items: Vec<JsonItem<'a>>,
}

#[derive(Serialize)]
struct JsonAuthor<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    content_html: &'a str,
    date_published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<JsonAuthor<'a>>,
}

impl<'a> From<&'a Person> for JsonAuthor<'a> {
    fn from(person: &'a Person) -> Self {
        JsonAuthor {
            name: &person.name,
            url: person.link.as_deref(),
        }
    }
}

impl<'a> From<&'a Item> for JsonItem<'a> {
    fn from(item: &'a Item) -> Self {
        JsonItem {
            id: &item.id,
            url: &item.link,
            title: &item.title,
            content_html: &item.content,
            date_published: item.date.to_rfc3339(),
            author: item.authors.first().map(JsonAuthor::from),
        }
    }
}

pub(super) fn encode(feed: &Feed) -> serde_json::Result<String> {
    let config = &feed.config;
    serde_json::to_string_pretty(&JsonFeed {
        version: VERSION,
        title: &config.title,
        home_page_url: &config.link,
        feed_url: &config.feed_links.json,
        description: &config.description,
        author: JsonAuthor::from(&config.author),
        items: feed.items.iter().map(JsonItem::from).collect(),
    })
}
