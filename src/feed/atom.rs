//! Atom 1.0 encoding.

use super::{Feed, Item, Person, GENERATOR};
use atom_syndication::{
    ContentBuilder, Entry, EntryBuilder, Feed as AtomFeed, FeedBuilder, GeneratorBuilder, Link,
    LinkBuilder, Person as AtomPerson, PersonBuilder, Text,
};

pub(super) fn encode(feed: &Feed) -> String {
    to_atom(feed).to_string()
}

fn to_atom(feed: &Feed) -> AtomFeed {
    let config = &feed.config;
    FeedBuilder::default()
        .title(Text::plain(config.title.clone()))
        .id(config.id.clone())
        .updated(config.updated)
        .subtitle(Some(Text::plain(config.description.clone())))
        .rights(Some(Text::plain(config.copyright.clone())))
        .links(vec![
            link(&config.link, "alternate", None),
            link(&config.feed_links.atom, "self", Some("application/atom+xml")),
        ])
        .authors(vec![person(&config.author)])
        .contributors(feed.contributors.iter().map(person).collect::<Vec<_>>())
        .generator(Some(GeneratorBuilder::default().value(GENERATOR).build()))
        .entries(feed.items.iter().map(entry).collect::<Vec<_>>())
        .build()
}

fn entry(item: &Item) -> Entry {
    EntryBuilder::default()
        .title(Text::plain(item.title.clone()))
        .id(item.id.clone())
        .updated(item.date)
        .published(Some(item.date))
        .links(vec![link(&item.link, "alternate", None)])
        .content(Some(
            ContentBuilder::default()
                .value(Some(item.content.clone()))
                .content_type(Some("html".to_owned()))
                .build(),
        ))
        .authors(item.authors.iter().map(person).collect::<Vec<_>>())
        .build()
}

fn link(href: &str, rel: &str, mime_type: Option<&str>) -> Link {
    LinkBuilder::default()
        .href(href)
        .rel(rel)
        .mime_type(mime_type.map(str::to_owned))
        .build()
}

fn person(person: &Person) -> AtomPerson {
    PersonBuilder::default()
        .name(person.name.clone())
        .email(person.email.clone())
        .uri(person.link.clone())
        .build()
}
