//! RSS 2.0 encoding.

use super::{Feed, Item, Person, GENERATOR};
use atom_syndication::LinkBuilder;
use rss::extension::atom::AtomExtensionBuilder;
use rss::extension::dublincore::DublinCoreExtensionBuilder;
use rss::{Channel, ChannelBuilder, GuidBuilder, ItemBuilder};

pub(super) fn encode(feed: &Feed) -> String {
    to_channel(feed).to_string()
}

fn to_channel(feed: &Feed) -> Channel {
    let config = &feed.config;
    ChannelBuilder::default()
        .title(config.title.clone())
        .link(config.link.clone())
        .description(config.description.clone())
        .copyright(Some(config.copyright.clone()))
        .generator(Some(GENERATOR.to_owned()))
        .last_build_date(Some(config.updated.to_rfc2822()))
        .atom_ext(Some(
            AtomExtensionBuilder::default()
                .links(vec![LinkBuilder::default()
                    .href(config.feed_links.rss2.clone())
                    .rel("self")
                    .mime_type(Some("application/rss+xml".to_owned()))
                    .build()])
                .build(),
        ))
        .items(feed.items.iter().map(item).collect::<Vec<_>>())
        .build()
}

fn item(item: &Item) -> rss::Item {
    let mut builder = ItemBuilder::default();
    builder
        .title(Some(item.title.clone()))
        .link(Some(item.link.clone()))
        .guid(Some(
            GuidBuilder::default()
                .permalink(true)
                .value(item.id.clone())
                .build(),
        ))
        .pub_date(Some(item.date.to_rfc2822()))
        .description(Some(item.content.clone()));

    // RSS has a single author slot that must hold an email address. Authors
    // without one are written as a Dublin Core creator instead.
    if let Some(author) = item.authors.first() {
        match rss_author(author) {
            Some(author) => {
                builder.author(Some(author));
            }
            None => {
                builder.dublin_core_ext(Some(
                    DublinCoreExtensionBuilder::default()
                        .creators(vec![author.name.clone()])
                        .build(),
                ));
            }
        }
    }
    builder.build()
}

/// Formats an author as `email (name)`, the form RSS expects.
fn rss_author(person: &Person) -> Option<String> {
    person
        .email
        .as_ref()
        .map(|email| format!("{} ({})", email, person.name))
}
