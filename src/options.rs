//! Resolves plugin options into one [`ResolvedOptions`] per configured feed.
//!
//! Plugin options either carry a `feeds` list, one entry per feed, or nothing
//! at all, in which case a single feed is generated from the defaults. Every
//! field of a feed entry is optional; absent fields fall back to the defaults
//! below or, for the metadata overrides, to the site metadata at build time.

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// The default regular expression matched against document source paths.
pub const DEFAULT_MATCH: &str = "/blog/";

/// The default maximum number of items per feed.
pub const DEFAULT_LIMIT: usize = 20;

/// Options handed to the feed step by the host. Only `feeds` is consulted.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PluginOptions {
    /// Kept as a raw value so that a non-list can be reported as a
    /// configuration error instead of a generic deserialization failure.
    #[serde(default)]
    pub feeds: Option<Value>,
}

impl PluginOptions {
    /// Resolves the configured feeds. Fails if `feeds` is set to anything
    /// other than a list. An unset or falsy (`null`, `false`, `0`, `''`)
    /// `feeds` yields exactly one feed built from an empty configuration.
    pub fn resolve(&self) -> Result<Vec<ResolvedOptions>> {
        match &self.feeds {
            None => Ok(vec![FeedOptions::default().resolve()]),
            Some(feeds) if is_falsy(feeds) => Ok(vec![FeedOptions::default().resolve()]),
            Some(Value::Sequence(feeds)) => feeds
                .iter()
                .enumerate()
                .map(|(index, feed)| {
                    serde_yaml::from_value::<FeedOptions>(feed.clone())
                        .map(|options| options.resolve())
                        .map_err(|err| Error::InvalidFeed { index, err })
                })
                .collect(),
            Some(_) => Err(Error::FeedsNotList),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64().map_or(false, |n| n == 0.0 || n.is_nan()),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// The caller-supplied configuration for one feed.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedOptions {
    /// Regular expression selecting documents by source file path.
    #[serde(rename = "match")]
    pub pattern: Option<String>,

    pub limit: Option<usize>,

    pub output: OutputOverrides,

    #[serde(flatten)]
    pub metadata: MetadataOverrides,
}

impl FeedOptions {
    /// Merges these options over the defaults. The output filenames are
    /// merged field by field.
    pub fn resolve(self) -> ResolvedOptions {
        let defaults = OutputFiles::default();
        ResolvedOptions {
            pattern: self.pattern.unwrap_or_else(|| DEFAULT_MATCH.to_owned()),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            output: OutputFiles {
                atom: self.output.atom.unwrap_or(defaults.atom),
                rss2: self.output.rss2.unwrap_or(defaults.rss2),
                json: self.output.json.unwrap_or(defaults.json),
            },
            metadata: self.metadata,
        }
    }
}

/// Partial output filenames as supplied by the caller.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputOverrides {
    pub atom: Option<String>,
    pub rss2: Option<String>,
    pub json: Option<String>,
}

/// Overrides for the metadata otherwise derived from the site. Empty strings
/// count as unset for everything except `email` (see [`MetadataOverrides::email`]).
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetadataOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub id: Option<String>,
    pub copyright: Option<String>,
    pub author: Option<String>,

    /// Only ever written to the feed when explicitly provided. `false` reads
    /// as not provided; an empty string is kept.
    #[serde(deserialize_with = "email_override")]
    pub email: Option<String>,
}

impl MetadataOverrides {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn link(&self) -> Option<&str> {
        non_empty(&self.link)
    }

    pub fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    pub fn copyright(&self) -> Option<&str> {
        non_empty(&self.copyright)
    }

    pub fn author(&self) -> Option<&str> {
        non_empty(&self.author)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn email_override<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Email {
        Address(String),
        Flag(bool),
    }

    Ok(match Option::<Email>::deserialize(deserializer)? {
        Some(Email::Address(address)) => Some(address),
        Some(Email::Flag(_)) | None => None,
    })
}

/// The three output filenames for a feed, relative to the output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFiles {
    pub atom: String,
    pub rss2: String,
    pub json: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        OutputFiles {
            atom: "atom.xml".to_owned(),
            rss2: "rss.xml".to_owned(),
            json: "feed.json".to_owned(),
        }
    }
}

/// Feed options with every defaultable field filled in.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOptions {
    pub pattern: String,
    pub limit: usize,
    pub output: OutputFiles,
    pub metadata: MetadataOverrides,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        FeedOptions::default().resolve()
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a malformed plugin configuration. Raised before any query is
/// issued.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when `feeds` is present but is not a list.
    #[error("the `feeds` option must be an array")]
    FeedsNotList,

    /// Returned when an entry of the `feeds` list can't be read as feed
    /// options.
    #[error("invalid configuration for feed #{index}: {err}")]
    InvalidFeed {
        index: usize,
        #[source]
        err: serde_yaml::Error,
    },
}
