//! Defines the [`Post`] type and the logic for parsing posts (YAML
//! frontmatter followed by a markdown body) from source files.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The YAML block at the top of every post.
#[derive(Clone, Debug, Deserialize)]
pub struct Frontmatter {
    pub title: String,

    pub date: String,

    /// The post's URL relative to the site root. Derived from the post's
    /// source path when unset.
    #[serde(default)]
    pub url: Option<String>,
}

/// A post loaded into memory.
#[derive(Clone, Debug)]
pub struct Post {
    /// The post's path relative to the content directory, without the `.md`
    /// extension and with `/` separators.
    pub id: String,

    /// The absolute path of the post's source file. Queries match against
    /// this.
    pub source_path: PathBuf,

    pub title: String,

    /// The raw date from the frontmatter.
    pub date: String,

    /// The parsed date, used for ordering.
    pub published: DateTime<FixedOffset>,

    pub url: String,

    /// The unrendered markdown body.
    pub body: String,
}

const FENCE: &str = "---";

impl Post {
    /// Parses a post from `input`, the full contents of the file at
    /// `source_path`. `id` is the post's extension-less relative path.
    pub fn from_str(id: &str, source_path: &Path, input: &str) -> Result<Post> {
        let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input)?;
        let frontmatter: Frontmatter = serde_yaml::from_str(&input[yaml_start..yaml_stop])?;
        let published = crate::date::parse(&frontmatter.date).map_err(|err| Error::Date {
            date: frontmatter.date.clone(),
            err,
        })?;
        Ok(Post {
            id: id.to_owned(),
            source_path: source_path.to_owned(),
            url: match frontmatter.url {
                Some(url) => url,
                None => default_url(id),
            },
            title: frontmatter.title,
            date: frontmatter.date,
            published,
            body: input[body_start..].to_owned(),
        })
    }
}

fn frontmatter_indices(input: &str) -> Result<(usize, usize, usize)> {
    if !input.starts_with(FENCE) {
        return Err(Error::MissingFrontmatter);
    }
    match input[FENCE.len()..].find(FENCE) {
        None => Err(Error::UnterminatedFrontmatter),
        Some(offset) => Ok((
            FENCE.len(),                        // yaml_start
            FENCE.len() + offset,               // yaml_stop
            FENCE.len() + offset + FENCE.len(), // body_start
        )),
    }
}

/// Builds `/<dir>/<slugified stem>/` from an id like `blog/Hello World`.
fn default_url(id: &str) -> String {
    let (dir, stem) = match id.rfind('/') {
        Some(i) => (&id[..i + 1], &id[i + 1..]),
        None => ("", id),
    };
    format!("/{}{}/", dir, slug::slugify(stem))
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem parsing a post.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the post doesn't begin with a `---` fence.
    #[error("post must begin with `---`")]
    MissingFrontmatter,

    /// Returned when the frontmatter's closing `---` is missing.
    #[error("missing closing `---`")]
    UnterminatedFrontmatter,

    /// Returned when the frontmatter isn't valid YAML or lacks fields.
    #[error("parsing frontmatter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    /// Returned when the frontmatter date can't be parsed.
    #[error("parsing date `{date}`: {err}")]
    Date {
        date: String,
        #[source]
        err: chrono::ParseError,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(id: &str, input: &str) -> Result<Post> {
        Post::from_str(id, Path::new("/content/blog/post.md"), input)
    }

    #[test]
    fn test_from_str() -> Result<()> {
        let post = parse(
            "blog/post",
            "---\ntitle: Hello\ndate: 2021-04-05\nurl: /hello/\n---\nBody *text*.\n",
        )?;
        assert_eq!("blog/post", post.id);
        assert_eq!("Hello", post.title);
        assert_eq!("2021-04-05", post.date);
        assert_eq!("/hello/", post.url);
        assert_eq!("\nBody *text*.\n", post.body);
        assert_eq!("2021-04-05T00:00:00+00:00", post.published.to_rfc3339());
        Ok(())
    }

    #[test]
    fn test_from_str_derives_url() -> Result<()> {
        let post = parse("blog/Hello World", "---\ntitle: x\ndate: 2021-04-05\n---\n")?;
        assert_eq!("/blog/hello-world/", post.url);
        Ok(())
    }

    #[test]
    fn test_default_url_top_level() {
        assert_eq!("/about/", default_url("about"));
    }

    #[test]
    fn test_from_str_missing_fence() {
        assert!(matches!(
            parse("a", "title: x\n"),
            Err(Error::MissingFrontmatter)
        ));
    }

    #[test]
    fn test_from_str_unterminated() {
        assert!(matches!(
            parse("a", "---\ntitle: x\n"),
            Err(Error::UnterminatedFrontmatter)
        ));
    }

    #[test]
    fn test_from_str_missing_title() {
        assert!(matches!(
            parse("a", "---\ndate: 2021-04-05\n---\n"),
            Err(Error::Frontmatter(_))
        ));
    }

    #[test]
    fn test_from_str_bad_date() {
        assert!(matches!(
            parse("a", "---\ntitle: x\ndate: yesterday\n---\n"),
            Err(Error::Date { .. })
        ));
    }
}
