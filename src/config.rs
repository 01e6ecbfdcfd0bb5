//! Loads the project file (`sitefeed.yaml`) that tells the command-line host
//! where content lives, where feeds go, and which feeds to generate.

use crate::options::PluginOptions;
use crate::query::SiteMetadata;
use crate::util::open;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file.
pub const PROJECT_FILE: &str = "sitefeed.yaml";

fn default_content_directory() -> PathBuf {
    PathBuf::from("content")
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("public")
}

#[derive(Deserialize)]
struct Project {
    site: SiteMetadata,

    #[serde(default = "default_content_directory")]
    content_directory: PathBuf,

    #[serde(default = "default_output_directory")]
    output_directory: PathBuf,

    #[serde(default)]
    plugin_options: PluginOptions,
}

/// A loaded project. Relative directories in the project file are resolved
/// against the directory that holds it.
pub struct Config {
    pub site: SiteMetadata,
    pub content_directory: PathBuf,
    pub output_directory: PathBuf,
    pub plugin_options: PluginOptions,
}

impl Config {
    /// Looks for the project file in `dir` and then in each of its ancestors.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Err(Error::NotFound),
            }
        }
    }

    pub fn from_project_file(path: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(open(path, "project")?)
            .map_err(|err| Error::Parse {
                path: path.to_owned(),
                err,
            })?;

        // Document URLs are appended to the site URL verbatim, so it must be
        // absolute and must not end in a slash.
        Url::parse(&project.site.site_url).map_err(|err| Error::SiteUrl {
            url: project.site.site_url.clone(),
            err,
        })?;
        if project.site.site_url.ends_with('/') {
            return Err(Error::SiteUrlTrailingSlash(project.site.site_url));
        }

        let project_root = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Config {
            site: project.site,
            content_directory: project_root.join(project.content_directory),
            output_directory: project_root.join(project.output_directory),
            plugin_options: project.plugin_options,
        })
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading the project file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when no project file exists in any ancestor directory.
    #[error("could not find `{}` in any parent directory", PROJECT_FILE)]
    NotFound,

    /// Returned when the project file can't be opened.
    #[error(transparent)]
    Open(#[from] crate::util::Error),

    /// Returned when the project file isn't valid.
    #[error("parsing '{}': {err}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        err: serde_yaml::Error,
    },

    /// Returned when the site URL isn't an absolute URL.
    #[error("invalid site URL `{url}`: {err}")]
    SiteUrl {
        url: String,
        #[source]
        err: url::ParseError,
    },

    /// Returned when the site URL ends in a slash.
    #[error("site URL `{0}` must not end in `/`")]
    SiteUrlTrailingSlash(String),
}
