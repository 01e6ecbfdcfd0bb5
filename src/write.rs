//! Writes a [`Feed`] to disk in all three of its encodings.

use crate::feed::Feed;
use crate::options::OutputFiles;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Encodes `feed` as Atom, RSS 2.0 and JSON Feed and writes each encoding to
/// `output_directory` under the corresponding name from `output`. The writes
/// are independent: a failure stops at that file, and files already written
/// stay on disk.
pub fn write_feed(feed: &Feed, output: &OutputFiles, output_directory: &Path) -> Result<()> {
    write_file(&output_directory.join(&output.atom), &feed.atom1())?;
    write_file(&output_directory.join(&output.rss2), &feed.rss2())?;
    write_file(&output_directory.join(&output.json), &feed.json1()?)?;
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let io_error = |err| Error::Io {
        path: path.to_owned(),
        err,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, contents).map_err(io_error)?;
    info!(path = %path.display(), bytes = contents.len(), "wrote feed");
    Ok(())
}

/// The result of a fallible feed-writing operation.
type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a feed-writing operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error encoding the JSON feed.
    #[error("encoding JSON feed: {0}")]
    Json(#[from] serde_json::Error),

    /// An error writing an output file.
    #[error("writing '{}': {err}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        err: io::Error,
    },
}
