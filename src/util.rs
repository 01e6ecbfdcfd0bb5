use std::fs::File;
use std::path::{Path, PathBuf};

/// Opens `path`, naming the `kind` of file in the error on failure.
pub fn open(path: &Path, kind: &'static str) -> Result<File, Error> {
    File::open(path).map_err(|err| Error {
        kind,
        path: path.to_owned(),
        err,
    })
}

#[derive(Debug, thiserror::Error)]
#[error("opening {kind} file `{}`: {err}", path.display())]
pub struct Error {
    kind: &'static str,
    path: PathBuf,
    #[source]
    err: std::io::Error,
}
