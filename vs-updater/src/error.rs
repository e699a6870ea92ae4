use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UpdaterError>;

#[derive(Debug, Error)]
pub enum UpdaterError {
    /// The requested alias is not in the version table
    #[error("\"{alias}\" is not a supported visual studio version name{}", did_you_mean(.suggestion))]
    UnsupportedVersion {
        alias: String,
        suggestion: Option<&'static str>,
    },

    #[error("Could not find directory '{}'", .path.display())]
    PathNotFound { path: PathBuf },

    #[error("Access to the path '{}' is denied", .path.display())]
    AccessDenied { path: PathBuf },

    #[error("Invalid file pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to walk directory")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8 text", .path.display())]
    InvalidEncoding { path: PathBuf },

    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A `<LangVersion>` element had to be inserted but no property group closes in the file
    #[error("Cannot insert <LangVersion> into {}: no </PropertyGroup> found", .path.display())]
    MissingPropertyGroup { path: PathBuf },

    #[error("Failed to write output")]
    Output(#[source] io::Error),
}

fn did_you_mean(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(alias) => format!(" (did you mean \"{}\"?)", alias),
        None => String::new(),
    }
}

impl UpdaterError {
    /// Map an I/O failure on a directory to the matching discovery error
    pub(crate) fn from_dir_io(path: PathBuf, err: &io::Error) -> Option<Self> {
        match err.kind() {
            io::ErrorKind::NotFound => Some(UpdaterError::PathNotFound { path }),
            io::ErrorKind::PermissionDenied => Some(UpdaterError::AccessDenied { path }),
            _ => None,
        }
    }
}
