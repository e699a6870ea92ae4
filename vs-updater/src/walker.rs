use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, UpdaterError};

/// Solution files
pub const SOLUTION_PATTERN: &str = "*.sln";
/// Any MSBuild project flavour: `.csproj`, `.vbproj`, `.fsproj`, `.vcxproj`, ...
pub const PROJECT_PATTERN: &str = "*.*proj";

/// File names are matched the way Windows tooling does: case-insensitively
const NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A user-supplied `--exclude` entry
#[derive(Debug, Clone)]
enum ExcludeRule {
    Glob(Pattern),
    Substring(String),
}

impl ExcludeRule {
    fn parse(pattern: &str) -> Result<Self> {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let glob = Pattern::new(pattern).map_err(|source| UpdaterError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            Ok(ExcludeRule::Glob(glob))
        } else {
            Ok(ExcludeRule::Substring(pattern.to_string()))
        }
    }

    fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        match self {
            ExcludeRule::Glob(glob) => glob.matches(&path_str),
            ExcludeRule::Substring(needle) => path_str.contains(needle.as_str()),
        }
    }
}

/// Recursive file discovery rooted at one directory
#[derive(Debug, Clone)]
pub struct FileWalker {
    root: PathBuf,
    exclude: Vec<ExcludeRule>,
}

impl FileWalker {
    /// Create a walker, failing early if `root` is not a readable directory
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let metadata = fs::metadata(&root).map_err(|err| {
            UpdaterError::from_dir_io(root.clone(), &err).unwrap_or_else(|| UpdaterError::Read {
                path: root.clone(),
                source: err,
            })
        })?;
        if !metadata.is_dir() {
            return Err(UpdaterError::PathNotFound { path: root });
        }

        Ok(FileWalker {
            root,
            exclude: Vec::new(),
        })
    }

    /// Skip files whose path below the root matches any of `patterns`
    pub fn with_exclusions(mut self, patterns: &[String]) -> Result<Self> {
        for pattern in patterns {
            self.exclude.push(ExcludeRule::parse(pattern)?);
        }
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yield every file below the root whose name matches `pattern`.
    ///
    /// Paths come out in directory traversal order. A directory that cannot be
    /// read yields an error item; callers decide whether to stop.
    pub fn find_files<'a>(
        &'a self,
        pattern: &str,
    ) -> Result<impl Iterator<Item = Result<PathBuf>> + 'a> {
        let name_pattern = Pattern::new(pattern).map_err(|source| UpdaterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let files = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        return None;
                    }
                    let matched = name_pattern
                        .matches_with(&entry.file_name().to_string_lossy(), NAME_MATCH);
                    if !matched {
                        return None;
                    }
                    if self.is_excluded(entry.path()) {
                        debug!("Excluded: {}", entry.path().display());
                        return None;
                    }
                    Some(Ok(entry.into_path()))
                }
                Err(err) => Some(Err(walk_error(err))),
            });

        Ok(files)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        // The root's own name and its ancestors never take part in exclusion
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude.iter().any(|rule| rule.matches(relative))
    }
}

fn walk_error(err: walkdir::Error) -> UpdaterError {
    let mapped = match (err.path(), err.io_error()) {
        (Some(path), Some(io_err)) => UpdaterError::from_dir_io(path.to_path_buf(), io_err),
        _ => None,
    };
    mapped.unwrap_or(UpdaterError::Walk(err))
}
