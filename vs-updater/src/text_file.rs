use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, UpdaterError};

const UTF8_BOM: &str = "\u{feff}";

/// A UTF-8 text file loaded whole into memory.
///
/// A leading byte-order mark is kept out of `content` so line-anchored
/// patterns see the first line as-is, and is restored on write.
#[derive(Debug, Clone)]
pub struct TextFile {
    path: PathBuf,
    content: String,
    has_bom: bool,
}

impl TextFile {
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| UpdaterError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| UpdaterError::InvalidEncoding {
            path: path.to_path_buf(),
        })?;

        Ok(Self::from_text(path.to_path_buf(), text))
    }

    fn from_text(path: PathBuf, mut text: String) -> Self {
        let has_bom = text.starts_with(UTF8_BOM);
        if has_bom {
            text.replace_range(..UTF8_BOM.len(), "");
        }
        TextFile {
            path,
            content: text,
            has_bom,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn has_bom(&self) -> bool {
        self.has_bom
    }

    /// Overwrite the file with `new_content`, keeping the original byte-order mark
    pub fn write(&self, new_content: &str) -> Result<()> {
        let mut buffer = String::with_capacity(new_content.len() + UTF8_BOM.len());
        if self.has_bom {
            buffer.push_str(UTF8_BOM);
        }
        buffer.push_str(new_content);

        fs::write(&self.path, buffer).map_err(|source| UpdaterError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
