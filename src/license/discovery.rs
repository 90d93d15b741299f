use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_SOURCE_EXTENSION: &str = "go";

/// File names this short or shorter are never treated as source files
pub const MIN_NAME_LEN: usize = 4;

/// Decides which file names receive a license header.
///
/// This is a plain suffix test on the file name, not extension parsing:
/// `main.go` and `.hidden.go` match, `a.go` is too short, `xyzgo` lacks the dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMatcher {
    suffix: String,
}

impl SourceMatcher {
    pub fn new() -> Self {
        Self::for_extension(DEFAULT_SOURCE_EXTENSION)
    }

    pub fn for_extension(extension: &str) -> Self {
        Self {
            suffix: format!(".{}", extension.trim_start_matches('.')),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn is_source_file(&self, name: &str) -> bool {
        self.is_source_name(name.as_bytes())
    }

    /// Same test on the raw file name bytes, so undecodable names keep their real length
    pub fn is_source_name(&self, name: &[u8]) -> bool {
        name.len() > MIN_NAME_LEN && name.ends_with(self.suffix.as_bytes())
    }

    /// Find every matching file under `root`, sorted by path
    pub fn find_source_files(&self, root: &Path) -> crate::Result<Vec<PathBuf>> {
        let mut source_files = Vec::new();

        for entry in WalkDir::new(root) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            if self.is_source_name(entry.file_name().as_encoded_bytes()) {
                source_files.push(entry.into_path());
            }
        }

        // Sort for consistent ordering
        source_files.sort();
        Ok(source_files)
    }
}

impl Default for SourceMatcher {
    fn default() -> Self {
        Self::new()
    }
}
