//! License updater
//!
//! Writes the project `LICENSE` file and prepends a license header to every
//! matching source file under a root directory.
//!
//! Files are processed one at a time in path order. The first failure aborts
//! the batch: files already rewritten stay rewritten, the rest are untouched.

pub mod discovery;
pub mod header;

pub use discovery::SourceMatcher;
pub use header::{has_existing_license, rewrite, strip_license, Rewrite};

use crate::config::Config;
use crate::{LicenseError, Result};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub const DEFAULT_LICENSE_FILENAME: &str = "LICENSE";

/// Permission bits for source files created by a rewrite
pub const SOURCE_FILE_MODE: u32 = 0o755;

/// Paths supplied on the command line. Either, both or neither may be set.
#[derive(Debug, Clone, Default)]
pub struct LicenseSources {
    pub project_license: Option<PathBuf>,
    pub source_header: Option<PathBuf>,
}

/// License texts, loaded in full before anything is written.
/// An empty text means the corresponding action is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct License {
    project_license: Vec<u8>,
    source_header: Vec<u8>,
}

impl License {
    pub fn new(project_license: impl Into<Vec<u8>>, source_header: impl Into<Vec<u8>>) -> Self {
        Self {
            project_license: project_license.into(),
            source_header: source_header.into(),
        }
    }

    /// Read both license files. A read failure for either one aborts.
    pub fn load(sources: &LicenseSources) -> Result<Self> {
        Ok(Self {
            project_license: read_optional(sources.project_license.as_deref())?,
            source_header: read_optional(sources.source_header.as_deref())?,
        })
    }

    pub fn project_license(&self) -> &[u8] {
        &self.project_license
    }

    pub fn source_header(&self) -> &[u8] {
        &self.source_header
    }

    pub fn is_empty(&self) -> bool {
        self.project_license.is_empty() && self.source_header.is_empty()
    }
}

fn read_optional(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if !path.as_os_str().is_empty() => {
            debug!(path = %path.display(), "reading license text");
            Ok(fs::read(path)?)
        }
        _ => Ok(Vec::new()),
    }
}

/// What a successful update changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateSummary {
    pub license_file: Option<PathBuf>,
    pub rewritten: Vec<PathBuf>,
    pub headers_replaced: usize,
}

impl UpdateSummary {
    pub fn files_rewritten(&self) -> usize {
        self.rewritten.len()
    }
}

/// Applies a [`License`] to the tree under `root`
#[derive(Debug, Clone)]
pub struct LicenseUpdater {
    root: PathBuf,
    matcher: SourceMatcher,
    license_filename: String,
}

impl LicenseUpdater {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            matcher: SourceMatcher::new(),
            license_filename: DEFAULT_LICENSE_FILENAME.to_string(),
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(root)
            .with_matcher(SourceMatcher::for_extension(&config.source.extension))
            .with_license_filename(&config.project.filename)
    }

    pub fn with_matcher(mut self, matcher: SourceMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_license_filename(mut self, filename: &str) -> Self {
        self.license_filename = filename.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matcher(&self) -> &SourceMatcher {
        &self.matcher
    }

    #[instrument(skip(self, license), fields(root = %self.root.display()))]
    pub fn update(&self, license: &License) -> Result<UpdateSummary> {
        if license.is_empty() {
            return Err(LicenseError::no_license_provided());
        }

        let mut summary = UpdateSummary::default();

        if !license.project_license().is_empty() {
            summary.license_file = Some(self.write_project_license(license.project_license())?);
        }

        if !license.source_header().is_empty() {
            self.rewrite_source_files(license.source_header(), &mut summary)?;
        }

        Ok(summary)
    }

    fn write_project_license(&self, content: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(&self.license_filename);
        fs::write(&path, content)?;
        info!(path = %path.display(), bytes = content.len(), "wrote project license");
        Ok(path)
    }

    fn rewrite_source_files(&self, header: &[u8], summary: &mut UpdateSummary) -> Result<()> {
        let source_files = self.matcher.find_source_files(&self.root)?;
        info!(
            count = source_files.len(),
            suffix = self.matcher.suffix(),
            "adding license header to source files"
        );

        for source_file in source_files {
            let content = fs::read(&source_file)?;
            let licensed = rewrite(&content, header);
            overwrite(&source_file, &licensed.content)?;

            debug!(
                path = %source_file.display(),
                header_replaced = licensed.header_replaced,
                "rewrote source file"
            );
            if licensed.header_replaced {
                summary.headers_replaced += 1;
            }
            summary.rewritten.push(source_file);
        }

        Ok(())
    }
}

/// Truncate and write `path`. The handle is closed before returning.
fn overwrite(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(SOURCE_FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(content)?;
    file.flush()
}
