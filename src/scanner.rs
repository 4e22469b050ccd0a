use anyhow::{bail, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories that never hold API type declarations
const SKIPPED_DIRS: &[&str] = &["target", "node_modules"];

/// Collects the Rust sources of a project.
///
/// Build output and hidden entries are skipped. Files are returned in path
/// order so that declaration lookups, and therefore definition names, do not
/// depend on the filesystem's enumeration order.
pub struct FileScanner {
    root_path: PathBuf,
}

/// Files found by [`FileScanner::scan`]
#[derive(Debug)]
pub struct ScanResult {
    pub rust_files: Vec<PathBuf>,
    /// Entries that could not be read; scanning continues past them
    pub warnings: Vec<String>,
}

impl FileScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    fn is_visible(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            return false;
        }
        !(entry.file_type().is_dir() && SKIPPED_DIRS.contains(&name.as_ref()))
    }

    /// Walks the tree below the root and returns every `.rs` file.
    ///
    /// Fails only when the root itself is not a readable directory.
    pub fn scan(&self) -> Result<ScanResult> {
        if !self.root_path.is_dir() {
            bail!("Not a directory: {}", self.root_path.display());
        }
        debug!("Scanning {}", self.root_path.display());

        let mut rust_files = Vec::new();
        let mut warnings = Vec::new();

        let walker = WalkDir::new(&self.root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.is_visible(e));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let is_rust = entry.path().extension().is_some_and(|ext| ext == "rs");
                    if entry.file_type().is_file() && is_rust {
                        rust_files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    let warning = format!("Skipping unreadable entry: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        debug!("Found {} Rust files", rust_files.len());
        Ok(ScanResult {
            rust_files,
            warnings,
        })
    }
}
