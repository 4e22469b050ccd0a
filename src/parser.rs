use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Module path given to declarations at the crate root
pub const ROOT_MODULE: &str = "crate";

/// Parses Rust sources with `syn`.
pub struct AstParser;

/// One parsed source file
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    /// Module path of the file inside its crate, e.g. `models::pet`
    pub module: String,
    pub syntax_tree: syn::File,
}

/// Derives the module path of `file` from its location below `root`.
///
/// A leading `src` directory is dropped, as are `lib.rs`, `main.rs` and `mod.rs`
/// file names, which name their parent module.
pub fn module_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let mut segments: Vec<String> = relative
        .with_extension("")
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.first().is_some_and(|s| s == "src") {
        segments.remove(0);
    }
    if segments
        .last()
        .is_some_and(|s| matches!(s.as_str(), "lib" | "main" | "mod"))
    {
        segments.pop();
    }

    if segments.is_empty() {
        ROOT_MODULE.to_string()
    } else {
        segments.join("::")
    }
}

impl AstParser {
    /// Reads and parses one file. `root` is the project directory the module
    /// path is derived from.
    pub fn parse_file(root: &Path, path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let syntax_tree = syn::parse_file(&content)
            .with_context(|| format!("Failed to parse Rust syntax in file: {}", path.display()))?;

        Ok(ParsedFile {
            path: path.to_path_buf(),
            module: module_path(root, path),
            syntax_tree,
        })
    }

    /// Parses every file, logging and returning failures alongside successes
    pub fn parse_files(root: &Path, paths: &[PathBuf]) -> Vec<Result<ParsedFile>> {
        let results: Vec<Result<ParsedFile>> = paths
            .iter()
            .map(|path| {
                Self::parse_file(root, path).inspect_err(|e| {
                    warn!("Failed to parse {}: {:#}", path.display(), e);
                })
            })
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        debug!(
            "Parsed {} files, {} failed",
            results.len() - failed,
            failed
        );
        results
    }
}
