//! Generator options and the API manifest read by the command-line tool.

use crate::document::{Info, SecurityDef};
use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Options fixed for the lifetime of a [`Generator`](crate::generator::Generator)
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Annotate schemas and parameters with the Rust types they were built from
    /// (`x-rust-type`, `x-rust-name`)
    pub reflect_types: bool,
}

/// Describes the API surface: document metadata plus one entry per operation.
///
/// Type fields hold Rust type expressions (`Pet`, `Vec<Pet>`, `Option<models::User>`)
/// resolved against the scanned project. YAML and JSON are both accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiManifest {
    #[serde(default)]
    pub info: Info,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub base_path: String,
    /// Defaults to `http` and `https` when absent
    #[serde(default)]
    pub schemes: Option<Vec<String>>,
    #[serde(default)]
    pub security_definitions: BTreeMap<String, SecurityDef>,
    /// Document-level `x-` fields
    #[serde(default)]
    pub extensions: BTreeMap<String, Value>,
    /// Type substitutions, source type expression to replacement type expression
    #[serde(default)]
    pub type_map: BTreeMap<String, String>,
    #[serde(default)]
    pub operations: Vec<OperationManifest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationManifest {
    pub path: String,
    pub method: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub security: Vec<String>,
    /// OAuth2 scheme name to required scopes
    #[serde(default)]
    pub oauth2: BTreeMap<String, Vec<String>>,
    /// Request parameter struct
    #[serde(default)]
    pub params: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub extensions: BTreeMap<String, Value>,
}

impl ApiManifest {
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading API manifest from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let manifest: ApiManifest = serde_yaml::from_str(content)?;
        Ok(manifest)
    }
}
