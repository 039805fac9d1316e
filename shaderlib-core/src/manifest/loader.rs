//! Manifest Loader
//!
//! Loads module manifests from:
//! - JSON files
//! - In-memory JSON strings
//! - Already-deserialized manifest structs

use std::fs;
use std::path::Path;

use crate::error::{RegistryError, Result};
use crate::plugin::ShaderModule;

use super::ModuleManifest;

/// Loader for module manifests
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    /// Whether to validate on load
    validate_on_load: bool,
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self {
            validate_on_load: true,
        }
    }

    /// Disable validation on load
    ///
    /// The registry build still enforces the manifest's duplicate policy.
    pub fn skip_validation(mut self) -> Self {
        self.validate_on_load = false;
        self
    }

    /// Load a manifest from a JSON string
    pub fn load_from_json(&self, json: &str) -> Result<ModuleManifest> {
        let manifest: ModuleManifest =
            serde_json::from_str(json).map_err(|e| RegistryError::InvalidManifest {
                reason: e.to_string(),
            })?;

        self.load_from_manifest(manifest)
    }

    /// Load a manifest from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<ModuleManifest> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| RegistryError::ManifestLoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let manifest: ModuleManifest =
            serde_json::from_str(&content).map_err(|e| RegistryError::InvalidManifest {
                reason: format!("{}: {}", path.display(), e),
            })?;

        self.load_from_manifest(manifest)
    }

    /// Validate (if enabled) an already-deserialized manifest
    pub fn load_from_manifest(&self, manifest: ModuleManifest) -> Result<ModuleManifest> {
        if self.validate_on_load {
            manifest
                .validate()
                .map_err(|errors| RegistryError::InvalidManifest {
                    reason: errors.join("; "),
                })?;
        }

        tracing::info!(
            plugin = %manifest.plugin.name,
            version = %manifest.plugin.version,
            functions = manifest.functions.len(),
            "Loaded module manifest"
        );

        Ok(manifest)
    }

    /// Load a manifest file and build its module
    pub fn load_module<P: AsRef<Path>>(&self, path: P) -> Result<ShaderModule> {
        self.load_from_file(path)?.into_module()
    }
}
