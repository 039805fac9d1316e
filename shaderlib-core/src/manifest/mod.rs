//! Module manifests
//!
//! A manifest is the JSON form of one shader module: its identity, build
//! options and function table. Generated modules compile their tables in
//! directly; manifests serve tooling (the `shaderlib-query` CLI) and tests.
//!
//! ```json
//! {
//!   "abi_version": 1,
//!   "plugin": { "name": "lighting", "version": "0.3.1", "author": "shaderlib" },
//!   "options": { "duplicate_policy": "reject" },
//!   "functions": [
//!     {
//!       "name": "ggx",
//!       "file_path": "lighting/brdf/ggx.glsl",
//!       "overloads": [{ "return_type": "float", "param_types": ["float", "float"] }]
//!     }
//!   ]
//! }
//! ```

mod loader;

pub use loader::ManifestLoader;

use serde::{Deserialize, Serialize};

use crate::abi::PLUGIN_ABI_VERSION;
use crate::error::Result;
use crate::model::{GlslFunction, PluginInfo};
use crate::plugin::ShaderModule;
use crate::registry::{BuildOptions, DuplicatePolicy};

fn default_abi_version() -> i32 {
    PLUGIN_ABI_VERSION
}

/// Serialized form of a shader module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// ABI version the table was produced for
    #[serde(default = "default_abi_version")]
    pub abi_version: i32,

    /// Module identity
    pub plugin: PluginInfo,

    /// Registry build options
    #[serde(default)]
    pub options: BuildOptions,

    /// Function table in registry order
    #[serde(default)]
    pub functions: Vec<GlslFunction>,
}

impl ModuleManifest {
    pub fn new(plugin: PluginInfo, functions: Vec<GlslFunction>) -> Self {
        Self {
            abi_version: PLUGIN_ABI_VERSION,
            plugin,
            options: BuildOptions::default(),
            functions,
        }
    }

    /// Validate the manifest, collecting every problem found
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = vec![];

        if self.abi_version != PLUGIN_ABI_VERSION {
            errors.push(format!(
                "Unsupported ABI version: expected {}, got {}",
                PLUGIN_ABI_VERSION, self.abi_version
            ));
        }

        if self.plugin.name.is_empty() {
            errors.push("plugin.name cannot be empty".to_string());
        }

        if self.plugin.version.is_empty() {
            errors.push("plugin.version cannot be empty".to_string());
        }

        // The info string is colon-delimited
        for (field, value) in [
            ("name", &self.plugin.name),
            ("version", &self.plugin.version),
            ("author", &self.plugin.author),
        ] {
            if value.contains(':') {
                errors.push(format!("plugin.{} cannot contain ':': {}", field, value));
            }
            if value.contains('\0') {
                errors.push(format!("plugin.{} cannot contain NUL bytes", field));
            }
        }

        for (idx, function) in self.functions.iter().enumerate() {
            if function.name.is_empty() {
                errors.push(format!("functions[{}].name cannot be empty", idx));
            }
            if function.name.contains('\0') || function.file_path.contains('\0') {
                errors.push(format!("functions[{}] contains NUL bytes", idx));
            }
        }

        if self.options.duplicate_policy == DuplicatePolicy::Reject {
            let mut names: Vec<&str> = self.functions.iter().map(|f| f.name.as_str()).collect();
            names.sort();
            for window in names.windows(2) {
                if window[0] == window[1] && !window[0].is_empty() {
                    errors.push(format!("Duplicate function name: {}", window[0]));
                }
            }
            errors.dedup();
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the module this manifest describes
    pub fn into_module(self) -> Result<ShaderModule> {
        ShaderModule::with_options(self.plugin, self.functions, &self.options)
    }
}
