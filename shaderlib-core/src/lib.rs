//! # shaderlib core - GLSL function registry
//!
//! shaderlib describes the functions of a GLSL shader library so that tools
//! can look them up without parsing shader source:
//!
//! - **Registry**: an immutable, indexed table of [`GlslFunction`] records
//!   for one module, built once and then queried by name, category, return
//!   type or parameter count
//! - **Plugin facade**: the [`ShaderPlugin`] contract, implemented by
//!   [`BasePlugin`] over a module's identity and registry
//! - **Plugin ABI**: a C handshake (`createPlugin`, `destroyPlugin`,
//!   `getPluginInfo`, `getPluginABIVersion`) generated by
//!   [`export_plugin!`] so independently compiled modules can be queried
//!   uniformly by a host
//!
//! ## Example
//!
//! ```rust
//! use shaderlib_core::{GlslFunction, Overload, PluginInfo, ShaderModule, ShaderPlugin};
//!
//! let module = ShaderModule::new(
//!     PluginInfo::new("lighting", "0.3.1", "shaderlib"),
//!     vec![
//!         GlslFunction::new("ggx", "lighting/brdf/ggx.glsl")
//!             .with_overloads([Overload::new("float", ["float", "float"])]),
//!         GlslFunction::new("schlick", "lighting/fresnel/schlick.glsl")
//!             .with_overloads([Overload::new("vec3", ["vec3", "float"])]),
//!         GlslFunction::new("saturate", "common/math/saturate.glsl"),
//!     ],
//! )
//! .unwrap();
//!
//! let plugin = module.plugin();
//! assert_eq!(plugin.info_string(), "lighting:0.3.1:shaderlib");
//! assert!(plugin.find_function("ggx").is_some());
//! assert_eq!(plugin.available_categories(), vec!["common", "lighting"]);
//! assert_eq!(plugin.functions_by_category("lighting"), vec!["ggx", "schlick"]);
//!
//! let vec3: Vec<_> = plugin
//!     .find_functions_by_return_type("vec3")
//!     .iter()
//!     .map(|f| f.name.as_str())
//!     .collect();
//! assert_eq!(vec3, vec!["schlick"]);
//! ```
//!
//! ## Concurrency
//!
//! Build once, then read from anywhere. [`Registry`], [`ShaderModule`] and
//! [`BasePlugin`] are `Send + Sync` and have no interior mutability, so
//! concurrent queries need no locking.

pub mod abi;
pub mod error;
pub mod manifest;
pub mod model;
pub mod plugin;
pub mod registry;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export main types
pub use abi::{check_abi_version, PLUGIN_ABI_VERSION};
pub use error::{ErrorCategory, ErrorDetail, ErrorResponse, RegistryError, Result};
pub use manifest::{ManifestLoader, ModuleManifest};
pub use model::{GlslFunction, Overload, PluginInfo};
pub use plugin::{BasePlugin, ShaderModule, ShaderPlugin};
pub use registry::{BuildOptions, DuplicatePolicy, Registry};
