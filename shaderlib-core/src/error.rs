//! Error types for shaderlib operations
//!
//! Only a handful of things can actually fail in this crate: building a
//! registry (duplicate names), loading a module manifest, and the ABI
//! handshake between a host and a plugin. Lookups never fail; a missing
//! function is an empty result, not an error.
//!
//! # Error Codes
//!
//! Each variant has a stable, uppercase error code (e.g.
//! `DUPLICATE_FUNCTION_NAME`) suitable for logging, for switching on in
//! host code, and for the JSON error output of the `shaderlib-query` CLI.
//!
//! # Example
//!
//! ```rust
//! use shaderlib_core::error::{ErrorCategory, RegistryError};
//!
//! fn report(err: &RegistryError) {
//!     match err.category() {
//!         ErrorCategory::Conflict => eprintln!("conflicting records: {err}"),
//!         ErrorCategory::Compatibility => eprintln!("refusing to use plugin: {err}"),
//!         _ => eprintln!("{}: {err}", err.error_code()),
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for shaderlib operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Input data is malformed
    Validation,
    /// Records conflict with each other
    Conflict,
    /// Host and plugin disagree on the ABI
    Compatibility,
    /// File system or decoding failure
    External,
    /// Bug in this crate or in a plugin builder
    Internal,
}

/// Errors that can occur while building or loading a shader module
#[derive(Error, Debug)]
pub enum RegistryError {
    // ═══════════════════════════════════════════════════════════════════════
    // Registry construction
    // ═══════════════════════════════════════════════════════════════════════

    /// Two records share a name and the build policy rejects duplicates
    #[error("Duplicate function name '{name}' at positions {first} and {duplicate}. Rename one record or build with DuplicatePolicy::LastWriteWins.")]
    DuplicateFunctionName {
        name: String,
        first: usize,
        duplicate: usize,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Manifest loading
    // ═══════════════════════════════════════════════════════════════════════

    /// Manifest is malformed or fails validation
    #[error("Invalid module manifest: {reason}")]
    InvalidManifest { reason: String },

    /// Failed to read a manifest from disk
    #[error("Failed to load manifest from '{path}': {reason}")]
    ManifestLoadError { path: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Plugin ABI
    // ═══════════════════════════════════════════════════════════════════════

    /// Plugin reports an ABI version the host was not built against
    #[error("Plugin ABI version mismatch: host expects {expected}, plugin reports {actual}. The plugin handle must not be used.")]
    AbiVersionMismatch { expected: i32, actual: i32 },

    /// A plugin module could not be constructed
    #[error("Plugin construction failed: {reason}")]
    PluginConstructionFailed { reason: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Infrastructure
    // ═══════════════════════════════════════════════════════════════════════

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl RegistryError {
    /// Returns true if retrying with different input might succeed
    ///
    /// Only a missing or unreadable manifest file qualifies; every other
    /// failure is a property of the data or of the binary itself.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RegistryError::ManifestLoadError { .. })
    }

    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            RegistryError::InvalidManifest { .. } => ErrorCategory::Validation,

            RegistryError::DuplicateFunctionName { .. } => ErrorCategory::Conflict,

            RegistryError::AbiVersionMismatch { .. } => ErrorCategory::Compatibility,

            RegistryError::ManifestLoadError { .. } | RegistryError::JsonError(_) => {
                ErrorCategory::External
            }

            RegistryError::PluginConstructionFailed { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistryError::DuplicateFunctionName { .. } => "DUPLICATE_FUNCTION_NAME",
            RegistryError::InvalidManifest { .. } => "INVALID_MANIFEST",
            RegistryError::ManifestLoadError { .. } => "MANIFEST_LOAD_ERROR",
            RegistryError::AbiVersionMismatch { .. } => "ABI_VERSION_MISMATCH",
            RegistryError::PluginConstructionFailed { .. } => "PLUGIN_CONSTRUCTION_FAILED",
            RegistryError::JsonError(_) => "JSON_ERROR",
        }
    }

    /// Converts this error to a JSON-serializable response object
    ///
    /// ```json
    /// {
    ///   "error": {
    ///     "code": "DUPLICATE_FUNCTION_NAME",
    ///     "message": "Duplicate function name 'ggx' at positions 0 and 3...",
    ///     "category": "conflict",
    ///     "recoverable": false
    ///   }
    /// }
    /// ```
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                category: self.category(),
                recoverable: self.is_recoverable(),
            },
        }
    }
}

/// JSON-serializable error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail for JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code (e.g., "DUPLICATE_FUNCTION_NAME")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error category
    pub category: ErrorCategory,
    /// Whether retry might succeed
    pub recoverable: bool,
}
