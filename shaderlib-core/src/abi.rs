//! Plugin ABI version handshake
//!
//! A host must call `getPluginABIVersion` on a freshly opened plugin library
//! and pass the result to [`check_abi_version`] before touching any other
//! entry point. Bump [`PLUGIN_ABI_VERSION`] whenever the exported surface
//! changes shape.

use crate::error::{RegistryError, Result};

/// ABI version implemented by this build
pub const PLUGIN_ABI_VERSION: i32 = 1;

/// Verify that a plugin's reported ABI version matches this build
pub fn check_abi_version(reported: i32) -> Result<()> {
    if reported == PLUGIN_ABI_VERSION {
        Ok(())
    } else {
        tracing::warn!(
            expected = PLUGIN_ABI_VERSION,
            actual = reported,
            "Rejecting plugin with incompatible ABI version"
        );
        Err(RegistryError::AbiVersionMismatch {
            expected: PLUGIN_ABI_VERSION,
            actual: reported,
        })
    }
}
