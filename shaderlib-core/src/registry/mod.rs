//! Function Registry
//!
//! The registry owns one module's function records and a name index over
//! them. It is built exactly once and is read-only afterwards:
//!
//! ```text
//!   Vec<GlslFunction> ──build──▶ Registry { functions, by_name }
//!                                   │
//!                                   ├─ find_by_name      O(1)
//!                                   ├─ by_category       O(n)
//!                                   ├─ by_return_type    O(n·m)
//!                                   └─ ...
//! ```
//!
//! ## Thread Safety
//!
//! A built `Registry` has no interior mutability and exposes no `&mut`
//! methods, so it is `Send + Sync` and any number of threads may query it
//! at once without locking. Construction itself is single-threaded and must
//! finish before the registry is shared.

mod query;

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::model::GlslFunction;

/// What to do when two records share a name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the build with [`RegistryError::DuplicateFunctionName`]
    #[default]
    Reject,
    /// Index the last record with a given name; earlier ones stay in the
    /// ordered sequence but cannot be found by name
    LastWriteWins,
}

/// Options for [`Registry::build_with`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

/// Immutable, indexed collection of function records for one module
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Records in construction order
    functions: Vec<GlslFunction>,

    /// Name to position in `functions`
    by_name: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry, rejecting duplicate names
    pub fn build(functions: Vec<GlslFunction>) -> Result<Self> {
        Self::build_with(functions, &BuildOptions::default())
    }

    /// Build a registry with explicit options
    pub fn build_with(functions: Vec<GlslFunction>, options: &BuildOptions) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(functions.len());
        let mut shadowed = 0usize;

        for (idx, function) in functions.iter().enumerate() {
            match by_name.entry(function.name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(mut slot) => match options.duplicate_policy {
                    DuplicatePolicy::Reject => {
                        return Err(RegistryError::DuplicateFunctionName {
                            name: function.name.clone(),
                            first: *slot.get(),
                            duplicate: idx,
                        });
                    }
                    DuplicatePolicy::LastWriteWins => {
                        tracing::warn!(
                            function = %function.name,
                            shadowed = *slot.get(),
                            by = idx,
                            "Duplicate function name, earlier record shadowed"
                        );
                        slot.insert(idx);
                        shadowed += 1;
                    }
                },
            }
        }

        tracing::debug!(
            functions = functions.len(),
            indexed = by_name.len(),
            shadowed,
            policy = ?options.duplicate_policy,
            "Built function registry"
        );

        Ok(Self { functions, by_name })
    }

    /// All records in construction order
    pub fn functions(&self) -> &[GlslFunction] {
        &self.functions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GlslFunction> {
        self.functions.iter()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Position of the indexed record called `name`
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Record at `position`, in construction order
    pub fn get(&self, position: usize) -> Option<&GlslFunction> {
        self.functions.get(position)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a GlslFunction;
    type IntoIter = std::slice::Iter<'a, GlslFunction>;

    fn into_iter(self) -> Self::IntoIter {
        self.functions.iter()
    }
}

const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();
};
