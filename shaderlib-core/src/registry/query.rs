//! Read-only queries over a built registry

use std::collections::BTreeSet;

use super::Registry;
use crate::model::GlslFunction;

impl Registry {
    /// Exact-name lookup
    pub fn find_by_name(&self, name: &str) -> Option<&GlslFunction> {
        self.position_of(name).map(|idx| &self.functions[idx])
    }

    /// Every record's name, in construction order
    pub fn all_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn count(&self) -> usize {
        self.functions.len()
    }

    /// Names of functions whose `file_path` contains `category` anywhere
    ///
    /// This is plain substring containment, not segment matching: `"gg"`
    /// matches `"lighting/brdf/ggx.glsl"`. Use [`Registry::in_category`] for
    /// leading-segment membership.
    pub fn by_category(&self, category: &str) -> Vec<&str> {
        self.functions
            .iter()
            .filter(|f| f.file_path.contains(category))
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Names of functions whose leading path segment equals `category`
    pub fn in_category(&self, category: &str) -> Vec<&str> {
        self.functions
            .iter()
            .filter(|f| f.category() == Some(category))
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Unique leading path segments, ascending
    pub fn available_categories(&self) -> Vec<&str> {
        self.functions
            .iter()
            .filter_map(GlslFunction::category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Functions with at least one overload returning `return_type`
    pub fn by_return_type(&self, return_type: &str) -> Vec<&GlslFunction> {
        self.functions
            .iter()
            .filter(|f| f.returns(return_type))
            .collect()
    }

    /// Functions with at least one overload taking exactly `count` parameters
    pub fn by_param_count(&self, count: usize) -> Vec<&GlslFunction> {
        self.functions
            .iter()
            .filter(|f| f.accepts_arity(count))
            .collect()
    }

    /// Positions matched by [`Registry::by_return_type`]
    pub(crate) fn positions_by_return_type(&self, return_type: &str) -> Vec<usize> {
        self.positions_where(|f| f.returns(return_type))
    }

    /// Positions matched by [`Registry::by_param_count`]
    pub(crate) fn positions_by_param_count(&self, count: usize) -> Vec<usize> {
        self.positions_where(|f| f.accepts_arity(count))
    }

    fn positions_where(&self, predicate: impl Fn(&GlslFunction) -> bool) -> Vec<usize> {
        self.functions
            .iter()
            .enumerate()
            .filter(|(_, f)| predicate(*f))
            .map(|(idx, _)| idx)
            .collect()
    }
}
