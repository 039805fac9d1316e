//! Plugin facade
//!
//! [`ShaderPlugin`] is the query contract every module answers. Most modules
//! never implement it by hand: they assemble a [`ShaderModule`] (identity +
//! registry) and hand out [`BasePlugin`] views over it.
//!
//! ```text
//!   concrete module               host
//!   ───────────────               ────
//!   ShaderModule ◀──borrows── BasePlugin<'_> ──▶ dyn ShaderPlugin
//!     ├─ PluginInfo
//!     └─ Registry
//! ```
//!
//! A `BasePlugin` cannot outlive the module it borrows from; across the C
//! ABI the module lives in a per-library static instead (see
//! [`export_plugin!`](crate::export_plugin)).

use crate::error::Result;
use crate::model::{GlslFunction, PluginInfo};
use crate::registry::{BuildOptions, Registry};

/// Query contract shared by every shader-library plugin
pub trait ShaderPlugin {
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    fn author(&self) -> &str;

    fn find_function(&self, name: &str) -> Option<&GlslFunction>;
    fn all_function_names(&self) -> Vec<&str>;
    fn function_count(&self) -> usize;

    /// Substring match against each function's source path
    fn functions_by_category(&self, category: &str) -> Vec<&str>;
    fn available_categories(&self) -> Vec<&str>;

    fn find_functions_by_return_type(&self, return_type: &str) -> Vec<&GlslFunction>;
    fn find_functions_by_parameter_count(&self, count: usize) -> Vec<&GlslFunction>;

    /// `"name:version:author"`
    fn info_string(&self) -> String {
        format!("{}:{}:{}", self.name(), self.version(), self.author())
    }
}

/// Base plugin implementation over borrowed module data
///
/// Every query delegates straight to the [`Registry`].
#[derive(Debug, Clone, Copy)]
pub struct BasePlugin<'a> {
    info: &'a PluginInfo,
    registry: &'a Registry,
}

impl<'a> BasePlugin<'a> {
    pub fn new(info: &'a PluginInfo, registry: &'a Registry) -> Self {
        Self { info, registry }
    }

    pub fn info(&self) -> &'a PluginInfo {
        self.info
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    // Results borrow the module data, not this view

    pub fn name(&self) -> &'a str {
        &self.info.name
    }

    pub fn version(&self) -> &'a str {
        &self.info.version
    }

    pub fn author(&self) -> &'a str {
        &self.info.author
    }

    pub fn find_function(&self, name: &str) -> Option<&'a GlslFunction> {
        self.registry.find_by_name(name)
    }

    pub fn all_function_names(&self) -> Vec<&'a str> {
        self.registry.all_names()
    }

    pub fn function_count(&self) -> usize {
        self.registry.count()
    }

    pub fn functions_by_category(&self, category: &str) -> Vec<&'a str> {
        self.registry.by_category(category)
    }

    pub fn available_categories(&self) -> Vec<&'a str> {
        self.registry.available_categories()
    }

    pub fn find_functions_by_return_type(&self, return_type: &str) -> Vec<&'a GlslFunction> {
        self.registry.by_return_type(return_type)
    }

    pub fn find_functions_by_parameter_count(&self, count: usize) -> Vec<&'a GlslFunction> {
        self.registry.by_param_count(count)
    }
}

impl ShaderPlugin for BasePlugin<'_> {
    fn name(&self) -> &str {
        BasePlugin::name(self)
    }

    fn version(&self) -> &str {
        BasePlugin::version(self)
    }

    fn author(&self) -> &str {
        BasePlugin::author(self)
    }

    fn find_function(&self, name: &str) -> Option<&GlslFunction> {
        BasePlugin::find_function(self, name)
    }

    fn all_function_names(&self) -> Vec<&str> {
        BasePlugin::all_function_names(self)
    }

    fn function_count(&self) -> usize {
        BasePlugin::function_count(self)
    }

    fn functions_by_category(&self, category: &str) -> Vec<&str> {
        BasePlugin::functions_by_category(self, category)
    }

    fn available_categories(&self) -> Vec<&str> {
        BasePlugin::available_categories(self)
    }

    fn find_functions_by_return_type(&self, return_type: &str) -> Vec<&GlslFunction> {
        BasePlugin::find_functions_by_return_type(self, return_type)
    }

    fn find_functions_by_parameter_count(&self, count: usize) -> Vec<&GlslFunction> {
        BasePlugin::find_functions_by_parameter_count(self, count)
    }
}

/// One module's data: identity plus a built registry
#[derive(Debug, Clone)]
pub struct ShaderModule {
    info: PluginInfo,
    registry: Registry,
}

impl ShaderModule {
    /// Build a module, rejecting duplicate function names
    pub fn new(info: PluginInfo, functions: Vec<GlslFunction>) -> Result<Self> {
        Self::with_options(info, functions, &BuildOptions::default())
    }

    pub fn with_options(
        info: PluginInfo,
        functions: Vec<GlslFunction>,
        options: &BuildOptions,
    ) -> Result<Self> {
        let registry = Registry::build_with(functions, options)?;
        tracing::debug!(
            plugin = %info.name,
            version = %info.version,
            functions = registry.len(),
            "Assembled shader module"
        );
        Ok(Self { info, registry })
    }

    pub fn info(&self) -> &PluginInfo {
        &self.info
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Facade borrowing this module
    pub fn plugin(&self) -> BasePlugin<'_> {
        BasePlugin::new(&self.info, &self.registry)
    }
}

const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShaderModule>();
    assert_send_sync::<BasePlugin<'static>>();
};
