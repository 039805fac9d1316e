//! FFI (Foreign Function Interface) for shaderlib plugins
//!
//! Two layers live here:
//!
//! - The **handshake** every plugin library exports (`createPlugin`,
//!   `destroyPlugin`, `getPluginInfo`, `getPluginABIVersion`). These are
//!   generated per plugin crate by [`export_plugin!`](crate::export_plugin)
//!   because the symbol names are fixed and each library has exactly one
//!   module.
//! - The **query surface** (`shaderlib_plugin_*`, `shaderlib_function_*`,
//!   `shaderlib_function_list_*`) that operates on a handle returned by
//!   `createPlugin`.
//!
//! ## Version Check
//!
//! A host must call `getPluginABIVersion` and compare it against its own
//! `PLUGIN_ABI_VERSION` before calling anything else. On mismatch the
//! library must not be used.
//!
//! ## Thread Safety
//!
//! A handle is immutable once `createPlugin` returns it, so any number of
//! threads may query it concurrently. `destroyPlugin` must not race with
//! queries on the same handle.
//!
//! ## Memory Management
//!
//! - Identity strings, function fields and function handles are borrowed
//!   from the plugin handle and stay valid until `destroyPlugin`. Do not
//!   free them.
//! - JSON strings returned by list queries and `shaderlib_last_error` are
//!   heap-allocated and must be freed with `shaderlib_free_string`.
//! - Function lists must be freed with `shaderlib_function_list_free` and
//!   must not outlive the plugin handle they came from.
//! - Strings passed to this API must be valid UTF-8 and null-terminated.
//!
//! ## Error Handling
//!
//! - "Not found" is never an error: lookups return null, lists come back
//!   empty.
//! - Invalid arguments (null handle, non-UTF-8 string) return null / zero
//!   and set a thread-local message readable with `shaderlib_last_error`.
//! - Nothing panics across the boundary; a module builder that fails or
//!   panics makes `createPlugin` return null.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::panic;
use std::ptr;

pub use libc::{c_char, c_int, size_t};

use crate::error::{RegistryError, Result};
use crate::model::GlslFunction;
use crate::plugin::{BasePlugin, ShaderModule};

// Thread-local storage for error messages
thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_error(msg: String) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = Some(msg);
    });
}

/// Clear the last error
fn clear_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

// ============================================================================
// String Helpers
// ============================================================================

/// Get the last error message.
///
/// Returns null if no error occurred.
/// The returned string must be freed with `shaderlib_free_string`.
#[no_mangle]
pub extern "C" fn shaderlib_last_error() -> *mut c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(msg) => string_to_c(msg),
        None => ptr::null_mut(),
    })
}

/// Free a string returned by this API.
///
/// # Safety
///
/// `s` must be null or a pointer obtained from this API that has not been
/// freed yet.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Borrow a C string argument as `&str`.
unsafe fn c_str_arg<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

/// Convert a Rust string to an owned C string.
fn string_to_c(s: &str) -> *mut c_char {
    CString::new(s)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

fn to_cstring(field: &str, value: &str) -> Result<CString> {
    CString::new(value).map_err(|_| RegistryError::PluginConstructionFailed {
        reason: format!("{} contains a NUL byte: {:?}", field, value),
    })
}

/// Serialize a name list to an owned JSON array string.
fn names_to_c(names: Vec<&str>) -> *mut c_char {
    match serde_json::to_string(&names) {
        Ok(json) => string_to_c(&json),
        Err(e) => {
            set_error(format!("Failed to serialize names: {}", e));
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Handles
// ============================================================================

/// C view of one function record
///
/// Fields are converted once when the plugin handle is created so that
/// accessors can hand out borrowed pointers.
pub struct FunctionHandle {
    name: CString,
    file_path: CString,
    category: Option<CString>,
    overload_count: usize,
    overloads_json: CString,
}

impl FunctionHandle {
    fn new(function: &GlslFunction) -> Result<Self> {
        Ok(Self {
            name: to_cstring("function name", &function.name)?,
            file_path: to_cstring("file path", &function.file_path)?,
            category: function
                .category()
                .map(|c| to_cstring("category", c))
                .transpose()?,
            overload_count: function.overloads.len(),
            overloads_json: to_cstring("overloads", &serde_json::to_string(&function.overloads)?)?,
        })
    }
}

/// Opaque plugin handle returned by `createPlugin`
pub struct PluginHandle {
    plugin: BasePlugin<'static>,
    name: CString,
    version: CString,
    author: CString,
    /// Parallel to the registry's records
    functions: Vec<FunctionHandle>,
}

impl PluginHandle {
    /// Wrap a module that lives for the rest of the process
    pub fn new(module: &'static ShaderModule) -> Result<Self> {
        let plugin = module.plugin();
        let functions = plugin
            .registry()
            .iter()
            .map(FunctionHandle::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: to_cstring("plugin name", plugin.name())?,
            version: to_cstring("plugin version", plugin.version())?,
            author: to_cstring("plugin author", plugin.author())?,
            plugin,
            functions,
        })
    }

    pub fn plugin(&self) -> &BasePlugin<'static> {
        &self.plugin
    }

    fn function_at(&self, position: usize) -> *const FunctionHandle {
        self.functions
            .get(position)
            .map_or(ptr::null(), |f| f as *const FunctionHandle)
    }

    fn list(&self, positions: Vec<usize>) -> *mut FunctionList {
        let items = positions
            .into_iter()
            .map(|idx| self.function_at(idx))
            .collect();
        Box::into_raw(Box::new(FunctionList { items }))
    }
}

/// Result list of function handles
pub struct FunctionList {
    items: Vec<*const FunctionHandle>,
}

// ============================================================================
// Handshake support (used by `export_plugin!`)
// ============================================================================

/// Run a module builder, absorbing errors and panics.
#[doc(hidden)]
pub fn build_module(builder: fn() -> Result<ShaderModule>) -> Option<ShaderModule> {
    match panic::catch_unwind(builder) {
        Ok(Ok(module)) => Some(module),
        Ok(Err(e)) => {
            tracing::error!(code = e.error_code(), "Plugin module failed to build: {}", e);
            set_error(format!("Failed to build plugin module: {}", e));
            None
        }
        Err(_) => {
            tracing::error!("Plugin module builder panicked");
            set_error("Plugin module builder panicked".to_string());
            None
        }
    }
}

/// Allocate a handle over a built module, or null.
#[doc(hidden)]
pub fn create_handle(module: Option<&'static ShaderModule>) -> *mut PluginHandle {
    clear_error();

    let Some(module) = module else {
        set_error("Plugin module is unavailable: it failed to build".to_string());
        return ptr::null_mut();
    };

    match panic::catch_unwind(|| PluginHandle::new(module)) {
        Ok(Ok(handle)) => Box::into_raw(Box::new(handle)),
        Ok(Err(e)) => {
            set_error(format!("Failed to create plugin: {}", e));
            ptr::null_mut()
        }
        Err(_) => {
            set_error("Plugin creation panicked".to_string());
            ptr::null_mut()
        }
    }
}

/// Free a handle from [`create_handle`].
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`create_handle`].
#[doc(hidden)]
pub unsafe fn destroy_handle(handle: *mut PluginHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// `"name:version:author"` for `getPluginInfo`.
#[doc(hidden)]
pub fn info_cstring(module: Option<&ShaderModule>) -> Option<CString> {
    module.and_then(|m| CString::new(m.info().info_string()).ok())
}

/// Export the plugin handshake for a module builder.
///
/// Generates `createPlugin`, `destroyPlugin`, `getPluginInfo` and
/// `getPluginABIVersion`. The builder runs at most once per loaded library;
/// its module is kept for the life of the process so every handle can
/// borrow from it. Invoke once per cdylib crate.
///
/// ```ignore
/// use shaderlib_core::{GlslFunction, PluginInfo, Result, ShaderModule};
///
/// fn build() -> Result<ShaderModule> {
///     ShaderModule::new(
///         PluginInfo::new("color", "1.0.0", "me"),
///         vec![GlslFunction::new("luma", "color/luma.glsl")],
///     )
/// }
///
/// shaderlib_core::export_plugin!(build);
/// ```
#[macro_export]
macro_rules! export_plugin {
    ($builder:path) => {
        static __SHADERLIB_MODULE: ::std::sync::OnceLock<
            ::std::option::Option<$crate::ShaderModule>,
        > = ::std::sync::OnceLock::new();

        static __SHADERLIB_INFO: ::std::sync::OnceLock<
            ::std::option::Option<::std::ffi::CString>,
        > = ::std::sync::OnceLock::new();

        fn __shaderlib_module() -> ::std::option::Option<&'static $crate::ShaderModule> {
            __SHADERLIB_MODULE
                .get_or_init(|| $crate::ffi::build_module($builder))
                .as_ref()
        }

        /// Create a plugin instance; null on failure.
        #[no_mangle]
        #[allow(non_snake_case)]
        pub extern "C" fn createPlugin() -> *mut $crate::ffi::PluginHandle {
            $crate::ffi::create_handle(__shaderlib_module())
        }

        /// Destroy a plugin instance.
        ///
        /// # Safety
        ///
        /// `handle` must be null or come from `createPlugin` of this library,
        /// and must not be destroyed twice.
        #[no_mangle]
        #[allow(non_snake_case)]
        pub unsafe extern "C" fn destroyPlugin(handle: *mut $crate::ffi::PluginHandle) {
            $crate::ffi::destroy_handle(handle)
        }

        /// Plugin info as "name:version:author"; static, do not free.
        #[no_mangle]
        #[allow(non_snake_case)]
        pub extern "C" fn getPluginInfo() -> *const $crate::ffi::c_char {
            __SHADERLIB_INFO
                .get_or_init(|| $crate::ffi::info_cstring(__shaderlib_module()))
                .as_ref()
                .map_or(::std::ptr::null(), |info| info.as_ptr())
        }

        /// Plugin ABI version for compatibility checking.
        #[no_mangle]
        #[allow(non_snake_case)]
        pub extern "C" fn getPluginABIVersion() -> $crate::ffi::c_int {
            $crate::PLUGIN_ABI_VERSION
        }
    };
}

// ============================================================================
// Plugin Query API
// ============================================================================

macro_rules! require_handle {
    ($handle:expr, $on_null:expr) => {
        match $handle.as_ref() {
            Some(h) => h,
            None => {
                set_error("Null plugin handle".to_string());
                return $on_null;
            }
        }
    };
}

macro_rules! require_str {
    ($arg:expr, $what:literal, $on_null:expr) => {
        match c_str_arg($arg) {
            Some(s) => s,
            None => {
                set_error(concat!("Null or invalid ", $what).to_string());
                return $on_null;
            }
        }
    };
}

/// Plugin name; borrowed from the handle.
///
/// # Safety
///
/// `handle` must be null or a live plugin handle.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_plugin_name(handle: *const PluginHandle) -> *const c_char {
    clear_error();
    require_handle!(handle, ptr::null()).name.as_ptr()
}

/// Plugin version; borrowed from the handle.
///
/// # Safety
///
/// `handle` must be null or a live plugin handle.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_plugin_version(handle: *const PluginHandle) -> *const c_char {
    clear_error();
    require_handle!(handle, ptr::null()).version.as_ptr()
}

/// Plugin author; borrowed from the handle.
///
/// # Safety
///
/// `handle` must be null or a live plugin handle.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_plugin_author(handle: *const PluginHandle) -> *const c_char {
    clear_error();
    require_handle!(handle, ptr::null()).author.as_ptr()
}

/// Look up a function by exact name.
///
/// Returns null if the function does not exist. The result is borrowed
/// from the handle.
///
/// # Safety
///
/// `handle` must be null or a live plugin handle; `name` must be null or a
/// null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_plugin_find_function(
    handle: *const PluginHandle,
    name: *const c_char,
) -> *const FunctionHandle {
    clear_error();
    let handle = require_handle!(handle, ptr::null());
    let name = require_str!(name, "function name", ptr::null());

    handle
        .plugin
        .registry()
        .position_of(name)
        .map_or(ptr::null(), |idx| handle.function_at(idx))
}

/// All function names as a JSON array, in registry order.
///
/// The returned string must be freed with `shaderlib_free_string`.
///
/// # Safety
///
/// `handle` must be null or a live plugin handle.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_plugin_all_function_names(
    handle: *const PluginHandle,
) -> *mut c_char {
    clear_error();
    let handle = require_handle!(handle, ptr::null_mut());
    names_to_c(handle.plugin.all_function_names())
}

/// Number of functions; zero for a null handle.
///
/// # Safety
///
/// `handle` must be null or a live plugin handle.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_plugin_function_count(handle: *const PluginHandle) -> size_t {
    clear_error();
    require_handle!(handle, 0).plugin.function_count()
}

/// Names of functions whose path contains `category`, as a JSON array.
///
/// The returned string must be freed with `shaderlib_free_string`.
///
/// # Safety
///
/// `handle` must be null or a live plugin handle; `category` must be null
/// or a null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_plugin_functions_by_category(
    handle: *const PluginHandle,
    category: *const c_char,
) -> *mut c_char {
    clear_error();
    let handle = require_handle!(handle, ptr::null_mut());
    let category = require_str!(category, "category", ptr::null_mut());
    names_to_c(handle.plugin.functions_by_category(category))
}

/// Sorted unique categories as a JSON array.
///
/// The returned string must be freed with `shaderlib_free_string`.
///
/// # Safety
///
/// `handle` must be null or a live plugin handle.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_plugin_available_categories(
    handle: *const PluginHandle,
) -> *mut c_char {
    clear_error();
    let handle = require_handle!(handle, ptr::null_mut());
    names_to_c(handle.plugin.available_categories())
}

/// Functions with an overload returning `return_type`.
///
/// Returns an empty list when nothing matches, null on invalid arguments.
/// Free with `shaderlib_function_list_free`.
///
/// # Safety
///
/// `handle` must be null or a live plugin handle; `return_type` must be
/// null or a null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_plugin_find_functions_by_return_type(
    handle: *const PluginHandle,
    return_type: *const c_char,
) -> *mut FunctionList {
    clear_error();
    let handle = require_handle!(handle, ptr::null_mut());
    let return_type = require_str!(return_type, "return type", ptr::null_mut());
    handle.list(handle.plugin.registry().positions_by_return_type(return_type))
}

/// Functions with an overload taking exactly `count` parameters.
///
/// Free with `shaderlib_function_list_free`.
///
/// # Safety
///
/// `handle` must be null or a live plugin handle.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_plugin_find_functions_by_parameter_count(
    handle: *const PluginHandle,
    count: size_t,
) -> *mut FunctionList {
    clear_error();
    let handle = require_handle!(handle, ptr::null_mut());
    handle.list(handle.plugin.registry().positions_by_param_count(count))
}

// ============================================================================
// Function Lists
// ============================================================================

/// Number of entries; zero for null.
///
/// # Safety
///
/// `list` must be null or a live function list.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_function_list_len(list: *const FunctionList) -> size_t {
    list.as_ref().map_or(0, |l| l.items.len())
}

/// Entry at `index`, or null when out of range.
///
/// # Safety
///
/// `list` must be null or a live function list whose plugin handle is
/// still alive.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_function_list_get(
    list: *const FunctionList,
    index: size_t,
) -> *const FunctionHandle {
    list.as_ref()
        .and_then(|l| l.items.get(index).copied())
        .unwrap_or(ptr::null())
}

/// Free a function list.
///
/// # Safety
///
/// `list` must be null or a function list that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_function_list_free(list: *mut FunctionList) {
    if !list.is_null() {
        drop(Box::from_raw(list));
    }
}

// ============================================================================
// Function Accessors
// ============================================================================

/// Function name; borrowed.
///
/// # Safety
///
/// `function` must be null or a function handle whose plugin is alive.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_function_name(function: *const FunctionHandle) -> *const c_char {
    function.as_ref().map_or(ptr::null(), |f| f.name.as_ptr())
}

/// Function source path; borrowed.
///
/// # Safety
///
/// `function` must be null or a function handle whose plugin is alive.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_function_file_path(
    function: *const FunctionHandle,
) -> *const c_char {
    function.as_ref().map_or(ptr::null(), |f| f.file_path.as_ptr())
}

/// Leading path segment; null when the path has none.
///
/// # Safety
///
/// `function` must be null or a function handle whose plugin is alive.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_function_category(
    function: *const FunctionHandle,
) -> *const c_char {
    function
        .as_ref()
        .and_then(|f| f.category.as_ref())
        .map_or(ptr::null(), |c| c.as_ptr())
}

/// Number of overloads.
///
/// # Safety
///
/// `function` must be null or a function handle whose plugin is alive.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_function_overload_count(
    function: *const FunctionHandle,
) -> size_t {
    function.as_ref().map_or(0, |f| f.overload_count)
}

/// Overloads as a JSON array of `{return_type, param_types}`; borrowed.
///
/// # Safety
///
/// `function` must be null or a function handle whose plugin is alive.
#[no_mangle]
pub unsafe extern "C" fn shaderlib_function_overloads_json(
    function: *const FunctionHandle,
) -> *const c_char {
    function
        .as_ref()
        .map_or(ptr::null(), |f| f.overloads_json.as_ptr())
}

// ============================================================================
// Version Info
// ============================================================================

/// Get the shaderlib core version.
///
/// Returns a static string (do not free).
#[no_mangle]
pub extern "C" fn shaderlib_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Get the plugin ABI version this core implements.
#[no_mangle]
pub extern "C" fn shaderlib_abi_version() -> c_int {
    crate::PLUGIN_ABI_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Overload, PluginInfo};

    fn leaked_module() -> &'static ShaderModule {
        let module = ShaderModule::new(
            PluginInfo::new("lighting", "0.3.1", "shaderlib"),
            vec![
                GlslFunction::new("ggx", "lighting/brdf/ggx.glsl")
                    .with_overloads([Overload::new("float", ["float", "float"])]),
                GlslFunction::new("schlick", "lighting/fresnel/schlick.glsl")
                    .with_overloads([Overload::new("vec3", ["vec3", "float"])]),
                GlslFunction::new("saturate", "saturate.glsl"),
            ],
        )
        .unwrap();
        Box::leak(Box::new(module))
    }

    unsafe fn read(s: *const c_char) -> String {
        assert!(!s.is_null());
        CStr::from_ptr(s).to_str().unwrap().to_string()
    }

    unsafe fn read_owned(s: *mut c_char) -> String {
        let out = read(s);
        shaderlib_free_string(s);
        out
    }

    #[test]
    fn test_handle_lifecycle() {
        let handle = create_handle(Some(leaked_module()));
        assert!(!handle.is_null());

        unsafe {
            assert_eq!(read(shaderlib_plugin_name(handle)), "lighting");
            assert_eq!(read(shaderlib_plugin_version(handle)), "0.3.1");
            assert_eq!(read(shaderlib_plugin_author(handle)), "shaderlib");
            assert_eq!(shaderlib_plugin_function_count(handle), 3);
            destroy_handle(handle);
        }
    }

    #[test]
    fn test_find_function() {
        let handle = create_handle(Some(leaked_module()));
        let name = CString::new("schlick").unwrap();
        let missing = CString::new("blinn").unwrap();

        unsafe {
            let f = shaderlib_plugin_find_function(handle, name.as_ptr());
            assert!(!f.is_null());
            assert_eq!(read(shaderlib_function_name(f)), "schlick");
            assert_eq!(read(shaderlib_function_file_path(f)), "lighting/fresnel/schlick.glsl");
            assert_eq!(read(shaderlib_function_category(f)), "lighting");
            assert_eq!(shaderlib_function_overload_count(f), 1);
            let overloads: Vec<Overload> =
                serde_json::from_str(&read(shaderlib_function_overloads_json(f))).unwrap();
            assert_eq!(overloads, vec![Overload::new("vec3", ["vec3", "float"])]);

            // Not found is null without an error
            assert!(shaderlib_plugin_find_function(handle, missing.as_ptr()).is_null());
            assert!(shaderlib_last_error().is_null());

            destroy_handle(handle);
        }
    }

    #[test]
    fn test_uncategorized_function_has_null_category() {
        let handle = create_handle(Some(leaked_module()));
        let name = CString::new("saturate").unwrap();
        unsafe {
            let f = shaderlib_plugin_find_function(handle, name.as_ptr());
            assert!(shaderlib_function_category(f).is_null());
            assert_eq!(read(shaderlib_function_overloads_json(f)), "[]");
            destroy_handle(handle);
        }
    }

    #[test]
    fn test_name_lists_as_json() {
        let handle = create_handle(Some(leaked_module()));
        let category = CString::new("lighting").unwrap();

        unsafe {
            let names: Vec<String> =
                serde_json::from_str(&read_owned(shaderlib_plugin_all_function_names(handle)))
                    .unwrap();
            assert_eq!(names, vec!["ggx", "schlick", "saturate"]);

            let names: Vec<String> = serde_json::from_str(&read_owned(
                shaderlib_plugin_functions_by_category(handle, category.as_ptr()),
            ))
            .unwrap();
            assert_eq!(names, vec!["ggx", "schlick"]);

            let categories: Vec<String> =
                serde_json::from_str(&read_owned(shaderlib_plugin_available_categories(handle)))
                    .unwrap();
            assert_eq!(categories, vec!["lighting"]);

            destroy_handle(handle);
        }
    }

    #[test]
    fn test_function_lists() {
        let handle = create_handle(Some(leaked_module()));
        let vec3 = CString::new("vec3").unwrap();
        let mat4 = CString::new("mat4").unwrap();

        unsafe {
            let list = shaderlib_plugin_find_functions_by_return_type(handle, vec3.as_ptr());
            assert_eq!(shaderlib_function_list_len(list), 1);
            assert_eq!(read(shaderlib_function_name(shaderlib_function_list_get(list, 0))), "schlick");
            assert!(shaderlib_function_list_get(list, 1).is_null());
            shaderlib_function_list_free(list);

            let list = shaderlib_plugin_find_functions_by_parameter_count(handle, 2);
            assert_eq!(shaderlib_function_list_len(list), 2);
            shaderlib_function_list_free(list);

            // Empty, not null
            let list = shaderlib_plugin_find_functions_by_return_type(handle, mat4.as_ptr());
            assert!(!list.is_null());
            assert_eq!(shaderlib_function_list_len(list), 0);
            shaderlib_function_list_free(list);

            destroy_handle(handle);
        }
    }

    #[test]
    fn test_null_arguments_set_error() {
        let name = CString::new("ggx").unwrap();
        unsafe {
            assert!(shaderlib_plugin_find_function(ptr::null(), name.as_ptr()).is_null());
            let error = read_owned(shaderlib_last_error());
            assert!(error.contains("Null plugin handle"));

            assert_eq!(shaderlib_plugin_function_count(ptr::null()), 0);
            assert!(shaderlib_plugin_all_function_names(ptr::null()).is_null());
            assert_eq!(shaderlib_function_list_len(ptr::null()), 0);
            assert!(shaderlib_function_name(ptr::null()).is_null());

            let handle = create_handle(Some(leaked_module()));
            assert!(shaderlib_plugin_find_function(handle, ptr::null()).is_null());
            let error = read_owned(shaderlib_last_error());
            assert!(error.contains("function name"));
            destroy_handle(handle);

            // Both are no-ops on null
            destroy_handle(ptr::null_mut());
            shaderlib_function_list_free(ptr::null_mut());
        }
    }

    #[test]
    fn test_failed_module_yields_null_handle() {
        fn failing() -> Result<ShaderModule> {
            ShaderModule::new(
                PluginInfo::new("dup", "1.0.0", "test"),
                vec![
                    GlslFunction::new("a", "x/a.glsl"),
                    GlslFunction::new("a", "y/a.glsl"),
                ],
            )
        }

        fn panicking() -> Result<ShaderModule> {
            panic!("generated table is corrupt")
        }

        assert!(build_module(failing).is_none());
        assert!(build_module(panicking).is_none());
        assert!(create_handle(None).is_null());

        let error = unsafe { read_owned(shaderlib_last_error()) };
        assert!(error.contains("failed to build"));
        assert!(info_cstring(None).is_none());
    }

    #[test]
    fn test_nul_byte_in_record_fails_creation() {
        let module = ShaderModule::new(
            PluginInfo::new("bad", "1.0.0", "test"),
            vec![GlslFunction::new("bad\0name", "x/bad.glsl")],
        )
        .unwrap();
        let module: &'static ShaderModule = Box::leak(Box::new(module));

        assert!(create_handle(Some(module)).is_null());
        let error = unsafe { read_owned(shaderlib_last_error()) };
        assert!(error.contains("NUL byte"));
    }

    #[test]
    fn test_version_functions() {
        let version = unsafe { read(shaderlib_version()) };
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
        assert_eq!(shaderlib_abi_version(), crate::PLUGIN_ABI_VERSION);
    }
}
