//! Function records and plugin identity
//!
//! These are plain data: a concrete module hands a `Vec<GlslFunction>` and a
//! `PluginInfo` to [`ShaderModule::new`](crate::ShaderModule::new) and never
//! touches them again.

use serde::{Deserialize, Serialize};

/// Separator between path segments in [`GlslFunction::file_path`]
pub const PATH_SEPARATOR: char = '/';

/// One call signature of a shader function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Overload {
    /// GLSL return type (e.g. "vec3")
    pub return_type: String,

    /// Parameter types in call order
    #[serde(default)]
    pub param_types: Vec<String>,
}

impl Overload {
    pub fn new<R, I, P>(return_type: R, param_types: I) -> Self
    where
        R: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            return_type: return_type.into(),
            param_types: param_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.param_types.len()
    }
}

/// A named shader-library function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlslFunction {
    /// Lookup key within one registry
    pub name: String,

    /// Source path, e.g. "lighting/brdf/ggx.glsl"
    pub file_path: String,

    /// Known signatures; empty when no signature metadata is available
    #[serde(default)]
    pub overloads: Vec<Overload>,
}

impl GlslFunction {
    /// Create a function without signature metadata
    pub fn new(name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            overloads: Vec::new(),
        }
    }

    /// Attach overloads
    pub fn with_overloads(mut self, overloads: impl IntoIterator<Item = Overload>) -> Self {
        self.overloads = overloads.into_iter().collect();
        self
    }

    /// Leading path segment, or `None` when the path has no separator
    ///
    /// `"lighting/brdf/ggx.glsl"` belongs to `"lighting"`; `"ggx.glsl"`
    /// belongs to no category.
    pub fn category(&self) -> Option<&str> {
        self.file_path
            .split_once(PATH_SEPARATOR)
            .map(|(category, _)| category)
    }

    /// True if any overload returns `return_type`
    pub fn returns(&self, return_type: &str) -> bool {
        self.overloads.iter().any(|o| o.return_type == return_type)
    }

    /// True if any overload takes exactly `count` parameters
    pub fn accepts_arity(&self, count: usize) -> bool {
        self.overloads.iter().any(|o| o.arity() == count)
    }
}

/// Static identity of one plugin module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub author: String,
}

impl PluginInfo {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            author: author.into(),
        }
    }

    /// `"name:version:author"`, the format returned by `getPluginInfo`
    pub fn info_string(&self) -> String {
        format!("{}:{}:{}", self.name, self.version, self.author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_is_leading_segment() {
        let ggx = GlslFunction::new("ggx", "lighting/brdf/ggx.glsl");
        assert_eq!(ggx.category(), Some("lighting"));

        let flat = GlslFunction::new("flat", "flat.glsl");
        assert_eq!(flat.category(), None);

        // A leading slash yields an empty category, same as the raw prefix
        let rooted = GlslFunction::new("rooted", "/abs/path.glsl");
        assert_eq!(rooted.category(), Some(""));
    }

    #[test]
    fn test_overload_matching() {
        let schlick = GlslFunction::new("schlick", "lighting/fresnel/schlick.glsl").with_overloads([
            Overload::new("vec3", ["vec3", "float"]),
            Overload::new("float", ["float", "float"]),
        ]);

        assert!(schlick.returns("vec3"));
        assert!(schlick.returns("float"));
        assert!(!schlick.returns("vec4"));
        assert!(schlick.accepts_arity(2));
        assert!(!schlick.accepts_arity(0));
    }

    #[test]
    fn test_function_without_overloads_matches_nothing() {
        let saturate = GlslFunction::new("saturate", "common/math/saturate.glsl");
        assert!(!saturate.returns("float"));
        assert!(!saturate.accepts_arity(0));
    }

    #[test]
    fn test_info_string() {
        let info = PluginInfo::new("lighting", "1.2.0", "shaderlib");
        assert_eq!(info.info_string(), "lighting:1.2.0:shaderlib");
    }

    #[test]
    fn test_function_deserializes_without_overloads() {
        let f: GlslFunction =
            serde_json::from_str(r#"{"name":"saturate","file_path":"common/saturate.glsl"}"#)
                .unwrap();
        assert!(f.overloads.is_empty());
        assert_eq!(f.category(), Some("common"));
    }
}
