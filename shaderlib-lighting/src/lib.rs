//! shaderlib lighting module
//!
//! A loadable plugin exposing the lighting functions of the shader library.
//! Building this crate produces a cdylib exporting the plugin handshake
//! (`createPlugin`, `destroyPlugin`, `getPluginInfo`, `getPluginABIVersion`)
//! together with the `shaderlib_plugin_*` query surface from
//! `shaderlib-core`.

use shaderlib_core::{GlslFunction, Overload, PluginInfo, Result, ShaderModule};

pub const PLUGIN_NAME: &str = "lighting";
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PLUGIN_AUTHOR: &str = "shaderlib";

type Signature = (&'static str, &'static [&'static str]);

/// (name, path, overloads) in registry order
const FUNCTIONS: &[(&str, &str, &[Signature])] = &[
    (
        "ggx",
        "lighting/brdf/ggx.glsl",
        &[
            ("float", &["float", "float"]),
            ("float", &["vec3", "vec3", "float"]),
        ],
    ),
    (
        "beckmann",
        "lighting/brdf/beckmann.glsl",
        &[("float", &["float", "float"])],
    ),
    (
        "schlick",
        "lighting/fresnel/schlick.glsl",
        &[
            ("vec3", &["vec3", "float"]),
            ("float", &["float", "float"]),
        ],
    ),
    (
        "lambert",
        "lighting/diffuse/lambert.glsl",
        &[("float", &["vec3", "vec3"])],
    ),
    (
        "orenNayar",
        "lighting/diffuse/orenNayar.glsl",
        &[("float", &["vec3", "vec3", "vec3", "float"])],
    ),
    (
        "blinnPhong",
        "lighting/specular/blinnPhong.glsl",
        &[("float", &["vec3", "vec3", "vec3", "float"])],
    ),
    (
        "envBRDFApprox",
        "lighting/envMap/envBRDFApprox.glsl",
        &[("vec3", &["vec3", "float", "float"])],
    ),
    ("saturate", "math/saturate.glsl", &[]),
    ("PI", "math/const.glsl", &[("float", &[])]),
];

/// The module's function table
pub fn functions() -> Vec<GlslFunction> {
    FUNCTIONS
        .iter()
        .map(|(name, path, overloads)| {
            GlslFunction::new(*name, *path).with_overloads(
                overloads
                    .iter()
                    .map(|(ret, params)| Overload::new(*ret, params.iter().copied())),
            )
        })
        .collect()
}

/// Assemble this module
pub fn build() -> Result<ShaderModule> {
    let module = ShaderModule::new(
        PluginInfo::new(PLUGIN_NAME, PLUGIN_VERSION, PLUGIN_AUTHOR),
        functions(),
    )?;
    tracing::debug!(functions = module.registry().len(), "Lighting module ready");
    Ok(module)
}

shaderlib_core::export_plugin!(build);
