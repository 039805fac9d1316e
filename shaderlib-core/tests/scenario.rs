//! End-to-end queries over the reference three-function module.
//!
//! ggx and schlick live under "lighting", saturate under "common" and carries
//! no signature metadata.

use shaderlib_core::{
    BuildOptions, DuplicatePolicy, GlslFunction, Overload, PluginInfo, Registry, RegistryError,
    ShaderModule,
};

fn reference_functions() -> Vec<GlslFunction> {
    vec![
        GlslFunction::new("ggx", "lighting/brdf/ggx.glsl")
            .with_overloads([Overload::new("float", ["float", "float"])]),
        GlslFunction::new("schlick", "lighting/fresnel/schlick.glsl")
            .with_overloads([Overload::new("vec3", ["vec3", "float"])]),
        GlslFunction::new("saturate", "common/math/saturate.glsl"),
    ]
}

fn reference_module() -> ShaderModule {
    ShaderModule::new(
        PluginInfo::new("reference", "1.0.0", "shaderlib"),
        reference_functions(),
    )
    .expect("reference module should build")
}

fn names(functions: Vec<&GlslFunction>) -> Vec<&str> {
    functions.into_iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_find_by_name_returns_the_record() {
    let module = reference_module();
    let plugin = module.plugin();

    let ggx = plugin.find_function("ggx").expect("ggx should be registered");
    assert_eq!(ggx.file_path, "lighting/brdf/ggx.glsl");
    assert_eq!(ggx.overloads, vec![Overload::new("float", ["float", "float"])]);

    assert!(plugin.find_function("blinnPhong").is_none());
}

#[test]
fn test_names_follow_insertion_order() {
    let module = reference_module();
    let plugin = module.plugin();
    assert_eq!(plugin.all_function_names(), vec!["ggx", "schlick", "saturate"]);
    assert_eq!(plugin.function_count(), 3);
}

#[test]
fn test_categories_are_sorted_leading_segments() {
    let module = reference_module();
    assert_eq!(module.plugin().available_categories(), vec!["common", "lighting"]);
}

#[test]
fn test_category_membership() {
    let module = reference_module();
    let plugin = module.plugin();
    assert_eq!(plugin.functions_by_category("lighting"), vec!["ggx", "schlick"]);
    assert_eq!(plugin.functions_by_category("common"), vec!["saturate"]);
}

#[test]
fn test_category_membership_is_substring_not_segment() {
    let module = reference_module();
    let plugin = module.plugin();

    // "gg" is no category but occurs in "ggx.glsl"
    assert_eq!(plugin.functions_by_category("gg"), vec!["ggx"]);
    // Inner segments match too
    assert_eq!(plugin.functions_by_category("fresnel"), vec!["schlick"]);
    assert_eq!(plugin.functions_by_category("math/sat"), vec!["saturate"]);

    // The strict variant only looks at the leading segment
    assert!(module.registry().in_category("gg").is_empty());
    assert!(module.registry().in_category("fresnel").is_empty());
}

#[test]
fn test_return_type_search() {
    let module = reference_module();
    let plugin = module.plugin();
    assert_eq!(names(plugin.find_functions_by_return_type("vec3")), vec!["schlick"]);
    assert_eq!(names(plugin.find_functions_by_return_type("float")), vec!["ggx"]);
    assert!(plugin.find_functions_by_return_type("vec4").is_empty());
}

#[test]
fn test_parameter_count_search() {
    let module = reference_module();
    let plugin = module.plugin();
    assert_eq!(
        names(plugin.find_functions_by_parameter_count(2)),
        vec!["ggx", "schlick"]
    );
}

#[test]
fn test_function_without_overloads_never_matches_arity() {
    // saturate has no signature metadata, so it has no zero-parameter overload
    let module = reference_module();
    assert!(module.plugin().find_functions_by_parameter_count(0).is_empty());
}

#[test]
fn test_nullary_overload_matches_zero_parameters() {
    let mut functions = reference_functions();
    functions[2] = GlslFunction::new("saturate", "common/math/saturate.glsl")
        .with_overloads([Overload::new("float", Vec::<String>::new())]);

    let registry = Registry::build(functions).unwrap();
    assert_eq!(names(registry.by_param_count(0)), vec!["saturate"]);
}

#[test]
fn test_duplicate_names_are_rejected() {
    let mut functions = reference_functions();
    functions.push(GlslFunction::new("schlick", "lighting/fresnel/schlickF0.glsl"));

    let err = Registry::build(functions).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::DuplicateFunctionName { ref name, first: 1, duplicate: 3 } if name == "schlick"
    ));
}

#[test]
fn test_duplicate_names_shadow_with_last_write_wins() {
    let mut functions = reference_functions();
    functions.push(GlslFunction::new("schlick", "lighting/fresnel/schlickF0.glsl"));

    let options = BuildOptions::new().with_duplicate_policy(DuplicatePolicy::LastWriteWins);
    let registry = Registry::build_with(functions, &options).unwrap();

    assert_eq!(
        registry.find_by_name("schlick").map(|f| f.file_path.as_str()),
        Some("lighting/fresnel/schlickF0.glsl")
    );
    // The shadowed record is still part of the ordered sequence
    assert_eq!(registry.count(), 4);
    assert_eq!(
        registry.all_names(),
        vec!["ggx", "schlick", "saturate", "schlick"]
    );
    // And still answers signature queries
    assert_eq!(names(registry.by_return_type("vec3")), vec!["schlick"]);
}
