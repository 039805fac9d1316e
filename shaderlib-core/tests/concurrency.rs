//! Concurrent reads against one shared module.

use shaderlib_core::{ManifestLoader, ShaderModule};

const LIGHTING: &str = include_str!("../../manifests/lighting.json");

fn lighting() -> ShaderModule {
    ManifestLoader::new()
        .load_from_json(LIGHTING)
        .and_then(|manifest| manifest.into_module())
        .expect("lighting manifest should load")
}

#[test]
fn test_parallel_queries_agree() {
    let module = lighting();
    let expected_names = module.plugin().all_function_names();
    let expected_categories = module.plugin().available_categories();

    crossbeam::scope(|s| {
        for worker in 0..8 {
            let module = &module;
            let expected_names = &expected_names;
            let expected_categories = &expected_categories;
            s.spawn(move |_| {
                let plugin = module.plugin();
                for _ in 0..200 {
                    assert_eq!(&plugin.all_function_names(), expected_names);
                    assert_eq!(&plugin.available_categories(), expected_categories);
                    assert!(plugin.find_function("ggx").is_some());
                    assert_eq!(
                        plugin.find_functions_by_parameter_count(worker % 4).len(),
                        module.registry().by_param_count(worker % 4).len()
                    );
                }
            });
        }
    })
    .unwrap();
}

#[test]
fn test_plugins_are_shareable_across_threads() {
    let module = lighting();
    let plugin = module.plugin();

    let counts: Vec<usize> = crossbeam::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move |_| plugin.function_count()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
    .unwrap();

    assert!(counts.iter().all(|&c| c == module.registry().count()));
}
