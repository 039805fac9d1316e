//! shaderlib Query CLI - inspect a shader module manifest
//!
//! Loads a module manifest, builds its registry and runs one query against
//! it, the same queries a host issues through the plugin ABI.
//!
//! Usage:
//!     shaderlib-query --manifest manifests/lighting.json info
//!     shaderlib-query find ggx
//!     shaderlib-query category lighting
//!     shaderlib-query --json params 2
//!
//! Logging is controlled with `SHADERLIB_LOG` (e.g. `SHADERLIB_LOG=debug`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use shaderlib_core::{
    DuplicatePolicy, GlslFunction, ManifestLoader, RegistryError, Result, ShaderModule,
    ShaderPlugin,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "shaderlib-query")]
#[command(about = "Query a GLSL shader module manifest")]
#[command(version)]
struct Args {
    /// Path to the module manifest (default: looks for manifests/lighting.json)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Index the last record when names collide instead of failing
    #[arg(long)]
    allow_duplicates: bool,

    /// Skip manifest validation
    #[arg(long)]
    skip_validation: bool,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    query: Query,
}

#[derive(Subcommand, Debug)]
enum Query {
    /// Plugin identity as name:version:author
    Info,
    /// Look up one function by exact name
    Find { name: String },
    /// All function names in registry order
    Names,
    /// Number of functions
    Count,
    /// Functions whose source path contains CATEGORY
    Category { category: String },
    /// Unique leading path segments
    Categories,
    /// Functions with an overload returning TYPE
    ReturnType {
        #[arg(value_name = "TYPE")]
        return_type: String,
    },
    /// Functions with an overload taking exactly COUNT parameters
    Params { count: usize },
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let module = match load_module(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&e.to_error_response()).unwrap_or_default()
                );
            } else {
                eprintln!("Error loading module: {}", e);
            }
            std::process::exit(1);
        }
    };

    let plugin = module.plugin();
    let output = run_query(&plugin, &args.query);

    if args.json {
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        output_text(&output);
    }

    if matches!(output, Output::Function(None)) {
        std::process::exit(2);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "shaderlib_core=debug"
    } else {
        "shaderlib_core=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("SHADERLIB_LOG")
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_module(args: &Args) -> Result<ShaderModule> {
    let path = resolve_manifest_path(&args.manifest);
    tracing::debug!(path = %path.display(), "Using manifest");

    // Validate after the policy override so duplicates can be allowed
    let mut manifest = ManifestLoader::new().skip_validation().load_from_file(&path)?;
    if args.allow_duplicates {
        manifest.options.duplicate_policy = DuplicatePolicy::LastWriteWins;
    }

    if !args.skip_validation {
        manifest
            .validate()
            .map_err(|errors| RegistryError::InvalidManifest {
                reason: errors.join("; "),
            })?;
    }

    manifest.into_module()
}

fn resolve_manifest_path(path: &Option<PathBuf>) -> PathBuf {
    if let Some(p) = path {
        return p.clone();
    }

    let default_paths = [
        PathBuf::from("manifests/lighting.json"),
        PathBuf::from("../manifests/lighting.json"),
        PathBuf::from("lighting.json"),
    ];

    default_paths
        .iter()
        .find(|p| p.exists())
        .cloned()
        .unwrap_or_else(|| default_paths[0].clone())
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Output {
    Info(String),
    Function(Option<GlslFunction>),
    Names(Vec<String>),
    Count(usize),
    Functions(Vec<GlslFunction>),
}

fn run_query(plugin: &dyn ShaderPlugin, query: &Query) -> Output {
    fn owned(names: Vec<&str>) -> Vec<String> {
        names.into_iter().map(str::to_string).collect()
    }

    fn cloned(functions: Vec<&GlslFunction>) -> Vec<GlslFunction> {
        functions.into_iter().cloned().collect()
    }

    match query {
        Query::Info => Output::Info(plugin.info_string()),
        Query::Find { name } => Output::Function(plugin.find_function(name).cloned()),
        Query::Names => Output::Names(owned(plugin.all_function_names())),
        Query::Count => Output::Count(plugin.function_count()),
        Query::Category { category } => {
            Output::Names(owned(plugin.functions_by_category(category)))
        }
        Query::Categories => Output::Names(owned(plugin.available_categories())),
        Query::ReturnType { return_type } => {
            Output::Functions(cloned(plugin.find_functions_by_return_type(return_type)))
        }
        Query::Params { count } => {
            Output::Functions(cloned(plugin.find_functions_by_parameter_count(*count)))
        }
    }
}

fn output_text(output: &Output) {
    match output {
        Output::Info(info) => println!("{}", info),
        Output::Function(Some(function)) => print_function(function),
        Output::Function(None) => eprintln!("Function not found"),
        Output::Names(names) => {
            for name in names {
                println!("{}", name);
            }
        }
        Output::Count(count) => println!("{}", count),
        Output::Functions(functions) => {
            for function in functions {
                print_function(function);
            }
            println!();
            println!("Total: {} functions", functions.len());
        }
    }
}

fn print_function(function: &GlslFunction) {
    println!("{}  ({})", function.name, function.file_path);
    if function.overloads.is_empty() {
        println!("    <no signature metadata>");
    }
    for overload in &function.overloads {
        println!(
            "    {} {}({})",
            overload.return_type,
            function.name,
            overload.param_types.join(", ")
        );
    }
}
