// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    syntax: SyntaxLimits,
    neutralizer: NeutralizerLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_parse_depth: usize,
    max_context_stack_depth: usize,
    max_token_count: usize,
}

#[derive(serde::Deserialize)]
struct NeutralizerLimits {
    default_max_edit_distance: usize,
    min_repairable_spelling: usize,
    max_edit_distance_limit: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_log_message_length: usize,
    max_warnings_per_analysis: usize,
    event_buffer_size: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PASCAL_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=PASCAL_CONFIG_DIR");

    let profile = env::var("PASCAL_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("PASCAL_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Profiles live at the workspace root, next to the member crates
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_PARSE_DEPTH: usize = 4096;

    if config.syntax.max_parse_depth == 0 {
        panic!("max_parse_depth must be greater than zero");
    }

    if config.syntax.max_parse_depth > ABSOLUTE_MAX_PARSE_DEPTH {
        panic!("max_parse_depth exceeds absolute maximum ({})", ABSOLUTE_MAX_PARSE_DEPTH);
    }

    if config.neutralizer.default_max_edit_distance > config.neutralizer.max_edit_distance_limit {
        panic!("default_max_edit_distance exceeds max_edit_distance_limit");
    }

    if config.neutralizer.min_repairable_spelling == 0 {
        panic!("min_repairable_spelling must be greater than zero");
    }

    if config.logging.event_buffer_size == 0 {
        panic!("event_buffer_size must be greater than zero");
    }

    if profile == "production" && config.neutralizer.max_edit_distance_limit > 2 {
        panic!("PRODUCTION: max_edit_distance_limit too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod syntax {{
        pub const MAX_PARSE_DEPTH: usize = {};
        pub const MAX_CONTEXT_STACK_DEPTH: usize = {};
        pub const MAX_TOKEN_COUNT: usize = {};
    }}

    pub mod neutralizer {{
        pub const DEFAULT_MAX_EDIT_DISTANCE: usize = {};
        pub const MIN_REPAIRABLE_SPELLING: usize = {};
        pub const MAX_EDIT_DISTANCE_LIMIT: usize = {};
    }}

    pub mod logging {{
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_WARNINGS_PER_ANALYSIS: usize = {};
        pub const EVENT_BUFFER_SIZE: usize = {};
    }}
}}
"#,
        profile,
        // Syntax
        config.syntax.max_parse_depth,
        config.syntax.max_context_stack_depth,
        config.syntax.max_token_count,
        // Neutralizer
        config.neutralizer.default_max_edit_distance,
        config.neutralizer.min_repairable_spelling,
        config.neutralizer.max_edit_distance_limit,
        // Logging
        config.logging.max_log_message_length,
        config.logging.max_warnings_per_analysis,
        config.logging.event_buffer_size,
    );

    fs::write(output_path, constants_code).unwrap();
}
