//! Configuration module for the Pascal front end
//! Compile-time limits come from the TOML profile through build.rs

// Generated by build.rs from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{ConfigError, RuntimeConfig};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("PASCAL_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("PASCAL_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_limits_are_sane() {
        assert!(compile_time::syntax::MAX_PARSE_DEPTH > 0);
        assert!(compile_time::neutralizer::MIN_REPAIRABLE_SPELLING > 0);
        assert!(
            compile_time::neutralizer::DEFAULT_MAX_EDIT_DISTANCE
                <= compile_time::neutralizer::MAX_EDIT_DISTANCE_LIMIT
        );
        assert!(compile_time::logging::EVENT_BUFFER_SIZE > 0);
    }

    #[test]
    fn test_source_info_names_profile() {
        assert!(build_info::source_info().ends_with(".toml"));
        assert!(build_info::source_info().contains(build_info::profile()));
    }
}
