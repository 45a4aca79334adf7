//! Configuration module for linegram
//! Compile-time limits come from the TOML profile processed by build.rs;
//! runtime preferences come from environment variables or a TOML file.

// Include generated constants from build.rs
// This file is generated at compile time from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{
    ConfigError, GrammarPreferences, LoggingPreferences, RuntimeConfig, StreamPreferences,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("LINEGRAM_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("LINEGRAM_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time;

    #[test]
    fn test_generated_limits_are_sane() {
        assert!(compile_time::stream::LINE_LOG_CAPACITY > 0);
        assert!(compile_time::stream::MAX_SOURCE_SIZE > 0);
        assert!(compile_time::parsers::MAX_REPEAT_COUNT > 0);
        assert!(compile_time::parsers::MAX_RULE_DEPTH > 0);
        assert!(compile_time::grammar::MAX_WALK_STEPS > 0);
        assert!(compile_time::logging::MIN_EMITTED_LOG_LEVEL <= 2);
    }

    #[test]
    fn test_source_info_names_profile() {
        let info = super::build_info::source_info();
        assert!(info.ends_with(".toml"));
        assert!(info.contains(super::build_info::profile()));
    }
}
