// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    stream: StreamLimits,
    parsers: ParserLimits,
    grammar: GrammarLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct StreamLimits {
    line_log_capacity: usize,
    max_source_size: u64,
}

#[derive(serde::Deserialize)]
struct ParserLimits {
    max_repeat_count: usize,
    max_rule_depth: usize,
}

#[derive(serde::Deserialize)]
struct GrammarLimits {
    max_walk_steps: usize,
    max_states: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    min_emitted_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LINEGRAM_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=LINEGRAM_CONFIG_DIR");

    let profile = env::var("LINEGRAM_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("LINEGRAM_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of the linegram directory)
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
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_SOURCE_SIZE: u64 = 1_000_000_000;

    if config.stream.line_log_capacity == 0 {
        panic!("LIMITS: line_log_capacity must be at least 1");
    }

    if config.stream.max_source_size > ABSOLUTE_MAX_SOURCE_SIZE {
        panic!("LIMITS: max_source_size exceeds absolute maximum");
    }

    if config.parsers.max_repeat_count == 0 || config.parsers.max_rule_depth == 0 {
        panic!("LIMITS: parser limits must be non-zero");
    }

    if config.grammar.max_walk_steps == 0 {
        panic!("LIMITS: max_walk_steps must be non-zero");
    }

    if config.logging.min_emitted_log_level > 2 {
        panic!("LIMITS: min_emitted_log_level too high (max: 2)");
    }

    if profile == "production" && config.parsers.max_rule_depth > 10_000 {
        panic!("PRODUCTION: max_rule_depth too high for production");
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
    pub mod stream {{
        pub const LINE_LOG_CAPACITY: usize = {};
        pub const MAX_SOURCE_SIZE: u64 = {};
    }}

    pub mod parsers {{
        pub const MAX_REPEAT_COUNT: usize = {};
        pub const MAX_RULE_DEPTH: usize = {};
    }}

    pub mod grammar {{
        pub const MAX_WALK_STEPS: usize = {};
        pub const MAX_STATES: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MIN_EMITTED_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // Stream
        config.stream.line_log_capacity,
        config.stream.max_source_size,
        // Parsers
        config.parsers.max_repeat_count,
        config.parsers.max_rule_depth,
        // Grammar
        config.grammar.max_walk_steps,
        config.grammar.max_states,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.min_emitted_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
