/// Logger configuration: minimum level and per-tag debug/verbose switches
///
/// Populated from command-line arguments by `init_from_args`, or set directly
/// by embedders and tests through `set_logger_config` / `update_logger_config`.
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Messages above this level are dropped
    pub min_level: LogLevel,
    /// Tags with --debug-<tag> enabled
    pub debug_tags: HashSet<String>,
    /// Tags with --verbose-<tag> enabled
    pub verbose_tags: HashSet<String>,
    /// When non-empty, only these tags are shown (errors excepted)
    pub enabled_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

/// Mutate the logger configuration in place
pub fn update_logger_config<F>(update_fn: F)
where
    F: FnOnce(&mut LoggerConfig),
{
    let mut config = LOGGER_CONFIG.write();
    update_fn(&mut config);
}

/// Build a configuration from an argument list
///
/// Recognized flags:
/// - `--debug-<tag>` enables debug output for one tag (`--debug-all` for every tag)
/// - `--verbose` enables verbose output everywhere, `--verbose-<tag>` for one tag
/// - `--quiet` limits output to warnings and errors
/// - `--only-<tag>` restricts output to the listed tags
pub fn config_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for arg in args {
        if arg == "--quiet" {
            config.min_level = LogLevel::Warning;
        } else if arg == "--verbose" {
            config.min_level = LogLevel::Verbose;
        } else if let Some(tag) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(tag.to_lowercase());
            if config.min_level < LogLevel::Debug {
                config.min_level = LogLevel::Debug;
            }
        } else if let Some(tag) = arg.strip_prefix("--verbose-") {
            config.verbose_tags.insert(tag.to_lowercase());
            config.debug_tags.insert(tag.to_lowercase());
            config.min_level = LogLevel::Verbose;
        } else if let Some(tag) = arg.strip_prefix("--only-") {
            config.enabled_tags.insert(tag.to_lowercase());
        }
    }

    config
}

/// True for the flags `config_from_args` consumes
pub fn is_logger_flag(arg: &str) -> bool {
    arg == "--quiet"
        || arg == "--verbose"
        || arg.starts_with("--debug-")
        || arg.starts_with("--verbose-")
        || arg.starts_with("--only-")
}

/// Initialize the logger configuration from the process arguments
///
/// Returns the arguments left over for the tool's own parser.
pub fn init_from_args() -> Vec<String> {
    let (logger_args, rest): (Vec<String>, Vec<String>) =
        std::env::args().partition(|arg| is_logger_flag(arg));
    set_logger_config(config_from_args(&logger_args));
    rest
}

pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = LOGGER_CONFIG.read();
    config.debug_tags.contains("all") || config.debug_tags.contains(&tag.to_debug_key())
}

pub fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    LOGGER_CONFIG
        .read()
        .verbose_tags
        .contains(&tag.to_debug_key())
}
