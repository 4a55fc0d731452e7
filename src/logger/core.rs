/// Level and tag filtering in front of the formatter
use super::config::{get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Decide whether a message is emitted
///
/// Errors always pass. Debug output needs `--debug-<tag>`; verbose output needs
/// `--verbose` or `--verbose-<tag>`. Info and warnings respect `--quiet` and
/// any `--only-<tag>` restriction.
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    match level {
        LogLevel::Error => true,
        _ if level > config.min_level => false,
        LogLevel::Debug => is_debug_enabled_for_tag(tag),
        LogLevel::Verbose => config.verbose_tags.is_empty() || is_verbose_enabled_for_tag(tag),
        LogLevel::Warning | LogLevel::Info => {
            config.enabled_tags.is_empty() || config.enabled_tags.contains(&tag.to_debug_key())
        }
    }
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if should_log(&tag, level) {
        super::format::format_and_log(tag, level.as_str(), message);
    }
}
