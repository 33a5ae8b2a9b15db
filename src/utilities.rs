//! Utilities.
use log::LevelFilter;

/// Log to stderr with the given minimum level.
///
/// The `RUST_LOG` environment variable takes precedence over `level`.
pub fn configure_logger(level: LevelFilter) {
    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .parse_default_env()
        .init();
}
