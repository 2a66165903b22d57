//! Logging initialization for fvm binaries.

use std::sync::OnceLock;

/// Environment variable selecting the log level.
pub const LOG_ENV: &str = "FVM_LOG";

static INIT: OnceLock<()> = OnceLock::new();

fn parse_level(value: Option<&str>) -> tracing::Level {
    match value.unwrap_or("warn").to_ascii_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::WARN,
    }
}

/// Install a stderr `tracing` subscriber at the level given by `FVM_LOG`.
///
/// Safe to call more than once; only the first call has any effect. Never
/// fails: if another subscriber is already installed it is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let level = parse_level(std::env::var(LOG_ENV).ok().as_deref());
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(None), tracing::Level::WARN);
        assert_eq!(parse_level(Some("DEBUG")), tracing::Level::DEBUG);
        assert_eq!(parse_level(Some("info")), tracing::Level::INFO);
        assert_eq!(parse_level(Some("bogus")), tracing::Level::WARN);
    }

    #[test]
    fn test_init_twice() {
        init();
        init();
    }
}
