//! `log` facade wired to `env_logger`.

use std::sync::Once;

use log::LevelFilter;

/// Windowing crates that log per-event at info; held to warn unless the
/// filter names them explicitly.
const QUIET_CRATES: &[&str] = &["winit", "glutin", "glutin_winit", "calloop", "sctk"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter syntax, e.g. "torus_gl=debug". Falls back to
    /// `RUST_LOG`, then to `default_level`.
    pub filter: Option<String>,
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

fn builder_for(config: LoggingConfig) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    match config.filter.or_else(|| std::env::var("RUST_LOG").ok()) {
        Some(filter) => {
            builder.parse_filters(&filter);
        }
        None => {
            builder.filter_level(config.default_level);
            for name in QUIET_CRATES {
                builder.filter_module(name, LevelFilter::Warn);
            }
        }
    }

    builder.format_timestamp_millis().write_style(config.write_style);
    builder
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if builder_for(config).try_init().is_err() {
            // Someone else (a test harness, an embedding host) got there first.
            return;
        }
        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let logger = builder_for(LoggingConfig {
            filter: Some("torus_gl=trace".to_string()),
            ..LoggingConfig::default()
        }).build();
        assert_eq!(logger.filter(), LevelFilter::Trace);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig { default_level: LevelFilter::Trace, ..LoggingConfig::default() });
        log::info!("still logging");
    }
}
