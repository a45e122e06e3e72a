use std::sync::OnceLock;

use log::LevelFilter;

/// Environment variable consulted when no filter is given explicitly.
pub const FILTER_ENV: &str = "RUST_LOG";

/// How a raycrate binary wants its log output.
///
/// `filter` uses `env_logger` directive syntax, for example
/// `"raycrate_coordinator=debug,raycrate_render=warn"`. Job-level events
/// (spawn, stale discard, failure) are logged by `raycrate_coordinator` at
/// `debug` and `warn`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub default_level: LevelFilter,
    pub timestamps: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: LevelFilter::Info,
            timestamps: true,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Use `filter` if present, otherwise keep falling back to `RUST_LOG`
    pub fn with_filter(mut self, filter: Option<impl Into<String>>) -> Self {
        self.filter = filter.map(Into::into);
        self
    }

    pub fn with_default_level(mut self, level: LevelFilter) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// The directive string that will be applied, if any.
    ///
    /// `None` means only `default_level` applies.
    pub fn resolve_filter(&self, env: Option<String>) -> Option<String> {
        self.filter
            .clone()
            .or(env)
            .filter(|directives| !directives.trim().is_empty())
    }

    fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        match self.resolve_filter(std::env::var(FILTER_ENV).ok()) {
            Some(directives) => {
                builder.parse_filters(&directives);
            }
            None => {
                builder.filter_level(self.default_level);
            }
        }
        if !self.timestamps {
            builder.format_timestamp(None);
        }
        builder.write_style(self.write_style);
        builder
    }
}

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Installs `env_logger` as the global logger.
///
/// Only the first call has an effect. Returns whether raycrate's logger is
/// the one in place; `false` means another logger was already registered.
pub fn init_logging(config: LoggingConfig) -> bool {
    *INSTALLED.get_or_init(|| {
        let installed = config.builder().try_init().is_ok();
        if installed {
            log::debug!(
                "logger installed (default level {})",
                config.default_level
            );
        }
        installed
    })
}
