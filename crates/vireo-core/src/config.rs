/// Process-wide configuration for Vireo.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub log: LogConfig,
    pub profiling: ProfilingMode,
}

/// Logging configuration consumed by [`crate::logging::try_init_with`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    pub default_filter: String,
    /// Include the event target (module path) in log lines.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            default_filter: "info,vireo_ui=debug".to_string(),
            with_target: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling scopes are compiled in but not recorded
    #[default]
    Off,
    /// Scopes are recorded and can be read with `puffin::GlobalProfiler`
    On,
    /// Scopes are recorded and served to `puffin_viewer` over HTTP
    WithWebserver,
}
