/// Process-level configuration for the gizmo crates.
#[derive(Debug, Clone)]
pub struct Config {
    /// `tracing-subscriber` filter directives, used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: crate::logging::DEFAULT_FILTER.to_string(),
            profiling: ProfilingMode::Off,
        }
    }
}

impl Config {
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_profiling(mut self, profiling: ProfilingMode) -> Self {
        self.profiling = profiling;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingMode {
    /// Profiling is disabled
    Off,
    /// Profile scopes are recorded in-process
    On,
    /// Profile scopes are recorded and served to 'puffin_viewer' over HTTP
    WithWebserver,
}
