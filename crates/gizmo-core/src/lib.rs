//! Gizmo Core
//!
//! Process-level plumbing shared by the gizmo crates: logging, profiling
//! and the configuration that drives both.

pub mod config;
pub mod logging;
pub mod profiling;

pub use config::{Config, ProfilingMode};

/// Initialise logging and profiling from `config`.
///
/// Call once at startup, before creating any renderer.
pub fn init(config: &Config) {
    logging::init_with_filter(&config.log_filter);

    match config.profiling {
        ProfilingMode::Off => {}
        ProfilingMode::On => profiling::enable_scopes(),
        ProfilingMode::WithWebserver => {
            profiling::init_profiling(profiling::ProfilingBackend::PuffinHttp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        let config = Config::default().with_profiling(ProfilingMode::On);
        init(&config);
        // A second subscriber install is ignored rather than panicking.
        init(&config);
        assert!(puffin::are_scopes_on());
    }
}
