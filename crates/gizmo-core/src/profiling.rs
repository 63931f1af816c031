//! Profiling utilities based on the `puffin` crate.
//!
//! Scopes are recorded only after [`enable_scopes`] or [`init_profiling`];
//! until then `profile_scope!` costs a single atomic load.

pub use puffin::profile_scope;

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Send profiling data to puffin_viewer via HTTP.
    PuffinHttp,
}

#[cfg(feature = "profiling")]
const SERVER_ADDRESS: &str = "0.0.0.0:8585";

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Start recording profile scopes in-process.
pub fn enable_scopes() {
    puffin::set_scopes_on(true);
}

/// Initialize profiling with the specified backend.
///
/// # Example
/// ```no_run
/// use gizmo_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::PuffinHttp);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    match backend {
        ProfilingBackend::PuffinHttp => start_http_server(),
    }
}

#[cfg(feature = "profiling")]
fn start_http_server() {
    enable_scopes();

    match puffin_http::Server::new(SERVER_ADDRESS) {
        Ok(server) => {
            tracing::info!("Puffin profiler server started on http://{}", SERVER_ADDRESS);
            // Keep the server alive for the rest of the process
            let _ = PROFILING_SERVER.set(server);
        }
        Err(e) => {
            tracing::error!("Failed to start puffin server: {}", e);
        }
    }
}

#[cfg(not(feature = "profiling"))]
fn start_http_server() {
    enable_scopes();
    tracing::warn!("Built without the `profiling` feature; recording scopes without a server");
}

/// Mark the start of a new frame for profiling.
///
/// Call once per frame, typically right before `Gizmos::clear`.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_record_after_enable() {
        enable_scopes();
        {
            profile_scope!("gizmo_test_scope");
        }
        new_frame();
        assert!(puffin::are_scopes_on());
    }
}
