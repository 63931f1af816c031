//! Render backend abstraction for the gizmo renderer.
//!
//! The gizmo renderer never talks to `wgpu` directly. It creates resources
//! through [`RenderContext`] and records commands through
//! [`RenderPassRecorder`], so the same code runs against a real device or
//! against the recording mocks in this crate.
//!
//! # Overview
//!
//! - [`RenderContext`] - resource creation and buffer uploads
//! - [`RenderPassRecorder`] - draw command recording
//! - GPU wrapper types (`GpuBuffer`, `GpuRenderPipeline`, ...) - real or mock
//! - `MockRenderContext` / `MockRenderPass` - call recorders (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use gizmo_test_utils::{MockRenderContext, MockRenderPass, RenderContext, RenderPassRecorder};
//! use wgpu::*;
//!
//! let mock = MockRenderContext::new();
//! let buffer = mock.create_buffer(&BufferDescriptor {
//!     label: Some("lines"),
//!     size: 1024,
//!     usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
//!     mapped_at_creation: false,
//! });
//!
//! let mut pass = MockRenderPass::new();
//! pass.set_vertex_buffer(0, &buffer, 0..64);
//! pass.draw(0..2, 0..1);
//!
//! assert_eq!(mock.count_buffer_creates(), 1);
//! assert_eq!(pass.count_draws(), 1);
//! # }
//! ```
//!
//! # Design
//!
//! All wrapper types are owned and cheap to clone, so no lifetimes leak into
//! the renderer. Mock contexts use `parking_lot::Mutex` so their `&self`
//! methods can record calls while the trait stays `Send + Sync`.

pub mod gpu_types;
#[cfg(feature = "mock")]
pub mod mock_render;
pub mod render_context;
pub mod render_pass;

pub use gpu_types::*;
#[cfg(feature = "mock")]
pub use mock_render::*;
pub use render_context::*;
pub use render_pass::*;
