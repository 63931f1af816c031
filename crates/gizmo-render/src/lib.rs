//! Batched debug geometry for `wgpu`.
//!
//! Gizmos are lines and flat-colored triangles rebuilt every frame: coordinate
//! axes, bounding boxes, cylinders, circles and sphere grids. Primitives
//! accumulate in a fixed-capacity [`GizmoBatch`] and are drawn with two
//! pipelines (line list and triangle list) in one call.
//!
//! ```rust,no_run
//! use gizmo_render::*;
//! use glam::{Mat4, Vec3};
//!
//! let context = GraphicsContext::new_owned_sync().expect("no GPU");
//! let mut gizmos = Gizmos::new(context, GizmosDescriptor::default());
//!
//! gizmos.clear();
//! gizmos.add_transform_axes(&Mat4::IDENTITY, 1.0);
//! gizmos.add_sphere(&GizmoSphere::new(Vec3::ZERO, 0.5, 8, 16));
//! ```
//!
//! Drawing goes through [`RenderPassRecorder`], which is implemented for
//! `wgpu::RenderPass`, so `gizmos.draw(&mut pass, projection_view)` works
//! inside any render pass targeting the configured format.

pub mod batch;
mod color;
mod context;
mod context_impl;
mod gizmos;
pub mod renderer;
pub mod shapes;
pub mod vertex;

pub use batch::{DEFAULT_MAX_LINES, DEFAULT_MAX_TRIANGLES, GizmoBatch};
pub use color::Color;
pub use context::{GraphicsContext, GraphicsContextDescriptor, GraphicsError};
pub use gizmos::Gizmos;
pub use renderer::{GizmoRenderer, GizmoUniform, GizmosDescriptor};
pub use shapes::{GizmoBox, GizmoCircle, GizmoCylinder, GizmoSphere};
pub use vertex::{GizmoLine, GizmoTriangle, GizmoVertex};

pub use gizmo_test_utils::{RenderContext, RenderPassRecorder};
