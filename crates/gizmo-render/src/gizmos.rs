use crate::batch::GizmoBatch;
use crate::renderer::{GizmoRenderer, GizmosDescriptor};
use gizmo_test_utils::{RenderContext, RenderPassRecorder};
use glam::Mat4;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Immediate-mode debug geometry: a [`GizmoBatch`] paired with the
/// [`GizmoRenderer`] that draws it.
///
/// Every batch method is reachable through `Deref`, so a frame reads as
/// clear, add shapes, draw:
///
/// ```rust,no_run
/// use gizmo_render::{Color, GizmoBox, Gizmos, GizmosDescriptor, GraphicsContext};
/// use glam::{Mat4, Vec3};
///
/// let context = GraphicsContext::new_owned_sync().expect("no GPU");
/// let mut gizmos = Gizmos::new(context, GizmosDescriptor::default());
///
/// gizmos.clear();
/// gizmos.add_line_solid(Vec3::ZERO, Vec3::Y, Color::GREEN);
/// gizmos.add_box(&GizmoBox::new(Vec3::ZERO, Vec3::ONE));
/// // gizmos.draw(&mut render_pass, camera.projection_view());
/// ```
pub struct Gizmos {
    batch: GizmoBatch,
    renderer: GizmoRenderer,
}

impl Gizmos {
    /// Allocate the batch and its GPU resources.
    ///
    /// The batch takes the renderer's capacities, which may be lower than
    /// requested when the device limits the vertex buffer size, so the batch
    /// never accepts a primitive that cannot be uploaded.
    pub fn new(context: Arc<dyn RenderContext>, descriptor: GizmosDescriptor) -> Self {
        let renderer = GizmoRenderer::new(context, &descriptor);
        let batch = GizmoBatch::new(renderer.max_lines(), renderer.max_triangles());
        tracing::info!(
            max_lines = renderer.max_lines(),
            max_triangles = renderer.max_triangles(),
            "Created {}",
            descriptor.label
        );
        Self { batch, renderer }
    }

    /// Draw everything added since the last clear. The batch is left as is.
    ///
    /// Uploads go through the queue and land at the next submit, so call
    /// this at most once per queue submission. A second draw before the
    /// submit overwrites the first one's matrix and vertices; draw each
    /// viewport with its own `Gizmos` instead.
    pub fn draw(&self, pass: &mut dyn RenderPassRecorder, projection_view: Mat4) {
        self.renderer.draw(pass, &self.batch, projection_view);
    }

    pub fn batch(&self) -> &GizmoBatch {
        &self.batch
    }

    pub fn batch_mut(&mut self) -> &mut GizmoBatch {
        &mut self.batch
    }

    pub fn renderer(&self) -> &GizmoRenderer {
        &self.renderer
    }

    /// Release the CPU storage and GPU resources now instead of at scope end.
    pub fn destroy(self) {
        drop(self);
    }
}

impl Deref for Gizmos {
    type Target = GizmoBatch;

    fn deref(&self) -> &Self::Target {
        &self.batch
    }
}

impl DerefMut for Gizmos {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.batch
    }
}
