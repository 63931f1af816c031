//! GPU side of the gizmos: two pipelines over one shader, and the vertex
//! buffers the batch is uploaded into each frame.

use crate::batch::{DEFAULT_MAX_LINES, DEFAULT_MAX_TRIANGLES, GizmoBatch};
use crate::vertex::{GizmoLine, GizmoTriangle, GizmoVertex};
use bytemuck::{Pod, Zeroable};
use gizmo_core::profiling::profile_scope;
use gizmo_test_utils::{
    BufferBindGroupDescriptor, BufferBindGroupEntry, GpuBindGroup, GpuBuffer, GpuRenderPipeline,
    PrimitivePipelineDescriptor, RenderContext, RenderPassRecorder,
};
use glam::Mat4;
use std::sync::Arc;

/// Configuration for [`Gizmos`](crate::Gizmos) and [`GizmoRenderer`].
#[derive(Debug, Clone)]
pub struct GizmosDescriptor {
    /// Line capacity, also the size of the line vertex buffer.
    pub max_lines: usize,
    /// Triangle capacity, also the size of the triangle vertex buffer.
    pub max_triangles: usize,
    /// Format of the color attachment the gizmos are drawn into.
    pub target_format: wgpu::TextureFormat,
    /// Depth attachment format. `None` draws on top of everything.
    pub depth_format: Option<wgpu::TextureFormat>,
    pub blend: Option<wgpu::BlendState>,
    /// Prefix for the labels of every GPU resource.
    pub label: &'static str,
}

impl Default for GizmosDescriptor {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            max_triangles: DEFAULT_MAX_TRIANGLES,
            target_format: wgpu::TextureFormat::Bgra8UnormSrgb,
            depth_format: None,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            label: "Gizmos",
        }
    }
}

impl GizmosDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn max_triangles(mut self, max_triangles: usize) -> Self {
        self.max_triangles = max_triangles;
        self
    }

    pub fn target_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.target_format = format;
        self
    }

    /// Depth-test against an attachment of `format` (`LessEqual`, read only).
    pub fn depth_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }

    /// Blend state of the color target. `None` replaces the target color.
    pub fn blend(mut self, blend: Option<wgpu::BlendState>) -> Self {
        self.blend = blend;
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

/// Uniform data for the gizmo shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GizmoUniform {
    pub projection_view: [[f32; 4]; 4],
}

impl GizmoUniform {
    pub fn new(projection_view: Mat4) -> Self {
        Self {
            projection_view: projection_view.to_cols_array_2d(),
        }
    }
}

/// Owns the pipelines and buffers used to draw a [`GizmoBatch`].
///
/// Resources are created once in [`new`](Self::new); drawing only writes
/// the occupied prefix of each vertex buffer and never reallocates.
pub struct GizmoRenderer {
    context: Arc<dyn RenderContext>,
    line_pipeline: GpuRenderPipeline,
    triangle_pipeline: GpuRenderPipeline,
    uniform_buffer: GpuBuffer,
    bind_group: GpuBindGroup,
    line_buffer: GpuBuffer,
    triangle_buffer: GpuBuffer,
    max_lines: usize,
    max_triangles: usize,
}

/// Number of `record_size`-byte records that fit in one buffer of at most
/// `max_buffer_size` bytes.
pub(crate) fn max_records(max_buffer_size: u64, record_size: usize) -> usize {
    usize::try_from(max_buffer_size / record_size as u64).unwrap_or(usize::MAX)
}

/// Clamp a requested capacity to what a single vertex buffer can hold.
fn clamp_capacity(kind: &str, requested: usize, record_size: usize, max_buffer_size: u64) -> usize {
    let limit = max_records(max_buffer_size, record_size);
    if requested > limit {
        tracing::warn!(
            requested,
            limit,
            max_buffer_size,
            "Gizmo {} capacity exceeds the device buffer limit, clamping",
            kind
        );
        limit
    } else {
        requested
    }
}

impl GizmoRenderer {
    /// Create the pipelines and buffers.
    ///
    /// Capacities larger than the device's `max_buffer_size` allows are
    /// clamped with a warning; [`max_lines`](Self::max_lines) and
    /// [`max_triangles`](Self::max_triangles) report the values in effect.
    pub fn new(context: Arc<dyn RenderContext>, descriptor: &GizmosDescriptor) -> Self {
        let label = descriptor.label;
        let max_buffer_size = context.max_buffer_size();
        let max_lines = clamp_capacity(
            "line",
            descriptor.max_lines,
            std::mem::size_of::<GizmoLine>(),
            max_buffer_size,
        );
        let max_triangles = clamp_capacity(
            "triangle",
            descriptor.max_triangles,
            std::mem::size_of::<GizmoTriangle>(),
            max_buffer_size,
        );

        let shader = context.create_shader_module(&wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} Shader", label)),
            source: wgpu::ShaderSource::Wgsl(GIZMO_SHADER.into()),
        });

        let bind_group_layout =
            context.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{} Bind Group Layout", label)),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_buffer = context.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Uniform Buffer", label)),
            size: std::mem::size_of::<GizmoUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = context.create_buffer_bind_group(&BufferBindGroupDescriptor {
            label: Some(&format!("{} Bind Group", label)),
            layout: &bind_group_layout,
            entries: &[BufferBindGroupEntry {
                binding: 0,
                buffer: &uniform_buffer,
            }],
        });

        let color_target = wgpu::ColorTargetState {
            format: descriptor.target_format,
            blend: descriptor.blend,
            write_mask: wgpu::ColorWrites::ALL,
        };
        let depth_stencil = descriptor
            .depth_format
            .map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            });
        let vertex_buffers = [GizmoVertex::buffer_layout()];

        let create_pipeline = |name: &str, topology: wgpu::PrimitiveTopology| {
            context.create_render_pipeline(&PrimitivePipelineDescriptor {
                label: Some(&format!("{} {} Pipeline", label, name)),
                shader: &shader,
                vertex_entry: "vs_main",
                fragment_entry: "fs_main",
                bind_group_layouts: &[&bind_group_layout],
                vertex_buffers: &vertex_buffers,
                topology,
                color_target: color_target.clone(),
                depth_stencil: depth_stencil.clone(),
            })
        };
        let line_pipeline = create_pipeline("Line", wgpu::PrimitiveTopology::LineList);
        let triangle_pipeline = create_pipeline("Triangle", wgpu::PrimitiveTopology::TriangleList);

        // wgpu rejects zero-sized vertex buffers, so an empty capacity still
        // gets room for one record.
        let line_buffer = context.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Line Buffer", label)),
            size: (max_lines.max(1) * std::mem::size_of::<GizmoLine>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let triangle_buffer = context.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Triangle Buffer", label)),
            size: (max_triangles.max(1) * std::mem::size_of::<GizmoTriangle>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        tracing::debug!(max_lines, max_triangles, "Created gizmo renderer");

        Self {
            context,
            line_pipeline,
            triangle_pipeline,
            uniform_buffer,
            bind_group,
            line_buffer,
            triangle_buffer,
            max_lines,
            max_triangles,
        }
    }

    /// Upload `batch` and record its draws into `pass`.
    ///
    /// Lines are drawn first, then triangles, both with `projection_view`
    /// applied to every vertex. Kinds with no primitives are skipped and an
    /// empty batch records nothing at all.
    ///
    /// The uniform and vertex buffers are shared by every draw and written
    /// through the queue, so only the last draw before a submit is seen by
    /// the GPU. Record one draw per renderer per submission.
    pub fn draw(
        &self,
        pass: &mut dyn RenderPassRecorder,
        batch: &GizmoBatch,
        projection_view: Mat4,
    ) {
        profile_scope!("gizmo_renderer_draw");

        if batch.is_empty() {
            return;
        }

        let lines = &batch.lines()[..batch.line_count().min(self.max_lines)];
        let triangles = &batch.triangles()[..batch.triangle_count().min(self.max_triangles)];
        tracing::trace!(
            "Uploading {} gizmo lines and {} triangles",
            lines.len(),
            triangles.len()
        );

        self.context.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&GizmoUniform::new(projection_view)),
        );

        pass.push_debug_group("Gizmos::draw");
        pass.set_bind_group(0, &self.bind_group);

        if !lines.is_empty() {
            let bytes: &[u8] = bytemuck::cast_slice(lines);
            self.context.write_buffer(&self.line_buffer, 0, bytes);
            pass.set_pipeline(&self.line_pipeline);
            pass.set_vertex_buffer(0, &self.line_buffer, 0..bytes.len() as u64);
            pass.draw(0..(lines.len() * 2) as u32, 0..1);
        }

        if !triangles.is_empty() {
            let bytes: &[u8] = bytemuck::cast_slice(triangles);
            self.context.write_buffer(&self.triangle_buffer, 0, bytes);
            pass.set_pipeline(&self.triangle_pipeline);
            pass.set_vertex_buffer(0, &self.triangle_buffer, 0..bytes.len() as u64);
            pass.draw(0..(triangles.len() * 3) as u32, 0..1);
        }

        pass.pop_debug_group();
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn max_triangles(&self) -> usize {
        self.max_triangles
    }
}

impl Drop for GizmoRenderer {
    fn drop(&mut self) {
        tracing::debug!("Releasing gizmo renderer resources");
    }
}

/// WGSL shader shared by the line and triangle pipelines.
const GIZMO_SHADER: &str = r#"
struct Uniforms {
    projection_view: mat4x4<f32>,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec4<f32>,
    @location(1) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.projection_view * in.position;
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use gizmo_test_utils::{MockRenderContext, MockRenderPass, PassCall, RenderCall};
    use glam::Vec3;

    fn mock_renderer(descriptor: &GizmosDescriptor) -> (Arc<MockRenderContext>, GizmoRenderer) {
        let mock = Arc::new(MockRenderContext::new());
        let renderer = GizmoRenderer::new(mock.clone(), descriptor);
        (mock, renderer)
    }

    #[test]
    fn test_creates_line_and_triangle_pipelines() {
        let (mock, _renderer) = mock_renderer(&GizmosDescriptor::default());

        let topologies: Vec<_> = mock
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                RenderCall::CreateRenderPipeline { topology, .. } => Some(topology),
                _ => None,
            })
            .collect();

        assert_eq!(mock.count_shader_creates(), 1);
        assert_eq!(
            topologies,
            vec![
                wgpu::PrimitiveTopology::LineList,
                wgpu::PrimitiveTopology::TriangleList
            ]
        );
    }

    #[test]
    fn test_vertex_buffers_sized_to_capacity() {
        let (mock, renderer) =
            mock_renderer(&GizmosDescriptor::new().max_lines(100).max_triangles(10));

        assert_eq!(renderer.line_buffer.size(), 100 * 64);
        assert_eq!(renderer.triangle_buffer.size(), 10 * 96);
        assert_eq!(renderer.uniform_buffer.size(), 64);
        assert!(mock.calls().contains(&RenderCall::CreateBuffer {
            label: Some("Gizmos Line Buffer".to_string()),
            size: 6400,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        }));
    }

    #[test]
    fn test_zero_capacity_still_allocates() {
        let (_mock, renderer) = mock_renderer(&GizmosDescriptor::new().max_lines(0));
        assert_eq!(renderer.line_buffer.size(), 64);
    }

    #[test]
    fn test_capacity_clamped_to_buffer_limit() {
        let mock = Arc::new(MockRenderContext::new().with_max_buffer_size(64 * 1000));
        let renderer = GizmoRenderer::new(
            mock.clone(),
            &GizmosDescriptor::new().max_lines(1001).max_triangles(usize::MAX),
        );

        assert_eq!(renderer.max_lines(), 1000);
        assert_eq!(renderer.max_triangles(), 666);
        assert_eq!(renderer.line_buffer.size(), 64 * 1000);
        assert!(renderer.triangle_buffer.size() <= mock.max_buffer_size());
    }

    #[test]
    fn test_max_records_rounds_down() {
        assert_eq!(max_records(100, 32), 3);
        assert_eq!(max_records(16, 32), 0);
    }

    #[test]
    fn test_empty_batch_records_nothing() {
        let (mock, renderer) = mock_renderer(&GizmosDescriptor::default());
        mock.clear_calls();

        let mut pass = MockRenderPass::new();
        renderer.draw(&mut pass, &GizmoBatch::new(4, 4), Mat4::IDENTITY);

        assert!(pass.calls().is_empty());
        assert_eq!(mock.count_buffer_writes(), 0);
    }

    #[test]
    fn test_lines_only_skips_triangle_draw() {
        let (mock, renderer) = mock_renderer(&GizmosDescriptor::default());
        mock.clear_calls();

        let mut batch = GizmoBatch::new(8, 8);
        batch.add_line_solid(Vec3::ZERO, Vec3::X, Color::WHITE);
        batch.add_line_solid(Vec3::ZERO, Vec3::Y, Color::WHITE);

        let mut pass = MockRenderPass::new();
        renderer.draw(&mut pass, &batch, Mat4::IDENTITY);

        assert_eq!(pass.draws(), vec![0..4]);
        assert_eq!(mock.writes_to(&renderer.line_buffer), vec![(0, 128)]);
        assert!(mock.writes_to(&renderer.triangle_buffer).is_empty());
        assert_eq!(
            pass.calls().first(),
            Some(&PassCall::PushDebugGroup("Gizmos::draw".to_string()))
        );
        assert_eq!(pass.calls().last(), Some(&PassCall::PopDebugGroup));
    }

    #[test]
    fn test_uniform_holds_projection_view() {
        let projection_view = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let uniform = GizmoUniform::new(projection_view);
        assert_eq!(uniform.projection_view[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(std::mem::size_of::<GizmoUniform>(), 64);
    }
}
