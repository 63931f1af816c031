//! Trait abstracting GPU resource creation for testing.
//!
//! `wgpu` descriptors that reference other GPU objects (bind groups,
//! pipelines) cannot be built from mock handles, so those operations take
//! descriptors in this module that reference the wrapper types instead.

use crate::gpu_types::*;
use wgpu::{BindGroupLayoutDescriptor, BufferDescriptor, ShaderModuleDescriptor};

/// One buffer binding of a [`BufferBindGroupDescriptor`].
#[derive(Clone, Copy, Debug)]
pub struct BufferBindGroupEntry<'a> {
    pub binding: u32,
    pub buffer: &'a GpuBuffer,
}

/// Describes a bind group whose entries are all whole-buffer bindings.
#[derive(Clone, Copy, Debug)]
pub struct BufferBindGroupDescriptor<'a> {
    pub label: Option<&'a str>,
    pub layout: &'a GpuBindGroupLayout,
    pub entries: &'a [BufferBindGroupEntry<'a>],
}

/// Describes a render pipeline with a single shader module, one color
/// target and non-indexed vertex input.
#[derive(Clone, Debug)]
pub struct PrimitivePipelineDescriptor<'a> {
    pub label: Option<&'a str>,
    pub shader: &'a GpuShaderModule,
    pub vertex_entry: &'a str,
    pub fragment_entry: &'a str,
    pub bind_group_layouts: &'a [&'a GpuBindGroupLayout],
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub topology: wgpu::PrimitiveTopology,
    pub color_target: wgpu::ColorTargetState,
    pub depth_stencil: Option<wgpu::DepthStencilState>,
}

/// Trait abstracting GPU resource creation and uploads.
///
/// Methods take `&self` and return owned wrapper types, so a context can be
/// shared behind an `Arc` and mock implementations record calls through
/// interior mutability.
///
/// # Example
///
/// ```rust,no_run
/// use gizmo_test_utils::RenderContext;
/// use wgpu::{BufferDescriptor, BufferUsages};
///
/// fn upload(ctx: &dyn RenderContext, data: &[u8]) {
///     let buffer = ctx.create_buffer(&BufferDescriptor {
///         label: None,
///         size: data.len() as u64,
///         usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
///         mapped_at_creation: false,
///     });
///     ctx.write_buffer(&buffer, 0, data);
/// }
/// ```
pub trait RenderContext: Send + Sync {
    // Buffer operations

    /// Largest buffer, in bytes, that `create_buffer` accepts.
    fn max_buffer_size(&self) -> u64;

    /// Create a GPU buffer.
    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer;

    /// Write data to a buffer.
    ///
    /// For real buffers, this maps to `queue.write_buffer()`.
    /// For mock buffers, this records the operation for test verification.
    fn write_buffer(&self, buffer: &GpuBuffer, offset: u64, data: &[u8]);

    // Shader operations

    /// Create a shader module from source code.
    fn create_shader_module(&self, desc: &ShaderModuleDescriptor) -> GpuShaderModule;

    // Bind group operations

    fn create_bind_group_layout(&self, desc: &BindGroupLayoutDescriptor) -> GpuBindGroupLayout;

    /// Create a bind group made of whole-buffer bindings.
    fn create_buffer_bind_group(&self, desc: &BufferBindGroupDescriptor) -> GpuBindGroup;

    // Pipeline operations

    /// Create a render pipeline (and its layout).
    fn create_render_pipeline(&self, desc: &PrimitivePipelineDescriptor) -> GpuRenderPipeline;
}
