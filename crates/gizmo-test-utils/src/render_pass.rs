//! Trait abstracting draw command recording.

use crate::gpu_types::{GpuBindGroup, GpuBuffer, GpuRenderPipeline};
use std::ops::Range;

/// The subset of render pass commands the gizmo renderer records.
///
/// Implemented for [`wgpu::RenderPass`]; `MockRenderPass` records the same
/// calls for assertions.
pub trait RenderPassRecorder {
    fn set_pipeline(&mut self, pipeline: &GpuRenderPipeline);

    fn set_bind_group(&mut self, index: u32, bind_group: &GpuBindGroup);

    /// Bind `range` (in bytes) of `buffer` to vertex buffer slot `slot`.
    fn set_vertex_buffer(&mut self, slot: u32, buffer: &GpuBuffer, range: Range<u64>);

    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>);

    fn push_debug_group(&mut self, label: &str);

    fn pop_debug_group(&mut self);
}

impl RenderPassRecorder for wgpu::RenderPass<'_> {
    fn set_pipeline(&mut self, pipeline: &GpuRenderPipeline) {
        wgpu::RenderPass::set_pipeline(self, pipeline.as_wgpu());
    }

    fn set_bind_group(&mut self, index: u32, bind_group: &GpuBindGroup) {
        wgpu::RenderPass::set_bind_group(self, index, bind_group.as_wgpu(), &[]);
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &GpuBuffer, range: Range<u64>) {
        wgpu::RenderPass::set_vertex_buffer(self, slot, buffer.as_wgpu().slice(range));
    }

    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>) {
        wgpu::RenderPass::draw(self, vertices, instances);
    }

    fn push_debug_group(&mut self, label: &str) {
        wgpu::RenderPass::push_debug_group(self, label);
    }

    fn pop_debug_group(&mut self) {
        wgpu::RenderPass::pop_debug_group(self);
    }
}
