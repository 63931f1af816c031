//! Implementation of RenderContext trait for GraphicsContext.
//!
//! Buffer, shader and pipeline creation run inside a validation error scope,
//! so an oversized buffer or a broken shader is reported through `tracing`
//! instead of reaching wgpu's uncaptured error handler, which panics.

use crate::context::GraphicsContext;
use gizmo_test_utils::{
    BufferBindGroupDescriptor, GpuBindGroup, GpuBindGroupLayout, GpuBuffer, GpuRenderPipeline,
    GpuShaderModule, PrimitivePipelineDescriptor, RenderContext,
};
use wgpu::{BindGroupLayoutDescriptor, BufferDescriptor, ShaderModuleDescriptor};

impl GraphicsContext {
    /// Run `create` inside a validation error scope and log any error.
    fn validated<T>(&self, what: &str, label: Option<&str>, create: impl FnOnce() -> T) -> T {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let resource = create();
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            tracing::error!(
                "{} {:?} failed validation: {}",
                what,
                label.unwrap_or("<unlabeled>"),
                error
            );
        }
        resource
    }
}

impl RenderContext for GraphicsContext {
    fn max_buffer_size(&self) -> u64 {
        self.device.limits().max_buffer_size
    }

    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer {
        let buffer = self.validated("Buffer", desc.label, || self.device.create_buffer(desc));
        GpuBuffer::from_wgpu(buffer)
    }

    fn write_buffer(&self, buffer: &GpuBuffer, offset: u64, data: &[u8]) {
        self.queue.write_buffer(buffer.as_wgpu(), offset, data);
    }

    fn create_shader_module(&self, desc: &ShaderModuleDescriptor) -> GpuShaderModule {
        let module = self.validated("Shader module", desc.label, || {
            self.device.create_shader_module(desc.clone())
        });
        GpuShaderModule::from_wgpu(module)
    }

    fn create_bind_group_layout(&self, desc: &BindGroupLayoutDescriptor) -> GpuBindGroupLayout {
        let layout = self.device.create_bind_group_layout(desc);
        GpuBindGroupLayout::from_wgpu(layout)
    }

    fn create_buffer_bind_group(&self, desc: &BufferBindGroupDescriptor) -> GpuBindGroup {
        let entries: Vec<wgpu::BindGroupEntry> = desc
            .entries
            .iter()
            .map(|entry| wgpu::BindGroupEntry {
                binding: entry.binding,
                resource: entry.buffer.as_wgpu().as_entire_binding(),
            })
            .collect();

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: desc.label,
            layout: desc.layout.as_wgpu(),
            entries: &entries,
        });
        GpuBindGroup::from_wgpu(bind_group)
    }

    fn create_render_pipeline(&self, desc: &PrimitivePipelineDescriptor) -> GpuRenderPipeline {
        let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = desc
            .bind_group_layouts
            .iter()
            .map(|layout| layout.as_wgpu())
            .collect();

        let pipeline = self.validated("Render pipeline", desc.label, || {
            let layout = self
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: desc.label,
                    bind_group_layouts: &bind_group_layouts,
                    push_constant_ranges: &[],
                });

            self.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: desc.label,
                    layout: Some(&layout),
                    vertex: wgpu::VertexState {
                        module: desc.shader.as_wgpu(),
                        entry_point: Some(desc.vertex_entry),
                        buffers: desc.vertex_buffers,
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: desc.shader.as_wgpu(),
                        entry_point: Some(desc.fragment_entry),
                        targets: &[Some(desc.color_target.clone())],
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                    }),
                    primitive: wgpu::PrimitiveState {
                        topology: desc.topology,
                        cull_mode: None,
                        ..Default::default()
                    },
                    depth_stencil: desc.depth_stencil.clone(),
                    multisample: wgpu::MultisampleState::default(),
                    multiview: None,
                    cache: None,
                })
        });
        GpuRenderPipeline::from_wgpu(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gizmo_test_utils::MockRenderContext;

    #[test]
    fn test_render_context_trait_object() {
        // GraphicsContext and MockRenderContext are interchangeable behind
        // the trait object the renderer stores.
        fn uses_render_context(ctx: &dyn RenderContext) {
            let buffer = ctx.create_buffer(&BufferDescriptor {
                label: Some("Test Buffer"),
                size: 256,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            ctx.write_buffer(&buffer, 0, &[0u8; 256]);
        }

        let mock_ctx = MockRenderContext::new();
        uses_render_context(&mock_ctx);

        assert_eq!(mock_ctx.calls().len(), 2);
    }
}
