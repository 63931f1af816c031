//! Mock implementations of [`RenderContext`] and [`RenderPassRecorder`].
//!
//! Both record every operation without touching a GPU, so tests can assert
//! on what a renderer created, uploaded and drew.

use crate::{
    gpu_types::*,
    render_context::{BufferBindGroupDescriptor, PrimitivePipelineDescriptor, RenderContext},
    render_pass::RenderPassRecorder,
};
use parking_lot::Mutex;
use std::ops::Range;
use wgpu::*;

/// Records a resource operation for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateBuffer {
        label: Option<String>,
        size: u64,
        usage: BufferUsages,
    },
    WriteBuffer {
        buffer_id: usize,
        offset: u64,
        size: usize,
    },
    CreateShaderModule {
        label: Option<String>,
    },
    CreateRenderPipeline {
        label: Option<String>,
        topology: PrimitiveTopology,
    },
    CreateBindGroupLayout {
        label: Option<String>,
    },
    CreateBindGroup {
        label: Option<String>,
    },
}

/// Mock implementation of RenderContext for testing.
///
/// Methods take `&self` but record into `Mutex`-guarded vectors, which keeps
/// the mock `Send + Sync` like the trait requires.
///
/// # Example
///
/// ```rust
/// use gizmo_test_utils::{MockRenderContext, RenderContext};
/// use wgpu::*;
///
/// let mock = MockRenderContext::new();
/// let buffer = mock.create_buffer(&BufferDescriptor {
///     label: None,
///     size: 1024,
///     usage: BufferUsages::VERTEX,
///     mapped_at_creation: false,
/// });
///
/// assert!(buffer.is_mock());
/// assert_eq!(mock.count_buffer_creates(), 1);
/// ```
pub struct MockRenderContext {
    /// Recorded calls for verification
    calls: Mutex<Vec<RenderCall>>,

    /// Sizes of created buffers, indexed by mock id
    buffer_sizes: Mutex<Vec<u64>>,

    /// Reported device limit, `wgpu::Limits::default()` unless overridden
    max_buffer_size: u64,

    /// Counters for generating IDs
    next_shader_id: Mutex<usize>,
    next_pipeline_id: Mutex<usize>,
    next_bind_group_layout_id: Mutex<usize>,
    next_bind_group_id: Mutex<usize>,
}

impl MockRenderContext {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            buffer_sizes: Mutex::new(Vec::new()),
            max_buffer_size: Limits::default().max_buffer_size,
            next_shader_id: Mutex::new(0),
            next_pipeline_id: Mutex::new(0),
            next_bind_group_layout_id: Mutex::new(0),
            next_bind_group_id: Mutex::new(0),
        }
    }

    /// Report `size` as the device's largest buffer.
    pub fn with_max_buffer_size(mut self, size: u64) -> Self {
        self.max_buffer_size = size;
        self
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    pub fn count_buffer_creates(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::CreateBuffer { .. }))
    }

    pub fn count_buffer_writes(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::WriteBuffer { .. }))
    }

    pub fn count_shader_creates(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::CreateShaderModule { .. }))
    }

    pub fn count_render_pipeline_creates(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::CreateRenderPipeline { .. }))
    }

    /// Writes recorded against one buffer, as `(offset, size)` pairs.
    pub fn writes_to(&self, buffer: &GpuBuffer) -> Vec<(u64, usize)> {
        let Some(id) = buffer.mock_id() else {
            return Vec::new();
        };
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::WriteBuffer {
                    buffer_id,
                    offset,
                    size,
                } if *buffer_id == id => Some((*offset, *size)),
                _ => None,
            })
            .collect()
    }

    /// Size of a created mock buffer, by id.
    pub fn buffer_size(&self, id: usize) -> Option<u64> {
        self.buffer_sizes.lock().get(id).copied()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn count(&self, predicate: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    fn next_id(counter: &Mutex<usize>) -> usize {
        let mut id = counter.lock();
        let current = *id;
        *id += 1;
        current
    }
}

impl Default for MockRenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext for MockRenderContext {
    fn max_buffer_size(&self) -> u64 {
        self.max_buffer_size
    }

    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer {
        let mut sizes = self.buffer_sizes.lock();
        let id = sizes.len();
        sizes.push(desc.size);

        self.calls.lock().push(RenderCall::CreateBuffer {
            label: desc.label.map(|s| s.to_string()),
            size: desc.size,
            usage: desc.usage,
        });

        GpuBuffer::mock(id, desc.size)
    }

    fn write_buffer(&self, buffer: &GpuBuffer, offset: u64, data: &[u8]) {
        if let Some(buffer_id) = buffer.mock_id() {
            self.calls.lock().push(RenderCall::WriteBuffer {
                buffer_id,
                offset,
                size: data.len(),
            });
        }
    }

    fn create_shader_module(&self, desc: &ShaderModuleDescriptor) -> GpuShaderModule {
        let shader_id = Self::next_id(&self.next_shader_id);

        self.calls.lock().push(RenderCall::CreateShaderModule {
            label: desc.label.map(|s| s.to_string()),
        });

        GpuShaderModule::mock(shader_id)
    }

    fn create_bind_group_layout(&self, desc: &BindGroupLayoutDescriptor) -> GpuBindGroupLayout {
        let layout_id = Self::next_id(&self.next_bind_group_layout_id);

        self.calls.lock().push(RenderCall::CreateBindGroupLayout {
            label: desc.label.map(|s| s.to_string()),
        });

        GpuBindGroupLayout::mock(layout_id)
    }

    fn create_buffer_bind_group(&self, desc: &BufferBindGroupDescriptor) -> GpuBindGroup {
        let bind_group_id = Self::next_id(&self.next_bind_group_id);

        self.calls.lock().push(RenderCall::CreateBindGroup {
            label: desc.label.map(|s| s.to_string()),
        });

        GpuBindGroup::mock(bind_group_id)
    }

    fn create_render_pipeline(&self, desc: &PrimitivePipelineDescriptor) -> GpuRenderPipeline {
        let pipeline_id = Self::next_id(&self.next_pipeline_id);

        self.calls.lock().push(RenderCall::CreateRenderPipeline {
            label: desc.label.map(|s| s.to_string()),
            topology: desc.topology,
        });

        GpuRenderPipeline::mock(pipeline_id)
    }
}

/// Records a render pass command for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassCall {
    SetPipeline {
        pipeline_id: Option<usize>,
    },
    SetBindGroup {
        index: u32,
        bind_group_id: Option<usize>,
    },
    SetVertexBuffer {
        slot: u32,
        buffer_id: Option<usize>,
        range: Range<u64>,
    },
    Draw {
        vertices: Range<u32>,
        instances: Range<u32>,
    },
    PushDebugGroup(String),
    PopDebugGroup,
}

/// Mock render pass that records commands instead of encoding them.
#[derive(Debug, Default)]
pub struct MockRenderPass {
    calls: Vec<PassCall>,
}

impl MockRenderPass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[PassCall] {
        &self.calls
    }

    pub fn count_draws(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, PassCall::Draw { .. }))
            .count()
    }

    /// Vertex ranges of every recorded draw, in order.
    pub fn draws(&self) -> Vec<Range<u32>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PassCall::Draw { vertices, .. } => Some(vertices.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl RenderPassRecorder for MockRenderPass {
    fn set_pipeline(&mut self, pipeline: &GpuRenderPipeline) {
        self.calls.push(PassCall::SetPipeline {
            pipeline_id: pipeline.mock_id(),
        });
    }

    fn set_bind_group(&mut self, index: u32, bind_group: &GpuBindGroup) {
        self.calls.push(PassCall::SetBindGroup {
            index,
            bind_group_id: bind_group.mock_id(),
        });
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &GpuBuffer, range: Range<u64>) {
        self.calls.push(PassCall::SetVertexBuffer {
            slot,
            buffer_id: buffer.mock_id(),
            range,
        });
    }

    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>) {
        self.calls.push(PassCall::Draw {
            vertices,
            instances,
        });
    }

    fn push_debug_group(&mut self, label: &str) {
        self.calls.push(PassCall::PushDebugGroup(label.to_string()));
    }

    fn pop_debug_group(&mut self) {
        self.calls.push(PassCall::PopDebugGroup);
    }
}
