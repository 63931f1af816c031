use std::sync::Arc;

/// Errors raised while creating a [`GraphicsContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// No adapter matched the requested backends and power preference.
    NoAdapter,
    /// The adapter refused to create a device.
    DeviceCreation(String),
}

impl std::fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoAdapter => write!(f, "No suitable GPU adapter found"),
            Self::DeviceCreation(msg) => write!(f, "Failed to create device: {}", msg),
        }
    }
}

impl std::error::Error for GraphicsError {}

/// Headless device and queue shared by gizmo renderers.
///
/// Surfaces and windows stay with the caller; a renderer that draws into a
/// window only needs the same device. Shared as `Arc<Self>`:
///
/// ```rust,no_run
/// use gizmo_render::{Gizmos, GizmosDescriptor, GraphicsContext};
///
/// let ctx = GraphicsContext::new_owned_sync().expect("no GPU");
/// let scene = Gizmos::new(ctx.clone(), GizmosDescriptor::default());
/// let overlay = Gizmos::new(ctx, GizmosDescriptor::new().label("Overlay Gizmos"));
/// ```
pub struct GraphicsContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GraphicsContext {
    /// Creates a new graphics context with default settings.
    pub async fn new_owned() -> Result<Arc<Self>, GraphicsError> {
        Self::new_owned_with_descriptor(GraphicsContextDescriptor::default()).await
    }

    /// Creates a new graphics context, blocking the current thread.
    pub fn new_owned_sync() -> Result<Arc<Self>, GraphicsError> {
        pollster::block_on(Self::new_owned())
    }

    /// Creates a context from `descriptor`.
    ///
    /// When no hardware adapter matches and `retry_on_software` is set, a
    /// second request is made for the software fallback adapter, so gizmo
    /// tests still run on GPU-less CI machines.
    pub async fn new_owned_with_descriptor(
        descriptor: GraphicsContextDescriptor,
    ) -> Result<Arc<Self>, GraphicsError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: descriptor.backends,
            ..Default::default()
        });

        let adapter = match Self::request_adapter(
            &instance,
            &descriptor,
            descriptor.force_fallback_adapter,
        )
        .await
        {
            Ok(adapter) => adapter,
            Err(err) if descriptor.retry_on_software && !descriptor.force_fallback_adapter => {
                tracing::warn!("No hardware adapter ({}), retrying with software adapter", err);
                Self::request_adapter(&instance, &descriptor, true).await?
            }
            Err(err) => return Err(err),
        };

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: descriptor.label,
                required_features: wgpu::Features::empty(),
                required_limits: descriptor.limits.clone(),
                ..Default::default()
            })
            .await
            .map_err(|e| GraphicsError::DeviceCreation(e.to_string()))?;

        let info = adapter.get_info();
        tracing::info!(
            adapter = %info.name,
            backend = ?info.backend,
            "Created gizmo graphics context"
        );

        Ok(Arc::new(Self {
            instance,
            adapter,
            device,
            queue,
        }))
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        descriptor: &GraphicsContextDescriptor,
        software: bool,
    ) -> Result<wgpu::Adapter, GraphicsError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: descriptor.power_preference,
                force_fallback_adapter: software,
                compatible_surface: None,
            })
            .await
            .map_err(|_| GraphicsError::NoAdapter)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Largest capacity a gizmo buffer of `record_size`-byte records can have.
    pub fn max_records(&self, record_size: usize) -> usize {
        crate::renderer::max_records(self.device.limits().max_buffer_size, record_size)
    }
}

/// Adapter and device selection for [`GraphicsContext`].
#[derive(Debug, Clone)]
pub struct GraphicsContextDescriptor {
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,
    /// Request the software adapter straight away.
    pub force_fallback_adapter: bool,
    /// Retry with the software adapter when no hardware adapter matches.
    pub retry_on_software: bool,
    pub limits: wgpu::Limits,
    /// Device label, shown in validation messages.
    pub label: Option<&'static str>,
}

impl Default for GraphicsContextDescriptor {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            retry_on_software: true,
            // Gizmos need nothing beyond vertex buffers and one uniform.
            limits: wgpu::Limits::downlevel_defaults(),
            label: Some("Gizmo Device"),
        }
    }
}

impl GraphicsContextDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn power_preference(mut self, power_preference: wgpu::PowerPreference) -> Self {
        self.power_preference = power_preference;
        self
    }

    pub fn backends(mut self, backends: wgpu::Backends) -> Self {
        self.backends = backends;
        self
    }

    pub fn force_fallback_adapter(mut self, force: bool) -> Self {
        self.force_fallback_adapter = force;
        self
    }

    pub fn retry_on_software(mut self, retry: bool) -> Self {
        self.retry_on_software = retry;
        self
    }

    pub fn limits(mut self, limits: wgpu::Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }
}
