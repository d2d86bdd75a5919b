//! wgpu upload of the background uniform block

use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::sink::{ParamSink, ParamValue, StoredParam};
use crate::uniforms::{BackgroundUniforms, UniformBlockSink};

/// Parameter sink backed by a wgpu uniform buffer
///
/// Parameters are packed on the CPU side; [`flush`](ParamSink::flush)
/// uploads the block once per frame, and only if something changed.
pub struct GpuUniformSink {
    block: UniformBlockSink,
    queue: Arc<wgpu::Queue>,
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GpuUniformSink {
    /// Create the uniform buffer and its bind group (binding 0, group 0)
    pub fn new(device: &wgpu::Device, queue: Arc<wgpu::Queue>, width: u32, height: u32) -> Self {
        let block = UniformBlockSink::new(width as f32, height as f32);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Parallax Uniform Buffer"),
            contents: block.block().as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Parallax Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<BackgroundUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Parallax Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            block,
            queue,
            buffer,
            bind_group_layout,
            bind_group,
        }
    }

    /// Layout to include in the host's pipeline layout
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Bind group to set before drawing the background
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// The underlying uniform buffer
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// CPU-side copy of the block
    pub fn uniforms(&self) -> &BackgroundUniforms {
        self.block.block()
    }
}

impl ParamSink for GpuUniformSink {
    fn set_param(&mut self, name: &str, value: ParamValue<'_>) {
        self.block.set_param(name, value);
    }

    fn param(&self, name: &str) -> Option<StoredParam> {
        self.block.param(name)
    }

    fn flush(&mut self) {
        if !self.block.is_dirty() {
            return;
        }
        self.queue
            .write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[*self.block.block()]));
        self.block.mark_clean();
    }
}
