//! GPU Mesh Buffers
//!
//! Converts [`MeshData`] into static GPU-resident vertex and index buffers
//! and declares the vertex attribute layout consumed by the mesh pipeline.
//!
//! Buffers are created once at setup with static usage and never updated;
//! creation runs inside an out-of-memory error scope so an allocation
//! refusal (e.g. a lost context) surfaces as [`ViewerError::BufferCreation`]
//! instead of a deferred device error.

use wgpu::util::DeviceExt;

use crate::assets::gltf::MeshData;
use crate::errors::{Result, ViewerError};

/// Shader location of the position attribute.
pub const POSITION_LOCATION: u32 = 0;
/// Shader location of the color attribute.
pub const COLOR_LOCATION: u32 = 1;

/// Components per position (vec3).
pub const POSITION_COMPONENTS: u64 = 3;
/// Components per color (vec4).
pub const COLOR_COMPONENTS: u64 = 4;

const FLOAT_SIZE: u64 = std::mem::size_of::<f32>() as u64;

static POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: POSITION_LOCATION,
}];

static COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x4,
    offset: 0,
    shader_location: COLOR_LOCATION,
}];

/// GPU-resident buffers for one mesh primitive.
///
/// Owned by the renderer for the duration of the session; the buffers are
/// never reallocated.
pub struct GpuMesh {
    pub position_buffer: wgpu::Buffer,
    pub color_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    /// Uploads the full mesh: one buffer per attribute plus the index list.
    pub fn upload(device: &wgpu::Device, data: &MeshData) -> Result<Self> {
        let position_buffer = upload_vertex_buffer(device, "Position Buffer", data.position_floats())?;
        let color_buffer = upload_vertex_buffer(device, "Color Buffer", data.color_floats())?;
        let index_buffer = upload_index_buffer(device, "Index Buffer", &data.indices)?;

        Ok(Self {
            position_buffer,
            color_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        })
    }
}

/// Vertex buffer layouts for the mesh pipeline, in buffer-slot order:
/// positions (location 0, vec3) then colors (location 1, vec4). Tightly
/// packed 32-bit floats, zero offset.
#[must_use]
pub fn vertex_buffer_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        wgpu::VertexBufferLayout {
            array_stride: POSITION_COMPONENTS * FLOAT_SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: COLOR_COMPONENTS * FLOAT_SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &COLOR_ATTRIBUTES,
        },
    ]
}

/// Creates a static vertex buffer holding 32-bit floats.
pub fn upload_vertex_buffer(
    device: &wgpu::Device,
    label: &str,
    values: &[f32],
) -> Result<wgpu::Buffer> {
    create_buffer_checked(
        device,
        label,
        bytemuck::cast_slice(values),
        wgpu::BufferUsages::VERTEX,
    )
}

/// Creates a static index buffer holding 16-bit indices.
pub fn upload_index_buffer(
    device: &wgpu::Device,
    label: &str,
    values: &[u16],
) -> Result<wgpu::Buffer> {
    create_buffer_checked(
        device,
        label,
        bytemuck::cast_slice(values),
        wgpu::BufferUsages::INDEX,
    )
}

/// Creates a uniform buffer, initialized with `contents`.
pub fn create_uniform_buffer(
    device: &wgpu::Device,
    label: &str,
    contents: &[u8],
) -> Result<wgpu::Buffer> {
    create_buffer_checked(
        device,
        label,
        contents,
        wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    )
}

fn create_buffer_checked(
    device: &wgpu::Device,
    label: &str,
    contents: &[u8],
    usage: wgpu::BufferUsages,
) -> Result<wgpu::Buffer> {
    let error_scope = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage,
    });

    if let Some(e) = pollster::block_on(error_scope.pop()) {
        return Err(ViewerError::BufferCreation {
            label: label.to_string(),
            reason: e.to_string(),
        });
    }

    Ok(buffer)
}
