//! Shader Uniforms
//!
//! The mesh pipeline has a single uniform: the per-frame
//! model-view-projection matrix at group 0, binding 0.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::errors::Result;
use crate::render::mesh::create_uniform_buffer;

/// Uniform block for the mesh shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MvpUniforms {
    /// Combined model-view-projection matrix.
    pub mvp: Mat4,
}

impl Default for MvpUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
        }
    }
}

/// Bind group layout for [`MvpUniforms`] (group 0, binding 0, vertex stage).
#[must_use]
pub fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Mvp Bind Group Layout"),
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
    })
}

/// Creates the uniform buffer (identity-initialized) and its bind group.
pub fn create_mvp_binding(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
) -> Result<(wgpu::Buffer, wgpu::BindGroup)> {
    let buffer = create_uniform_buffer(
        device,
        "Mvp Uniform Buffer",
        bytemuck::bytes_of(&MvpUniforms::default()),
    )?;

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Mvp Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });

    Ok((buffer, bind_group))
}
