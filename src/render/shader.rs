//! Shader Compilation & Pipeline Linking
//!
//! WGSL sources are validated on the CPU (naga front-end + validator) before
//! a `wgpu::ShaderModule` is ever created, so a broken shader fails with a
//! readable diagnostic instead of surfacing through the device's async error
//! channel. Pipeline creation runs inside a validation error scope for the
//! same reason.
//!
//! Linking does not activate anything: the render loop binds the pipeline
//! explicitly each frame.

use std::fmt;

use crate::errors::{Result, ViewerError};

/// Which pipeline stage a shader source feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Parses and validates a WGSL source for the given stage.
///
/// This is the CPU half of [`compile`]; it never touches the device, which
/// keeps it usable from tests. Returns the validated naga module.
pub fn validate(label: &str, source: &str, stage: ShaderStage) -> Result<naga::Module> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ViewerError::ShaderCompile {
        stage,
        label: label.to_string(),
        log: e.emit_to_string(source),
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    );
    validator
        .validate(&module)
        .map_err(|e| ViewerError::ShaderCompile {
            stage,
            label: label.to_string(),
            log: e.emit_to_string(source),
        })?;

    if !module
        .entry_points
        .iter()
        .any(|ep| ep.stage == stage.to_naga())
    {
        return Err(ViewerError::ShaderCompile {
            stage,
            label: label.to_string(),
            log: format!("module has no {stage} entry point"),
        });
    }

    Ok(module)
}

/// Compiles a WGSL source into a shader module.
///
/// Fails with [`ViewerError::ShaderCompile`] carrying the compiler
/// diagnostic; on success the module is ready to be linked.
pub fn compile(
    device: &wgpu::Device,
    label: &str,
    source: &str,
    stage: ShaderStage,
) -> Result<wgpu::ShaderModule> {
    validate(label, source, stage)?;

    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    }))
}

/// Fixed-function state for [`link_pipeline`].
pub struct PipelineDesc<'a> {
    pub vertex: &'a wgpu::ShaderModule,
    pub fragment: &'a wgpu::ShaderModule,
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub color_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
}

/// Links vertex and fragment modules into a render pipeline.
///
/// Depth testing (less-or-equal) and back-face culling are session-wide
/// state and are baked in here, once, rather than toggled per frame.
pub fn link_pipeline(device: &wgpu::Device, desc: &PipelineDesc<'_>) -> Result<wgpu::RenderPipeline> {
    let bind_group_layouts: Vec<Option<&wgpu::BindGroupLayout>> =
        desc.bind_group_layouts.iter().map(|b| Some(*b)).collect();
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Mesh Pipeline Layout"),
        bind_group_layouts: &bind_group_layouts,
        immediate_size: 0,
    });

    let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Mesh Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: desc.vertex,
            entry_point: Some("vs_main"),
            buffers: desc.vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.fragment,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: desc.depth_format,
            depth_write_enabled: Some(true),
            depth_compare: Some(wgpu::CompareFunction::LessEqual),
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    if let Some(e) = pollster::block_on(error_scope.pop()) {
        return Err(ViewerError::PipelineLink(e.to_string()));
    }

    Ok(pipeline)
}
