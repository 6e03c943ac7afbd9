//! Renderer
//!
//! Owns the GPU context, the linked mesh pipeline, the uploaded mesh
//! buffers, the mvp uniform and the [`TransformState`], and drives one frame
//! per [`Renderer::render_frame`] call.
//!
//! Setup is strictly ordered: context → shaders → pipeline → buffers →
//! uniforms → transform. Everything exists before the first frame; the loop
//! itself never allocates.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::assets::gltf::MeshData;
use crate::errors::Result;
use crate::render::context::GpuContext;
use crate::render::mesh::{self, GpuMesh};
use crate::render::shader::{self, PipelineDesc, ShaderStage};
use crate::render::transform::TransformState;
use crate::render::uniforms::{self, MvpUniforms};
use crate::settings::ViewerSettings;

const VERT_SOURCE: &str = include_str!("shaders/mesh.vert.wgsl");
const FRAG_SOURCE: &str = include_str!("shaders/mesh.frag.wgsl");

/// The per-session renderer.
pub struct Renderer {
    pub context: GpuContext,
    pipeline: wgpu::RenderPipeline,
    mesh: GpuMesh,
    mvp_buffer: wgpu::Buffer,
    mvp_bind_group: wgpu::BindGroup,
    /// Matrices and the frame counter; advanced once per frame.
    pub transform: TransformState,
}

impl Renderer {
    /// Runs the whole fail-fast setup sequence against a window.
    pub async fn new<W>(window: W, settings: &ViewerSettings, data: &MeshData) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let context = GpuContext::new(window, settings, settings.width, settings.height).await?;
        let device = &context.device;

        let vert = shader::compile(device, "mesh.vert", VERT_SOURCE, ShaderStage::Vertex)?;
        let frag = shader::compile(device, "mesh.frag", FRAG_SOURCE, ShaderStage::Fragment)?;

        let bind_group_layout = uniforms::create_bind_group_layout(device);
        let pipeline = shader::link_pipeline(
            device,
            &PipelineDesc {
                vertex: &vert,
                fragment: &frag,
                vertex_buffers: &mesh::vertex_buffer_layouts(),
                bind_group_layouts: &[&bind_group_layout],
                color_format: context.color_format(),
                depth_format: context.depth_format,
            },
        )?;

        let mesh = GpuMesh::upload(device, data)?;
        let (mvp_buffer, mvp_bind_group) = uniforms::create_mvp_binding(device, &bind_group_layout)?;

        let transform = TransformState::new(context.aspect());

        log::info!(
            "Renderer ready: {} indices, {}x{} surface",
            mesh.index_count,
            context.config.width,
            context.config.height
        );

        Ok(Self {
            context,
            pipeline,
            mesh,
            mvp_buffer,
            mvp_bind_group,
            transform,
        })
    }

    /// Renders one frame: clear, advance the transform, upload the mvp
    /// uniform, draw the full index range, submit and present.
    ///
    /// Surface errors are tolerated per frame — the loop stays scheduled and
    /// the next iteration retries.
    pub fn render_frame(&mut self) {
        let output = match self.context.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            wgpu::CurrentSurfaceTexture::Lost => return, // Resize is handled by the event loop
            other => {
                log::error!("Render error: {other:?}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mvp = self.transform.advance();
        self.context.queue.write_buffer(
            &self.mvp_buffer,
            0,
            bytemuck::bytes_of(&MvpUniforms { mvp }),
        );

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Mesh Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Mesh Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.context.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.context.depth_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.mvp_bind_group, &[]);
            pass.set_vertex_buffer(0, self.mesh.position_buffer.slice(..));
            pass.set_vertex_buffer(1, self.mesh.color_buffer.slice(..));
            pass.set_index_buffer(self.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.mesh.index_count, 0, 0..1);
        }

        self.context.queue.submit(Some(encoder.finish()));
        output.present();
    }

    /// Handles a window resize: surface, depth buffer and projection aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        if height > 0 {
            self.transform.set_aspect(self.context.aspect());
        }
    }
}
