pub mod context;
pub mod mesh;
pub mod renderer;
pub mod shader;
pub mod transform;
pub mod uniforms;

pub use context::GpuContext;
pub use mesh::GpuMesh;
pub use renderer::Renderer;
pub use transform::TransformState;
