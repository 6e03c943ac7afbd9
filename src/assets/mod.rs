pub mod gltf;

pub use gltf::{MeshData, Semantic};
