#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod assets;
pub mod errors;
pub mod render;
pub mod settings;
pub mod utils;

pub use app::App;
pub use assets::gltf::{MeshData, Semantic};
pub use errors::{Result, ViewerError};
pub use render::renderer::Renderer;
pub use render::transform::TransformState;
pub use settings::ViewerSettings;
