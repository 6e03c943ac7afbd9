//! Viewer Settings
//!
//! Startup configuration for the window, the surface and the render loop.
//! The defaults reproduce the reference setup: a 500×300 surface, a sky-blue
//! clear color and a fixed relative model path.
//!
//! ```rust,ignore
//! use glint::ViewerSettings;
//!
//! let settings = ViewerSettings {
//!     vsync: false,
//!     ..Default::default()
//! };
//! App::new(settings).run()?;
//! ```

use std::path::PathBuf;

/// Startup configuration for the viewer.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    /// Initial surface width in logical pixels.
    pub width: u32,
    /// Initial surface height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Path of the binary glTF asset to display.
    pub model_path: PathBuf,
    /// Present with vertical sync.
    pub vsync: bool,
    /// Per-frame clear color.
    pub clear_color: wgpu::Color,
    /// Depth buffer format.
    pub depth_format: wgpu::TextureFormat,
    /// Adapter selection hint.
    pub power_preference: wgpu::PowerPreference,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            width: 500,
            height: 300,
            title: "glTF Viewer".to_string(),
            model_path: PathBuf::from("assets/lowpolyfoxwithcolor.glb"),
            vsync: true,
            clear_color: wgpu::Color {
                r: 0.0,
                g: 182.0 / 255.0,
                b: 1.0,
                a: 1.0,
            },
            depth_format: wgpu::TextureFormat::Depth24Plus,
            power_preference: wgpu::PowerPreference::None,
        }
    }
}
