//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! The main error type [`ViewerError`] covers all failure modes including:
//! - GPU context, shader, pipeline and buffer creation failures
//! - Asset loading and attribute extraction errors
//! - Window / event loop errors
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ViewerError>`. Setup is fail-fast: the first error
//! aborts the whole load + setup sequence, and the caller is expected to log
//! the diagnostic rather than retry.

use thiserror::Error;

use crate::assets::gltf::Semantic;
use crate::render::shader::ShaderStage;

/// The main error type for the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// Failed to acquire a usable graphics context (surface, adapter or
    /// device).
    #[error("Failed to acquire graphics context: {0}")]
    ContextUnavailable(String),

    /// WGSL compilation failed. `log` carries the compiler diagnostic
    /// rendered against the source.
    #[error("Failed to compile {stage} shader '{label}':\n{log}")]
    ShaderCompile {
        /// Which stage was being compiled
        stage: ShaderStage,
        /// Label of the offending shader
        label: String,
        /// Compiler diagnostic
        log: String,
    },

    /// Render pipeline creation was rejected by the device.
    #[error("Failed to link render pipeline: {0}")]
    PipelineLink(String),

    /// The device refused to allocate a buffer (e.g. out of memory or a lost
    /// context).
    #[error("Failed to create GPU buffer '{label}': {reason}")]
    BufferCreation {
        /// Label of the buffer being created
        label: String,
        /// Device-reported reason
        reason: String,
    },

    /// Window system error.
    #[error("Window system error: {0}")]
    WindowError(#[from] raw_window_handle::HandleError),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// No node in the document carries a mesh with at least one primitive.
    #[error("No mesh-bearing node found in the document")]
    MeshNotFound,

    /// The first primitive lacks one of the three required data channels.
    #[error("Mesh primitive is missing {0}")]
    MissingAttribute(Semantic),

    /// An index does not fit the 16-bit index buffer or exceeds the vertex
    /// count.
    #[error("Index value {value} out of range (vertex count {vertex_count})")]
    IndexOutOfRange {
        /// The offending index value
        value: u32,
        /// Number of vertices in the primitive
        vertex_count: usize,
    },

    /// Position and color accessors disagree on the vertex count.
    #[error("Attribute count mismatch: {positions} positions vs {colors} colors")]
    AttributeCountMismatch {
        /// Vertices described by POSITION
        positions: usize,
        /// Vertices described by COLOR_0
        colors: usize,
    },

    /// glTF parsing or decoding error.
    #[error("glTF error: {0}")]
    GltfError(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<gltf::Error> for ViewerError {
    fn from(err: gltf::Error) -> Self {
        ViewerError::GltfError(err.to_string())
    }
}

/// Alias for `Result<T, ViewerError>`.
pub type Result<T> = std::result::Result<T, ViewerError>;
