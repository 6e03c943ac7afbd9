//! glTF Mesh Extraction
//!
//! Pulls the position / color / index data of the first mesh primitive out of
//! a glTF document. The viewer renders exactly one primitive: the first
//! primitive of the first mesh-bearing node, in document order.
//!
//! Extraction is fail-fast. A primitive without `POSITION`, `COLOR_0` or an
//! index accessor aborts the load with [`ViewerError::MissingAttribute`] —
//! issuing a draw call over missing data is worse than an explicit early
//! failure.

use std::fmt;
use std::path::Path;

use crate::errors::{Result, ViewerError};

/// Divisor for 16-bit normalized color components.
const COLOR_COMPONENT_MAX: f32 = 65535.0;

/// A named vertex data channel of a mesh primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semantic {
    /// The `POSITION` attribute (float triples, model space).
    Position,
    /// The `COLOR_0` attribute (16-bit unsigned quadruples in the source).
    Color0,
    /// The primitive's index accessor.
    Indices,
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semantic::Position => write!(f, "the POSITION attribute"),
            Semantic::Color0 => write!(f, "the COLOR_0 attribute"),
            Semantic::Indices => write!(f, "an index accessor"),
        }
    }
}

/// CPU-side vertex data of one mesh primitive.
///
/// Created once at load time and immutable thereafter. Colors are normalized
/// floats in `[0, 1]`; one color per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Vertex positions, model space.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex RGBA colors, normalized to `[0, 1]`.
    pub colors: Vec<[f32; 4]>,
    /// Triangle-list indices.
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Positions as a flat float slice, ready for upload.
    #[must_use]
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as a flat float slice, ready for upload.
    #[must_use]
    pub fn color_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Normalizes a 16-bit unsigned color component to `[0.0, 1.0]`.
#[inline]
#[must_use]
pub fn normalize_color_component(c: u16) -> f32 {
    f32::from(c) / COLOR_COMPONENT_MAX
}

/// Reads a binary glTF file and extracts its first mesh primitive.
pub fn load(path: &Path) -> Result<MeshData> {
    let (document, buffers, _images) = gltf::import(path)?;
    let mesh = extract(&document, &buffers)?;
    log::info!(
        "Loaded {}: {} vertices, {} indices",
        path.display(),
        mesh.vertex_count(),
        mesh.indices.len()
    );
    Ok(mesh)
}

/// Extracts the first primitive of the first mesh-bearing node.
pub fn extract(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<MeshData> {
    if log::log_enabled!(log::Level::Debug) {
        dump_document(document);
    }

    let mesh = document
        .nodes()
        .find_map(|node| node.mesh())
        .ok_or(ViewerError::MeshNotFound)?;
    let primitive = mesh.primitives().next().ok_or(ViewerError::MeshNotFound)?;

    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or(ViewerError::MissingAttribute(Semantic::Position))?
        .collect();

    // COLOR_0 is stored as 16-bit unsigned components; normalize here so the
    // rest of the pipeline only ever sees [0, 1] floats.
    let colors: Vec<[f32; 4]> = reader
        .read_colors(0)
        .ok_or(ViewerError::MissingAttribute(Semantic::Color0))?
        .into_rgba_u16()
        .map(|rgba| rgba.map(normalize_color_component))
        .collect();

    if colors.len() != positions.len() {
        return Err(ViewerError::AttributeCountMismatch {
            positions: positions.len(),
            colors: colors.len(),
        });
    }

    // Indices are drawn as 16-bit unsigned; reject anything that would not
    // survive the cast instead of wrapping silently.
    let raw_indices: Vec<u32> = reader
        .read_indices()
        .ok_or(ViewerError::MissingAttribute(Semantic::Indices))?
        .into_u32()
        .collect();

    let mut indices = Vec::with_capacity(raw_indices.len());
    for value in raw_indices {
        if value as usize >= positions.len() || value > u32::from(u16::MAX) {
            return Err(ViewerError::IndexOutOfRange {
                value,
                vertex_count: positions.len(),
            });
        }
        indices.push(value as u16);
    }

    Ok(MeshData {
        positions,
        colors,
        indices,
    })
}

/// Logs every node and the semantics of its mesh primitives.
fn dump_document(document: &gltf::Document) {
    for node in document.nodes() {
        log::debug!("node name: {:?}", node.name().unwrap_or("<unnamed>"));
        let Some(mesh) = node.mesh() else { continue };
        for primitive in mesh.primitives() {
            for (semantic, accessor) in primitive.attributes() {
                log::debug!(
                    "  {semantic:?}: {} {:?}",
                    accessor.count(),
                    accessor.dimensions()
                );
            }
        }
    }
}
