//! glTF extraction tests
//!
//! Tests for:
//! - COLOR_0 normalization (u16 → [0, 1] floats)
//! - First-node / first-primitive selection
//! - Missing POSITION / COLOR_0 / indices, each independently
//! - Index and attribute-count validation
//!
//! Assets are synthesized in memory as minimal GLB blobs (JSON chunk +
//! binary chunk) and run through `gltf::import_slice` — no fixture files.

use glint::assets::gltf::{extract, normalize_color_component, Semantic};
use glint::errors::ViewerError;
use serde_json::{json, Value};

// ============================================================================
// GLB synthesis helpers
// ============================================================================

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

/// Packs a JSON document and a binary buffer into a GLB blob.
fn glb(document: &Value, bin: &[u8]) -> Vec<u8> {
    let mut json_bytes = serde_json::to_vec(document).unwrap();
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    let mut bin_bytes = bin.to_vec();
    while bin_bytes.len() % 4 != 0 {
        bin_bytes.push(0);
    }

    let bin_chunk = if bin_bytes.is_empty() { 0 } else { 8 + bin_bytes.len() };
    let total = 12 + 8 + json_bytes.len() + bin_chunk;
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json_bytes);

    if !bin_bytes.is_empty() {
        out.extend_from_slice(&(bin_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        out.extend_from_slice(&bin_bytes);
    }
    out
}

const POSITIONS: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
const COLORS: [[u16; 4]; 3] = [
    [65535, 0, 0, 65535],
    [0, 65535, 0, 65535],
    [0, 0, 65535, 65535],
];

/// Binary layout: positions (36 bytes), colors (24 bytes), indices (6 bytes).
fn triangle_bin(indices: [u16; 3]) -> Vec<u8> {
    let mut bin = Vec::new();
    for p in POSITIONS {
        for c in p {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for rgba in COLORS {
        for c in rgba {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in indices {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    bin
}

/// A two-node document: an empty node first, then the mesh-bearing one.
fn triangle_json(color_count: u32) -> Value {
    json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0, 1] }],
        "nodes": [
            { "name": "empty" },
            { "name": "triangle", "mesh": 0 }
        ],
        "meshes": [{
            "primitives": [{
                "attributes": { "POSITION": 0, "COLOR_0": 1 },
                "indices": 2,
                "mode": 4
            }]
        }],
        "accessors": [
            {
                "bufferView": 0,
                "componentType": 5126,
                "count": 3,
                "type": "VEC3",
                "min": [0.0, 0.0, 0.0],
                "max": [1.0, 1.0, 0.0]
            },
            {
                "bufferView": 1,
                "componentType": 5123,
                "normalized": true,
                "count": color_count,
                "type": "VEC4"
            },
            {
                "bufferView": 2,
                "componentType": 5123,
                "count": 3,
                "type": "SCALAR"
            }
        ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
            { "buffer": 0, "byteOffset": 36, "byteLength": 24 },
            { "buffer": 0, "byteOffset": 60, "byteLength": 6 }
        ],
        "buffers": [{ "byteLength": 66 }]
    })
}

fn import(document: &Value, bin: &[u8]) -> (gltf::Document, Vec<gltf::buffer::Data>) {
    let (doc, buffers, _images) = gltf::import_slice(glb(document, bin)).unwrap();
    (doc, buffers)
}

fn primitive_mut(document: &mut Value) -> &mut Value {
    &mut document["meshes"][0]["primitives"][0]
}

// ============================================================================
// Color normalization
// ============================================================================

#[test]
fn color_normalization_covers_the_full_range() {
    assert_eq!(normalize_color_component(0), 0.0);
    assert_eq!(normalize_color_component(65535), 1.0);
    for c in 0..=u16::MAX {
        let v = normalize_color_component(c);
        assert!((0.0..=1.0).contains(&v), "component {c} escaped [0, 1]");
        assert_eq!(v, f32::from(c) / 65535.0);
    }
}

#[test]
fn color_normalization_is_monotonic() {
    let mut last = -1.0_f32;
    for c in (0..=u16::MAX).step_by(255) {
        let v = normalize_color_component(c);
        assert!(v > last);
        last = v;
    }
}

// ============================================================================
// Extraction — happy path
// ============================================================================

#[test]
fn extract_reads_the_first_mesh_bearing_node() {
    let (doc, buffers) = import(&triangle_json(3), &triangle_bin([0, 1, 2]));
    let mesh = extract(&doc, &buffers).unwrap();

    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.position_floats().len(), 9);
    assert_eq!(mesh.color_floats().len(), 12);
    assert_eq!(mesh.indices, vec![0, 1, 2]);

    for c in mesh.color_floats() {
        assert!((0.0..=1.0).contains(c));
    }
    // The first vertex is pure red at full alpha.
    assert_eq!(mesh.colors[0], [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(mesh.positions[1], [1.0, 0.0, 0.0]);
}

// ============================================================================
// Extraction — missing channels
// ============================================================================

#[test]
fn missing_position_is_detected() {
    let mut document = triangle_json(3);
    primitive_mut(&mut document)["attributes"]
        .as_object_mut()
        .unwrap()
        .remove("POSITION");

    let (doc, buffers) = import(&document, &triangle_bin([0, 1, 2]));
    let err = extract(&doc, &buffers).unwrap_err();
    assert!(matches!(
        err,
        ViewerError::MissingAttribute(Semantic::Position)
    ));
}

#[test]
fn missing_color_is_detected() {
    let mut document = triangle_json(3);
    primitive_mut(&mut document)["attributes"]
        .as_object_mut()
        .unwrap()
        .remove("COLOR_0");

    let (doc, buffers) = import(&document, &triangle_bin([0, 1, 2]));
    let err = extract(&doc, &buffers).unwrap_err();
    assert!(matches!(
        err,
        ViewerError::MissingAttribute(Semantic::Color0)
    ));
}

#[test]
fn missing_indices_is_detected() {
    let mut document = triangle_json(3);
    primitive_mut(&mut document)
        .as_object_mut()
        .unwrap()
        .remove("indices");

    let (doc, buffers) = import(&document, &triangle_bin([0, 1, 2]));
    let err = extract(&doc, &buffers).unwrap_err();
    assert!(matches!(
        err,
        ViewerError::MissingAttribute(Semantic::Indices)
    ));
}

#[test]
fn document_without_meshes_is_rejected() {
    let document = json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "name": "empty" }]
    });

    let (doc, buffers) = import(&document, &[]);
    let err = extract(&doc, &buffers).unwrap_err();
    assert!(matches!(err, ViewerError::MeshNotFound));
}

// ============================================================================
// Extraction — validation
// ============================================================================

#[test]
fn index_beyond_vertex_count_is_rejected() {
    let (doc, buffers) = import(&triangle_json(3), &triangle_bin([0, 1, 3]));
    let err = extract(&doc, &buffers).unwrap_err();
    match err {
        ViewerError::IndexOutOfRange {
            value,
            vertex_count,
        } => {
            assert_eq!(value, 3);
            assert_eq!(vertex_count, 3);
        }
        other => panic!("expected IndexOutOfRange, got {other:?}"),
    }
}

#[test]
fn color_count_mismatch_is_rejected() {
    let (doc, buffers) = import(&triangle_json(2), &triangle_bin([0, 1, 2]));
    let err = extract(&doc, &buffers).unwrap_err();
    match err {
        ViewerError::AttributeCountMismatch { positions, colors } => {
            assert_eq!(positions, 3);
            assert_eq!(colors, 2);
        }
        other => panic!("expected AttributeCountMismatch, got {other:?}"),
    }
}
