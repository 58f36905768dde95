//! Built-in primitive geometry.

use crate::data::VertexData;

/// Corner positions of the cube, four per face.
#[rustfmt::skip]
const CORNERS: [[f32; 3]; 24] = [
    // front
    [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
    // back
    [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0],
    // top
    [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0],
    // bottom
    [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],
    // right
    [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
    // left
    [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],
];

/// Outward normal of each face, in [CORNERS] face order.
#[rustfmt::skip]
const FACE_NORMALS: [[f32; 3]; 6] = [
    [ 0.0,  0.0,  1.0], // front
    [ 0.0,  0.0, -1.0], // back
    [ 0.0,  1.0,  0.0], // top
    [ 0.0, -1.0,  0.0], // bottom
    [ 1.0,  0.0,  0.0], // right
    [-1.0,  0.0,  0.0], // left
];

/// Two triangles per face, indexing into [CORNERS].
#[rustfmt::skip]
const INDICES: [usize; 36] = [
     0,  1,  2,    0,  2,  3, // front
     4,  5,  6,    4,  6,  7, // back
     8,  9, 10,    8, 10, 11, // top
    12, 13, 14,   12, 14, 15, // bottom
    16, 17, 18,   16, 18, 19, // right
    20, 21, 22,   20, 22, 23, // left
];

/// The axis-aligned cube spanning `[-1, 1]³`, flattened the same way the
/// decoder flattens faces: one position/normal pair appended per
/// index-list entry, 36 vertices total, no texcoords.
pub fn cube() -> VertexData {
    let mut data = VertexData::default();
    data.positions.reserve(INDICES.len() * 3);
    data.normals.reserve(INDICES.len() * 3);
    for &i in &INDICES {
        data.positions.extend_from_slice(&CORNERS[i]);
        // corners are grouped four to a face
        data.normals.extend_from_slice(&FACE_NORMALS[i / 4]);
    }
    data
}
