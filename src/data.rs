use nalgebra::{Point3, Vector3};

/// The per-vertex attribute kinds understood by the decoder.
///
/// Values correspond to the `v`/`vt`/`vn` declaration directives of the
/// OBJ format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position,
    Texcoord,
    Normal,
}

impl Attribute {
    /// Every attribute kind, in `v`/`vt`/`vn` declaration order (the order
    /// their fields take in a face corner token).
    pub const ALL: [Attribute; 3] = [Attribute::Position, Attribute::Texcoord, Attribute::Normal];

    /// Number of components one vertex contributes to this attribute's
    /// flattened buffer.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            Attribute::Position => 3,
            Attribute::Texcoord => 2,
            Attribute::Normal => 3,
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attribute::Position => f.write_str("position"),
            Attribute::Texcoord => f.write_str("texcoord"),
            Attribute::Normal => f.write_str("normal"),
        }
    }
}

/// Flattened, render-ready vertex buffers.
///
/// Buffers are *not* deduplicated: every face-vertex reference appends a
/// fresh copy of the referenced components, so a geometric vertex appears
/// once per face corner that uses it. Each buffer's length is always an
/// exact multiple of its [arity](Attribute::arity); a buffer stays empty
/// when no face supplied that attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexData {
    pub positions: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub normals: Vec<f32>,
}

impl VertexData {
    /// Number of vertices in the position buffer.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / Attribute::Position.arity()
    }

    /// `true` if no face appended anything to any buffer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.texcoords.is_empty() && self.normals.is_empty()
    }

    /// Derive flat (per-face) normals from the position buffer.
    ///
    /// Positions are interpreted as a triangle soup, which is what the
    /// decoder emits; each triangle's [face_normal] is repeated for its
    /// three corners, so the result lines up with `positions` and can
    /// stand in for a `normals` buffer the document never supplied.
    /// Trailing positions that do not fill a whole triangle are ignored.
    pub fn flat_normals(&self) -> Vec<f32> {
        let mut normals = Vec::with_capacity(self.positions.len());
        for tri in self.positions.chunks_exact(9) {
            let a = Point3::new(tri[0], tri[1], tri[2]);
            let b = Point3::new(tri[3], tri[4], tri[5]);
            let c = Point3::new(tri[6], tri[7], tri[8]);
            let n = face_normal(&a, &b, &c);
            for _ in 0..3 {
                normals.extend_from_slice(&[n.x, n.y, n.z]);
            }
        }
        normals
    }
}

/// One [Geometry]'s vertex buffers.
///
/// A field is `None` when no face in the group ever supplied that
/// attribute, which lets consumers distinguish "mesh has no normals"
/// from "normal data happens to be empty".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    pub positions: Option<Vec<f32>>,
    pub texcoords: Option<Vec<f32>>,
    pub normals: Option<Vec<f32>>,
}

impl GeometryData {
    /// The buffer for one attribute kind, if any face supplied it.
    pub fn attribute(&self, kind: Attribute) -> Option<&[f32]> {
        match kind {
            Attribute::Position => self.positions.as_deref(),
            Attribute::Texcoord => self.texcoords.as_deref(),
            Attribute::Normal => self.normals.as_deref(),
        }
    }

    /// Number of vertices, counted from the position buffer.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions
            .as_ref()
            .map_or(0, |p| p.len() / Attribute::Position.arity())
    }
}

/// A run of faces tagged with the material that was active when they
/// were declared.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Material name from the most recent `usemtl`, or `"default"` if the
    /// document declared faces before selecting one.
    pub material: String,
    pub data: GeometryData,
}

/// A decoded document in grouped form: the material libraries it
/// references plus one [Geometry] per material run, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object3d {
    /// `mtllib` arguments in order of appearance; duplicates are kept.
    pub material_libs: Vec<String>,
    pub geometries: Vec<Geometry>,
}

/// Unit-length normal of the triangle `(a, b, c)`, taken as the cross
/// product of the two edges meeting at `b`.
///
/// Degenerate (zero-area) triangles produce the zero vector.
pub fn face_normal(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Vector3<f32> {
    let n = (a - b).cross(&(c - b));
    let len = n.norm();
    if len > 0.0 {
        n / len
    } else {
        Vector3::zeros()
    }
}
