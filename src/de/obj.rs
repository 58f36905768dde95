//! Decoding of Wavefront's line-oriented `.obj` text format.
//!
//! # Notes
//!
//! * Output buffers are flat and non-indexed; every face corner lands as its
//!   own vertex, in document order, with no deduplication.
//! * Attribute pools are 1-indexed. Slot 0 of every pool holds zeroes, so a
//!   face may reference index 0 even in a document that declares nothing.
//! * Polygons with more than three corners are split into a triangle fan
//!   anchored at the first corner: triangle `i` covers corners
//!   `[0, i + 1, i + 2]`. Convexity and planarity are not checked.
//! * Only `v`, `vt`, `vn`, `f`, `usemtl`, and `mtllib` are understood, and
//!   [decode_mesh] recognizes just the first four. Anything else is reported
//!   as a [Warning] and skipped.
//!
//! # See Also
//!
//! * [Wavefront OBJ format notes](https://paulbourke.net/dataformats/obj/)

use crate::{
    data::{Attribute, Geometry, GeometryData, Object3d, VertexData},
    error::{Error, Warning},
};

use super::TextSource;

/// Material name assumed for faces that precede any `usemtl` directive.
pub const DEFAULT_MATERIAL: &str = "default";

/// Decode an OBJ document into a single flattened [VertexData].
///
/// Grouping directives are not recognized by this variant; a document that
/// carries `usemtl` or `mtllib` still decodes to the same buffers, with those
/// lines reported in the warning list. Use [decode_object] to keep material
/// structure.
///
/// # Errors
///
/// * [Error::MissingArgs] when a directive carries fewer arguments than its
///   minimum (3 for `v`/`vn`/`f`, 2 for `vt`).
/// * [Error::MalformedNumber] when a declared component fails to parse.
/// * [Error::MalformedFaceVertex] when a face corner is not of the form `p`,
///   `p/t`, `p//n`, or `p/t/n` with non-negative integer fields.
/// * [Error::IndexOutOfRange] when a face references a pool slot that was
///   never declared.
pub fn decode_mesh(text: &str) -> Result<(VertexData, Vec<Warning>), Error> {
    let mut pools = Pools::new();
    let mut data = VertexData::default();
    let mut written = Written::default();
    let mut warnings = Vec::new();

    for (line, keyword, rest) in directives(text) {
        let args: Vec<&str> = rest.split_whitespace().collect();
        match keyword {
            "v" => pools.declare_position(&args, line)?,
            "vt" => pools.declare_texcoord(&args, line)?,
            "vn" => pools.declare_normal(&args, line)?,
            "f" => pools.emit_face(&args, line, &mut data, &mut written)?,
            other => warnings.push(unrecognized(other, line)),
        }
    }

    tracing::debug!(
        vertices = data.vertex_count(),
        warnings = warnings.len(),
        "decoded mesh"
    );
    Ok((data, warnings))
}

/// Decode an OBJ document into material-grouped geometry.
///
/// Faces accumulate into a group opened at their first occurrence under the
/// currently selected material; faces that precede any `usemtl` fall into a
/// [DEFAULT_MATERIAL] group. Every `usemtl` closes the open group (if any),
/// so consecutive selections collapse into the last one and a trailing
/// `usemtl` adds no group.
///
/// # Errors
///
/// Everything [decode_mesh] reports, plus:
///
/// * [Error::MissingArgs] when `usemtl` or `mtllib` carries no argument.
pub fn decode_object(text: &str) -> Result<(Object3d, Vec<Warning>), Error> {
    let mut pools = Pools::new();
    let mut object = Object3d::default();
    let mut warnings = Vec::new();

    let mut material = String::from(DEFAULT_MATERIAL);
    let mut group: Option<Group> = None;

    for (line, keyword, rest) in directives(text) {
        let args: Vec<&str> = rest.split_whitespace().collect();
        match keyword {
            "v" => pools.declare_position(&args, line)?,
            "vt" => pools.declare_texcoord(&args, line)?,
            "vn" => pools.declare_normal(&args, line)?,
            "f" => {
                let open = group.get_or_insert_with(|| Group::open(&material));
                pools.emit_face(&args, line, &mut open.data, &mut open.written)?;
            }
            "usemtl" => {
                let name = first_arg("usemtl", &args, line)?;
                tracing::debug!(material = name, line, "material selected");
                material = name.to_owned();
                // a group exists only once it has faces, so any open group
                // predates this selection and closes here
                if let Some(open) = group.take() {
                    object.geometries.push(open.close());
                }
            }
            "mtllib" => {
                let name = first_arg("mtllib", &args, line)?;
                tracing::debug!(library = name, line, "material library referenced");
                object.material_libs.push(name.to_owned());
            }
            other => warnings.push(unrecognized(other, line)),
        }
    }

    if let Some(open) = group.take() {
        object.geometries.push(open.close());
    }

    tracing::debug!(
        geometries = object.geometries.len(),
        libraries = object.material_libs.len(),
        warnings = warnings.len(),
        "decoded object"
    );
    Ok((object, warnings))
}

/// Fetch `path` through `source` and [decode_mesh] the result.
///
/// # Errors
///
/// * [Error::Fetch] when `source` cannot supply the document.
/// * Everything [decode_mesh] reports.
pub fn load_mesh(
    source: &impl TextSource,
    path: &str,
) -> Result<(VertexData, Vec<Warning>), Error> {
    decode_mesh(&source.fetch(path)?)
}

/// Fetch `path` through `source` and [decode_object] the result.
///
/// # Errors
///
/// * [Error::Fetch] when `source` cannot supply the document.
/// * Everything [decode_object] reports.
pub fn load_object(
    source: &impl TextSource,
    path: &str,
) -> Result<(Object3d, Vec<Warning>), Error> {
    decode_object(&source.fetch(path)?)
}

/// Split a document into directive lines, yielding 1-based line numbers, the
/// leading keyword, and the unsplit remainder. Blank lines and `#` comments
/// are skipped. The keyword is the longest leading run of ASCII word
/// characters and may be empty.
fn directives(text: &str) -> impl Iterator<Item = (usize, &str, &str)> {
    text.split('\n').enumerate().filter_map(|(index, raw)| {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        let split = trimmed
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(trimmed.len());
        let (keyword, rest) = trimmed.split_at(split);
        Some((index + 1, keyword, rest))
    })
}

/// Emit the event for an unhandled directive and build the matching
/// [Warning] for the caller's list.
fn unrecognized(keyword: &str, line: usize) -> Warning {
    tracing::warn!(keyword, line, "unrecognized directive");
    Warning {
        keyword: keyword.to_owned(),
        line,
    }
}

/// First argument of a directive that requires one.
fn first_arg<'doc>(
    keyword: &'static str,
    args: &[&'doc str],
    line: usize,
) -> Result<&'doc str, Error> {
    args.first().copied().ok_or(Error::MissingArgs {
        keyword,
        expected: 1,
        found: args.len(),
        line,
    })
}

/// Parse the leading `N` arguments of a declaration directive as floats.
/// Surplus arguments are ignored, so `v` may carry a weight and `vt` a third
/// coordinate without widening the pool entry.
fn components<const N: usize>(
    keyword: &'static str,
    attribute: Attribute,
    args: &[&str],
    line: usize,
) -> Result<[f32; N], Error> {
    if args.len() < N {
        return Err(Error::MissingArgs {
            keyword,
            expected: N,
            found: args.len(),
            line,
        });
    }
    let mut entry = [0.0; N];
    for (slot, arg) in entry.iter_mut().zip(args) {
        *slot = arg.parse().map_err(|_| Error::MalformedNumber {
            attribute,
            argument: (*arg).to_owned(),
            line,
        })?;
    }
    Ok(entry)
}

/// One `/`-separated field of a face corner token. `None` when the field is
/// absent or empty, `Some(index)` for a non-negative integer.
fn field(raw: Option<&str>, token: &str, line: usize) -> Result<Option<usize>, Error> {
    match raw {
        None | Some("") => Ok(None),
        Some(digits) => digits
            .parse()
            .map(Some)
            .map_err(|_| Error::MalformedFaceVertex {
                token: token.to_owned(),
                line,
            }),
    }
}

/// Read pool slot `index`, reporting the pool's extent when the document
/// references geometry it never declared.
fn lookup<const N: usize>(
    pool: &[[f32; N]],
    attribute: Attribute,
    index: usize,
    line: usize,
) -> Result<&[f32; N], Error> {
    pool.get(index).ok_or(Error::IndexOutOfRange {
        attribute,
        index,
        len: pool.len(),
        line,
    })
}

/// Attribute pools in declaration order, 1-indexed via a zeroed sentinel in
/// slot 0.
struct Pools {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
}

impl Pools {
    fn new() -> Self {
        Self {
            positions: vec![[0.0; 3]],
            texcoords: vec![[0.0; 2]],
            normals: vec![[0.0; 3]],
        }
    }

    fn declare_position(&mut self, args: &[&str], line: usize) -> Result<(), Error> {
        self.positions
            .push(components("v", Attribute::Position, args, line)?);
        Ok(())
    }

    fn declare_texcoord(&mut self, args: &[&str], line: usize) -> Result<(), Error> {
        self.texcoords
            .push(components("vt", Attribute::Texcoord, args, line)?);
        Ok(())
    }

    fn declare_normal(&mut self, args: &[&str], line: usize) -> Result<(), Error> {
        self.normals
            .push(components("vn", Attribute::Normal, args, line)?);
        Ok(())
    }

    /// Fan-triangulate one `f` line, appending every referenced component to
    /// `data`. The anchor corner is re-resolved for each triangle, so an
    /// N-gon contributes exactly `3 * (N - 2)` vertices.
    fn emit_face(
        &self,
        args: &[&str],
        line: usize,
        data: &mut VertexData,
        written: &mut Written,
    ) -> Result<(), Error> {
        if args.len() < 3 {
            return Err(Error::MissingArgs {
                keyword: "f",
                expected: 3,
                found: args.len(),
                line,
            });
        }
        for spur in 0..args.len() - 2 {
            self.corner(args[0], line, data, written)?;
            self.corner(args[spur + 1], line, data, written)?;
            self.corner(args[spur + 2], line, data, written)?;
        }
        Ok(())
    }

    /// Resolve one face corner token (`p`, `p/t`, `p//n`, or `p/t/n`) and
    /// append the referenced pool entries to `data`. Absent and empty fields
    /// contribute nothing for their attribute.
    fn corner(
        &self,
        token: &str,
        line: usize,
        data: &mut VertexData,
        written: &mut Written,
    ) -> Result<(), Error> {
        let mut fields = token.split('/');
        if let Some(index) = field(fields.next(), token, line)? {
            data.positions
                .extend_from_slice(lookup(&self.positions, Attribute::Position, index, line)?);
            written.positions = true;
        }
        if let Some(index) = field(fields.next(), token, line)? {
            data.texcoords
                .extend_from_slice(lookup(&self.texcoords, Attribute::Texcoord, index, line)?);
            written.texcoords = true;
        }
        if let Some(index) = field(fields.next(), token, line)? {
            data.normals
                .extend_from_slice(lookup(&self.normals, Attribute::Normal, index, line)?);
            written.normals = true;
        }
        if fields.next().is_some() {
            return Err(Error::MalformedFaceVertex {
                token: token.to_owned(),
                line,
            });
        }
        Ok(())
    }
}

/// Which attribute kinds the faces seen so far have actually written.
#[derive(Debug, Clone, Copy, Default)]
struct Written {
    positions: bool,
    texcoords: bool,
    normals: bool,
}

/// One geometry group under construction.
struct Group {
    material: String,
    data: VertexData,
    written: Written,
}

impl Group {
    fn open(material: &str) -> Self {
        Self {
            material: material.to_owned(),
            data: VertexData::default(),
            written: Written::default(),
        }
    }

    /// Seal the group. Only attribute kinds some face actually wrote come out
    /// as `Some`, so an all-position document yields `texcoords: None` rather
    /// than an empty buffer.
    fn close(self) -> Geometry {
        Geometry {
            material: self.material,
            data: GeometryData {
                positions: self.written.positions.then_some(self.data.positions),
                texcoords: self.written.texcoords.then_some(self.data.texcoords),
                normals: self.written.normals.then_some(self.data.normals),
            },
        }
    }
}
