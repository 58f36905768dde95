//! Behavior of both OBJ decoding variants.

use trifan::de::obj::{self, DEFAULT_MATERIAL};
use trifan::de::{FsSource, TextSource};
use trifan::{decode_mesh, decode_object, Attribute, Error};

/// A lone triangle decodes to exactly its three corners, in order.
#[test]
fn triangle() {
    let (mesh, warnings) = decode_mesh("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 3\n").unwrap();
    assert!(warnings.is_empty());
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.positions, [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
    assert!(mesh.texcoords.is_empty());
    assert!(mesh.normals.is_empty());
}

/// Quads fan around their first corner: `f 1 2 3 4` is `(1,2,3)` then `(1,3,4)`.
#[test]
fn quad_fan() {
    let text = r"
        v 0 0 0
        v 1 0 0
        v 1 1 0
        v 0 1 0
        f 1 2 3 4
    ";
    let (mesh, _) = decode_mesh(text).unwrap();
    assert_eq!(mesh.vertex_count(), 6);
    #[rustfmt::skip]
    assert_eq!(mesh.positions, [
        0.0, 0.0, 0.0,   1.0, 0.0, 0.0,   1.0, 1.0, 0.0,
        0.0, 0.0, 0.0,   1.0, 1.0, 0.0,   0.0, 1.0, 0.0,
    ]);
}

/// Faces accumulate in document order across multiple `f` lines.
#[test]
fn face_accumulation() {
    let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\n";
    let (mesh, _) = decode_mesh(text).unwrap();
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.positions[9..], [0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
}

/// Corner tokens may reference all three pools at once.
#[test]
fn full_corner_tokens() {
    let text = r"
        v 0 0 0
        v 1 0 0
        v 1 1 0
        vt 0 0
        vt 1 0
        vt 1 1
        vn 0 0 1
        f 1/1/1 2/2/1 3/3/1
    ";
    let (mesh, warnings) = decode_mesh(text).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(mesh.positions.len(), 9);
    assert_eq!(mesh.texcoords, [0.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
    assert_eq!(mesh.normals, [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
}

/// `p//n` corners skip the texcoord pool entirely.
#[test]
fn position_normal_corners() {
    let text = r"
        v 0 0 0
        v 1 0 0
        v 0 1 0
        vn 0 0 1
        f 1//1 2//1 3//1
    ";
    let (mesh, _) = decode_mesh(text).unwrap();
    assert!(mesh.texcoords.is_empty());
    assert_eq!(mesh.normals.len(), 9);
}

/// Index 0 resolves to the zeroed sentinel slot every pool starts with,
/// even in a document that declares nothing at all.
#[test]
fn sentinel_slot() {
    let (mesh, warnings) = decode_mesh("f 0 0 0\n").unwrap();
    assert!(warnings.is_empty());
    assert_eq!(mesh.positions, [0.0; 9]);

    let (mesh, _) = decode_mesh("v 1 1 1\nf 1/0 1/0 1/0\n").unwrap();
    assert_eq!(mesh.positions, [1.0; 9]);
    assert_eq!(mesh.texcoords, [0.0; 6]);
}

/// Referencing one slot past a pool is fatal and reports the pool extent.
#[test]
fn dangling_index() {
    let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 4\n";
    let err = decode_mesh(text).unwrap_err();
    assert!(matches!(
        err,
        Error::IndexOutOfRange {
            attribute: Attribute::Position,
            index: 4,
            len: 4,
            line: 4,
        }
    ));
    assert_eq!(
        err.to_string(),
        "face references position index out of pool range: 0..4 ∌ 4 (line 4)"
    );
}

/// Unrecognized directives are collected with their 1-based line numbers
/// and never disturb the decoded buffers.
#[test]
fn unrecognized_directives() {
    let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\n# flat\ns 1\nf 1 2 3\n";
    let (mesh, warnings) = decode_mesh(text).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(warnings.len(), 1);
    assert_eq!((warnings[0].keyword.as_str(), warnings[0].line), ("s", 5));
    assert_eq!(warnings[0].to_string(), "unrecognized directive `s` (line 5)");
}

/// The flat variant does not understand grouping; `usemtl` and `mtllib`
/// are ordinary unknown keywords to it.
#[test]
fn flat_variant_warns_on_grouping() {
    let text = "mtllib scene.mtl\nusemtl brick\nv 0 0 0\nf 0 0 0\n";
    let (_, warnings) = decode_mesh(text).unwrap();
    let keywords: Vec<&str> = warnings.iter().map(|w| w.keyword.as_str()).collect();
    assert_eq!(keywords, ["mtllib", "usemtl"]);
}

/// Declaration components must parse as floats.
#[test]
fn malformed_component() {
    let err = decode_mesh("v 0 zero 0\n").unwrap_err();
    match err {
        Error::MalformedNumber {
            attribute: Attribute::Position,
            argument,
            line: 1,
        } => assert_eq!(argument, "zero"),
        other => panic!("unexpected error: {other}"),
    }
}

/// Every directive enforces its minimum argument count.
#[test]
fn missing_arguments() {
    for (text, keyword, expected) in [
        ("v 1 2\n", "v", 3),
        ("vt 1\n", "vt", 2),
        ("vn 1 2\n", "vn", 3),
        ("f 1 2\n", "f", 3),
    ] {
        match decode_mesh(text).unwrap_err() {
            Error::MissingArgs {
                keyword: k,
                expected: e,
                found,
                line: 1,
            } => assert_eq!((k, e, found), (keyword, expected, expected - 1)),
            other => panic!("`{text}` produced {other}"),
        }
    }
}

/// Face corners reject negative indices, non-numeric fields, and a fourth
/// `/`-separated field.
#[test]
fn malformed_corners() {
    for text in ["f 0 0 -3\n", "f 0 0 x\n", "f 0/0/0/0 0 0\n", "f 0 0 1..2\n"] {
        let err = decode_mesh(text).unwrap_err();
        assert!(
            matches!(err, Error::MalformedFaceVertex { line: 1, .. }),
            "`{text}` produced {err}"
        );
    }
}

/// Arguments past a declaration's arity are ignored rather than widening
/// the pool entry.
#[test]
fn surplus_arguments() {
    let text = "v 1 2 3 0.5\nvt 0.25 0.75 0\nf 1/1 1/1 1/1\n";
    let (mesh, _) = decode_mesh(text).unwrap();
    assert_eq!(mesh.positions, [1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
    assert_eq!(mesh.texcoords, [0.25, 0.75, 0.25, 0.75, 0.25, 0.75]);
}

/// Empty and effectively-empty documents decode to empty buffers.
#[test]
fn empty_documents() {
    for text in ["", "\n\n", "# only comments\n# here\n", "   \n\t\n"] {
        let (mesh, warnings) = decode_mesh(text).unwrap();
        assert!(mesh.is_empty(), "{text:?} produced data");
        assert!(warnings.is_empty());
    }
}

/// Lines survive Windows endings and blank runs; numbering still counts
/// every raw line.
#[test]
fn crlf_and_blanks() {
    let text = "v 0 0 0\r\n\r\nv 1 0 0\r\nv 1 1 0\r\n\r\nzz\r\nf 1 2 3\r\n";
    let (mesh, warnings) = decode_mesh(text).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!((warnings[0].keyword.as_str(), warnings[0].line), ("zz", 6));
}

/// A line led by a non-word character warns with an empty keyword instead
/// of failing.
#[test]
fn wordless_line() {
    let (mesh, warnings) = decode_mesh("-1 2 3\n").unwrap();
    assert!(mesh.is_empty());
    assert_eq!((warnings[0].keyword.as_str(), warnings[0].line), ("", 1));
}

/// Keywords are the longest leading word run: `vt1` is not `vt`.
#[test]
fn keyword_is_whole_word() {
    let (_, warnings) = decode_mesh("vt1 0 0\n").unwrap();
    assert_eq!(warnings[0].keyword, "vt1");
}

/// Tabs and runs of spaces both separate arguments.
#[test]
fn tab_separated() {
    let (mesh, _) = decode_mesh("v\t1  2\t\t3\nf 1 1 1\n").unwrap();
    assert_eq!(mesh.positions, [1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
}

/// Faces that precede any `usemtl` land in a group under the default
/// material.
#[test]
fn default_material_group() {
    let (object, _) = decode_object("v 0 0 0\nf 1 1 1\n").unwrap();
    assert_eq!(object.geometries.len(), 1);
    assert_eq!(object.geometries[0].material, DEFAULT_MATERIAL);
    assert!(object.material_libs.is_empty());
}

/// Each material run becomes its own geometry, in document order, and all
/// groups share the document-wide pools.
#[test]
fn material_runs() {
    let text = r"
        mtllib scene.mtl
        v 0 0 0
        v 1 0 0
        v 1 1 0
        v 0 1 0
        usemtl brick
        f 1 2 3
        usemtl grass
        f 1 3 4
    ";
    let (object, warnings) = decode_object(text).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(object.material_libs, ["scene.mtl"]);

    let materials: Vec<&str> = object
        .geometries
        .iter()
        .map(|g| g.material.as_str())
        .collect();
    assert_eq!(materials, ["brick", "grass"]);
    assert_eq!(object.geometries[0].data.vertex_count(), 3);
    assert_eq!(
        object.geometries[1].data.positions.as_deref(),
        Some([0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0].as_slice())
    );
}

/// A `usemtl` with no face after it adds no group, and consecutive
/// selections collapse into the last one.
#[test]
fn dangling_and_stacked_selections() {
    let text = "v 0 0 0\nusemtl a\nusemtl b\nf 1 1 1\nusemtl c\n";
    let (object, _) = decode_object(text).unwrap();
    assert_eq!(object.geometries.len(), 1);
    assert_eq!(object.geometries[0].material, "b");
}

/// Re-selecting the current material still starts a fresh group.
#[test]
fn same_material_split() {
    let text = "v 0 0 0\nusemtl a\nf 1 1 1\nusemtl a\nf 1 1 1\n";
    let (object, _) = decode_object(text).unwrap();
    assert_eq!(object.geometries.len(), 2);
    assert!(object.geometries.iter().all(|g| g.material == "a"));
}

/// Only attribute kinds some face actually wrote come out of a group as
/// `Some`; the rest are absent, not empty.
#[test]
fn group_attribute_presence() {
    let text = r"
        v 0 0 0
        vn 0 0 1
        usemtl bare
        f 1 1 1
        usemtl lit
        f 1//1 1//1 1//1
    ";
    let (object, _) = decode_object(text).unwrap();

    let bare = &object.geometries[0].data;
    assert!(bare.positions.is_some());
    assert_eq!(bare.texcoords, None);
    assert_eq!(bare.normals, None);
    assert_eq!(bare.attribute(Attribute::Position), bare.positions.as_deref());

    let lit = &object.geometries[1].data;
    assert_eq!(lit.texcoords, None);
    assert_eq!(lit.normals.as_ref().map(Vec::len), Some(9));
}

/// Library references accumulate in order, duplicates included.
#[test]
fn library_order() {
    let text = "mtllib a.mtl\nmtllib b.mtl\nmtllib a.mtl\n";
    let (object, _) = decode_object(text).unwrap();
    assert_eq!(object.material_libs, ["a.mtl", "b.mtl", "a.mtl"]);
    assert!(object.geometries.is_empty());
}

/// Grouping directives require their argument.
#[test]
fn grouping_needs_arguments() {
    assert!(matches!(
        decode_object("usemtl\n").unwrap_err(),
        Error::MissingArgs {
            keyword: "usemtl",
            expected: 1,
            found: 0,
            line: 1,
        }
    ));
    assert!(matches!(
        decode_object("mtllib\n").unwrap_err(),
        Error::MissingArgs {
            keyword: "mtllib",
            ..
        }
    ));
}

/// Text source backed by one in-memory document.
struct Canned(&'static str);

impl TextSource for Canned {
    fn fetch(&self, _path: &str) -> Result<String, Error> {
        Ok(self.0.to_owned())
    }
}

/// Loading goes through the text source, then decodes as usual.
#[test]
fn load_via_source() {
    let canned = Canned("v 0 0 0\nf 1 1 1\nusemtl x\n");
    let (mesh, _) = obj::load_mesh(&canned, "whatever.obj").unwrap();
    assert_eq!(mesh.vertex_count(), 3);

    let (object, _) = obj::load_object(&canned, "whatever.obj").unwrap();
    assert_eq!(object.geometries[0].material, DEFAULT_MATERIAL);
}

/// A filesystem source that cannot find its document reports `Fetch`
/// without attempting a decode.
#[test]
fn fs_source_missing_file() {
    let err = obj::load_mesh(&FsSource, "definitely/not/here.obj").unwrap_err();
    assert!(matches!(err, Error::Fetch { .. }));
}
