use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use nalgebra::Point3;

use trifan::de::{obj, FsSource};
use trifan::VertexData;

mod cli;

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    cli::initialize_tracing(&args.log_filter, args.log_format);

    let mut failures = 0usize;
    for path in &args.files {
        if let Err(err) = dump(path, args.flat, args.derive_normals) {
            tracing::error!(path = %path.display(), "{err}");
            failures += 1;
        }
    }

    if failures > 0 {
        tracing::error!(
            failures,
            total = args.files.len(),
            "some documents failed to decode"
        );
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn dump(path: &Path, flat: bool, derive_normals: bool) -> Result<(), trifan::Error> {
    let path = path.to_string_lossy();

    if flat {
        let (mesh, warnings) = obj::load_mesh(&FsSource, &path)?;
        match bounds(&mesh.positions) {
            Some((min, max)) => tracing::info!(
                path = %path,
                vertices = mesh.vertex_count(),
                texcoords = !mesh.texcoords.is_empty(),
                normals = !mesh.normals.is_empty(),
                warnings = warnings.len(),
                min = %format!("({}, {}, {})", min.x, min.y, min.z),
                max = %format!("({}, {}, {})", max.x, max.y, max.z),
                "decoded mesh"
            ),
            None => tracing::info!(path = %path, warnings = warnings.len(), "no geometry"),
        }
        if derive_normals && mesh.normals.is_empty() {
            tracing::info!(
                components = mesh.flat_normals().len(),
                "derived flat normals"
            );
        }
        return Ok(());
    }

    let (object, warnings) = obj::load_object(&FsSource, &path)?;
    tracing::info!(
        path = %path,
        geometries = object.geometries.len(),
        libraries = ?object.material_libs,
        warnings = warnings.len(),
        "decoded object"
    );
    for geometry in &object.geometries {
        let data = &geometry.data;
        tracing::info!(
            material = %geometry.material,
            vertices = data.vertex_count(),
            texcoords = data.texcoords.is_some(),
            normals = data.normals.is_some(),
            "geometry group"
        );
        if derive_normals && data.normals.is_none() {
            if let Some(positions) = data.positions.clone() {
                let soup = VertexData {
                    positions,
                    ..VertexData::default()
                };
                tracing::info!(
                    material = %geometry.material,
                    components = soup.flat_normals().len(),
                    "derived flat normals"
                );
            }
        }
    }
    Ok(())
}

/// Axis-aligned bounds of a flattened position buffer.
fn bounds(positions: &[f32]) -> Option<(Point3<f32>, Point3<f32>)> {
    let mut chunks = positions.chunks_exact(3);
    let first = chunks.next()?;
    let mut min = Point3::new(first[0], first[1], first[2]);
    let mut max = min;
    for p in chunks {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    Some((min, max))
}
