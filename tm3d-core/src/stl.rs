/// ASCII STL parser
///
/// Best-effort, line-oriented parsing: I/O errors are the only failure
/// channel. Malformed facets are dropped, unparseable numbers become 0.0,
/// and unknown line tags are skipped.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::debug;
use nalgebra::{Point3, Vector3};
use nom::number::complete::double;

use crate::geometry::{Mesh, Triangle};

/// Parse a whitespace-separated numeric token, defaulting to 0.0 when the
/// token is not a valid float.
fn float_field(token: &str) -> f64 {
    double::<_, nom::error::Error<&str>>(token)
        .map(|(_, value)| value)
        .unwrap_or(0.0)
}

/// Facet accumulator: collects one normal and up to three vertices between
/// `facet` and `endfacet` lines.
struct FacetAccumulator {
    normal: Vector3<f64>,
    vertices: [Point3<f64>; 3],
    count: usize,
}

impl FacetAccumulator {
    fn new() -> Self {
        Self {
            normal: Vector3::zeros(),
            vertices: [Point3::origin(); 3],
            count: 0,
        }
    }

    fn begin(&mut self, normal: Vector3<f64>) {
        self.normal = normal;
        self.count = 0;
    }

    /// Record a vertex. A fourth or later vertex inside one facet has no
    /// slot and is dropped, though the count keeps advancing.
    fn push_vertex(&mut self, vertex: Point3<f64>) {
        if self.count < 3 {
            self.vertices[self.count] = vertex;
        }
        self.count += 1;
    }

    /// Finish the facet, yielding a triangle only when exactly three
    /// vertices were collected. Resets unconditionally.
    fn finish(&mut self) -> Option<Triangle> {
        let triangle = (self.count == 3).then(|| {
            Triangle::new(
                self.vertices[0],
                self.vertices[1],
                self.vertices[2],
                self.normal,
            )
        });
        self.count = 0;
        self.normal = Vector3::zeros();
        triangle
    }
}

/// Parse an ASCII STL document from a buffered reader.
pub fn parse_stl<R: BufRead>(reader: R) -> io::Result<Mesh> {
    let mut mesh = Mesh::new();
    let mut facet = FacetAccumulator::new();
    let mut dropped = 0usize;

    for line in reader.lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&tag) = parts.first() else {
            continue;
        };

        match tag {
            "solid" => {
                if parts.len() > 1 {
                    mesh.name = parts[1..].join(" ").trim_matches('"').to_string();
                }
            }
            "facet" => {
                if parts.len() >= 5 && parts[1] == "normal" {
                    facet.begin(Vector3::new(
                        float_field(parts[2]),
                        float_field(parts[3]),
                        float_field(parts[4]),
                    ));
                }
            }
            "vertex" => {
                if parts.len() >= 4 {
                    let vertex = Point3::new(
                        float_field(parts[1]),
                        float_field(parts[2]),
                        float_field(parts[3]),
                    );
                    // Bounds grow from every vertex line, including facets
                    // that never complete.
                    mesh.expand_bounds(&vertex);
                    facet.push_vertex(vertex);
                }
            }
            "endfacet" => match facet.finish() {
                Some(triangle) => mesh.add_triangle(triangle),
                None => dropped += 1,
            },
            // outer loop / endloop / endsolid and anything unrecognized
            _ => {}
        }
    }

    debug!(
        "parsed STL '{}': {} triangles, {} incomplete facets dropped",
        mesh.name,
        mesh.triangles.len(),
        dropped
    );
    Ok(mesh)
}

/// Parse an ASCII STL file from disk.
pub fn parse_stl_file<P: AsRef<Path>>(path: P) -> io::Result<Mesh> {
    let file = File::open(path)?;
    parse_stl(BufReader::new(file))
}
