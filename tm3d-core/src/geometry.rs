/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};

/// A triangle face defined by three vertices and a facet normal.
///
/// The normal is carried through from the STL source but is not consumed
/// by the depth-ramp shading; it is kept as a hook for a future lighting
/// model.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [Point3<f64>; 3],
    pub normal: Vector3<f64>,
}

impl Triangle {
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            vertices: [v0, v1, v2],
            normal,
        }
    }

    /// Calculate the face normal from the triangle's winding, ignoring the
    /// stored normal.
    pub fn calculate_normal(&self) -> Vector3<f64> {
        let edge1 = self.vertices[1] - self.vertices[0];
        let edge2 = self.vertices[2] - self.vertices[0];

        edge1.cross(&edge2).normalize()
    }
}

/// A named 3D mesh composed of triangles, with an axis-aligned bounding box.
///
/// The bounds are expanded incrementally as vertices are added and are never
/// recomputed from the triangle list. An empty mesh keeps the ±infinity
/// sentinel bounds; callers must check `is_empty` before dividing by any
/// extent.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub triangles: Vec<Triangle>,
    pub min_bounds: Point3<f64>,
    pub max_bounds: Point3<f64>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            triangles: Vec::new(),
            min_bounds: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max_bounds: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut mesh = Self::new();
        mesh.triangles.reserve(capacity);
        mesh
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Grow the bounding box to enclose `point`.
    pub fn expand_bounds(&mut self, point: &Point3<f64>) {
        for i in 0..3 {
            self.min_bounds[i] = self.min_bounds[i].min(point[i]);
            self.max_bounds[i] = self.max_bounds[i].max(point[i]);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Midpoint of the bounding box.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min_bounds, &self.max_bounds)
    }

    /// Largest per-axis extent of the bounding box.
    pub fn max_extent(&self) -> f64 {
        let extent = self.max_bounds - self.min_bounds;
        extent.x.max(extent.y).max(extent.z)
    }

    /// Create a simple cube mesh, used as the default viewer model and in
    /// tests.
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();
        mesh.name = "cube".to_string();

        // Each face as a quad split into two triangles sharing the face
        // normal.
        let faces: [(Vector3<f64>, [Point3<f64>; 4]); 6] = [
            (
                Vector3::new(0.0, 0.0, 1.0),
                [
                    Point3::new(-half, -half, half),
                    Point3::new(half, -half, half),
                    Point3::new(half, half, half),
                    Point3::new(-half, half, half),
                ],
            ),
            (
                Vector3::new(0.0, 0.0, -1.0),
                [
                    Point3::new(half, -half, -half),
                    Point3::new(-half, -half, -half),
                    Point3::new(-half, half, -half),
                    Point3::new(half, half, -half),
                ],
            ),
            (
                Vector3::new(0.0, 1.0, 0.0),
                [
                    Point3::new(-half, half, half),
                    Point3::new(half, half, half),
                    Point3::new(half, half, -half),
                    Point3::new(-half, half, -half),
                ],
            ),
            (
                Vector3::new(0.0, -1.0, 0.0),
                [
                    Point3::new(-half, -half, -half),
                    Point3::new(half, -half, -half),
                    Point3::new(half, -half, half),
                    Point3::new(-half, -half, half),
                ],
            ),
            (
                Vector3::new(1.0, 0.0, 0.0),
                [
                    Point3::new(half, -half, half),
                    Point3::new(half, -half, -half),
                    Point3::new(half, half, -half),
                    Point3::new(half, half, half),
                ],
            ),
            (
                Vector3::new(-1.0, 0.0, 0.0),
                [
                    Point3::new(-half, -half, -half),
                    Point3::new(-half, -half, half),
                    Point3::new(-half, half, half),
                    Point3::new(-half, half, -half),
                ],
            ),
        ];

        for (normal, [a, b, c, d]) in faces {
            for corner in [a, b, c, d] {
                mesh.expand_bounds(&corner);
            }
            mesh.add_triangle(Triangle::new(a, b, c, normal));
            mesh.add_triangle(Triangle::new(a, c, d, normal));
        }

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh_keeps_sentinel_bounds() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.min_bounds.x, f64::INFINITY);
        assert_eq!(mesh.max_bounds.x, f64::NEG_INFINITY);
    }

    #[test]
    fn bounds_expand_incrementally() {
        let mut mesh = Mesh::new();
        mesh.expand_bounds(&Point3::new(1.0, -2.0, 3.0));
        mesh.expand_bounds(&Point3::new(-1.0, 2.0, 0.0));

        assert_eq!(mesh.min_bounds, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(mesh.max_bounds, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.center(), Point3::new(0.0, 0.0, 1.5));
        assert_eq!(mesh.max_extent(), 4.0);
    }

    #[test]
    fn cube_has_twelve_triangles_and_symmetric_bounds() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.triangles.len(), 12);
        assert_eq!(cube.min_bounds, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(cube.max_bounds, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(cube.max_extent(), 2.0);
    }

    #[test]
    fn winding_normal_matches_stored_normal_for_cube() {
        let cube = Mesh::cube(2.0);
        for triangle in &cube.triangles {
            let computed = triangle.calculate_normal();
            assert!((computed - triangle.normal).norm() < 1e-12);
        }
    }
}
