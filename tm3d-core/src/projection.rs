/// Orthographic screen projection
use nalgebra::{Point3, Rotation3};

use crate::geometry::Mesh;

/// Fraction of the smaller grid dimension the mesh is scaled to fill.
const FIT_MARGIN: f64 = 0.9;

/// Center-relative orthographic projection into a character grid.
///
/// Screen X/Y are scaled model coordinates offset to the grid center, with
/// Y flipped because text rows grow downward. The projected Z is the
/// rotated model Z, unscaled: it is a view-depth sort key, not a screen
/// axis.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    center: Point3<f64>,
    scale: f64,
    half_width: f64,
    half_height: f64,
}

impl Projection {
    /// Fit a mesh into a width × height grid.
    ///
    /// Assumes the degeneracy guards (non-empty mesh, positive extent,
    /// positive dimensions) already ran at the render boundary; a zero
    /// extent here would produce an infinite scale.
    pub fn fit(mesh: &Mesh, width: usize, height: usize) -> Self {
        let scale = width.min(height) as f64 * FIT_MARGIN / mesh.max_extent();
        Self {
            center: mesh.center(),
            scale,
            half_width: width as f64 / 2.0,
            half_height: height as f64 / 2.0,
        }
    }

    /// Rotate a vertex about the mesh center and project it to screen
    /// coordinates, keeping the rotated z as view-depth.
    pub fn apply(&self, rotation: &Rotation3<f64>, vertex: &Point3<f64>) -> Point3<f64> {
        let rotated = rotation * (vertex - self.center);
        Point3::new(
            rotated.x * self.scale + self.half_width,
            -rotated.y * self.scale + self.half_height,
            rotated.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{RotationState, Transform};
    use nalgebra::Vector3;

    fn unit_square_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.expand_bounds(&Point3::new(0.0, 0.0, 0.0));
        mesh.expand_bounds(&Point3::new(2.0, 2.0, 2.0));
        mesh.add_triangle(crate::geometry::Triangle::new(
            Point3::origin(),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Vector3::z(),
        ));
        mesh
    }

    #[test]
    fn center_projects_to_grid_center() {
        let mesh = unit_square_mesh();
        let projection = Projection::fit(&mesh, 20, 10);
        let identity = Transform::rotation_matrix(&RotationState::zero());

        let screen = projection.apply(&identity, &Point3::new(1.0, 1.0, 1.0));
        assert!((screen.x - 10.0).abs() < 1e-12);
        assert!((screen.y - 5.0).abs() < 1e-12);
        // Depth is center-relative, unscaled.
        assert!(screen.z.abs() < 1e-12);
    }

    #[test]
    fn scale_uses_smaller_dimension_and_margin() {
        let mesh = unit_square_mesh();
        let projection = Projection::fit(&mesh, 20, 10);
        // min(20, 10) * 0.9 / extent 2.0
        assert!((projection.scale - 4.5).abs() < 1e-12);
    }

    #[test]
    fn y_axis_is_flipped() {
        let mesh = unit_square_mesh();
        let projection = Projection::fit(&mesh, 10, 10);
        let identity = Transform::rotation_matrix(&RotationState::zero());

        let above = projection.apply(&identity, &Point3::new(1.0, 2.0, 1.0));
        let below = projection.apply(&identity, &Point3::new(1.0, 0.0, 1.0));
        // Larger model Y lands on a smaller (higher) screen row.
        assert!(above.y < below.y);
    }

    #[test]
    fn depth_is_rotated_but_not_scaled() {
        let mesh = unit_square_mesh();
        let projection = Projection::fit(&mesh, 100, 100);
        let quarter_x =
            Transform::rotation_matrix(&RotationState::new(std::f64::consts::FRAC_PI_2, 0.0, 0.0));

        // Rotating +Y about X by 90° sends the offset to +Z.
        let screen = projection.apply(&quarter_x, &Point3::new(1.0, 2.0, 1.0));
        assert!((screen.z - 1.0).abs() < 1e-12);
    }
}
