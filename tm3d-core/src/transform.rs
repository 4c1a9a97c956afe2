/// Rotation state and matrix construction
use nalgebra::{Rotation3, Vector3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn reset(&mut self) {
        *self = Self::zero();
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state.
    ///
    /// Composed as Rz * Ry * Rx: a vertex is rotated around X first, then
    /// Y, then Z. The order is load-bearing; reordering produces a
    /// different rotation.
    pub fn rotation_matrix(rotation: &RotationState) -> Rotation3<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), rotation.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), rotation.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), rotation.z);

        rz * ry * rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    #[test]
    fn rotation_state_accumulates() {
        let mut state = RotationState::zero();
        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-12);
        assert!((state.y - 0.2).abs() < 1e-12);
        assert!((state.z - 0.3).abs() < 1e-12);

        state.reset();
        assert_eq!(state, RotationState::zero());
    }

    #[test]
    fn zero_rotation_is_identity() {
        let matrix = Transform::rotation_matrix(&RotationState::zero());
        assert!((matrix.matrix() - Rotation3::identity().matrix()).norm() < 1e-12);
    }

    #[test]
    fn full_turn_is_identity() {
        for state in [
            RotationState::new(TAU, 0.0, 0.0),
            RotationState::new(0.0, TAU, 0.0),
            RotationState::new(0.0, 0.0, TAU),
        ] {
            let matrix = Transform::rotation_matrix(&state);
            assert!((matrix.matrix() - Rotation3::identity().matrix()).norm() < 1e-9);
        }
    }

    #[test]
    fn composition_order_is_z_then_y_then_x() {
        let state = RotationState::new(0.4, -1.1, 2.3);
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), state.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), state.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), state.z);

        let composed = Transform::rotation_matrix(&state);
        assert!((composed.matrix() - (rz * ry * rx).matrix()).norm() < 1e-12);
        // The reverse order is a genuinely different rotation.
        assert!((composed.matrix() - (rx * ry * rz).matrix()).norm() > 1e-3);
    }

    #[test]
    fn x_rotation_sends_y_to_z() {
        let matrix = Transform::rotation_matrix(&RotationState::new(FRAC_PI_2, 0.0, 0.0));
        let rotated = matrix * Vector3::new(0.0, 1.0, 0.0);
        assert!((rotated - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }
}
