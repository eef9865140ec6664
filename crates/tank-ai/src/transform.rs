use glam::{Quat, Vec3};

/// Rigid transform of a tank in world space.
///
/// Axis convention: +Z forward, +X right, +Y up. A positive yaw turns the nose
/// toward +X, which is what a positive `Turn` rate requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    /// Must have no zero component.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_position_yaw(position: Vec3, yaw_radians: f32) -> Self {
        Self {
            translation: position,
            rotation: Quat::from_rotation_y(yaw_radians),
            scale: Vec3::ONE,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Heading around +Y, in radians; 0 faces +Z.
    pub fn yaw(&self) -> f32 {
        let f = self.forward();
        f.x.atan2(f.z)
    }

    /// World point into this transform's local space.
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        (self.rotation.inverse() * (point - self.translation)) / self.scale
    }

    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * (local * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn quarter_turn_right_faces_positive_x() {
        let t = Transform::from_position_yaw(Vec3::ZERO, std::f32::consts::FRAC_PI_2);
        assert!(close(t.forward(), Vec3::X));
        assert!(close(t.right(), -Vec3::Z));
        assert!((t.yaw() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn inverse_point_undoes_transform_point() {
        let t = Transform {
            translation: Vec3::new(3.0, 0.5, -2.0),
            rotation: Quat::from_rotation_y(0.7),
            scale: Vec3::splat(2.0),
        };
        let local = Vec3::new(1.0, -4.0, 2.5);
        assert!(close(t.inverse_transform_point(t.transform_point(local)), local));
    }

    #[test]
    fn point_ahead_of_turned_tank_is_local_forward() {
        let t = Transform::from_position_yaw(Vec3::new(10.0, 0.0, 0.0), std::f32::consts::FRAC_PI_2);
        let local = t.inverse_transform_point(Vec3::new(15.0, 0.0, 0.0));
        assert!(close(local, Vec3::new(0.0, 0.0, 5.0)));
    }
}
