use super::vec2::Vec2;

/// A rigid frame: a position plus a unit rotation vector.
///
/// The rotation is stored as `(cos θ, sin θ)` so applying it costs no trig
/// calls; bodies keep it in sync with their angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: Vec2,
}

impl Transform {
    /// Creates a new transform from an angle in radians.
    pub fn new(position: Vec2, angle: f64) -> Self {
        Self {
            position,
            rotation: Vec2::for_angle(angle),
        }
    }

    /// Creates a transform from an already normalized rotation vector.
    pub fn from_rotation(position: Vec2, rotation: Vec2) -> Self {
        Self { position, rotation }
    }

    /// Creates an identity transform (no translation, no rotation).
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: Vec2::RIGHT,
        }
    }

    /// Applies the transform (rotation then translation) to a point.
    pub fn apply(self, point: Vec2) -> Vec2 {
        self.position + point.rotate_by(self.rotation)
    }

    /// Rotates a direction without translating it.
    pub fn apply_vector(self, vector: Vec2) -> Vec2 {
        vector.rotate_by(self.rotation)
    }

    /// Applies the inverse transform (inverse translation then inverse rotation) to a point.
    pub fn apply_inverse(self, point: Vec2) -> Vec2 {
        (point - self.position).unrotate_by(self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_transform_identity() {
        let t = Transform::identity();
        let p = Vec2::new(5.0, -3.0);
        let tp = t.apply(p);
        assert!((tp.x - p.x).abs() < EPSILON);
        assert!((tp.y - p.y).abs() < EPSILON);
        assert_eq!(t, Transform::default());
    }

    #[test]
    fn test_transform_apply_translation() {
        let t = Transform::new(Vec2::new(10.0, 5.0), 0.0);
        let tp = t.apply(Vec2::new(1.0, 2.0));
        assert!((tp.x - 11.0).abs() < EPSILON);
        assert!((tp.y - 7.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_combined() {
        // Rotation of (1,0) -> (0,1), then translation -> (10, 6)
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 2.0);
        let tp = t.apply(Vec2::new(1.0, 0.0));
        assert!((tp.x - 10.0).abs() < EPSILON);
        assert!((tp.y - 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_vector_ignores_translation() {
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 2.0);
        let v = t.apply_vector(Vec2::new(1.0, 0.0));
        assert!(v.x.abs() < EPSILON);
        assert!((v.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_inverse_combined() {
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 4.0);
        let p_local = Vec2::new(1.0, 1.0);
        let p_local_again = t.apply_inverse(t.apply(p_local));
        assert!((p_local_again.x - p_local.x).abs() < EPSILON);
        assert!((p_local_again.y - p_local.y).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_inverse_rotation_90_deg() {
        let t = Transform::new(Vec2::ZERO, PI / 2.0);
        let p_local = t.apply_inverse(Vec2::new(-1.0, 0.0));
        assert!((p_local.x - 0.0).abs() < EPSILON);
        assert!((p_local.y - 1.0).abs() < EPSILON);
    }
}
