use crate::collision::aabb::AABB;
use crate::math::{Transform, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center offset in body space.
    pub center: Vec2,
    pub radius: f64,
    world_center: Vec2,
}

impl Circle {
    pub fn new(radius: f64, center: Vec2) -> Self {
        assert!(radius >= 0.0, "Circle radius cannot be negative");
        Self {
            center,
            radius,
            world_center: center,
        }
    }

    /// Center in world space as of the last [`Circle::update`].
    pub fn world_center(&self) -> Vec2 {
        self.world_center
    }

    pub(crate) fn update(&mut self, transform: Transform) -> AABB {
        self.world_center = transform.apply(self.center);
        let r = Vec2::new(self.radius, self.radius);
        AABB::new(self.world_center - r, self.world_center + r)
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.world_center.distance_squared(point) <= self.radius * self.radius
    }
}

/// Moment of inertia of a ring (a disc when `inner_radius` is 0) whose
/// center sits at `offset` from the body origin.
pub fn moment_for_circle(mass: f64, inner_radius: f64, outer_radius: f64, offset: Vec2) -> f64 {
    let radii = inner_radius * inner_radius + outer_radius * outer_radius;
    mass * (0.5 * radii + offset.magnitude_squared())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_circle_new() {
        let c = Circle::new(5.0, Vec2::new(1.0, 0.0));
        assert_eq!(c.radius, 5.0);
        assert_eq!(c.world_center(), Vec2::new(1.0, 0.0));
    }

    #[test]
    #[should_panic]
    fn test_circle_new_negative_radius() {
        Circle::new(-1.0, Vec2::ZERO);
    }

    #[test]
    fn test_circle_update() {
        let mut c = Circle::new(1.0, Vec2::new(1.0, 0.0));
        let bb = c.update(Transform::new(Vec2::new(2.0, 2.0), PI / 2.0));
        assert!((c.world_center().x - 2.0).abs() < EPSILON);
        assert!((c.world_center().y - 3.0).abs() < EPSILON);
        assert!((bb.min.x - 1.0).abs() < EPSILON);
        assert!((bb.max.y - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_contains_point() {
        let c = Circle::new(1.0, Vec2::ZERO);
        assert!(c.contains_point(Vec2::new(0.5, 0.5)));
        assert!(!c.contains_point(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_moment_for_circle() {
        // Solid disc: I = m r^2 / 2
        assert!((moment_for_circle(10.0, 0.0, 2.0, Vec2::ZERO) - 20.0).abs() < EPSILON);
        // Parallel axis theorem
        assert!((moment_for_circle(2.0, 0.0, 1.0, Vec2::new(3.0, 0.0)) - 19.0).abs() < EPSILON);
    }
}
