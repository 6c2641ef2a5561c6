use crate::collision::aabb::AABB;
use crate::math::{Transform, Vec2};

/// A segment from `a` to `b` thickened by `radius` (a capsule).
///
/// Endpoints are fixed at construction so the normal always matches them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    a: Vec2,
    b: Vec2,
    pub radius: f64,
    normal: Vec2,
    world_a: Vec2,
    world_b: Vec2,
    world_normal: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2, radius: f64) -> Self {
        assert!(radius >= 0.0, "Segment radius cannot be negative");
        let normal = (b - a).normalize().perpendicular();
        Self {
            a,
            b,
            radius,
            normal,
            world_a: a,
            world_b: b,
            world_normal: normal,
        }
    }

    /// First endpoint in body space.
    pub fn a(&self) -> Vec2 {
        self.a
    }

    /// Second endpoint in body space.
    pub fn b(&self) -> Vec2 {
        self.b
    }

    /// Unit normal, counter-clockwise from `a -> b`. Zero for a degenerate segment.
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    pub fn world_a(&self) -> Vec2 {
        self.world_a
    }

    pub fn world_b(&self) -> Vec2 {
        self.world_b
    }

    pub fn world_normal(&self) -> Vec2 {
        self.world_normal
    }

    pub(crate) fn update(&mut self, transform: Transform) -> AABB {
        self.world_a = transform.apply(self.a);
        self.world_b = transform.apply(self.b);
        self.world_normal = transform.apply_vector(self.normal);

        let r = Vec2::new(self.radius, self.radius);
        AABB::new(
            Vec2::new(self.world_a.x.min(self.world_b.x), self.world_a.y.min(self.world_b.y)) - r,
            Vec2::new(self.world_a.x.max(self.world_b.x), self.world_a.y.max(self.world_b.y)) + r,
        )
    }

    /// Closest point to `point` on the world-space segment.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        closest_point_on_segment(self.world_a, self.world_b, point)
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.closest_point(point).distance_squared(point) <= self.radius * self.radius
    }
}

/// Finds the point on segment `a -> b` closest to `point`.
fn closest_point_on_segment(a: Vec2, b: Vec2, point: Vec2) -> Vec2 {
    let segment_vec = b - a;
    let length_sq = segment_vec.magnitude_squared();
    if length_sq == 0.0 {
        return a;
    }
    let t = ((point - a).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
    a + segment_vec * t
}

/// Moment of inertia of a thin rod from `a` to `b` about the body origin.
pub fn moment_for_segment(mass: f64, a: Vec2, b: Vec2) -> f64 {
    let length_sq = a.distance_squared(b);
    let offset = (a + b) * 0.5;
    mass * (length_sq / 12.0 + offset.magnitude_squared())
}
