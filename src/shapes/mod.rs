pub mod circle;
pub mod line_segment;
pub mod polygon;

pub use circle::{moment_for_circle, Circle};
pub use line_segment::{moment_for_segment, Segment};
pub use polygon::{moment_for_polygon, Axis, Polygon};

use crate::collision::aabb::AABB;
use crate::common::Material;
use crate::error::Result;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::{BodyId, RigidBody};

/// Kind tag of a shape, used to index the collision dispatch matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeType {
    Circle = 0,
    Segment = 1,
    Polygon = 2,
}

impl ShapeType {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Enum representing the geometry of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Circle(Circle),
    Segment(Segment),
    Polygon(Polygon),
}

impl ShapeKind {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Circle(_) => ShapeType::Circle,
            ShapeKind::Segment(_) => ShapeType::Segment,
            ShapeKind::Polygon(_) => ShapeType::Polygon,
        }
    }
}

/// Collision geometry attached to one body.
///
/// The shape refers to its body by [`BodyId`] only; the caller keeps the body
/// alive and calls [`Shape::update`] after moving it. Collision routines read
/// nothing but the world-space data cached by the last update.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    body: BodyId,
    kind: ShapeKind,
    bb: AABB,
    pub material: Material,
}

impl Shape {
    pub fn circle(body: &RigidBody, radius: f64, offset: Vec2) -> Self {
        Self::attach(body, ShapeKind::Circle(Circle::new(radius, offset)))
    }

    pub fn segment(body: &RigidBody, a: Vec2, b: Vec2, radius: f64) -> Self {
        Self::attach(body, ShapeKind::Segment(Segment::new(a, b, radius)))
    }

    /// Fails with `InvalidGeometry` for a malformed outline, see [`Polygon::new`].
    pub fn polygon(body: &RigidBody, vertices: &[Vec2], offset: Vec2) -> Result<Self> {
        Ok(Self::attach(body, ShapeKind::Polygon(Polygon::new(vertices, offset)?)))
    }

    fn attach(body: &RigidBody, kind: ShapeKind) -> Self {
        let mut shape = Shape {
            body: body.id(),
            kind,
            bb: AABB::new(Vec2::ZERO, Vec2::ZERO),
            material: Material::default(),
        };
        shape.update(body);
        shape
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    /// World-space bounds as of the last update.
    pub fn bounding_box(&self) -> AABB {
        self.bb
    }

    /// Recomputes the world-space geometry and bounding box from `body`.
    pub fn update(&mut self, body: &RigidBody) {
        debug_assert_eq!(body.id(), self.body, "shape updated from a body it is not attached to");
        let transform = body.transform();
        self.bb = match &mut self.kind {
            ShapeKind::Circle(circle) => circle.update(transform),
            ShapeKind::Segment(segment) => segment.update(transform),
            ShapeKind::Polygon(polygon) => polygon.update(transform),
        };
    }

    /// Whether a world point lies within the cached geometry.
    pub fn point_query(&self, point: Vec2) -> bool {
        if !self.bb.contains_point(point) {
            return false;
        }
        match &self.kind {
            ShapeKind::Circle(circle) => circle.contains_point(point),
            ShapeKind::Segment(segment) => segment.contains_point(point),
            ShapeKind::Polygon(polygon) => polygon.contains_point(point),
        }
    }
}
