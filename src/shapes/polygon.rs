use std::f64::consts::TAU;

use crate::collision::aabb::AABB;
use crate::error::{PhysicsError, Result};
use crate::math::{Transform, Vec2};

/// Tolerance on the total turning angle of a valid outline.
const WINDING_TOLERANCE: f64 = 1e-6;

/// A face of a polygon: outward unit normal and distance of the face
/// line from the origin along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub normal: Vec2,
    pub distance: f64,
}

/// Convex polygon with counter-clockwise vertices in body space.
///
/// `axes[i]` is the face from `vertices[i]` to `vertices[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    axes: Vec<Axis>,
    world_vertices: Vec<Vec2>,
    world_axes: Vec<Axis>,
}

impl Polygon {
    /// Creates a polygon from `vertices` shifted by `offset`.
    ///
    /// Fails with [`PhysicsError::InvalidGeometry`] unless the outline has at
    /// least 3 vertices, is wound counter-clockwise, convex and simple.
    pub fn new(vertices: &[Vec2], offset: Vec2) -> Result<Self> {
        let vertices: Vec<Vec2> = vertices.iter().map(|&v| v + offset).collect();
        validate(&vertices)?;

        let axes: Vec<Axis> = (0..vertices.len())
            .map(|i| {
                let a = vertices[i];
                let b = vertices[(i + 1) % vertices.len()];
                let normal = (b - a).rperp().normalize();
                Axis {
                    normal,
                    distance: normal.dot(a),
                }
            })
            .collect();

        Ok(Polygon {
            world_vertices: vertices.clone(),
            world_axes: axes.clone(),
            vertices,
            axes,
        })
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn world_vertices(&self) -> &[Vec2] {
        &self.world_vertices
    }

    pub fn world_axes(&self) -> &[Axis] {
        &self.world_axes
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub(crate) fn update(&mut self, transform: Transform) -> AABB {
        for (world, &local) in self.world_vertices.iter_mut().zip(&self.vertices) {
            *world = transform.apply(local);
        }
        for (world, local) in self.world_axes.iter_mut().zip(&self.axes) {
            let normal = transform.apply_vector(local.normal);
            *world = Axis {
                normal,
                distance: transform.position.dot(normal) + local.distance,
            };
        }

        // Construction guarantees at least 3 vertices.
        AABB::from_points(&self.world_vertices)
            .unwrap_or_else(|| AABB::new(transform.position, transform.position))
    }

    /// World-space endpoints of face `index`.
    pub fn world_edge(&self, index: usize) -> (Vec2, Vec2) {
        let n = self.world_vertices.len();
        (self.world_vertices[index], self.world_vertices[(index + 1) % n])
    }

    /// Smallest `normal . v - distance` over the world vertices: how far the
    /// polygon reaches past the given face line (negative = behind it).
    pub fn value_on_axis(&self, normal: Vec2, distance: f64) -> f64 {
        self.world_vertices
            .iter()
            .map(|v| normal.dot(*v))
            .fold(f64::INFINITY, f64::min)
            - distance
    }

    /// Index of the world face whose normal is most anti-parallel to `normal`.
    pub fn most_anti_parallel_face(&self, normal: Vec2) -> usize {
        let mut best = 0;
        let mut min_dot = f64::INFINITY;
        for (i, axis) in self.world_axes.iter().enumerate() {
            let dot = normal.dot(axis.normal);
            if dot < min_dot {
                min_dot = dot;
                best = i;
            }
        }
        best
    }

    /// Whether a world point lies inside or on the cached outline.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.world_axes
            .iter()
            .all(|axis| axis.normal.dot(point) - axis.distance <= 0.0)
    }

    /// Calculates the area of the polygon using the Shoelace formula.
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let mut area = 0.0;
        for i in 0..n {
            area += self.vertices[i].cross(self.vertices[(i + 1) % n]);
        }
        area / 2.0
    }

    /// Calculates the centroid (center of mass for uniform density) of the polygon.
    pub fn centroid(&self) -> Vec2 {
        let origin = self.vertices[0];
        let mut centroid = Vec2::ZERO;
        let mut signed_area_sum = 0.0;

        for i in 1..(self.vertices.len() - 1) {
            let v2 = self.vertices[i];
            let v3 = self.vertices[i + 1];
            let triangle_signed_area = (v2 - origin).cross(v3 - origin) / 2.0;
            signed_area_sum += triangle_signed_area;
            centroid += (origin + v2 + v3) / 3.0 * triangle_signed_area;
        }

        centroid / signed_area_sum
    }
}

fn validate(vertices: &[Vec2]) -> Result<()> {
    let n = vertices.len();
    if n < 3 {
        return Err(reject(format!("polygon needs at least 3 vertices, got {n}")));
    }
    if let Some(i) = vertices.iter().position(|v| !v.x.is_finite() || !v.y.is_finite()) {
        return Err(reject(format!("vertex {i} is not finite")));
    }

    let mut total_turn = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        let edge = b - a;
        let next_edge = c - b;

        if edge.magnitude_squared() == 0.0 {
            return Err(reject(format!("vertices {i} and {} coincide", (i + 1) % n)));
        }
        let turn = edge.cross(next_edge);
        if turn < 0.0 {
            return Err(reject(format!(
                "vertex {} turns clockwise; outline must be convex and counter-clockwise",
                (i + 1) % n
            )));
        }
        total_turn += turn.atan2(edge.dot(next_edge));
    }

    let doubled_area: f64 = (0..n).map(|i| vertices[i].cross(vertices[(i + 1) % n])).sum();
    if doubled_area <= 0.0 {
        return Err(reject("outline encloses no area".to_string()));
    }

    // A simple convex outline turns exactly once; a star winds more than once.
    if (total_turn - TAU).abs() > WINDING_TOLERANCE {
        return Err(reject(format!(
            "outline turns {total_turn:.6} radians instead of 2pi (self-intersecting or degenerate)"
        )));
    }
    Ok(())
}

fn reject(reason: String) -> PhysicsError {
    log::debug!("rejecting polygon: {reason}");
    PhysicsError::InvalidGeometry(reason)
}

/// Moment of inertia of a solid polygon (vertices shifted by `offset`) about
/// the body origin. Vertices must be wound counter-clockwise.
pub fn moment_for_polygon(mass: f64, vertices: &[Vec2], offset: Vec2) -> f64 {
    let n = vertices.len();
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..n {
        let v1 = vertices[i] + offset;
        let v2 = vertices[(i + 1) % n] + offset;
        let cross = v1.cross(v2);
        numerator += cross * (v1.dot(v1) + v1.dot(v2) + v2.dot(v2));
        denominator += cross;
    }
    mass * numerator / (6.0 * denominator)
}
