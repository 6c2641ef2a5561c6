pub mod aabb;
pub mod contact;
pub mod detection;

// Re-export key types
pub use aabb::AABB;
pub use contact::{feature_id, Contact};
pub use detection::circle_to_circle;

use std::cmp::Ordering;

use crate::error::{PhysicsError, Result};
use crate::shapes::{Shape, ShapeKind, ShapeType};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Narrow-phase routine for an ordered pair of shape kinds.
type CollisionFn = fn(&ShapeKind, &ShapeKind) -> Vec<Contact>;

/// Routines indexed by `[first][second]` shape type. Only pairs with
/// `first <= second` are filled in; `collide` swaps the rest.
const DISPATCH: [[Option<CollisionFn>; ShapeType::COUNT]; ShapeType::COUNT] = [
    [
        Some(circle_circle as CollisionFn),
        Some(circle_segment as CollisionFn),
        Some(circle_polygon as CollisionFn),
    ],
    [None, None, Some(segment_polygon as CollisionFn)],
    [None, None, Some(polygon_polygon as CollisionFn)],
];

fn circle_circle(a: &ShapeKind, b: &ShapeKind) -> Vec<Contact> {
    match (a, b) {
        (ShapeKind::Circle(a), ShapeKind::Circle(b)) => detection::circle_circle(a, b),
        _ => Vec::new(),
    }
}

fn circle_segment(a: &ShapeKind, b: &ShapeKind) -> Vec<Contact> {
    match (a, b) {
        (ShapeKind::Circle(a), ShapeKind::Segment(b)) => detection::circle_segment(a, b),
        _ => Vec::new(),
    }
}

fn circle_polygon(a: &ShapeKind, b: &ShapeKind) -> Vec<Contact> {
    match (a, b) {
        (ShapeKind::Circle(a), ShapeKind::Polygon(b)) => detection::circle_polygon(a, b),
        _ => Vec::new(),
    }
}

fn segment_polygon(a: &ShapeKind, b: &ShapeKind) -> Vec<Contact> {
    match (a, b) {
        (ShapeKind::Segment(a), ShapeKind::Polygon(b)) => detection::segment_polygon(a, b),
        _ => Vec::new(),
    }
}

fn polygon_polygon(a: &ShapeKind, b: &ShapeKind) -> Vec<Contact> {
    match (a, b) {
        (ShapeKind::Polygon(a), ShapeKind::Polygon(b)) => detection::polygon_polygon(a, b),
        _ => Vec::new(),
    }
}

/// Computes the contacts between two shapes from their cached world geometry.
///
/// Normals always point from `a` to `b`, whatever order the routine for the
/// pair expects. Swapping the arguments gives the same points with negated
/// normals, including for two shapes of the same kind. An empty vector means
/// the shapes do not touch. Pairs with no routine (segment against segment)
/// fail with `InvalidShapePair`.
///
/// Both shapes must have been refreshed with [`Shape::update`] since their
/// bodies last moved, and must belong to different bodies.
pub fn collide(a: &Shape, b: &Shape) -> Result<Vec<Contact>> {
    debug_assert_ne!(a.body(), b.body(), "shapes on the same body cannot collide");

    let (type_a, type_b) = (a.shape_type(), b.shape_type());
    // Same-kind pairs are ordered by body so ties inside a routine resolve
    // the same way whichever argument comes first.
    let swapped = match type_a.cmp(&type_b) {
        Ordering::Less => false,
        Ordering::Greater => true,
        Ordering::Equal => a.body() > b.body(),
    };
    let (first, second) = if swapped { (b, a) } else { (a, b) };

    let Some(routine) = DISPATCH[first.shape_type().index()][second.shape_type().index()] else {
        log::warn!("No collision routine for {:?} against {:?}", type_a, type_b);
        return Err(PhysicsError::InvalidShapePair(type_a, type_b));
    };

    let mut contacts = routine(first.kind(), second.kind());
    if swapped {
        for contact in &mut contacts {
            *contact = contact.flipped();
        }
    }

    log::trace!("{:?} vs {:?}: {} contact(s)", type_a, type_b, contacts.len());
    Ok(contacts)
}

/// Runs [`collide`] over a batch of candidate pairs, e.g. from a broad phase.
///
/// Results keep the order of `pairs`. The first unsupported pair fails the
/// whole batch.
pub fn collide_pairs(pairs: &[(&Shape, &Shape)]) -> Result<Vec<Vec<Contact>>> {
    #[cfg(feature = "parallel")]
    {
        pairs.par_iter().map(|&(a, b)| collide(a, b)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        pairs.iter().map(|&(a, b)| collide(a, b)).collect()
    }
}
