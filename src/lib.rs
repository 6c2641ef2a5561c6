//! 2D rigid-body dynamics and narrow-phase collision.
//!
//! Bodies integrate forces into velocities and positions; shapes attached to
//! them cache world-space geometry, and [`collide`] turns a pair of shapes
//! into contact points. Broad-phase pairing and the contact solver are left
//! to the caller.

pub mod math;
pub mod objects;
pub mod constraints;
pub mod integration;
pub mod collision;
pub mod shapes;
pub mod common;
pub mod config;
pub mod error;

// Re-export key types for easier use
pub use math::{Transform, Vec2};
pub use objects::rigid_body::{BodyId, RigidBody};
pub use shapes::{Circle, Polygon, Segment, Shape, ShapeKind, ShapeType};
pub use collision::{collide, collide_pairs, Contact, AABB};
pub use constraints::{apply_damped_spring, DampedSpring};
pub use common::Material;
pub use config::StepConfig;
pub use error::{PhysicsError, Result};
