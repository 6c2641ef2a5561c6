pub mod rigid_body;

pub use rigid_body::{BodyId, RigidBody};
