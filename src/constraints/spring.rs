use serde::{Deserialize, Serialize};

use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Applies the force of a damped spring joining `anchor_a` on `a` to
/// `anchor_b` on `b`. Anchors are in body space.
///
/// The spring pulls the anchors towards `rest_length` apart with force
/// `stiffness * (length - rest_length)`. Damping acts on the relative anchor
/// velocity along the spring and is clamped to `1 / (dt * (inv_mass_a + inv_mass_b))`
/// so a stiff damper cannot reverse the motion within one step. Coincident
/// anchors have no direction and produce no force.
#[allow(clippy::too_many_arguments)]
pub fn apply_damped_spring(
    a: &mut RigidBody,
    b: &mut RigidBody,
    anchor_a: Vec2,
    anchor_b: Vec2,
    rest_length: f64,
    stiffness: f64,
    damping: f64,
    dt: f64,
) {
    let r1 = anchor_a.rotate_by(a.rotation());
    let r2 = anchor_b.rotate_by(b.rotation());

    let delta = (b.position + r2) - (a.position + r1);
    let length = delta.magnitude();
    let n = delta.normalize();

    let f_spring = (length - rest_length) * stiffness;

    let v1 = a.velocity + r1.perpendicular() * a.angular_velocity;
    let v2 = b.velocity + r2.perpendicular() * b.angular_velocity;
    let vrn = (v2 - v1).dot(n);
    let f_damp = vrn * damping.min(1.0 / (dt * (a.inv_mass() + b.inv_mass())));

    let f = n * (f_spring + f_damp);
    a.apply_force(f, r1);
    b.apply_force(-f, r2);
}

/// Spring parameters between two bodies of a slice, applied once per step
/// before velocity integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DampedSpring {
    /// Index of the first rigid body.
    pub body_a_idx: usize,
    /// Index of the second rigid body.
    pub body_b_idx: usize,
    /// Anchor point on body A, in local coordinates.
    pub anchor_a: Vec2,
    /// Anchor point on body B, in local coordinates.
    pub anchor_b: Vec2,
    pub rest_length: f64,
    pub stiffness: f64,
    pub damping: f64,
}

impl DampedSpring {
    pub fn new(body_a_idx: usize, body_b_idx: usize, anchor_a: Vec2, anchor_b: Vec2, rest_length: f64) -> Self {
        assert!(rest_length >= 0.0, "Rest length cannot be negative");
        Self {
            body_a_idx,
            body_b_idx,
            anchor_a,
            anchor_b,
            rest_length,
            stiffness: 0.0,
            damping: 0.0,
        }
    }

    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Adds the spring force to the two bodies' accumulators.
    pub fn apply(&self, bodies: &mut [RigidBody], dt: f64) {
        let Some((a, b)) = super::get_mutable_body_pair(bodies, self.body_a_idx, self.body_b_idx) else {
            log::warn!(
                "Invalid body pair ({}, {}) in DampedSpring",
                self.body_a_idx,
                self.body_b_idx
            );
            return;
        };
        apply_damped_spring(
            a,
            b,
            self.anchor_a,
            self.anchor_b,
            self.rest_length,
            self.stiffness,
            self.damping,
            dt,
        );
    }
}
