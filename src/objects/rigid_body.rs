use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::integration::integrator::{self, PositionIntegrator, VelocityIntegrator};
use crate::math::{Transform, Vec2};

static NEXT_BODY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a body. Shapes use it to name their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

impl BodyId {
    fn next() -> Self {
        BodyId(NEXT_BODY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Mass properties and motion state of one rigid body.
///
/// Mass, moment and angle are private: their setters recompute the cached
/// inverses and rotation vector so those are never stale. Motion state is
/// plain public data for the surrounding simulation loop.
///
/// Cloning keeps the [`BodyId`], so shapes attached to the original also
/// accept the clone.
#[derive(Clone)]
pub struct RigidBody {
    id: BodyId,

    // Physical properties
    mass: f64,
    inv_mass: f64,
    moment: f64,
    inv_moment: f64,

    // Linear state
    pub position: Vec2,
    pub velocity: Vec2,
    pub force: Vec2,

    // Angular state
    angle: f64,
    rotation: Vec2,
    pub angular_velocity: f64,
    pub torque: f64,

    // Written by a constraint solver, consumed by position integration.
    pub velocity_bias: Vec2,
    pub angular_velocity_bias: f64,

    pub velocity_integrator: VelocityIntegrator,
    pub position_integrator: PositionIntegrator,

    pub user_data: Option<Arc<dyn Any + Send + Sync>>,
}

impl RigidBody {
    /// Creates a body at the origin with the given mass and moment of inertia.
    ///
    /// `f64::INFINITY` is accepted for either and gives a zero inverse.
    /// Panics if either is not strictly positive.
    pub fn new(mass: f64, moment: f64) -> Self {
        let mut body = Self {
            id: BodyId::next(),
            mass: 0.0,
            inv_mass: 0.0,
            moment: 0.0,
            inv_moment: 0.0,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            angle: 0.0,
            rotation: Vec2::RIGHT,
            angular_velocity: 0.0,
            torque: 0.0,
            velocity_bias: Vec2::ZERO,
            angular_velocity_bias: 0.0,
            velocity_integrator: integrator::euler_velocity,
            position_integrator: integrator::euler_position,
            user_data: None,
        };
        body.set_mass(mass);
        body.set_moment(moment);
        body
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn moment(&self) -> f64 {
        self.moment
    }

    pub fn inv_moment(&self) -> f64 {
        self.inv_moment
    }

    /// Angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Unit vector at [`RigidBody::angle`].
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    /// The body frame: position plus rotation.
    pub fn transform(&self) -> Transform {
        Transform::from_rotation(self.position, self.rotation)
    }

    pub fn set_mass(&mut self, mass: f64) {
        assert!(mass > 0.0, "Body mass must be positive, got {mass}");
        self.mass = mass;
        self.inv_mass = 1.0 / mass;
    }

    pub fn set_moment(&mut self, moment: f64) {
        assert!(moment > 0.0, "Body moment of inertia must be positive, got {moment}");
        self.moment = moment;
        self.inv_moment = 1.0 / moment;
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.rotation = Vec2::for_angle(angle);
    }

    /// Downcasts the user data, if any was attached and it has type `T`.
    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_deref().and_then(|data| data.downcast_ref::<T>())
    }

    pub fn set_user_data<T: Any + Send + Sync>(&mut self, data: T) {
        self.user_data = Some(Arc::new(data));
    }

    /// Runs this body's velocity integrator.
    /// Call once per step, before constraint solving.
    pub fn update_velocity(&mut self, gravity: Vec2, damping: f64, dt: f64) {
        (self.velocity_integrator)(self, gravity, damping, dt);
    }

    /// Runs this body's position integrator, which also clears the bias terms.
    pub fn update_position(&mut self, dt: f64) {
        (self.position_integrator)(self, dt);
    }

    /// Converts a body-space point to world space.
    pub fn local_to_world(&self, point: Vec2) -> Vec2 {
        self.transform().apply(point)
    }

    /// Converts a world-space point to body space.
    pub fn world_to_local(&self, point: Vec2) -> Vec2 {
        self.transform().apply_inverse(point)
    }

    /// Applies an instantaneous impulse at `r`, an offset from the body's
    /// position in world orientation.
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += self.inv_moment * r.cross(impulse);
    }

    /// Like [`RigidBody::apply_impulse`] but on the bias velocities, for
    /// positional correction inside a solver.
    pub fn apply_bias_impulse(&mut self, impulse: Vec2, r: Vec2) {
        self.velocity_bias += impulse * self.inv_mass;
        self.angular_velocity_bias += self.inv_moment * r.cross(impulse);
    }

    /// Accumulates a force applied at offset `r` (world orientation).
    pub fn apply_force(&mut self, force: Vec2, r: Vec2) {
        self.force += force;
        self.torque += r.cross(force);
    }

    /// Applies a force at a specific point (in world coordinates).
    pub fn apply_force_at_point(&mut self, force: Vec2, point_world: Vec2) {
        self.apply_force(force, point_world - self.position);
    }

    /// Zeroes the force and torque accumulators.
    pub fn reset_forces(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    /// Sets the velocity that carries the body to `target` over `dt`.
    pub fn slew(&mut self, target: Vec2, dt: f64) {
        self.velocity = (target - self.position) * (1.0 / dt);
    }
}

impl fmt::Debug for RigidBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RigidBody")
            .field("id", &self.id)
            .field("mass", &self.mass)
            .field("moment", &self.moment)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("force", &self.force)
            .field("angle", &self.angle)
            .field("angular_velocity", &self.angular_velocity)
            .field("torque", &self.torque)
            .field("velocity_bias", &self.velocity_bias)
            .field("angular_velocity_bias", &self.angular_velocity_bias)
            .field("has_user_data", &self.user_data.is_some())
            .finish_non_exhaustive()
    }
}
