use crate::config::StepConfig;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Velocity integration hook: `(body, gravity, damping, dt)`.
pub type VelocityIntegrator = fn(&mut RigidBody, Vec2, f64, f64);

/// Position integration hook: `(body, dt)`. Must leave both bias terms at zero.
pub type PositionIntegrator = fn(&mut RigidBody, f64);

/// Default velocity integrator (explicit Euler with multiplicative damping).
///
/// Damping is applied to the old velocity before the step's acceleration is added.
pub fn euler_velocity(body: &mut RigidBody, gravity: Vec2, damping: f64, dt: f64) {
    let linear_acceleration = gravity + body.force * body.inv_mass();
    body.velocity = body.velocity * damping + linear_acceleration * dt;

    let angular_acceleration = body.torque * body.inv_moment();
    body.angular_velocity = body.angular_velocity * damping + angular_acceleration * dt;
}

/// Default position integrator.
///
/// The angle advances by `angular_velocity * angular_velocity_bias * dt`: the
/// bias multiplies the angular velocity instead of being added to it, so a
/// body without an angular bias keeps its angle. Install
/// [`additive_bias_position`] for `(w + w_bias) * dt`.
pub fn euler_position(body: &mut RigidBody, dt: f64) {
    body.position += (body.velocity + body.velocity_bias) * dt;
    let angle = body.angle() + body.angular_velocity * body.angular_velocity_bias * dt;
    body.set_angle(angle);

    body.velocity_bias = Vec2::ZERO;
    body.angular_velocity_bias = 0.0;
}

/// Position integrator that adds the angular bias to the angular velocity.
pub fn additive_bias_position(body: &mut RigidBody, dt: f64) {
    body.position += (body.velocity + body.velocity_bias) * dt;
    let angle = body.angle() + (body.angular_velocity + body.angular_velocity_bias) * dt;
    body.set_angle(angle);

    body.velocity_bias = Vec2::ZERO;
    body.angular_velocity_bias = 0.0;
}

/// Clears force and torque on every body (step phase 1).
pub fn reset_forces(bodies: &mut [RigidBody]) {
    #[cfg(feature = "parallel")]
    bodies.par_iter_mut().for_each(RigidBody::reset_forces);
    #[cfg(not(feature = "parallel"))]
    bodies.iter_mut().for_each(RigidBody::reset_forces);
}

/// Runs every body's velocity integrator with the configured gravity,
/// damping and timestep (step phase 3).
///
/// `config` must pass [`StepConfig::validate`]; the caller checks it once
/// when loading it. Debug builds assert this.
pub fn integrate_velocities(bodies: &mut [RigidBody], config: &StepConfig) {
    debug_assert!(config.validate().is_ok(), "invalid step config: {config:?}");
    let StepConfig { gravity, damping, timestep } = *config;
    #[cfg(feature = "parallel")]
    bodies
        .par_iter_mut()
        .for_each(|body| body.update_velocity(gravity, damping, timestep));
    #[cfg(not(feature = "parallel"))]
    bodies
        .iter_mut()
        .for_each(|body| body.update_velocity(gravity, damping, timestep));
}

/// Runs every body's position integrator (step phase 7).
pub fn integrate_positions(bodies: &mut [RigidBody], dt: f64) {
    #[cfg(feature = "parallel")]
    bodies.par_iter_mut().for_each(|body| body.update_position(dt));
    #[cfg(not(feature = "parallel"))]
    bodies.iter_mut().for_each(|body| body.update_position(dt));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_update_velocity_is_noop_without_inputs() {
        let mut rb = RigidBody::new(1.0, 1.0);
        rb.velocity = Vec2::new(10.0, -5.0);
        rb.angular_velocity = 2.0;
        rb.update_velocity(Vec2::ZERO, 1.0, 0.1);
        assert_eq!(rb.velocity, Vec2::new(10.0, -5.0));
        assert_eq!(rb.angular_velocity, 2.0);
    }

    #[test]
    fn test_update_position_advances_by_velocity() {
        let mut rb = RigidBody::new(1.0, 1.0);
        rb.velocity = Vec2::new(10.0, -5.0);
        rb.update_velocity(Vec2::ZERO, 1.0, 0.1);
        rb.update_position(0.1);
        assert_eq!(rb.position, Vec2::ZERO + Vec2::new(10.0, -5.0) * 0.1);
    }

    #[test]
    fn test_update_velocity_constant_force() {
        let mut rb = RigidBody::new(2.0, 1.0);
        rb.apply_force(Vec2::new(10.0, 0.0), Vec2::ZERO);
        rb.update_velocity(Vec2::ZERO, 1.0, 0.1);
        // a = F/m = (5, 0); v = a*dt
        assert_abs_diff_eq!(rb.velocity, Vec2::new(0.5, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_update_velocity_gravity_and_damping() {
        let mut rb = RigidBody::new(1.0, 1.0);
        rb.velocity = Vec2::new(4.0, 0.0);
        rb.angular_velocity = 2.0;
        rb.torque = 3.0;
        rb.update_velocity(Vec2::new(0.0, -10.0), 0.5, 0.1);
        // v*damping + g*dt
        assert_abs_diff_eq!(rb.velocity, Vec2::new(2.0, -1.0), epsilon = EPSILON);
        // w*damping + t*inv_i*dt
        assert!((rb.angular_velocity - 1.3).abs() < EPSILON);
    }

    #[test]
    fn test_update_velocity_static_body_ignores_force() {
        let mut rb = RigidBody::new(f64::INFINITY, f64::INFINITY);
        rb.apply_force(Vec2::new(100.0, 0.0), Vec2::new(0.0, 1.0));
        rb.update_velocity(Vec2::ZERO, 1.0, 0.1);
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert_eq!(rb.angular_velocity, 0.0);
    }

    #[test]
    fn test_update_position_consumes_bias() {
        let mut rb = RigidBody::new(1.0, 1.0);
        rb.velocity = Vec2::new(1.0, 0.0);
        rb.velocity_bias = Vec2::new(0.0, 2.0);
        rb.angular_velocity_bias = 3.0;
        rb.update_position(0.5);
        assert_abs_diff_eq!(rb.position, Vec2::new(0.5, 1.0), epsilon = EPSILON);
        assert_eq!(rb.velocity_bias, Vec2::ZERO);
        assert_eq!(rb.angular_velocity_bias, 0.0);
    }

    #[test]
    fn test_euler_position_angle_multiplies_bias() {
        // Pinned: angle += w * w_bias * dt, not (w + w_bias) * dt.
        let mut rb = RigidBody::new(1.0, 1.0);
        rb.angular_velocity = 2.0;
        rb.angular_velocity_bias = 3.0;
        rb.update_position(0.1);
        assert!((rb.angle() - 0.6).abs() < EPSILON);

        // Without bias the angle does not move.
        rb.angular_velocity = 5.0;
        rb.update_position(0.1);
        assert!((rb.angle() - 0.6).abs() < EPSILON);
        assert_abs_diff_eq!(rb.rotation(), Vec2::for_angle(0.6), epsilon = EPSILON);
    }

    #[test]
    fn test_additive_bias_position() {
        let mut rb = RigidBody::new(1.0, 1.0);
        rb.position_integrator = additive_bias_position;
        rb.angular_velocity = 2.0;
        rb.angular_velocity_bias = 3.0;
        rb.update_position(0.1);
        assert!((rb.angle() - 0.5).abs() < EPSILON);
        assert_eq!(rb.angular_velocity_bias, 0.0);
    }

    #[test]
    fn test_batch_phases() {
        let mut bodies: Vec<RigidBody> = (0..8).map(|_| RigidBody::new(1.0, 1.0)).collect();
        for body in &mut bodies {
            body.apply_force(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        }
        let config = StepConfig::default().with_gravity(0.0, -10.0).with_timestep(0.1);

        integrate_velocities(&mut bodies, &config);
        reset_forces(&mut bodies);
        integrate_positions(&mut bodies, config.timestep);

        for body in &bodies {
            assert_abs_diff_eq!(body.velocity, Vec2::new(0.1, -1.0), epsilon = EPSILON);
            assert_abs_diff_eq!(body.position, Vec2::new(0.01, -0.1), epsilon = EPSILON);
            assert_eq!(body.force, Vec2::ZERO);
            assert_eq!(body.torque, 0.0);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid step config")]
    fn test_integrate_velocities_rejects_invalid_config() {
        let mut bodies = vec![RigidBody::new(1.0, 1.0)];
        let config = StepConfig::default().with_damping(1.5);
        integrate_velocities(&mut bodies, &config);
    }
}
