pub mod integrator;

pub use integrator::{
    additive_bias_position, euler_position, euler_velocity, integrate_positions,
    integrate_velocities, reset_forces, PositionIntegrator, VelocityIntegrator,
};
