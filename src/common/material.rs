//! Defines per-shape surface properties.

use crate::math::vec2::Vec2;

/// Surface properties of a shape, carried for the external contact solver.
/// The collision routines never read them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub elasticity: f64,
    /// Coulomb friction coefficient. Range [0, infinity).
    pub friction: f64,
    /// Tangential velocity of the surface itself, e.g. a conveyor belt.
    pub surface_velocity: Vec2,
}

impl Material {
    /// Creates a new material with the given elasticity and friction.
    pub fn new(elasticity: f64, friction: f64) -> Self {
        Material {
            elasticity: elasticity.clamp(0.0, 1.0),
            friction: friction.max(0.0),
            surface_velocity: Vec2::ZERO,
        }
    }

    pub fn with_surface_velocity(mut self, surface_velocity: Vec2) -> Self {
        self.surface_velocity = surface_velocity;
        self
    }
}

impl Default for Material {
    /// Fully inelastic, frictionless, stationary surface.
    fn default() -> Self {
        Material {
            elasticity: 0.0,
            friction: 0.0,
            surface_velocity: Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_clamps() {
        let m = Material::new(1.5, -2.0);
        assert_eq!(m.elasticity, 1.0);
        assert_eq!(m.friction, 0.0);
    }

    #[test]
    fn test_material_surface_velocity() {
        let m = Material::new(0.2, 0.7).with_surface_velocity(Vec2::new(3.0, 0.0));
        assert_eq!(m.surface_velocity, Vec2::new(3.0, 0.0));
        assert_eq!(m.friction, 0.7);
    }
}
