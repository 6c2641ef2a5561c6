//! Step configuration

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};
use crate::math::Vec2;

/// Global parameters fed to velocity integration every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Gravity acceleration (default: -9.81 in Y)
    pub gravity: Vec2,

    /// Per-step multiplicative velocity decay in `[0, 1]`; 1 disables damping.
    pub damping: f64,

    /// Fixed timestep in seconds
    pub timestep: f64,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            damping: 1.0,
            timestep: 1.0 / 60.0,
        }
    }
}

impl StepConfig {
    /// Configuration without gravity or damping
    pub fn weightless() -> Self {
        Self {
            gravity: Vec2::ZERO,
            ..Default::default()
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, x: f64, y: f64) -> Self {
        self.gravity = Vec2::new(x, y);
        self
    }

    /// Set damping
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set timestep
    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    /// Checks that damping lies in `[0, 1]` and the timestep is finite and positive.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.damping) {
            log::debug!("rejecting step config: damping {}", self.damping);
            return Err(PhysicsError::InvalidConfig(format!(
                "damping must be within [0, 1], got {}",
                self.damping
            )));
        }
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            log::debug!("rejecting step config: timestep {}", self.timestep);
            return Err(PhysicsError::InvalidConfig(format!(
                "timestep must be finite and positive, got {}",
                self.timestep
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = StepConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gravity, Vec2::new(0.0, -9.81));
        assert_eq!(config.damping, 1.0);
    }

    #[test]
    fn test_builders() {
        let config = StepConfig::weightless()
            .with_damping(0.9)
            .with_timestep(0.01)
            .with_gravity(1.0, 2.0);
        assert_eq!(config.gravity, Vec2::new(1.0, 2.0));
        assert_eq!(config.damping, 0.9);
        assert_eq!(config.timestep, 0.01);
    }

    #[test]
    fn test_validate_rejects_bad_damping() {
        let err = StepConfig::default().with_damping(1.5).validate().unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidConfig(_)));
        assert!(StepConfig::default().with_damping(-0.1).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_timestep() {
        assert!(StepConfig::default().with_timestep(0.0).validate().is_err());
        assert!(StepConfig::default().with_timestep(f64::NAN).validate().is_err());
        assert!(StepConfig::default().with_timestep(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let config: StepConfig = serde_json::from_str(r#"{ "damping": 0.5 }"#).unwrap();
        assert_eq!(config.damping, 0.5);
        assert_eq!(config.timestep, StepConfig::default().timestep);
        assert_eq!(config.gravity, StepConfig::default().gravity);
    }

    #[test]
    fn test_serialize_field_names() {
        let json = serde_json::to_value(StepConfig::weightless()).unwrap();
        assert_eq!(json["gravity"]["x"], 0.0);
        assert_eq!(json["damping"], 1.0);
    }
}
