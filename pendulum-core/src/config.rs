use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    acceleration::meter_per_second_squared,
    angle::degree,
    angular_velocity::degree_per_second,
    f64::{Acceleration, Angle, AngularVelocity, Ratio},
    frequency::hertz,
    ratio::ratio,
};

use crate::{
    control::{ControlSteps, Controls},
    integrator::VelocityVerlet,
    pendulum::{Damping, GeometryError, Pendulum, PendulumState, Point},
    simulation::Simulation,
};

/// Declarative simulation setup, loadable from TOML.
///
/// All quantities are plain numbers: positions in meters, angles in
/// degrees, speeds in degrees per second, damping in 1/s. The defaults
/// reproduce the reference scene: a 300 m rod hanging from (500, 100),
/// released from 60°.
///
/// ```toml
/// pivot = [500.0, 100.0]
/// bob = [500.0, 400.0]
/// initial_angle_degrees = 45.0
/// time_scale = 0.015
///
/// [steps]
/// damping_per_second = 0.1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub pivot: [f64; 2],
    pub bob: [f64; 2],
    pub initial_angle_degrees: f64,
    pub initial_speed_degrees: f64,
    pub time_scale: f64,
    pub damping_per_second: f64,
    pub gravity: f64,
    pub steps: StepsConfig,
}

/// Adjustment applied per control event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepsConfig {
    pub angle_degrees: f64,
    pub speed_degrees: f64,
    pub scale: f64,
    pub damping_per_second: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            pivot: [500.0, 100.0],
            bob: [500.0, 400.0],
            initial_angle_degrees: 60.0,
            initial_speed_degrees: 0.0,
            time_scale: 0.015,
            damping_per_second: 0.0,
            gravity: 9.81,
            steps: StepsConfig::default(),
        }
    }
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            angle_degrees: 5.0,
            speed_degrees: 5.0,
            scale: 0.005,
            damping_per_second: 0.05,
        }
    }
}

impl From<StepsConfig> for ControlSteps {
    fn from(config: StepsConfig) -> Self {
        Self {
            angle: Angle::new::<degree>(config.angle_degrees),
            speed: AngularVelocity::new::<degree_per_second>(config.speed_degrees),
            scale: Ratio::new::<ratio>(config.scale),
            damping: Damping::new::<hertz>(config.damping_per_second),
        }
    }
}

/// Error returned when a simulation cannot be built from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse simulation config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl SimulationConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed or unknown fields.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Builds a ready-to-run simulation with the velocity-Verlet scheme.
    ///
    /// The staged control presets start equal to the initial conditions,
    /// so the first reset returns the pendulum to this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] if the pivot and bob coincide.
    pub fn build(&self) -> Result<Simulation, ConfigError> {
        let pendulum = Pendulum::new(
            Point::from_si(self.pivot[0], self.pivot[1]),
            Point::from_si(self.bob[0], self.bob[1]),
            Acceleration::new::<meter_per_second_squared>(self.gravity),
            Damping::new::<hertz>(self.damping_per_second),
        )?;

        let staged_angle = Angle::new::<degree>(self.initial_angle_degrees);
        let staged_speed = AngularVelocity::new::<degree_per_second>(self.initial_speed_degrees);
        let state = PendulumState::released_from(staged_angle, staged_speed);
        let controls = Controls::new(
            staged_angle,
            staged_speed,
            Ratio::new::<ratio>(self.time_scale),
            self.steps.into(),
        );

        Ok(Simulation::new(pendulum, state, controls, VelocityVerlet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::meter;

    #[test]
    fn default_config_builds_the_reference_scene() {
        let sim = SimulationConfig::default().build().unwrap();

        assert_relative_eq!(sim.pendulum().length().get::<meter>(), 300.0);
        assert_relative_eq!(sim.state().angle.get::<degree>(), 60.0, max_relative = 1e-12);
        assert_relative_eq!(sim.frame().readout.time_scale, 0.015);
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let config = SimulationConfig::from_toml_str(
            r#"
            initial_angle_degrees = 45.0
            damping_per_second = 0.2

            [steps]
            damping_per_second = 0.1
            "#,
        )
        .unwrap();

        assert_relative_eq!(config.initial_angle_degrees, 45.0);
        assert_relative_eq!(config.damping_per_second, 0.2);
        assert_relative_eq!(config.steps.damping_per_second, 0.1);
        // Untouched fields keep their defaults.
        assert_eq!(config.pivot, [500.0, 100.0]);
        assert_relative_eq!(config.time_scale, 0.015);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = SimulationConfig::from_toml_str("pendulum_count = 2");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn coincident_pivot_and_bob_fails_to_build() {
        let config = SimulationConfig {
            bob: [500.0, 100.0],
            ..SimulationConfig::default()
        };

        assert!(matches!(config.build(), Err(ConfigError::Geometry(_))));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = SimulationConfig {
            initial_angle_degrees: 30.0,
            time_scale: 0.02,
            ..SimulationConfig::default()
        };

        let text = toml::to_string(&config).unwrap();
        let parsed = SimulationConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
