use num_traits::Zero;
use tracing::debug;
use uom::si::{
    angle::degree,
    angular_velocity::degree_per_second,
    f64::{Angle, AngularVelocity, Ratio},
    frequency::hertz,
    ratio::ratio,
};

use crate::{
    events::InputEvent,
    pendulum::{Damping, Pendulum, PendulumState},
};

/// Smallest allowed time-step scale.
///
/// Repeated decrements clamp here instead of freezing or reversing
/// simulated time.
pub const MIN_TIME_SCALE: f64 = 1e-3;

/// Per-event adjustment magnitudes for the control surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSteps {
    pub angle: Angle,
    pub speed: AngularVelocity,
    pub scale: Ratio,
    pub damping: Damping,
}

impl Default for ControlSteps {
    fn default() -> Self {
        Self {
            angle: Angle::new::<degree>(5.0),
            speed: AngularVelocity::new::<degree_per_second>(5.0),
            scale: Ratio::new::<ratio>(0.005),
            damping: Damping::new::<hertz>(0.05),
        }
    }
}

/// The interactive control surface.
///
/// Staged initial conditions live here, separate from the running
/// [`PendulumState`]; they reach the live state only through
/// [`InputEvent::Reset`]. Damping is the exception: damping events mutate
/// the pendulum directly and take effect on the very next integration
/// step. The staged angle and speed are unbounded; the time scale and
/// damping carry floor clamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    staged_angle: Angle,
    staged_speed: AngularVelocity,
    time_scale: Ratio,
    steps: ControlSteps,
}

impl Controls {
    /// Creates a control surface with the given staged presets.
    ///
    /// A `time_scale` below [`MIN_TIME_SCALE`] is raised to the floor.
    #[must_use]
    pub fn new(
        staged_angle: Angle,
        staged_speed: AngularVelocity,
        time_scale: Ratio,
        steps: ControlSteps,
    ) -> Self {
        Self {
            staged_angle,
            staged_speed,
            time_scale: Self::floored(time_scale),
            steps,
        }
    }

    #[must_use]
    pub fn staged_angle(&self) -> Angle {
        self.staged_angle
    }

    #[must_use]
    pub fn staged_speed(&self) -> AngularVelocity {
        self.staged_speed
    }

    #[must_use]
    pub fn time_scale(&self) -> Ratio {
        self.time_scale
    }

    /// Applies one input event.
    ///
    /// Angle and speed events touch only the staged presets. Scale events
    /// adjust the live time-step multiplier. Damping events adjust the
    /// pendulum's live coefficient, clamped at exactly zero on a decrement
    /// that would cross it. `Reset` commits the staged presets to the live
    /// state. `Quit` is not a control event and is ignored.
    pub fn apply(&mut self, event: InputEvent, pendulum: &mut Pendulum, state: &mut PendulumState) {
        match event {
            InputEvent::IncrementAngle => self.staged_angle += self.steps.angle,
            InputEvent::DecrementAngle => self.staged_angle -= self.steps.angle,
            InputEvent::IncrementSpeed => self.staged_speed += self.steps.speed,
            InputEvent::DecrementSpeed => self.staged_speed -= self.steps.speed,
            InputEvent::IncrementScale => self.adjust_scale(self.steps.scale),
            InputEvent::DecrementScale => self.adjust_scale(-self.steps.scale),
            InputEvent::IncrementDamping => Self::adjust_damping(pendulum, self.steps.damping),
            InputEvent::DecrementDamping => Self::adjust_damping(pendulum, -self.steps.damping),
            InputEvent::Reset => self.reset(state),
            InputEvent::Quit => {}
        }
    }

    fn adjust_scale(&mut self, delta: Ratio) {
        let next = self.time_scale + delta;
        if next < Ratio::new::<ratio>(MIN_TIME_SCALE) {
            debug!(requested = next.get::<ratio>(), "time scale clamped at floor");
        }
        self.time_scale = Self::floored(next);
    }

    fn adjust_damping(pendulum: &mut Pendulum, delta: Damping) {
        let next = pendulum.damping() + delta;
        if next < Damping::zero() {
            debug!(requested = next.get::<hertz>(), "damping clamped at zero");
            pendulum.set_damping(Damping::zero());
        } else {
            pendulum.set_damping(next);
        }
    }

    /// Commits the staged initial conditions to the live state and clears
    /// the acceleration scratch values. Damping, rod length, and pivot are
    /// untouched.
    fn reset(&self, state: &mut PendulumState) {
        debug!(
            angle_degrees = self.staged_angle.get::<degree>(),
            speed_degrees = self.staged_speed.get::<degree_per_second>(),
            "reset to staged initial conditions"
        );
        *state = PendulumState::released_from(self.staged_angle, self.staged_speed);
    }

    fn floored(scale: Ratio) -> Ratio {
        let floor = Ratio::new::<ratio>(MIN_TIME_SCALE);
        if scale < floor { floor } else { scale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        acceleration::meter_per_second_squared, angle::radian,
        f64::{Acceleration, AngularAcceleration}, length::meter,
    };

    use crate::pendulum::Point;

    fn pendulum_with_damping(damping: f64) -> Pendulum {
        Pendulum::new(
            Point::from_si(0.0, 0.0),
            Point::from_si(0.0, 1.0),
            Acceleration::new::<meter_per_second_squared>(9.81),
            Damping::new::<hertz>(damping),
        )
        .unwrap()
    }

    fn controls() -> Controls {
        Controls::new(
            Angle::new::<degree>(45.0),
            AngularVelocity::new::<degree_per_second>(0.0),
            Ratio::new::<ratio>(0.015),
            ControlSteps::default(),
        )
    }

    #[test]
    fn angle_and_speed_edits_stay_staged() {
        let mut pendulum = pendulum_with_damping(0.0);
        let mut state = PendulumState::default();
        let mut controls = controls();

        controls.apply(InputEvent::IncrementAngle, &mut pendulum, &mut state);
        controls.apply(InputEvent::DecrementSpeed, &mut pendulum, &mut state);

        assert_relative_eq!(controls.staged_angle().get::<degree>(), 50.0);
        assert_relative_eq!(controls.staged_speed().get::<degree_per_second>(), -5.0);
        // The live state only changes on reset.
        assert_eq!(state, PendulumState::default());
    }

    #[test]
    fn staged_presets_are_unbounded() {
        let mut pendulum = pendulum_with_damping(0.0);
        let mut state = PendulumState::default();
        let mut controls = controls();

        for _ in 0..200 {
            controls.apply(InputEvent::DecrementAngle, &mut pendulum, &mut state);
        }

        assert_relative_eq!(controls.staged_angle().get::<degree>(), 45.0 - 200.0 * 5.0);
    }

    #[test]
    fn damping_edits_hit_the_pendulum_immediately() {
        let mut pendulum = pendulum_with_damping(0.0);
        let mut state = PendulumState::default();
        let mut controls = controls();

        controls.apply(InputEvent::IncrementDamping, &mut pendulum, &mut state);

        assert_relative_eq!(pendulum.damping().get::<hertz>(), 0.05);
    }

    #[test]
    fn damping_decrement_clamps_at_exactly_zero() {
        let mut pendulum = pendulum_with_damping(0.0005);
        let mut state = PendulumState::default();
        let mut controls = Controls::new(
            Angle::default(),
            AngularVelocity::default(),
            Ratio::new::<ratio>(0.015),
            ControlSteps {
                damping: Damping::new::<hertz>(0.002),
                ..ControlSteps::default()
            },
        );

        controls.apply(InputEvent::DecrementDamping, &mut pendulum, &mut state);

        assert_eq!(pendulum.damping(), Damping::zero());
    }

    #[test]
    fn damping_decrement_above_zero_is_unclamped() {
        let mut pendulum = pendulum_with_damping(0.2);
        let mut state = PendulumState::default();
        let mut controls = controls();

        controls.apply(InputEvent::DecrementDamping, &mut pendulum, &mut state);

        assert_relative_eq!(pendulum.damping().get::<hertz>(), 0.15);
    }

    #[test]
    fn time_scale_decrements_clamp_at_the_floor() {
        let mut pendulum = pendulum_with_damping(0.0);
        let mut state = PendulumState::default();
        let mut controls = controls();

        for _ in 0..10 {
            controls.apply(InputEvent::DecrementScale, &mut pendulum, &mut state);
        }

        assert_relative_eq!(controls.time_scale().get::<ratio>(), MIN_TIME_SCALE);
    }

    #[test]
    fn reset_commits_staged_conditions_and_clears_scratch() {
        let mut pendulum = pendulum_with_damping(0.3);
        let mut state = PendulumState {
            angle: Angle::new::<radian>(2.0),
            angular_velocity: AngularVelocity::new::<degree_per_second>(90.0),
            accel_current: Default::default(),
            accel_next: Default::default(),
        };
        let mut controls = controls();

        controls.apply(InputEvent::Reset, &mut pendulum, &mut state);

        assert_relative_eq!(state.angle.get::<radian>(), std::f64::consts::FRAC_PI_4);
        assert_eq!(state.angular_velocity, AngularVelocity::default());
        assert_eq!(state.accel_current, AngularAcceleration::default());
        assert_eq!(state.accel_next, AngularAcceleration::default());
        // Damping and geometry survive the reset.
        assert_relative_eq!(pendulum.damping().get::<hertz>(), 0.3);
        assert_relative_eq!(pendulum.length().get::<meter>(), 1.0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut pendulum = pendulum_with_damping(0.0);
        let mut state = PendulumState::default();
        let mut controls = controls();

        controls.apply(InputEvent::Reset, &mut pendulum, &mut state);
        let first = state;
        controls.apply(InputEvent::Reset, &mut pendulum, &mut state);

        assert_eq!(state, first);
    }

    #[test]
    fn quit_is_ignored() {
        let mut pendulum = pendulum_with_damping(0.1);
        let mut state = PendulumState::default();
        let mut controls = controls();
        let before = controls;

        controls.apply(InputEvent::Quit, &mut pendulum, &mut state);

        assert_eq!(controls, before);
        assert_eq!(state, PendulumState::default());
        assert_relative_eq!(pendulum.damping().get::<hertz>(), 0.1);
    }
}
