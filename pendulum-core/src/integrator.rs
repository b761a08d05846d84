use uom::si::{
    acceleration::meter_per_second_squared,
    angle::radian,
    angular_acceleration::radian_per_second_squared,
    angular_velocity::radian_per_second,
    f64::{Angle, AngularAcceleration, AngularVelocity, Time},
    frequency::hertz,
    length::meter,
    time::second,
};

use crate::pendulum::{Pendulum, PendulumState};

/// Advances the pendulum's angular state by one time step.
///
/// Implementations are total functions over their domain: `dt == 0` must
/// leave the angle and angular velocity unchanged, and an arbitrarily
/// large `dt` is applied as-is, producing a large jump rather than an
/// error. Exactly one state update occurs per invocation. NaN inputs
/// propagate; callers own the precondition that `dt` is finite and
/// non-negative.
pub trait Integrator {
    fn advance(&self, pendulum: &Pendulum, state: PendulumState, dt: Time) -> PendulumState;
}

/// A velocity-Verlet-style semi-implicit scheme for the damped pendulum
/// ODE `θ'' = -(g/l)·sin(θ) - c·θ'`.
///
/// The damping term enters the first acceleration evaluation only. The
/// second evaluation, against the updated angle, is undamped; this breaks
/// true velocity-Verlet symmetry and is kept intentionally to reproduce
/// the reference behavior. With zero damping the scheme is exact velocity
/// Verlet.
#[derive(Debug, Default, Clone, Copy)]
pub struct VelocityVerlet;

impl Integrator for VelocityVerlet {
    fn advance(&self, pendulum: &Pendulum, state: PendulumState, dt: Time) -> PendulumState {
        let dt = dt.get::<second>();
        let g_over_l = pendulum.gravity().get::<meter_per_second_squared>()
            / pendulum.length().get::<meter>();
        let c = pendulum.damping().get::<hertz>();

        let angle = state.angle.get::<radian>();
        let speed = state.angular_velocity.get::<radian_per_second>();

        let accel_current = -g_over_l * angle.sin() - c * speed;
        let next_angle = angle + speed * dt + 0.5 * accel_current * dt * dt;
        // Damping is evaluated once per step, against the pre-step velocity.
        let accel_next = -g_over_l * next_angle.sin();
        let next_speed = speed + 0.5 * (accel_current + accel_next) * dt;

        PendulumState {
            angle: Angle::new::<radian>(next_angle),
            angular_velocity: AngularVelocity::new::<radian_per_second>(next_speed),
            accel_current: AngularAcceleration::new::<radian_per_second_squared>(accel_current),
            accel_next: AngularAcceleration::new::<radian_per_second_squared>(accel_next),
        }
    }
}
