use num_traits::Zero;
use uom::si::{
    angle::degree,
    angular_velocity::degree_per_second,
    f64::Time,
    frequency::hertz,
    ratio::ratio,
};

use crate::{
    clock::Clock,
    control::Controls,
    events::InputEvent,
    integrator::{Integrator, VelocityVerlet},
    pendulum::{Pendulum, PendulumState, Point},
};

/// One published simulation frame.
///
/// Everything the rendering collaborator needs: the rod endpoints for
/// line/bob drawing and the numeric readout for textual display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub pivot: Point,
    pub bob: Point,
    pub readout: Readout,
}

/// The four human-readable values displayed alongside the pendulum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    pub staged_angle_degrees: f64,
    pub staged_speed_degrees: f64,
    pub time_scale: f64,
    pub damping_per_second: f64,
}

/// Drives the pendulum through wall-clock time.
///
/// Owns the live pendulum, its dynamical state, the control surface, and
/// the previous clock sample. Each [`advance_frame`](Self::advance_frame)
/// call processes the queued input events to completion, samples the
/// clock exactly once, and then invokes the integrator once. A reset is
/// therefore never interleaved with a partially-computed step, and
/// elapsed time is neither compounded nor lost across control mutations.
pub struct Simulation<I = VelocityVerlet> {
    pendulum: Pendulum,
    state: PendulumState,
    controls: Controls,
    integrator: I,
    last_tick: Option<Time>,
}

impl<I: Integrator> Simulation<I> {
    #[must_use]
    pub fn new(pendulum: Pendulum, state: PendulumState, controls: Controls, integrator: I) -> Self {
        Self {
            pendulum,
            state,
            controls,
            integrator,
            last_tick: None,
        }
    }

    /// Advances the simulation by one frame.
    ///
    /// Per-frame order: apply every queued event, sample the clock once,
    /// scale the elapsed time by the control surface's time scale, take
    /// one integration step, publish the frame. The first frame sees a
    /// zero elapsed time.
    pub fn advance_frame<C, E>(&mut self, clock: &mut C, events: E) -> Frame
    where
        C: Clock,
        E: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.controls
                .apply(event, &mut self.pendulum, &mut self.state);
        }

        let now = clock.now();
        let elapsed = self.last_tick.map_or_else(Time::zero, |last| now - last);
        self.last_tick = Some(now);

        let dt = elapsed * self.controls.time_scale();
        self.state = self.integrator.advance(&self.pendulum, self.state, dt);

        self.frame()
    }

    /// The frame for the current state, without advancing.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            pivot: self.pendulum.pivot(),
            bob: self.pendulum.bob_position(&self.state),
            readout: Readout {
                staged_angle_degrees: self.controls.staged_angle().get::<degree>(),
                staged_speed_degrees: self.controls.staged_speed().get::<degree_per_second>(),
                time_scale: self.controls.time_scale().get::<ratio>(),
                damping_per_second: self.pendulum.damping().get::<hertz>(),
            },
        }
    }

    #[must_use]
    pub fn pendulum(&self) -> &Pendulum {
        &self.pendulum
    }

    #[must_use]
    pub fn state(&self) -> &PendulumState {
        &self.state
    }

    #[must_use]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }
}
