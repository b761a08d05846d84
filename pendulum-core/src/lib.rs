//! Interactive damped pendulum simulation.
//!
//! The numerical core, a velocity-Verlet-style [`Integrator`] over
//! [`PendulumState`], is kept separate from the interactive [`Controls`]
//! that stage initial conditions and commit them on reset. A
//! [`Simulation`] ties both to a wall [`Clock`] and publishes one
//! [`Frame`] per iteration for the rendering collaborator.

mod clock;
mod config;
mod control;
mod events;
mod integrator;
mod pendulum;
mod simulation;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{ConfigError, SimulationConfig, StepsConfig};
pub use control::{ControlSteps, Controls, MIN_TIME_SCALE};
pub use events::{EventSource, InputEvent};
pub use integrator::{Integrator, VelocityVerlet};
pub use pendulum::{Damping, GeometryError, Pendulum, PendulumState, Point};
pub use simulation::{Frame, Readout, Simulation};
