use thiserror::Error;
use uom::si::{
    acceleration::meter_per_second_squared,
    angle::radian,
    angular_velocity::radian_per_second,
    available_energy::joule_per_kilogram,
    f64::{
        Acceleration, Angle, AngularAcceleration, AngularVelocity, AvailableEnergy, Frequency,
        Length,
    },
    length::meter,
};

/// Linear drag coefficient applied to angular velocity, in 1/s.
///
/// Models air and pivot friction as a torque proportional to the angular
/// velocity. Non-negative in intended use; the control surface enforces a
/// zero floor on decrements.
pub type Damping = Frequency;

/// A Cartesian position in world coordinates.
///
/// Follows the screen convention of the rendering collaborator: `y` grows
/// downward, so a hanging bob sits below the pivot at `y0 + l`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    #[must_use]
    pub fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// Creates a point from raw SI coordinates (m).
    #[must_use]
    pub fn from_si(x: f64, y: f64) -> Self {
        Self::new(Length::new::<meter>(x), Length::new::<meter>(y))
    }
}

/// Error returned when constructing a pendulum with no usable rod.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("pendulum length must be greater than zero, got {0} m")]
    DegenerateRod(f64),
}

/// A rigid-rod pendulum anchored at a fixed pivot.
///
/// The pivot is set once and never moves. The rod length is derived once
/// from the pivot and the initial bob position and stays constant for the
/// value's lifetime. Damping is the only parameter that changes after
/// construction; the control surface adjusts it live and the integrator
/// reads it on every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pendulum {
    pivot: Point,
    length: Length,
    gravity: Acceleration,
    damping: Damping,
}

impl Pendulum {
    /// Creates a pendulum whose rod spans from `pivot` to `bob`.
    ///
    /// The rod length is the Euclidean distance between the two points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateRod`] if the two points coincide
    /// or the distance is not a positive finite number.
    pub fn new(
        pivot: Point,
        bob: Point,
        gravity: Acceleration,
        damping: Damping,
    ) -> Result<Self, GeometryError> {
        let dx = bob.x - pivot.x;
        let dy = bob.y - pivot.y;
        let length = (dx * dx + dy * dy).sqrt();
        Self::with_length(pivot, length, gravity, damping)
    }

    /// Creates a pendulum from an explicit rod length.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateRod`] unless `length` is a
    /// positive finite number.
    pub fn with_length(
        pivot: Point,
        length: Length,
        gravity: Acceleration,
        damping: Damping,
    ) -> Result<Self, GeometryError> {
        let meters = length.get::<meter>();
        if !(meters > 0.0 && meters.is_finite()) {
            return Err(GeometryError::DegenerateRod(meters));
        }
        Ok(Self {
            pivot,
            length,
            gravity,
            damping,
        })
    }

    #[must_use]
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }

    #[must_use]
    pub fn gravity(&self) -> Acceleration {
        self.gravity
    }

    #[must_use]
    pub fn damping(&self) -> Damping {
        self.damping
    }

    pub(crate) fn set_damping(&mut self, damping: Damping) {
        self.damping = damping;
    }

    /// Projects the bob position from the current angle.
    ///
    /// The bob is never stored; it is always recomputed from
    /// `(pivot, length, angle)`:
    ///
    /// ```text
    ///   x1 = x0 + l·sin(θ)
    ///   y1 = y0 + l·cos(θ)
    /// ```
    #[must_use]
    pub fn bob_position(&self, state: &PendulumState) -> Point {
        Point::new(
            self.pivot.x + self.length * state.angle.sin(),
            self.pivot.y + self.length * state.angle.cos(),
        )
    }

    /// Mechanical energy per unit bob mass: `0.5·l²·ω² + g·l·(1−cos θ)`.
    ///
    /// Zero at rest hanging straight down. Useful as a drift diagnostic for
    /// the undamped system.
    #[must_use]
    pub fn mechanical_energy(&self, state: &PendulumState) -> AvailableEnergy {
        let l = self.length.get::<meter>();
        let g = self.gravity.get::<meter_per_second_squared>();
        let theta = state.angle.get::<radian>();
        let omega = state.angular_velocity.get::<radian_per_second>();
        AvailableEnergy::new::<joule_per_kilogram>(
            0.5 * l * l * omega * omega + g * l * (1.0 - theta.cos()),
        )
    }
}

/// The dynamical state advanced by the integrator.
///
/// The two acceleration fields are scratch values recomputed on every
/// integration step; they carry no meaning between steps and are zeroed on
/// reset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendulumState {
    pub angle: Angle,
    pub angular_velocity: AngularVelocity,
    pub accel_current: AngularAcceleration,
    pub accel_next: AngularAcceleration,
}

impl PendulumState {
    /// A state released from the given angle and angular velocity, with the
    /// acceleration scratch values cleared.
    #[must_use]
    pub fn released_from(angle: Angle, angular_velocity: AngularVelocity) -> Self {
        Self {
            angle,
            angular_velocity,
            ..Self::default()
        }
    }
}
