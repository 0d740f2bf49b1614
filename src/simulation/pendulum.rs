//! simulation::pendulum — planar pendulum dynamics on solar-system
//! planets.
//!
//! Purpose
//! -------
//! Simulate a planar pendulum, θ'' = −(g/L)·sin θ, under the surface
//! gravity of any solar-system planet, producing densely sampled
//! trajectories of angle and angular velocity. This is the synthetic
//! physical system used to exercise the calibration engine on data with
//! known ground truth.
//!
//! Key behaviors
//! -------------
//! - [`Planet`] — the eight planets with their surface gravities.
//! - [`Pendulum::simulate`] — classical fixed-step fourth-order
//!   Runge-Kutta integration over [0, t_end], sampled at every step.
//! - [`Pendulum::small_angle_period`] and [`Pendulum::energy`] — the
//!   analytic quantities used to check trajectories.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed [`Pendulum`] has positive, finite length and gravity.
//! - The integrator is fixed-step; accuracy is the caller's concern via
//!   the sample count (1000 points over a few periods is ample for RK4).
//! - The mass is normalized to 1, so [`Pendulum::energy`] is specific
//!   energy.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the gravity table, the small-angle period against the
//!   simulated zero crossing, energy conservation along a trajectory, and
//!   the validation branches.

use ndarray::Array1;

use crate::simulation::errors::{SimResult, SimulationError};

/// Planet — the eight solar-system planets, as gravity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Planet {
    /// Surface gravitational acceleration in m/s².
    pub fn surface_gravity(self) -> f64 {
        match self {
            Planet::Mercury => 3.7,
            Planet::Venus => 8.87,
            Planet::Earth => 9.81,
            Planet::Mars => 3.71,
            Planet::Jupiter => 24.79,
            Planet::Saturn => 10.44,
            Planet::Uranus => 8.87,
            Planet::Neptune => 11.15,
        }
    }
}

/// PendulumState — the phase-space state (angle, angular velocity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumState {
    pub theta: f64,
    pub omega: f64,
}

/// Trajectory — a sampled pendulum trajectory.
///
/// Fields
/// ------
/// - `times`: Sample times, evenly spaced over [0, t_end].
/// - `theta`: Angle at each sample time, in radians.
/// - `omega`: Angular velocity at each sample time, in rad/s.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub times: Array1<f64>,
    pub theta: Array1<f64>,
    pub omega: Array1<f64>,
}

impl Trajectory {
    /// Number of sample points.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// A simulated trajectory always holds at least two samples.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Pendulum — a planar pendulum with fixed length and gravity.
///
/// Purpose
/// -------
/// Hold the validated physical parameters and expose the dynamics:
/// derivative evaluation, analytic small-angle period and energy, and
/// fixed-step RK4 simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pendulum {
    length: f64,
    gravity: f64,
}

impl Pendulum {
    /// Construct a pendulum from explicit length and gravity.
    ///
    /// Parameters
    /// ----------
    /// - `length`: Pendulum length in meters; positive and finite.
    /// - `gravity`: Gravitational acceleration in m/s²; positive and
    ///   finite.
    ///
    /// # Errors
    /// - [`SimulationError::InvalidLength`] or
    ///   [`SimulationError::InvalidGravity`] if a parameter is
    ///   non-positive or non-finite.
    pub fn new(length: f64, gravity: f64) -> SimResult<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(SimulationError::InvalidLength(length));
        }
        if !gravity.is_finite() || gravity <= 0.0 {
            return Err(SimulationError::InvalidGravity(gravity));
        }
        Ok(Pendulum { length, gravity })
    }

    /// Construct a pendulum under a planet's surface gravity.
    ///
    /// # Errors
    /// - [`SimulationError::InvalidLength`] if `length` is non-positive
    ///   or non-finite.
    pub fn on_planet(length: f64, planet: Planet) -> SimResult<Self> {
        Pendulum::new(length, planet.surface_gravity())
    }

    /// Pendulum length in meters.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Gravitational acceleration in m/s².
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Phase-space derivative (θ', ω') = (ω, −(g/L)·sin θ).
    pub fn derivative(&self, state: PendulumState) -> PendulumState {
        PendulumState {
            theta: state.omega,
            omega: -(self.gravity / self.length) * state.theta.sin(),
        }
    }

    /// Small-angle oscillation period, 2π·sqrt(L/g).
    pub fn small_angle_period(&self) -> f64 {
        2.0 * std::f64::consts::PI * (self.length / self.gravity).sqrt()
    }

    /// Specific mechanical energy of a state (unit mass):
    /// ½·(L·ω)² + g·L·(1 − cos θ).
    pub fn energy(&self, state: PendulumState) -> f64 {
        let speed = self.length * state.omega;
        0.5 * speed * speed + self.gravity * self.length * (1.0 - state.theta.cos())
    }

    /// Simulate the pendulum with fixed-step fourth-order Runge-Kutta.
    ///
    /// Parameters
    /// ----------
    /// - `initial`: Initial (θ, ω) state; both components finite.
    /// - `t_end`: End of the simulated interval [0, t_end]; positive and
    ///   finite.
    /// - `n_samples`: Number of sample points, including both endpoints;
    ///   at least 2. The step size is `t_end / (n_samples − 1)`.
    ///
    /// Returns
    /// -------
    /// - `SimResult<Trajectory>`: times, angles, and angular velocities
    ///   at each of the `n_samples` points.
    ///
    /// # Errors
    /// - [`SimulationError::NonFiniteState`] if `initial` contains a
    ///   non-finite component.
    /// - [`SimulationError::InvalidTimeSpan`] if `t_end` is non-positive
    ///   or non-finite.
    /// - [`SimulationError::TooFewSamples`] if `n_samples < 2`.
    ///
    /// Examples
    /// --------
    /// ```
    /// use uq_calibration::simulation::pendulum::{Pendulum, PendulumState, Planet};
    ///
    /// let pendulum = Pendulum::on_planet(0.5, Planet::Earth)?;
    /// let start = PendulumState { theta: std::f64::consts::FRAC_PI_4, omega: 0.0 };
    /// let trajectory = pendulum.simulate(start, 10.0, 1000)?;
    /// assert_eq!(trajectory.len(), 1000);
    /// # Ok::<(), uq_calibration::simulation::SimulationError>(())
    /// ```
    pub fn simulate(
        &self,
        initial: PendulumState,
        t_end: f64,
        n_samples: usize,
    ) -> SimResult<Trajectory> {
        if !initial.theta.is_finite() || !initial.omega.is_finite() {
            return Err(SimulationError::NonFiniteState {
                theta: initial.theta,
                omega: initial.omega,
            });
        }
        if !t_end.is_finite() || t_end <= 0.0 {
            return Err(SimulationError::InvalidTimeSpan(t_end));
        }
        if n_samples < 2 {
            return Err(SimulationError::TooFewSamples(n_samples));
        }

        let step = t_end / (n_samples - 1) as f64;
        let mut times = Array1::zeros(n_samples);
        let mut theta = Array1::zeros(n_samples);
        let mut omega = Array1::zeros(n_samples);

        let mut state = initial;
        times[0] = 0.0;
        theta[0] = state.theta;
        omega[0] = state.omega;
        for i in 1..n_samples {
            state = self.rk4_step(state, step);
            times[i] = i as f64 * step;
            theta[i] = state.theta;
            omega[i] = state.omega;
        }

        Ok(Trajectory { times, theta, omega })
    }

    /// One classical RK4 step of size `h`.
    fn rk4_step(&self, state: PendulumState, h: f64) -> PendulumState {
        let k1 = self.derivative(state);
        let k2 = self.derivative(advance(state, k1, 0.5 * h));
        let k3 = self.derivative(advance(state, k2, 0.5 * h));
        let k4 = self.derivative(advance(state, k3, h));

        PendulumState {
            theta: state.theta
                + h / 6.0 * (k1.theta + 2.0 * k2.theta + 2.0 * k3.theta + k4.theta),
            omega: state.omega
                + h / 6.0 * (k1.omega + 2.0 * k2.omega + 2.0 * k3.omega + k4.omega),
        }
    }
}

/// `state + scale * derivative`, component-wise.
fn advance(state: PendulumState, derivative: PendulumState, scale: f64) -> PendulumState {
    PendulumState {
        theta: state.theta + scale * derivative.theta,
        omega: state.omega + scale * derivative.omega,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The planetary gravity table.
    // - Trajectory sampling (count, endpoints, spacing).
    // - Physical correctness: small-angle period, energy conservation,
    //   and the rest state.
    // - The validation branches of construction and simulation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the surface-gravity table at its extremes.
    //
    // Given
    // -----
    // - Earth, Jupiter (largest), and Mercury (smallest).
    //
    // Expect
    // ------
    // - 9.81, 24.79, and 3.7 m/s² respectively.
    fn planet_gravity_table_matches_reference_values() {
        // Arrange / Act / Assert
        assert_eq!(Planet::Earth.surface_gravity(), 9.81);
        assert_eq!(Planet::Jupiter.surface_gravity(), 24.79);
        assert_eq!(Planet::Mercury.surface_gravity(), 3.7);
    }

    #[test]
    // Purpose
    // -------
    // Verify trajectory sampling: count, endpoints, and even spacing.
    //
    // Given
    // -----
    // - A 10-second simulation sampled at 101 points.
    //
    // Expect
    // ------
    // - times[0] = 0, times[100] = 10, uniform 0.1 s spacing.
    fn simulate_samples_the_interval_evenly() {
        // Arrange
        let pendulum = Pendulum::on_planet(0.5, Planet::Earth).expect("valid parameters");
        let start = PendulumState { theta: 0.2, omega: 0.0 };

        // Act
        let trajectory = pendulum.simulate(start, 10.0, 101).expect("valid simulation");

        // Assert
        assert_eq!(trajectory.len(), 101);
        assert_eq!(trajectory.times[0], 0.0);
        assert!((trajectory.times[100] - 10.0).abs() < 1e-12);
        assert!((trajectory.times[1] - 0.1).abs() < 1e-12);
        assert_eq!(trajectory.theta[0], 0.2);
        assert_eq!(trajectory.omega[0], 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the small-angle period against the simulated motion: after
    // one analytic period, a small-amplitude pendulum returns close to
    // its initial state.
    //
    // Given
    // -----
    // - A 1 m Earth pendulum released from rest at θ = 0.05 rad,
    //   simulated for exactly one small-angle period at 2000 samples.
    //
    // Expect
    // ------
    // - Final θ within 1e-4 of the initial angle, final ω near zero.
    fn small_angle_motion_is_periodic() {
        // Arrange
        let pendulum = Pendulum::on_planet(1.0, Planet::Earth).expect("valid parameters");
        let start = PendulumState { theta: 0.05, omega: 0.0 };
        let period = pendulum.small_angle_period();

        // Act
        let trajectory = pendulum.simulate(start, period, 2000).expect("valid simulation");

        // Assert
        let last = trajectory.len() - 1;
        assert!(
            (trajectory.theta[last] - 0.05).abs() < 1e-4,
            "theta after one period = {}",
            trajectory.theta[last]
        );
        assert!(trajectory.omega[last].abs() < 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // Verify energy conservation along a large-amplitude trajectory.
    //
    // Given
    // -----
    // - A 0.5 m Mars pendulum released from rest at θ = π/4, simulated
    //   for 10 s at 1000 samples.
    //
    // Expect
    // ------
    // - The specific energy at every sample matches the initial energy
    //   within a 1e-5 relative tolerance.
    fn rk4_conserves_energy() {
        // Arrange
        let pendulum = Pendulum::on_planet(0.5, Planet::Mars).expect("valid parameters");
        let start = PendulumState { theta: std::f64::consts::FRAC_PI_4, omega: 0.0 };
        let initial_energy = pendulum.energy(start);

        // Act
        let trajectory = pendulum.simulate(start, 10.0, 1000).expect("valid simulation");

        // Assert
        for i in 0..trajectory.len() {
            let state =
                PendulumState { theta: trajectory.theta[i], omega: trajectory.omega[i] };
            let drift = (pendulum.energy(state) - initial_energy).abs() / initial_energy;
            assert!(drift < 1e-5, "energy drift {drift} at sample {i}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the rest state is a fixed point of the dynamics.
    //
    // Given
    // -----
    // - A pendulum starting at (θ, ω) = (0, 0).
    //
    // Expect
    // ------
    // - Every sample stays exactly at (0, 0).
    fn rest_state_is_a_fixed_point() {
        // Arrange
        let pendulum = Pendulum::on_planet(2.0, Planet::Neptune).expect("valid parameters");
        let rest = PendulumState { theta: 0.0, omega: 0.0 };

        // Act
        let trajectory = pendulum.simulate(rest, 5.0, 50).expect("valid simulation");

        // Assert
        assert!(trajectory.theta.iter().all(|&t| t == 0.0));
        assert!(trajectory.omega.iter().all(|&w| w == 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify the validation branches of construction and simulation.
    //
    // Given
    // -----
    // - A zero length, a NaN gravity, a negative time span, and a
    //   single-sample request.
    //
    // Expect
    // ------
    // - The matching error variant for each.
    fn validation_rejects_bad_parameters() {
        // Arrange
        let pendulum = Pendulum::new(1.0, 9.81).expect("valid parameters");
        let start = PendulumState { theta: 0.1, omega: 0.0 };

        // Act / Assert
        match Pendulum::new(0.0, 9.81) {
            Err(SimulationError::InvalidLength(value)) => assert_eq!(value, 0.0),
            other => panic!("expected InvalidLength error, got {other:?}"),
        }
        match Pendulum::new(1.0, f64::NAN) {
            Err(SimulationError::InvalidGravity(value)) => assert!(value.is_nan()),
            other => panic!("expected InvalidGravity error, got {other:?}"),
        }
        match pendulum.simulate(start, -1.0, 100) {
            Err(SimulationError::InvalidTimeSpan(value)) => assert_eq!(value, -1.0),
            other => panic!("expected InvalidTimeSpan error, got {other:?}"),
        }
        match pendulum.simulate(start, 1.0, 1) {
            Err(SimulationError::TooFewSamples(value)) => assert_eq!(value, 1),
            other => panic!("expected TooFewSamples error, got {other:?}"),
        }
    }
}
