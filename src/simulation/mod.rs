//! Physics simulations with known ground truth.
//!
//! Purpose
//! -------
//! Provide the synthetic physical systems used alongside the calibration
//! engine: currently the planar pendulum under solar-system surface
//! gravities, integrated with fixed-step RK4. Simulated trajectories give
//! regression targets whose true dynamics are known exactly, which makes
//! them convenient probes for uncertainty estimates.
//!
//! Key behaviors
//! -------------
//! - [`pendulum::Pendulum`] — validated parameters, analytic period and
//!   energy, RK4 trajectories.
//!
//! Downstream usage
//! ----------------
//! - Trajectory arrays feed model training and the
//!   [`crate::calibration`] metrics the same way the preprocessed
//!   datasets do.

pub mod errors;
pub mod pendulum;

pub use errors::{SimResult, SimulationError};
pub use pendulum::{Pendulum, PendulumState, Planet, Trajectory};
