//! simulation::errors — error types for the physics simulations.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the pendulum simulation:
//! parameter validation failures reported as typed variants, convertible
//! to Python exceptions at the binding layer.
//!
//! Conventions
//! -----------
//! - Variants name the offending quantity and carry its value, so
//!   messages can state the constraint that was violated.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` messages embed their payloads.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type SimResult<T> = Result<T, SimulationError>;

/// SimulationError — error conditions for the physics simulations.
///
/// Variants
/// --------
/// - `InvalidLength(value)`
///   The pendulum length is not a positive finite number.
/// - `InvalidGravity(value)`
///   The gravitational acceleration is not a positive finite number.
/// - `InvalidTimeSpan(value)`
///   The simulation end time is not a positive finite number.
/// - `TooFewSamples(value)`
///   A trajectory needs at least two sample points.
/// - `NonFiniteState { theta, omega }`
///   An initial state contains a non-finite component.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    InvalidLength(f64),
    InvalidGravity(f64),
    InvalidTimeSpan(f64),
    TooFewSamples(usize),
    NonFiniteState { theta: f64, omega: f64 },
}

impl std::error::Error for SimulationError {}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidLength(value) => {
                write!(f, "Invalid pendulum length: {value}. Must be positive and finite.")
            }
            SimulationError::InvalidGravity(value) => {
                write!(
                    f,
                    "Invalid gravitational acceleration: {value}. Must be positive and finite."
                )
            }
            SimulationError::InvalidTimeSpan(value) => {
                write!(f, "Invalid simulation end time: {value}. Must be positive and finite.")
            }
            SimulationError::TooFewSamples(value) => {
                write!(f, "A trajectory needs at least 2 sample points, got {value}.")
            }
            SimulationError::NonFiniteState { theta, omega } => {
                write!(
                    f,
                    "Initial state (theta = {theta}, omega = {omega}) contains a non-finite \
                     component."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SimulationError> for PyErr {
    fn from(err: SimulationError) -> PyErr {
        PyValueError::new_err(format!("SimulationError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Embedding of offending values into `Display` messages.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that parameter variants embed the offending value.
    //
    // Given
    // -----
    // - `InvalidLength(-1.5)` and `TooFewSamples(1)`.
    //
    // Expect
    // ------
    // - Both `Display` messages contain their payloads.
    fn simulation_error_messages_embed_values() {
        // Arrange
        let length = SimulationError::InvalidLength(-1.5);
        let samples = SimulationError::TooFewSamples(1);

        // Act / Assert
        assert!(length.to_string().contains("-1.5"));
        assert!(samples.to_string().contains('1'));
    }
}
