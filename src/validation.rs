//! Parameter validation for the simulation boundary.
//!
//! Every failure in the engine is a local precondition violation surfaced
//! synchronously to the caller: bad process parameters are rejected before
//! a record is created, and an invalid quantum leaves the previous value
//! in place. "No eligible process" is deliberately not an error — the
//! engine treats it as a CPU-idle unit.

use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), ValidationError>;

/// A rejected parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of parameter errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Arrival time is negative.
    InvalidArrival,
    /// Burst time is below one work unit.
    InvalidBurst,
    /// Round-Robin quantum is below one time unit.
    InvalidQuantum,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates process creation parameters.
///
/// Arrival must be non-negative and burst at least one work unit.
pub fn validate_process_parameters(arrival: i64, burst: i64) -> ValidationResult {
    if arrival < 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidArrival,
            format!("Arrival time must be >= 0, got {arrival}"),
        ));
    }
    if burst < 1 {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidBurst,
            format!("Burst time must be >= 1, got {burst}"),
        ));
    }
    Ok(())
}

/// Validates a Round-Robin quantum.
pub fn validate_quantum(quantum: i64) -> ValidationResult {
    if quantum < 1 {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            format!("Quantum must be >= 1, got {quantum}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_parameters() {
        assert!(validate_process_parameters(0, 1).is_ok());
        assert!(validate_process_parameters(100, 25).is_ok());
    }

    #[test]
    fn test_negative_arrival() {
        let err = validate_process_parameters(-1, 5).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidArrival);
        assert!(err.message.contains("-1"));
    }

    #[test]
    fn test_zero_burst() {
        let err = validate_process_parameters(0, 0).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidBurst);
    }

    #[test]
    fn test_quantum_bounds() {
        assert!(validate_quantum(1).is_ok());
        assert!(validate_quantum(50).is_ok());
        let err = validate_quantum(0).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidQuantum);
        assert!(validate_quantum(-4).is_err());
    }

    #[test]
    fn test_display() {
        let err = validate_quantum(0).unwrap_err();
        assert_eq!(err.to_string(), "Quantum must be >= 1, got 0");
    }
}
