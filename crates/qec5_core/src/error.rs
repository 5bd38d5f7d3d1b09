//! Error types for QEC5
//!
//! Gantree: L0_Foundation → Errors
//!
//! Error handling shared by the backend, the code components and the pipeline.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QEC5
/// Gantree: QecError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QecError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Qubit index out of range
    /// Gantree: QubitOutOfRange{{q,max}}
    #[error("Qubit {qubit} out of range: max is {max}")]
    QubitOutOfRange { qubit: usize, max: usize },

    /// Invalid Pauli character
    #[error("Invalid Pauli '{0}': must be I, X, Y, or Z")]
    InvalidPauli(char),

    /// Identity is not an error
    #[error("Identity is not a valid error operator on qubit {0}")]
    IdentityError(usize),

    /// Pauli strings of different lengths
    #[error("Pauli string length mismatch: {left} vs {right}")]
    PauliLengthMismatch { left: usize, right: usize },

    /// Syndrome value outside the 4-bit range
    /// Gantree: SyndromeOutOfRange(i64) // 0..=15
    #[error("Syndrome value {0} out of expected range [0, 15]")]
    SyndromeOutOfRange(i64),

    /// Randomness provider returned a value outside the requested range
    #[error("Random draw {value} outside requested range [{low}, {high}]")]
    RandomOutOfRange { value: i64, low: i64, high: i64 },

    /// Fixed random sequence ran out of values
    #[error("Random sequence exhausted after {0} draws")]
    RandomExhausted(usize),

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Gate on non-existent qubit
    #[error("Gate references qubit {qubit} but circuit has only {num_qubits} qubits")]
    GateQubitMismatch { qubit: usize, num_qubits: usize },

    /// Two-qubit gate with identical qubits
    #[error("Gate {gate} uses qubit {qubit} as both control and target")]
    DuplicateQubit { gate: String, qubit: usize },

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// Register does not match the operation's width
    /// Gantree: RegisterSizeMismatch{{expected,actual}}
    #[error("Register size mismatch: expected {expected} qubits, got {actual}")]
    RegisterSizeMismatch { expected: usize, actual: usize },

    /// Allocation request exceeds the backend capacity
    #[error("Cannot allocate {requested} qubits: backend supports at most {max}")]
    AllocationTooLarge { requested: usize, max: usize },

    /// Projection onto a zero-probability outcome
    #[error("Measurement of {0} projected onto a zero-norm state")]
    ZeroNormProjection(String),

    // ========================================================================
    // Code Errors
    // ========================================================================
    /// Stabilizer generators, logical operators and decoder table disagree
    /// Gantree: CodeInconsistent(String) // self-check
    #[error("Code definition inconsistent: {0}")]
    CodeInconsistent(String),

    /// Pipeline configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for QEC5 operations
/// Gantree: QecResult<T> // type alias
pub type QecResult<T> = Result<T, QecError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QecError {
    fn from(err: serde_json::Error) -> Self {
        QecError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QecError {
    fn from(err: std::io::Error) -> Self {
        QecError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QecError {
    /// Check if the pipeline may carry on after this error
    ///
    /// An out-of-range syndrome is a contract violation of the caller or the
    /// backend, never of the data, so the round still decodes and resets.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QecError::SyndromeOutOfRange(_))
    }

    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QecError::QubitOutOfRange { .. }
                | QecError::InvalidPauli(_)
                | QecError::IdentityError(_)
                | QecError::PauliLengthMismatch { .. }
                | QecError::SyndromeOutOfRange(_)
                | QecError::RandomOutOfRange { .. }
                | QecError::RandomExhausted(_)
        )
    }

    /// Check if error is a circuit error
    pub fn is_circuit_error(&self) -> bool {
        matches!(
            self,
            QecError::GateQubitMismatch { .. } | QecError::DuplicateQubit { .. }
        )
    }

    /// Check if error came from the backend
    pub fn is_backend_error(&self) -> bool {
        matches!(
            self,
            QecError::RegisterSizeMismatch { .. }
                | QecError::AllocationTooLarge { .. }
                | QecError::ZeroNormProjection(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QecError::SyndromeOutOfRange(16);
        assert!(err.to_string().contains("16"));
        assert!(err.to_string().contains("out of expected range"));
    }

    #[test]
    fn test_qubit_out_of_range() {
        let err = QecError::QubitOutOfRange { qubit: 7, max: 4 };
        assert!(err.to_string().contains('7'));
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(QecError::SyndromeOutOfRange(-1).is_recoverable());
        assert!(!QecError::ZeroNormProjection("ZZZZZ".into()).is_recoverable());
    }

    #[test]
    fn test_classification() {
        assert!(QecError::InvalidPauli('Q').is_validation_error());
        assert!(!QecError::InvalidPauli('Q').is_backend_error());
        assert!(QecError::ZeroNormProjection("ZZZZZ".into()).is_backend_error());
        assert!(QecError::GateQubitMismatch {
            qubit: 5,
            num_qubits: 5
        }
        .is_circuit_error());
    }

    #[test]
    fn test_json_conversion() {
        let err: QecError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, QecError::JsonError(_)));
    }
}
