//! # QEC5 Core
//!
//! Foundation types and circuits for the five-qubit stabilizer code simulator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qec5_core // L0+L1: Foundation + Circuit
//!     L0_Foundation
//!         CoreTypes // PauliOperator, PauliString, ErrorEvent, Syndrome
//!         Constants // code parameters, simulator defaults
//!         Errors // QecError
//!     L1_Circuit
//!         Gate // Clifford gate enum with inverses
//!         Circuit // validated gate sequence
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qec5_core::prelude::*;
//!
//! let g1 = PauliString::parse("ZXIXZ").unwrap();
//! let g4 = PauliString::parse("XZZXI").unwrap();
//! assert!(g1.commutes_with(&g4).unwrap());
//!
//! let circuit = Circuit::from_gates(5, &[Gate::H(0), Gate::S(0), Gate::Cy(0, 4)]).unwrap();
//! assert_eq!(circuit.inverse().gates()[1], Gate::Sdg(0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Quantum gates (Gantree: L1_Circuit → Gate)
pub mod gate;

/// Circuit structure (Gantree: L1_Circuit → Circuit)
pub mod circuit;

// ============================================================================
// Re-exports
// ============================================================================

pub use circuit::Circuit;
pub use constants::{code, simulator};
pub use error::{QecError, QecResult};
pub use gate::Gate;
pub use types::{ErrorEvent, LogicalState, PauliOperator, PauliString, QubitId, Syndrome};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qec5_core::prelude::*;
    //! ```

    pub use crate::circuit::Circuit;
    pub use crate::constants::{code, simulator};
    pub use crate::error::{QecError, QecResult};
    pub use crate::gate::Gate;
    pub use crate::types::{
        ErrorEvent, LogicalState, PauliOperator, PauliString, QubitId, Syndrome,
    };
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn generators() -> Vec<PauliString> {
        code::STABILIZER_GENERATORS
            .iter()
            .map(|s| PauliString::parse(s).unwrap())
            .collect()
    }

    #[test]
    fn test_generators_commute_pairwise() {
        let gens = generators();
        for a in &gens {
            for b in &gens {
                assert!(a.commutes_with(b).unwrap(), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_generators_commute_with_logicals() {
        let logical_x = PauliString::parse(code::LOGICAL_X).unwrap();
        let logical_z = PauliString::parse(code::LOGICAL_Z).unwrap();
        assert!(!logical_x.commutes_with(&logical_z).unwrap());
        for g in generators() {
            assert!(g.commutes_with(&logical_x).unwrap());
            assert!(g.commutes_with(&logical_z).unwrap());
        }
    }

    #[test]
    fn test_every_single_error_is_detected() {
        let gens = generators();
        for event in ErrorEvent::all() {
            let error = event.to_pauli_string().unwrap();
            let detected = gens.iter().any(|g| !g.commutes_with(&error).unwrap());
            assert!(detected, "{} goes undetected", event);
        }
    }

    #[test]
    fn test_pauli_gates_for_error_events() {
        for event in ErrorEvent::all() {
            let gate = Gate::pauli(event.qubit(), event.pauli()).unwrap();
            assert!(gate.is_pauli());
            assert_eq!(gate.qubits(), vec![event.qubit()]);
            assert_eq!(gate.inverse(), gate);
        }
    }
}
