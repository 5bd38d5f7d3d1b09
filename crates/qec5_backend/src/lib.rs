//! # QEC5 Backend
//!
//! Quantum backend abstraction and an exact state-vector simulator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qec5_backend // L2: Backend
//!     BackendTrait // allocate, apply_gate, measure_pauli_product, reset
//!     StateVectorBackend // dense simulator, seeded measurement sampling
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qec5_backend::prelude::*;
//! use qec5_core::{Gate, PauliString};
//!
//! let mut backend = StateVectorBackend::ideal().with_seed(42);
//! let mut register = backend.allocate(2).unwrap();
//!
//! backend.apply_gate(&mut register, &Gate::H(0)).unwrap();
//! backend.apply_gate(&mut register, &Gate::Cnot(0, 1)).unwrap();
//!
//! // Bell state is a +1 eigenstate of XX and ZZ
//! let xx = PauliString::parse("XX").unwrap();
//! assert!(!backend.measure_pauli_product(&mut register, &xx).unwrap());
//!
//! backend.reset(&mut register).unwrap();
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution counters and backend trait (Gantree: L2_Backend)
pub mod execution;

/// State-vector simulator (Gantree: L2_Backend → StateVectorBackend)
pub mod simulator;

// ============================================================================
// Re-exports
// ============================================================================

pub use execution::{ExecutionStats, QuantumBackend};
pub use simulator::{StateVector, StateVectorBackend};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qec5_backend::prelude::*;
    //! ```

    pub use crate::execution::{ExecutionStats, QuantumBackend};
    pub use crate::simulator::{StateVector, StateVectorBackend};
}

// ============================================================================
// Integration Tests
// ============================================================================
