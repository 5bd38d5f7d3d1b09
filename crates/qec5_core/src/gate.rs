//! Quantum gate definitions for QEC5
//!
//! Gantree: L1_Circuit → Gate
//!
//! The Clifford gates issued by the encoder, the error channel and the
//! corrector. Every gate knows its own inverse so that circuits can be
//! reversed mechanically.

use crate::types::{PauliOperator, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum gate enumeration
/// Gantree: Gate // (gateKind, qubits) record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================
    /// Hadamard gate
    /// Gantree: H(QubitId)
    H(QubitId),

    /// Phase gate S = diag(1, i)
    /// Gantree: S(QubitId)
    S(QubitId),

    /// S-dagger gate (inverse of S)
    /// Gantree: Sdg(QubitId)
    Sdg(QubitId),

    /// Pauli-X gate (NOT)
    X(QubitId),

    /// Pauli-Y gate
    Y(QubitId),

    /// Pauli-Z gate
    Z(QubitId),

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================
    /// Controlled-NOT (CX)
    /// Gantree: CNOT(QubitId, QubitId) // ctrl, tgt
    Cnot(QubitId, QubitId),

    /// Controlled-Y
    Cy(QubitId, QubitId),

    /// Controlled-Z
    Cz(QubitId, QubitId),
}

impl Gate {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Gate applying a Pauli to `qubit`; `None` for the identity
    pub fn pauli(qubit: QubitId, pauli: PauliOperator) -> Option<Gate> {
        match pauli {
            PauliOperator::I => None,
            PauliOperator::X => Some(Gate::X(qubit)),
            PauliOperator::Y => Some(Gate::Y(qubit)),
            PauliOperator::Z => Some(Gate::Z(qubit)),
        }
    }

    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate (control first)
    /// Gantree: qubits(&self) -> Vec<QubitId>
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::H(q) | Gate::S(q) | Gate::Sdg(q) | Gate::X(q) | Gate::Y(q) | Gate::Z(q) => {
                vec![*q]
            }
            Gate::Cnot(c, t) | Gate::Cy(c, t) | Gate::Cz(c, t) => vec![*c, *t],
        }
    }

    /// Check if gate is single-qubit
    pub fn is_single_qubit(&self) -> bool {
        !self.is_two_qubit()
    }

    /// Check if gate is two-qubit
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Cnot(_, _) | Gate::Cy(_, _) | Gate::Cz(_, _))
    }

    /// Check if gate is a Pauli
    pub fn is_pauli(&self) -> bool {
        matches!(self, Gate::X(_) | Gate::Y(_) | Gate::Z(_))
    }

    /// Check if gate is its own inverse
    pub fn is_self_inverse(&self) -> bool {
        !matches!(self, Gate::S(_) | Gate::Sdg(_))
    }

    /// Inverse gate
    /// Gantree: inverse(&self) -> Gate // S <-> Sdg, rest self-inverse
    pub fn inverse(&self) -> Gate {
        match *self {
            Gate::S(q) => Gate::Sdg(q),
            Gate::Sdg(q) => Gate::S(q),
            other => other,
        }
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H(_) => "h",
            Gate::S(_) => "s",
            Gate::Sdg(_) => "sdg",
            Gate::X(_) => "x",
            Gate::Y(_) => "y",
            Gate::Z(_) => "z",
            Gate::Cnot(_, _) => "cx",
            Gate::Cy(_, _) => "cy",
            Gate::Cz(_, _) => "cz",
        }
    }

    /// Convert to OpenQASM 2.0 string
    /// Gantree: to_qasm(&self) -> String
    pub fn to_qasm(&self) -> String {
        match self {
            Gate::H(q) | Gate::S(q) | Gate::Sdg(q) | Gate::X(q) | Gate::Y(q) | Gate::Z(q) => {
                format!("{} q[{}];", self.name(), q)
            }
            Gate::Cnot(c, t) | Gate::Cy(c, t) | Gate::Cz(c, t) => {
                format!("{} q[{}],q[{}];", self.name(), c, t)
            }
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================
