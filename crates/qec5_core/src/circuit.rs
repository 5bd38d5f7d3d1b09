//! Quantum circuit structure for QEC5
//!
//! Gantree: L1_Circuit → Circuit
//!
//! Ordered, validated gate sequences. The encoder is stored as a circuit
//! and its decoder is obtained with [`Circuit::inverse`].

use crate::error::{QecError, QecResult};
use crate::gate::Gate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum circuit
/// Gantree: Circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits
    num_qubits: usize,

    /// Gate sequence
    gates: Vec<Gate>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: None,
        }
    }

    /// Create a circuit with a name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: Some(name.into()),
        }
    }

    /// Create from a slice of gates
    pub fn from_gates(num_qubits: usize, gates: &[Gate]) -> QecResult<Self> {
        let mut circuit = Self::new(num_qubits);
        circuit.add_gates(gates.iter().copied())?;
        Ok(circuit)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Add a gate to the circuit
    /// Gantree: add_gate(&mut, Gate) -> Result
    pub fn add_gate(&mut self, gate: Gate) -> QecResult<()> {
        Self::validate_gate(&gate, self.num_qubits)?;
        self.gates.push(gate);
        Ok(())
    }

    /// Add multiple gates
    pub fn add_gates(&mut self, gates: impl IntoIterator<Item = Gate>) -> QecResult<()> {
        for gate in gates {
            self.add_gate(gate)?;
        }
        Ok(())
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get gates
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set circuit name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Number of gates
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // ========================================================================
    // Transformations
    // ========================================================================

    /// Inverse circuit
    /// Gantree: inverse(&self) -> Circuit // reverse order, invert each gate
    pub fn inverse(&self) -> Circuit {
        Circuit {
            num_qubits: self.num_qubits,
            gates: self.gates.iter().rev().map(Gate::inverse).collect(),
            name: self.name.as_ref().map(|n| format!("{}_dg", n)),
        }
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    /// Count single-qubit gates
    pub fn count_1q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_single_qubit()).count()
    }

    /// Count two-qubit gates
    pub fn count_2q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Count gates by name
    pub fn count_by_name(&self, name: &str) -> usize {
        self.gates.iter().filter(|g| g.name() == name).count()
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Convert to OpenQASM 2.0
    /// Gantree: to_qasm(&self) -> String
    pub fn to_qasm(&self) -> String {
        let mut qasm = String::new();
        qasm.push_str("OPENQASM 2.0;\n");
        qasm.push_str("include \"qelib1.inc\";\n");
        qasm.push_str(&format!("qreg q[{}];\n", self.num_qubits));
        for gate in &self.gates {
            qasm.push_str(&gate.to_qasm());
            qasm.push('\n');
        }
        qasm
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn validate_gate(gate: &Gate, num_qubits: usize) -> QecResult<()> {
        let qubits = gate.qubits();
        for &qubit in &qubits {
            if qubit >= num_qubits {
                return Err(QecError::GateQubitMismatch { qubit, num_qubits });
            }
        }
        if let [control, target] = qubits[..] {
            if control == target {
                return Err(QecError::DuplicateQubit {
                    gate: gate.name().to_string(),
                    qubit: control,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit{} ({} qubits, {} gates)",
            self.name
                .as_ref()
                .map(|n| format!(" '{}'", n))
                .unwrap_or_default(),
            self.num_qubits,
            self.gates.len()
        )?;
        for (i, gate) in self.gates.iter().enumerate() {
            writeln!(f, "  {:2}: {}", i, gate)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
