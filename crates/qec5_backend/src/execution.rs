//! Backend execution types and traits
//!
//! Gantree: L2_Backend → BackendTrait
//!
//! Defines the interface the code components use to drive a qubit register.
//! The core never sees the state representation, only gate requests and
//! classical measurement bits.

use qec5_core::{Circuit, Gate, PauliOperator, PauliString, QecError, QecResult, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counters for the operations a backend has executed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStats {
    /// Registers allocated
    pub allocations: u64,

    /// Single-qubit gates applied
    pub gates_1q: u64,

    /// Two-qubit gates applied
    pub gates_2q: u64,

    /// Pauli-product measurements performed
    pub measurements: u64,

    /// Register resets
    pub resets: u64,
}

impl ExecutionStats {
    /// Total gates applied
    pub fn total_gates(&self) -> u64 {
        self.gates_1q + self.gates_2q
    }

    /// Record a gate
    pub fn record_gate(&mut self, gate: &Gate) {
        if gate.is_two_qubit() {
            self.gates_2q += 1;
        } else {
            self.gates_1q += 1;
        }
    }

    /// Accumulate counters from another run
    pub fn merge(&mut self, other: &ExecutionStats) {
        self.allocations += other.allocations;
        self.gates_1q += other.gates_1q;
        self.gates_2q += other.gates_2q;
        self.measurements += other.measurements;
        self.resets += other.resets;
    }

    /// Counters accumulated since the `before` snapshot
    pub fn since(&self, before: &ExecutionStats) -> ExecutionStats {
        ExecutionStats {
            allocations: self.allocations.saturating_sub(before.allocations),
            gates_1q: self.gates_1q.saturating_sub(before.gates_1q),
            gates_2q: self.gates_2q.saturating_sub(before.gates_2q),
            measurements: self.measurements.saturating_sub(before.measurements),
            resets: self.resets.saturating_sub(before.resets),
        }
    }
}

impl fmt::Display for ExecutionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExecutionStats(alloc={}, 1q={}, 2q={}, meas={}, resets={})",
            self.allocations, self.gates_1q, self.gates_2q, self.measurements, self.resets
        )
    }
}

/// Quantum backend trait
/// Gantree: BackendTrait // allocate, apply_gate, measure_pauli_product, reset
///
/// A register is a value owned by whoever allocated it and lent to the
/// backend for every operation, so one register can never be driven by two
/// pipeline runs at once.
pub trait QuantumBackend: Send {
    /// Register handle produced by [`QuantumBackend::allocate`]
    type Register;

    /// Get backend name
    fn name(&self) -> &str;

    /// Allocate `num_qubits` qubits in |0...0⟩
    /// Gantree: allocate(n) -> Register
    fn allocate(&mut self, num_qubits: usize) -> QecResult<Self::Register>;

    /// Number of qubits in `register`
    fn register_size(&self, register: &Self::Register) -> usize;

    /// Apply a unitary gate
    /// Gantree: apply_gate(register, gate)
    fn apply_gate(&mut self, register: &mut Self::Register, gate: &Gate) -> QecResult<()>;

    /// Projective measurement of a Pauli product over the whole register
    /// Gantree: measure_pauli_product(register, paulis) -> bit
    ///
    /// Returns `false` for eigenvalue +1 and `true` for eigenvalue -1.
    /// The state is projected onto the observed eigenspace only.
    fn measure_pauli_product(
        &mut self,
        register: &mut Self::Register,
        pauli: &PauliString,
    ) -> QecResult<bool>;

    /// Drive the register to |0...0⟩
    /// Gantree: reset(register)
    fn reset(&mut self, register: &mut Self::Register) -> QecResult<()>;

    /// Apply every gate of a circuit in order
    fn apply_circuit(&mut self, register: &mut Self::Register, circuit: &Circuit) -> QecResult<()> {
        let size = self.register_size(register);
        if circuit.num_qubits() > size {
            return Err(QecError::RegisterSizeMismatch {
                expected: circuit.num_qubits(),
                actual: size,
            });
        }
        for gate in circuit.gates() {
            self.apply_gate(register, gate)?;
        }
        Ok(())
    }

    /// Measure a single qubit in the computational basis
    fn measure_qubit(&mut self, register: &mut Self::Register, qubit: QubitId) -> QecResult<bool> {
        let size = self.register_size(register);
        let observable = PauliString::single(size, qubit, PauliOperator::Z)?;
        self.measure_pauli_product(register, &observable)
    }

    /// Operation counters, if the backend keeps them
    fn stats(&self) -> Option<ExecutionStats> {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
