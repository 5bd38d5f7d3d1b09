//! Constants for QEC5
//!
//! Gantree: L0_Foundation → Constants
//!
//! Parameters of the five-qubit code and simulator defaults.

// ============================================================================
// Code Constants
// Gantree: code // [[5,1,3]] parameters
// ============================================================================

pub mod code {
    //! Parameters of the [[5,1,3]] perfect code

    /// Physical qubits per code block
    /// Gantree: NUM_QUBITS: usize = 5
    pub const NUM_QUBITS: usize = 5;

    /// Independent stabilizer generators (n - k)
    /// Gantree: NUM_STABILIZERS: usize = 4
    pub const NUM_STABILIZERS: usize = 4;

    /// Qubit that carries the logical input before encoding and after decoding
    pub const LOGICAL_QUBIT: usize = 4;

    /// Number of correctable single-qubit Pauli errors (5 qubits x {X, Y, Z})
    pub const NUM_ERROR_EVENTS: usize = 15;

    /// Number of distinct syndrome values (2^4)
    pub const NUM_SYNDROMES: usize = 1 << NUM_STABILIZERS;

    /// Largest syndrome value
    pub const MAX_SYNDROME: i64 = (NUM_SYNDROMES - 1) as i64;

    /// Stabilizer generators g1..g4, character i acts on qubit i
    ///
    /// Cyclic shifts of XZZXI. Syndrome bit k is the outcome of generator
    /// k, and the decoder table depends on this exact order.
    pub const STABILIZER_GENERATORS: [&str; NUM_STABILIZERS] =
        ["ZXIXZ", "XIXZZ", "IXZZX", "XZZXI"];

    /// Logical Z operator
    pub const LOGICAL_Z: &str = "ZZZZZ";

    /// Logical X operator
    pub const LOGICAL_X: &str = "XXXXX";
}

// ============================================================================
// Simulator Constants
// Gantree: simulator // state-vector defaults
// ============================================================================

pub mod simulator {
    //! Defaults for the state-vector simulator

    /// Default register capacity of the simulator
    pub const DEFAULT_MAX_QUBITS: usize = 12;

    /// Squared norm below which a projected state is considered empty
    pub const NORM_TOLERANCE: f64 = 1e-12;

    /// Seed used by deterministic configurations
    pub const DEFAULT_SEED: u64 = 42;
}

// ============================================================================
// Tests
// ============================================================================
