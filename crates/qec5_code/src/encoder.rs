//! Logical encoding and decoding circuits
//!
//! Gantree: L3_Code → Encoder
//!
//! The logical qubit enters on qubit 4 with qubits 0-3 in |0⟩. The encoder
//! is a fixed 14-gate Clifford circuit mapping that product state into the
//! +1 eigenspace of all four generators, taking Z on qubit 4 to ZZZZZ. The
//! decoder is its exact inverse: gates reversed, S replaced by S†.

use qec5_backend::QuantumBackend;
use qec5_core::{code, Circuit, Gate, QecError, QecResult};

/// Encoding gate sequence on qubits 0-4
pub const ENCODER_GATES: [Gate; 14] = [
    Gate::H(0),
    Gate::S(0),
    Gate::Cy(0, 4),
    Gate::H(1),
    Gate::Cnot(1, 4),
    Gate::H(2),
    Gate::Cz(2, 0),
    Gate::Cz(2, 1),
    Gate::Cnot(2, 4),
    Gate::H(3),
    Gate::S(3),
    Gate::Cz(3, 0),
    Gate::Cz(3, 2),
    Gate::Cy(3, 4),
];

/// Encoder/decoder pair
/// Gantree: Encoder // encode(), decode()
#[derive(Debug, Clone)]
pub struct Encoder {
    encoding: Circuit,
    decoding: Circuit,
}

impl Encoder {
    /// Build the encoding circuit and its inverse
    pub fn new() -> QecResult<Self> {
        let mut encoding = Circuit::with_name(code::NUM_QUBITS, "encode_5q");
        encoding.add_gates(ENCODER_GATES)?;
        let mut decoding = encoding.inverse();
        decoding.set_name("decode_5q");

        Ok(Self { encoding, decoding })
    }

    /// Encoding circuit
    pub fn encoding_circuit(&self) -> &Circuit {
        &self.encoding
    }

    /// Decoding circuit
    pub fn decoding_circuit(&self) -> &Circuit {
        &self.decoding
    }

    /// Encoding circuit as OpenQASM 2.0
    pub fn to_qasm(&self) -> String {
        self.encoding.to_qasm()
    }

    /// Map the logical qubit on qubit 4 into the code space
    /// Gantree: encode(register)
    pub fn encode<B: QuantumBackend>(
        &self,
        backend: &mut B,
        register: &mut B::Register,
    ) -> QecResult<()> {
        check_register(backend, register)?;
        backend.apply_circuit(register, &self.encoding)
    }

    /// Map the code space back to a logical qubit on qubit 4
    /// Gantree: decode(register)
    pub fn decode<B: QuantumBackend>(
        &self,
        backend: &mut B,
        register: &mut B::Register,
    ) -> QecResult<()> {
        check_register(backend, register)?;
        backend.apply_circuit(register, &self.decoding)
    }
}

fn check_register<B: QuantumBackend>(backend: &B, register: &B::Register) -> QecResult<()> {
    let size = backend.register_size(register);
    if size != code::NUM_QUBITS {
        return Err(QecError::RegisterSizeMismatch {
            expected: code::NUM_QUBITS,
            actual: size,
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::FiveQubitCode;
    use approx::assert_relative_eq;
    use qec5_backend::StateVectorBackend;
    use qec5_core::PauliString;

    #[test]
    fn test_circuit_shape() {
        let encoder = Encoder::new().unwrap();
        assert_eq!(encoder.encoding_circuit().len(), 14);
        assert_eq!(encoder.encoding_circuit().count_2q(), 8);
        assert_eq!(encoder.decoding_circuit().count_by_name("sdg"), 2);
        assert_eq!(encoder.decoding_circuit().count_by_name("s"), 0);
        assert_eq!(encoder.decoding_circuit().gates()[0], Gate::Cy(3, 4));
    }

    #[test]
    fn test_inverse_of_inverse() {
        let encoder = Encoder::new().unwrap();
        let twice = encoder.decoding_circuit().inverse();
        assert_eq!(twice.gates(), encoder.encoding_circuit().gates());
        assert_eq!(twice.gates(), &ENCODER_GATES[..]);
    }

    #[test]
    fn test_qasm_export() {
        let qasm = Encoder::new().unwrap().to_qasm();
        assert!(qasm.starts_with("OPENQASM 2.0;"));
        assert!(qasm.contains("qreg q[5];"));
        assert_eq!(qasm.lines().count(), 3 + 14);
    }

    #[test]
    fn test_encoded_zero_is_stabilized() {
        let mut backend = StateVectorBackend::ideal();
        let mut reg = backend.allocate(code::NUM_QUBITS).unwrap();
        let encoder = Encoder::new().unwrap();
        encoder.encode(&mut backend, &mut reg).unwrap();

        let code = FiveQubitCode::standard().unwrap();
        for g in code.generators() {
            assert_relative_eq!(reg.expectation(g).unwrap(), 1.0, epsilon = 1e-10);
        }
        assert_relative_eq!(
            reg.expectation(code.logical_z()).unwrap(),
            1.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_encoded_one_flips_logical_z() {
        let mut backend = StateVectorBackend::ideal();
        let mut reg = backend.allocate(code::NUM_QUBITS).unwrap();
        backend.apply_gate(&mut reg, &Gate::X(4)).unwrap();
        Encoder::new().unwrap().encode(&mut backend, &mut reg).unwrap();

        let zzzzz = PauliString::parse(code::LOGICAL_Z).unwrap();
        assert_relative_eq!(reg.expectation(&zzzzz).unwrap(), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_round_trip_superposition() {
        let mut backend = StateVectorBackend::ideal();
        let mut reg = backend.allocate(code::NUM_QUBITS).unwrap();
        backend.apply_gate(&mut reg, &Gate::H(4)).unwrap();
        backend.apply_gate(&mut reg, &Gate::S(4)).unwrap();
        let reference = reg.clone();

        let encoder = Encoder::new().unwrap();
        encoder.encode(&mut backend, &mut reg).unwrap();
        assert!(reg.fidelity(&reference).unwrap() < 0.5);
        encoder.decode(&mut backend, &mut reg).unwrap();
        assert_relative_eq!(reg.fidelity(&reference).unwrap(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_wrong_register_size() {
        let mut backend = StateVectorBackend::ideal();
        let mut reg = backend.allocate(3).unwrap();
        let result = Encoder::new().unwrap().encode(&mut backend, &mut reg);
        assert!(matches!(
            result,
            Err(QecError::RegisterSizeMismatch { expected: 5, actual: 3 })
        ));
    }
}
