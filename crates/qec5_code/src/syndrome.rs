//! Stabilizer syndrome extraction
//!
//! Gantree: L3_Code → SyndromeExtractor
//!
//! Measures the four generators as projective Pauli-product measurements on
//! the data register. On a code state hit by at most one Pauli error every
//! generator is an eigen-observable, so the measurement is deterministic
//! and leaves the state untouched.

use crate::code::FiveQubitCode;
use qec5_backend::QuantumBackend;
use qec5_core::{code, PauliString, QecError, QecResult, Syndrome};

/// Syndrome measurement
/// Gantree: SyndromeExtractor // measure_syndrome()
#[derive(Debug, Clone)]
pub struct SyndromeExtractor {
    generators: Vec<PauliString>,
}

impl SyndromeExtractor {
    /// Extractor for the generators of `code`
    pub fn new(code: &FiveQubitCode) -> QecResult<Self> {
        if code.generators().len() != code::NUM_STABILIZERS {
            return Err(QecError::CodeInconsistent(format!(
                "syndrome extraction needs {} generators, got {}",
                code::NUM_STABILIZERS,
                code.generators().len()
            )));
        }
        Ok(Self {
            generators: code.generators().to_vec(),
        })
    }

    /// Generators in measurement order
    pub fn generators(&self) -> &[PauliString] {
        &self.generators
    }

    /// Measure g1..g4 in order
    /// Gantree: measure_syndrome(register) -> Syndrome
    pub fn measure_syndrome<B: QuantumBackend>(
        &self,
        backend: &mut B,
        register: &mut B::Register,
    ) -> QecResult<Syndrome> {
        let mut bits = [false; code::NUM_STABILIZERS];
        for (k, generator) in self.generators.iter().enumerate() {
            bits[k] = backend.measure_pauli_product(register, generator)?;
            log::debug!("Stabilizer g{} = {}: {}", k + 1, generator, u8::from(bits[k]));
        }

        let syndrome = Syndrome::from_bits(bits);
        log::info!("Measured syndrome {}", syndrome);
        Ok(syndrome)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use crate::error_channel::ErrorChannel;
    use approx::assert_relative_eq;
    use qec5_backend::StateVectorBackend;
    use qec5_core::{ErrorEvent, PauliOperator};

    fn encoded(backend: &mut StateVectorBackend) -> qec5_backend::StateVector {
        let mut reg = backend.allocate(code::NUM_QUBITS).unwrap();
        Encoder::new().unwrap().encode(backend, &mut reg).unwrap();
        reg
    }

    #[test]
    fn test_clean_code_state_has_trivial_syndrome() {
        let code = FiveQubitCode::standard().unwrap();
        let extractor = SyndromeExtractor::new(&code).unwrap();
        let mut backend = StateVectorBackend::ideal().with_seed(3);
        let mut reg = encoded(&mut backend);
        let before = reg.clone();

        let syndrome = extractor.measure_syndrome(&mut backend, &mut reg).unwrap();
        assert!(syndrome.is_trivial());
        assert_relative_eq!(reg.fidelity(&before).unwrap(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_measured_syndrome_matches_formalism() {
        let code = FiveQubitCode::standard().unwrap();
        let extractor = SyndromeExtractor::new(&code).unwrap();
        let mut backend = StateVectorBackend::ideal().with_seed(3);

        for event in ErrorEvent::all() {
            let mut reg = encoded(&mut backend);
            ErrorChannel::apply_error(&mut backend, &mut reg, &event).unwrap();
            let measured = extractor.measure_syndrome(&mut backend, &mut reg).unwrap();
            let expected = code.syndrome_of_event(&event).unwrap();
            assert_eq!(measured, expected, "{}", event);
        }
    }

    #[test]
    fn test_phase_flip_qubit_1_gives_five() {
        let code = FiveQubitCode::standard().unwrap();
        let extractor = SyndromeExtractor::new(&code).unwrap();
        let mut backend = StateVectorBackend::ideal();
        let mut reg = encoded(&mut backend);
        let event = ErrorEvent::new(1, PauliOperator::Z).unwrap();
        ErrorChannel::apply_error(&mut backend, &mut reg, &event).unwrap();

        let syndrome = extractor.measure_syndrome(&mut backend, &mut reg).unwrap();
        assert_eq!(syndrome.bits(), [true, false, true, false]);
        assert_eq!(syndrome.value(), 5);
    }
}
