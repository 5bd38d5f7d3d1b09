//! Single-qubit Pauli error channel
//!
//! Gantree: L3_Code → ErrorChannel
//!
//! Draws one qubit uniformly from 0..=4 and one error type uniformly from
//! {X, Z, Y}, then applies that Pauli. Exactly one non-identity error is
//! applied per call.

use crate::randomness::RandomnessProvider;
use qec5_backend::QuantumBackend;
use qec5_core::{code, ErrorEvent, Gate, PauliOperator, QecError, QecResult};

/// Error injection
/// Gantree: ErrorChannel // inject_error(), apply_error()
pub struct ErrorChannel;

impl ErrorChannel {
    /// Draw a random single-qubit error without applying it
    /// Gantree: sample(randomness) -> ErrorEvent
    pub fn sample<R: RandomnessProvider + ?Sized>(randomness: &mut R) -> QecResult<ErrorEvent> {
        let qubit_high = (code::NUM_QUBITS - 1) as i64;
        let qubit = checked_draw(randomness, 0, qubit_high)?;

        let type_high = (PauliOperator::ERROR_TYPES.len() - 1) as i64;
        let kind = checked_draw(randomness, 0, type_high)?;

        ErrorEvent::new(qubit as usize, PauliOperator::ERROR_TYPES[kind as usize])
    }

    /// Draw a random error and apply it to the register
    /// Gantree: inject_error(register, randomness) -> ErrorEvent
    pub fn inject_error<B, R>(
        backend: &mut B,
        register: &mut B::Register,
        randomness: &mut R,
    ) -> QecResult<ErrorEvent>
    where
        B: QuantumBackend,
        R: RandomnessProvider + ?Sized,
    {
        let event = Self::sample(randomness)?;
        Self::apply_error(backend, register, &event)?;
        log::info!("Injected {} error on qubit {}", event.pauli(), event.qubit());
        Ok(event)
    }

    /// Apply a chosen error to the register
    /// Gantree: apply_error(register, event)
    pub fn apply_error<B: QuantumBackend>(
        backend: &mut B,
        register: &mut B::Register,
        event: &ErrorEvent,
    ) -> QecResult<()> {
        let gate = pauli_gate(event)?;
        backend.apply_gate(register, &gate)
    }
}

/// Gate implementing a single-qubit error or its correction
pub(crate) fn pauli_gate(event: &ErrorEvent) -> QecResult<Gate> {
    Gate::pauli(event.qubit(), event.pauli()).ok_or(QecError::IdentityError(event.qubit()))
}

fn checked_draw<R: RandomnessProvider + ?Sized>(
    randomness: &mut R,
    low: i64,
    high: i64,
) -> QecResult<i64> {
    let value = randomness.draw_int(low, high)?;
    if value < low || value > high {
        return Err(QecError::RandomOutOfRange { value, low, high });
    }
    Ok(value)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomness::{FixedSequence, SeededRandomness};
    use approx::assert_relative_eq;
    use qec5_backend::StateVectorBackend;
    use std::collections::HashSet;

    #[test]
    fn test_draw_mapping() {
        // second draw: 0 -> X, 1 -> Z, 2 -> Y
        let mut seq = FixedSequence::new([3, 0, 1, 1, 4, 2]);
        let a = ErrorChannel::sample(&mut seq).unwrap();
        let b = ErrorChannel::sample(&mut seq).unwrap();
        let c = ErrorChannel::sample(&mut seq).unwrap();
        assert_eq!(a, ErrorEvent::new(3, PauliOperator::X).unwrap());
        assert_eq!(b, ErrorEvent::new(1, PauliOperator::Z).unwrap());
        assert_eq!(c, ErrorEvent::new(4, PauliOperator::Y).unwrap());
    }

    #[test]
    fn test_out_of_range_draw_rejected() {
        let mut seq = FixedSequence::new([5, 0]);
        assert!(matches!(
            ErrorChannel::sample(&mut seq),
            Err(QecError::RandomOutOfRange { value: 5, low: 0, high: 4 })
        ));

        let mut seq = FixedSequence::new([0, 3]);
        assert!(matches!(
            ErrorChannel::sample(&mut seq),
            Err(QecError::RandomOutOfRange { value: 3, low: 0, high: 2 })
        ));
    }

    #[test]
    fn test_inject_applies_pauli() {
        let mut backend = StateVectorBackend::ideal();
        let mut reg = backend.allocate(code::NUM_QUBITS).unwrap();
        let mut seq = FixedSequence::new([2, 0]);

        let event = ErrorChannel::inject_error(&mut backend, &mut reg, &mut seq).unwrap();
        assert_eq!(event.qubit(), 2);
        assert_eq!(event.pauli(), PauliOperator::X);
        assert_relative_eq!(reg.probability_one(2).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_seeded_channel_covers_all_events() {
        let mut rng = SeededRandomness::with_seed(2024);
        let events: HashSet<ErrorEvent> = (0..600)
            .map(|_| ErrorChannel::sample(&mut rng).unwrap())
            .collect();
        assert_eq!(events.len(), code::NUM_ERROR_EVENTS);
    }
}
