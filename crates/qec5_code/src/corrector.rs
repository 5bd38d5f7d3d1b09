//! Error correction
//!
//! Gantree: L3_Code → Corrector
//!
//! Every Pauli is its own inverse, so the correction for an identified
//! error is the same Pauli on the same qubit.

use crate::decoder::DecodeOutcome;
use crate::error_channel::pauli_gate;
use qec5_backend::QuantumBackend;
use qec5_core::QecResult;

/// Correction step
/// Gantree: Corrector // apply_correction()
pub struct Corrector;

impl Corrector {
    /// Undo the decoded error, if any
    /// Gantree: apply_correction(register, outcome) -> bool
    ///
    /// Returns whether a gate was applied. `NoError` and `OutOfRange` leave
    /// the register unchanged.
    pub fn apply_correction<B: QuantumBackend>(
        backend: &mut B,
        register: &mut B::Register,
        outcome: &DecodeOutcome,
    ) -> QecResult<bool> {
        let event = match outcome {
            DecodeOutcome::Error(event) => event,
            DecodeOutcome::NoError | DecodeOutcome::OutOfRange(_) => return Ok(false),
        };

        backend.apply_gate(register, &pauli_gate(event)?)?;
        log::info!("Applied {} correction on qubit {}", event.pauli(), event.qubit());
        Ok(true)
    }
}

// ============================================================================
// Tests
// ============================================================================
