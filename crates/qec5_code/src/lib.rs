//! # QEC5 Code
//!
//! The [[5,1,3]] stabilizer code: encoding, single-qubit error injection,
//! syndrome extraction, lookup decoding, correction and logical readout.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qec5_code // L3: Code, L4: Pipeline
//!     L3_Code
//!         FiveQubitCode // generators, logicals, self-check
//!         Encoder // 14-gate Clifford encoder + inverse
//!         Randomness // RandomnessProvider, SeededRandomness, FixedSequence
//!         ErrorChannel // inject_error(), apply_error()
//!         SyndromeExtractor // measure g1..g4
//!         Decoder // 16-entry lookup table
//!         Corrector // apply_correction()
//!     L4_Pipeline
//!         Pipeline // one round, RoundReport
//!         PipelineConfig // serde config
//!         TrialRunner // repeated rounds, TrialStatistics
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qec5_code::prelude::*;
//!
//! let mut pipeline = PipelineConfig::deterministic(42).build_pipeline().unwrap();
//!
//! let event = ErrorEvent::new(1, PauliOperator::Z).unwrap();
//! let report = pipeline.run_with_error(LogicalState::Zero, Some(event)).unwrap();
//!
//! assert_eq!(report.syndrome.value(), 5);
//! assert!(report.success());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Stabilizer code definition (Gantree: L3_Code → FiveQubitCode)
pub mod code;

/// Encoding circuit (Gantree: L3_Code → Encoder)
pub mod encoder;

/// Randomness providers (Gantree: L3_Code → Randomness)
pub mod randomness;

/// Error injection (Gantree: L3_Code → ErrorChannel)
pub mod error_channel;

/// Syndrome measurement (Gantree: L3_Code → SyndromeExtractor)
pub mod syndrome;

/// Lookup decoder (Gantree: L3_Code → Decoder)
pub mod decoder;

/// Correction (Gantree: L3_Code → Corrector)
pub mod corrector;

/// Round pipeline (Gantree: L4_Pipeline → Pipeline)
pub mod pipeline;

/// Configuration (Gantree: L4_Pipeline → PipelineConfig)
pub mod config;

/// Multi-trial runs (Gantree: L4_Pipeline → TrialRunner)
pub mod trials;

// ============================================================================
// Re-exports
// ============================================================================

pub use code::FiveQubitCode;
pub use config::PipelineConfig;
pub use corrector::Corrector;
pub use decoder::{DecodeOutcome, Decoder, SyndromeTable};
pub use encoder::{Encoder, ENCODER_GATES};
pub use error_channel::ErrorChannel;
pub use pipeline::{ErrorInjection, Pipeline, PipelineStage, RoundReport};
pub use randomness::{FixedSequence, RandomnessProvider, SeededRandomness};
pub use syndrome::SyndromeExtractor;
pub use trials::{TrialRunner, TrialStatistics};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qec5_code::prelude::*;
    //! ```

    pub use crate::code::FiveQubitCode;
    pub use crate::config::PipelineConfig;
    pub use crate::corrector::Corrector;
    pub use crate::decoder::{DecodeOutcome, Decoder, SyndromeTable};
    pub use crate::encoder::Encoder;
    pub use crate::error_channel::ErrorChannel;
    pub use crate::pipeline::{ErrorInjection, Pipeline, PipelineStage, RoundReport};
    pub use crate::randomness::{FixedSequence, RandomnessProvider, SeededRandomness};
    pub use crate::syndrome::SyndromeExtractor;
    pub use crate::trials::{TrialRunner, TrialStatistics};

    pub use qec5_backend::{QuantumBackend, StateVector, StateVectorBackend};
    pub use qec5_core::{ErrorEvent, LogicalState, PauliOperator, QecError, QecResult, Syndrome};
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
    use approx::assert_relative_eq;
    use qec5_core::{code, Gate};
    use std::collections::HashSet;

    fn simulator_pipeline(seed: u64) -> Pipeline<StateVectorBackend, SeededRandomness> {
        PipelineConfig::deterministic(seed).build_pipeline().unwrap()
    }

    /// Prepare `gates` on qubit 4 of a fresh register
    fn prepared(backend: &mut StateVectorBackend, gates: &[Gate]) -> StateVector {
        let mut reg = backend.allocate(code::NUM_QUBITS).unwrap();
        for gate in gates {
            backend.apply_gate(&mut reg, gate).unwrap();
        }
        reg
    }

    #[test]
    fn test_decoder_bijection() {
        let qec = FiveQubitCode::standard().unwrap();
        let decoder = Decoder::new().unwrap();
        let mut syndromes = HashSet::new();

        for event in ErrorEvent::all() {
            let syndrome = qec.syndrome_of_event(&event).unwrap();
            let value = i64::from(syndrome.value());
            assert_eq!(decoder.decode_syndrome(value), DecodeOutcome::Error(event));
            syndromes.insert(syndrome.value());
        }
        assert_eq!(syndromes, (1..=15).collect::<HashSet<u8>>());
    }

    #[test]
    fn test_no_error_idempotence() {
        let mut pipeline = simulator_pipeline(1);
        for logical in LogicalState::ALL {
            let report = pipeline.run_with_error(logical, None).unwrap();
            assert_eq!(report.syndrome.value(), 0);
            assert_eq!(report.outcome, DecodeOutcome::NoError);
            assert!(!report.corrected);
            assert_eq!(report.recovered, Some(logical));
        }
    }

    #[test]
    fn test_round_trip_every_error_both_inputs() {
        let mut pipeline = simulator_pipeline(2);
        for logical in LogicalState::ALL {
            for event in ErrorEvent::all() {
                let report = pipeline.run_with_error(logical, Some(event)).unwrap();
                assert!(report.success(), "{} with input {}", event, logical);
                assert_eq!(report.ancillas_clean, Some(true));
                assert_eq!(report.outcome.error_event(), Some(event));
            }
        }
        assert_eq!(pipeline.rounds(), 30);
    }

    #[test]
    fn test_state_fidelity_after_correction() {
        let mut pipeline = simulator_pipeline(3);
        for event in ErrorEvent::all() {
            // |+i⟩ on the logical qubit exercises both X- and Z-type recovery
            let mut reg = prepared(pipeline.backend_mut(), &[Gate::H(4), Gate::S(4)]);
            let reference = reg.clone();

            pipeline
                .execute(&mut reg, ErrorInjection::Fixed(event))
                .unwrap();
            assert_relative_eq!(reg.fidelity(&reference).unwrap(), 1.0, epsilon = 1e-10);
            for ancilla in 0..code::LOGICAL_QUBIT {
                assert_relative_eq!(reg.probability_one(ancilla).unwrap(), 0.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_pauli_involution_on_register() {
        let mut backend = StateVectorBackend::ideal();
        let mut reg = prepared(&mut backend, &[Gate::H(4), Gate::S(4), Gate::H(2)]);
        let reference = reg.clone();

        for event in ErrorEvent::all() {
            ErrorChannel::apply_error(&mut backend, &mut reg, &event).unwrap();
            ErrorChannel::apply_error(&mut backend, &mut reg, &event).unwrap();
            assert_relative_eq!(reg.fidelity(&reference).unwrap(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_out_of_range_boundaries() {
        let decoder = Decoder::new().unwrap();
        assert!(decoder.decode_syndrome(16).is_out_of_range());
        assert!(decoder.decode_syndrome(-1).is_out_of_range());
        assert!(decoder.decode_syndrome(15).is_error());

        // Out-of-range outcomes never touch the register
        let mut backend = StateVectorBackend::ideal();
        let mut reg = backend.allocate(code::NUM_QUBITS).unwrap();
        let applied =
            Corrector::apply_correction(&mut backend, &mut reg, &decoder.decode_syndrome(16))
                .unwrap();
        assert!(!applied);
    }

    #[test]
    fn test_phase_flip_scenario() {
        let mut pipeline = simulator_pipeline(4);
        let event = ErrorEvent::new(1, PauliOperator::Z).unwrap();

        for logical in LogicalState::ALL {
            let report = pipeline.run_with_error(logical, Some(event)).unwrap();
            assert_eq!(report.syndrome.value(), 5);
            assert_eq!(report.outcome, DecodeOutcome::Error(event));
            assert!(report.corrected);
            assert_eq!(report.recovered, Some(logical));
            assert!(report.stages.contains(&PipelineStage::Corrected));
        }
    }

    #[test]
    fn test_encoder_inverse_on_superpositions() {
        let encoder = Encoder::new().unwrap();
        let mut backend = StateVectorBackend::ideal();

        for prep in [vec![Gate::H(4)], vec![Gate::H(4), Gate::S(4)]] {
            let mut reg = prepared(&mut backend, &prep);
            let reference = reg.clone();
            encoder.encode(&mut backend, &mut reg).unwrap();
            encoder.decode(&mut backend, &mut reg).unwrap();
            assert_relative_eq!(reg.fidelity(&reference).unwrap(), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_random_trials_always_recover() {
        let config = PipelineConfig::deterministic(2024).with_trials(45);
        let pipeline = config.build_pipeline().unwrap();
        let mut runner = TrialRunner::new(pipeline);

        let stats = runner.run(config.trials, LogicalState::One).unwrap();
        assert_eq!(stats.success_rate(), 1.0);
        assert_eq!(stats.identification_rate(), 1.0);
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let mut a = simulator_pipeline(77);
        let mut b = simulator_pipeline(77);
        for _ in 0..10 {
            let ra = a.run(LogicalState::Zero).unwrap();
            let rb = b.run(LogicalState::Zero).unwrap();
            assert_eq!(ra.injected, rb.injected);
            assert_eq!(ra.syndrome, rb.syndrome);
        }
    }
}
