//! One error-correction round
//!
//! Gantree: L4_Pipeline → Pipeline
//!
//! Allocated → Encoded → Corrupted → SyndromeMeasured → {Corrected | Unchanged}
//! → Decoded → Reset. The register is reset even when a step in between
//! fails; the first error is the one returned.

use crate::code::FiveQubitCode;
use crate::corrector::Corrector;
use crate::decoder::{DecodeOutcome, Decoder, SyndromeTable};
use crate::encoder::Encoder;
use crate::error_channel::ErrorChannel;
use crate::randomness::RandomnessProvider;
use crate::syndrome::SyndromeExtractor;
use qec5_backend::QuantumBackend;
use qec5_core::{code, ErrorEvent, Gate, LogicalState, QecResult, Syndrome};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineStage {
    /// Register allocated in |00000⟩ (plus logical preparation)
    Allocated,
    /// Encoder applied
    Encoded,
    /// Error channel applied
    Corrupted,
    /// Four generators measured
    SyndromeMeasured,
    /// Decoded error undone
    Corrected,
    /// No correction (trivial or out-of-range syndrome)
    Unchanged,
    /// Encoder inverse applied
    Decoded,
    /// Register returned to |00000⟩
    Reset,
}

/// How the Corrupted stage picks its error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorInjection {
    /// Draw from the randomness provider
    Random,
    /// Apply this error
    Fixed(ErrorEvent),
    /// Leave the code block untouched
    None,
}

impl From<Option<ErrorEvent>> for ErrorInjection {
    fn from(event: Option<ErrorEvent>) -> Self {
        match event {
            Some(event) => ErrorInjection::Fixed(event),
            None => ErrorInjection::None,
        }
    }
}

/// Result of one round
/// Gantree: RoundReport // injected, syndrome, outcome, recovered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Logical value prepared on qubit 4
    pub logical_input: Option<LogicalState>,

    /// Error applied in the Corrupted stage
    pub injected: Option<ErrorEvent>,

    /// Measured syndrome
    pub syndrome: Syndrome,

    /// Decoder verdict
    pub outcome: DecodeOutcome,

    /// Whether a correction gate was applied
    pub corrected: bool,

    /// Logical value read back after decoding
    pub recovered: Option<LogicalState>,

    /// Whether qubits 0-3 read back as |0000⟩
    pub ancillas_clean: Option<bool>,

    /// Stages visited in order
    pub stages: Vec<PipelineStage>,
}

impl RoundReport {
    fn new() -> Self {
        Self {
            logical_input: None,
            injected: None,
            syndrome: Syndrome::default(),
            outcome: DecodeOutcome::NoError,
            corrected: false,
            recovered: None,
            ancillas_clean: None,
            stages: vec![PipelineStage::Allocated],
        }
    }

    /// Recovered logical value equals the input and the ancillas are clean
    pub fn success(&self) -> bool {
        self.recovered.is_some()
            && self.recovered == self.logical_input
            && self.ancillas_clean != Some(false)
    }

    /// Decoder named exactly the injected error
    pub fn identified(&self) -> bool {
        self.outcome.error_event() == self.injected
    }

    /// Last stage reached
    pub fn final_stage(&self) -> Option<PipelineStage> {
        self.stages.last().copied()
    }
}

impl fmt::Display for RoundReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |s: Option<LogicalState>| s.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
        let injected = self
            .injected
            .map(|e| e.to_string())
            .unwrap_or_else(|| "none".to_string());
        write!(
            f,
            "RoundReport(input={}, injected={}, syndrome={}, decoded={}, recovered={})",
            show(self.logical_input),
            injected,
            self.syndrome,
            self.outcome,
            show(self.recovered)
        )
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Error-correction pipeline over a backend and a randomness provider
/// Gantree: Pipeline // run(), run_with_error()
pub struct Pipeline<B: QuantumBackend, R: RandomnessProvider> {
    backend: B,
    randomness: R,
    code: FiveQubitCode,
    encoder: Encoder,
    extractor: SyndromeExtractor,
    decoder: Decoder,
    verbose: bool,
    rounds: u64,
}

impl<B: QuantumBackend, R: RandomnessProvider> Pipeline<B, R> {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Build a pipeline, checking the code and decoder table first
    pub fn new(backend: B, randomness: R) -> QecResult<Self> {
        let code = FiveQubitCode::standard()?;
        code.validate()?;
        let decoder = Decoder::for_code(&code)?;
        Self::assemble(backend, randomness, code, decoder)
    }

    /// Build a pipeline without the consistency check
    pub fn unchecked(backend: B, randomness: R) -> QecResult<Self> {
        let code = FiveQubitCode::standard()?;
        let decoder = Decoder::from_table(SyndromeTable::standard()?);
        Self::assemble(backend, randomness, code, decoder)
    }

    fn assemble(backend: B, randomness: R, code: FiveQubitCode, decoder: Decoder) -> QecResult<Self> {
        let extractor = SyndromeExtractor::new(&code)?;
        log::debug!("Pipeline assembled on backend {}", backend.name());
        Ok(Self {
            backend,
            randomness,
            code,
            encoder: Encoder::new()?,
            extractor,
            decoder,
            verbose: false,
            rounds: 0,
        })
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable backend, for preparing or inspecting registers
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Code definition
    pub fn code(&self) -> &FiveQubitCode {
        &self.code
    }

    /// Encoder
    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Decoder
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Completed rounds
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    // ========================================================================
    // Rounds
    // ========================================================================

    /// Run one round with a random single-qubit error
    /// Gantree: run(logical) -> RoundReport
    pub fn run(&mut self, logical: LogicalState) -> QecResult<RoundReport> {
        self.run_round(logical, ErrorInjection::Random)
    }

    /// Run one round with a chosen error, or none
    /// Gantree: run_with_error(logical, event) -> RoundReport
    pub fn run_with_error(
        &mut self,
        logical: LogicalState,
        event: Option<ErrorEvent>,
    ) -> QecResult<RoundReport> {
        self.run_round(logical, event.into())
    }

    /// Allocate, prepare, execute, read out and reset
    pub fn run_round(
        &mut self,
        logical: LogicalState,
        injection: ErrorInjection,
    ) -> QecResult<RoundReport> {
        let mut register = self.backend.allocate(code::NUM_QUBITS)?;
        if self.verbose {
            println!("Pipeline: Round {} (input {})", self.rounds + 1, logical);
        }

        let result = self.prepare_and_execute(&mut register, logical, injection);
        let reset = self.backend.reset(&mut register);

        let mut report = result?;
        reset?;
        report.stages.push(PipelineStage::Reset);
        self.rounds += 1;

        if self.verbose {
            println!("Pipeline: {}", report);
        }
        Ok(report)
    }

    fn prepare_and_execute(
        &mut self,
        register: &mut B::Register,
        logical: LogicalState,
        injection: ErrorInjection,
    ) -> QecResult<RoundReport> {
        if logical.as_bit() {
            self.backend
                .apply_gate(register, &Gate::X(code::LOGICAL_QUBIT))?;
        }

        let mut report = self.execute(register, injection)?;
        report.logical_input = Some(logical);

        let (recovered, ancillas_clean) = self.read_out(register)?;
        report.recovered = Some(recovered);
        report.ancillas_clean = Some(ancillas_clean);
        Ok(report)
    }

    /// Encode → corrupt → measure → correct → decode on a prepared register
    ///
    /// The register must hold the logical input on qubit 4 and |0⟩ on the
    /// others. It is left decoded, not reset.
    pub fn execute(
        &mut self,
        register: &mut B::Register,
        injection: ErrorInjection,
    ) -> QecResult<RoundReport> {
        let mut report = RoundReport::new();

        if self.verbose {
            println!("Pipeline: Encoding...");
        }
        self.encoder.encode(&mut self.backend, register)?;
        report.stages.push(PipelineStage::Encoded);

        report.injected = match injection {
            ErrorInjection::Random => Some(ErrorChannel::inject_error(
                &mut self.backend,
                register,
                &mut self.randomness,
            )?),
            ErrorInjection::Fixed(event) => {
                ErrorChannel::apply_error(&mut self.backend, register, &event)?;
                log::info!("Injected {} error on qubit {}", event.pauli(), event.qubit());
                Some(event)
            }
            ErrorInjection::None => None,
        };
        report.stages.push(PipelineStage::Corrupted);

        if self.verbose {
            println!("Pipeline: Measuring syndrome...");
        }
        report.syndrome = self.extractor.measure_syndrome(&mut self.backend, register)?;
        report.stages.push(PipelineStage::SyndromeMeasured);

        report.outcome = self.decoder.decode_syndrome(i64::from(report.syndrome.value()));
        report.corrected = Corrector::apply_correction(&mut self.backend, register, &report.outcome)?;
        report.stages.push(if report.corrected {
            PipelineStage::Corrected
        } else {
            PipelineStage::Unchanged
        });

        if self.verbose {
            println!("Pipeline: Decoding...");
        }
        self.encoder.decode(&mut self.backend, register)?;
        report.stages.push(PipelineStage::Decoded);

        Ok(report)
    }

    /// Z-measure the logical qubit and the ancillas of a decoded register
    pub fn read_out(&mut self, register: &mut B::Register) -> QecResult<(LogicalState, bool)> {
        let logical = self.backend.measure_qubit(register, code::LOGICAL_QUBIT)?;
        let mut clean = true;
        for qubit in 0..code::LOGICAL_QUBIT {
            if self.backend.measure_qubit(register, qubit)? {
                clean = false;
            }
        }
        Ok((LogicalState::from_bit(logical), clean))
    }
}

// ============================================================================
// Tests
// ============================================================================
