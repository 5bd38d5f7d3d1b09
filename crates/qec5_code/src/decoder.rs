//! Syndrome lookup decoder
//!
//! Gantree: L3_Code → Decoder
//!
//! Maps each of the 16 syndrome values to the single-qubit error that
//! produces it. The table is a bijection between the 15 nonzero syndromes
//! and the 15 single-qubit Pauli errors; syndrome 0 means no error.

use crate::code::FiveQubitCode;
use qec5_core::{code, ErrorEvent, PauliOperator, PauliString, QecError, QecResult};
use qec5_core::PauliOperator::{X, Y, Z};
use serde::{Deserialize, Serialize};
use std::fmt;

/// (syndrome, qubit, error) for every nonzero syndrome
const SYNDROME_TABLE_ENTRIES: [(usize, usize, PauliOperator); code::NUM_ERROR_EVENTS] = [
    (1, 0, X),
    (10, 0, Z),
    (11, 0, Y),
    (8, 1, X),
    (5, 1, Z),
    (13, 1, Y),
    (12, 2, X),
    (2, 2, Z),
    (14, 2, Y),
    (6, 3, X),
    (9, 3, Z),
    (15, 3, Y),
    (3, 4, X),
    (4, 4, Z),
    (7, 4, Y),
];

// ============================================================================
// DecodeOutcome
// ============================================================================

/// Decoder verdict for one syndrome value
/// Gantree: DecodeOutcome // NoError | Error(event) | OutOfRange(value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecodeOutcome {
    /// Syndrome 0
    NoError,

    /// Single-qubit error identified
    Error(ErrorEvent),

    /// Value outside 0..=15; nothing is corrected
    OutOfRange(i64),
}

impl DecodeOutcome {
    /// Identified error, if any
    pub fn error_event(&self) -> Option<ErrorEvent> {
        match self {
            DecodeOutcome::Error(event) => Some(*event),
            _ => None,
        }
    }

    /// Check if a correction is required
    pub fn is_error(&self) -> bool {
        matches!(self, DecodeOutcome::Error(_))
    }

    /// Check if the input was not a valid syndrome
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, DecodeOutcome::OutOfRange(_))
    }
}

impl fmt::Display for DecodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeOutcome::NoError => write!(f, "no error"),
            DecodeOutcome::Error(event) => write!(f, "{}", event),
            DecodeOutcome::OutOfRange(value) => write!(f, "out of range ({})", value),
        }
    }
}

// ============================================================================
// SyndromeTable
// ============================================================================

/// Syndrome value -> error lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyndromeTable {
    entries: [Option<ErrorEvent>; code::NUM_SYNDROMES],
}

impl SyndromeTable {
    /// Fixed table for the standard generators
    pub fn standard() -> QecResult<Self> {
        let mut entries = [None; code::NUM_SYNDROMES];
        for (value, qubit, pauli) in SYNDROME_TABLE_ENTRIES {
            entries[value] = Some(ErrorEvent::new(qubit, pauli)?);
        }
        Ok(Self { entries })
    }

    /// Build the table from generators by anticommutation
    ///
    /// Fails if a single-qubit error goes undetected or two errors collide.
    pub fn derive(generators: &[PauliString]) -> QecResult<Self> {
        if generators.len() != code::NUM_STABILIZERS {
            return Err(QecError::CodeInconsistent(format!(
                "expected {} generators, got {}",
                code::NUM_STABILIZERS,
                generators.len()
            )));
        }

        let mut entries = [None; code::NUM_SYNDROMES];
        for event in ErrorEvent::all() {
            let error = event.to_pauli_string()?;
            let mut value = 0usize;
            for (k, generator) in generators.iter().enumerate() {
                if !generator.commutes_with(&error)? {
                    value |= 1 << k;
                }
            }

            if value == 0 {
                return Err(QecError::CodeInconsistent(format!(
                    "error {} is not detected",
                    event
                )));
            }
            if let Some(existing) = entries[value] {
                return Err(QecError::CodeInconsistent(format!(
                    "errors {} and {} share syndrome {}",
                    existing, event, value
                )));
            }
            entries[value] = Some(event);
        }
        Ok(Self { entries })
    }

    /// Check this table against the one derived from the code's generators
    pub fn verify_against(&self, qec_code: &FiveQubitCode) -> QecResult<()> {
        let derived = Self::derive(qec_code.generators())?;
        for value in 0..code::NUM_SYNDROMES {
            if self.entries[value] != derived.entries[value] {
                return Err(QecError::CodeInconsistent(format!(
                    "syndrome {} decodes to {:?} but generators give {:?}",
                    value, self.entries[value], derived.entries[value]
                )));
            }
        }
        Ok(())
    }

    /// Error for a syndrome value
    pub fn lookup(&self, value: i64) -> DecodeOutcome {
        if !(0..=code::MAX_SYNDROME).contains(&value) {
            return DecodeOutcome::OutOfRange(value);
        }
        match self.entries[value as usize] {
            Some(event) => DecodeOutcome::Error(event),
            None => DecodeOutcome::NoError,
        }
    }

    /// Syndrome value for an error, if it is in the table
    pub fn syndrome_of(&self, event: &ErrorEvent) -> Option<u8> {
        self.entries
            .iter()
            .position(|entry| entry.as_ref() == Some(event))
            .map(|value| value as u8)
    }

    /// Nonzero (syndrome, error) pairs in syndrome order
    pub fn iter(&self) -> impl Iterator<Item = (u8, ErrorEvent)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(value, entry)| entry.map(|event| (value as u8, event)))
    }
}

// ============================================================================
// Decoder
// ============================================================================

/// Lookup-table decoder
/// Gantree: Decoder // decode_syndrome(value) -> DecodeOutcome
#[derive(Debug, Clone)]
pub struct Decoder {
    table: SyndromeTable,
}

impl Decoder {
    /// Decoder for the standard code, checked against its generators
    pub fn new() -> QecResult<Self> {
        Self::for_code(&FiveQubitCode::standard()?)
    }

    /// Decoder using the standard table, checked against `qec_code`
    pub fn for_code(qec_code: &FiveQubitCode) -> QecResult<Self> {
        let table = SyndromeTable::standard()?;
        table.verify_against(qec_code)?;
        Ok(Self { table })
    }

    /// Decoder over an arbitrary table, without checks
    pub fn from_table(table: SyndromeTable) -> Self {
        Self { table }
    }

    /// Lookup table
    pub fn table(&self) -> &SyndromeTable {
        &self.table
    }

    /// Decode a syndrome value
    /// Gantree: decode_syndrome(value) -> DecodeOutcome
    ///
    /// Values outside 0..=15 are reported and produce no correction.
    pub fn decode_syndrome(&self, value: i64) -> DecodeOutcome {
        let outcome = self.table.lookup(value);
        match outcome {
            DecodeOutcome::NoError => log::info!("Syndrome {}: no error detected", value),
            DecodeOutcome::Error(event) => log::info!(
                "Syndrome {}: {} error on qubit {}",
                value,
                event.pauli(),
                event.qubit()
            ),
            DecodeOutcome::OutOfRange(_) => {
                log::warn!("{}", QecError::SyndromeOutOfRange(value))
            }
        }
        outcome
    }
}

// ============================================================================
// Tests
// ============================================================================
