//! Core types for QEC5
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Pauli operators, Pauli strings, error events, syndromes and logical
//! basis states shared by every layer of the code simulator.

use crate::constants::code;
use crate::error::{QecError, QecResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

// ============================================================================
// PauliOperator
// ============================================================================

/// Single-qubit Pauli operator
/// Gantree: PauliOperator // I, X, Y, Z
///
/// A value describing a stabilizer factor or an error, not a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOperator {
    /// Identity
    I,
    /// Bit flip
    X,
    /// Bit and phase flip
    Y,
    /// Phase flip
    Z,
}

impl PauliOperator {
    /// Error types in the order the error channel draws them
    pub const ERROR_TYPES: [PauliOperator; 3] =
        [PauliOperator::X, PauliOperator::Z, PauliOperator::Y];

    /// Parse from a character (case-insensitive)
    pub fn from_char(c: char) -> QecResult<Self> {
        match c.to_ascii_uppercase() {
            'I' => Ok(PauliOperator::I),
            'X' => Ok(PauliOperator::X),
            'Y' => Ok(PauliOperator::Y),
            'Z' => Ok(PauliOperator::Z),
            _ => Err(QecError::InvalidPauli(c)),
        }
    }

    /// Convert to character representation
    pub fn to_char(self) -> char {
        match self {
            PauliOperator::I => 'I',
            PauliOperator::X => 'X',
            PauliOperator::Y => 'Y',
            PauliOperator::Z => 'Z',
        }
    }

    /// Check for the identity
    pub fn is_identity(self) -> bool {
        self == PauliOperator::I
    }

    /// Has an X component (X or Y)
    pub fn has_x(self) -> bool {
        matches!(self, PauliOperator::X | PauliOperator::Y)
    }

    /// Has a Z component (Z or Y)
    pub fn has_z(self) -> bool {
        matches!(self, PauliOperator::Z | PauliOperator::Y)
    }

    /// Check if two single-qubit Paulis commute
    ///
    /// Distinct non-identity Paulis anticommute; everything else commutes.
    pub fn commutes_with(self, other: PauliOperator) -> bool {
        self.is_identity() || other.is_identity() || self == other
    }
}

impl fmt::Display for PauliOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for PauliOperator {
    type Error = QecError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c)
    }
}

// ============================================================================
// PauliString
// ============================================================================

/// Tensor product of single-qubit Paulis, one per qubit
/// Gantree: PauliString // StabilizerGenerator
///
/// Character `i` of the textual form acts on qubit `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliString {
    paulis: Vec<PauliOperator>,
}

impl PauliString {
    /// Create from a vector of Paulis
    pub fn new(paulis: Vec<PauliOperator>) -> Self {
        Self { paulis }
    }

    /// Parse from string (e.g., "XZZXI")
    /// Gantree: parse(s) -> Self
    pub fn parse(s: &str) -> QecResult<Self> {
        let paulis = s
            .chars()
            .map(PauliOperator::from_char)
            .collect::<QecResult<Vec<_>>>()?;
        Ok(Self { paulis })
    }

    /// Single non-identity factor on `qubit`, identity elsewhere
    pub fn single(n: usize, qubit: QubitId, pauli: PauliOperator) -> QecResult<Self> {
        if qubit >= n {
            return Err(QecError::QubitOutOfRange {
                qubit,
                max: n.saturating_sub(1),
            });
        }
        let mut paulis = vec![PauliOperator::I; n];
        paulis[qubit] = pauli;
        Ok(Self { paulis })
    }

    /// Number of qubits the string spans
    pub fn len(&self) -> usize {
        self.paulis.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.paulis.is_empty()
    }

    /// Pauli acting on `qubit`
    pub fn get(&self, qubit: QubitId) -> Option<PauliOperator> {
        self.paulis.get(qubit).copied()
    }

    /// Paulis as a slice
    pub fn paulis(&self) -> &[PauliOperator] {
        &self.paulis
    }

    /// Iterate over `(qubit, pauli)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, PauliOperator)> + '_ {
        self.paulis.iter().copied().enumerate()
    }

    /// Number of non-identity factors
    pub fn weight(&self) -> usize {
        self.paulis.iter().filter(|p| !p.is_identity()).count()
    }

    /// Qubits carrying a non-identity factor
    pub fn support(&self) -> Vec<QubitId> {
        self.iter()
            .filter(|(_, p)| !p.is_identity())
            .map(|(q, _)| q)
            .collect()
    }

    /// Check if two Pauli strings commute
    /// Gantree: commutes_with(&other) -> Result<bool>
    ///
    /// Strings commute iff they anticommute on an even number of qubits.
    pub fn commutes_with(&self, other: &PauliString) -> QecResult<bool> {
        if self.len() != other.len() {
            return Err(QecError::PauliLengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }

        let anticommuting = self
            .paulis
            .iter()
            .zip(&other.paulis)
            .filter(|(a, b)| !a.commutes_with(**b))
            .count();

        Ok(anticommuting % 2 == 0)
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.paulis {
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for PauliString {
    type Err = QecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// ErrorEvent
// ============================================================================

/// Single-qubit Pauli error on the code block
/// Gantree: ErrorEvent // (qubit, pauli)
///
/// Only constructible through [`ErrorEvent::new`], so the qubit is always
/// in 0..=4 and the Pauli is never the identity. Deserialization goes
/// through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawErrorEvent")]
pub struct ErrorEvent {
    qubit: QubitId,
    pauli: PauliOperator,
}

/// Unchecked wire form of an [`ErrorEvent`]
#[derive(Deserialize)]
struct RawErrorEvent {
    qubit: QubitId,
    pauli: PauliOperator,
}

impl TryFrom<RawErrorEvent> for ErrorEvent {
    type Error = QecError;

    fn try_from(raw: RawErrorEvent) -> QecResult<Self> {
        ErrorEvent::new(raw.qubit, raw.pauli)
    }
}

impl ErrorEvent {
    /// Create a validated error event
    pub fn new(qubit: QubitId, pauli: PauliOperator) -> QecResult<Self> {
        if qubit >= code::NUM_QUBITS {
            return Err(QecError::QubitOutOfRange {
                qubit,
                max: code::NUM_QUBITS - 1,
            });
        }
        if pauli.is_identity() {
            return Err(QecError::IdentityError(qubit));
        }
        Ok(Self { qubit, pauli })
    }

    /// All 15 correctable events, qubit-major, X/Z/Y per qubit
    pub fn all() -> Vec<ErrorEvent> {
        (0..code::NUM_QUBITS)
            .flat_map(|qubit| {
                PauliOperator::ERROR_TYPES
                    .into_iter()
                    .map(move |pauli| ErrorEvent { qubit, pauli })
            })
            .collect()
    }

    /// Affected qubit (0..=4)
    pub fn qubit(&self) -> QubitId {
        self.qubit
    }

    /// Error type (X, Y or Z)
    pub fn pauli(&self) -> PauliOperator {
        self.pauli
    }

    /// Error as a Pauli string on the code block
    pub fn to_pauli_string(&self) -> QecResult<PauliString> {
        PauliString::single(code::NUM_QUBITS, self.qubit, self.pauli)
    }
}

impl fmt::Display for ErrorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on qubit {}", self.pauli, self.qubit)
    }
}

// ============================================================================
// Syndrome
// ============================================================================

/// Outcomes of the four stabilizer measurements
/// Gantree: Syndrome // 4 bits, s4 = MSB
///
/// `bits[k]` is the outcome of generator `k + 1`; `true` means eigenvalue -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Syndrome {
    bits: [bool; code::NUM_STABILIZERS],
}

impl Syndrome {
    /// Create from raw bits (syndrome1 first)
    pub fn from_bits(bits: [bool; code::NUM_STABILIZERS]) -> Self {
        Self { bits }
    }

    /// Create from a 4-bit value
    pub fn from_value(value: i64) -> QecResult<Self> {
        if !(0..=code::MAX_SYNDROME).contains(&value) {
            return Err(QecError::SyndromeOutOfRange(value));
        }
        let mut bits = [false; code::NUM_STABILIZERS];
        for (k, bit) in bits.iter_mut().enumerate() {
            *bit = (value >> k) & 1 == 1;
        }
        Ok(Self { bits })
    }

    /// Raw bits, syndrome1 first
    pub fn bits(&self) -> [bool; code::NUM_STABILIZERS] {
        self.bits
    }

    /// Combined value in [0, 15]
    /// Gantree: value() -> u8 // s4*8 + s3*4 + s2*2 + s1
    pub fn value(&self) -> u8 {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(k, _)| 1u8 << k)
            .sum()
    }

    /// True when every generator reported +1
    pub fn is_trivial(&self) -> bool {
        self.bits.iter().all(|&b| !b)
    }
}

impl fmt::Display for Syndrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Most significant (syndrome4) first
        for &b in self.bits.iter().rev() {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        write!(f, " ({})", self.value())
    }
}

// ============================================================================
// LogicalState
// ============================================================================

/// Logical basis value carried through a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogicalState {
    /// |0⟩
    #[default]
    Zero,
    /// |1⟩
    One,
}

impl LogicalState {
    /// Both basis values
    pub const ALL: [LogicalState; 2] = [LogicalState::Zero, LogicalState::One];

    /// From a classical bit
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            LogicalState::One
        } else {
            LogicalState::Zero
        }
    }

    /// As a classical bit
    pub fn as_bit(&self) -> bool {
        matches!(self, LogicalState::One)
    }
}

impl fmt::Display for LogicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalState::Zero => write!(f, "|0⟩"),
            LogicalState::One => write!(f, "|1⟩"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
