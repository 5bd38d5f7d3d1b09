//! Five-qubit stabilizer code definition
//!
//! Gantree: L3_Code → FiveQubitCode
//!
//! Holds the four stabilizer generators and the logical operators, and
//! computes syndromes in the stabilizer formalism: bit k of the syndrome of
//! a Pauli error is 1 iff the error anticommutes with generator k.

use qec5_core::{code, ErrorEvent, PauliString, QecError, QecResult, Syndrome};
use std::collections::HashSet;

/// The [[5,1,3]] code
/// Gantree: FiveQubitCode // generators + logicals
#[derive(Debug, Clone, PartialEq)]
pub struct FiveQubitCode {
    generators: Vec<PauliString>,
    logical_x: PauliString,
    logical_z: PauliString,
}

impl FiveQubitCode {
    /// Code with the standard generators (cyclic shifts of XZZXI)
    pub fn standard() -> QecResult<Self> {
        let generators = code::STABILIZER_GENERATORS
            .iter()
            .map(|s| PauliString::parse(s))
            .collect::<QecResult<Vec<_>>>()?;

        Ok(Self {
            generators,
            logical_x: PauliString::parse(code::LOGICAL_X)?,
            logical_z: PauliString::parse(code::LOGICAL_Z)?,
        })
    }

    /// Code from explicit generators and logical operators
    pub fn from_parts(
        generators: Vec<PauliString>,
        logical_x: PauliString,
        logical_z: PauliString,
    ) -> Self {
        Self {
            generators,
            logical_x,
            logical_z,
        }
    }

    /// Stabilizer generators g1..g4
    pub fn generators(&self) -> &[PauliString] {
        &self.generators
    }

    /// Logical X operator
    pub fn logical_x(&self) -> &PauliString {
        &self.logical_x
    }

    /// Logical Z operator
    pub fn logical_z(&self) -> &PauliString {
        &self.logical_z
    }

    /// Syndrome a Pauli error would produce
    /// Gantree: syndrome_of(error) -> Syndrome // anticommutation pattern
    pub fn syndrome_of(&self, error: &PauliString) -> QecResult<Syndrome> {
        let mut bits = [false; code::NUM_STABILIZERS];
        for (bit, generator) in bits.iter_mut().zip(&self.generators) {
            *bit = !generator.commutes_with(error)?;
        }
        Ok(Syndrome::from_bits(bits))
    }

    /// Syndrome of a single-qubit error event
    pub fn syndrome_of_event(&self, event: &ErrorEvent) -> QecResult<Syndrome> {
        self.syndrome_of(&event.to_pauli_string()?)
    }

    /// Check the algebraic invariants of the code
    /// Gantree: validate() -> Result // startup self-check
    ///
    /// - exactly four generators on five qubits
    /// - generators commute pairwise and with both logical operators
    /// - the logical operators anticommute with each other
    /// - the 15 single-qubit errors have distinct, nonzero syndromes
    pub fn validate(&self) -> QecResult<()> {
        if self.generators.len() != code::NUM_STABILIZERS {
            return Err(QecError::CodeInconsistent(format!(
                "expected {} generators, got {}",
                code::NUM_STABILIZERS,
                self.generators.len()
            )));
        }

        for g in self.generators.iter().chain([&self.logical_x, &self.logical_z]) {
            if g.len() != code::NUM_QUBITS {
                return Err(QecError::CodeInconsistent(format!(
                    "operator {} does not span {} qubits",
                    g,
                    code::NUM_QUBITS
                )));
            }
        }

        for (i, a) in self.generators.iter().enumerate() {
            for b in &self.generators[i + 1..] {
                if !a.commutes_with(b)? {
                    return Err(QecError::CodeInconsistent(format!(
                        "generators {} and {} anticommute",
                        a, b
                    )));
                }
            }
            for logical in [&self.logical_x, &self.logical_z] {
                if !a.commutes_with(logical)? {
                    return Err(QecError::CodeInconsistent(format!(
                        "generator {} anticommutes with logical {}",
                        a, logical
                    )));
                }
            }
        }

        if self.logical_x.commutes_with(&self.logical_z)? {
            return Err(QecError::CodeInconsistent(format!(
                "logical operators {} and {} commute",
                self.logical_x, self.logical_z
            )));
        }

        let mut seen = HashSet::new();
        for event in ErrorEvent::all() {
            let syndrome = self.syndrome_of_event(&event)?;
            if syndrome.is_trivial() {
                return Err(QecError::CodeInconsistent(format!(
                    "error {} is not detected",
                    event
                )));
            }
            if !seen.insert(syndrome.value()) {
                return Err(QecError::CodeInconsistent(format!(
                    "error {} shares syndrome {} with another error",
                    event, syndrome
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
