//! State-vector simulator backend for QEC5
//!
//! Gantree: L2_Backend → StateVectorBackend
//!
//! Exact dense simulation of small registers. Qubit `q` is bit `q` of the
//! basis-state index. Pauli-product measurements are genuine projective
//! measurements: the state is projected with (1 ± P)/2 and renormalized.

use crate::execution::{ExecutionStats, QuantumBackend};
use num_complex::Complex64;
use qec5_core::{simulator, Gate, PauliOperator, PauliString, QecError, QecResult, QubitId};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::fmt;

// ============================================================================
// StateVector
// ============================================================================

/// Dense state vector of a qubit register
/// Gantree: StateVector // QubitRegister
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// Number of qubits
    num_qubits: usize,

    /// 2^n amplitudes, basis index bit q = qubit q
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    /// Create |0...0⟩ on `num_qubits` qubits
    pub fn zero(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            num_qubits,
            amplitudes,
        }
    }

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// All amplitudes
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of one basis state
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Squared norm (1 for a valid state)
    pub fn norm_squared(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Probability of reading 1 on `qubit`
    pub fn probability_one(&self, qubit: QubitId) -> QecResult<f64> {
        self.check_qubit(qubit)?;
        let mask = 1 << qubit;
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum())
    }

    /// Expectation value ⟨ψ|P|ψ⟩ of a Pauli string
    /// Gantree: expectation(pauli) -> f64 // no collapse
    pub fn expectation(&self, pauli: &PauliString) -> QecResult<f64> {
        let image = self.pauli_image(pauli)?;
        Ok(inner_product(&self.amplitudes, &image).re)
    }

    /// Fidelity |⟨self|other⟩|² with another state of the same width
    pub fn fidelity(&self, other: &StateVector) -> QecResult<f64> {
        if self.num_qubits != other.num_qubits {
            return Err(QecError::RegisterSizeMismatch {
                expected: self.num_qubits,
                actual: other.num_qubits,
            });
        }
        Ok(inner_product(&self.amplitudes, &other.amplitudes).norm_sqr())
    }

    /// Most probable basis state and its probability
    pub fn most_probable(&self) -> (usize, f64) {
        self.amplitudes
            .iter()
            .map(|a| a.norm_sqr())
            .enumerate()
            .fold((0, 0.0), |best, (i, p)| if p > best.1 { (i, p) } else { best })
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn check_qubit(&self, qubit: QubitId) -> QecResult<()> {
        if qubit >= self.num_qubits {
            return Err(QecError::QubitOutOfRange {
                qubit,
                max: self.num_qubits.saturating_sub(1),
            });
        }
        Ok(())
    }

    /// P|ψ⟩ for a Pauli string spanning the whole register
    ///
    /// P = i^{#Y} X^x Z^z, so basis state |b⟩ maps to
    /// i^{#Y} (-1)^{popcount(b & z)} |b ^ x⟩.
    fn pauli_image(&self, pauli: &PauliString) -> QecResult<Vec<Complex64>> {
        if pauli.len() != self.num_qubits {
            return Err(QecError::RegisterSizeMismatch {
                expected: pauli.len(),
                actual: self.num_qubits,
            });
        }

        let mut x_mask = 0usize;
        let mut z_mask = 0usize;
        let mut num_y = 0usize;
        for (q, p) in pauli.iter() {
            if p.has_x() {
                x_mask |= 1 << q;
            }
            if p.has_z() {
                z_mask |= 1 << q;
            }
            if p == PauliOperator::Y {
                num_y += 1;
            }
        }

        let global = Complex64::i().powu(num_y as u32);
        let mut image = vec![Complex64::new(0.0, 0.0); self.amplitudes.len()];
        for (b, &amp) in self.amplitudes.iter().enumerate() {
            let sign = if (b & z_mask).count_ones() % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            image[b ^ x_mask] = amp * global * sign;
        }
        Ok(image)
    }

    fn apply_single_qubit_gate<F>(&mut self, q: usize, f: F)
    where
        F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
    {
        let mask = 1 << q;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let (new_i, new_j) = f(self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = new_i;
                self.amplitudes[j] = new_j;
            }
        }
    }

    fn apply_controlled_gate<F>(&mut self, control: usize, target: usize, f: F)
    where
        F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
    {
        let control_mask = 1 << control;
        let target_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & control_mask) != 0 && (i & target_mask) == 0 {
                let j = i | target_mask;
                let (new_i, new_j) = f(self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = new_i;
                self.amplitudes[j] = new_j;
            }
        }
    }

    fn apply(&mut self, gate: &Gate) -> QecResult<()> {
        for q in gate.qubits() {
            self.check_qubit(q)?;
        }

        let i = Complex64::i();
        let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;

        match *gate {
            Gate::H(q) => {
                self.apply_single_qubit_gate(q, |a, b| ((a + b) * sqrt2_inv, (a - b) * sqrt2_inv))
            }
            Gate::S(q) => self.apply_single_qubit_gate(q, |a, b| (a, b * i)),
            Gate::Sdg(q) => self.apply_single_qubit_gate(q, |a, b| (a, -(b * i))),
            Gate::X(q) => self.apply_single_qubit_gate(q, |a, b| (b, a)),
            Gate::Y(q) => self.apply_single_qubit_gate(q, |a, b| (-(b * i), a * i)),
            Gate::Z(q) => self.apply_single_qubit_gate(q, |a, b| (a, -b)),
            Gate::Cnot(c, t) => {
                check_distinct(gate, c, t)?;
                self.apply_controlled_gate(c, t, |a, b| (b, a));
            }
            Gate::Cy(c, t) => {
                check_distinct(gate, c, t)?;
                self.apply_controlled_gate(c, t, |a, b| (-(b * i), a * i));
            }
            Gate::Cz(c, t) => {
                check_distinct(gate, c, t)?;
                self.apply_controlled_gate(c, t, |a, b| (a, -b));
            }
        }
        Ok(())
    }

    /// Project onto the (-1)^outcome eigenspace of P and renormalize
    fn project(&mut self, pauli: &PauliString, image: &[Complex64], outcome: bool) -> QecResult<()> {
        let sign = if outcome { -1.0 } else { 1.0 };
        for (amp, &p_amp) in self.amplitudes.iter_mut().zip(image) {
            *amp = (*amp + p_amp * sign) * 0.5;
        }

        let norm_sq = self.norm_squared();
        if norm_sq < simulator::NORM_TOLERANCE {
            return Err(QecError::ZeroNormProjection(pauli.to_string()));
        }
        let scale = 1.0 / norm_sq.sqrt();
        for amp in &mut self.amplitudes {
            *amp *= scale;
        }
        Ok(())
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.num_qubits;
        let mut first = true;
        for (index, amp) in self.amplitudes.iter().enumerate() {
            if amp.norm_sqr() < simulator::NORM_TOLERANCE {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            // Qubit 0 printed rightmost
            write!(
                f,
                "({:.4}{:+.4}i)|{:0width$b}⟩",
                amp.re,
                amp.im,
                index,
                width = width
            )?;
        }
        Ok(())
    }
}

fn inner_product(bra: &[Complex64], ket: &[Complex64]) -> Complex64 {
    bra.iter().zip(ket).map(|(a, b)| a.conj() * b).sum()
}

fn check_distinct(gate: &Gate, control: usize, target: usize) -> QecResult<()> {
    if control == target {
        return Err(QecError::DuplicateQubit {
            gate: gate.name().to_string(),
            qubit: control,
        });
    }
    Ok(())
}

// ============================================================================
// StateVectorBackend
// ============================================================================

/// State-vector simulator backend
/// Gantree: StateVectorBackend // QuantumBackend impl
pub struct StateVectorBackend {
    /// Backend name
    name: String,

    /// Largest register this backend will allocate
    max_qubits: usize,

    /// Random seed
    seed: Option<u64>,

    /// Measurement sampling source
    rng: StdRng,

    /// Operation counters
    stats: ExecutionStats,
}

impl StateVectorBackend {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a simulator that allocates up to `max_qubits` qubits
    pub fn new(max_qubits: usize) -> Self {
        Self {
            name: "qec5_statevector".to_string(),
            max_qubits,
            seed: None,
            rng: StdRng::from_entropy(),
            stats: ExecutionStats::default(),
        }
    }

    /// Create a simulator with the default capacity
    pub fn ideal() -> Self {
        Self::new(simulator::DEFAULT_MAX_QUBITS)
    }

    /// Set seed for reproducible measurement sampling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Seed in use, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Register capacity
    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    /// Clear operation counters
    pub fn reset_stats(&mut self) {
        self.stats = ExecutionStats::default();
    }
}

impl Default for StateVectorBackend {
    fn default() -> Self {
        Self::ideal()
    }
}

impl QuantumBackend for StateVectorBackend {
    type Register = StateVector;

    fn name(&self) -> &str {
        &self.name
    }

    fn allocate(&mut self, num_qubits: usize) -> QecResult<StateVector> {
        if num_qubits > self.max_qubits {
            return Err(QecError::AllocationTooLarge {
                requested: num_qubits,
                max: self.max_qubits,
            });
        }
        self.stats.allocations += 1;
        log::debug!("{}: allocated {} qubits", self.name, num_qubits);
        Ok(StateVector::zero(num_qubits))
    }

    fn register_size(&self, register: &StateVector) -> usize {
        register.num_qubits()
    }

    fn apply_gate(&mut self, register: &mut StateVector, gate: &Gate) -> QecResult<()> {
        register.apply(gate)?;
        self.stats.record_gate(gate);
        log::trace!("{}: {}", self.name, gate);
        Ok(())
    }

    fn measure_pauli_product(
        &mut self,
        register: &mut StateVector,
        pauli: &PauliString,
    ) -> QecResult<bool> {
        let image = register.pauli_image(pauli)?;
        let expectation = inner_product(&register.amplitudes, &image).re;
        let p_plus = ((1.0 + expectation) / 2.0).clamp(0.0, 1.0);

        // Deterministic outcomes are not sampled, so eigenstates never collapse
        // onto a numerically empty branch.
        let outcome = if p_plus >= 1.0 - simulator::NORM_TOLERANCE {
            false
        } else if p_plus <= simulator::NORM_TOLERANCE {
            true
        } else {
            self.rng.gen::<f64>() >= p_plus
        };

        register.project(pauli, &image, outcome)?;
        self.stats.measurements += 1;
        log::trace!(
            "{}: measured {} -> {} (p+ = {:.6})",
            self.name,
            pauli,
            u8::from(outcome),
            p_plus
        );
        Ok(outcome)
    }

    fn reset(&mut self, register: &mut StateVector) -> QecResult<()> {
        for qubit in 0..register.num_qubits() {
            if self.measure_qubit(register, qubit)? {
                register.apply(&Gate::X(qubit))?;
            }
        }
        self.stats.resets += 1;
        log::debug!("{}: register reset", self.name);
        Ok(())
    }

    fn stats(&self) -> Option<ExecutionStats> {
        Some(self.stats)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pauli(s: &str) -> PauliString {
        PauliString::parse(s).unwrap()
    }

    #[test]
    fn test_allocate() {
        let mut backend = StateVectorBackend::new(5).with_seed(42);
        let reg = backend.allocate(5).unwrap();
        assert_eq!(reg.num_qubits(), 5);
        assert_eq!(reg.amplitudes().len(), 32);
        assert_relative_eq!(reg.norm_squared(), 1.0);

        assert!(matches!(
            backend.allocate(6),
            Err(QecError::AllocationTooLarge { requested: 6, max: 5 })
        ));
    }

    #[test]
    fn test_bell_state() {
        let mut backend = StateVectorBackend::ideal().with_seed(42);
        let mut reg = backend.allocate(2).unwrap();
        backend.apply_gate(&mut reg, &Gate::H(0)).unwrap();
        backend.apply_gate(&mut reg, &Gate::Cnot(0, 1)).unwrap();

        assert_relative_eq!(reg.amplitude(0).unwrap().re, 0.5_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(reg.amplitude(3).unwrap().re, 0.5_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(reg.expectation(&pauli("ZZ")).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(reg.expectation(&pauli("XX")).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(reg.expectation(&pauli("YY")).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_s_and_y_gates() {
        let mut backend = StateVectorBackend::ideal();
        let mut reg = backend.allocate(1).unwrap();

        // S H |0⟩ = |+i⟩, a +1 eigenstate of Y
        backend.apply_gate(&mut reg, &Gate::H(0)).unwrap();
        backend.apply_gate(&mut reg, &Gate::S(0)).unwrap();
        assert_relative_eq!(reg.expectation(&pauli("Y")).unwrap(), 1.0, epsilon = 1e-12);

        backend.apply_gate(&mut reg, &Gate::Sdg(0)).unwrap();
        assert_relative_eq!(reg.expectation(&pauli("X")).unwrap(), 1.0, epsilon = 1e-12);

        // Y|0⟩ = i|1⟩
        let mut reg = backend.allocate(1).unwrap();
        backend.apply_gate(&mut reg, &Gate::Y(0)).unwrap();
        let amp = reg.amplitude(1).unwrap();
        assert_relative_eq!(amp.im, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_controlled_y() {
        let mut backend = StateVectorBackend::ideal();
        let mut reg = backend.allocate(2).unwrap();
        backend.apply_gate(&mut reg, &Gate::X(0)).unwrap();
        backend.apply_gate(&mut reg, &Gate::Cy(0, 1)).unwrap();

        // |01⟩ (qubit 0 set) -> i|11⟩
        let amp = reg.amplitude(3).unwrap();
        assert_relative_eq!(amp.im, 1.0, epsilon = 1e-12);
        assert_relative_eq!(reg.probability_one(1).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pauli_involution() {
        let mut backend = StateVectorBackend::ideal();
        let mut reg = backend.allocate(3).unwrap();
        backend.apply_gate(&mut reg, &Gate::H(0)).unwrap();
        backend.apply_gate(&mut reg, &Gate::Cnot(0, 2)).unwrap();
        backend.apply_gate(&mut reg, &Gate::S(2)).unwrap();
        let before = reg.clone();

        for gate in [Gate::X(1), Gate::Y(2), Gate::Z(0)] {
            backend.apply_gate(&mut reg, &gate).unwrap();
            backend.apply_gate(&mut reg, &gate).unwrap();
            assert_relative_eq!(reg.fidelity(&before).unwrap(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_measurement_of_eigenstate_is_deterministic() {
        let mut backend = StateVectorBackend::ideal().with_seed(7);
        let mut reg = backend.allocate(2).unwrap();
        backend.apply_gate(&mut reg, &Gate::H(0)).unwrap();
        backend.apply_gate(&mut reg, &Gate::Cnot(0, 1)).unwrap();
        let before = reg.clone();

        for _ in 0..10 {
            assert!(!backend.measure_pauli_product(&mut reg, &pauli("XX")).unwrap());
            assert!(!backend.measure_pauli_product(&mut reg, &pauli("ZZ")).unwrap());
        }
        assert_relative_eq!(reg.fidelity(&before).unwrap(), 1.0, epsilon = 1e-12);

        backend.apply_gate(&mut reg, &Gate::Z(1)).unwrap();
        assert!(backend.measure_pauli_product(&mut reg, &pauli("XX")).unwrap());
    }

    #[test]
    fn test_measurement_collapses_superposition() {
        let mut backend = StateVectorBackend::ideal().with_seed(42);
        let mut reg = backend.allocate(1).unwrap();
        backend.apply_gate(&mut reg, &Gate::H(0)).unwrap();

        let outcome = backend.measure_qubit(&mut reg, 0).unwrap();
        let expected = if outcome { 1.0 } else { 0.0 };
        assert_relative_eq!(reg.probability_one(0).unwrap(), expected, epsilon = 1e-12);
        assert_relative_eq!(reg.norm_squared(), 1.0, epsilon = 1e-12);

        // Repeated measurement agrees with the first
        assert_eq!(backend.measure_qubit(&mut reg, 0).unwrap(), outcome);
    }

    #[test]
    fn test_reset() {
        let mut backend = StateVectorBackend::ideal().with_seed(3);
        let mut reg = backend.allocate(3).unwrap();
        backend.apply_gate(&mut reg, &Gate::H(0)).unwrap();
        backend.apply_gate(&mut reg, &Gate::Cnot(0, 1)).unwrap();
        backend.apply_gate(&mut reg, &Gate::X(2)).unwrap();

        backend.reset(&mut reg).unwrap();
        let (index, probability) = reg.most_probable();
        assert_eq!(index, 0);
        assert_relative_eq!(probability, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_operations() {
        let mut backend = StateVectorBackend::ideal();
        let mut reg = backend.allocate(2).unwrap();
        assert!(matches!(
            backend.apply_gate(&mut reg, &Gate::X(2)),
            Err(QecError::QubitOutOfRange { qubit: 2, .. })
        ));
        assert!(matches!(
            backend.apply_gate(&mut reg, &Gate::Cnot(1, 1)),
            Err(QecError::DuplicateQubit { .. })
        ));
        assert!(matches!(
            backend.measure_pauli_product(&mut reg, &pauli("ZZZ")),
            Err(QecError::RegisterSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_stats() {
        let mut backend = StateVectorBackend::ideal().with_seed(1);
        let mut reg = backend.allocate(2).unwrap();
        backend.apply_gate(&mut reg, &Gate::H(0)).unwrap();
        backend.apply_gate(&mut reg, &Gate::Cz(0, 1)).unwrap();
        backend.measure_pauli_product(&mut reg, &pauli("XZ")).unwrap();

        let stats = backend.stats().unwrap();
        assert_eq!(stats.allocations, 1);
        assert_eq!(stats.gates_1q, 1);
        assert_eq!(stats.gates_2q, 1);
        assert_eq!(stats.measurements, 1);

        backend.reset_stats();
        assert_eq!(backend.stats().unwrap().total_gates(), 0);
    }

    #[test]
    fn test_seed_reproducibility() {
        let outcomes = |seed| {
            let mut backend = StateVectorBackend::ideal().with_seed(seed);
            (0..16)
                .map(|_| {
                    let mut reg = backend.allocate(1).unwrap();
                    backend.apply_gate(&mut reg, &Gate::H(0)).unwrap();
                    backend.measure_qubit(&mut reg, 0).unwrap()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(outcomes(42), outcomes(42));
    }
}
