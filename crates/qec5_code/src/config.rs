//! Pipeline configuration
//!
//! Gantree: L4_Pipeline → PipelineConfig
//!
//! Settings for building a simulator-backed pipeline and for multi-trial
//! runs. Serializable to JSON so runs can be reproduced from a file.

use crate::pipeline::Pipeline;
use crate::randomness::SeededRandomness;
use qec5_backend::StateVectorBackend;
use qec5_core::{code, simulator, LogicalState, QecError, QecResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Pipeline configuration
/// Gantree: PipelineConfig // seed, logical_input, trials, verbose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Random seed for measurement sampling and error injection
    pub seed: Option<u64>,

    /// Logical value encoded in each round
    pub logical_input: LogicalState,

    /// Number of rounds for a multi-trial run
    pub trials: usize,

    /// Print stage banners to stdout
    pub verbose: bool,

    /// Simulator register capacity
    pub max_qubits: usize,

    /// Check code, encoder and decoder table consistency at construction
    pub self_check: bool,
}

impl PipelineConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Reproducible configuration
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set logical input
    pub fn with_logical_input(mut self, logical: LogicalState) -> Self {
        self.logical_input = logical;
        self
    }

    /// Set number of trials
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set simulator capacity
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Enable or skip the construction-time self-check
    pub fn with_self_check(mut self, enabled: bool) -> Self {
        self.self_check = enabled;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> QecResult<()> {
        if self.trials == 0 {
            return Err(QecError::ConfigError("trials must be > 0".to_string()));
        }

        if self.max_qubits < code::NUM_QUBITS {
            return Err(QecError::ConfigError(format!(
                "max_qubits must be >= {}, got {}",
                code::NUM_QUBITS,
                self.max_qubits
            )));
        }

        Ok(())
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Simulator backend for this configuration
    pub fn to_backend(&self) -> StateVectorBackend {
        let backend = StateVectorBackend::new(self.max_qubits);
        match self.seed {
            Some(seed) => backend.with_seed(seed),
            None => backend,
        }
    }

    /// Error-injection randomness for this configuration
    pub fn to_randomness(&self) -> SeededRandomness {
        match self.seed {
            Some(seed) => SeededRandomness::with_seed(seed),
            None => SeededRandomness::from_entropy(),
        }
    }

    /// Validate and build a simulator-backed pipeline
    pub fn build_pipeline(&self) -> QecResult<Pipeline<StateVectorBackend, SeededRandomness>> {
        self.validate()?;
        let pipeline = if self.self_check {
            Pipeline::new(self.to_backend(), self.to_randomness())?
        } else {
            Pipeline::unchecked(self.to_backend(), self.to_randomness())?
        };
        Ok(pipeline.with_verbose(self.verbose))
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> QecResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> QecResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read from a JSON file
    pub fn load(path: impl AsRef<Path>) -> QecResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            logical_input: LogicalState::Zero,
            trials: 100,
            verbose: false,
            max_qubits: simulator::DEFAULT_MAX_QUBITS,
            self_check: true,
        }
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seed = self
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "entropy".to_string());
        write!(
            f,
            "PipelineConfig(input={}, trials={}, seed={})",
            self.logical_input, self.trials, seed
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.logical_input, LogicalState::Zero);
        assert!(config.self_check);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deterministic() {
        let config = PipelineConfig::deterministic(simulator::DEFAULT_SEED);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.to_backend().seed(), Some(42));
        assert_eq!(config.to_randomness().seed(), Some(42));
    }

    #[test]
    fn test_validation() {
        assert!(PipelineConfig::default().with_trials(0).validate().is_err());
        assert!(PipelineConfig::default().with_max_qubits(4).validate().is_err());
        assert!(matches!(
            PipelineConfig::default().with_trials(0).build_pipeline(),
            Err(QecError::ConfigError(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = PipelineConfig::deterministic(7)
            .with_logical_input(LogicalState::One)
            .with_trials(30)
            .with_verbose(true);
        let json = config.to_json().unwrap();
        assert!(json.contains("\"trials\": 30"));
        assert_eq!(PipelineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        let json = PipelineConfig::default().with_trials(0).to_json().unwrap();
        assert!(PipelineConfig::from_json(&json).is_err());
        assert!(matches!(
            PipelineConfig::from_json("{ not json"),
            Err(QecError::JsonError(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("qec5_config_{}.json", std::process::id()));
        let config = PipelineConfig::deterministic(11).with_trials(5);
        config.save(&path).unwrap();
        let loaded = PipelineConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let result = PipelineConfig::load("/nonexistent/qec5/config.json");
        assert!(matches!(result, Err(QecError::FileError(_))));
    }

    #[test]
    fn test_display() {
        let s = PipelineConfig::deterministic(3).to_string();
        assert!(s.contains("seed=3"));
    }
}
