//! Multi-trial runs
//!
//! Gantree: L4_Pipeline → TrialRunner
//!
//! Repeats random-error rounds and aggregates the outcomes. Every trial
//! allocates its own register through the pipeline.

use crate::pipeline::{Pipeline, RoundReport};
use crate::randomness::RandomnessProvider;
use qec5_backend::{ExecutionStats, QuantumBackend};
use qec5_core::{code, LogicalState, QecError, QecResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Aggregated outcome of many rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialStatistics {
    /// Logical value used in every round
    pub logical_input: LogicalState,

    /// Rounds run
    pub trials: usize,

    /// Rounds whose recovered value matched the input
    pub successes: usize,

    /// Rounds whose decoder named exactly the injected error
    pub identified: usize,

    /// Count per syndrome value
    pub syndrome_histogram: [u64; code::NUM_SYNDROMES],

    /// Backend counters accumulated over the run
    pub backend_stats: Option<ExecutionStats>,

    /// Wall-clock time (milliseconds)
    pub time_ms: u64,
}

impl TrialStatistics {
    fn new(logical_input: LogicalState) -> Self {
        Self {
            logical_input,
            trials: 0,
            successes: 0,
            identified: 0,
            syndrome_histogram: [0; code::NUM_SYNDROMES],
            backend_stats: None,
            time_ms: 0,
        }
    }

    /// Add one round
    pub fn record(&mut self, report: &RoundReport) {
        self.trials += 1;
        if report.success() {
            self.successes += 1;
        }
        if report.identified() {
            self.identified += 1;
        }
        self.syndrome_histogram[usize::from(report.syndrome.value())] += 1;
    }

    /// Failed rounds
    pub fn failures(&self) -> usize {
        self.trials - self.successes
    }

    /// Fraction of rounds that recovered the input
    pub fn success_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.successes as f64 / self.trials as f64
    }

    /// Fraction of rounds whose error was identified
    pub fn identification_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.identified as f64 / self.trials as f64
    }

    /// Distinct syndrome values seen
    pub fn distinct_syndromes(&self) -> usize {
        self.syndrome_histogram.iter().filter(|&&n| n > 0).count()
    }
}

impl fmt::Display for TrialStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrialStatistics({} trials, input={}, success={:.1}%, syndromes seen={})",
            self.trials,
            self.logical_input,
            self.success_rate() * 100.0,
            self.distinct_syndromes()
        )
    }
}

/// Repeated-round driver
/// Gantree: TrialRunner // run(trials, logical) -> TrialStatistics
pub struct TrialRunner<B: QuantumBackend, R: RandomnessProvider> {
    pipeline: Pipeline<B, R>,
    verbose: bool,
}

impl<B: QuantumBackend, R: RandomnessProvider> TrialRunner<B, R> {
    /// Runner over an assembled pipeline
    pub fn new(pipeline: Pipeline<B, R>) -> Self {
        Self {
            pipeline,
            verbose: false,
        }
    }

    /// Print a progress line every tenth of the run
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Underlying pipeline
    pub fn pipeline(&self) -> &Pipeline<B, R> {
        &self.pipeline
    }

    /// Run `trials` random-error rounds on `logical`
    pub fn run(&mut self, trials: usize, logical: LogicalState) -> QecResult<TrialStatistics> {
        if trials == 0 {
            return Err(QecError::ConfigError("trials must be > 0".to_string()));
        }

        let start = Instant::now();
        let before = self.pipeline.backend().stats();
        let mut stats = TrialStatistics::new(logical);
        let step = (trials / 10).max(1);

        for trial in 0..trials {
            let report = self.pipeline.run(logical)?;
            if !report.success() {
                log::warn!("Trial {} failed: {}", trial, report);
            }
            stats.record(&report);

            if self.verbose && (trial + 1) % step == 0 {
                println!(
                    "  [{}/{}] success rate {:.3}",
                    trial + 1,
                    trials,
                    stats.success_rate()
                );
            }
        }

        stats.backend_stats = match (before, self.pipeline.backend().stats()) {
            (Some(before), Some(after)) => Some(after.since(&before)),
            _ => None,
        };
        stats.time_ms = start.elapsed().as_millis() as u64;

        log::info!("{}", stats);
        Ok(stats)
    }
}

// ============================================================================
// Tests
// ============================================================================
