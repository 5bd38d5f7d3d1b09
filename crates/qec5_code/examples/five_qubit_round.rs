//! Five-qubit code round on the state-vector simulator
//!
//! Encodes a logical bit, injects a single-qubit Pauli error, measures the
//! syndrome, corrects and decodes. Runs the fixed (1, Z) scenario, every
//! single-qubit error, then a batch of random rounds.
//!
//! Usage:
//! ```bash
//! cargo run --example five_qubit_round --release
//! # optional: seed and trial count
//! cargo run --example five_qubit_round --release -- 7 500
//! ```

use anyhow::Context;
use qec5_code::prelude::*;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().context("seed must be an unsigned integer")?,
        None => 42,
    };
    let trials = match args.next() {
        Some(s) => s.parse::<usize>().context("trial count must be an unsigned integer")?,
        None => 200,
    };

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║           QEC5 - Five-Qubit Code Correction Round            ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let config = PipelineConfig::deterministic(seed).with_trials(trials);
    println!("{}\n", config);

    let mut pipeline = config.build_pipeline()?;
    println!("Encoder circuit:\n{}", pipeline.encoder().to_qasm());

    // Fixed scenario: phase flip on qubit 1
    let event = ErrorEvent::new(1, PauliOperator::Z)?;
    for logical in LogicalState::ALL {
        let report = pipeline.run_with_error(logical, Some(event))?;
        println!("{}", report);
    }

    println!("\n┌───────────────┬──────────┬───────────┬───────────┐");
    println!("│ Error         │ Syndrome │ Input |0⟩ │ Input |1⟩ │");
    println!("├───────────────┼──────────┼───────────┼───────────┤");
    for event in ErrorEvent::all() {
        let zero = pipeline.run_with_error(LogicalState::Zero, Some(event))?;
        let one = pipeline.run_with_error(LogicalState::One, Some(event))?;
        println!(
            "│ {:13} │ {:8} │ {:9} │ {:9} │",
            event.to_string(),
            zero.syndrome.value(),
            if zero.success() { "ok" } else { "FAIL" },
            if one.success() { "ok" } else { "FAIL" },
        );
    }
    println!("└───────────────┴──────────┴───────────┴───────────┘\n");

    let mut runner = TrialRunner::new(pipeline).with_verbose(true);
    println!("Running {} random rounds...", config.trials);
    let stats = runner.run(config.trials, config.logical_input)?;
    println!("\n{}", stats);

    println!("\nSyndrome histogram:");
    for (value, count) in stats.syndrome_histogram.iter().enumerate() {
        if *count > 0 {
            println!("  {:2} ({:04b}): {}", value, value, count);
        }
    }

    if let Some(backend) = stats.backend_stats {
        println!("\n{}", backend);
    }

    Ok(())
}
