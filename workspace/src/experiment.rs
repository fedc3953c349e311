use itertools::iproduct;
use tracing::info;
use hasse_count::{
    experiment::{ run_experiment, ExperimentConfig },
    Result,
};
use lib::{ config_arg, init_logging };

const QUBITS: std::ops::RangeInclusive<usize> = 3..=7;
const GATES: [usize; 4] = [5, 10, 15, 20];

fn run(config: &ExperimentConfig) -> Result<()> {
    let record = run_experiment(config)?;
    let path = record.save()?;
    info!(
        path = %path.display(),
        mean_hasse = record.results.mean_hasse_duplicate_count,
        mean_sequence = record.results.mean_sequence_duplicate_count,
        "saved results"
    );
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    if let Some(path) = config_arg() {
        // a single experiment, fully specified by the file
        return run(&ExperimentConfig::load(path)?);
    }
    let base = ExperimentConfig::default();
    for (qubit_num, gate_count) in iproduct!(QUBITS, GATES) {
        let config = ExperimentConfig { qubit_num, gate_count, ..base.clone() };
        run(&config)?;
    }
    Ok(())
}
