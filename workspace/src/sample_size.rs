use tracing::info;
use hasse_count::{
    gate::{ GateKind, GateSet },
    validate::{ validate_sample_size, ValidationParams },
    Result,
};
use lib::init_logging;

const QUBITS: usize = 3;
const GATES: usize = 4;
const MARGIN: f64 = 0.05;
const CONFIDENCE: f64 = 0.95;
const RUNS: usize = 100;
// sample sizes as multiples of the true space size
const FRACTIONS: [f64; 6] = [0.1, 0.25, 0.5, 1.0, 2.0, 4.0];

fn main() -> Result<()> {
    init_logging();
    let gate_set = GateSet::new([GateKind::H, GateKind::T, GateKind::CX])?;
    let mut params = ValidationParams::new(gate_set, QUBITS, GATES, 0)?;
    let true_size = params.true_size()?;
    info!(true_size, "validating sample sizes");
    let mut smallest_valid: Option<usize> = None;
    for frac in FRACTIONS {
        params.sample_num = ((true_size as f64 * frac).round() as usize).max(2);
        let report = validate_sample_size(&params, MARGIN, CONFIDENCE, RUNS)?;
        println!(
            "{:>8} samples: {:>3}/{} within ±{:.0}% ({})",
            params.sample_num,
            report.hits,
            RUNS,
            100.0 * MARGIN,
            if report.is_valid { "valid" } else { "invalid" },
        );
        if report.is_valid && smallest_valid.is_none() {
            smallest_valid = Some(params.sample_num);
        }
    }
    match smallest_valid {
        Some(m) => println!("smallest valid sample size: {}", m),
        None => println!("no tested sample size was valid"),
    }
    Ok(())
}
