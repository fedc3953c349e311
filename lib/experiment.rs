//! Repeated duplicate-counting experiments over seeded random populations,
//! with results persisted as JSON.

use std::{
    fs,
    io::{ BufReader, BufWriter },
    path::{ Path, PathBuf },
    time::{ SystemTime, UNIX_EPOCH },
};
use rand::{ rngs::StdRng, SeedableRng };
use serde::{ Deserialize, Serialize };
use tracing::info;
use crate::{
    count::{ count_hasse_duplicates, count_sequence_duplicates },
    error::Result,
    gate::GateSet,
    generate::generate_population,
};

/// Settings for a single experiment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub gate_set: GateSet,
    pub gate_count: usize,
    pub qubit_num: usize,
    /// Circuits per population.
    pub sample_num: usize,
    /// Populations are drawn with seeds `0..seed_num`.
    pub seed_num: u64,
    pub out_dir: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            gate_set: GateSet::clifford_t(),
            gate_count: 5,
            qubit_num: 3,
            sample_num: 10_000,
            seed_num: 30,
            out_dir: PathBuf::from("results"),
        }
    }
}

impl ExperimentConfig {
    /// Read a config from a JSON file. Missing fields take their default
    /// values.
    pub fn load<P>(path: P) -> Result<Self>
    where P: AsRef<Path>
    {
        let file = fs::File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Start and end times in seconds since the Unix epoch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub start: u64,
    pub end: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResults {
    pub hasse_duplicate_counts: Vec<usize>,
    pub mean_hasse_duplicate_count: f64,
    pub hasse_encoding_times: Vec<f64>,
    pub mean_hasse_encoding_time: f64,
    pub sequence_duplicate_counts: Vec<usize>,
    pub mean_sequence_duplicate_count: f64,
    pub sequence_encoding_times: Vec<f64>,
    pub mean_sequence_encoding_time: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub meta: Meta,
    pub config: ExperimentConfig,
    pub results: ExperimentResults,
}

fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn mean<I>(values: I) -> f64
where I: IntoIterator<Item = f64>
{
    let (sum, n)
        = values.into_iter()
        .fold((0.0, 0_usize), |(sum, n), x| (sum + x, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Run both duplicate counters on one freshly drawn population per seed.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentRecord> {
    info!(
        gate_set = %config.gate_set,
        gate_count = config.gate_count,
        qubit_num = config.qubit_num,
        sample_num = config.sample_num,
        seed_num = config.seed_num,
        "starting experiment"
    );
    let start = timestamp();
    let mut results = ExperimentResults::default();
    for seed in 0..config.seed_num {
        let mut rng = StdRng::seed_from_u64(seed);
        let population
            = generate_population(
                &config.gate_set,
                config.qubit_num,
                config.gate_count,
                config.sample_num,
                &mut rng,
            )?;
        let hasse = count_hasse_duplicates(&population)?;
        let sequence = count_sequence_duplicates(&population)?;
        info!(
            seed,
            hasse = hasse.duplicates,
            sequence = sequence.duplicates,
            "finished seed"
        );
        results.hasse_duplicate_counts.push(hasse.duplicates);
        results.hasse_encoding_times.push(hasse.elapsed_secs());
        results.sequence_duplicate_counts.push(sequence.duplicates);
        results.sequence_encoding_times.push(sequence.elapsed_secs());
    }
    results.mean_hasse_duplicate_count
        = mean(results.hasse_duplicate_counts.iter().map(|c| *c as f64));
    results.mean_hasse_encoding_time
        = mean(results.hasse_encoding_times.iter().copied());
    results.mean_sequence_duplicate_count
        = mean(results.sequence_duplicate_counts.iter().map(|c| *c as f64));
    results.mean_sequence_encoding_time
        = mean(results.sequence_encoding_times.iter().copied());
    let end = timestamp();
    Ok(ExperimentRecord {
        meta: Meta { start, end },
        config: config.clone(),
        results,
    })
}

impl ExperimentRecord {
    /// Default file name, `experiment_<g>g<q>q_<start>.json`.
    pub fn file_name(&self) -> String {
        format!(
            "experiment_{}g{}q_{}.json",
            self.config.gate_count, self.config.qubit_num, self.meta.start,
        )
    }

    /// Write `self` as JSON to [`file_name`][Self::file_name] inside the
    /// configured output directory, creating it if necessary.
    ///
    /// Returns the path written to.
    pub fn save(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.out_dir)?;
        let path = self.config.out_dir.join(self.file_name());
        let file = fs::File::create(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(path)
    }

    pub fn load<P>(path: P) -> Result<Self>
    where P: AsRef<Path>
    {
        let file = fs::File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
