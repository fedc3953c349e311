use std::fs;
use rand::{ rngs::StdRng, SeedableRng };
use hasse_count::{
    commute::CliffordTable,
    count::{ count_hasse_duplicates, count_sequence_duplicates },
    estimate::{ estimate_space_size, expected_duplicates },
    fingerprint::fingerprint,
    gate::{ Circuit, Gate, GateKind, GateSet, Labeling },
    generate::generate_population,
    hasse::HasseDiagram,
};

fn diagram(n: usize, gates: &[Gate]) -> HasseDiagram {
    let circuit = Circuit::from_gates(n, gates.iter().copied()).unwrap();
    HasseDiagram::build(&circuit, &CliffordTable, Labeling::Shape).unwrap()
}

#[test]
fn reorderings_share_a_fingerprint() {
    let a = diagram(3, &[
        Gate::H(0), Gate::CX(0, 1), Gate::T(2), Gate::S(1), Gate::CX(2, 1),
    ]);
    let b = diagram(3, &[
        Gate::T(2), Gate::H(0), Gate::CX(0, 1), Gate::S(1), Gate::CX(2, 1),
    ]);
    assert_eq!(fingerprint(&a), fingerprint(&b));
    assert!(a.is_reduced() && b.is_reduced());

    // moving H past the CX it feeds changes the structure
    let c = diagram(3, &[
        Gate::CX(0, 1), Gate::H(0), Gate::T(2), Gate::S(1), Gate::CX(2, 1),
    ]);
    assert_ne!(fingerprint(&a), fingerprint(&c));
}

#[test]
fn graphviz_round_trip_to_disk() {
    let d = diagram(2, &[Gate::H(0), Gate::CX(0, 1), Gate::T(1)]);
    let path = std::env::temp_dir()
        .join(format!("hasse-count-pipeline-{}.gv", std::process::id()));
    d.save_graphviz("circuit", &path).unwrap();
    let dot = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert!(dot.contains("digraph"));
    assert!(dot.contains("0: H"));
    assert!(dot.contains("->"));
}

#[test]
fn sampled_counts_feed_the_estimator() {
    // one gate kind on three qubits: 6^3 equally likely sequences
    let gate_set = GateSet::new([GateKind::CX]).unwrap();
    let size = gate_set.space_size(3, 3).unwrap();
    assert_eq!(size, 216);
    let mut rng = StdRng::seed_from_u64(10546);
    let population
        = generate_population(&gate_set, 3, 3, size as usize, &mut rng).unwrap();
    let seq = count_sequence_duplicates(&population).unwrap();
    let hasse = count_hasse_duplicates(&population).unwrap();
    assert!(hasse.duplicates >= seq.duplicates);

    let expected = expected_duplicates(size, size);
    assert!((seq.duplicates as f64 - expected).abs() < 30.0);
    let est
        = estimate_space_size(size, seq.duplicates as u64, 1, 10 * size)
        .unwrap();
    let rel = (est as f64 - size as f64).abs() / size as f64;
    assert!(rel < 0.5, "{}", est);
}
