//! End-to-end ranking scenarios on small hand-checked graphs.

use edge_rank::{
    rank, CscMatrix, EdgeList, IterationStatus, PowerIteration, RankConfig, SprsMatrix,
    TeleportedOperator, TransitionMatrix, TransitionOperator, Variant,
};

fn edges(pairs: &[(i64, i64)]) -> EdgeList {
    EdgeList::from_pairs(pairs.iter().copied()).unwrap()
}

fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < tol, "index {i}: {a} vs {e}");
    }
}

#[test]
fn test_three_cycle_uncorrected_is_uniform() {
    let list = edges(&[(0, 1), (1, 2), (2, 0)]);
    for variant in [Variant::LargeManual, Variant::LargeOptimized] {
        let cfg = RankConfig::new(variant).with_epsilon(1e-12);
        let result = rank(&list, &cfg).unwrap();
        assert!(result.converged());
        assert_close(&result.scores, &[1.0 / 3.0; 3], 1e-12);
    }
}

#[test]
fn test_dead_end_corrected_column_is_uniform() {
    let list = edges(&[(0, 1)]);
    let op = TeleportedOperator::new(TransitionMatrix::from_edges(&list), 0.85).unwrap();
    assert_close(&op.column(1).unwrap(), &[0.5, 0.5], 1e-12);

    let corrected = rank(&list, &RankConfig::new(Variant::SmallCorrected)).unwrap();
    assert!(corrected.converged());
    assert!((corrected.total_mass() - 1.0).abs() < 1e-9);
    // Stationary point of [[0.075, 0.5], [0.925, 0.5]]
    assert!((corrected.score(0) - 0.5 / 1.425).abs() < 1e-9);

    let leaking = rank(&list, &RankConfig::new(Variant::LargeManual)).unwrap();
    assert!(leaking.total_mass() < 1.0 - 1e-3);
}

#[test]
fn test_disconnected_two_cycles_split_evenly() {
    let list = edges(&[(0, 1), (1, 0), (2, 3), (3, 2)]);
    let result = rank(&list, &RankConfig::new(Variant::LargeManual)).unwrap();
    assert!(result.converged());
    assert_close(&result.scores, &[0.25; 4], 1e-12);
}

#[test]
fn test_duplicate_edge_doubles_weight() {
    let list = edges(&[(0, 1), (0, 1), (0, 2)]);
    let expected = [0.0, 2.0 / 3.0, 1.0 / 3.0];

    let small = TransitionMatrix::from_edges(&list);
    let manual = CscMatrix::from_edges(&list);
    let fast = SprsMatrix::from_edges(&list);
    for (name, op) in [
        ("adjacency", &small as &dyn TransitionOperator),
        ("csc", &manual as &dyn TransitionOperator),
        ("sprs", &fast as &dyn TransitionOperator),
    ] {
        let column = op.multiply(&[1.0, 0.0, 0.0]).unwrap();
        for (a, e) in column.iter().zip(&expected) {
            assert!((a - e).abs() < 1e-12, "{name}: {column:?}");
        }
    }
}

#[test]
fn test_isolated_node_is_a_dead_end() {
    // Node 0 has no edges at all; node 1 only links to itself.
    let list = edges(&[(1, 1)]);
    assert_eq!(list.num_nodes(), 2);

    let raw = CscMatrix::from_edges(&list);
    assert_eq!(raw.dead_ends(), &[0]);
    assert_eq!(raw.column_sum(0), 0.0);

    let uncorrected = rank(&list, &RankConfig::new(Variant::LargeManual)).unwrap();
    assert!(uncorrected.converged());
    assert_eq!(uncorrected.score(0), 0.0);
    assert!((uncorrected.score(1) - 0.5).abs() < 1e-12);

    let op = TeleportedOperator::new(TransitionMatrix::from_edges(&list), 0.85).unwrap();
    assert_close(&op.column(0).unwrap(), &[0.5, 0.5], 1e-12);
    let corrected = rank(&list, &RankConfig::new(Variant::SmallCorrected)).unwrap();
    assert!((corrected.total_mass() - 1.0).abs() < 1e-9);
    assert!((corrected.score(0) - 0.075 / 0.575).abs() < 1e-9);
}

#[test]
fn test_spider_trap_does_not_absorb_all_mass() {
    // {2, 3} is a trap: nothing leaves it.
    let list = edges(&[(0, 1), (1, 2), (2, 3), (3, 2), (1, 0)]);
    let corrected = rank(&list, &RankConfig::new(Variant::SmallCorrected)).unwrap();
    assert!(corrected.converged());
    assert!(corrected.score(0) > 0.01);
    assert!(corrected.score(1) > 0.01);

    let cfg = RankConfig::new(Variant::LargeManual).with_epsilon(1e-12);
    let trapped = rank(&list, &cfg).unwrap();
    assert!(trapped.score(0) + trapped.score(1) < 1e-6);
}

#[test]
fn test_idempotent_on_converged_vector() {
    let list = edges(&[(0, 1), (1, 2), (2, 0), (2, 1), (3, 2)]);
    let op = TeleportedOperator::new(TransitionMatrix::from_edges(&list), 0.85).unwrap();
    let power = PowerIteration::new();
    let converged = power.run(&op).unwrap();

    let next = op.multiply(&converged.scores).unwrap();
    let delta: f64 = next
        .iter()
        .zip(&converged.scores)
        .map(|(a, b)| (a - b).abs())
        .sum();
    assert!(delta < 1e-12);
}

#[test]
fn test_exhausted_run_reports_status() {
    let list = edges(&[(0, 1), (1, 0)]);
    let result = PowerIteration::new()
        .with_max_iterations(4)
        .run_from(&CscMatrix::from_edges(&list), vec![0.9, 0.1])
        .unwrap();
    assert_eq!(result.status, IterationStatus::Exhausted);
    assert_eq!(result.iterations, 4);
    assert!(!result.converged());
}
