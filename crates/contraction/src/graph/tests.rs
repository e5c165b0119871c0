use super::rand::{random_connected, RandomGraphCfg, MAX_RANDOM_VERTICES};
use super::*;

#[test]
fn theta_preset_counts_and_degrees() {
    let g = Topology::theta().build_graph();
    assert_eq!(g.vertex_count(), 7);
    assert_eq!(g.edge_count(), 9);
    assert_eq!(g.cycle_rank(), 3);
    assert_eq!(g.vertices(), &[0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(
        g.degree_sequence(),
        vec![(0, 2), (1, 3), (2, 2), (3, 3), (4, 2), (5, 3), (6, 3)]
    );
    assert!(g.is_connected());
}

#[test]
fn tree_preset_counts_and_degrees() {
    let g = Topology::tree().build_graph();
    assert_eq!(g.vertex_count(), 10);
    assert_eq!(g.edge_count(), 9);
    assert_eq!(g.cycle_rank(), 0);
    let deg = g.degrees();
    assert_eq!(deg[0], 3);
    assert!(deg[1..4].iter().all(|&d| d == 3));
    assert!(deg[4..].iter().all(|&d| d == 1));
}

#[test]
fn vertex_order_follows_first_appearance() {
    let g = Graph::from_edges(&[(5, 2), (2, 9), (9, 5)]);
    assert_eq!(g.vertices(), &[5, 2, 9]);
    let idx: Vec<_> = g.edge_indices().collect();
    assert_eq!(idx, vec![(0, 1), (1, 2), (2, 0)]);
}

#[test]
fn duplicate_edges_collapse() {
    let g = Graph::from_edges(&[(0, 1), (1, 0), (0, 1), (1, 2)]);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.degrees(), vec![1, 2, 1]);
}

#[test]
fn explicit_vertices_allow_isolated() {
    let g = Graph::with_vertices(&[0, 1, 2, 3], &[(0, 1), (1, 2)]);
    assert_eq!(g.vertex_count(), 4);
    assert_eq!(g.degrees()[3], 0);
    assert!(!g.is_connected());
}

#[test]
fn topology_lookup_is_case_insensitive() {
    assert_eq!(Topology::by_name("THETA").unwrap().name, "theta");
    assert_eq!(Topology::by_name(" tree ").unwrap().name, "tree");
    let err = Topology::by_name("mercedes").unwrap_err();
    assert!(err.to_string().contains("theta, tree"));
}

#[test]
fn topology_groups_preserve_order() {
    let t = Topology::theta();
    let labels: Vec<&str> = t.edge_groups.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels, vec!["ring", "branches"]);
    assert_eq!(t.edges().len(), 9);
    assert_eq!(t.edges()[6], (6, 1));
}

#[test]
fn random_graphs_are_connected_and_reproducible() {
    for seed in 0..20u64 {
        let cfg = RandomGraphCfg {
            vertices: 3 + (seed as usize % 8),
            extra_edge_prob: 0.3,
        };
        let a = random_connected(cfg, seed);
        let b = random_connected(cfg, seed);
        assert_eq!(a, b);
        assert!(a.is_connected());
        assert!(a.edge_count() >= a.vertex_count() - 1);
        assert!(a.edges().iter().all(|&(i, j)| i != j));
    }
}

#[test]
fn random_graph_vertex_count_is_clamped() {
    let big = random_connected(
        RandomGraphCfg {
            vertices: 1000,
            extra_edge_prob: 0.0,
        },
        7,
    );
    assert_eq!(big.vertex_count(), MAX_RANDOM_VERTICES);
    assert_eq!(big.edge_count(), MAX_RANDOM_VERTICES - 1);
    let small = random_connected(
        RandomGraphCfg {
            vertices: 0,
            extra_edge_prob: f64::NAN,
        },
        7,
    );
    assert_eq!(small.vertex_count(), 2);
}
