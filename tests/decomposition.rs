//! End-to-end coverage of the full pipeline: parse a PACE graph, run
//! nested dissection, and check the resulting parent array is a valid
//! tree-depth decomposition of the input graph.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Cursor;
use treedepth::algo::parent_array::{parent_array_from_order, tree_depth_of_parent_array};
use treedepth::algo::separator::compute_separator_by_running_bfs;
use treedepth::algo::tree_depth_order;
use treedepth::datastr::graph::{Graph, UnGraph};
use treedepth::io::pace::{format_decomposition, load_pace_graph, GraphParseError};

fn parse(input: &str) -> UnGraph {
    load_pace_graph(Cursor::new(input)).unwrap()
}

/// Every edge of `graph` must have one endpoint that is an ancestor of
/// the other in the elimination forest described by `parent`.
fn assert_is_valid_decomposition(graph: &UnGraph, parent: &[treedepth::datastr::in_range_option::InRangeOption<u32>]) {
    let n = graph.num_nodes();
    let mut ancestors_of = vec![Vec::new(); n];
    for v in 0..n {
        let mut cur = v as u32;
        let mut chain = vec![cur];
        while let Some(p) = parent[cur as usize].value() {
            chain.push(p);
            cur = p;
        }
        ancestors_of[v] = chain;
    }

    for (u, v) in graph.edge_list() {
        let u_is_ancestor_of_v = ancestors_of[v as usize].contains(&u);
        let v_is_ancestor_of_u = ancestors_of[u as usize].contains(&v);
        assert!(
            u_is_ancestor_of_v || v_is_ancestor_of_u,
            "edge ({}, {}) is not covered by an ancestor relationship",
            u,
            v
        );
    }
}

fn run_search(graph: &UnGraph, seed: u64, depth_bound: i64) -> Vec<u32> {
    let mut rand = StdRng::seed_from_u64(seed);
    let mut provider = |g: &UnGraph, bound: i64| compute_separator_by_running_bfs(g, bound, &mut rand);
    tree_depth_order(graph, &mut provider, depth_bound).expect("search should find an order within a generous bound")
}

#[test]
fn triangle_decomposition_is_valid_and_optimal() {
    let input = "p tdp 3 3\n1 2\n2 3\n1 3\n";
    let graph = parse(input);

    let order = run_search(&graph, 7, 10);
    let parent = parent_array_from_order(&graph, &order);
    assert_eq!(tree_depth_of_parent_array(&parent), 3);
    assert_is_valid_decomposition(&graph, &parent);
}

#[test]
fn path_of_five_decomposition_is_valid() {
    let input = "p tdp 5 4\n1 2\n2 3\n3 4\n4 5\n";
    let graph = parse(input);

    let order = run_search(&graph, 11, 10);
    let parent = parent_array_from_order(&graph, &order);
    assert_is_valid_decomposition(&graph, &parent);
    assert!(tree_depth_of_parent_array(&parent) as usize <= graph.num_nodes());
}

#[test]
fn disconnected_components_each_get_a_root() {
    let input = "p tdp 6 4\n1 2\n2 3\nc a comment line\n4 5\n5 6\n";
    let graph = parse(input);

    let order = run_search(&graph, 3, 10);
    let parent = parent_array_from_order(&graph, &order);
    assert_eq!(parent.iter().filter(|p| p.value().is_none()).count(), 2);
    assert_is_valid_decomposition(&graph, &parent);
}

#[test]
fn format_decomposition_round_trips_through_a_search() {
    let input = "p tdp 3 3\n1 2\n2 3\n1 3\n";
    let graph = parse(input);
    let order = run_search(&graph, 1, 10);
    let parent = parent_array_from_order(&graph, &order);
    let depth = tree_depth_of_parent_array(&parent);

    let formatted = format_decomposition(depth, &parent);
    let mut lines = formatted.lines();
    assert_eq!(lines.next().unwrap().parse::<u32>().unwrap(), depth);
    assert_eq!(lines.count(), graph.num_nodes());
}

#[test]
fn rejects_missing_header() {
    let input = "1 2\n2 3\n";
    let err = load_pace_graph(Cursor::new(input)).unwrap_err();
    assert!(matches!(err, GraphParseError::MalformedHeader { .. } | GraphParseError::MissingHeader));
}

#[test]
fn rejects_truncated_edge_list() {
    let input = "p tdp 4 3\n1 2\n2 3\n";
    let err = load_pace_graph(Cursor::new(input)).unwrap_err();
    assert!(matches!(err, GraphParseError::TooFewEdgeLines { .. }));
}
