//! Elimination-tree construction from an order (component H), grounded on
//! `tree_depth_decomposition.cpp`: `compute_parent_array_from_elimination_order`
//! and `compute_tree_depth_of_parent_array`.

use crate::datastr::graph::{Graph, NodeId, UnGraph};
use crate::datastr::in_range_option::InRangeOption;

/// Merge two lists, both already sorted by `rank`, into one sorted,
/// duplicate-free list.
fn merge_by_rank(a: &[NodeId], b: &[NodeId], rank: &[u32]) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match rank[a[i] as usize].cmp(&rank[b[j] as usize]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Build the elimination tree's parent array from `order`: for every arc
/// `(x, y)` with `x` eliminated before `y`, `y` must end up an ancestor of
/// `x`; the earliest-eliminated such `y` becomes `x`'s immediate parent,
/// and the rest are handed up to that parent's own ancestor requirement.
pub fn parent_array_from_order(graph: &UnGraph, order: &[NodeId]) -> Vec<InRangeOption<NodeId>> {
    let n = graph.num_nodes();
    let mut rank = vec![0u32; n];
    for (i, &v) in order.iter().enumerate() {
        rank[v as usize] = i as u32;
    }

    let mut must_be_ancestors: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    for x in 0..n as NodeId {
        let mut list: Vec<NodeId> = graph
            .neighbors(x)
            .iter()
            .copied()
            .filter(|&y| rank[x as usize] < rank[y as usize])
            .collect();
        list.sort_by_key(|&y| rank[y as usize]);
        list.dedup();
        must_be_ancestors[x as usize] = list;
    }

    let mut parent = vec![InRangeOption::NONE; n];
    for &x in order {
        let list = std::mem::take(&mut must_be_ancestors[x as usize]);
        if list.is_empty() {
            continue;
        }
        let p = list[0];
        parent[x as usize] = InRangeOption::some(p);
        if list.len() > 1 {
            let existing = std::mem::take(&mut must_be_ancestors[p as usize]);
            must_be_ancestors[p as usize] = merge_by_rank(&existing, &list[1..], &rank);
        }
    }

    parent
}

/// Per-node depth in the forest described by `parent` (a root has depth 1),
/// computed with a two-pass memoized walk: walk upward from each
/// unvisited node until hitting an already-known depth or a root, then
/// walk the collected path back down writing depths.
pub fn node_depths(parent: &[InRangeOption<NodeId>]) -> Vec<u32> {
    let n = parent.len();
    let mut depth = vec![0u32; n];

    for start in 0..n as NodeId {
        if depth[start as usize] != 0 {
            continue;
        }

        let mut path = Vec::new();
        let mut cur = start;
        let base;
        loop {
            if depth[cur as usize] != 0 {
                base = depth[cur as usize];
                break;
            }
            path.push(cur);
            match parent[cur as usize].value() {
                Some(p) => cur = p,
                None => {
                    base = 0;
                    break;
                }
            }
        }

        let mut d = base;
        for &node in path.iter().rev() {
            d += 1;
            depth[node as usize] = d;
        }
    }

    depth
}

/// Longest root-to-leaf path in the forest described by `parent`, counted
/// in nodes (a root alone has depth 1).
pub fn tree_depth_of_parent_array(parent: &[InRangeOption<NodeId>]) -> u32 {
    node_depths(parent).into_iter().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_node() {
        let g = UnGraph::from_edges(1, &[]);
        let parent = parent_array_from_order(&g, &[0]);
        assert_eq!(parent[0].value(), None);
        assert_eq!(tree_depth_of_parent_array(&parent), 1);
    }

    #[test]
    fn single_edge_gives_depth_two() {
        let g = UnGraph::from_edges(2, &[(0, 1)]);
        let parent = parent_array_from_order(&g, &[0, 1]);
        assert_eq!(parent[0].value(), Some(1));
        assert_eq!(parent[1].value(), None);
        assert_eq!(tree_depth_of_parent_array(&parent), 2);
    }

    #[test]
    fn triangle_gives_depth_three() {
        let g = UnGraph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        let parent = parent_array_from_order(&g, &[0, 1, 2]);
        assert_eq!(tree_depth_of_parent_array(&parent), 3);
    }

    #[test]
    fn disconnected_forest_takes_max_over_components() {
        let g = UnGraph::from_edges(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]);
        let parent = parent_array_from_order(&g, &[0, 1, 2, 3, 4, 5]);
        let roots = parent.iter().filter(|p| p.value().is_none()).count();
        assert_eq!(roots, 2);
        assert_eq!(tree_depth_of_parent_array(&parent), 3);
    }
}
