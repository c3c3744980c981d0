//! Optimal elimination order for trees (used as the tree base case of the
//! nested-dissection driver), via the classical node-ranking recursion:
//! `level(leaf) = 0`; otherwise `level(v)` is one plus the smallest level
//! that occurs fewer than two times among `v`'s children's levels. Sorting
//! nodes by ascending level gives an elimination order whose tree depth is
//! `level(root) + 1`, which for trees is optimal.

use crate::datastr::graph::{Graph, NodeId, UnGraph};
use std::collections::HashMap;

/// Compute an optimal elimination order for a tree, rooted arbitrarily at
/// node 0 via BFS.
pub fn tree_depth_order_of_tree(graph: &UnGraph) -> Vec<NodeId> {
    let n = graph.num_nodes();
    if n == 0 {
        return Vec::new();
    }

    let mut parent = vec![None; n];
    let mut bfs_order = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    visited[0] = true;
    bfs_order.push(0u32);
    let mut head = 0;
    while head < bfs_order.len() {
        let x = bfs_order[head];
        head += 1;
        for &y in graph.neighbors(x) {
            if !visited[y as usize] {
                visited[y as usize] = true;
                parent[y as usize] = Some(x);
                bfs_order.push(y);
            }
        }
    }

    let mut children: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    for (v, p) in parent.iter().enumerate() {
        if let Some(p) = p {
            children[*p as usize].push(v as NodeId);
        }
    }

    let mut level = vec![0u32; n];
    for &v in bfs_order.iter().rev() {
        if children[v as usize].is_empty() {
            level[v as usize] = 0;
            continue;
        }
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for &c in &children[v as usize] {
            *counts.entry(level[c as usize]).or_insert(0) += 1;
        }
        let mut smallest_free = 0u32;
        while *counts.get(&smallest_free).unwrap_or(&0) >= 2 {
            smallest_free += 1;
        }
        level[v as usize] = smallest_free + 1;
    }

    let mut order: Vec<NodeId> = (0..n as NodeId).collect();
    order.sort_by_key(|&v| (level[v as usize], v));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::parent_array::{parent_array_from_order, tree_depth_of_parent_array};

    #[test]
    fn single_node_has_depth_one() {
        let g = UnGraph::from_edges(1, &[]);
        let order = tree_depth_order_of_tree(&g);
        let parent = parent_array_from_order(&g, &order);
        assert_eq!(tree_depth_of_parent_array(&parent), 1);
    }

    #[test]
    fn path_of_four_has_depth_at_most_three() {
        let g = UnGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let order = tree_depth_order_of_tree(&g);
        let parent = parent_array_from_order(&g, &order);
        assert!(tree_depth_of_parent_array(&parent) <= 3);
    }

    #[test]
    fn star_has_depth_two() {
        let g = UnGraph::from_edges(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let order = tree_depth_order_of_tree(&g);
        let parent = parent_array_from_order(&g, &order);
        assert_eq!(tree_depth_of_parent_array(&parent), 2);
    }
}
