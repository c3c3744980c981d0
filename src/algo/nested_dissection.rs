//! The nested-dissection driver (component G) and the depth-bound pruning
//! glue (component I) that ties the greedy orderer, the separator
//! provider, and the parent-array builder into a recursive search for a
//! low-depth elimination order.

use crate::algo::greedy_order::greedy_order;
use crate::algo::parent_array::{parent_array_from_order, tree_depth_of_parent_array};
use crate::algo::separator::shrink_separator;
use crate::algo::tree_rank::tree_depth_order_of_tree;
use crate::datastr::graph::{connected_components, induced_subgraph, Graph, NodeId, UnGraph};

/// Compute an elimination order of `graph` whose tree depth is strictly
/// below `depth_bound`, or `None` if the search could not find one.
///
/// `provider` is the separator search (`compute_separator_by_running_bfs`
/// in this binary): given a subgraph and a maximum acceptable separator
/// size, it returns a balanced separator or an empty vector.
pub fn tree_depth_order<P>(graph: &UnGraph, provider: &mut P, depth_bound: i64) -> Option<Vec<NodeId>>
where
    P: FnMut(&UnGraph, i64) -> Vec<NodeId>,
{
    if graph.num_nodes() == 0 {
        return Some(Vec::new());
    }

    let mut result = Vec::with_capacity(graph.num_nodes());
    for (component_graph, mapping) in connected_components(graph) {
        let local_order = tree_depth_order_of_connected_graph(&component_graph, provider, depth_bound)?;
        result.extend(local_order.into_iter().map(|local| mapping[local as usize]));
    }
    Some(result)
}

fn tree_depth_order_of_connected_graph<P>(subgraph: &UnGraph, provider: &mut P, depth_bound: i64) -> Option<Vec<NodeId>>
where
    P: FnMut(&UnGraph, i64) -> Vec<NodeId>,
{
    let n = subgraph.num_nodes();
    if n == 0 {
        return Some(Vec::new());
    }

    if subgraph.is_tree() {
        let order = tree_depth_order_of_tree(subgraph);
        let depth = tree_depth_of_parent_array(&parent_array_from_order(subgraph, &order)) as i64;
        return if depth < depth_bound { Some(order) } else { None };
    }
    if subgraph.is_clique() {
        let order: Vec<NodeId> = (0..n as NodeId).collect();
        return if (n as i64) < depth_bound { Some(order) } else { None };
    }

    let mut best = greedy_order(subgraph);
    let mut best_depth = tree_depth_of_parent_array(&parent_array_from_order(subgraph, &best)) as i64;

    let bound = depth_bound.min(best_depth) - 1;
    if bound >= 1 {
        let separator = provider(subgraph, bound);
        if !separator.is_empty() {
            let separator = shrink_separator(subgraph, separator);
            if !separator.is_empty() {
                if let Some(nd_order) = split_along_separator(subgraph, &separator, provider, bound) {
                    let nd_depth = tree_depth_of_parent_array(&parent_array_from_order(subgraph, &nd_order)) as i64;
                    if nd_depth < best_depth {
                        best = nd_order;
                        best_depth = nd_depth;
                    }
                }
            }
        }
    }

    if best_depth >= depth_bound {
        None
    } else {
        Some(best)
    }
}

/// Remove `separator` from `subgraph`, recurse on every resulting
/// connected component with bound `bound`, and if all of them succeed,
/// concatenate their orders followed by the separator nodes — ordered
/// ascending by the tree depth of the child component each node's deepest
/// neighbor fell in, so the separator node touching the deepest subtree
/// is appended last (eliminated last, placed highest in the tree).
fn split_along_separator<P>(subgraph: &UnGraph, separator: &[NodeId], provider: &mut P, bound: i64) -> Option<Vec<NodeId>>
where
    P: FnMut(&UnGraph, i64) -> Vec<NodeId>,
{
    let n = subgraph.num_nodes();
    let mut in_separator = vec![false; n];
    for &s in separator {
        in_separator[s as usize] = true;
    }
    let remaining: Vec<NodeId> = (0..n as NodeId).filter(|&x| !in_separator[x as usize]).collect();
    let (remainder_graph, remainder_to_subgraph) = induced_subgraph(subgraph, &remaining);

    let mut order = Vec::with_capacity(n);
    let mut child_depth_of = vec![0u32; n];

    for (component_graph, mapping) in connected_components(&remainder_graph) {
        let child_order = tree_depth_order_of_connected_graph(&component_graph, provider, bound)?;
        let child_parent = parent_array_from_order(&component_graph, &child_order);
        let child_depth = tree_depth_of_parent_array(&child_parent);

        for &local in &child_order {
            let remainder_local = mapping[local as usize];
            let subgraph_id = remainder_to_subgraph[remainder_local as usize];
            child_depth_of[subgraph_id as usize] = child_depth;
            order.push(subgraph_id);
        }
    }

    let deepest_adjacent_component_depth = |x: NodeId| -> u32 {
        subgraph
            .neighbors(x)
            .iter()
            .filter(|&&y| !in_separator[y as usize])
            .map(|&y| child_depth_of[y as usize])
            .max()
            .unwrap_or(0)
    };

    let mut separator_sorted = separator.to_vec();
    separator_sorted.sort_by(|&a, &b| deepest_adjacent_component_depth(a).cmp(&deepest_adjacent_component_depth(b)).then(a.cmp(&b)));
    order.extend(separator_sorted);

    Some(order)
}
