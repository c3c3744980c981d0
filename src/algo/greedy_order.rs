//! Greedy minimum-degree elimination order (component B of the nested
//! dissection driver), grounded on `greedy_order.cpp`: repeatedly eliminate
//! the node of smallest degree, contract it into its neighborhood, and bail
//! out to arbitrary order once the remaining graph degenerates into a
//! near-clique.

use crate::datastr::graph::{Graph, NodeId, UnGraph};
use crate::datastr::heap::MinIdHeap;

/// Degree threshold past which the remaining graph is treated as a clique
/// and eliminated in arbitrary order.
const HOT_BAIL_DEGREE: usize = 150;

fn sorted_adjacency(graph: &UnGraph) -> Vec<Vec<NodeId>> {
    let mut adj: Vec<Vec<NodeId>> = (0..graph.num_nodes()).map(|v| graph.neighbors(v as NodeId).to_vec()).collect();
    for list in &mut adj {
        list.sort_unstable();
        list.dedup();
    }
    adj
}

/// Replace `g[node]`'s neighborhood by contracting it: every neighbor's
/// adjacency becomes the union of its own and `node`'s, minus both `node`
/// and itself. Returns `node`'s former neighbor set.
fn contract_node(g: &mut [Vec<NodeId>], node: NodeId) -> Vec<NodeId> {
    let neighbors = g[node as usize].clone();
    for &y in &neighbors {
        let merged = set_union_minus(&g[node as usize], &g[y as usize], node, y);
        g[y as usize] = merged;
    }
    neighbors
}

fn set_union_minus(a: &[NodeId], b: &[NodeId], remove1: NodeId, remove2: NodeId) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let keep = |x: NodeId, out: &mut Vec<NodeId>| {
            if x != remove1 && x != remove2 {
                out.push(x);
            }
        };
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                keep(a[i], &mut out);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                keep(b[j], &mut out);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                keep(a[i], &mut out);
                i += 1;
                j += 1;
            }
        }
    }
    for &x in &a[i..] {
        if x != remove1 && x != remove2 {
            out.push(x);
        }
    }
    for &x in &b[j..] {
        if x != remove1 && x != remove2 {
            out.push(x);
        }
    }
    out
}

/// Compute a greedy minimum-degree elimination order of `graph`.
pub fn greedy_order(graph: &UnGraph) -> Vec<NodeId> {
    let n = graph.num_nodes();
    let mut g = sorted_adjacency(graph);

    let mut queue = MinIdHeap::new(n);
    for x in 0..n as NodeId {
        queue.push(x, g[x as usize].len() as u32);
    }

    let mut order = Vec::with_capacity(n);
    let mut level = vec![0u32; n];

    while let Some(x) = queue.pop() {
        order.push(x);

        if g[x as usize].len() > HOT_BAIL_DEGREE {
            while let Some(rest) = queue.pop() {
                order.push(rest);
            }
            break;
        }

        for y in contract_node(&mut g, x) {
            let lvl = level[x as usize] + 1;
            if level[y as usize] < lvl {
                level[y as usize] = lvl;
            }
            queue.push_or_set_key(y, 8 * level[y as usize] + g[y as usize].len() as u32);
        }
    }

    order
}
