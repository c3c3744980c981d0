//! Two-seed BFS partitioner (component C): grows a 2-coloring outward from
//! two distinct random seeds, one per side.

use crate::datastr::bitvec::BitVec;
use crate::datastr::graph::{Graph, NodeId, UnGraph};
use rand::Rng;

/// A `side` assignment, 0 or 1 per node.
pub type Side = Vec<u8>;

/// Pick two distinct random seed nodes and flood a 2-coloring outward from
/// them by BFS; a node inherits the side of whichever seed's wavefront
/// reaches it first.
pub fn bfs_two_seed_partition<R: Rng>(graph: &UnGraph, rand: &mut R) -> Side {
    let n = graph.num_nodes();
    assert!(n >= 2, "need at least two nodes to seed a partition");

    let mut side = vec![0u8; n];
    let mut was_pushed = BitVec::new(n);
    let mut queue = Vec::with_capacity(n);

    let s = rand.gen_range(0..n as u32);
    let mut t = rand.gen_range(0..n as u32);
    while t == s {
        t = rand.gen_range(0..n as u32);
    }

    side[s as usize] = 0;
    side[t as usize] = 1;
    was_pushed.set(s, true);
    was_pushed.set(t, true);
    queue.push(s);
    queue.push(t);

    let mut head = 0;
    while head < queue.len() {
        let x = queue[head];
        head += 1;
        for &y in graph.neighbors(x) {
            if !was_pushed.get(y as usize) {
                side[y as usize] = side[x as usize];
                was_pushed.set(y as usize, true);
                queue.push(y);
            }
        }
    }

    side
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn every_node_gets_a_side() {
        let g = UnGraph::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
        let mut rng = StdRng::seed_from_u64(42);
        let side = bfs_two_seed_partition(&g, &mut rng);
        assert_eq!(side.len(), 6);
        assert!(side.iter().any(|&s| s == 0));
    }
}
