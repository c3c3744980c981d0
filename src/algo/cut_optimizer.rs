//! Local-search cut optimizer (component D), grounded on
//! `bfs_split_separator.h`: single-node and paired-node side flips, judged
//! by one of three acceptance predicates and scheduled in rounds.

use crate::datastr::bitvec::BitVec;
use crate::datastr::graph::{Graph, NodeId, UnGraph};
use rand::seq::SliceRandom;
use rand::Rng;

/// The set of nodes with at least one neighbor on the other side, tracked
/// as both a packed list (for shuffled iteration) and a membership bit
/// (for O(1) checks), exactly as `ActiveNodeSet` does in the original.
pub struct ActiveNodeSet {
    active: Vec<NodeId>,
    is_active: BitVec,
}

impl ActiveNodeSet {
    pub fn new(graph: &UnGraph, side: &[u8]) -> Self {
        let n = graph.num_nodes();
        let mut active = Vec::new();
        let mut is_active = BitVec::new(n);
        for x in 0..n as NodeId {
            if graph.neighbors(x).iter().any(|&y| side[x as usize] != side[y as usize]) {
                active.push(x);
                is_active.set(x as usize, true);
            }
        }
        Self { active, is_active }
    }

    fn activate(&mut self, x: NodeId) {
        if !self.is_active.get(x as usize) {
            self.active.push(x);
            self.is_active.set(x as usize, true);
        }
    }

    fn notify_side_change(&mut self, graph: &UnGraph, x: NodeId) {
        self.activate(x);
        for &y in graph.neighbors(x) {
            self.activate(y);
        }
    }

    fn shuffle<R: Rng>(&mut self, rand: &mut R) {
        self.active.shuffle(rand);
    }

    pub fn is_active(&self, x: NodeId) -> bool {
        self.is_active.get(x as usize)
    }

    fn len(&self) -> usize {
        self.active.len()
    }

    fn get(&self, i: usize) -> NodeId {
        self.active[i]
    }

    /// Drop the entry at `i` if `x` no longer has a neighbor on the other
    /// side; otherwise leave it. Returns whether it stayed active.
    fn retain_if_active(&mut self, i: usize, graph: &UnGraph, side: &[u8]) -> bool {
        let x = self.active[i];
        let still_active = graph.neighbors(x).iter().any(|&y| side[x as usize] != side[y as usize]);
        if !still_active {
            let last = self.active.len() - 1;
            self.active.swap(i, last);
            self.active.pop();
            self.is_active.set(x as usize, false);
        }
        still_active
    }
}

/// `(my_side_neighbors, other_side_neighbors, my_side_size, other_side_size, object_size, other_side_id) -> accept?`
pub type AcceptMove = dyn Fn(i64, i64, i64, i64, i64, u8) -> bool;

pub fn cut_decrease(node_count: usize) -> impl Fn(i64, i64, i64, i64, i64, u8) -> bool {
    let n = node_count as i64;
    move |my_same, other, _my_size, other_size, obj, _other_id| other > my_same && 3 * other_size + obj < 2 * n
}

pub fn cut_decrease_or_balance(node_count: usize) -> impl Fn(i64, i64, i64, i64, i64, u8) -> bool {
    let n = node_count as i64;
    move |my_same, other, my_size, other_size, obj, _other_id| {
        (other > my_same && 3 * other_size + obj < 2 * n) || (my_same == other && other_size + obj < my_size)
    }
}

pub fn rebalance_to_side_0(node_count: usize) -> impl Fn(i64, i64, i64, i64, i64, u8) -> bool {
    let n = node_count as i64;
    move |my_same, other, _my_size, other_size, obj, other_id| my_same == other && other_id == 0 && 3 * other_size + obj < 2 * n
}

fn move_nodes<R: Rng, P: Fn(i64, i64, i64, i64, i64, u8) -> bool>(
    active: &mut ActiveNodeSet,
    graph: &UnGraph,
    side: &mut [u8],
    side_size: &mut [i64; 2],
    rand: &mut R,
    should_move: &P,
) -> usize {
    let mut move_count = 0;
    active.shuffle(rand);

    let mut i = 0;
    while i < active.len() {
        if !active.retain_if_active(i, graph, side) {
            continue;
        }
        let x = active.get(i);

        let my_side = side[x as usize];
        let other_side = 1 - my_side;
        let mut my_side_neighbors = 0i64;
        let mut other_side_neighbors = 0i64;
        for &y in graph.neighbors(x) {
            if side[y as usize] == my_side {
                my_side_neighbors += 1;
            } else {
                other_side_neighbors += 1;
            }
        }

        if should_move(
            my_side_neighbors,
            other_side_neighbors,
            side_size[my_side as usize],
            side_size[other_side as usize],
            1,
            other_side,
        ) {
            side_size[my_side as usize] -= 1;
            side[x as usize] = other_side;
            active.notify_side_change(graph, x);
            side_size[other_side as usize] += 1;
            move_count += 1;
        }
        i += 1;
    }

    move_count
}

fn move_edges<R: Rng, P: Fn(i64, i64, i64, i64, i64, u8) -> bool>(
    active: &mut ActiveNodeSet,
    graph: &UnGraph,
    side: &mut [u8],
    side_size: &mut [i64; 2],
    rand: &mut R,
    should_move: &P,
) -> usize {
    let n = graph.num_nodes();
    let mut move_count = 0;
    let mut is_neighbor_of_x = BitVec::new(n);

    active.shuffle(rand);

    let mut i = 0;
    while i < active.len() {
        if !active.retain_if_active(i, graph, side) {
            continue;
        }
        let x = active.get(i);

        for &y in graph.neighbors(x) {
            is_neighbor_of_x.set(y as usize, true);
        }

        for &y in graph.neighbors(x) {
            let my_side = side[x as usize];
            let other_side = 1 - my_side;
            if (x < y || !active.is_active(y)) && side[y as usize] == my_side {
                let mut my_side_neighbors = 0i64;
                let mut other_side_neighbors = 0i64;
                for &z in graph.neighbors(x) {
                    if side[z as usize] == my_side {
                        my_side_neighbors += 1;
                    } else {
                        other_side_neighbors += 1;
                    }
                }
                for &z in graph.neighbors(y) {
                    if !is_neighbor_of_x.get(z as usize) {
                        if side[z as usize] == my_side {
                            my_side_neighbors += 1;
                        } else {
                            other_side_neighbors += 1;
                        }
                    }
                }
                my_side_neighbors -= 2;

                if should_move(
                    my_side_neighbors,
                    other_side_neighbors,
                    side_size[my_side as usize],
                    side_size[other_side as usize],
                    2,
                    other_side,
                ) {
                    side_size[my_side as usize] -= 2;
                    side[x as usize] = other_side;
                    side[y as usize] = other_side;
                    active.notify_side_change(graph, x);
                    active.notify_side_change(graph, y);
                    side_size[other_side as usize] += 2;
                    move_count += 1;
                }
            }
        }

        for &y in graph.neighbors(x) {
            is_neighbor_of_x.set(y as usize, false);
        }
        i += 1;
    }

    move_count
}

fn move_nodes_and_edges<R: Rng, P: Fn(i64, i64, i64, i64, i64, u8) -> bool>(
    active: &mut ActiveNodeSet,
    graph: &UnGraph,
    side: &mut [u8],
    side_size: &mut [i64; 2],
    rand: &mut R,
    should_move: &P,
) -> usize {
    move_nodes(active, graph, side, side_size, rand, should_move) + move_edges(active, graph, side, side_size, rand, should_move)
}

const ROUND_COUNT: usize = 8;
const MIN_MOVES_TO_CONTINUE: usize = 10;

fn run_rounds<R: Rng, P: Fn(i64, i64, i64, i64, i64, u8) -> bool>(
    active: &mut ActiveNodeSet,
    graph: &UnGraph,
    side: &mut [u8],
    side_size: &mut [i64; 2],
    rand: &mut R,
    predicate: &P,
) {
    for _ in 0..ROUND_COUNT {
        if move_nodes_and_edges(active, graph, side, side_size, rand, predicate) < MIN_MOVES_TO_CONTINUE {
            break;
        }
    }
}

/// Refine a 2-coloring in place: reduce the cut, then rebalance, then
/// alternate side-0 rebalancing with further cut reduction and balancing
/// for up to 20 outer rounds.
pub fn optimize_cut<R: Rng>(graph: &UnGraph, side: &mut [u8], rand: &mut R) {
    let n = graph.num_nodes();
    let mut active = ActiveNodeSet::new(graph, side);

    let mut side_size = [0i64; 2];
    for &s in side.iter() {
        side_size[s as usize] += 1;
    }

    let decrease = cut_decrease(n);
    let balance = cut_decrease_or_balance(n);
    let rebalance = rebalance_to_side_0(n);

    run_rounds(&mut active, graph, side, &mut side_size, rand, &decrease);
    run_rounds(&mut active, graph, side, &mut side_size, rand, &balance);

    for _ in 0..20 {
        run_rounds(&mut active, graph, side, &mut side_size, rand, &rebalance);
        run_rounds(&mut active, graph, side, &mut side_size, rand, &decrease);
        run_rounds(&mut active, graph, side, &mut side_size, rand, &balance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn optimize_cut_never_increases_cut_size() {
        let g = UnGraph::from_edges(8, &[(0, 1), (1, 2), (2, 3), (3, 0), (4, 5), (5, 6), (6, 7), (7, 4), (0, 4)]);
        let mut side = vec![0u8, 0, 0, 0, 1, 1, 1, 1];

        let cut_size = |side: &[u8]| -> usize {
            let mut c = 0;
            for x in 0..g.num_nodes() as NodeId {
                for &y in g.neighbors(x) {
                    if side[x as usize] != side[y as usize] {
                        c += 1;
                    }
                }
            }
            c / 2
        };

        let before = cut_size(&side);
        let mut rng = StdRng::seed_from_u64(7);
        optimize_cut(&g, &mut side, &mut rng);
        let after = cut_size(&side);
        assert!(after <= before);
    }
}
