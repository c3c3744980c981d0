//! Symmetric (undirected) graph model: a node is a `NodeId`, arcs are
//! stored in reverse pairs and sorted by `tail` into a CSR-style
//! `first_out` adjacency, mirroring the host engine's `FirstOutGraph`.

/// Node ids are 32bit unsigned ints.
pub type NodeId = u32;

/// Base trait for graphs — number of nodes/arcs and per-node degree.
pub trait Graph {
    fn num_nodes(&self) -> usize;
    fn num_arcs(&self) -> usize;
    fn degree(&self, node: NodeId) -> usize;
}

/// A simple, owned, symmetric graph: `tail`/`head` hold one entry per
/// directed arc (so an undirected edge contributes two entries), sorted by
/// `tail`, with `first_out[v]..first_out[v+1]` indexing the arcs leaving
/// `v` and `back[a]` pointing at the reverse of arc `a`.
#[derive(Debug, Clone)]
pub struct UnGraph {
    first_out: Vec<u32>,
    head: Vec<NodeId>,
    back: Vec<u32>,
}

impl UnGraph {
    /// Build from an undirected edge list. Each `(u, v)` becomes the arc
    /// pair `(u, v)` / `(v, u)`. Self-loops and duplicate edges must
    /// already have been rejected by the caller (see `io::pace`).
    pub fn from_edges(num_nodes: usize, edges: &[(NodeId, NodeId)]) -> Self {
        let mut degree = vec![0u32; num_nodes];
        for &(u, v) in edges {
            degree[u as usize] += 1;
            degree[v as usize] += 1;
        }

        let mut first_out = vec![0u32; num_nodes + 1];
        for v in 0..num_nodes {
            first_out[v + 1] = first_out[v] + degree[v];
        }

        let num_arcs = first_out[num_nodes] as usize;
        let mut head = vec![0u32; num_arcs];
        let mut next_slot = first_out.clone();

        for &(u, v) in edges {
            let slot_u = next_slot[u as usize];
            head[slot_u as usize] = v;
            next_slot[u as usize] += 1;

            let slot_v = next_slot[v as usize];
            head[slot_v as usize] = u;
            next_slot[v as usize] += 1;
        }

        let mut back = vec![0u32; num_arcs];
        // locate, for each arc (u -> v), the slot of (v -> u). Since both
        // directions were inserted from the same edge, a per-tail cursor
        // walking head[v]'s slots in lockstep with the insertion order works.
        let mut cursor = first_out.clone();
        for (u, v) in edges.iter().copied() {
            let slot_u = cursor[u as usize];
            cursor[u as usize] += 1;
            let slot_v = cursor[v as usize];
            cursor[v as usize] += 1;
            back[slot_u as usize] = slot_v;
            back[slot_v as usize] = slot_u;
        }

        Self { first_out, head, back }
    }

    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        let start = self.first_out[node as usize] as usize;
        let end = self.first_out[node as usize + 1] as usize;
        &self.head[start..end]
    }

    pub fn back_arc(&self, arc: u32) -> u32 {
        self.back[arc as usize]
    }

    pub fn first_out(&self) -> &[u32] {
        &self.first_out
    }

    pub fn head_slice(&self) -> &[NodeId] {
        &self.head
    }

    /// Arc tail of arc `a`, derived from `first_out` via binary search.
    pub fn tail_of(&self, arc: u32) -> NodeId {
        match self.first_out.binary_search(&(arc + 1)) {
            Ok(v) => v as NodeId - 1,
            Err(v) => v as NodeId - 1,
        }
    }

    /// Whether the graph is a tree: connected and `m == 2(n-1)`.
    pub fn is_tree(&self) -> bool {
        self.num_nodes() > 0 && self.num_arcs() == 2 * (self.num_nodes() - 1)
    }

    /// Whether the graph is a complete graph on its node set.
    pub fn is_clique(&self) -> bool {
        let n = self.num_nodes();
        self.num_arcs() == n * n.saturating_sub(1)
    }

    /// One `(u, v)` pair per undirected edge, each arc pair counted once.
    pub fn edge_list(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::with_capacity(self.num_arcs() / 2);
        for a in 0..self.num_arcs() as u32 {
            let b = self.back_arc(a);
            if a < b {
                edges.push((self.tail_of(a), self.head[a as usize]));
            }
        }
        edges
    }
}

/// The subgraph induced by `keep` (given in this graph's local ids),
/// relabeled to `0..keep.len()` in the order `keep` lists them. Returns the
/// new graph together with the `new id -> keep[..]` mapping.
pub fn induced_subgraph(graph: &UnGraph, keep: &[NodeId]) -> (UnGraph, Vec<NodeId>) {
    let mut local_id = vec![None; graph.num_nodes()];
    for (i, &g) in keep.iter().enumerate() {
        local_id[g as usize] = Some(i as NodeId);
    }

    let mut edges = Vec::new();
    for &u in keep {
        let lu = local_id[u as usize].unwrap();
        for &v in graph.neighbors(u) {
            if let Some(lv) = local_id[v as usize] {
                if lu < lv {
                    edges.push((lu, lv));
                }
            }
        }
    }

    (UnGraph::from_edges(keep.len(), &edges), keep.to_vec())
}

/// Split `graph` into its connected components, each as an owned subgraph
/// with ids relabeled to `0..component_size`, paired with the mapping back
/// to `graph`'s own local ids.
pub fn connected_components(graph: &UnGraph) -> Vec<(UnGraph, Vec<NodeId>)> {
    let n = graph.num_nodes();
    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for start in 0..n as NodeId {
        if visited[start as usize] {
            continue;
        }
        visited[start as usize] = true;
        let mut queue = vec![start];
        let mut head = 0;
        while head < queue.len() {
            let x = queue[head];
            head += 1;
            for &y in graph.neighbors(x) {
                if !visited[y as usize] {
                    visited[y as usize] = true;
                    queue.push(y);
                }
            }
        }
        components.push(induced_subgraph(graph, &queue));
    }

    components
}

impl Graph for UnGraph {
    fn num_nodes(&self) -> usize {
        self.first_out.len() - 1
    }

    fn num_arcs(&self) -> usize {
        self.head.len()
    }

    fn degree(&self, node: NodeId) -> usize {
        (self.first_out[node as usize + 1] - self.first_out[node as usize]) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_symmetric() {
        let g = UnGraph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_arcs(), 6);
        assert_eq!(g.degree(0), 2);
        let mut n0 = g.neighbors(0).to_vec();
        n0.sort();
        assert_eq!(n0, vec![1, 2]);
        assert!(g.is_clique());
    }

    #[test]
    fn back_arcs_point_at_the_reverse_arc() {
        let g = UnGraph::from_edges(2, &[(0, 1)]);
        for a in 0..g.num_arcs() as u32 {
            let b = g.back_arc(a);
            assert_eq!(g.back_arc(b), a);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn path_is_tree_not_clique() {
        let g = UnGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        assert!(g.is_tree());
        assert!(!g.is_clique());
    }

    #[test]
    fn connected_components_splits_disjoint_triangles() {
        let g = UnGraph::from_edges(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]);
        let comps = connected_components(&g);
        assert_eq!(comps.len(), 2);
        for (sub, _) in &comps {
            assert_eq!(sub.num_nodes(), 3);
            assert!(sub.is_clique());
        }
    }

    #[test]
    fn induced_subgraph_drops_removed_nodes() {
        let g = UnGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let (sub, mapping) = induced_subgraph(&g, &[0, 1, 3]);
        assert_eq!(sub.num_nodes(), 3);
        assert_eq!(mapping, vec![0, 1, 3]);
        // node 2 (mapping index not present) was the only link to node 3,
        // so in the induced subgraph node 3 becomes isolated.
        assert_eq!(sub.degree(2), 0);
    }
}
