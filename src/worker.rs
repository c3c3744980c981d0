//! The worker pool (component N): one thread per core, each running an
//! independent randomized nested-dissection search and racing its
//! candidates through [`crate::signal`]'s shared-best protocol. Grounded
//! on `cooperative/src/dijkstra/potentials/cch_parallelization_util.rs`'s
//! `core_affinity` + `rayon::ThreadPoolBuilder::build_scoped` pattern,
//! swapping its divide-and-conquer cell customization for independent
//! full-graph searches.

use crate::algo::parent_array::{parent_array_from_order, tree_depth_of_parent_array};
use crate::algo::separator::compute_separator_by_running_bfs;
use crate::algo::{greedy_order::greedy_order, tree_depth_order};
use crate::datastr::graph::UnGraph;
use crate::io::pace::format_decomposition;
use crate::report::{self, Timer};
use crate::signal;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Run the search with one worker per available core (or a single
/// in-process worker if `disable-par` is enabled), until the process is
/// interrupted. Never returns under ordinary operation: the signal
/// handler installed by [`crate::signal::install_handlers`] prints the
/// best decomposition found so far and exits the process.
pub fn run(graph: &UnGraph, seed: u64, status: bool, verbose: bool) {
    if cfg!(feature = "disable-par") {
        run_worker(graph, seed, 0, status, verbose);
        return;
    }

    let core_ids = core_affinity::get_core_ids().unwrap_or_default();
    let num_threads = core_ids.len().max(1);

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_scoped(
            move |thread| {
                if let Some(&core_id) = core_ids.get(thread.index()) {
                    core_affinity::set_for_current(core_id);
                }
                thread.run()
            },
            |pool| {
                pool.install(|| {
                    rayon::scope(|s| {
                        for worker_index in 0..num_threads {
                            s.spawn(move |_| {
                                run_worker(graph, seed, worker_index as u64, status, verbose);
                            });
                        }
                    })
                })
            },
        )
        .unwrap();
}

/// A single worker's search loop: seed an independent RNG, compute a
/// baseline greedy order once, then repeatedly attempt nested dissection
/// with a tightening depth bound, installing every strict improvement.
fn run_worker(graph: &UnGraph, seed: u64, worker_index: u64, status: bool, verbose: bool) {
    let worker_name = format!("worker-{}", worker_index);
    let mut rand = StdRng::seed_from_u64(seed.wrapping_add(worker_index).wrapping_mul(0x9E3779B97F4A7C15));
    let timer = Timer::new();

    let baseline_order = greedy_order(graph);
    let baseline_depth = tree_depth_of_parent_array(&parent_array_from_order(graph, &baseline_order)) as i64;
    try_install(graph, &baseline_order, status, verbose, &timer, &worker_name);

    let mut bound = signal::best_depth().map(|d| d as i64).unwrap_or(baseline_depth + 1);

    loop {
        if let Some(shared_best) = signal::best_depth() {
            bound = bound.min(shared_best as i64);
        }
        if bound <= 1 {
            return;
        }

        let mut provider = |g: &UnGraph, max_size: i64| compute_separator_by_running_bfs(g, max_size, &mut rand);
        let found = report::block_reporting(|| tree_depth_order(graph, &mut provider, bound));

        match found {
            Some(order) => {
                bound = try_install(graph, &order, status, verbose, &timer, &worker_name).min(bound);
            }
            None => {
                report::report_candidate(verbose, &timer, bound as u32, &worker_name, true);
            }
        }
    }
}

/// Install `order`'s decomposition if it improves on the shared best,
/// reporting either way, and return the bound the caller should continue
/// searching under (the new shared best if it improved, the prior `bound`
/// otherwise).
fn try_install(graph: &UnGraph, order: &[u32], status: bool, verbose: bool, timer: &Timer, worker_name: &str) -> i64 {
    let parent = parent_array_from_order(graph, order);
    let depth = tree_depth_of_parent_array(&parent);

    let installed = signal::install_if_better(depth, &format_decomposition(depth, &parent));
    if installed {
        report::report_improvement(status, timer, depth, worker_name);
    }
    report::report_candidate(verbose, timer, depth, worker_name, !installed);

    depth as i64
}
