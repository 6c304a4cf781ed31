//! Generic best-first (A*) graph search
//!
//! Works over any cloneable state with structural identity: a priority
//! frontier ordered by cost-so-far plus heuristic, a g-score map keyed by
//! state identity, and predecessor links for label-path reconstruction.

use ahash::AHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Frontier entry ordered by estimated total cost
struct FrontierNode<S> {
    state: S,
    f_cost: u32,
}

impl<S> PartialEq for FrontierNode<S> {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost
    }
}

impl<S> Eq for FrontierNode<S> {}

impl<S> Ord for FrontierNode<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse order for a min-heap
        other.f_cost.cmp(&self.f_cost)
    }
}

impl<S> PartialOrd for FrontierNode<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Run A* from `start` until `is_goal` accepts a popped state.
///
/// `successors` yields `(label, state, cost)` edges. Returns the edge labels
/// along a cheapest found path, or `None` when the frontier is exhausted.
pub fn astar<S, L, FS, FG, FH>(
    start: S,
    mut successors: FS,
    mut is_goal: FG,
    mut heuristic: FH,
) -> Option<Vec<L>>
where
    S: Clone + Eq + Hash,
    L: Clone,
    FS: FnMut(&S) -> Vec<(L, S, u32)>,
    FG: FnMut(&S) -> bool,
    FH: FnMut(&S) -> u32,
{
    let mut open = BinaryHeap::new();
    let mut came_from: AHashMap<S, (S, L)> = AHashMap::new();
    let mut g_scores: AHashMap<S, u32> = AHashMap::new();

    g_scores.insert(start.clone(), 0);
    let start_h = heuristic(&start);
    open.push(FrontierNode {
        state: start,
        f_cost: start_h,
    });

    while let Some(current) = open.pop() {
        if is_goal(&current.state) {
            return Some(reconstruct_path(&came_from, current.state));
        }

        let current_g = *g_scores.get(&current.state).unwrap_or(&u32::MAX);

        for (label, neighbor, step_cost) in successors(&current.state) {
            let tentative_g = current_g.saturating_add(step_cost);
            let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&u32::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor.clone(), (current.state.clone(), label));
                g_scores.insert(neighbor.clone(), tentative_g);

                let f_cost = tentative_g.saturating_add(heuristic(&neighbor));
                open.push(FrontierNode {
                    state: neighbor,
                    f_cost,
                });
            }
        }
    }

    None // frontier exhausted
}

/// Walk predecessor links back to the start, collecting edge labels
fn reconstruct_path<S, L>(came_from: &AHashMap<S, (S, L)>, mut current: S) -> Vec<L>
where
    S: Clone + Eq + Hash,
    L: Clone,
{
    let mut labels = Vec::new();
    while let Some((previous, label)) = came_from.get(&current) {
        labels.push(label.clone());
        current = previous.clone();
    }
    labels.reverse();
    labels
}
