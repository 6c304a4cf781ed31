//! Per-run planning context
//!
//! Everything the expander, heuristic and goal test need is carried here
//! explicitly instead of through process-wide state, so repeated or
//! interleaved planning runs stay independently reentrant.

use crate::world::catalog::WorldCatalog;
use crate::world::state::WorldState;

#[derive(Debug, Clone, Copy)]
pub struct PlanContext<'a> {
    pub catalog: &'a WorldCatalog,
    pub stack_count: usize,
}

impl<'a> PlanContext<'a> {
    pub fn new(catalog: &'a WorldCatalog, stack_count: usize) -> Self {
        Self {
            catalog,
            stack_count,
        }
    }

    pub fn for_state(catalog: &'a WorldCatalog, state: &WorldState) -> Self {
        Self::new(catalog, state.stacks.len())
    }
}
