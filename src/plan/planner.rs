//! Planning entry point: search setup, bootstrap action and label decoding
//!
//! Planning always yields a result. An unsatisfiable goal or an exhausted
//! search frontier produces the single `impossible` marker token, never an
//! error.

use crate::interpret::grounder::Interpretation;
use crate::plan::action::{ActionLabel, ArmOp, PlanToken};
use crate::plan::context::PlanContext;
use crate::plan::{expand, goal, heuristic, search};
use crate::world::relations::{Literal, Relation};
use crate::world::state::WorldState;

pub struct Planner;

impl Planner {
    /// Find a shortest action sequence achieving one disjunct of the goal
    pub fn plan(
        ctx: &PlanContext<'_>,
        goal_disjunction: &Interpretation,
        state: &WorldState,
    ) -> Vec<PlanToken> {
        if goal_disjunction.is_empty() {
            tracing::debug!("empty goal disjunction; nothing can satisfy it");
            return vec![PlanToken::Impossible];
        }

        let start = seed_markers(ctx, state);

        // the one action available without moving: lift or put-down at the
        // arm's current column. Injected so the search never needs a free
        // arm move to discover it.
        let bootstrap = if start.holding.is_some() {
            expand::put_down(ctx, &start, start.arm)
                .map(|s| (ActionLabel::arm_only(ArmOp::Drop), s, 1))
        } else {
            expand::lift(ctx, &start, start.arm)
                .map(|s| (ActionLabel::arm_only(ArmOp::Pick), s, 1))
        };

        let start_key = start.clone();
        let labels = search::astar(
            start,
            |s| {
                let mut edges = expand::successors(ctx, s);
                if *s == start_key {
                    if let Some(edge) = bootstrap.clone() {
                        edges.push(edge);
                    }
                }
                edges
            },
            |s| goal::is_goal(s, goal_disjunction),
            |s| heuristic::estimate(ctx, s, goal_disjunction),
        );

        match labels {
            Some(labels) => {
                let mut plan = Vec::new();
                for label in &labels {
                    label.expand(&mut plan);
                }
                tracing::debug!(actions = plan.len(), "plan found");
                plan
            }
            None => {
                tracing::debug!("search frontier exhausted without reaching the goal");
                vec![PlanToken::Impossible]
            }
        }
    }
}

/// Tag the current top object of every stack before searching
fn seed_markers(ctx: &PlanContext<'_>, state: &WorldState) -> WorldState {
    let mut seeded = state.clone();
    for column in 0..seeded.stacks.len() {
        if let (Some(&top), Some(floor)) = (
            seeded.stacks[column].last(),
            ctx.catalog.floor_id(column),
        ) {
            seeded
                .relations
                .insert(Literal::binary(Relation::AtTop, top, floor));
        }
    }
    seeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Color, Form, Size};
    use crate::interpret::grounder::Conjunction;
    use crate::world::catalog::{ObjectSpec, WorldCatalog};

    /// One box on the middle of three stacks, arm at 0, nothing held
    fn box_world() -> (WorldCatalog, WorldState) {
        let mut catalog = WorldCatalog::new();
        let bx = catalog
            .intern("bigRedBox", ObjectSpec::new(Form::Box, Size::Large, Color::Red))
            .unwrap();
        catalog.add_floor_tiles(3).unwrap();
        let state = WorldState::derive(&catalog, vec![vec![], vec![bx], vec![]], 0, None);
        (catalog, state)
    }

    fn goal_of(literals: Vec<Literal>) -> Interpretation {
        Interpretation {
            conjunctions: vec![Conjunction { literals }],
        }
    }

    #[test]
    fn test_move_box_to_another_floor_tile() {
        let (catalog, state) = box_world();
        let ctx = PlanContext::for_state(&catalog, &state);
        let bx = catalog.id_by_name("bigRedBox").unwrap();
        let floor0 = catalog.floor_id(0).unwrap();
        let floor2 = catalog.floor_id(2).unwrap();
        // "the large red box ontop the floor": either free tile works
        let goal = Interpretation {
            conjunctions: vec![
                Conjunction {
                    literals: vec![Literal::binary(Relation::OnTop, bx, floor0)],
                },
                Conjunction {
                    literals: vec![Literal::binary(Relation::OnTop, bx, floor2)],
                },
            ],
        };
        let plan = Planner::plan(&ctx, &goal, &state);
        // move right to the box, pick it, move one column either way, drop
        assert_eq!(plan.len(), 4);
        assert_eq!(plan[0], PlanToken::Right);
        assert_eq!(plan[1], PlanToken::Pick);
        assert!(plan[2] == PlanToken::Left || plan[2] == PlanToken::Right);
        assert_eq!(plan[3], PlanToken::Drop);
    }

    #[test]
    fn test_satisfied_goal_yields_empty_plan() {
        let (catalog, state) = box_world();
        let ctx = PlanContext::for_state(&catalog, &state);
        let bx = catalog.id_by_name("bigRedBox").unwrap();
        let floor1 = catalog.floor_id(1).unwrap();
        let goal = goal_of(vec![Literal::binary(Relation::OnTop, bx, floor1)]);
        assert!(Planner::plan(&ctx, &goal, &state).is_empty());
    }

    #[test]
    fn test_take_uses_bootstrap_action_at_arm_column() {
        let (catalog, mut state) = box_world();
        state.arm = 1;
        let ctx = PlanContext::for_state(&catalog, &state);
        let bx = catalog.id_by_name("bigRedBox").unwrap();
        let goal = goal_of(vec![Literal::unary(Relation::Holding, bx)]);
        // the box sits under the arm; no travel needed
        assert_eq!(Planner::plan(&ctx, &goal, &state), vec![PlanToken::Pick]);
    }

    #[test]
    fn test_empty_goal_is_impossible() {
        let (catalog, state) = box_world();
        let ctx = PlanContext::for_state(&catalog, &state);
        let goal = Interpretation {
            conjunctions: vec![],
        };
        assert_eq!(
            Planner::plan(&ctx, &goal, &state),
            vec![PlanToken::Impossible]
        );
    }

    #[test]
    fn test_unreachable_goal_is_impossible() {
        let (catalog, state) = box_world();
        let ctx = PlanContext::for_state(&catalog, &state);
        let bx = catalog.id_by_name("bigRedBox").unwrap();
        let floor1 = catalog.floor_id(1).unwrap();
        // the box under its own floor tile can never hold
        let goal = goal_of(vec![Literal::binary(Relation::Under, bx, floor1)]);
        assert_eq!(
            Planner::plan(&ctx, &goal, &state),
            vec![PlanToken::Impossible]
        );
    }

    #[test]
    fn test_heuristic_zero_on_goal_states() {
        let (catalog, state) = box_world();
        let ctx = PlanContext::for_state(&catalog, &state);
        let bx = catalog.id_by_name("bigRedBox").unwrap();
        let floor1 = catalog.floor_id(1).unwrap();
        let goal = goal_of(vec![Literal::binary(Relation::OnTop, bx, floor1)]);
        let seeded = seed_markers(&ctx, &state);
        assert!(goal::is_goal(&seeded, &goal));
        assert_eq!(heuristic::estimate(&ctx, &seeded, &goal), 0);
    }
}
