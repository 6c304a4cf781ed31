//! Heuristic cost estimation for the goal disjunction
//!
//! Per conjunction, take the maximum of its literals' estimates (a
//! conjunction cannot cost less than its hardest literal); over the
//! disjunction, take the minimum (the search may pursue whichever disjunct
//! is cheapest). Not formally proven admissible.

use crate::core::types::ObjectId;
use crate::interpret::grounder::Interpretation;
use crate::plan::context::PlanContext;
use crate::world::relations::{Literal, Relation};
use crate::world::state::WorldState;

/// Estimated cost from `state` to the goal disjunction
pub fn estimate(ctx: &PlanContext<'_>, state: &WorldState, goal: &Interpretation) -> u32 {
    goal.conjunctions
        .iter()
        .map(|conjunction| {
            conjunction
                .literals
                .iter()
                .map(|literal| literal_estimate(ctx, state, literal))
                .max()
                .unwrap_or(0)
        })
        .min()
        .unwrap_or(0)
}

fn literal_estimate(ctx: &PlanContext<'_>, state: &WorldState, literal: &Literal) -> u32 {
    match literal.relation {
        Relation::OnTop | Relation::Inside => {
            if state.relations.contains(literal) {
                return 0;
            }
            let Some(site) = literal.arg1 else { return 0 };
            4 * above_count(ctx, state, literal.arg0)
                + 4 * above_count(ctx, state, site)
                + x_distance(ctx, state, literal.arg0, site)
        }
        Relation::Above | Relation::Under => {
            let Some(site) = literal.arg1 else { return 0 };
            if side_matches(ctx, state, literal) {
                return 0;
            }
            let burden = above_count(ctx, state, literal.arg0).min(above_count(ctx, state, site));
            x_distance(ctx, state, literal.arg0, site) + 4 * burden
        }
        Relation::LeftOf | Relation::RightOf => {
            let Some(site) = literal.arg1 else { return 0 };
            if side_matches(ctx, state, literal) {
                return 0;
            }
            x_distance(ctx, state, literal.arg0, site) + 1
        }
        Relation::Beside => {
            let Some(site) = literal.arg1 else { return 0 };
            x_distance(ctx, state, literal.arg0, site).saturating_sub(1)
        }
        Relation::Holding => {
            let travel = match state.stack_index_of(ctx.catalog, literal.arg0) {
                Some(column) => state.arm.abs_diff(column) as u32,
                None => {
                    log_undefined(ctx, state, literal.arg0);
                    0
                }
            };
            travel + above_count(ctx, state, literal.arg0)
        }
        // unmodeled relations never block the search, they just give no
        // guidance
        _ => 0,
    }
}

/// Which side of `b` does `a` currently sit on?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Above,
    Under,
}

fn side_matches(ctx: &PlanContext<'_>, state: &WorldState, literal: &Literal) -> bool {
    let expected = match literal.relation {
        Relation::LeftOf => Side::Left,
        Relation::RightOf => Side::Right,
        Relation::Above => Side::Above,
        Relation::Under => Side::Under,
        _ => return false,
    };
    let Some(site) = literal.arg1 else {
        return false;
    };
    which_side(ctx, state, literal.arg0, site) == Some(expected)
}

fn which_side(
    ctx: &PlanContext<'_>,
    state: &WorldState,
    a: ObjectId,
    b: ObjectId,
) -> Option<Side> {
    let column_a = state.stack_index_of(ctx.catalog, a)?;
    let column_b = state.stack_index_of(ctx.catalog, b)?;
    if column_a < column_b {
        return Some(Side::Left);
    }
    if column_a > column_b {
        return Some(Side::Right);
    }
    let height_a = state.height_of(ctx.catalog, a)?;
    let height_b = state.height_of(ctx.catalog, b)?;
    if height_a > height_b {
        Some(Side::Above)
    } else {
        Some(Side::Under)
    }
}

fn above_count(
    ctx: &PlanContext<'_>,
    state: &WorldState,
    id: ObjectId,
) -> u32 {
    state.objects_above(ctx.catalog, id) as u32
}

/// Horizontal stack distance between two identifiers; an identifier that
/// cannot be located resolves to distance 0 and is logged, never faulted.
fn x_distance(
    ctx: &PlanContext<'_>,
    state: &WorldState,
    a: ObjectId,
    b: ObjectId,
) -> u32 {
    let column_a = state.stack_index_of(ctx.catalog, a);
    let column_b = state.stack_index_of(ctx.catalog, b);
    match (column_a, column_b) {
        (Some(ca), Some(cb)) => ca.abs_diff(cb) as u32,
        _ => {
            if column_a.is_none() {
                log_undefined(ctx, state, a);
            }
            if column_b.is_none() {
                log_undefined(ctx, state, b);
            }
            0
        }
    }
}

fn log_undefined(ctx: &PlanContext<'_>, state: &WorldState, id: ObjectId) {
    tracing::warn!(
        object = ctx.catalog.name(id).unwrap_or("?"),
        arm = state.arm,
        "object not found in any stack while estimating; treating distance as 0"
    );
}
