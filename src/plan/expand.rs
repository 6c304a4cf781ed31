//! State expansion: successor world states via "move + lift" or
//! "move + put-down"
//!
//! Infeasible actions produce no successor; nothing here returns an error.

use crate::interpret::legality;
use crate::plan::action::{ActionLabel, ArmOp, Direction};
use crate::plan::context::PlanContext;
use crate::world::relations::{Literal, Relation};
use crate::world::state::WorldState;

/// All successors reachable by moving to another column and acting there.
/// Edge cost = travel distance + 1.
pub fn successors(
    ctx: &PlanContext<'_>,
    state: &WorldState,
) -> Vec<(ActionLabel, WorldState, u32)> {
    let mut edges = Vec::with_capacity(ctx.stack_count.saturating_sub(1));
    for column in 0..ctx.stack_count {
        if column == state.arm {
            continue;
        }
        let distance = state.arm.abs_diff(column);
        let direction = if column > state.arm {
            Direction::Right
        } else {
            Direction::Left
        };
        let next = if state.holding.is_none() {
            lift(ctx, state, column).map(|s| (ActionLabel::with_move(direction, distance, ArmOp::Pick), s))
        } else {
            put_down(ctx, state, column).map(|s| (ActionLabel::with_move(direction, distance, ArmOp::Drop), s))
        };
        if let Some((label, successor)) = next {
            edges.push((label, successor, distance as u32 + 1));
        }
    }
    edges
}

/// Detach the top object of `column` into the arm.
///
/// Fails when the stack has no object above the floor. The next object down
/// (if any) becomes the new top-of-stack marker, and every spatial literal
/// mentioning the lifted object stops applying while it is airborne.
pub fn lift(ctx: &PlanContext<'_>, state: &WorldState, column: usize) -> Option<WorldState> {
    if state.holding.is_some() {
        return None;
    }
    let floor = ctx.catalog.floor_id(column)?;
    let top = state.relations.attop_on(floor)?;

    let mut next = state.clone();
    next.arm = column;
    next.relations
        .remove(&Literal::binary(Relation::AtTop, top, floor));
    if let Some(support_fact) = next.relations.support_of(top) {
        next.relations.remove(&support_fact);
        if let Some(support) = support_fact.arg1 {
            if !ctx.catalog.is_floor(support) {
                next.relations
                    .insert(Literal::binary(Relation::AtTop, support, floor));
            }
        }
    }
    next.relations.drop_spatial_mentions(top);
    next.stacks[column].pop();
    next.holding = Some(top);
    Some(next)
}

/// Put the held object down on `column`, onto its current top object or the
/// floor tile.
///
/// Fails when nothing is held or the placement violates the ontop/inside
/// rules. The placed object becomes the new top; spatial relations of the
/// old support extend to it, and above/under facts tie it to its support.
pub fn put_down(ctx: &PlanContext<'_>, state: &WorldState, column: usize) -> Option<WorldState> {
    let held = state.holding?;
    let floor = ctx.catalog.floor_id(column)?;
    let support = state.relations.attop_on(floor).unwrap_or(floor);
    let relation = legality::placement_allowed(ctx.catalog, held, support)?;

    let mut next = state.clone();
    next.arm = column;
    if support != floor {
        next.relations
            .remove(&Literal::binary(Relation::AtTop, support, floor));
    }
    next.relations.insert(Literal::binary(relation, held, support));
    next.relations
        .insert(Literal::binary(Relation::AtTop, held, floor));
    next.relations.extend_from_support(support, held);
    next.relations
        .insert(Literal::binary(Relation::Above, held, support));
    next.relations
        .insert(Literal::binary(Relation::Under, support, held));
    next.stacks[column].push(held);
    next.holding = None;
    Some(next)
}
