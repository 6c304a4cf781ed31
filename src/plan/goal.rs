//! Goal test against a world state's relation set

use crate::interpret::grounder::Interpretation;
use crate::world::relations::{Literal, Relation};
use crate::world::state::WorldState;

/// A state satisfies the goal disjunction iff at least one conjunction has
/// every literal satisfied.
pub fn is_goal(state: &WorldState, goal: &Interpretation) -> bool {
    goal.conjunctions.iter().any(|conjunction| {
        conjunction
            .literals
            .iter()
            .all(|literal| literal_satisfied(state, literal))
    })
}

/// A `holding` literal matches the arm's slot; anything else must be present
/// verbatim in the relation set.
fn literal_satisfied(state: &WorldState, literal: &Literal) -> bool {
    if literal.relation == Relation::Holding && literal.polarity {
        return state.holding == Some(literal.arg0);
    }
    state.relations.contains(literal)
}
