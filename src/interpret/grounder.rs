//! Command grounding: combines resolved entity and location id sets with a
//! relation name into goal-literal conjunctions

use crate::core::types::ObjectId;
use crate::interpret::resolver::EntityGrounding;
use crate::world::catalog::WorldCatalog;
use crate::world::relations::{Literal, Relation};
use serde::{Deserialize, Serialize};

/// AND set of literals that must hold simultaneously
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conjunction {
    pub literals: Vec<Literal>,
}

/// A goal: disjunction of conjunctions, satisfied when every literal of at
/// least one conjunction holds. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub conjunctions: Vec<Conjunction>,
}

impl Interpretation {
    pub fn is_empty(&self) -> bool {
        self.conjunctions.is_empty()
    }

    /// Render as e.g. `ontop(e,floor-0) & ontop(f,floor-1) | inside(e,k)`
    pub fn render(&self, catalog: &WorldCatalog) -> String {
        self.conjunctions
            .iter()
            .map(|conj| {
                conj.literals
                    .iter()
                    .map(|lit| lit.render(catalog))
                    .collect::<Vec<_>>()
                    .join(" & ")
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Ground every (entity interpretation x location interpretation) pair into
/// one candidate goal.
///
/// A multi-branch location reading takes the full cross product between each
/// entity AND set and the flattened location members; some pairings will
/// later prove physically impossible, which is deliberate — impossibility is
/// the pruner's job, not the grounder's. A single-branch location reading
/// pairs every entity with every member of that branch instead, which keeps
/// "all X on the same Y" from exploding combinatorially. A `None` location
/// produces unary literals (e.g. `holding`).
pub fn ground(
    entities: &EntityGrounding,
    locations: Option<&EntityGrounding>,
    relation: Relation,
) -> Vec<Interpretation> {
    // a missing location becomes a single pseudo reading whose only member
    // pairs each entity into a unary literal
    let site_readings: Vec<Vec<Vec<Option<ObjectId>>>> = match locations {
        Some(grounding) => grounding
            .iter()
            .map(|or_group| {
                or_group
                    .iter()
                    .map(|and_group| and_group.iter().map(|&id| Some(id)).collect())
                    .collect()
            })
            .collect(),
        None => vec![vec![vec![None]]],
    };

    let mut interpretations = Vec::new();
    for entity_or in entities {
        for site_or in &site_readings {
            let mut conjunctions = Vec::new();
            for entity_and in entity_or {
                if site_or.len() > 1 {
                    let flat: Vec<Option<ObjectId>> =
                        site_or.iter().flatten().copied().collect();
                    let dimensions = vec![flat; entity_and.len()];
                    for combo in cartesian_product(&dimensions) {
                        let literals = entity_and
                            .iter()
                            .zip(&combo)
                            .map(|(&obj, &site)| make_literal(relation, obj, site))
                            .collect();
                        conjunctions.push(Conjunction { literals });
                    }
                } else if let Some(site_and) = site_or.first() {
                    let mut literals = Vec::new();
                    for &site in site_and {
                        for &obj in entity_and {
                            literals.push(make_literal(relation, obj, site));
                        }
                    }
                    conjunctions.push(Conjunction { literals });
                }
            }
            interpretations.push(Interpretation { conjunctions });
        }
    }
    interpretations
}

fn make_literal(relation: Relation, obj: ObjectId, site: Option<ObjectId>) -> Literal {
    match site {
        Some(site) => Literal::binary(relation, obj, site),
        None => Literal::unary(relation, obj),
    }
}

/// All combinations picking one element per input dimension
fn cartesian_product<T: Clone>(dimensions: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut result: Vec<Vec<T>> = vec![Vec::new()];
    for dimension in dimensions {
        let mut next = Vec::with_capacity(result.len() * dimension.len());
        for prefix in &result {
            for item in dimension {
                let mut combo = prefix.clone();
                combo.push(item.clone());
                next.push(combo);
            }
        }
        result = next;
    }
    result
}
