//! Entity resolution: grounds a referring expression into candidate
//! object-id sets under the/any/all quantifier semantics
//!
//! The result is a 3-level nested id structure:
//! - outer level: distinct interpretations (ambiguous groundings)
//! - middle level: OR branches within one interpretation
//! - inner level: AND sets of ids that must jointly satisfy the description

use crate::core::types::{Form, ObjectId};
use crate::interpret::command::{Entity, Quantifier};
use crate::world::catalog::WorldCatalog;
use crate::world::relations::RelationSet;
use ahash::AHashSet;

/// Ids that must jointly satisfy a description
pub type AndGroup = Vec<ObjectId>;
/// Alternative AND sets within one interpretation
pub type OrGroup = Vec<AndGroup>;
/// Distinct interpretations of one referring expression
pub type EntityGrounding = Vec<OrGroup>;

/// Resolve a referring expression against the catalog and the current
/// relation set.
///
/// An empty result means the expression is unsatisfiable in this world; a
/// result with more than one interpretation is an ambiguity the caller must
/// disambiguate.
pub fn resolve_entity(
    entity: &Entity,
    catalog: &WorldCatalog,
    relations: &RelationSet,
) -> EntityGrounding {
    let filter = &entity.object.filter;
    let matches = catalog.select(filter);

    // any floor tile is interchangeable
    let quantifier = if entity.quantifier == Quantifier::The && filter.form == Some(Form::Floor) {
        Quantifier::Any
    } else {
        entity.quantifier
    };

    let grounded = match &entity.object.location {
        Some(location) => {
            // resolve the location first; each of its interpretations
            // narrows the matches to objects holding the stated relation to
            // every member of at least one of its AND sets
            let sites = resolve_entity(&location.entity, catalog, relations);
            let narrowed: Vec<Vec<ObjectId>> = sites
                .iter()
                .map(|site_or| {
                    matches
                        .iter()
                        .copied()
                        .filter(|&obj| {
                            site_or.iter().any(|site_and| {
                                site_and
                                    .iter()
                                    .all(|&site| relations.holds(location.relation, obj, site))
                            })
                        })
                        .collect()
                })
                .collect();
            quantify_narrowed(&narrowed, quantifier)
        }
        None => quantify_plain(&matches, quantifier),
    };

    dedup(grounded)
}

/// Quantify a plain (location-free) match list
fn quantify_plain(matches: &[ObjectId], quantifier: Quantifier) -> EntityGrounding {
    match quantifier {
        // one singleton interpretation per match: k>1 is an ambiguity
        Quantifier::The => matches.iter().map(|&m| vec![vec![m]]).collect(),
        // one interpretation whose branches each pick one match
        Quantifier::Any => vec![matches.iter().map(|&m| vec![m]).collect()],
        // one interpretation, one AND set holding every match
        Quantifier::All => vec![vec![matches.to_vec()]],
    }
}

/// Quantify per location reading; each narrowed set came from one reading
fn quantify_narrowed(narrowed: &[Vec<ObjectId>], quantifier: Quantifier) -> EntityGrounding {
    match quantifier {
        // flatten across readings, one singleton interpretation per object
        Quantifier::The => narrowed
            .iter()
            .flat_map(|set| set.iter().map(|&m| vec![vec![m]]))
            .collect(),
        Quantifier::Any => narrowed
            .iter()
            .map(|set| set.iter().map(|&m| vec![m]).collect())
            .collect(),
        Quantifier::All => narrowed.iter().map(|set| vec![set.clone()]).collect(),
    }
}

/// Remove structurally duplicate interpretations: only the final candidate
/// sets matter, not the derivation path. Equality is canonical (sorted id
/// tuples), independent of construction order.
fn dedup(grounding: EntityGrounding) -> EntityGrounding {
    let mut seen: AHashSet<OrGroup> = AHashSet::new();
    grounding
        .into_iter()
        .filter(|or_group| seen.insert(canonical(or_group)))
        .collect()
}

fn canonical(or_group: &OrGroup) -> OrGroup {
    let mut sorted: OrGroup = or_group
        .iter()
        .map(|and_group| {
            let mut and_group = and_group.clone();
            and_group.sort();
            and_group
        })
        .collect();
    sorted.sort();
    sorted
}
