//! Physical legality rules: the static rule table shared by goal pruning
//! and the expander's put-down check

use crate::core::types::{Form, ObjectId, Size};
use crate::interpret::grounder::{Conjunction, Interpretation};
use crate::world::catalog::{ObjectSpec, WorldCatalog};
use crate::world::relations::{Literal, Relation};
use ahash::AHashMap;

/// Can a single positive literal ever hold in this world?
///
/// Negative literals are never rejected. Unknown ids are infeasible.
pub fn literal_feasible(catalog: &WorldCatalog, literal: &Literal) -> bool {
    if !literal.polarity {
        return true;
    }
    let Some(subject) = catalog.get(literal.arg0) else {
        return false;
    };

    if literal.relation == Relation::Holding {
        return !matches!(subject.form, Form::Floor | Form::Table);
    }

    let Some(site_id) = literal.arg1 else {
        return true;
    };
    // no binary relation of an object to itself
    if literal.arg0 == site_id {
        return false;
    }
    let Some(site) = catalog.get(site_id) else {
        return false;
    };

    match literal.relation {
        Relation::OnTop => {
            // things go inside boxes, not ontop of them
            if site.form == Form::Box {
                return false;
            }
            // balls roll off everything but the floor
            if subject.form == Form::Ball && site.form != Form::Floor {
                return false;
            }
            if site.form == Form::Ball {
                return false;
            }
            if is_large(subject) && is_small(site) {
                return false;
            }
            if subject.form == Form::Box && site.form == Form::Pyramid {
                return false;
            }
            if is_small(subject)
                && subject.form == Form::Box
                && is_small(site)
                && site.form == Form::Brick
            {
                return false;
            }
            true
        }
        Relation::Inside => {
            if site.form != Form::Box {
                return false;
            }
            if is_large(subject) && is_small(site) {
                return false;
            }
            // pyramids, planks and boxes need a strictly larger box
            if matches!(subject.form, Form::Pyramid | Form::Plank | Form::Box)
                && subject.size == site.size
            {
                return false;
            }
            true
        }
        Relation::Above => site.form != Form::Ball,
        Relation::Under => subject.form != Form::Ball && site.form != Form::Floor,
        // horizontal relations are unconstrained
        Relation::LeftOf | Relation::RightOf | Relation::Beside => true,
        Relation::Holding => unreachable!("handled above"),
        Relation::AtTop => true,
    }
}

fn is_large(spec: &ObjectSpec) -> bool {
    spec.size == Some(Size::Large)
}

fn is_small(spec: &ObjectSpec) -> bool {
    spec.size == Some(Size::Small)
}

/// Is a whole conjunction internally consistent and statically possible?
///
/// Rejects when any single literal fails the rule table, when two literals
/// place different objects ontop/inside the same support, or when two
/// literals hold different objects.
pub fn conjunction_feasible(catalog: &WorldCatalog, conjunction: &Conjunction) -> bool {
    let mut support_users: AHashMap<ObjectId, ObjectId> = AHashMap::new();
    let mut held: Option<ObjectId> = None;
    for literal in &conjunction.literals {
        if !literal_feasible(catalog, literal) {
            return false;
        }
        if !literal.polarity {
            continue;
        }
        match literal.relation {
            Relation::OnTop | Relation::Inside => {
                if let Some(support) = literal.arg1 {
                    if let Some(previous) = support_users.insert(support, literal.arg0) {
                        if previous != literal.arg0 {
                            return false;
                        }
                    }
                }
            }
            Relation::Holding => {
                if let Some(previous) = held.replace(literal.arg0) {
                    if previous != literal.arg0 {
                        return false;
                    }
                }
            }
            _ => {}
        }
    }
    true
}

/// Remove physically impossible conjunctions from one interpretation.
///
/// An interpretation left with zero conjunctions is for the caller to
/// discard.
pub fn prune(catalog: &WorldCatalog, interpretation: Interpretation) -> Interpretation {
    let conjunctions = interpretation
        .conjunctions
        .into_iter()
        .filter(|conj| conjunction_feasible(catalog, conj))
        .collect();
    Interpretation { conjunctions }
}

/// Placement check for the expander: which relation would putting `object`
/// on `support` create, if the placement is legal at all?
///
/// `Inside` when the support is a box, `OnTop` otherwise, validated against
/// the same rule table goal pruning uses.
pub fn placement_allowed(
    catalog: &WorldCatalog,
    object: ObjectId,
    support: ObjectId,
) -> Option<Relation> {
    let relation = match catalog.get(support) {
        Some(spec) if spec.form == Form::Box => Relation::Inside,
        Some(_) => Relation::OnTop,
        None => return None,
    };
    literal_feasible(catalog, &Literal::binary(relation, object, support)).then_some(relation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Color;
    use crate::world::catalog::ObjectSpec;

    fn rule_catalog() -> WorldCatalog {
        let mut catalog = WorldCatalog::new();
        for (name, form, size) in [
            ("small_ball", Form::Ball, Size::Small),
            ("large_ball", Form::Ball, Size::Large),
            ("small_brick", Form::Brick, Size::Small),
            ("large_brick", Form::Brick, Size::Large),
            ("small_box", Form::Box, Size::Small),
            ("large_box", Form::Box, Size::Large),
            ("small_pyramid", Form::Pyramid, Size::Small),
            ("large_pyramid", Form::Pyramid, Size::Large),
            ("large_plank", Form::Plank, Size::Large),
            ("table", Form::Table, Size::Large),
        ] {
            catalog
                .intern(name, ObjectSpec::new(form, size, Color::Red))
                .unwrap();
        }
        catalog.add_floor_tiles(2).unwrap();
        catalog
    }

    fn feasible(catalog: &WorldCatalog, relation: Relation, a: &str, b: &str) -> bool {
        let a = catalog.id_by_name(a).unwrap();
        let b = catalog.id_by_name(b).unwrap();
        literal_feasible(catalog, &Literal::binary(relation, a, b))
    }

    #[test]
    fn test_holding_floor_or_table_rejected() {
        let catalog = rule_catalog();
        let floor = catalog.floor_id(0).unwrap();
        let table = catalog.id_by_name("table").unwrap();
        let ball = catalog.id_by_name("small_ball").unwrap();
        assert!(!literal_feasible(&catalog, &Literal::unary(Relation::Holding, floor)));
        assert!(!literal_feasible(&catalog, &Literal::unary(Relation::Holding, table)));
        assert!(literal_feasible(&catalog, &Literal::unary(Relation::Holding, ball)));
    }

    #[test]
    fn test_binary_relation_to_self_rejected() {
        let catalog = rule_catalog();
        assert!(!feasible(&catalog, Relation::Beside, "table", "table"));
    }

    #[test]
    fn test_ontop_rules() {
        let catalog = rule_catalog();
        // things go inside boxes, never ontop
        assert!(!feasible(&catalog, Relation::OnTop, "small_ball", "large_box"));
        // balls only rest on the floor
        assert!(!feasible(&catalog, Relation::OnTop, "small_ball", "table"));
        assert!(feasible(&catalog, Relation::OnTop, "small_ball", "floor-0"));
        // nothing rests on a ball
        assert!(!feasible(&catalog, Relation::OnTop, "small_brick", "large_ball"));
        // large on small
        assert!(!feasible(&catalog, Relation::OnTop, "large_brick", "small_pyramid"));
        // boxes never rest on pyramids
        assert!(!feasible(&catalog, Relation::OnTop, "large_box", "large_pyramid"));
        // small box on small brick
        assert!(!feasible(&catalog, Relation::OnTop, "small_box", "small_brick"));
        assert!(feasible(&catalog, Relation::OnTop, "small_brick", "large_brick"));
    }

    #[test]
    fn test_inside_rules() {
        let catalog = rule_catalog();
        assert!(!feasible(&catalog, Relation::Inside, "small_ball", "table"));
        assert!(!feasible(&catalog, Relation::Inside, "large_ball", "small_box"));
        // same-size pyramid/plank/box never fit
        assert!(!feasible(&catalog, Relation::Inside, "large_pyramid", "large_box"));
        assert!(!feasible(&catalog, Relation::Inside, "large_plank", "large_box"));
        assert!(!feasible(&catalog, Relation::Inside, "small_box", "small_box"));
        assert!(feasible(&catalog, Relation::Inside, "small_pyramid", "large_box"));
        assert!(feasible(&catalog, Relation::Inside, "large_ball", "large_box"));
    }

    #[test]
    fn test_above_under_rules() {
        let catalog = rule_catalog();
        assert!(!feasible(&catalog, Relation::Above, "small_brick", "large_ball"));
        assert!(!feasible(&catalog, Relation::Under, "large_ball", "small_brick"));
        assert!(!feasible(&catalog, Relation::Under, "table", "floor-0"));
        assert!(feasible(&catalog, Relation::Above, "small_ball", "table"));
    }

    #[test]
    fn test_negative_literals_always_pass() {
        let catalog = rule_catalog();
        let ball = catalog.id_by_name("small_ball").unwrap();
        let table = catalog.id_by_name("table").unwrap();
        let mut literal = Literal::binary(Relation::OnTop, ball, table);
        literal.polarity = false;
        assert!(literal_feasible(&catalog, &literal));
    }

    #[test]
    fn test_two_objects_on_same_support_rejected() {
        let catalog = rule_catalog();
        let b1 = catalog.id_by_name("small_brick").unwrap();
        let b2 = catalog.id_by_name("small_pyramid").unwrap();
        let support = catalog.id_by_name("large_brick").unwrap();
        let conj = Conjunction {
            literals: vec![
                Literal::binary(Relation::OnTop, b1, support),
                Literal::binary(Relation::OnTop, b2, support),
            ],
        };
        assert!(!conjunction_feasible(&catalog, &conj));
    }

    #[test]
    fn test_two_held_objects_rejected() {
        let catalog = rule_catalog();
        let b1 = catalog.id_by_name("small_brick").unwrap();
        let b2 = catalog.id_by_name("small_ball").unwrap();
        let conj = Conjunction {
            literals: vec![
                Literal::unary(Relation::Holding, b1),
                Literal::unary(Relation::Holding, b2),
            ],
        };
        assert!(!conjunction_feasible(&catalog, &conj));
    }

    #[test]
    fn test_prune_filters_conjunctions() {
        let catalog = rule_catalog();
        let ball = catalog.id_by_name("small_ball").unwrap();
        let table = catalog.id_by_name("table").unwrap();
        let floor = catalog.floor_id(0).unwrap();
        let interp = Interpretation {
            conjunctions: vec![
                Conjunction {
                    literals: vec![Literal::binary(Relation::OnTop, ball, table)],
                },
                Conjunction {
                    literals: vec![Literal::binary(Relation::OnTop, ball, floor)],
                },
            ],
        };
        let pruned = prune(&catalog, interp);
        assert_eq!(pruned.conjunctions.len(), 1);
        assert_eq!(
            pruned.conjunctions[0].literals[0],
            Literal::binary(Relation::OnTop, ball, floor)
        );
    }

    #[test]
    fn test_placement_picks_relation_by_support_form() {
        let catalog = rule_catalog();
        let ball = catalog.id_by_name("small_ball").unwrap();
        let bx = catalog.id_by_name("large_box").unwrap();
        let floor = catalog.floor_id(0).unwrap();
        let table = catalog.id_by_name("table").unwrap();
        assert_eq!(placement_allowed(&catalog, ball, bx), Some(Relation::Inside));
        assert_eq!(placement_allowed(&catalog, ball, floor), Some(Relation::OnTop));
        assert_eq!(placement_allowed(&catalog, ball, table), None);
    }
}
