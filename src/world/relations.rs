//! Relations between world objects: literals used both as facts in a world
//! state's relation set and as goal atoms

use crate::core::types::{Form, ObjectId};
use crate::world::catalog::WorldCatalog;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Binary (or unary, for `holding`) relation between objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    OnTop,
    Inside,
    Above,
    Under,
    LeftOf,
    RightOf,
    Beside,
    Holding,
    /// Internal marker: current top object of a stack, second argument is
    /// the stack's floor tile
    AtTop,
}

impl Relation {
    /// Relations that stop applying while an object is airborne and are
    /// propagated across stacking: leftof, rightof, above, under, beside
    pub fn is_spatial(self) -> bool {
        matches!(
            self,
            Relation::Above
                | Relation::Under
                | Relation::LeftOf
                | Relation::RightOf
                | Relation::Beside
        )
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Relation::OnTop => "ontop",
            Relation::Inside => "inside",
            Relation::Above => "above",
            Relation::Under => "under",
            Relation::LeftOf => "leftof",
            Relation::RightOf => "rightof",
            Relation::Beside => "beside",
            Relation::Holding => "holding",
            Relation::AtTop => "attop",
        };
        f.write_str(name)
    }
}

/// A signed relation over one or two object ids.
///
/// Two literals are equal iff relation, polarity and argument tuple match
/// exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub polarity: bool,
    pub relation: Relation,
    pub arg0: ObjectId,
    pub arg1: Option<ObjectId>,
}

impl Literal {
    pub fn unary(relation: Relation, arg0: ObjectId) -> Self {
        Self {
            polarity: true,
            relation,
            arg0,
            arg1: None,
        }
    }

    pub fn binary(relation: Relation, arg0: ObjectId, arg1: ObjectId) -> Self {
        Self {
            polarity: true,
            relation,
            arg0,
            arg1: Some(arg1),
        }
    }

    pub fn mentions(&self, id: ObjectId) -> bool {
        self.arg0 == id || self.arg1 == Some(id)
    }

    /// Render as e.g. `ontop(e,floor-0)` or `-holding(f)`
    pub fn render(&self, catalog: &WorldCatalog) -> String {
        let name = |id: ObjectId| {
            catalog
                .name(id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", id.0))
        };
        let sign = if self.polarity { "" } else { "-" };
        match self.arg1 {
            Some(arg1) => format!("{sign}{}({},{})", self.relation, name(self.arg0), name(arg1)),
            None => format!("{sign}{}({})", self.relation, name(self.arg0)),
        }
    }
}

/// Set of literal facts describing a world configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationSet {
    facts: AHashSet<Literal>,
}

impl RelationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, literal: Literal) {
        self.facts.insert(literal);
    }

    pub fn remove(&mut self, literal: &Literal) {
        self.facts.remove(literal);
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.facts.contains(literal)
    }

    /// Does a positive binary fact hold?
    pub fn holds(&self, relation: Relation, arg0: ObjectId, arg1: ObjectId) -> bool {
        self.facts.contains(&Literal::binary(relation, arg0, arg1))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.facts.iter()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// The object currently marked as top of the stack owning `floor`
    pub fn attop_on(&self, floor: ObjectId) -> Option<ObjectId> {
        self.facts
            .iter()
            .find(|lit| {
                lit.polarity && lit.relation == Relation::AtTop && lit.arg1 == Some(floor)
            })
            .map(|lit| lit.arg0)
    }

    /// The ontop/inside fact whose subject is `object`, if any
    pub fn support_of(&self, object: ObjectId) -> Option<Literal> {
        self.facts
            .iter()
            .find(|lit| {
                lit.polarity
                    && matches!(lit.relation, Relation::OnTop | Relation::Inside)
                    && lit.arg0 == object
            })
            .copied()
    }

    /// Drop every spatial literal mentioning `id` (lifting it off a stack)
    pub fn drop_spatial_mentions(&mut self, id: ObjectId) {
        self.facts
            .retain(|lit| !(lit.relation.is_spatial() && lit.mentions(id)));
    }

    /// Extend spatial relations from the old top of a stack to a newly
    /// placed object: whatever was beside/above/under/leftof/rightof the old
    /// top remains so relative to the new top.
    pub fn extend_from_support(&mut self, old_top: ObjectId, placed: ObjectId) {
        let copies: Vec<Literal> = self
            .facts
            .iter()
            .filter(|lit| lit.relation.is_spatial() && lit.mentions(old_top))
            .map(|lit| {
                if lit.arg0 == old_top {
                    Literal {
                        arg0: placed,
                        ..*lit
                    }
                } else {
                    Literal {
                        arg1: Some(placed),
                        ..*lit
                    }
                }
            })
            .collect();
        self.facts.extend(copies);
    }

    /// Derive the full relation set for a stack configuration.
    ///
    /// Positions include the implicit floor tile of each stack. The result
    /// is the fixed point maintained by the expander's lift/put-down
    /// transitions: direct ontop/inside supports, above/under for every
    /// ordered pair within a stack, leftof/rightof for every cross-stack
    /// pair and beside for adjacent stacks. attop markers are not included
    /// here; the planner seeds them per run.
    pub fn derive(catalog: &WorldCatalog, stacks: &[Vec<ObjectId>]) -> Self {
        let mut set = Self::new();
        let positions: Vec<Vec<ObjectId>> = stacks
            .iter()
            .enumerate()
            .map(|(i, stack)| {
                let mut column = Vec::with_capacity(stack.len() + 1);
                if let Some(floor) = catalog.floor_id(i) {
                    column.push(floor);
                }
                column.extend(stack.iter().copied());
                column
            })
            .collect();

        for column in &positions {
            for (upper_idx, &upper) in column.iter().enumerate() {
                // direct support
                if upper_idx > 0 {
                    let below = column[upper_idx - 1];
                    let rel = match catalog.get(below) {
                        Some(spec) if spec.form == Form::Box => Relation::Inside,
                        _ => Relation::OnTop,
                    };
                    set.insert(Literal::binary(rel, upper, below));
                }
                for &lower in &column[..upper_idx] {
                    set.insert(Literal::binary(Relation::Above, upper, lower));
                    set.insert(Literal::binary(Relation::Under, lower, upper));
                }
            }
        }

        for (i, left_column) in positions.iter().enumerate() {
            for (j, right_column) in positions.iter().enumerate().skip(i + 1) {
                for &a in left_column {
                    for &b in right_column {
                        set.insert(Literal::binary(Relation::LeftOf, a, b));
                        set.insert(Literal::binary(Relation::RightOf, b, a));
                        if j == i + 1 {
                            set.insert(Literal::binary(Relation::Beside, a, b));
                            set.insert(Literal::binary(Relation::Beside, b, a));
                        }
                    }
                }
            }
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Color, Size};
    use crate::world::catalog::ObjectSpec;

    fn catalog_and_stacks() -> (WorldCatalog, Vec<Vec<ObjectId>>) {
        let mut catalog = WorldCatalog::new();
        let ball = catalog
            .intern("ball", ObjectSpec::new(Form::Ball, Size::Small, Color::Black))
            .unwrap();
        let bx = catalog
            .intern("box", ObjectSpec::new(Form::Box, Size::Large, Color::Yellow))
            .unwrap();
        let brick = catalog
            .intern("brick", ObjectSpec::new(Form::Brick, Size::Large, Color::Green))
            .unwrap();
        catalog.add_floor_tiles(3).unwrap();
        (catalog, vec![vec![bx, ball], vec![brick], vec![]])
    }

    #[test]
    fn test_literal_equality_is_exact() {
        let a = Literal::binary(Relation::OnTop, ObjectId(0), ObjectId(1));
        let b = Literal::binary(Relation::OnTop, ObjectId(0), ObjectId(1));
        assert_eq!(a, b);
        assert_ne!(a, Literal::binary(Relation::OnTop, ObjectId(1), ObjectId(0)));
        assert_ne!(a, Literal { polarity: false, ..a });
    }

    #[test]
    fn test_derive_supports() {
        let (catalog, stacks) = catalog_and_stacks();
        let set = RelationSet::derive(&catalog, &stacks);
        let ball = catalog.id_by_name("ball").unwrap();
        let bx = catalog.id_by_name("box").unwrap();
        let brick = catalog.id_by_name("brick").unwrap();
        let floor0 = catalog.floor_id(0).unwrap();
        let floor1 = catalog.floor_id(1).unwrap();

        // the ball sits inside the box, the box ontop its floor tile
        assert!(set.holds(Relation::Inside, ball, bx));
        assert!(set.holds(Relation::OnTop, bx, floor0));
        assert!(set.holds(Relation::OnTop, brick, floor1));
        assert!(set.holds(Relation::Above, ball, floor0));
        assert!(set.holds(Relation::Under, bx, ball));
    }

    #[test]
    fn test_derive_cross_stack() {
        let (catalog, stacks) = catalog_and_stacks();
        let set = RelationSet::derive(&catalog, &stacks);
        let ball = catalog.id_by_name("ball").unwrap();
        let brick = catalog.id_by_name("brick").unwrap();
        let floor2 = catalog.floor_id(2).unwrap();

        assert!(set.holds(Relation::LeftOf, ball, brick));
        assert!(set.holds(Relation::RightOf, brick, ball));
        assert!(set.holds(Relation::Beside, ball, brick));
        // stacks 0 and 2 are not adjacent
        assert!(set.holds(Relation::LeftOf, ball, floor2));
        assert!(!set.holds(Relation::Beside, ball, floor2));
    }

    #[test]
    fn test_drop_spatial_mentions_keeps_supports() {
        let (catalog, stacks) = catalog_and_stacks();
        let mut set = RelationSet::derive(&catalog, &stacks);
        let ball = catalog.id_by_name("ball").unwrap();
        let bx = catalog.id_by_name("box").unwrap();

        set.drop_spatial_mentions(ball);
        assert!(!set.iter().any(|l| l.relation.is_spatial() && l.mentions(ball)));
        // the support fact is not spatial and survives until explicitly removed
        assert!(set.holds(Relation::Inside, ball, bx));
    }

    #[test]
    fn test_extend_from_support_matches_derive() {
        // dropping the ball into the box must yield the same spatial facts
        // derive() would produce for the new configuration
        let (catalog, _) = catalog_and_stacks();
        let ball = catalog.id_by_name("ball").unwrap();
        let bx = catalog.id_by_name("box").unwrap();
        let brick = catalog.id_by_name("brick").unwrap();

        let mut set = RelationSet::derive(&catalog, &[vec![bx], vec![brick], vec![]]);
        set.extend_from_support(bx, ball);
        set.insert(Literal::binary(Relation::Inside, ball, bx));
        set.insert(Literal::binary(Relation::Above, ball, bx));
        set.insert(Literal::binary(Relation::Under, bx, ball));

        let expected = RelationSet::derive(&catalog, &[vec![bx, ball], vec![brick], vec![]]);
        for lit in expected.iter() {
            assert!(set.contains(lit), "missing {}", lit.render(&catalog));
        }
    }
}
