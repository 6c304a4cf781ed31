//! Immutable world state snapshots

use crate::core::types::ObjectId;
use crate::world::catalog::WorldCatalog;
use crate::world::relations::RelationSet;
use std::hash::{Hash, Hasher};

/// Snapshot of stacks, arm position, holding slot and derived relation set.
///
/// Every transition produces a new `WorldState`; the predecessor is never
/// mutated, so search nodes stay independently comparable and the search's
/// closed set stays sound.
///
/// The floor tile of each stack is implicit: `stacks` holds objects only,
/// bottom to top.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub stacks: Vec<Vec<ObjectId>>,
    /// Stack index the arm is parked over
    pub arm: usize,
    pub holding: Option<ObjectId>,
    pub relations: RelationSet,
}

// Structural identity is (stacks, arm, holding). The relation set is a
// deterministic function of those given the catalog, so including it would
// only slow down the search's closed-set lookups.
impl PartialEq for WorldState {
    fn eq(&self, other: &Self) -> bool {
        self.arm == other.arm && self.holding == other.holding && self.stacks == other.stacks
    }
}

impl Eq for WorldState {}

impl Hash for WorldState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.stacks.hash(state);
        self.arm.hash(state);
        self.holding.hash(state);
    }
}

impl WorldState {
    /// Build a state with its relation set derived from the stacks
    pub fn derive(
        catalog: &WorldCatalog,
        stacks: Vec<Vec<ObjectId>>,
        arm: usize,
        holding: Option<ObjectId>,
    ) -> Self {
        let relations = RelationSet::derive(catalog, &stacks);
        Self {
            stacks,
            arm,
            holding,
            relations,
        }
    }

    /// Stack index of an identifier: the arm's own index for the held
    /// object, the tile index for a floor, otherwise a search of the stacks.
    pub fn stack_index_of(&self, catalog: &WorldCatalog, id: ObjectId) -> Option<usize> {
        if self.holding == Some(id) {
            return Some(self.arm);
        }
        if let Some(tile) = catalog.floor_index(id) {
            return Some(tile);
        }
        self.stacks
            .iter()
            .position(|stack| stack.contains(&id))
    }

    /// Number of objects stacked above an identifier. The held object has
    /// nothing above it; a floor tile carries its whole stack. An unknown
    /// identifier counts as zero.
    pub fn objects_above(&self, catalog: &WorldCatalog, id: ObjectId) -> usize {
        if self.holding == Some(id) {
            return 0;
        }
        if let Some(tile) = catalog.floor_index(id) {
            return self.stacks.get(tile).map_or(0, Vec::len);
        }
        for stack in &self.stacks {
            if let Some(pos) = stack.iter().position(|&o| o == id) {
                return stack.len() - 1 - pos;
            }
        }
        0
    }

    /// Height of an identifier within its column: floor tiles sit at 0,
    /// objects above them, the held object above everything (the arm carries
    /// it at the top of its column).
    pub fn height_of(&self, catalog: &WorldCatalog, id: ObjectId) -> Option<usize> {
        if self.holding == Some(id) {
            return Some(usize::MAX);
        }
        if catalog.floor_index(id).is_some() {
            return Some(0);
        }
        for stack in &self.stacks {
            if let Some(pos) = stack.iter().position(|&o| o == id) {
                return Some(pos + 1);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Color, Form, Size};
    use crate::world::catalog::ObjectSpec;

    fn small_world() -> (WorldCatalog, WorldState) {
        let mut catalog = WorldCatalog::new();
        let a = catalog
            .intern("a", ObjectSpec::new(Form::Brick, Size::Large, Color::Green))
            .unwrap();
        let b = catalog
            .intern("b", ObjectSpec::new(Form::Brick, Size::Small, Color::White))
            .unwrap();
        catalog.add_floor_tiles(3).unwrap();
        let state = WorldState::derive(&catalog, vec![vec![a, b], vec![], vec![]], 1, None);
        (catalog, state)
    }

    #[test]
    fn test_structural_identity_ignores_relations() {
        let (_, state) = small_world();
        let mut other = state.clone();
        other.relations = RelationSet::new();
        assert_eq!(state, other);
    }

    #[test]
    fn test_stack_index_of() {
        let (catalog, state) = small_world();
        let a = catalog.id_by_name("a").unwrap();
        let floor2 = catalog.floor_id(2).unwrap();
        assert_eq!(state.stack_index_of(&catalog, a), Some(0));
        assert_eq!(state.stack_index_of(&catalog, floor2), Some(2));
    }

    #[test]
    fn test_held_object_resolves_to_arm_index() {
        let (catalog, mut state) = small_world();
        let b = catalog.id_by_name("b").unwrap();
        state.stacks[0].pop();
        state.holding = Some(b);
        state.arm = 2;
        assert_eq!(state.stack_index_of(&catalog, b), Some(2));
        assert_eq!(state.objects_above(&catalog, b), 0);
    }

    #[test]
    fn test_objects_above() {
        let (catalog, state) = small_world();
        let a = catalog.id_by_name("a").unwrap();
        let b = catalog.id_by_name("b").unwrap();
        let floor0 = catalog.floor_id(0).unwrap();
        assert_eq!(state.objects_above(&catalog, a), 1);
        assert_eq!(state.objects_above(&catalog, b), 0);
        assert_eq!(state.objects_above(&catalog, floor0), 2);
    }
}
