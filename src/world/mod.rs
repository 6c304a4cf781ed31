//! World catalog, relations and immutable state snapshots

pub mod catalog;
pub mod loader;
pub mod relations;
pub mod state;

pub use catalog::{ObjectFilter, ObjectSpec, WorldCatalog};
pub use loader::{LoadedWorld, WorldLoader};
pub use relations::{Literal, Relation, RelationSet};
pub use state::WorldState;
