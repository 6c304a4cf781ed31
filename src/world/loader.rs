//! Load worlds from JSON files
//!
//! The wire format is the classic blocks-world shape:
//!
//! ```json
//! {
//!   "stacks": [["e"], ["g", "l"], []],
//!   "holding": null,
//!   "arm": 0,
//!   "objects": { "e": {"form": "ball", "size": "large", "color": "white"} }
//! }
//! ```

use crate::core::{Result, StackError};
use crate::world::catalog::{ObjectSpec, WorldCatalog};
use crate::world::state::WorldState;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Serde mirror of a world file
#[derive(Debug, Clone, Deserialize)]
pub struct WorldFile {
    pub stacks: Vec<Vec<String>>,
    #[serde(default)]
    pub holding: Option<String>,
    #[serde(default)]
    pub arm: usize,
    pub objects: HashMap<String, ObjectSpec>,
}

/// Catalog plus initial state built from a world file
#[derive(Debug, Clone)]
pub struct LoadedWorld {
    pub catalog: WorldCatalog,
    pub state: WorldState,
}

/// Loader that converts world JSON into a catalog and an initial state
pub struct WorldLoader;

impl WorldLoader {
    pub fn load_from_json(json: &str) -> Result<LoadedWorld> {
        let file: WorldFile = serde_json::from_str(json)?;
        Self::build(&file)
    }

    pub fn load_from_file(path: &Path) -> Result<LoadedWorld> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_json(&content)
    }

    fn build(file: &WorldFile) -> Result<LoadedWorld> {
        let mut catalog = WorldCatalog::new();

        // sorted for deterministic id assignment across runs
        let mut names: Vec<&String> = file.objects.keys().collect();
        names.sort();
        for name in names {
            catalog.intern(name, file.objects[name])?;
        }
        catalog.add_floor_tiles(file.stacks.len())?;

        let mut seen = ahash::AHashSet::new();
        let mut stacks = Vec::with_capacity(file.stacks.len());
        for column in &file.stacks {
            let mut stack = Vec::with_capacity(column.len());
            for name in column {
                let id = catalog
                    .id_by_name(name)
                    .ok_or_else(|| StackError::UnknownObject(name.clone()))?;
                if !seen.insert(id) {
                    return Err(StackError::MalformedWorld(format!(
                        "object {name:?} appears in more than one stack position"
                    )));
                }
                stack.push(id);
            }
            stacks.push(stack);
        }

        let holding = match &file.holding {
            Some(name) => {
                let id = catalog
                    .id_by_name(name)
                    .ok_or_else(|| StackError::UnknownObject(name.clone()))?;
                if seen.contains(&id) {
                    return Err(StackError::MalformedWorld(format!(
                        "held object {name:?} also appears in a stack"
                    )));
                }
                Some(id)
            }
            None => None,
        };

        if file.arm >= file.stacks.len() {
            return Err(StackError::MalformedWorld(format!(
                "arm position {} outside the {} stacks",
                file.arm,
                file.stacks.len()
            )));
        }

        let state = WorldState::derive(&catalog, stacks, file.arm, holding);
        Ok(LoadedWorld { catalog, state })
    }
}
