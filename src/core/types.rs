//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Interned identifier for a world object (including floor tiles).
///
/// Ids are assigned by the [`WorldCatalog`](crate::world::catalog::WorldCatalog)
/// at world load time and are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Shape of a world object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    Brick,
    Plank,
    Ball,
    Pyramid,
    Box,
    Table,
    /// Floor tiles are catalog entries like any other object, one per stack
    Floor,
}

/// Size of a world object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Large,
}

/// Color of a world object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Blue,
    Green,
    Yellow,
    White,
}

impl std::fmt::Display for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Form::Brick => "brick",
            Form::Plank => "plank",
            Form::Ball => "ball",
            Form::Pyramid => "pyramid",
            Form::Box => "box",
            Form::Table => "table",
            Form::Floor => "floor",
        };
        f.write_str(name)
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Size::Small => "small",
            Size::Large => "large",
        })
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::White => "white",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_equality() {
        let a = ObjectId(1);
        let b = ObjectId(1);
        let c = ObjectId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_object_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<ObjectId, &str> = HashMap::new();
        map.insert(ObjectId(1), "ball");
        assert_eq!(map.get(&ObjectId(1)), Some(&"ball"));
    }

    #[test]
    fn test_form_wire_names() {
        let form: Form = serde_json::from_str("\"pyramid\"").unwrap();
        assert_eq!(form, Form::Pyramid);
        assert_eq!(serde_json::to_string(&Form::Box).unwrap(), "\"box\"");
    }

    #[test]
    fn test_display_matches_wire_names() {
        assert_eq!(Form::Brick.to_string(), "brick");
        assert_eq!(Size::Large.to_string(), "large");
        assert_eq!(Color::Yellow.to_string(), "yellow");
    }
}
