//! Command trees produced by the external grammar parser
//!
//! The grammar engine is a black box: it turns raw text into one or more
//! ambiguous trees of this shape, serialized as JSON. This module is the
//! contract for that boundary, plus the recursive rendering used when the
//! user must pick between multiple parses.

use crate::world::catalog::ObjectFilter;
use crate::world::relations::Relation;
use serde::{Deserialize, Serialize};

/// What the command asks the manipulator to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandAction {
    /// Pick up an object
    Take,
    /// Move an object to a location
    Move,
    /// Legacy synonym: drop the held object at a location. Normalized to
    /// `Move` of the held object by the interpreter.
    Put,
}

/// One parsed reading of an utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandTree {
    pub action: CommandAction,
    /// What object to act on; absent for "it" (the currently held object)
    #[serde(default)]
    pub entity: Option<Entity>,
    /// Where to put it; absent for `take`
    #[serde(default)]
    pub location: Option<Location>,
}

/// A referring expression: quantifier plus object description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub quantifier: Quantifier,
    pub object: ObjectDesc,
}

/// How many matching objects the expression denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantifier {
    /// Exactly one; several matches are an ambiguity
    The,
    /// An arbitrary one of the matches
    Any,
    /// Every match, jointly
    All,
}

/// Descriptive filter with an optional nested location constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDesc {
    #[serde(flatten)]
    pub filter: ObjectFilter,
    #[serde(default)]
    pub location: Option<Box<Location>>,
}

/// A binary relation to another referring expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub relation: Relation,
    pub entity: Entity,
}

impl CommandTree {
    /// Human-readable rendering for parse-tree disambiguation, with
    /// parentheses indicating precedence
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(match self.action {
            CommandAction::Take => "take",
            CommandAction::Move => "move",
            CommandAction::Put => "put",
        });
        match &self.entity {
            Some(entity) => {
                out.push_str(" (");
                out.push_str(&entity.render());
                out.push(')');
            }
            None => out.push_str(" it"),
        }
        if let Some(location) = &self.location {
            out.push(' ');
            out.push_str(&location.render());
        }
        out
    }
}

impl Entity {
    pub fn render(&self) -> String {
        let quant = match self.quantifier {
            Quantifier::The => "the",
            Quantifier::Any => "any",
            Quantifier::All => "all",
        };
        format!("{quant} {}", self.object.render())
    }
}

impl ObjectDesc {
    pub fn render(&self) -> String {
        let mut words = Vec::new();
        if let Some(size) = self.filter.size {
            words.push(size.to_string());
        }
        if let Some(color) = self.filter.color {
            words.push(color.to_string());
        }
        match self.filter.form {
            Some(form) => words.push(form.to_string()),
            None => words.push("object".to_string()),
        }
        let mut out = words.join(" ");
        if let Some(location) = &self.location {
            out.push(' ');
            out.push_str(&location.render());
        }
        out
    }
}

impl Location {
    pub fn render(&self) -> String {
        format!("{} ({})", self.relation, self.entity.render())
    }
}
