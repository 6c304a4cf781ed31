//! World catalog: per-session registry of objects and the typed filter
//! predicate used by entity resolution

use crate::core::types::{Color, Form, ObjectId, Size};
use crate::core::{Result, StackError};
use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Immutable description of one world object.
///
/// Floor tiles are catalog entries too; they carry no size or color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub form: Form,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub color: Option<Color>,
}

impl ObjectSpec {
    pub fn new(form: Form, size: Size, color: Color) -> Self {
        Self {
            form,
            size: Some(size),
            color: Some(color),
        }
    }

    /// Spec of a floor tile
    pub fn floor() -> Self {
        Self {
            form: Form::Floor,
            size: None,
            color: None,
        }
    }
}

/// Descriptive filter over size/color/form, compared field-by-field.
///
/// An absent field matches anything. The external parser's `"anyform"`
/// deserializes to an absent form constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectFilter {
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default, deserialize_with = "form_or_any")]
    pub form: Option<Form>,
}

impl ObjectFilter {
    pub fn with_form(form: Form) -> Self {
        Self {
            form: Some(form),
            ..Self::default()
        }
    }

    pub fn matches(&self, spec: &ObjectSpec) -> bool {
        if let Some(form) = self.form {
            if spec.form != form {
                return false;
            }
        }
        if let Some(size) = self.size {
            if spec.size != Some(size) {
                return false;
            }
        }
        if let Some(color) = self.color {
            if spec.color != Some(color) {
                return false;
            }
        }
        true
    }
}

fn form_or_any<'de, D>(deserializer: D) -> std::result::Result<Option<Form>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("anyform") => Ok(None),
        Some(name) => form_from_name(name).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown form: {name}"))
        }),
    }
}

fn form_from_name(name: &str) -> Option<Form> {
    Some(match name {
        "brick" => Form::Brick,
        "plank" => Form::Plank,
        "ball" => Form::Ball,
        "pyramid" => Form::Pyramid,
        "box" => Form::Box,
        "table" => Form::Table,
        "floor" => Form::Floor,
        _ => return None,
    })
}

/// Static per-session registry of objects (id -> form/size/color).
///
/// Objects are interned once at world initialization and never mutated or
/// destroyed during a session. Floor tiles occupy the tail of the id space,
/// one per stack.
#[derive(Debug, Clone, Default)]
pub struct WorldCatalog {
    specs: Vec<ObjectSpec>,
    names: Vec<String>,
    by_name: AHashMap<String, ObjectId>,
    floors: Vec<ObjectId>,
}

impl WorldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object under a unique name
    pub fn intern(&mut self, name: &str, spec: ObjectSpec) -> Result<ObjectId> {
        if self.by_name.contains_key(name) {
            return Err(StackError::MalformedWorld(format!(
                "object {name:?} defined twice"
            )));
        }
        let id = ObjectId(self.specs.len() as u32);
        self.specs.push(spec);
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Register one floor tile per stack, named `floor-0` .. `floor-(count-1)`
    pub fn add_floor_tiles(&mut self, count: usize) -> Result<()> {
        for i in 0..count {
            let id = self.intern(&format!("floor-{i}"), ObjectSpec::floor())?;
            self.floors.push(id);
        }
        Ok(())
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectSpec> {
        self.specs.get(id.0 as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: ObjectId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn is_floor(&self, id: ObjectId) -> bool {
        matches!(self.get(id), Some(spec) if spec.form == Form::Floor)
    }

    /// The floor tile for a stack index
    pub fn floor_id(&self, stack: usize) -> Option<ObjectId> {
        self.floors.get(stack).copied()
    }

    /// The stack index a floor tile belongs to
    pub fn floor_index(&self, id: ObjectId) -> Option<usize> {
        self.floors.iter().position(|&f| f == id)
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// All catalog ids matching a filter, in id order
    pub fn select(&self, filter: &ObjectFilter) -> Vec<ObjectId> {
        self.iter()
            .filter(|(_, spec)| filter.matches(spec))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &ObjectSpec)> {
        self.specs
            .iter()
            .enumerate()
            .map(|(i, spec)| (ObjectId(i as u32), spec))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Human-readable phrase for disambiguation prompts, e.g.
    /// "the large red box" or "the floor"
    pub fn describe(&self, id: ObjectId) -> String {
        match self.get(id) {
            Some(spec) if spec.form == Form::Floor => "the floor".to_string(),
            Some(spec) => {
                let mut out = String::from("the");
                if let Some(size) = spec.size {
                    out.push(' ');
                    out.push_str(&size.to_string());
                }
                if let Some(color) = spec.color {
                    out.push(' ');
                    out.push_str(&color.to_string());
                }
                out.push(' ');
                out.push_str(&spec.form.to_string());
                out
            }
            None => format!("object #{}", id.0),
        }
    }
}
