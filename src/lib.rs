//! Stackhand - Natural-Language Block Manipulation
//!
//! Turns structured natural-language commands about a world of stackable
//! blocks into sequences of manipulator actions. Command trees come from an
//! external grammar parser; the interpreter grounds them into goal-literal
//! disjunctions, and the planner searches for a shortest action sequence
//! achieving one of them.

pub mod core;
pub mod interpret;
pub mod plan;
pub mod world;
