//! Interpretation pipeline
//!
//! Grounds command trees from the external grammar parser into goal-literal
//! disjunctions: CommandTree -> resolver -> grounder -> legality pruner,
//! with the session owning ambiguity suspension.

pub mod command;
pub mod grounder;
pub mod legality;
pub mod resolver;
pub mod session;

pub use command::{CommandAction, CommandTree, Entity, Location, ObjectDesc, Quantifier};
pub use grounder::{Conjunction, Interpretation};
pub use session::{ChoiceRequest, InterpretOutcome, InterpreterSession};
