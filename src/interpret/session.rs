//! Top-level interpretation with an explicit suspend/resume disambiguation
//! boundary
//!
//! Resolution never blocks on ambient I/O. [`InterpreterSession::run`]
//! either completes or returns a [`ChoiceRequest`] carrying human-readable
//! candidates; the caller supplies a zero-based index via
//! [`InterpreterSession::choose`] and runs again. Recorded selections are
//! replayed deterministically, so a run is a pure function of the command
//! trees, the world and the selections made so far.

use crate::core::types::ObjectId;
use crate::core::{Result, StackError};
use crate::interpret::command::{CommandAction, CommandTree};
use crate::interpret::grounder::{ground, Interpretation};
use crate::interpret::legality::prune;
use crate::interpret::resolver::{resolve_entity, EntityGrounding};
use crate::world::catalog::WorldCatalog;
use crate::world::relations::Relation;
use crate::world::state::WorldState;

/// Result of advancing an interpreter session
#[derive(Debug, Clone)]
pub enum InterpretOutcome {
    /// Viable readings of the command, each already pruned and non-empty
    Complete(Vec<Interpretation>),
    /// More than one candidate remains; pick one and run again
    NeedsChoice(ChoiceRequest),
}

/// A pending disambiguation: numbered candidates for an external collaborator
#[derive(Debug, Clone)]
pub struct ChoiceRequest {
    pub prompt: String,
    pub options: Vec<String>,
}

/// One step of resolution: either a value or a suspension
enum Step<T> {
    Done(T),
    Suspend(ChoiceRequest),
}

/// Replayable interpretation of one utterance's parse trees
pub struct InterpreterSession<'a> {
    catalog: &'a WorldCatalog,
    state: &'a WorldState,
    trees: Vec<CommandTree>,
    selections: Vec<usize>,
    pending: Option<usize>,
}

impl<'a> InterpreterSession<'a> {
    pub fn new(catalog: &'a WorldCatalog, state: &'a WorldState, trees: Vec<CommandTree>) -> Self {
        Self {
            catalog,
            state,
            trees,
            selections: Vec::new(),
            pending: None,
        }
    }

    /// Record the answer to the last `NeedsChoice`. An out-of-range index is
    /// rejected without recording anything, so the caller can re-prompt
    /// indefinitely.
    pub fn choose(&mut self, index: usize) -> Result<()> {
        let count = self.pending.ok_or(StackError::NoPendingChoice)?;
        if index >= count {
            return Err(StackError::InvalidSelection { index, count });
        }
        self.selections.push(index);
        self.pending = None;
        Ok(())
    }

    /// Advance the session as far as the recorded selections allow
    pub fn run(&mut self) -> Result<InterpretOutcome> {
        if self.trees.is_empty() {
            return Err(StackError::Parse("no command trees supplied".into()));
        }
        tracing::debug!(parses = self.trees.len(), "interpreting command");

        let mut cursor = 0;

        // parse-tree ambiguity is handled exactly like entity ambiguity
        let tree = match self.pick(&mut cursor, self.trees.len(), || ChoiceRequest {
            prompt: "There are multiple ways to interpret that command".into(),
            options: self.trees.iter().map(CommandTree::render).collect(),
        })? {
            Step::Done(i) => self.trees[i].clone(),
            Step::Suspend(request) => return Ok(self.suspend(request)),
        };

        let interpretations = match normalize_action(tree.action) {
            CommandAction::Move => self.interpret_move(&tree, &mut cursor)?,
            CommandAction::Take => self.interpret_take(&tree, &mut cursor)?,
            CommandAction::Put => unreachable!("normalized to move"),
        };
        let interpretations = match interpretations {
            Step::Done(interps) => interps,
            Step::Suspend(request) => return Ok(self.suspend(request)),
        };

        let viable: Vec<Interpretation> = interpretations
            .into_iter()
            .map(|interp| prune(self.catalog, interp))
            .filter(|interp| !interp.is_empty())
            .collect();

        tracing::debug!(interpretations = viable.len(), "interpretation finished");
        for interp in &viable {
            tracing::debug!(goal = %interp.render(self.catalog));
        }

        if viable.is_empty() {
            return Err(StackError::NoInterpretation);
        }
        Ok(InterpretOutcome::Complete(viable))
    }

    fn interpret_move(
        &self,
        tree: &CommandTree,
        cursor: &mut usize,
    ) -> Result<Step<Vec<Interpretation>>> {
        let entities = match &tree.entity {
            Some(entity) => resolve_entity(entity, self.catalog, &self.state.relations),
            // "it": the currently held object
            None => match self.state.holding {
                Some(held) => vec![vec![vec![held]]],
                None => return Err(StackError::NoInterpretation),
            },
        };
        let location = tree.location.as_ref().ok_or_else(|| {
            StackError::MalformedCommand("move command without a target location".into())
        })?;
        let sites = resolve_entity(&location.entity, self.catalog, &self.state.relations);

        if entities.is_empty() || sites.is_empty() {
            return Err(StackError::NoInterpretation);
        }

        let entities =
            match self.pick_grounding(cursor, entities, "Multiple objects to move found")? {
                Step::Done(grounding) => grounding,
                Step::Suspend(request) => return Ok(Step::Suspend(request)),
            };
        let sites =
            match self.pick_grounding(cursor, sites, "Multiple locations to move to found")? {
                Step::Done(grounding) => grounding,
                Step::Suspend(request) => return Ok(Step::Suspend(request)),
            };

        Ok(Step::Done(ground(&entities, Some(&sites), location.relation)))
    }

    fn interpret_take(
        &self,
        tree: &CommandTree,
        cursor: &mut usize,
    ) -> Result<Step<Vec<Interpretation>>> {
        let entity = tree.entity.as_ref().ok_or_else(|| {
            StackError::MalformedCommand("take command without an entity".into())
        })?;
        let entities = resolve_entity(entity, self.catalog, &self.state.relations);
        if entities.is_empty() {
            return Err(StackError::NoInterpretation);
        }
        let entities =
            match self.pick_grounding(cursor, entities, "Multiple objects to pick up found")? {
                Step::Done(grounding) => grounding,
                Step::Suspend(request) => return Ok(Step::Suspend(request)),
            };
        Ok(Step::Done(ground(&entities, None, Relation::Holding)))
    }

    /// Reduce an ambiguous grounding to the selected interpretation, or
    /// suspend with one description per candidate
    fn pick_grounding(
        &self,
        cursor: &mut usize,
        grounding: EntityGrounding,
        prompt: &str,
    ) -> Result<Step<EntityGrounding>> {
        let step = self.pick(cursor, grounding.len(), || ChoiceRequest {
            prompt: prompt.to_string(),
            options: grounding
                .iter()
                .map(|or_group| self.describe_candidate(or_group))
                .collect(),
        })?;
        Ok(match step {
            Step::Done(i) => Step::Done(vec![grounding[i].clone()]),
            Step::Suspend(request) => Step::Suspend(request),
        })
    }

    fn describe_candidate(&self, or_group: &[Vec<ObjectId>]) -> String {
        or_group
            .first()
            .and_then(|and_group| and_group.first())
            .map(|&id| self.catalog.describe(id))
            .unwrap_or_else(|| "nothing".to_string())
    }

    /// Resolve one choice point: a single candidate needs no selection, a
    /// recorded selection is replayed, otherwise the session suspends.
    fn pick(
        &self,
        cursor: &mut usize,
        count: usize,
        request: impl FnOnce() -> ChoiceRequest,
    ) -> Result<Step<usize>> {
        if count <= 1 {
            return Ok(Step::Done(0));
        }
        if *cursor < self.selections.len() {
            let selected = self.selections[*cursor];
            *cursor += 1;
            if selected >= count {
                // a stale recording can only happen through API misuse;
                // surface it rather than defaulting
                return Err(StackError::InvalidSelection {
                    index: selected,
                    count,
                });
            }
            return Ok(Step::Done(selected));
        }
        Ok(Step::Suspend(request()))
    }

    fn suspend(&mut self, request: ChoiceRequest) -> InterpretOutcome {
        self.pending = Some(request.options.len());
        InterpretOutcome::NeedsChoice(request)
    }
}

fn normalize_action(action: CommandAction) -> CommandAction {
    match action {
        CommandAction::Put => CommandAction::Move,
        other => other,
    }
}
