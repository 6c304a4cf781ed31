//! Stackhand - Entry Point
//!
//! Interactive loop around the interpreter and planner. Input is either a
//! shorthand plan string ("p r r d") or the JSON command trees produced by
//! the external grammar parser; output is the token plan for the actuator.
//! This binary is the disambiguation collaborator: it renders numbered
//! candidates and re-prompts on invalid indices indefinitely.

use stackhand::core::error::{Result, StackError};
use stackhand::interpret::{CommandTree, InterpretOutcome, InterpreterSession};
use stackhand::plan::{expand, PlanContext, PlanToken, Planner};
use stackhand::world::{LoadedWorld, WorldLoader, WorldState};

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Bundled demo world: the classic two-tower arrangement
const DEMO_WORLD: &str = r#"{
    "stacks": [["e"], ["g", "l"], [], ["k", "m", "f"], []],
    "holding": null,
    "arm": 0,
    "objects": {
        "a": {"form": "brick",   "size": "large", "color": "green"},
        "b": {"form": "brick",   "size": "small", "color": "white"},
        "c": {"form": "plank",   "size": "large", "color": "red"},
        "d": {"form": "plank",   "size": "small", "color": "green"},
        "e": {"form": "ball",    "size": "large", "color": "white"},
        "f": {"form": "ball",    "size": "small", "color": "black"},
        "g": {"form": "table",   "size": "large", "color": "blue"},
        "h": {"form": "table",   "size": "small", "color": "red"},
        "i": {"form": "pyramid", "size": "large", "color": "yellow"},
        "j": {"form": "pyramid", "size": "small", "color": "red"},
        "k": {"form": "box",     "size": "large", "color": "yellow"},
        "l": {"form": "box",     "size": "large", "color": "red"},
        "m": {"form": "box",     "size": "small", "color": "blue"}
    }
}"#;

#[derive(Parser)]
#[command(name = "stackhand")]
#[command(about = "Natural-language block manipulation planner")]
struct Cli {
    /// Path to a world JSON file (bundled demo world when omitted)
    #[arg(long)]
    world: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("stackhand=debug")
        .init();

    let cli = Cli::parse();
    let LoadedWorld { catalog, mut state } = match &cli.world {
        Some(path) => WorldLoader::load_from_file(path)?,
        None => WorldLoader::load_from_json(DEMO_WORLD)?,
    };

    tracing::info!(
        objects = catalog.len(),
        stacks = state.stacks.len(),
        "world loaded"
    );

    println!("\n=== STACKHAND ===");
    println!("Natural-language block manipulation");
    println!();
    println!("Input:");
    println!("  <JSON>        - command tree(s) from the grammar parser");
    println!("  p d l r ...   - shorthand plan string, echoed as tokens");
    println!("  world / w     - show the current stacks");
    println!("  quit / q      - exit");
    println!();

    loop {
        print!("What can I do for you today? ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }
        if input == "world" || input == "w" {
            print_world(&catalog, &state);
            continue;
        }

        // convenience: strings like "p r r d" are already plans
        if let Some(plan) = split_shorthand_plan(input) {
            println!("Plan: {}", render_plan(&plan));
            state = perform_plan(&catalog, state, &plan);
            continue;
        }

        let trees = match parse_trees(input) {
            Ok(trees) => trees,
            Err(err) => {
                println!("Parsing error: {err}");
                continue;
            }
        };

        match interpret_and_plan(&catalog, &state, trees) {
            Ok(plan) if plan.contains(&PlanToken::Impossible) => {
                println!("What you are asking is simply impossible!");
            }
            Ok(plan) => {
                println!("Plan: {}", render_plan(&plan));
                state = perform_plan(&catalog, state, &plan);
            }
            Err(StackError::NoInterpretation) => {
                println!("Interpretation error: found no interpretation");
            }
            Err(err) => println!("Error: {err}"),
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

/// Accept one tree or an array of ambiguous trees
fn parse_trees(input: &str) -> Result<Vec<CommandTree>> {
    if let Ok(trees) = serde_json::from_str::<Vec<CommandTree>>(input) {
        return Ok(trees);
    }
    let tree: CommandTree = serde_json::from_str(input)
        .map_err(|err| StackError::Parse(err.to_string()))?;
    Ok(vec![tree])
}

/// Drive the session to completion, prompting on every ambiguity, then plan
/// the first viable reading
fn interpret_and_plan(
    catalog: &stackhand::world::WorldCatalog,
    state: &WorldState,
    trees: Vec<CommandTree>,
) -> Result<Vec<PlanToken>> {
    let mut session = InterpreterSession::new(catalog, state, trees);
    let interpretations = loop {
        match session.run()? {
            InterpretOutcome::Complete(interpretations) => break interpretations,
            InterpretOutcome::NeedsChoice(request) => {
                println!("{}:", request.prompt);
                for (i, option) in request.options.iter().enumerate() {
                    println!("  {i}. {option}");
                }
                loop {
                    print!("Which one did you mean? ");
                    io::stdout().flush()?;
                    let mut answer = String::new();
                    if io::stdin().read_line(&mut answer)? == 0 {
                        return Err(StackError::Parse("input closed".into()));
                    }
                    match answer.trim().parse::<usize>() {
                        Ok(index) => match session.choose(index) {
                            Ok(()) => break,
                            Err(StackError::InvalidSelection { .. }) => {
                                println!("Unfortunately, I didn't quite grasp that. Try again.");
                            }
                            Err(err) => return Err(err),
                        },
                        Err(_) => {
                            println!("Unfortunately, I didn't quite grasp that. Try again.");
                        }
                    }
                }
            }
        }
    };

    let goal = &interpretations[0];
    tracing::debug!(goal = %goal.render(catalog), "planning");
    let ctx = PlanContext::for_state(catalog, state);
    Ok(Planner::plan(&ctx, goal, state))
}

/// Recognize strings of the form "p r r d l p r d"
fn split_shorthand_plan(input: &str) -> Option<Vec<PlanToken>> {
    input
        .split_whitespace()
        .map(PlanToken::from_code)
        .collect()
}

fn render_plan(plan: &[PlanToken]) -> String {
    if plan.is_empty() {
        return "(already satisfied)".to_string();
    }
    plan.iter()
        .map(PlanToken::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Stand-in for the external actuator: apply each token so the next
/// utterance sees the updated world
fn perform_plan(
    catalog: &stackhand::world::WorldCatalog,
    state: WorldState,
    plan: &[PlanToken],
) -> WorldState {
    let ctx = PlanContext::for_state(catalog, &state);
    let mut current = seed_markers(&ctx, state);
    for token in plan {
        let next = match token {
            PlanToken::Left => {
                if current.arm == 0 {
                    None
                } else {
                    let mut moved = current.clone();
                    moved.arm -= 1;
                    Some(moved)
                }
            }
            PlanToken::Right => {
                if current.arm + 1 >= ctx.stack_count {
                    None
                } else {
                    let mut moved = current.clone();
                    moved.arm += 1;
                    Some(moved)
                }
            }
            PlanToken::Pick => expand::lift(&ctx, &current, current.arm),
            PlanToken::Drop => expand::put_down(&ctx, &current, current.arm),
            PlanToken::Impossible => None,
        };
        match next {
            Some(next) => current = next,
            None => {
                println!("(cannot perform '{token}' here; stopping execution)");
                break;
            }
        }
    }
    current
}

fn seed_markers(ctx: &PlanContext<'_>, state: WorldState) -> WorldState {
    use stackhand::world::{Literal, Relation};
    let mut seeded = state;
    for column in 0..seeded.stacks.len() {
        if let (Some(&top), Some(floor)) =
            (seeded.stacks[column].last(), ctx.catalog.floor_id(column))
        {
            seeded
                .relations
                .insert(Literal::binary(Relation::AtTop, top, floor));
        }
    }
    seeded
}

/// Print the stacks bottom-to-top plus the arm position
fn print_world(catalog: &stackhand::world::WorldCatalog, state: &WorldState) {
    println!();
    for (i, stack) in state.stacks.iter().enumerate() {
        let arm = if state.arm == i { " <- arm" } else { "" };
        let contents = stack
            .iter()
            .map(|&id| catalog.name(id).unwrap_or("?").to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  stack {i}: [{contents}]{arm}");
    }
    match state.holding {
        Some(id) => println!("  holding: {}", catalog.name(id).unwrap_or("?")),
        None => println!("  holding: nothing"),
    }
    println!();
}
