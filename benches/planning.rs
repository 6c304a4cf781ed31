//! Benchmark a representative plan search on the bundled demo world

use criterion::{criterion_group, criterion_main, Criterion};
use stackhand::interpret::{CommandTree, InterpretOutcome, InterpreterSession};
use stackhand::plan::{PlanContext, Planner};
use stackhand::world::WorldLoader;

const DEMO_WORLD: &str = r#"{
    "stacks": [["e"], ["g", "l"], [], ["k", "m", "f"], []],
    "holding": null,
    "arm": 0,
    "objects": {
        "a": {"form": "brick",   "size": "large", "color": "green"},
        "e": {"form": "ball",    "size": "large", "color": "white"},
        "f": {"form": "ball",    "size": "small", "color": "black"},
        "g": {"form": "table",   "size": "large", "color": "blue"},
        "k": {"form": "box",     "size": "large", "color": "yellow"},
        "l": {"form": "box",     "size": "large", "color": "red"},
        "m": {"form": "box",     "size": "small", "color": "blue"}
    }
}"#;

// "move the small ball inside the large yellow box": the target box is
// buried under two objects, so the search has real digging to do
const COMMAND: &str = r#"{
    "action": "move",
    "entity": {
        "quantifier": "the",
        "object": {"size": "small", "color": "black", "form": "ball"}
    },
    "location": {
        "relation": "inside",
        "entity": {
            "quantifier": "the",
            "object": {"size": "large", "color": "yellow", "form": "box"}
        }
    }
}"#;

fn bench_planning(c: &mut Criterion) {
    let loaded = WorldLoader::load_from_json(DEMO_WORLD).unwrap();
    let tree: CommandTree = serde_json::from_str(COMMAND).unwrap();

    let mut session =
        InterpreterSession::new(&loaded.catalog, &loaded.state, vec![tree.clone()]);
    let interpretations = match session.run().unwrap() {
        InterpretOutcome::Complete(interpretations) => interpretations,
        InterpretOutcome::NeedsChoice(_) => unreachable!("unambiguous command"),
    };
    let goal = interpretations[0].clone();

    c.bench_function("interpret_command", |b| {
        b.iter(|| {
            let mut session = InterpreterSession::new(
                &loaded.catalog,
                &loaded.state,
                vec![tree.clone()],
            );
            session.run().unwrap()
        })
    });

    c.bench_function("plan_dig_out_box", |b| {
        let ctx = PlanContext::for_state(&loaded.catalog, &loaded.state);
        b.iter(|| Planner::plan(&ctx, &goal, &loaded.state))
    });
}

criterion_group!(benches, bench_planning);
criterion_main!(benches);
