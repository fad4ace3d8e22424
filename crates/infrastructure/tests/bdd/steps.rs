//! Catch-all steps forwarding every sentence to the step table.

use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use webapi_application::StepArgument;

use crate::world::ApiWorld;

fn argument(step: &Step) -> Option<StepArgument> {
    step.docstring
        .clone()
        .map(StepArgument::DocString)
        .or_else(|| {
            step.table
                .as_ref()
                .map(|table| StepArgument::Table(table.rows.clone()))
        })
}

#[given(regex = r"^.+$")]
async fn given_sentence(world: &mut ApiWorld, step: &Step) {
    world.execute(&step.value, argument(step)).await;
}

#[when(regex = r"^.+$")]
async fn when_sentence(world: &mut ApiWorld, step: &Step) {
    world.execute(&step.value, argument(step)).await;
}

#[then(regex = r"^.+$")]
async fn then_sentence(world: &mut ApiWorld, step: &Step) {
    world.execute(&step.value, argument(step)).await;
}
