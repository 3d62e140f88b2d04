//! Given steps for board lifecycle BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskdeck::board::domain::{TaskDraft, TaskStatus};

#[given("an empty board")]
fn empty_board(world: &mut BoardWorld) {
    assert!(world.controller.store().is_empty());
}

#[given(r#"a task "{description}" with steps "{steps}""#)]
fn task_with_steps(
    world: &mut BoardWorld,
    description: String,
    steps: String,
) -> Result<(), eyre::Report> {
    let step_texts: Vec<String> = steps.split(", ").map(str::to_owned).collect();
    let draft = TaskDraft::new(description).with_steps(step_texts);
    let task = run_async(world.controller.create(draft)).wrap_err("create task with steps")?;
    world.task_id = Some(task.id());
    Ok(())
}

#[given(r#"a task "{description}" in the "{status}" column"#)]
fn task_in_column(
    world: &mut BoardWorld,
    description: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task = run_async(world.controller.create(TaskDraft::new(description)))
        .wrap_err("create task for column placement")?;
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    run_async(world.controller.set_status(task.id(), target))
        .wrap_err("move task into its starting column")?;
    world.task_id = Some(task.id());
    Ok(())
}

#[given(r#"a task "{description}" with a running timer"#)]
fn task_with_running_timer(
    world: &mut BoardWorld,
    description: String,
) -> Result<(), eyre::Report> {
    let task = run_async(world.controller.create(TaskDraft::new(description)))
        .wrap_err("create task for timing")?;
    let started = world
        .controller
        .start_timer(task.id())
        .wrap_err("start the work timer")?;
    if !started {
        return Err(eyre::eyre!("a timer was already running for a fresh task"));
    }
    world.task_id = Some(task.id());
    Ok(())
}
