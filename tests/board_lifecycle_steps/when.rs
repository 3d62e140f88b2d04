//! When steps for board lifecycle BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskdeck::board::domain::{TaskDraft, TaskStatus};

#[when(r#"a task "{description}" is created"#)]
fn create_task(world: &mut BoardWorld, description: String) -> Result<(), eyre::Report> {
    let task = run_async(world.controller.create(TaskDraft::new(description)))
        .wrap_err("create task")?;
    world.task_id = Some(task.id());
    Ok(())
}

#[when("step {index:usize} is toggled")]
fn toggle_step(world: &mut BoardWorld, index: usize) -> Result<(), eyre::Report> {
    let id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("no task in scenario"))?;
    run_async(world.controller.toggle_step(id, index)).wrap_err("toggle step")?;
    Ok(())
}

#[when(r#"the task is moved to "{status}""#)]
fn move_task(world: &mut BoardWorld, status: String) -> Result<(), eyre::Report> {
    let id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("no task in scenario"))?;
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    run_async(world.controller.set_status(id, target)).wrap_err("move task")?;
    Ok(())
}

#[when("the task is archived")]
fn archive_task(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("no task in scenario"))?;
    run_async(world.controller.archive(id)).wrap_err("archive task")?;
    Ok(())
}

#[when("the task is unarchived")]
fn unarchive_task(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("no task in scenario"))?;
    run_async(world.controller.unarchive(id)).wrap_err("unarchive task")?;
    Ok(())
}

#[when("the task is deleted")]
fn delete_task(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("no task in scenario"))?;
    run_async(world.controller.delete(id)).wrap_err("delete task")?;
    Ok(())
}

#[when("{seconds:i64} seconds pass")]
fn seconds_pass(world: &mut BoardWorld, seconds: i64) {
    world.clock.advance_secs(seconds);
}

#[when("the engine is reloaded")]
fn engine_reloaded(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.reload()
}

#[when("the timer is stopped")]
fn timer_stopped(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("no task in scenario"))?;
    let delta = run_async(world.controller.stop_timer(id)).wrap_err("stop timer")?;
    world.last_delta = Some(delta);
    Ok(())
}
