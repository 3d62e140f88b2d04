//! Then steps for board lifecycle BDD scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::then;
use taskdeck::board::domain::{Task, TaskStatus};

fn drain_celebrations(world: &mut BoardWorld) -> usize {
    let mut celebrations = 0;
    while let Ok(event) = world.transitions.try_recv() {
        if event.entered_complete() {
            celebrations += 1;
        }
    }
    celebrations
}

#[then(r#"the task sits in the "{status}" column"#)]
fn task_sits_in_column(world: &mut BoardWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task = world.task()?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }

    let column: Vec<Task> = world
        .controller
        .store()
        .columns()
        .into_iter()
        .find(|(column_status, _)| *column_status == expected)
        .map(|(_, tasks)| tasks)
        .unwrap_or_default();
    if !column.iter().any(|candidate| candidate.id() == task.id()) {
        return Err(eyre::eyre!("task is missing from its status column"));
    }
    Ok(())
}

#[then("the task progress is {done:usize} of {total:usize}")]
fn task_progress(world: &mut BoardWorld, done: usize, total: usize) -> Result<(), eyre::Report> {
    let task = world.task()?;
    if task.progress() != (done, total) {
        return Err(eyre::eyre!(
            "expected progress {done}/{total}, found {}/{}",
            task.progress().0,
            task.progress().1
        ));
    }
    Ok(())
}

#[then("no celebration has fired")]
fn no_celebration(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let celebrations = drain_celebrations(world);
    if celebrations != 0 {
        return Err(eyre::eyre!("expected no celebrations, saw {celebrations}"));
    }
    Ok(())
}

#[then("exactly one celebration has fired")]
fn one_celebration(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let celebrations = drain_celebrations(world);
    if celebrations != 1 {
        return Err(eyre::eyre!("expected one celebration, saw {celebrations}"));
    }
    Ok(())
}

#[then("the task appears in no column")]
fn task_in_no_column(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    let appearances = world
        .controller
        .store()
        .columns()
        .into_iter()
        .flat_map(|(_, tasks)| tasks)
        .filter(|candidate| candidate.id() == task.id())
        .count();
    if appearances != 0 {
        return Err(eyre::eyre!("archived task still appears on the board"));
    }
    Ok(())
}

#[then("no timers are running")]
fn no_timers_running(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let running = world.controller.timers().running();
    if !running.is_empty() {
        return Err(eyre::eyre!("expected no running timers, found {running:?}"));
    }
    Ok(())
}

#[then("the displayed elapsed time is {seconds:u64} seconds")]
fn displayed_elapsed(world: &mut BoardWorld, seconds: u64) -> Result<(), eyre::Report> {
    let id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("no task in scenario"))?;
    let shown = world
        .reconciler()
        .elapsed_for(id)
        .ok_or_else(|| eyre::eyre!("task {id} is missing from the local store"))?;
    if shown != seconds {
        return Err(eyre::eyre!("expected {seconds}s on display, found {shown}s"));
    }
    Ok(())
}

#[then("the committed total is {seconds:u64} seconds")]
fn committed_total(world: &mut BoardWorld, seconds: u64) -> Result<(), eyre::Report> {
    let task = world.task()?;
    if task.time_spent() != seconds {
        return Err(eyre::eyre!(
            "expected a committed total of {seconds}s, found {}s",
            task.time_spent()
        ));
    }
    if world.last_delta != Some(seconds) {
        return Err(eyre::eyre!(
            "expected the stop to commit {seconds}s, committed {:?}",
            world.last_delta
        ));
    }
    Ok(())
}
