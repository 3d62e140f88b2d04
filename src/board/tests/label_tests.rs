//! Unit tests for labels and label selection state.

use crate::board::domain::{BoardDomainError, Label, LabelColor, LabelSelection, Task, TaskId};
use crate::test_support::FakeClock;
use mockable::Clock;
use rstest::rstest;

#[rstest]
#[case(LabelColor::Red, "red")]
#[case(LabelColor::Orange, "orange")]
#[case(LabelColor::Yellow, "yellow")]
#[case(LabelColor::Green, "green")]
#[case(LabelColor::Blue, "blue")]
#[case(LabelColor::Purple, "purple")]
#[case(LabelColor::Pink, "pink")]
#[case(LabelColor::Gray, "gray")]
fn colors_round_trip_through_their_wire_tokens(#[case] color: LabelColor, #[case] token: &str) {
    assert_eq!(color.as_str(), token);
    assert_eq!(LabelColor::try_from(token), Ok(color));
}

#[rstest]
fn the_swatch_set_has_eight_colors() {
    assert_eq!(LabelColor::ALL.len(), 8);
    assert!(LabelColor::try_from("teal").is_err());
}

#[rstest]
fn label_names_must_not_be_blank() {
    assert_eq!(
        Label::new("  ", LabelColor::Blue),
        Err(BoardDomainError::EmptyLabelName)
    );
    let label = Label::new("  deep work  ", LabelColor::Blue).expect("valid label");
    assert_eq!(label.name(), "deep work");
}

#[rstest]
fn label_names_are_case_sensitive() {
    let lower = Label::new("urgent", LabelColor::Red).expect("valid label");
    let upper = Label::new("Urgent", LabelColor::Red).expect("valid label");
    assert_ne!(lower.name(), upper.name());
}

#[rstest]
fn selection_toggles_names_in_and_out() {
    let mut selection = LabelSelection::new();
    assert!(selection.is_empty());

    selection.toggle("errand");
    assert!(selection.contains("errand"));

    selection.toggle("errand");
    assert!(!selection.contains("errand"));
}

#[rstest]
fn selection_resolves_known_names_to_their_catalog_color() {
    let catalog = vec![
        Label::new("errand", LabelColor::Yellow).expect("valid label"),
        Label::new("deep work", LabelColor::Blue).expect("valid label"),
    ];
    let mut selection = LabelSelection::new();
    selection.toggle("errand");
    selection.toggle("brand new");

    let resolved = selection
        .resolve(&catalog, LabelColor::Pink)
        .expect("resolution should succeed");

    let mut by_name: Vec<(&str, LabelColor)> = resolved
        .iter()
        .map(|label| (label.name(), label.color()))
        .collect();
    by_name.sort_unstable_by_key(|entry| entry.0);
    assert_eq!(
        by_name,
        vec![("brand new", LabelColor::Pink), ("errand", LabelColor::Yellow)]
    );
}

#[rstest]
fn selection_seeds_from_a_tasks_current_labels() {
    let clock = FakeClock::fixed();
    let mut task = Task::new(TaskId::new(1), "Labelled", clock.utc()).expect("valid task");
    task.set_labels(vec![
        Label::new("urgent", LabelColor::Red).expect("valid label"),
    ]);

    let selection = LabelSelection::from_labels(task.labels());

    assert!(selection.contains("urgent"));
    assert!(!selection.contains("errand"));
}

#[rstest]
fn task_label_sets_deduplicate_by_name_keeping_first_occurrence() {
    let clock = FakeClock::fixed();
    let mut task = Task::new(TaskId::new(1), "Labelled", clock.utc()).expect("valid task");

    task.set_labels(vec![
        Label::new("urgent", LabelColor::Red).expect("valid label"),
        Label::new("urgent", LabelColor::Gray).expect("valid label"),
        Label::new("errand", LabelColor::Green).expect("valid label"),
    ]);

    let colors: Vec<(&str, LabelColor)> = task
        .labels()
        .iter()
        .map(|label| (label.name(), label.color()))
        .collect();
    assert_eq!(
        colors,
        vec![("urgent", LabelColor::Red), ("errand", LabelColor::Green)]
    );
}
