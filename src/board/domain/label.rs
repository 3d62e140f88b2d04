//! Colored labels and the label selection value object.

use super::{BoardDomainError, ParseLabelColorError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The eight label swatch colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    /// Red swatch.
    Red,
    /// Orange swatch.
    Orange,
    /// Yellow swatch.
    Yellow,
    /// Green swatch.
    Green,
    /// Blue swatch.
    Blue,
    /// Purple swatch.
    Purple,
    /// Pink swatch.
    Pink,
    /// Gray swatch.
    Gray,
}

impl LabelColor {
    /// All swatches in display order.
    pub const ALL: [Self; 8] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
        Self::Pink,
        Self::Gray,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Gray => "gray",
        }
    }
}

impl TryFrom<&str> for LabelColor {
    type Error = ParseLabelColorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "red" => Ok(Self::Red),
            "orange" => Ok(Self::Orange),
            "yellow" => Ok(Self::Yellow),
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            "purple" => Ok(Self::Purple),
            "pink" => Ok(Self::Pink),
            "gray" => Ok(Self::Gray),
            _ => Err(ParseLabelColorError(value.to_owned())),
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named, colored label.
///
/// Labels are identified by name, case-sensitively, in a namespace shared
/// across all tasks. A label is created implicitly the first time a new
/// name is attached to a task; there is no deletion lifecycle, so an
/// orphaned label persists until reused or never.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    name: String,
    color: LabelColor,
}

impl Label {
    /// Creates a label.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyLabelName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>, color: LabelColor) -> Result<Self, BoardDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyLabelName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            color,
        })
    }

    /// Returns the label name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the swatch color.
    #[must_use]
    pub const fn color(&self) -> LabelColor {
        self.color
    }
}

/// Selection state for a label-picking flow.
///
/// Each flow that picks labels (new-task, edit-task) owns its own
/// `LabelSelection` value and passes it along explicitly; selections are
/// never shared through a context-keyed global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelection {
    names: BTreeSet<String>,
}

impl LabelSelection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Creates a selection pre-populated from a task's current labels.
    #[must_use]
    pub fn from_labels(labels: &[Label]) -> Self {
        Self {
            names: labels.iter().map(|label| label.name().to_owned()).collect(),
        }
    }

    /// Toggles a name in or out of the selection.
    pub fn toggle(&mut self, name: impl Into<String>) {
        let owned = name.into();
        if !self.names.remove(&owned) {
            self.names.insert(owned);
        }
    }

    /// Returns `true` when the name is currently selected.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolves the selection against the shared label namespace.
    ///
    /// Known names keep their catalog color; unknown names become
    /// new-label creation requests carrying `new_color`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyLabelName`] when a selected name
    /// is empty after trimming.
    pub fn resolve(
        &self,
        catalog: &[Label],
        new_color: LabelColor,
    ) -> Result<Vec<Label>, BoardDomainError> {
        self.names
            .iter()
            .map(|name| {
                catalog
                    .iter()
                    .find(|known| known.name() == name)
                    .cloned()
                    .map_or_else(|| Label::new(name.clone(), new_color), Ok)
            })
            .collect()
    }
}
