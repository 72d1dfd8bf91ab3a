//! Option set backing the club multi-select

use clubhub_client::{Club, ClubId};

/// Label → identifier mapping, in the order the server sent it.
///
/// Built once when the form mounts and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionSet {
    entries: Vec<Club>,
}

impl OptionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_clubs(clubs: Vec<Club>) -> Self {
        Self { entries: clubs }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display labels, one per selectable item
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Club> {
        self.entries.iter()
    }

    pub fn id_for(&self, label: &str) -> Option<&ClubId> {
        self.entries.iter().find(|c| c.name == label).map(|c| &c.id)
    }

    /// Identifiers of every option whose label is selected.
    ///
    /// Result follows option order, not selection order. Unknown labels are
    /// dropped.
    pub fn resolve(&self, selected: &[String]) -> Vec<&ClubId> {
        self.entries
            .iter()
            .filter(|c| selected.iter().any(|s| *s == c.name))
            .map(|c| &c.id)
            .collect()
    }
}
