//! The immutable content aggregate handed to the state machine.

use serde::Serialize;

use super::embedded;
use super::model::Creature;
use super::ui::UiParameters;

/// Where one dataset came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "lowercase")]
pub enum DatasetOrigin {
    /// Fetched and validated successfully.
    Remote {
        /// Resource name that was fetched.
        resource: String,
        /// SHA-256 hex digest of the fetched body.
        version_hash: String,
    },
    /// The embedded dataset replaced the remote one.
    Embedded {
        /// Resource name that was attempted.
        resource: String,
        /// Why the remote copy was not used.
        reason: String,
    },
}

impl DatasetOrigin {
    /// Returns `true` if the embedded dataset is in use.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        matches!(self, DatasetOrigin::Embedded { .. })
    }
}

/// Origin of both datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    /// Story/creature dataset.
    pub story: DatasetOrigin,
    /// UI-parameter dataset.
    pub ui: DatasetOrigin,
}

/// Validated, defaulted, read-only content for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRepository {
    creatures: Vec<Creature>,
    ui: UiParameters,
    provenance: Provenance,
}

impl ContentRepository {
    /// Assembles a repository from already-validated parts.
    #[must_use]
    pub fn new(creatures: Vec<Creature>, ui: UiParameters, provenance: Provenance) -> Self {
        Self {
            creatures,
            ui,
            provenance,
        }
    }

    /// A repository made only of embedded data.
    #[must_use]
    pub fn embedded(reason: &str) -> Self {
        Self::new(
            embedded::creatures(),
            embedded::ui_parameters(),
            Provenance {
                story: DatasetOrigin::Embedded {
                    resource: String::new(),
                    reason: reason.to_owned(),
                },
                ui: DatasetOrigin::Embedded {
                    resource: String::new(),
                    reason: reason.to_owned(),
                },
            },
        )
    }

    /// Looks up a creature by id.
    #[must_use]
    pub fn creature(&self, id: &str) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    /// All creatures, in dataset order.
    #[must_use]
    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    /// The UI-parameter table.
    #[must_use]
    pub fn ui(&self) -> &UiParameters {
        &self.ui
    }

    /// Where each dataset came from.
    #[must_use]
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_repository_finds_creatures_by_id() {
        let repo = ContentRepository::embedded("test");

        assert_eq!(repo.creature("baba-yaga").map(|c| c.name.as_str()), Some("Baba Yaga"));
        assert!(repo.creature("leshy").is_none());
        assert!(repo.provenance().story.is_embedded());
        assert!(repo.provenance().ui.is_embedded());
    }
}
