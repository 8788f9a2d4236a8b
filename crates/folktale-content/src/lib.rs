//! Folktale — Content Repository and Data Loading Pipeline.
//!
//! Holds the validated, defaulted representation of every creature, level
//! and choice plus the UI-parameter table, and the pipeline that fetches,
//! validates and (on any failure) substitutes the embedded dataset.

pub mod application;
pub mod domain;
pub mod error;

pub use application::loader::{LoaderSettings, load_content};
pub use domain::model::{Choice, Creature, Level, Mechanic, Riddle};
pub use domain::repository::{ContentRepository, DatasetOrigin, Provenance};
pub use domain::ui::{CreatureTheme, EffectParameters, Intensity, UiParameters};
