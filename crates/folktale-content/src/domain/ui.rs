//! UI-parameter table consumed by presentation.
//!
//! The engine never reads these values for its own rules; it only carries
//! them from the pipeline to whoever renders the game.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Derived calm/tense/critical signal, driven purely by level index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Level 0.
    Calm,
    /// Level 1.
    Tense,
    /// Level 2 and beyond.
    Critical,
}

impl Intensity {
    /// Every intensity state, in escalation order.
    pub const ALL: [Intensity; 3] = [Intensity::Calm, Intensity::Tense, Intensity::Critical];

    /// Maps a level index to its intensity.
    #[must_use]
    pub fn for_level(level_index: usize) -> Self {
        match level_index {
            0 => Intensity::Calm,
            1 => Intensity::Tense,
            _ => Intensity::Critical,
        }
    }

    /// Key used in the UI-parameter dataset.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Calm => "calm",
            Intensity::Tense => "tense",
            Intensity::Critical => "critical",
        }
    }

    /// Parses a dataset key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.as_str() == key)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-creature presentation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureTheme {
    /// Theme identifier the renderer maps to palette and fonts.
    pub theme_id: String,
    /// Animation played when the creature first appears.
    pub entrance_animation: String,
    /// Animation looped while the creature is on screen.
    pub idle_animation: String,
    /// Duration of the entrance animation.
    pub entrance_duration_ms: u32,
}

/// Particle and fog parameters for one intensity state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectParameters {
    /// Number of particles on screen.
    pub particle_count: u32,
    /// Particle speed multiplier.
    pub particle_speed: f32,
    /// Fog opacity in `[0, 1]`.
    pub fog_opacity: f32,
    /// Fog tint as a CSS colour string.
    pub fog_color: String,
}

/// The full UI-parameter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiParameters {
    /// Themes keyed by creature id.
    pub creature_themes: BTreeMap<String, CreatureTheme>,
    /// Effects keyed by intensity state. Always holds every state.
    pub intensity_effects: BTreeMap<Intensity, EffectParameters>,
}

impl UiParameters {
    /// Theme of `creature_id`, if the table has one.
    #[must_use]
    pub fn theme_for(&self, creature_id: &str) -> Option<&CreatureTheme> {
        self.creature_themes.get(creature_id)
    }

    /// Effects for `intensity`.
    #[must_use]
    pub fn effects_for(&self, intensity: Intensity) -> Option<&EffectParameters> {
        self.intensity_effects.get(&intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_follows_level_index() {
        assert_eq!(Intensity::for_level(0), Intensity::Calm);
        assert_eq!(Intensity::for_level(1), Intensity::Tense);
        assert_eq!(Intensity::for_level(2), Intensity::Critical);
    }

    #[test]
    fn test_intensity_keys_round_trip() {
        for intensity in Intensity::ALL {
            assert_eq!(Intensity::from_key(intensity.as_str()), Some(intensity));
        }
        assert_eq!(Intensity::from_key("frantic"), None);
    }
}
