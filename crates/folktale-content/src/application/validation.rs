//! Decoding, structural validation and default filling.
//!
//! A dataset goes through three gates: it must decode, it must have the
//! required structure, and after defaults are filled every creature must be
//! playable (three levels, two choices each). Failing any gate rejects the
//! whole dataset.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::de::DeserializeOwned;

use super::raw::{
    RawChoice, RawCreature, RawCreatureTheme, RawEffects, RawLevel, RawMechanic, RawRiddle,
    RawStoryData, RawUiData,
};
use crate::domain::embedded;
use crate::domain::model::{
    CHOICES_PER_LEVEL, Choice, Creature, DEFAULT_INITIAL_CALMNESS, LEVELS_PER_CREATURE, Level,
    MAX_CALMNESS, Mechanic, Riddle,
};
use crate::domain::ui::{CreatureTheme, EffectParameters, Intensity, UiParameters};
use crate::error::ContentError;

/// Id given to a creature whose id is blank.
pub const UNKNOWN_CREATURE_ID: &str = "unknown";

/// Name given to a creature whose name is blank.
pub const UNKNOWN_CREATURE_NAME: &str = "Unknown Creature";

fn is_yaml(resource: &str) -> bool {
    Path::new(resource)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Decodes `body` as YAML when the resource name says so, JSON otherwise.
fn decode<T: DeserializeOwned>(resource: &str, body: &[u8]) -> Result<T, ContentError> {
    if is_yaml(resource) {
        Ok(serde_yaml::from_slice(body)?)
    } else {
        Ok(serde_json::from_slice(body)?)
    }
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn non_blank_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_owned(),
    }
}

/// Decodes, validates and defaults the story/creature dataset.
///
/// # Errors
///
/// Returns `ContentError::Json`/`ContentError::Yaml` if the body does not
/// decode and `ContentError::Validation` if it is structurally unusable.
pub fn story_from_bytes(resource: &str, body: &[u8]) -> Result<Vec<Creature>, ContentError> {
    let raw: RawStoryData = decode(resource, body)?;
    let raw_creatures = validate_story(raw)?;
    let creatures: Vec<Creature> = raw_creatures.into_iter().map(normalize_creature).collect();
    check_playable(&creatures)?;
    warn_on_suspicious_content(&creatures);
    Ok(creatures)
}

fn validate_story(raw: RawStoryData) -> Result<Vec<RawCreature>, ContentError> {
    let creatures = raw
        .creatures
        .ok_or_else(|| ContentError::Validation("missing creatures collection".to_owned()))?;
    if creatures.is_empty() {
        return Err(ContentError::Validation(
            "creatures collection is empty".to_owned(),
        ));
    }
    for (position, creature) in creatures.iter().enumerate() {
        if creature.id.is_none() {
            return Err(ContentError::Validation(format!(
                "creature #{position} has no id"
            )));
        }
        if creature.name.is_none() {
            return Err(ContentError::Validation(format!(
                "creature #{position} has no name"
            )));
        }
        if creature.levels.as_ref().is_none_or(Vec::is_empty) {
            return Err(ContentError::Validation(format!(
                "creature #{position} has no levels"
            )));
        }
    }
    Ok(creatures)
}

fn normalize_creature(raw: RawCreature) -> Creature {
    Creature {
        id: non_blank_or(raw.id, UNKNOWN_CREATURE_ID),
        name: non_blank_or(raw.name, UNKNOWN_CREATURE_NAME),
        story: raw.story.unwrap_or_default(),
        levels: raw
            .levels
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, level)| normalize_level(index, level))
            .collect(),
        mechanic: normalize_mechanic(raw.mechanic),
        victory_texts: raw.victory_texts.unwrap_or_default(),
        defeat_texts: raw.defeat_texts.unwrap_or_default(),
    }
}

fn normalize_level(index: usize, raw: RawLevel) -> Level {
    Level {
        index,
        scene: text(raw.scene),
        choices: raw
            .choices
            .unwrap_or_default()
            .into_iter()
            .map(normalize_choice)
            .collect(),
        riddle: raw.riddle.and_then(normalize_riddle),
    }
}

fn normalize_choice(raw: RawChoice) -> Choice {
    Choice {
        text: text(raw.text),
        correct: raw.correct.unwrap_or(false),
        consequence: text(raw.consequence),
    }
}

fn normalize_riddle(raw: RawRiddle) -> Option<Riddle> {
    let answer = text(raw.answer);
    if answer.trim().is_empty() {
        tracing::warn!("dropping riddle without an answer key");
        return None;
    }
    Some(Riddle {
        prompt: text(raw.prompt),
        hint: text(raw.hint),
        answer,
    })
}

fn normalize_mechanic(raw: Option<RawMechanic>) -> Mechanic {
    let Some(raw) = raw else {
        return Mechanic::default();
    };
    match raw.kind.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("calmness") => Mechanic::Calmness {
            initial: raw
                .initial
                .unwrap_or(DEFAULT_INITIAL_CALMNESS)
                .min(MAX_CALMNESS),
        },
        Some("deduction") => Mechanic::Deduction,
        Some("riddle") | None => Mechanic::Riddle,
        Some(other) => {
            tracing::warn!(mechanic = other, "unknown mechanic type, using riddle");
            Mechanic::Riddle
        }
    }
}

fn check_playable(creatures: &[Creature]) -> Result<(), ContentError> {
    for creature in creatures {
        if creature.levels.len() != LEVELS_PER_CREATURE {
            return Err(ContentError::Validation(format!(
                "creature {} has {} levels, expected {LEVELS_PER_CREATURE}",
                creature.id,
                creature.levels.len()
            )));
        }
        for level in &creature.levels {
            if level.choices.len() != CHOICES_PER_LEVEL {
                return Err(ContentError::Validation(format!(
                    "creature {} level {} has {} choices, expected {CHOICES_PER_LEVEL}",
                    creature.id,
                    level.index,
                    level.choices.len()
                )));
            }
        }
    }
    Ok(())
}

/// Logs content that is playable but probably not what the author meant.
fn warn_on_suspicious_content(creatures: &[Creature]) {
    let mut seen = HashSet::new();
    for creature in creatures {
        if !seen.insert(creature.id.as_str()) {
            tracing::warn!(creature = %creature.id, "duplicate creature id; later entry is unreachable");
        }
        for level in &creature.levels {
            let correct = level.correct_choice_count();
            if correct != 1 {
                tracing::warn!(
                    creature = %creature.id,
                    level = level.index,
                    correct,
                    "level does not have exactly one correct choice"
                );
            }
        }
    }
}

/// Decodes, validates and defaults the UI-parameter dataset.
///
/// Intensity states missing from the payload are taken from the embedded
/// table so every state is always present.
///
/// # Errors
///
/// Returns `ContentError::Json`/`ContentError::Yaml` if the body does not
/// decode and `ContentError::Validation` if either table is absent.
pub fn ui_from_bytes(resource: &str, body: &[u8]) -> Result<UiParameters, ContentError> {
    let raw: RawUiData = decode(resource, body)?;
    let (Some(raw_themes), Some(raw_effects)) = (raw.creatures, raw.intensity) else {
        return Err(ContentError::Validation(
            "ui data must contain creature and intensity tables".to_owned(),
        ));
    };

    let creature_themes = raw_themes
        .into_iter()
        .map(|(id, theme)| (id, normalize_theme(theme)))
        .collect();

    let mut intensity_effects = BTreeMap::new();
    for (key, raw) in raw_effects {
        match Intensity::from_key(&key) {
            Some(intensity) => {
                intensity_effects.insert(intensity, normalize_effects(raw));
            }
            None => tracing::warn!(%key, "ignoring unknown intensity state"),
        }
    }
    for intensity in Intensity::ALL {
        intensity_effects.entry(intensity).or_insert_with(|| {
            tracing::debug!(%intensity, "intensity state missing, using embedded parameters");
            embedded::effects_for(intensity)
        });
    }

    Ok(UiParameters {
        creature_themes,
        intensity_effects,
    })
}

fn normalize_theme(raw: RawCreatureTheme) -> CreatureTheme {
    CreatureTheme {
        theme_id: text(raw.theme_id),
        entrance_animation: text(raw.entrance_animation),
        idle_animation: text(raw.idle_animation),
        entrance_duration_ms: raw.entrance_duration_ms.unwrap_or(0),
    }
}

fn normalize_effects(raw: RawEffects) -> EffectParameters {
    EffectParameters {
        particle_count: raw.particle_count.unwrap_or(0),
        particle_speed: raw.particle_speed.unwrap_or(0.0).max(0.0),
        fog_opacity: raw.fog_opacity.unwrap_or(0.0).clamp(0.0, 1.0),
        fog_color: text(raw.fog_color),
    }
}
