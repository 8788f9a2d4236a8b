//! Wire shapes of the two remote datasets.
//!
//! Every field is optional here; `validation` decides which absences are
//! fatal and fills the rest with defaults.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawStoryData {
    pub creatures: Option<Vec<RawCreature>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCreature {
    pub id: Option<String>,
    pub name: Option<String>,
    pub story: Option<Vec<String>>,
    pub levels: Option<Vec<RawLevel>>,
    pub mechanic: Option<RawMechanic>,
    pub victory_texts: Option<Vec<String>>,
    pub defeat_texts: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLevel {
    pub scene: Option<String>,
    pub choices: Option<Vec<RawChoice>>,
    pub riddle: Option<RawRiddle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawChoice {
    pub text: Option<String>,
    pub correct: Option<bool>,
    pub consequence: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRiddle {
    pub prompt: Option<String>,
    pub hint: Option<String>,
    pub answer: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawMechanic {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub initial: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawUiData {
    pub creatures: Option<BTreeMap<String, RawCreatureTheme>>,
    pub intensity: Option<BTreeMap<String, RawEffects>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCreatureTheme {
    pub theme_id: Option<String>,
    pub entrance_animation: Option<String>,
    pub idle_animation: Option<String>,
    pub entrance_duration_ms: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEffects {
    pub particle_count: Option<u32>,
    pub particle_speed: Option<f32>,
    pub fog_opacity: Option<f32>,
    pub fog_color: Option<String>,
}
