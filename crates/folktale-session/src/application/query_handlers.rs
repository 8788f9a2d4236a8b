//! Read-only views of the progression.
//!
//! A snapshot carries everything a renderer needs for the current phase.
//! Choice correctness is never exposed.

use folktale_content::domain::model::{Creature, Level};
use folktale_content::{CreatureTheme, EffectParameters, Intensity};
use folktale_rules::domain::deduction;
use folktale_rules::{CalmnessMood, ClueToken, MechanicState};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::{Progression, Session};
use crate::domain::phase::{Outcome, Phase};

/// A creature offered on the selection screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatureView {
    /// Creature identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Mechanic tag: `riddle`, `calmness` or `deduction`.
    pub mechanic: &'static str,
    /// Presentation theme, when the UI table has one.
    pub theme: Option<CreatureTheme>,
}

/// A choice as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    /// Position within the level.
    pub index: usize,
    /// Choice text.
    pub text: String,
}

/// The level currently being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelView {
    /// Level index, 0 to 2.
    pub index: usize,
    /// Scene text.
    pub scene: String,
    /// The level's choices, in order.
    pub choices: Vec<ChoiceView>,
}

/// Presentation state of the creature's mechanic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MechanicView {
    /// Riddle prompt, with the hint once a wrong answer was given.
    Riddle {
        /// Prompt of the current level's riddle.
        prompt: Option<String>,
        /// Hint, visible after a miss on the current level.
        hint: Option<String>,
        /// Wrong answers so far.
        hints_revealed: u32,
    },
    /// Calmness meter.
    Calmness {
        /// Meter value in `[0, 100]`.
        calmness_level: u8,
        /// Mood band for the meter value.
        mood: CalmnessMood,
    },
    /// Collected clues.
    Deduction {
        /// Collected tokens, in token order.
        tokens: Vec<ClueToken>,
        /// Whether a revealing pair is collected.
        revealed: bool,
    },
}

/// Everything observable about the game right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// Creatures available for selection.
    pub creatures: Vec<CreatureView>,
    /// Session identifier, if a creature is selected.
    pub session_id: Option<Uuid>,
    /// The selected creature.
    pub creature: Option<CreatureView>,
    /// Story bubble shown during the story phase.
    pub story_line: Option<String>,
    /// Current level index, if a creature is selected.
    pub level_index: Option<usize>,
    /// The level awaiting a choice.
    pub level: Option<LevelView>,
    /// Intensity derived from the level index.
    pub intensity: Option<Intensity>,
    /// Effect parameters for `intensity`.
    pub effects: Option<EffectParameters>,
    /// Mechanic presentation state.
    pub mechanic: Option<MechanicView>,
    /// Consequence text of the last choice.
    pub consequence: Option<String>,
    /// Correct choices so far.
    pub correct_count: usize,
    /// Outcome, once the game has ended.
    pub outcome: Option<Outcome>,
    /// Outcome text, once the game has ended.
    pub outcome_text: Option<String>,
}

fn creature_view(progression: &Progression, creature: &Creature) -> CreatureView {
    CreatureView {
        id: creature.id.clone(),
        name: creature.name.clone(),
        mechanic: creature.mechanic.tag(),
        theme: progression.content().ui().theme_for(&creature.id).cloned(),
    }
}

fn level_view(level: &Level) -> LevelView {
    LevelView {
        index: level.index,
        scene: level.scene.clone(),
        choices: level
            .choices
            .iter()
            .enumerate()
            .map(|(index, choice)| ChoiceView {
                index,
                text: choice.text.clone(),
            })
            .collect(),
    }
}

fn mechanic_view(session: &Session, creature: &Creature) -> MechanicView {
    match &session.mechanic {
        MechanicState::Riddle(state) => {
            let riddle = creature
                .level(session.level_index)
                .and_then(|l| l.riddle.as_ref());
            MechanicView::Riddle {
                prompt: riddle.map(|r| r.prompt.clone()),
                hint: riddle
                    .filter(|_| state.hint_visible_on(session.level_index))
                    .map(|r| r.hint.clone()),
                hints_revealed: state.hints_revealed,
            }
        }
        MechanicState::Calmness(state) => MechanicView::Calmness {
            calmness_level: state.calmness_level,
            mood: state.mood(),
        },
        MechanicState::Deduction(state) => MechanicView::Deduction {
            tokens: state.tokens_collected.iter().copied().collect(),
            revealed: deduction::is_revealed(state),
        },
    }
}

/// Builds the snapshot of `progression`.
#[must_use]
pub fn snapshot(progression: &Progression) -> GameSnapshot {
    let phase = progression.phase();
    let creatures = progression
        .content()
        .creatures()
        .iter()
        .map(|c| creature_view(progression, c))
        .collect();

    let mut view = GameSnapshot {
        phase,
        creatures,
        session_id: None,
        creature: None,
        story_line: None,
        level_index: None,
        level: None,
        intensity: None,
        effects: None,
        mechanic: None,
        consequence: None,
        correct_count: 0,
        outcome: None,
        outcome_text: None,
    };

    let (Some(session), Some(creature)) = (progression.session(), progression.current_creature())
    else {
        return view;
    };

    let intensity = Intensity::for_level(session.level_index);
    view.session_id = Some(session.session_id);
    view.creature = Some(creature_view(progression, creature));
    view.level_index = Some(session.level_index);
    view.correct_count = session.correct_count;
    view.mechanic = Some(mechanic_view(session, creature));
    view.consequence = Some(session.consequence.clone()).filter(|c| !c.is_empty());
    view.outcome = session.outcome;
    view.outcome_text.clone_from(&session.outcome_text);

    match phase {
        Phase::Story => {
            view.story_line = creature.story.get(session.bubble_index).cloned();
        }
        Phase::Level => {
            view.level = creature.level(session.level_index).map(level_view);
        }
        Phase::Intro
        | Phase::Select
        | Phase::CharacterReveal
        | Phase::LevelTransition
        | Phase::End => {}
    }
    if matches!(phase, Phase::Level | Phase::LevelTransition | Phase::End) {
        view.intensity = Some(intensity);
        view.effects = progression.content().ui().effects_for(intensity).cloned();
    }

    view
}
