//! Embedded default dataset.
//!
//! Used whenever the remote copy of a dataset cannot be fetched, decoded or
//! validated. Built directly in code so it is well-formed by construction:
//! three creatures, three levels each, two choices per level, exactly one of
//! them correct.

use std::collections::BTreeMap;

use super::model::{Choice, Creature, DEFAULT_INITIAL_CALMNESS, Level, Mechanic, Riddle};
use super::ui::{CreatureTheme, EffectParameters, Intensity, UiParameters};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn choice(text: &str, correct: bool, consequence: &str) -> Choice {
    Choice {
        text: text.to_owned(),
        correct,
        consequence: consequence.to_owned(),
    }
}

fn riddle(prompt: &str, hint: &str, answer: &str) -> Option<Riddle> {
    Some(Riddle {
        prompt: prompt.to_owned(),
        hint: hint.to_owned(),
        answer: answer.to_owned(),
    })
}

fn level(index: usize, scene: &str, choices: [Choice; 2], riddle: Option<Riddle>) -> Level {
    Level {
        index,
        scene: scene.to_owned(),
        choices: choices.into(),
        riddle,
    }
}

fn baba_yaga() -> Creature {
    Creature {
        id: "baba-yaga".to_owned(),
        name: "Baba Yaga".to_owned(),
        story: lines(&[
            "Deep in the birch forest, a hut turns slowly on two chicken legs.",
            "Its fence is built of bones, and every skull holds a burning eye.",
            "The old woman inside has eaten travellers who could not answer her.",
            "She has eaten more who answered rudely.",
            "Tonight the hut stops turning and the door swings open for you.",
        ]),
        levels: vec![
            level(
                0,
                "The hut crouches low. A voice croaks: \"Who knocks at my door?\"",
                [
                    choice(
                        "Bow and say: \"A traveller, grandmother, seeking your wisdom.\"",
                        true,
                        "She cackles, pleased. \"Manners. How rare. Come in.\"",
                    ),
                    choice(
                        "Push the door open and step inside uninvited.",
                        false,
                        "The door slams behind you. \"Rude guests make good soup,\" she hisses.",
                    ),
                ],
                riddle(
                    "What runs but never walks, has a mouth but never talks?",
                    "You crossed one on your way through the forest.",
                    "a river",
                ),
            ),
            level(
                1,
                "She sets a bowl before you: black broth, steaming, smelling of iron.",
                [
                    choice(
                        "Refuse politely and offer her the bread from your pack.",
                        true,
                        "She tears the bread with iron teeth. \"A gift for a gift,\" she mutters.",
                    ),
                    choice(
                        "Drink it quickly so as not to offend her.",
                        false,
                        "The broth burns cold. Your reflection in the bowl begins to fade.",
                    ),
                ],
                riddle(
                    "The more of me you take, the more you leave behind. What am I?",
                    "Look down at the path that brought you here.",
                    "footsteps",
                ),
            ),
            level(
                2,
                "The oven roars. \"Climb in and show me how to sit,\" she says.",
                [
                    choice(
                        "\"Grandmother, I am clumsy. Show me first.\"",
                        true,
                        "She bends to show you, and the oven door swings shut on its own.",
                    ),
                    choice(
                        "Climb into the oven as she asks.",
                        false,
                        "The heat rises and the door begins to close.",
                    ),
                ],
                riddle(
                    "I have keys but open no locks. I have space but no room. What am I?",
                    "Scribes and clerks spend their days tapping on me.",
                    "a keyboard",
                ),
            ),
        ],
        mechanic: Mechanic::Riddle,
        victory_texts: lines(&[
            "The hut spins away into the dark, and you walk out of the forest at dawn.",
            "Baba Yaga laughs from behind you: \"Clever one. Come back when you are older.\"",
        ]),
        defeat_texts: lines(&[
            "The bone fence gains a new skull, its eye still burning.",
            "The hut turns once more, and no one remembers you knocked.",
        ]),
    }
}

fn rusalka() -> Creature {
    Creature {
        id: "rusalka".to_owned(),
        name: "Rusalka".to_owned(),
        story: lines(&[
            "On Rusalka Week the river runs silver under a full moon.",
            "A girl sits on the willow bough, combing water from her green hair.",
            "She drowned here long ago, and she has not forgiven the world for it.",
            "Her song pulls at you like a current.",
        ]),
        levels: vec![
            level(
                0,
                "She stops singing and looks at you with eyes like still ponds.",
                [
                    choice(
                        "Sit on the bank and listen quietly.",
                        true,
                        "She hums softly. The water around the willow grows still.",
                    ),
                    choice(
                        "Call out and ask her name.",
                        false,
                        "She flinches. The river churns and foams around her roots.",
                    ),
                ],
                None,
            ),
            level(
                1,
                "\"Do you know what it is to be forgotten?\" she whispers.",
                [
                    choice(
                        "\"Tell me your story. I will remember it.\"",
                        true,
                        "For a moment her face is that of a living girl.",
                    ),
                    choice(
                        "\"Everyone is forgotten in the end.\"",
                        false,
                        "Her hair lifts like weeds in a flood. The moon dims.",
                    ),
                ],
                None,
            ),
            level(
                2,
                "She reaches a pale hand towards you from the water.",
                [
                    choice(
                        "Lay a wreath of birch leaves in her hand.",
                        true,
                        "She clasps the wreath to her chest and sinks slowly, smiling.",
                    ),
                    choice(
                        "Take her hand.",
                        false,
                        "Her grip is cold as January and it does not let go.",
                    ),
                ],
                None,
            ),
        ],
        mechanic: Mechanic::Calmness {
            initial: DEFAULT_INITIAL_CALMNESS,
        },
        victory_texts: lines(&[
            "The river carries her song away, gentle now. She is at peace.",
            "By morning only a birch wreath floats where she sat.",
        ]),
        defeat_texts: lines(&[
            "The water closes over you, and her song goes on without an ending.",
            "On the next full moon there are two voices singing from the willow.",
        ]),
    }
}

fn strigoi() -> Creature {
    Creature {
        id: "strigoi".to_owned(),
        name: "Strigoi".to_owned(),
        story: lines(&[
            "The village has buried three children since the first snow.",
            "A stranger arrived the same week, courteous and pale, and never seen at noon.",
            "The priest will not act without proof.",
            "Gather what you can before the next grave is dug.",
        ]),
        levels: vec![
            level(
                0,
                "The stranger invites you into his parlour. A tall mirror hangs by the fire.",
                [
                    choice(
                        "Stand beside him and glance at the mirror.",
                        true,
                        "The glass shows only you, and the fire behind an empty chair.",
                    ),
                    choice(
                        "Accept the wine he pours for you.",
                        false,
                        "The wine is thick and sweet. Your thoughts begin to drift.",
                    ),
                ],
                None,
            ),
            level(
                1,
                "At supper the innkeeper sets out bread, salt and a garlic stew.",
                [
                    choice(
                        "Pass the salt cellar to the stranger.",
                        true,
                        "He jerks his hand back as though the cellar were a hot coal.",
                    ),
                    choice(
                        "Say nothing and watch the stairs.",
                        false,
                        "When you look back his seat is empty and the door is ajar.",
                    ),
                ],
                None,
            ),
            level(
                2,
                "Midnight. Something scratches at the shutters of the child's room.",
                [
                    choice(
                        "Hang the garlic at the window and hold the line of salt.",
                        true,
                        "A shriek, a beat of leathery wings, then silence until dawn.",
                    ),
                    choice(
                        "Open the shutters to see what is there.",
                        false,
                        "A long tongue flickers in the dark, and the candle gutters out.",
                    ),
                ],
                None,
            ),
        ],
        mechanic: Mechanic::Deduction,
        victory_texts: lines(&[
            "With the evidence laid out, the priest finally believes. The stranger's grave is staked at dawn.",
            "The snow stops falling on new graves. The village sleeps again.",
        ]),
        defeat_texts: lines(&[
            "Without proof, the village hesitates. By spring, no one answers the church bell.",
            "You wake in a cold cellar with a thirst that water cannot touch.",
        ]),
    }
}

/// The three embedded creatures.
#[must_use]
pub fn creatures() -> Vec<Creature> {
    vec![baba_yaga(), rusalka(), strigoi()]
}

fn theme(theme_id: &str, entrance: &str, idle: &str, duration_ms: u32) -> CreatureTheme {
    CreatureTheme {
        theme_id: theme_id.to_owned(),
        entrance_animation: entrance.to_owned(),
        idle_animation: idle.to_owned(),
        entrance_duration_ms: duration_ms,
    }
}

/// Embedded effect parameters for one intensity state.
#[must_use]
pub fn effects_for(intensity: Intensity) -> EffectParameters {
    match intensity {
        Intensity::Calm => EffectParameters {
            particle_count: 40,
            particle_speed: 0.5,
            fog_opacity: 0.2,
            fog_color: "#9aa5b1".to_owned(),
        },
        Intensity::Tense => EffectParameters {
            particle_count: 90,
            particle_speed: 1.0,
            fog_opacity: 0.45,
            fog_color: "#5c6470".to_owned(),
        },
        Intensity::Critical => EffectParameters {
            particle_count: 160,
            particle_speed: 1.8,
            fog_opacity: 0.7,
            fog_color: "#3a1f24".to_owned(),
        },
    }
}

/// The embedded UI-parameter table.
#[must_use]
pub fn ui_parameters() -> UiParameters {
    let creature_themes = BTreeMap::from([
        (
            "baba-yaga".to_owned(),
            theme("birch-hut", "hut-rise", "hut-sway", 2400),
        ),
        (
            "rusalka".to_owned(),
            theme("moonlit-river", "surface-ripple", "hair-drift", 1800),
        ),
        (
            "strigoi".to_owned(),
            theme("winter-village", "shadow-step", "cloak-flutter", 1500),
        ),
    ]);
    let intensity_effects = Intensity::ALL
        .into_iter()
        .map(|i| (i, effects_for(i)))
        .collect();

    UiParameters {
        creature_themes,
        intensity_effects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CHOICES_PER_LEVEL, LEVELS_PER_CREATURE};

    #[test]
    fn test_embedded_creatures_are_playable() {
        let creatures = creatures();
        assert_eq!(creatures.len(), 3);

        for creature in &creatures {
            assert!((4..=5).contains(&creature.story.len()), "{}", creature.id);
            assert_eq!(creature.levels.len(), LEVELS_PER_CREATURE);
            assert!(!creature.victory_texts.is_empty());
            assert!(!creature.defeat_texts.is_empty());
            for (index, level) in creature.levels.iter().enumerate() {
                assert_eq!(level.index, index);
                assert_eq!(level.choices.len(), CHOICES_PER_LEVEL);
                assert_eq!(level.correct_choice_count(), 1);
            }
        }
    }

    #[test]
    fn test_each_mechanic_is_represented_once() {
        let tags: Vec<&str> = creatures().iter().map(|c| c.mechanic.tag()).collect();
        assert_eq!(tags, vec!["riddle", "calmness", "deduction"]);
    }

    #[test]
    fn test_riddle_creature_has_a_riddle_on_every_level() {
        let baba = baba_yaga();
        assert!(baba.levels.iter().all(|l| l.riddle.is_some()));
    }

    #[test]
    fn test_ui_parameters_cover_every_creature_and_intensity() {
        let ui = ui_parameters();
        for creature in creatures() {
            assert!(ui.theme_for(&creature.id).is_some());
        }
        for intensity in Intensity::ALL {
            assert!(ui.effects_for(intensity).is_some());
        }
    }
}
