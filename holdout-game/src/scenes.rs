//! Static scene catalog: the storyline table the engine addresses by day.
//!
//! The engine itself only reads action tags and the terminal-day marker;
//! titles, narrative text, and consequence strings are carried so the
//! server can hand the whole storyline to a client in one request.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_SCENES_DATA: &str =
    include_str!("../../holdout-server/static/assets/data/scenes.json");

/// A single choice presented by a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneChoice {
    /// Button text shown to the player.
    pub label: String,
    /// Raw action tag forwarded to the resolver; unknown tags are legal.
    pub action: String,
    /// Flavor feedback displayed after the choice is made.
    pub consequence: String,
}

/// One day's decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene id; equals the `day` at which the scene applies.
    pub id: u32,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub choices: Vec<SceneChoice>,
    /// Closing narration; present only on the terminal scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending: Option<String>,
}

impl Scene {
    /// Whether this scene is the last decision point of the storyline.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.ending.is_some()
    }
}

/// Ordered scene table addressed by day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SceneCatalog {
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

impl SceneCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_SCENES_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<SceneCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a scene catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn scene_for_day(&self, day: u32) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id == day)
    }

    /// Day index of the last defined scene, preferring the explicit terminal
    /// marker and falling back to the highest id. Sanctuary classification
    /// applies once a survivor's `day` moves past this value.
    #[must_use]
    pub fn last_day(&self) -> u32 {
        self.scenes
            .iter()
            .find(|scene| scene.is_terminal())
            .map(|scene| scene.id)
            .or_else(|| self.scenes.iter().map(|scene| scene.id).max())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionTag;

    #[test]
    fn embedded_storyline_spans_six_days() {
        let catalog = SceneCatalog::default_catalog();
        assert_eq!(catalog.scenes.len(), 6);
        assert_eq!(catalog.last_day(), 6);
        for (index, scene) in catalog.scenes.iter().enumerate() {
            assert_eq!(scene.id as usize, index + 1);
            assert!(!scene.choices.is_empty());
        }
    }

    #[test]
    fn only_the_last_scene_is_terminal() {
        let catalog = SceneCatalog::default_catalog();
        for scene in &catalog.scenes {
            assert_eq!(scene.is_terminal(), scene.id == catalog.last_day());
        }
    }

    #[test]
    fn every_choice_tag_is_accepted_by_the_resolver() {
        let catalog = SceneCatalog::default_catalog();
        let mut saw_flavor_tag = false;
        for scene in &catalog.scenes {
            for choice in &scene.choices {
                // parse is total; flavor tags like "risk" fold into Other.
                if ActionTag::parse(&choice.action) == ActionTag::Other {
                    saw_flavor_tag = true;
                }
            }
        }
        assert!(saw_flavor_tag);
    }

    #[test]
    fn empty_catalog_reports_day_zero() {
        let catalog = SceneCatalog::from_json("{}").unwrap();
        assert_eq!(catalog.last_day(), 0);
        assert!(catalog.scene_for_day(1).is_none());
    }
}
