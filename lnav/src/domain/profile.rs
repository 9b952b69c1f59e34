//! User profile: the raw preference record driving a run

use prefstore::Preferences;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::ClockTime;

/// Raw user-supplied preferences
///
/// Every field is optional on input and falls back to the defaults below.
/// Attributes this crate does not know about are kept in `extra` so they
/// survive a round-trip through the preference store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub wake_time: ClockTime,
    pub sleep_time: ClockTime,
    pub work_start: ClockTime,
    pub work_end: ClockTime,
    pub wants_gym: bool,
    pub wants_learning: bool,
    pub wants_skincare: bool,
    pub diet_type: String,
    pub budget_level: String,
    pub avoid_ingredients: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            wake_time: ClockTime::at(7, 0),
            sleep_time: ClockTime::at(23, 0),
            work_start: ClockTime::at(9, 0),
            work_end: ClockTime::at(17, 0),
            wants_gym: true,
            wants_learning: true,
            wants_skincare: true,
            diet_type: "balanced".to_string(),
            budget_level: "medium".to_string(),
            avoid_ingredients: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl Profile {
    /// Demonstration profile used when no profile source is given
    pub fn sample() -> Self {
        Self {
            name: "Sam".to_string(),
            avoid_ingredients: vec!["milk".to_string()],
            ..Self::default()
        }
    }

    /// Build a profile from stored preferences, defaulting absent keys
    pub fn from_preferences(prefs: &Preferences) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(prefs.clone()))
    }

    /// Flatten into the store's key-value shape
    pub fn to_preferences(&self) -> Result<Preferences, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            // Profile is a struct, so serde_json always produces an object
            _ => Ok(Preferences::new()),
        }
    }

    /// Display pairs in a stable order: known fields first, then extras by key
    pub fn attributes(&self) -> Vec<(String, String)> {
        let avoid = if self.avoid_ingredients.is_empty() {
            "none".to_string()
        } else {
            self.avoid_ingredients.join(", ")
        };

        let mut attrs = vec![
            ("name".to_string(), self.name.clone()),
            ("wake_time".to_string(), self.wake_time.to_string()),
            ("sleep_time".to_string(), self.sleep_time.to_string()),
            ("work_start".to_string(), self.work_start.to_string()),
            ("work_end".to_string(), self.work_end.to_string()),
            ("wants_gym".to_string(), self.wants_gym.to_string()),
            ("wants_learning".to_string(), self.wants_learning.to_string()),
            ("wants_skincare".to_string(), self.wants_skincare.to_string()),
            ("diet_type".to_string(), self.diet_type.clone()),
            ("budget_level".to_string(), self.budget_level.clone()),
            ("avoid_ingredients".to_string(), avoid),
        ];

        for (key, value) in &self.extra {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            attrs.push((key.clone(), rendered));
        }

        attrs
    }
}
