//! Behavioral profile: categorical tags derived from a Profile

use serde::Serialize;
use std::fmt;

use super::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepType {
    EarlyRiser,
    RegularRiser,
    LateRiser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStyle {
    LightWorker,
    BalancedWorker,
    HeavyWorker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Active,
    LowActivity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningMode {
    GrowthOriented,
    MinimalLearning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkincareImportance {
    High,
    Low,
}

impl SleepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarlyRiser => "early_riser",
            Self::RegularRiser => "regular_riser",
            Self::LateRiser => "late_riser",
        }
    }
}

impl WorkStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LightWorker => "light_worker",
            Self::BalancedWorker => "balanced_worker",
            Self::HeavyWorker => "heavy_worker",
        }
    }
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::LowActivity => "low_activity",
        }
    }
}

impl LearningMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GrowthOriented => "growth_oriented",
            Self::MinimalLearning => "minimal_learning",
        }
    }
}

impl SkincareImportance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(SleepType, WorkStyle, FitnessLevel, LearningMode, SkincareImportance);

/// Tags computed from a Profile; recomputed every run, never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BehavioralProfile {
    pub sleep_type: SleepType,
    pub work_style: WorkStyle,
    pub fitness_level: FitnessLevel,
    pub learning_mode: LearningMode,
    pub skincare_importance: SkincareImportance,
    pub diet_type: String,
    pub budget_level: String,
    pub restrictions: Vec<String>,
}

impl BehavioralProfile {
    pub fn derive(profile: &Profile) -> Self {
        let wake_hour = profile.wake_time.hour();
        let sleep_type = if wake_hour < 6 {
            SleepType::EarlyRiser
        } else if wake_hour > 9 {
            SleepType::LateRiser
        } else {
            SleepType::RegularRiser
        };

        // Whole hours only; an overnight shift wraps past midnight
        let start = u32::from(profile.work_start.hour());
        let end = u32::from(profile.work_end.hour());
        let work_hours = (end + 24 - start) % 24;
        let work_style = if work_hours >= 9 {
            WorkStyle::HeavyWorker
        } else if work_hours <= 5 {
            WorkStyle::LightWorker
        } else {
            WorkStyle::BalancedWorker
        };

        Self {
            sleep_type,
            work_style,
            fitness_level: if profile.wants_gym {
                FitnessLevel::Active
            } else {
                FitnessLevel::LowActivity
            },
            learning_mode: if profile.wants_learning {
                LearningMode::GrowthOriented
            } else {
                LearningMode::MinimalLearning
            },
            skincare_importance: if profile.wants_skincare {
                SkincareImportance::High
            } else {
                SkincareImportance::Low
            },
            diet_type: profile.diet_type.clone(),
            budget_level: profile.budget_level.clone(),
            restrictions: profile.avoid_ingredients.clone(),
        }
    }

    /// Display pairs in a stable order
    pub fn tags(&self) -> Vec<(&'static str, String)> {
        let restrictions = if self.restrictions.is_empty() {
            "none".to_string()
        } else {
            self.restrictions.join(", ")
        };
        vec![
            ("sleep_type", self.sleep_type.to_string()),
            ("work_style", self.work_style.to_string()),
            ("fitness_level", self.fitness_level.to_string()),
            ("learning_mode", self.learning_mode.to_string()),
            ("skincare_importance", self.skincare_importance.to_string()),
            ("diet_type", self.diet_type.clone()),
            ("budget_level", self.budget_level.clone()),
            ("restrictions", restrictions),
        ]
    }
}
