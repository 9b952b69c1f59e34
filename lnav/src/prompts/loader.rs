//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::embedded;
use crate::domain::{BehavioralProfile, Profile, Task};

/// Errors raised while loading or rendering a prompt
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to read prompt {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Prompt template not found: {0}")]
    NotFound(String),

    #[error("Failed to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// One `key: value` line in a rendered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptField {
    pub key: String,
    pub value: String,
}

impl PromptField {
    fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Context for rendering prompt templates
///
/// Carries the profile fields templates branch on, the full attribute list,
/// and the derived behavioral tags.
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    pub name: String,
    pub wake_time: String,
    pub sleep_time: String,
    pub work_start: String,
    pub work_end: String,
    pub wants_gym: bool,
    pub wants_learning: bool,
    pub wants_skincare: bool,
    pub diet_type: String,
    pub budget_level: String,
    pub avoid_ingredients: Vec<String>,
    pub attributes: Vec<PromptField>,
    pub behavioral: Vec<PromptField>,
    /// Only populated for the task prompt
    pub tasks: Vec<Task>,
}

impl PromptContext {
    pub fn new(profile: &Profile, behavioral: &BehavioralProfile) -> Self {
        Self {
            name: profile.name.clone(),
            wake_time: profile.wake_time.to_string(),
            sleep_time: profile.sleep_time.to_string(),
            work_start: profile.work_start.to_string(),
            work_end: profile.work_end.to_string(),
            wants_gym: profile.wants_gym,
            wants_learning: profile.wants_learning,
            wants_skincare: profile.wants_skincare,
            diet_type: profile.diet_type.clone(),
            budget_level: profile.budget_level.clone(),
            avoid_ingredients: profile.avoid_ingredients.clone(),
            attributes: profile
                .attributes()
                .into_iter()
                .map(|(k, v)| PromptField::new(k, v))
                .collect(),
            behavioral: behavioral
                .tags()
                .into_iter()
                .map(|(k, v)| PromptField::new(k, v))
                .collect(),
            tasks: Vec::new(),
        }
    }

    /// Attach the task list for the task prompt
    pub fn with_tasks(mut self, tasks: &[Task]) -> Self {
        self.tasks = tasks.to_vec();
        self
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.lifenav/prompts/`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader rooted at `root`, picking up `.lifenav/prompts/` if present
    pub fn new(root: impl AsRef<Path>) -> Self {
        let user_dir = root.as_ref().join(".lifenav").join("prompts");
        debug!(?user_dir, "PromptLoader::new: called");

        Self {
            hbs: engine(),
            user_dir: if user_dir.exists() { Some(user_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        Self {
            hbs: engine(),
            user_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks `.lifenav/prompts/{name}.pmt` first, then the embedded copy.
    fn load_template(&self, name: &str) -> Result<String, PromptError> {
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from user override: {:?}", path);
                return std::fs::read_to_string(&path).map_err(|source| PromptError::Read { path, source });
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(PromptError::NotFound(name.to_string()))
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &PromptContext) -> Result<String, PromptError> {
        let template = self.load_template(template_name)?;
        info!("Rendering template '{}' for {}", template_name, context.name);

        self.hbs
            .render_template(&template, context)
            .map_err(|source| PromptError::Render {
                name: template_name.to_string(),
                source: Box::new(source),
            })
    }

    /// The system prompt, used verbatim
    pub fn system_prompt(&self) -> Result<String, PromptError> {
        self.load_template("system")
    }
}

// Prompts are plain text, not HTML
fn engine() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(handlebars::no_escape);
    hbs
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context() -> PromptContext {
        let profile = Profile::sample();
        PromptContext::new(&profile, &BehavioralProfile::derive(&profile))
    }

    #[test]
    fn test_routine_prompt_embeds_profile() {
        let loader = PromptLoader::embedded_only();
        let prompt = loader.render("routine", &context()).unwrap();

        assert!(prompt.contains("daily routine for Sam"));
        assert!(prompt.contains("Start at 07:00 and end at 23:00"));
        assert!(prompt.contains("sleep_type: regular_riser"));
        assert!(prompt.contains("Include a workout block."));
    }

    #[test]
    fn test_routine_prompt_omits_disabled_blocks() {
        let mut profile = Profile::sample();
        profile.wants_gym = false;
        let ctx = PromptContext::new(&profile, &BehavioralProfile::derive(&profile));

        let prompt = PromptLoader::embedded_only().render("routine", &ctx).unwrap();
        assert!(!prompt.contains("workout"));
        assert!(prompt.contains("fitness_level: low_activity"));
    }

    #[test]
    fn test_meals_prompt_lists_avoided_ingredients() {
        let mut profile = Profile::sample();
        profile.avoid_ingredients = vec!["milk".to_string(), "peanuts".to_string()];
        let ctx = PromptContext::new(&profile, &BehavioralProfile::derive(&profile));

        let prompt = PromptLoader::embedded_only().render("meals", &ctx).unwrap();
        assert!(prompt.contains("Never use: milk, peanuts"));
    }

    #[test]
    fn test_tasks_prompt_lists_tasks_unescaped() {
        let ctx = context().with_tasks(&[Task::new("Fix R&D notes", 1)]);
        let prompt = PromptLoader::embedded_only().render("tasks", &ctx).unwrap();

        assert!(prompt.contains("- [Priority 1] Fix R&D notes"));
        assert!(prompt.contains("at most 2 extra tasks"));
    }

    #[test]
    fn test_user_override_wins() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".lifenav").join("prompts");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("routine.pmt"), "Custom routine for {{name}}").unwrap();

        let loader = PromptLoader::new(temp.path());
        assert_eq!(loader.render("routine", &context()).unwrap(), "Custom routine for Sam");
        // Templates without an override still come from the binary
        assert!(loader.render("meals", &context()).unwrap().contains("7-day meal plan"));
    }

    #[test]
    fn test_unknown_template() {
        let loader = PromptLoader::embedded_only();
        let result = loader.load_template("nonexistent-template");
        assert!(matches!(result, Err(PromptError::NotFound(_))));
    }

    #[test]
    fn test_system_prompt() {
        let system = PromptLoader::embedded_only().system_prompt().unwrap();
        assert!(system.contains("LifeNav"));
    }
}
