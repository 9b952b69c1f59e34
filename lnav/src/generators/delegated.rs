//! Delegated generators: routine, meals and tasks as LLM free text
//!
//! Output is accepted as-is. Nothing here validates, retries or falls back;
//! any failure goes straight back to the orchestrator.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{Artifact, BehavioralProfile, MealPlan, Profile, Routine, Task};
use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::prompts::{PromptContext, PromptError, PromptLoader};

/// Failure of a delegated generation call
#[derive(Debug, Error)]
pub enum DelegatedError {
    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Asks an LLM for each plan section
pub struct DelegatedGenerator {
    client: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    max_tokens: u32,
}

impl DelegatedGenerator {
    pub fn new(client: Arc<dyn LlmClient>, prompts: PromptLoader, max_tokens: u32) -> Self {
        debug!(%max_tokens, "DelegatedGenerator::new: called");
        Self {
            client,
            prompts,
            max_tokens,
        }
    }

    pub async fn routine(
        &self,
        profile: &Profile,
        behavioral: &BehavioralProfile,
    ) -> Result<Artifact<Routine>, DelegatedError> {
        let ctx = PromptContext::new(profile, behavioral);
        self.generate("routine", &ctx).await.map(Artifact::Freeform)
    }

    pub async fn meals(
        &self,
        profile: &Profile,
        behavioral: &BehavioralProfile,
    ) -> Result<Artifact<MealPlan>, DelegatedError> {
        let ctx = PromptContext::new(profile, behavioral);
        self.generate("meals", &ctx).await.map(Artifact::Freeform)
    }

    pub async fn tasks(
        &self,
        profile: &Profile,
        behavioral: &BehavioralProfile,
        tasks: &[Task],
    ) -> Result<Artifact<Vec<Task>>, DelegatedError> {
        let ctx = PromptContext::new(profile, behavioral).with_tasks(tasks);
        self.generate("tasks", &ctx).await.map(Artifact::Freeform)
    }

    async fn generate(&self, template: &str, ctx: &PromptContext) -> Result<String, DelegatedError> {
        debug!(%template, "DelegatedGenerator::generate: called");
        let system = self.prompts.system_prompt()?;
        let prompt = self.prompts.render(template, ctx)?;

        let response = self
            .client
            .complete(CompletionRequest::single(system, prompt, self.max_tokens))
            .await?;

        let text = response
            .content
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        info!(
            %template,
            output_tokens = response.usage.output_tokens,
            "Delegated generation complete"
        );
        Ok(text)
    }
}
