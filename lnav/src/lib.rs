//! LifeNav - personalized life plan generator
//!
//! Turns a user profile into one Markdown plan covering a daily routine, a
//! weekly meal plan with a shopping list, an ordered task list and a merged
//! calendar. Plans come from fixed rule tables or from an LLM.
//!
//! # Modules
//!
//! - [`domain`] - profile, routine, meal, task and calendar types
//! - [`generators`] - rule-based and delegated generators
//! - [`validation`] - structural checks on generator output
//! - [`calendar`] - calendar sources and the routine/calendar merge
//! - [`document`] - Markdown assembly and atomic export
//! - [`orchestrator`] - the staged pipeline tying it all together
//! - [`llm`] - LLM client trait with OpenAI and Anthropic implementations
//! - [`prompts`] - Handlebars prompt templates for delegated mode
//! - [`input`] - profile and task sources
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod calendar;
pub mod cli;
pub mod config;
pub mod document;
pub mod domain;
pub mod generators;
pub mod input;
pub mod llm;
pub mod orchestrator;
pub mod prompts;
pub mod validation;

// Re-export commonly used types
pub use calendar::{CalendarMerger, CalendarSource, FileCalendar, SampleCalendar};
pub use config::{Config, LlmConfig, Mode, ResolvedLlmConfig};
pub use document::{PlanDocument, save_document};
pub use domain::{Artifact, BehavioralProfile, MealPlan, MergedSchedule, Profile, Routine, Task};
pub use generators::DelegatedGenerator;
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient};
pub use orchestrator::{Engine, Orchestrator, PipelineError, PipelineOutcome, PipelineState};
pub use validation::{FailureReason, Verdict};
