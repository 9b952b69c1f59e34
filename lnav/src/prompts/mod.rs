//! Prompt templates for delegated generation
//!
//! Templates are Handlebars `.pmt` files. A user override in
//! `.lifenav/prompts/` wins over the copy compiled into the binary.

mod embedded;
mod loader;

pub use loader::{PromptContext, PromptError, PromptField, PromptLoader};
