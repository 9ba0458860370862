// Caption generation: prompt building, pluggable backends, and per-user sessions.
// All LLM calls go through llm_client.

pub mod error;
pub mod generator;
pub mod handlers;
pub mod limits;
pub mod mock;
pub mod prompt_builder;
pub mod prompts;
pub mod service;
pub mod session;
pub mod store;
pub mod style;
