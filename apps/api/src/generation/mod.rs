// Post generation: prompt assembly, the generation pipeline and its HTTP handlers.
// All LLM calls go through llm_client; nothing here talks to Gemini directly.

pub mod assembler;
pub mod handlers;
pub mod prompts;
pub mod service;
