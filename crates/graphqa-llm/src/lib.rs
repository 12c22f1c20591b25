//! graphqa-llm: text generation services.
//!
//! The pipeline and the evaluation harness only see the capability traits
//! in [`services`]; [`GeminiClient`] implements all three against the
//! Gemini `generateContent` endpoint.

pub mod client;
pub mod generation;
pub mod judge;
pub mod prompts;
pub mod services;

pub use client::{GeminiClient, LlmConfig, LlmError};
pub use judge::parse_judgement;
pub use services::{AnswerSynthesizer, Judge, QueryGenerator};
