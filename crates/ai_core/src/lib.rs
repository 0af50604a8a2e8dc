//! AI Core - Report generation on top of a hosted LLM
//!
//! Provides the inference port, the Gemini `generateContent` client and the
//! report generator that wraps a flattened forecast into a fixed
//! instruction/prompt pair.

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;
pub mod report;

pub use config::InferenceConfig;
pub use error::GenerationError;
pub use gemini::GeminiClient;
pub use ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};
pub use report::{ReportGenerator, SYSTEM_INSTRUCTION, build_prompt};
