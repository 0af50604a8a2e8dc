//! Gemini inference engine implementation
//!
//! Talks to the Generative Language REST API (`models/{model}:generateContent`).

mod client;
mod types;

pub use client::GeminiClient;
