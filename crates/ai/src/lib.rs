//! HTTP clients for the generative AI providers used by the AI Advisor.
//!
//! - [`gemini::GeminiClient`] -- Google Gemini `generateContent`.
//! - [`anthropic::AnthropicClient`] -- Anthropic Messages API.
//! - [`prompts`] -- prompt builders for market trends and comment proposals.

pub mod anthropic;
pub mod error;
pub mod gemini;
pub mod prompts;

pub use error::AiError;
