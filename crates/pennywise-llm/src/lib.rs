//! Pennywise LLM - Chat-completion providers with ordered fallback
//!
//! This crate hides the differences between the hosted chat-completion
//! services Pennywise talks to behind one [`LLMProvider`] trait:
//!
//! - Euri (`{EURI_API_BASE}/chat/completions`, `gpt-4.1-nano`)
//! - Groq (`https://api.groq.com/openai/v1/chat/completions`, `mixtral-8x7b-32768`)
//!
//! ## Key Design Principles
//!
//! 1. Every provider call has a hard timeout and no retries
//! 2. Provider failures are values ([`LLMError`]), never panics
//! 3. The [`LLMRouter`] tries providers in order and stops at the first success
//! 4. When every provider fails the caller decides what to say

pub mod providers;
pub mod router;
pub mod types;

pub use providers::*;
pub use router::*;
pub use types::*;
