//! Content generation for adcraft.
//!
//! Renders a business profile into a prompt, sends it to one configured
//! LLM provider, extracts and validates the JSON answer, then layers on
//! rule-based metadata (industry palettes, cultural fragments and a
//! performance score).

pub mod enricher;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod pipeline;
pub mod prompt;
pub mod providers;

pub use enricher::{enrich, performance_score, ContentDraft};
pub use error::GenerationError;
pub use gateway::GenerationGateway;
pub use pipeline::{generate_payment_note, generate_poster_content};
pub use prompt::{build_payment_note_prompt, build_poster_prompt, GenerationRequest};
pub use providers::{AnthropicProvider, CompletionProvider, GeminiProvider, OpenAiProvider};
