//! ClauseLens Domain Layer
//!
//! Core vocabulary for the contract review pipeline. This crate has ZERO
//! external dependencies and defines the value objects and trait interfaces
//! that the provider, analyzer and web layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Chat message**: one role-tagged entry of the prompt sent to a model
//! - **Completion parameters**: model id and decoding settings for one request
//! - **Completion provider**: anything that turns a message list into text
//! - **Risk treatment**: the visual bucket a risk flag's level maps to
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod message;
pub mod risk;
pub mod traits;

// Re-exports for convenience
pub use message::{ChatMessage, CompletionParams, Role};
pub use risk::RiskTreatment;
pub use traits::CompletionProvider;
