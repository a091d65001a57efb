pub mod client;
pub mod generator;
pub mod types;

pub use client::{GeminiClient, LlmClient};
pub use generator::{FailureKind, Generator, Reply};
pub use types::*;
