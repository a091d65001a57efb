use super::{client::LlmClient, types::Generation};
use crate::error::{Error, panic_message};
use futures::FutureExt;
use std::{panic::AssertUnwindSafe, sync::Arc};
use tracing::{info, warn};

/// Which side of the upstream call a failed reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Auth, quota, network, or an upstream response we could not use.
    Api,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(Generation),
    Failed { kind: FailureKind, message: String },
}

impl Reply {
    fn from_error(err: &Error) -> Self {
        let kind = if err.is_upstream() {
            FailureKind::Api
        } else {
            FailureKind::Unexpected
        };

        Self::Failed {
            kind,
            message: err.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Renders the reply as the text handed back to HTTP clients.
    pub fn into_message(self) -> String {
        match self {
            Self::Text(generation) => generation.text,
            Self::Failed {
                kind: FailureKind::Api,
                message,
            } => format!("Error connecting to Gemini API: {}", message),
            Self::Failed {
                kind: FailureKind::Unexpected,
                message,
            } => format!("An unexpected error occurred: {}", message),
        }
    }
}

/// Turns a prompt into a [`Reply`]. Never fails: every error from the
/// client, and a panic inside it, comes back as [`Reply::Failed`].
pub struct Generator {
    client: Arc<dyn LlmClient>,
    default_model: String,
}

impl Generator {
    pub fn new(client: Arc<dyn LlmClient>, default_model: impl Into<String>) -> Self {
        Self {
            client,
            default_model: default_model.into(),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub async fn generate(&self, prompt: &str) -> Reply {
        self.generate_with_model(prompt, &self.default_model).await
    }

    pub async fn generate_with_model(&self, prompt: &str, model: &str) -> Reply {
        // Polled in place so dropping the caller cancels the upstream request.
        let call = AssertUnwindSafe(self.client.generate_content(model, prompt));

        match call.catch_unwind().await {
            Ok(Ok(generation)) => {
                if let Some(usage) = generation.usage {
                    info!(
                        model = %model,
                        prompt_tokens = usage.prompt_tokens,
                        response_tokens = usage.response_tokens,
                        total_tokens = usage.total_tokens,
                        "Generation completed"
                    );
                } else {
                    info!(model = %model, "Generation completed without usage metadata");
                }
                Reply::Text(generation)
            }
            Ok(Err(e)) => {
                warn!(model = %model, "Generation failed: {}", e);
                Reply::from_error(&e)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(model = %model, "Generation panicked: {}", message);
                Reply::Failed {
                    kind: FailureKind::Unexpected,
                    message,
                }
            }
        }
    }
}
