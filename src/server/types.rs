use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Gemini Agent API! Send a POST request with a \"message\" key.";
pub const INVALID_JSON: &str = "Invalid JSON";
pub const NO_MESSAGE: &str = "No message provided";

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
