use super::mocks::StubLlmClient;
use gemini_agent::{
    Result,
    config::{DEFAULT_MODEL, GeminiConfig},
    llm::{Generation, Generator, LlmClient, Usage},
    server::{self, AppState},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

pub const ENDPOINT: &str = "/api/agent";

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9090
  endpoint: "/agent/chat"
  logs:
    level: "debug"
gemini:
  api_key: "yaml-api-key"
  model: "gemini-2.5-pro"
"#;

pub fn create_test_gemini_config(base_url: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: "test-api-key".to_string(),
        base_url: base_url.to_string(),
        model: DEFAULT_MODEL.to_string(),
    }
}

pub fn create_generation(text: &str) -> Generation {
    Generation {
        text: text.to_string(),
        usage: Some(Usage {
            prompt_tokens: 5,
            response_tokens: 7,
            total_tokens: 12,
        }),
        finish_reason: Some("STOP".to_string()),
        model_version: Some(DEFAULT_MODEL.to_string()),
    }
}

/// A `generateContent` response body carrying `text` as its only part.
pub fn gemini_response_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 5,
            "candidatesTokenCount": 7,
            "totalTokenCount": 12
        },
        "modelVersion": DEFAULT_MODEL
    })
}

pub fn create_app(client: Arc<dyn LlmClient>) -> axum::Router {
    let generator = Generator::new(client, DEFAULT_MODEL);
    let state = AppState {
        generator: Arc::new(generator),
    };
    server::router(state, ENDPOINT)
}

pub fn create_stub_app(stub: &Arc<StubLlmClient>) -> axum::Router {
    create_app(stub.clone())
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}
