use async_trait::async_trait;
use gemini_agent::{
    Error, Result,
    llm::{Generation, LlmClient},
};
use mockall::mock;
use std::sync::Mutex;

mock! {
    pub Llm {}

    #[async_trait]
    impl LlmClient for Llm {
        async fn generate_content(&self, model: &str, prompt: &str) -> Result<Generation>;
    }
}

/// Recording stub for the upstream client.
#[derive(Debug, Default)]
pub struct StubLlmClient {
    pub responses: Mutex<Vec<Generation>>,
    pub requests: Mutex<Vec<(String, String)>>,
    pub error: Option<String>,
    pub panic: bool,
}

impl StubLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(self, responses: Vec<Generation>) -> Self {
        *self.responses.lock().unwrap() = responses;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic = true;
        self
    }

    pub fn get_requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for StubLlmClient {
    async fn generate_content(&self, model: &str, prompt: &str) -> Result<Generation> {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));

        if self.panic {
            panic!("stub client panicked");
        }

        if let Some(ref error) = self.error {
            return Err(Error::Api {
                code: 503,
                status: "UNAVAILABLE".to_string(),
                message: error.clone(),
            });
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::EmptyResponse {
                reason: "no more stub responses available".to_string(),
            });
        }

        Ok(responses.remove(0))
    }
}
