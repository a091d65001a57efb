use super::types::{ErrorResponse, INVALID_JSON, MessageResponse, NO_MESSAGE, WELCOME_MESSAGE};
use crate::{Error, Result, llm::Generator};
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<Generator>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub async fn agent(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> std::result::Result<Json<MessageResponse>, HandlerError> {
    if method != Method::POST {
        return Ok(Json(MessageResponse::new(WELCOME_MESSAGE)));
    }

    let request_id = Uuid::new_v4();

    let json = body.strip_prefix(UTF8_BOM).unwrap_or(&body[..]);
    let payload: Value = serde_json::from_slice(json).map_err(|e| {
        info!(%request_id, "Rejecting request with invalid JSON: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(INVALID_JSON)),
        )
    })?;

    let message = match extract_message(&payload) {
        Ok(Some(message)) => message,
        Ok(None) => {
            info!(%request_id, "Rejecting request without a message");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(NO_MESSAGE)),
            ));
        }
        Err(e) => {
            error!(%request_id, "Failed to handle request: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            ));
        }
    };

    info!(%request_id, "Received agent request ({} bytes)", message.len());

    let reply = state.generator.generate(&message).await;
    if reply.is_failure() {
        warn!(%request_id, "Returning upstream failure as message");
    } else {
        info!(%request_id, "Successfully generated reply");
    }

    Ok(Json(MessageResponse::new(reply.into_message())))
}

/// Pulls the prompt out of a request body. `Ok(None)` means the message is
/// missing or empty; bodies that are not JSON objects are errors.
pub fn extract_message(payload: &Value) -> Result<Option<String>> {
    let Value::Object(fields) = payload else {
        return Err(Error::request(format!(
            "expected a JSON object body, got {}",
            json_kind(payload)
        )));
    };

    let message = match fields.get("message") {
        None => None,
        Some(Value::String(text)) => (!text.is_empty()).then(|| text.clone()),
        Some(value) if is_blank(value) => None,
        Some(value) => Some(value.to_string()),
    };

    Ok(message)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
