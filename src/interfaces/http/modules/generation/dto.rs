use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[validate(length(min = 1, message = "Model name is required"))]
    #[schema(example = "gpt-4")]
    pub model_name: String,
    #[validate(range(min = 0, message = "Token count must be non-negative"))]
    pub tokens_used: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTextRequest {
    #[validate(length(min = 1, message = "Prompt is required"))]
    pub prompt: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Upstream response body, relayed verbatim
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTextResponse {
    #[schema(value_type = Object)]
    pub generated_text: serde_json::Value,
}
