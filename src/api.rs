// API client module: a small blocking HTTP client for the Gemini
// `generateContent` endpoint, plus the prompt template and the wire types.
// The interactive loop only sees the `Generator` trait, so it can be driven
// by a stub in tests.

use crate::config::Config;
use crate::error::{ConfigurationError, GenerationError};
use reqwest::blocking::Client;
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const MODEL: &str = "gemini-1.5-flash";
pub const MAX_OUTPUT_TOKENS: u32 = 400;
pub const TEMPERATURE: f32 = 0.3;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can turn a topic into a paragraph.
pub trait Generator {
    fn generate(&self, topic: &str) -> Result<String, GenerationError>;
}

/// Build the fixed prompt. The topic is inserted verbatim.
pub fn build_prompt(topic: &str) -> String {
    format!(
        "Write an engaging and informative paragraph about the following topic: {}\n\
         \n\
         Please make it:\n\
         - Well-structured and coherent\n\
         - Informative yet accessible\n\
         - Around 100-150 words\n\
         - Engaging for readers",
        topic
    )
}

/// One generation call: the prompt and the parameters it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub model: String,
}

impl GenerationRequest {
    pub fn for_topic(topic: &str) -> Self {
        GenerationRequest {
            prompt: build_prompt(topic),
            max_output_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            model: MODEL.to_string(),
        }
    }

    /// JSON body for `models/{model}:generateContent`.
    pub fn body(&self) -> GenerateContentBody {
        GenerateContentBody {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some(self.prompt.clone()),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                temperature: self.temperature,
            },
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentBody {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Successful `generateContent` response. Only the fields we read.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error body: `{"error": {"code": 400, "message": "...", "status": "..."}}`.
#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: String,
}

/// Turn a raw HTTP status and body into the generated text.
pub fn parse_generate_response(status: u16, body: &str) -> Result<String, GenerationError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(GenerationError::Api { status, message });
    }

    let resp: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::Blocked(reason));
    }
    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(GenerationError::EmptyResponse(None));
    };

    let text: String = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    let text = text.trim();
    if text.is_empty() {
        return Err(GenerationError::EmptyResponse(candidate.finish_reason));
    }
    Ok(text.to_string())
}

/// Blocking client holding the reqwest client, the API base URL and the key.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client against the public Gemini endpoint.
    pub fn new(config: &Config) -> Result<Self, ConfigurationError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(config: &Config, base_url: &str) -> Result<Self, ConfigurationError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;
        Ok(GeminiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    /// Send one request and return the trimmed text.
    pub fn send(&self, req: &GenerationRequest) -> Result<String, GenerationError> {
        let url = self.endpoint(&req.model);
        info!(model = %req.model, max_output_tokens = req.max_output_tokens, "generateContent request");

        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| GenerationError::Request(format!("invalid API key header: {}", e)))?;
        let res = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, key)
            .json(&req.body())
            .send()
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = res.status().as_u16();
        let body = res
            .text()
            .map_err(|e| GenerationError::Request(e.to_string()))?;
        debug!(status, bytes = body.len(), "generateContent response");

        let result = parse_generate_response(status, &body);
        if let Err(e) = &result {
            info!(error = %e, "generation failed");
        }
        result
    }
}

impl Generator for GeminiClient {
    fn generate(&self, topic: &str) -> Result<String, GenerationError> {
        self.send(&GenerationRequest::for_topic(topic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompt_contains_topic_verbatim() {
        for topic in ["rust", "  the history of tea ", "émojis 🚀 & <tags>"] {
            let prompt = build_prompt(topic);
            assert!(prompt.contains(topic), "{prompt}");
        }
        assert!(build_prompt("x").contains("Around 100-150 words"));
    }

    #[test]
    fn request_uses_fixed_parameters() {
        let req = GenerationRequest::for_topic("owls");
        assert_eq!(req.max_output_tokens, 400);
        assert_eq!(req.temperature, 0.3);
        assert_eq!(req.model, "gemini-1.5-flash");
        assert!(req.prompt.contains("owls"));
    }

    #[test]
    fn body_serializes_in_gemini_shape() {
        let req = GenerationRequest::for_topic("owls");
        let value = serde_json::to_value(req.body()).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], json!(req.prompt));
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 400);
        let temp = value["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.3).abs() < 1e-6);
    }

    #[test]
    fn first_candidate_text_is_trimmed_and_joined() {
        let body = json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "  Owls are "}, {"text": "quiet.\n"}]},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        })
        .to_string();
        assert_eq!(parse_generate_response(200, &body).unwrap(), "Owls are quiet.");
    }

    #[test]
    fn blocked_prompt_reports_the_block_reason() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string();
        assert_eq!(
            parse_generate_response(200, &body).unwrap_err(),
            GenerationError::Blocked("SAFETY".into())
        );
    }

    #[test]
    fn no_candidates_without_feedback_is_empty() {
        assert_eq!(
            parse_generate_response(200, "{}").unwrap_err(),
            GenerationError::EmptyResponse(None)
        );
    }

    #[test]
    fn whitespace_only_text_is_an_empty_response() {
        let body = json!({
            "candidates": [{"content": {"parts": [{"text": "   "}]}, "finishReason": "MAX_TOKENS"}]
        })
        .to_string();
        assert_eq!(
            parse_generate_response(200, &body).unwrap_err(),
            GenerationError::EmptyResponse(Some("MAX_TOKENS".into()))
        );
    }

    #[test]
    fn error_body_message_is_surfaced() {
        let body = json!({
            "error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}
        })
        .to_string();
        assert_eq!(
            parse_generate_response(400, &body).unwrap_err(),
            GenerationError::Api {
                status: 400,
                message: "API key not valid. Please pass a valid API key.".into()
            }
        );
    }

    #[test]
    fn non_json_error_body_is_kept_raw() {
        let err = parse_generate_response(502, "Bad Gateway\n").unwrap_err();
        assert_eq!(
            err,
            GenerationError::Api {
                status: 502,
                message: "Bad Gateway".into()
            }
        );
    }

    #[test]
    fn garbage_success_body_is_malformed() {
        let err = parse_generate_response(200, "<html>").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn endpoint_includes_model_and_strips_trailing_slash() {
        let cfg = Config {
            api_key: "k".into(),
        };
        let client = GeminiClient::with_base_url(&cfg, "http://localhost:9000/").unwrap();
        assert_eq!(
            client.endpoint(MODEL),
            "http://localhost:9000/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn unreachable_host_is_a_request_error() {
        let cfg = Config {
            api_key: "k".into(),
        };
        // Port 1 on loopback is not listening; the connection is refused.
        let client = GeminiClient::with_base_url(&cfg, "http://127.0.0.1:1").unwrap();
        let err = client.generate("owls").unwrap_err();
        assert!(matches!(err, GenerationError::Request(_)), "{err:?}");
    }
}
