// Error kinds for the two boundaries of the program: loading configuration
// (fatal, the loop never starts) and generating a paragraph (reported to the
// user, the loop carries on).

use std::fmt::Display;

/// Failure while preparing the client before the interactive loop.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ConfigurationError {
    /// `GEMINI_API_KEY` is unset or blank.
    MissingApiKey,
    /// The underlying HTTP client could not be built.
    HttpClient(String),
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "{} not found in environment variables",
                crate::config::API_KEY_VAR
            ),
            Self::HttpClient(s) => write!(f, "Failed to build HTTP client: {}", s),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Failure of a single generation call.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum GenerationError {
    /// The request never produced a response (DNS, TLS, connection, timeout).
    Request(String),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The body could not be read as a generateContent response.
    MalformedResponse(String),
    /// The prompt was rejected; carries `promptFeedback.blockReason`.
    Blocked(String),
    /// The API answered but produced no text. Carries the candidate's
    /// finish reason when there was one.
    EmptyResponse(Option<String>),
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(s) => write!(f, "Request failed: {}", s),
            Self::Api { status, message } => write!(f, "API error ({}): {}", status, message),
            Self::MalformedResponse(s) => write!(f, "Malformed response: {}", s),
            Self::EmptyResponse(None) => write!(f, "The model returned an empty response"),
            Self::EmptyResponse(Some(reason)) => write!(
                f,
                "The model returned an empty response (finish reason: {})",
                reason
            ),
            Self::Blocked(reason) => write!(f, "The prompt was blocked: {}", reason),
        }
    }
}

impl std::error::Error for GenerationError {}
