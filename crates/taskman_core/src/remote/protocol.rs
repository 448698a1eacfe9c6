//! Wire records exchanged with the text services.
//!
//! Requests are single-line JSON objects terminated by `\n`. Replies are one
//! JSON object, terminated by `\n` or by the server closing the connection.

use crate::model::task::FormatType;
use crate::remote::{ServiceError, ServiceResult, ValidationVerdict};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Body of a validation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateRequest<'a> {
    pub text: &'a str,
    pub min_length: usize,
    pub max_length: usize,
}

/// Body of a validation reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateReply {
    pub valid: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<ValidateReply> for ValidationVerdict {
    fn from(value: ValidateReply) -> Self {
        Self {
            valid: value.valid,
            error: value.error,
        }
    }
}

/// Body of a formatting request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatRequest<'a> {
    pub text: &'a str,
    pub format_type: FormatType,
}

/// Body of a formatting reply: either `formatted_text` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormatReply {
    #[serde(default)]
    pub formatted_text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl FormatReply {
    /// An `error` field wins over any `formatted_text`.
    pub fn into_result(self) -> ServiceResult<String> {
        if let Some(message) = self.error {
            return Err(ServiceError::Rejected(message));
        }
        self.formatted_text.ok_or_else(|| {
            ServiceError::Protocol("reply has neither `formatted_text` nor `error`".to_string())
        })
    }
}

/// Encodes one request line, including the trailing newline.
pub fn encode_request<T: Serialize>(request: &T) -> ServiceResult<Vec<u8>> {
    let mut line = serde_json::to_vec(request)
        .map_err(|err| ServiceError::Protocol(format!("cannot encode request: {err}")))?;
    line.push(b'\n');
    Ok(line)
}

/// Decodes one reply body (without its terminator).
pub fn decode_reply<T: DeserializeOwned>(body: &[u8]) -> ServiceResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ServiceError::Protocol("empty reply".to_string()));
    }
    serde_json::from_slice(body).map_err(|err| ServiceError::Protocol(err.to_string()))
}
