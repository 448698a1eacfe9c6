//! Local stand-in used when a remote text service cannot answer.

use crate::model::task::FormatType;
use crate::remote::{ServiceResult, TextService, ValidationVerdict};

/// Message reported when fallback validation rejects blank text.
pub const FALLBACK_EMPTY_TEXT_MESSAGE: &str = "Text cannot be empty";

/// Minimal validation and identity formatting. Never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalTextService;

impl LocalTextService {
    /// Blank text is rejected only when at least one character is required.
    /// Maximum length is not checked.
    pub fn check(&self, text: &str, min_length: usize) -> ValidationVerdict {
        if min_length >= 1 && text.trim().is_empty() {
            ValidationVerdict::rejected(FALLBACK_EMPTY_TEXT_MESSAGE)
        } else {
            ValidationVerdict::accepted()
        }
    }

    /// Returns the text unchanged.
    pub fn passthrough(&self, text: &str) -> String {
        text.to_string()
    }
}

impl TextService for LocalTextService {
    fn validate(
        &self,
        text: &str,
        min_length: usize,
        _max_length: usize,
    ) -> ServiceResult<ValidationVerdict> {
        Ok(self.check(text, min_length))
    }

    fn format(&self, text: &str, _format_type: FormatType) -> ServiceResult<String> {
        Ok(self.passthrough(text))
    }
}
