//! Client for the optional Validator and Formatter text services.
//!
//! # Responsibility
//! - Define the `TextService` capability used by the task orchestrator.
//! - Provide a live TCP implementation and a local fallback implementation.
//! - Select the fallback per call when the live service fails.
//!
//! # Invariants
//! - One connection per call; every connection is closed before returning.
//! - A single call to a literal socket address never waits longer than its
//!   configured round-trip timeout.
//! - Service faults reach callers as warnings, never as hard failures.

use crate::model::task::FormatType;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::time::Duration;

mod client;
mod fallback;
pub mod protocol;
mod resilient;
mod transport;

pub use client::RemoteTextService;
pub use fallback::{LocalTextService, FALLBACK_EMPTY_TEXT_MESSAGE};
pub use resilient::{ResilientTextService, ServiceOutcome, ServiceWarning};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Which remote collaborator a call targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Validator,
    Formatter,
}

impl ServiceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validator => "validator",
            Self::Formatter => "formatter",
        }
    }
}

impl Display for ServiceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validator => f.write_str("Validator"),
            Self::Formatter => f.write_str("Formatter"),
        }
    }
}

/// Verdict returned by a validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub valid: bool,
    /// Human-readable rejection reason, when the validator gave one.
    pub error: Option<String>,
}

impl ValidationVerdict {
    pub fn accepted() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }
}

/// Failure of a single service exchange.
#[derive(Debug)]
pub enum ServiceError {
    /// No complete reply arrived within the round-trip budget.
    Timeout(Duration),
    /// The endpoint could not be resolved or connected to.
    Unavailable(io::Error),
    /// The connection broke mid-exchange.
    Transport(io::Error),
    /// The reply was not a well-formed response record.
    Protocol(String),
    /// The service answered with an explicit `error` field.
    Rejected(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout(budget) => write!(f, "no reply within {} ms", budget.as_millis()),
            Self::Unavailable(err) => write!(f, "connection failed: {err}"),
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Protocol(message) => write!(f, "malformed reply: {message}"),
            Self::Rejected(message) => write!(f, "service error: {message}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) | Self::Transport(err) => Some(err),
            Self::Timeout(_) | Self::Protocol(_) | Self::Rejected(_) => None,
        }
    }
}

/// Text validation and formatting capability.
///
/// Implementations may fail; `ResilientTextService` turns failures into
/// fallback values plus warnings.
pub trait TextService {
    fn validate(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> ServiceResult<ValidationVerdict>;

    fn format(&self, text: &str, format_type: FormatType) -> ServiceResult<String>;
}

impl<S: TextService + ?Sized> TextService for &S {
    fn validate(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> ServiceResult<ValidationVerdict> {
        (**self).validate(text, min_length, max_length)
    }

    fn format(&self, text: &str, format_type: FormatType) -> ServiceResult<String> {
        (**self).format(text, format_type)
    }
}

impl<S: TextService + ?Sized> TextService for Box<S> {
    fn validate(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> ServiceResult<ValidationVerdict> {
        (**self).validate(text, min_length, max_length)
    }

    fn format(&self, text: &str, format_type: FormatType) -> ServiceResult<String> {
        (**self).format(text, format_type)
    }
}
