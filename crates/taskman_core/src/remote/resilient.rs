//! Per-call fallback from a primary text service to the local stand-in.

use crate::model::task::FormatType;
use crate::remote::fallback::LocalTextService;
use crate::remote::{ServiceError, ServiceKind, TextService, ValidationVerdict};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Non-fatal diagnostic raised when a call fell back to local behavior.
#[derive(Debug)]
pub struct ServiceWarning {
    pub service: ServiceKind,
    pub error: ServiceError,
}

impl Display for ServiceWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.service, &self.error) {
            (ServiceKind::Validator, err) => write!(
                f,
                "Validator service unavailable ({err}); using basic validation"
            ),
            (ServiceKind::Formatter, ServiceError::Rejected(message)) => write!(
                f,
                "Formatter service could not format the text ({message}); keeping it unchanged"
            ),
            (ServiceKind::Formatter, err) => write!(
                f,
                "Formatter service unavailable ({err}); keeping text unchanged"
            ),
        }
    }
}

impl Error for ServiceWarning {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Usable value of a call plus the warning raised while producing it.
#[derive(Debug)]
pub struct ServiceOutcome<T> {
    pub value: T,
    pub warning: Option<ServiceWarning>,
}

impl<T> ServiceOutcome<T> {
    fn direct(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    fn degraded(value: T, service: ServiceKind, error: ServiceError) -> Self {
        warn!(
            "event=service_fallback module=remote status=degraded service={} error={}",
            service.as_str(),
            error
        );
        Self {
            value,
            warning: Some(ServiceWarning { service, error }),
        }
    }
}

/// Text service that never fails: primary first, local fallback on error.
#[derive(Debug, Clone, Default)]
pub struct ResilientTextService<P> {
    primary: P,
    fallback: LocalTextService,
}

impl<P: TextService> ResilientTextService<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            fallback: LocalTextService,
        }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    /// Validates through the primary service; on any failure applies the
    /// local minimal check instead.
    pub fn validate(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> ServiceOutcome<ValidationVerdict> {
        match self.primary.validate(text, min_length, max_length) {
            Ok(verdict) => ServiceOutcome::direct(verdict),
            Err(err) => ServiceOutcome::degraded(
                self.fallback.check(text, min_length),
                ServiceKind::Validator,
                err,
            ),
        }
    }

    /// Formats through the primary service; on any failure, including an
    /// explicit service error, returns the original text.
    pub fn format(&self, text: &str, format_type: FormatType) -> ServiceOutcome<String> {
        match self.primary.format(text, format_type) {
            Ok(formatted) => ServiceOutcome::direct(formatted),
            Err(err) => ServiceOutcome::degraded(
                self.fallback.passthrough(text),
                ServiceKind::Formatter,
                err,
            ),
        }
    }
}
