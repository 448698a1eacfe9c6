//! Live TCP client for the Validator and Formatter services.

use crate::model::task::FormatType;
use crate::remote::protocol::{
    decode_reply, encode_request, FormatReply, FormatRequest, ValidateReply, ValidateRequest,
};
use crate::remote::transport::exchange;
use crate::remote::{ServiceKind, ServiceResult, TextService, ValidationVerdict};
use log::{info, warn};
use std::time::{Duration, Instant};

/// Networked `TextService` talking to two independently addressed services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTextService {
    validator_address: String,
    formatter_address: String,
    timeout: Duration,
}

impl RemoteTextService {
    pub fn new(
        validator_address: impl Into<String>,
        formatter_address: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            validator_address: validator_address.into(),
            formatter_address: formatter_address.into(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn address(&self, service: ServiceKind) -> &str {
        match service {
            ServiceKind::Validator => &self.validator_address,
            ServiceKind::Formatter => &self.formatter_address,
        }
    }

    fn call(&self, service: ServiceKind, request: &[u8]) -> ServiceResult<Vec<u8>> {
        let address = self.address(service);
        let started_at = Instant::now();
        let result = exchange(address, request, self.timeout);
        match &result {
            Ok(reply) => info!(
                "event=service_call module=remote status=ok service={} address={} duration_ms={} reply_bytes={}",
                service.as_str(),
                address,
                started_at.elapsed().as_millis(),
                reply.len()
            ),
            Err(err) => warn!(
                "event=service_call module=remote status=error service={} address={} duration_ms={} error={}",
                service.as_str(),
                address,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

impl TextService for RemoteTextService {
    fn validate(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> ServiceResult<ValidationVerdict> {
        let request = encode_request(&ValidateRequest {
            text,
            min_length,
            max_length,
        })?;
        let reply = self.call(ServiceKind::Validator, &request)?;
        let reply: ValidateReply = decode_reply(&reply)?;
        Ok(reply.into())
    }

    fn format(&self, text: &str, format_type: FormatType) -> ServiceResult<String> {
        let request = encode_request(&FormatRequest { text, format_type })?;
        let reply = self.call(ServiceKind::Formatter, &request)?;
        let reply: FormatReply = decode_reply(&reply)?;
        reply.into_result()
    }
}
