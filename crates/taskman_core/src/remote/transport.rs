//! One-shot request/reply exchange over TCP.
//!
//! # Invariants
//! - Connect, write and read share one deadline. Host names are resolved
//!   before the deadline starts, so callers pass literal socket addresses
//!   (`AppConfig::validate` enforces this).
//! - The stream is dropped (closed) on every return path.

use crate::remote::{ServiceError, ServiceResult};
use log::debug;
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

const READ_CHUNK_BYTES: usize = 1024;
const MAX_REPLY_BYTES: usize = 64 * 1024;

/// Remaining time budget for one exchange.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    started_at: Instant,
    budget: Duration,
}

impl Deadline {
    pub(crate) fn start(budget: Duration) -> Self {
        Self {
            started_at: Instant::now(),
            budget,
        }
    }

    /// Time left, or `Timeout` once the budget is spent.
    pub(crate) fn remaining(&self) -> ServiceResult<Duration> {
        self.budget
            .checked_sub(self.started_at.elapsed())
            .filter(|left| !left.is_zero())
            .ok_or(ServiceError::Timeout(self.budget))
    }

    fn classify(&self, err: io::Error, connecting: bool) -> ServiceError {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                ServiceError::Timeout(self.budget)
            }
            _ if connecting => ServiceError::Unavailable(err),
            _ => ServiceError::Transport(err),
        }
    }
}

/// Sends `request` to `address` and returns the reply body without its
/// line terminator.
pub(crate) fn exchange(address: &str, request: &[u8], timeout: Duration) -> ServiceResult<Vec<u8>> {
    let deadline = Deadline::start(timeout);
    let mut stream = connect(address, &deadline)?;

    stream
        .set_write_timeout(Some(deadline.remaining()?))
        .map_err(ServiceError::Transport)?;
    stream
        .write_all(request)
        .and_then(|()| stream.flush())
        .map_err(|err| deadline.classify(err, false))?;
    if let Err(err) = stream.shutdown(Shutdown::Write) {
        debug!("event=service_exchange module=remote status=half_close_skipped address={address} error={err}");
    }

    read_reply(&mut stream, &deadline)
}

fn connect(address: &str, deadline: &Deadline) -> ServiceResult<TcpStream> {
    let candidates: Vec<SocketAddr> = address
        .to_socket_addrs()
        .map_err(ServiceError::Unavailable)?
        .collect();

    let mut last_error = io::Error::new(
        io::ErrorKind::AddrNotAvailable,
        format!("`{address}` resolved to no addresses"),
    );
    for candidate in candidates {
        match TcpStream::connect_timeout(&candidate, deadline.remaining()?) {
            Ok(stream) => return Ok(stream),
            Err(err) => last_error = err,
        }
    }
    Err(deadline.classify(last_error, true))
}

fn read_reply(stream: &mut TcpStream, deadline: &Deadline) -> ServiceResult<Vec<u8>> {
    let mut reply = Vec::new();
    let mut chunk = [0_u8; READ_CHUNK_BYTES];
    loop {
        stream
            .set_read_timeout(Some(deadline.remaining()?))
            .map_err(ServiceError::Transport)?;
        match stream.read(&mut chunk) {
            Ok(0) => return Ok(reply),
            Ok(read) => {
                reply.extend_from_slice(&chunk[..read]);
                if let Some(end) = reply.iter().position(|byte| *byte == b'\n') {
                    reply.truncate(end);
                    return Ok(reply);
                }
                if reply.len() > MAX_REPLY_BYTES {
                    return Err(ServiceError::Protocol(format!(
                        "reply exceeds {MAX_REPLY_BYTES} bytes"
                    )));
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(deadline.classify(err, false)),
        }
    }
}
