#![allow(dead_code)]

use serde_json::{json, Value};
use std::cell::Cell;
use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use taskman_core::{
    FormatType, ServiceError, ServiceResult, ServiceWarning, Task, TaskConsole, TextService,
    ValidationVerdict,
};

/// How a fake service answers each connection.
#[derive(Clone, Copy)]
pub enum Behavior {
    /// Answers with the reference validator/formatter semantics.
    Reference,
    /// Writes these bytes verbatim.
    Raw(&'static str),
    /// Holds the connection open without answering.
    Silent(Duration),
    /// Closes without answering.
    Close,
}

/// Single-threaded fake text service bound to an ephemeral port.
pub struct FakeService {
    pub address: String,
    handle: JoinHandle<Vec<Value>>,
}

impl FakeService {
    /// Serves exactly `connections` exchanges, then stops.
    pub fn spawn(connections: usize, behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake service");
        let address = listener.local_addr().expect("local addr").to_string();
        let handle = thread::spawn(move || {
            let mut received = Vec::new();
            for _ in 0..connections {
                let (socket, _) = listener.accept().expect("accept");
                let mut reader = BufReader::new(socket.try_clone().expect("clone socket"));
                let mut line = String::new();
                reader.read_line(&mut line).expect("read request line");
                let request: Value = serde_json::from_str(line.trim()).unwrap_or(Value::Null);
                let mut socket = socket;
                match behavior {
                    Behavior::Reference => {
                        let reply = reference_reply(&request);
                        let _ = socket.write_all(format!("{reply}\n").as_bytes());
                    }
                    Behavior::Raw(bytes) => {
                        let _ = socket.write_all(bytes.as_bytes());
                    }
                    Behavior::Silent(hold) => thread::sleep(hold),
                    Behavior::Close => {}
                }
                received.push(request);
            }
            received
        });
        Self { address, handle }
    }

    /// Waits for the fake to finish and returns the requests it saw.
    pub fn requests(self) -> Vec<Value> {
        self.handle.join().expect("fake service thread")
    }
}

/// An address with nothing listening on it.
pub fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let address = listener.local_addr().expect("local addr").to_string();
    drop(listener);
    address
}

fn reference_reply(request: &Value) -> Value {
    let text = request["text"].as_str().unwrap_or_default();
    if let Some(format_type) = request["format_type"].as_str() {
        return match reference_format(text, format_type) {
            Some(formatted) => json!({ "formatted_text": formatted }),
            None => json!({ "error": format!("Unknown format type: {format_type}") }),
        };
    }
    let min = request["min_length"].as_u64().unwrap_or(0) as usize;
    let max = request["max_length"].as_u64().unwrap_or(u64::MAX) as usize;
    match reference_validate(text, min, max) {
        Ok(()) => json!({ "valid": true }),
        Err(message) => json!({ "valid": false, "error": message }),
    }
}

fn reference_validate(text: &str, min: usize, max: usize) -> Result<(), String> {
    let length = text.trim().chars().count();
    if length < min {
        return Err(format!("Text must be at least {min} characters"));
    }
    if length > max {
        return Err(format!("Text must be at most {max} characters"));
    }
    Ok(())
}

fn reference_format(text: &str, format_type: &str) -> Option<String> {
    let capitalize = |word: &str| {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        }
    };
    match format_type {
        "upper" => Some(text.to_uppercase()),
        "lower" => Some(text.to_lowercase()),
        "sentence" => Some(capitalize(text.trim())),
        "title" => Some(
            text.split_whitespace()
                .map(|word| capitalize(&word.to_lowercase()))
                .collect::<Vec<_>>()
                .join(" "),
        ),
        _ => None,
    }
}

/// In-process text service with the reference semantics.
#[derive(Default)]
pub struct ReferenceText {
    pub calls: Cell<usize>,
}

impl TextService for ReferenceText {
    fn validate(&self, text: &str, min: usize, max: usize) -> ServiceResult<ValidationVerdict> {
        self.calls.set(self.calls.get() + 1);
        Ok(match reference_validate(text, min, max) {
            Ok(()) => ValidationVerdict::accepted(),
            Err(message) => ValidationVerdict::rejected(message),
        })
    }

    fn format(&self, text: &str, format_type: FormatType) -> ServiceResult<String> {
        self.calls.set(self.calls.get() + 1);
        reference_format(text, format_type.as_str())
            .ok_or_else(|| ServiceError::Rejected("unknown format".to_string()))
    }
}

/// Accepts any text and leaves it as is.
pub struct Permissive;

impl TextService for Permissive {
    fn validate(&self, _: &str, _: usize, _: usize) -> ServiceResult<ValidationVerdict> {
        Ok(ValidationVerdict::accepted())
    }

    fn format(&self, text: &str, _: FormatType) -> ServiceResult<String> {
        Ok(text.to_string())
    }
}

/// Every call fails as if the services were down.
pub struct Unreachable;

impl TextService for Unreachable {
    fn validate(&self, _: &str, _: usize, _: usize) -> ServiceResult<ValidationVerdict> {
        Err(ServiceError::Unavailable(io::Error::from(
            io::ErrorKind::ConnectionRefused,
        )))
    }

    fn format(&self, _: &str, _: FormatType) -> ServiceResult<String> {
        Err(ServiceError::Unavailable(io::Error::from(
            io::ErrorKind::ConnectionRefused,
        )))
    }
}

/// Console that answers prompts from a script and records what it showed.
#[derive(Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub prompts: Vec<&'static str>,
    pub warnings: Vec<String>,
    pub shown: Vec<Vec<Task>>,
    pub confirmed_titles: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|answer| answer.to_string()).collect(),
            ..Self::default()
        }
    }

    fn next(&mut self, prompt: &'static str) -> io::Result<String> {
        self.prompts.push(prompt);
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

impl TaskConsole for ScriptedConsole {
    fn read_title(&mut self) -> io::Result<String> {
        self.next("title")
    }

    fn read_description(&mut self) -> io::Result<String> {
        self.next("description")
    }

    fn read_task_number(&mut self) -> io::Result<String> {
        self.next("task_number")
    }

    fn confirm_delete(&mut self, title: &str) -> io::Result<String> {
        self.confirmed_titles.push(title.to_string());
        self.next("confirm")
    }

    fn show_tasks(&mut self, tasks: &[Task]) -> io::Result<()> {
        self.shown.push(tasks.to_vec());
        Ok(())
    }

    fn show_warning(&mut self, warning: &ServiceWarning) -> io::Result<()> {
        self.warnings.push(warning.to_string());
        Ok(())
    }
}

pub fn task(title: &str, description: &str) -> Task {
    Task::new(title, description).expect("valid fixture task")
}
