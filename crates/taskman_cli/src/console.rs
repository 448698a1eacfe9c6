//! Terminal presentation boundary.
//!
//! # Responsibility
//! - Render the menu, headers, task lists and messages.
//! - Read raw input lines for the orchestrator.
//!
//! # Invariants
//! - Prompts are flushed before every read.
//! - Exhausted input reads as `None` (menu) or an empty string (fields).

use std::io::{self, BufRead, Write};
use taskman_core::{ServiceWarning, Task, TaskConsole};

const MENU_RULE_WIDTH: usize = 19;

/// Line-oriented console over any reader/writer pair.
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `prompt` and reads one line; `None` once input is exhausted.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn prompt_field(&mut self, prompt: &str) -> io::Result<String> {
        Ok(self.prompt(prompt)?.unwrap_or_default())
    }

    pub fn show_menu(&mut self) -> io::Result<()> {
        let rule = "=".repeat(MENU_RULE_WIDTH);
        writeln!(self.output)?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "TASK MANAGER")?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "1. Add Task")?;
        writeln!(self.output, "2. View Tasks")?;
        writeln!(self.output, "3. Delete Task")?;
        writeln!(self.output, "4. Exit")?;
        writeln!(self.output)
    }

    pub fn read_menu_choice(&mut self) -> io::Result<Option<String>> {
        self.prompt("Enter choice: ")
    }

    pub fn show_header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{title}")?;
        writeln!(self.output, "{}", "-".repeat(title.chars().count()))
    }

    pub fn show_success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "✓ {message}")
    }

    pub fn show_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "✗ Error: {message}")
    }

    pub fn show_notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{message}")
    }

    pub fn show_goodbye(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Thank you for using Task Manager. Goodbye!")
    }

    /// Blocks until the user presses Enter (or input ends).
    pub fn wait_for_return(&mut self) -> io::Result<()> {
        self.prompt("\nPress any key to return to main menu...")?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> TaskConsole for TerminalConsole<R, W> {
    fn read_title(&mut self) -> io::Result<String> {
        self.prompt_field("Enter task title: ")
    }

    fn read_description(&mut self) -> io::Result<String> {
        self.prompt_field("Enter task description: ")
    }

    fn read_task_number(&mut self) -> io::Result<String> {
        self.prompt_field("\nEnter task number to delete: ")
    }

    fn confirm_delete(&mut self, title: &str) -> io::Result<String> {
        writeln!(self.output)?;
        writeln!(self.output, "Are you sure you want to delete this task?")?;
        writeln!(self.output, "\"{title}\"")?;
        writeln!(self.output, "This action cannot be undone.")?;
        writeln!(self.output)?;
        self.prompt_field("Enter 'yes' to confirm or 'no' to cancel: ")
    }

    fn show_tasks(&mut self, tasks: &[Task]) -> io::Result<()> {
        if tasks.is_empty() {
            return writeln!(self.output, "No tasks found");
        }
        for (position, task) in tasks.iter().enumerate() {
            writeln!(self.output)?;
            writeln!(self.output, "{}. {}", position + 1, task.title)?;
            writeln!(self.output, "   Description: {}", task.description)?;
        }
        Ok(())
    }

    fn show_warning(&mut self, warning: &ServiceWarning) -> io::Result<()> {
        writeln!(self.output, "⚠ Warning: {warning}")
    }
}
