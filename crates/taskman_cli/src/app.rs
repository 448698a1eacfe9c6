//! Interactive menu loop.

use crate::console::TerminalConsole;
use log::info;
use std::io::{self, BufRead, Write};
use taskman_core::{TaskError, TaskOutcome, TaskRepository, TaskService, TextService};

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Delete,
    Exit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::View),
            "3" => Some(Self::Delete),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Runs the menu until Exit is chosen or input ends.
pub fn run<R, W, Repo, S>(
    console: &mut TerminalConsole<R, W>,
    service: &TaskService<Repo, S>,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    Repo: TaskRepository,
    S: TextService,
{
    loop {
        console.show_menu()?;
        let choice = match console.read_menu_choice()? {
            Some(raw) => MenuChoice::parse(&raw),
            None => Some(MenuChoice::Exit),
        };

        let result = match choice {
            Some(MenuChoice::Add) => {
                console.show_header("ADD TASK")?;
                service.add_task(console)
            }
            Some(MenuChoice::View) => {
                console.show_header("YOUR TASKS")?;
                service.view_tasks(console)
            }
            Some(MenuChoice::Delete) => {
                console.show_header("DELETE TASK")?;
                service.delete_task(console)
            }
            Some(MenuChoice::Exit) => {
                info!("event=app_exit module=cli status=ok");
                return console.show_goodbye();
            }
            None => {
                console.show_error("Invalid choice. Please enter 1, 2, 3, or 4.")?;
                continue;
            }
        };

        report(console, result)?;
        console.wait_for_return()?;
    }
}

fn report<R: BufRead, W: Write>(
    console: &mut TerminalConsole<R, W>,
    result: Result<TaskOutcome, TaskError>,
) -> io::Result<()> {
    match result {
        Ok(TaskOutcome::Added(_)) => console.show_success("Task added successfully!"),
        Ok(TaskOutcome::Deleted(_)) => console.show_success("Task deleted successfully!"),
        Ok(TaskOutcome::DeletionCancelled(_)) => console.show_notice("Deletion cancelled."),
        Ok(TaskOutcome::Listed { .. }) => Ok(()),
        Err(TaskError::Console(err)) => Err(err),
        Err(err) => {
            info!("event=operation_failed module=cli status=error error={err}");
            console.show_error(&err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{run, MenuChoice};
    use crate::console::TerminalConsole;
    use std::io::{self, Cursor};
    use taskman_core::{
        FormatType, MemoryTaskRepository, ServiceError, ServiceResult, Task, TaskLimits,
        TaskRepository, TaskService, TextService, ValidationVerdict,
    };

    /// Both services refuse connections, as when neither is running.
    struct Offline;

    impl TextService for Offline {
        fn validate(&self, _: &str, _: usize, _: usize) -> ServiceResult<ValidationVerdict> {
            Err(ServiceError::Unavailable(io::ErrorKind::ConnectionRefused.into()))
        }

        fn format(&self, _: &str, _: FormatType) -> ServiceResult<String> {
            Err(ServiceError::Unavailable(io::ErrorKind::ConnectionRefused.into()))
        }
    }

    fn drive(
        input: &str,
        tasks: Vec<Task>,
    ) -> (String, TaskService<MemoryTaskRepository, Offline>) {
        let service = TaskService::new(
            MemoryTaskRepository::with_tasks(tasks),
            Offline,
            TaskLimits::default(),
        );
        let mut console =
            TerminalConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        run(&mut console, &service).expect("menu loop");
        let output = String::from_utf8(console.into_output()).expect("utf-8 output");
        (output, service)
    }

    #[test]
    fn menu_choices_parse_with_surrounding_whitespace() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("5"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }

    #[test]
    fn add_view_and_exit_end_to_end() {
        let (output, service) = drive("1\nBuy milk\n2% low fat\n\n2\n\n4\n", Vec::new());

        assert!(output.contains("ADD TASK\n--------"));
        assert!(output.contains("✓ Task added successfully!"));
        assert!(output.contains("1. Buy milk\n   Description: 2% low fat"));
        assert!(output.ends_with("Thank you for using Task Manager. Goodbye!\n"));
        assert_eq!(
            service.repo().load_tasks(),
            vec![Task::new("Buy milk", "2% low fat").expect("task")]
        );
    }

    #[test]
    fn rejected_add_and_invalid_choice_keep_looping() {
        let (output, service) = drive("9\n1\n   \n\n4\n", Vec::new());

        assert!(output.contains("✗ Error: Invalid choice. Please enter 1, 2, 3, or 4."));
        assert!(output.contains("⚠ Warning: Validator service unavailable"));
        assert!(output.contains("✗ Error: Task title cannot be empty"));
        assert!(!output.contains("Enter task description"));
        assert!(service.repo().load_tasks().is_empty());
    }

    #[test]
    fn delete_with_cancellation_then_confirmation() {
        let tasks = vec![Task::new("Buy milk", "2% low fat").expect("task")];
        let (output, service) = drive("3\n1\nno\n\n3\n1\nyes\n\n3\n\n4\n", tasks);

        assert!(output.contains("Deletion cancelled."));
        assert!(output.contains("✓ Task deleted successfully!"));
        assert!(output.contains("✗ Error: No tasks available to delete"));
        assert!(service.repo().load_tasks().is_empty());
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let (output, _) = drive("", Vec::new());
        assert!(output.ends_with("Thank you for using Task Manager. Goodbye!\n"));
    }
}
