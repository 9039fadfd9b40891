//! Interactive console front end.
//!
//! Reads one command per line, runs it against the controller to completion,
//! then redraws the list. Generic over the reader and writer so the loop can
//! be driven from byte buffers.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::controller::TaskListController;
use crate::error::TaskListError;

pub const PROMPT: &str = "> ";

pub const USAGE: &str = "\
Commands:
  add [text]     add text (or the pending input) as a task
  input <text>   set the pending input without adding
  toggle <n>     mark task n done / not done
  clear          remove every task
  sync           reload the list from the store
  list           redraw the list
  help           show this help
  quit           leave";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add the pending input, optionally replacing it first.
    Add(Option<String>),
    Input(String),
    /// Zero-based task index.
    Toggle(usize),
    Clear,
    Sync,
    List,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a task number (numbers start at 1)")]
    InvalidNumber(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (trimmed.trim_end(), ""),
        };

        match word.to_lowercase().as_str() {
            "" | "list" | "ls" => Ok(Command::List),
            "add" | "a" => {
                if rest.is_empty() {
                    Ok(Command::Add(None))
                } else {
                    Ok(Command::Add(Some(rest.to_string())))
                }
            }
            "input" | "i" => {
                if rest.is_empty() {
                    Err(CommandError::MissingArgument("input"))
                } else {
                    Ok(Command::Input(rest.to_string()))
                }
            }
            "toggle" | "t" | "done" => {
                let arg = rest.trim();
                if arg.is_empty() {
                    return Err(CommandError::MissingArgument("toggle"));
                }
                match arg.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(Command::Toggle(n - 1)),
                    _ => Err(CommandError::InvalidNumber(arg.to_string())),
                }
            }
            "clear" => Ok(Command::Clear),
            "sync" => Ok(Command::Sync),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Run a command, returning a message for the user if there is one.
pub async fn execute(controller: &mut TaskListController, command: Command) -> Option<String> {
    match command {
        Command::Add(text) => {
            if let Some(text) = text {
                controller.update_pending_input(text);
            }
            match controller.add_task().await {
                // The notifier already told the user.
                Err(TaskListError::EmptyInput) => None,
                Err(e) => Some(e.to_string()),
                Ok(()) => None,
            }
        }
        Command::Input(text) => {
            controller.update_pending_input(text);
            None
        }
        Command::Toggle(index) => controller
            .toggle_task(index)
            .await
            .err()
            .map(|e| match e {
                TaskListError::IndexOutOfRange { index, len } => {
                    format!("No task number {} (list has {} tasks)", index + 1, len)
                }
                other => other.to_string(),
            }),
        Command::Clear => {
            controller.clear_all().await;
            None
        }
        Command::Sync => {
            if controller.reconcile().await {
                Some(format!("Synced with {} store", controller.store_kind()))
            } else {
                Some("Sync failed, showing local state".to_string())
            }
        }
        Command::Help => Some(USAGE.to_string()),
        Command::List | Command::Quit => None,
    }
}

/// Text shown after every command.
pub fn render(controller: &TaskListController) -> String {
    let mut out = controller.view().to_string();
    if controller.is_diverged() {
        out.push_str("(unsaved changes, `sync` to reload)\n");
    }
    if !controller.pending_input().is_empty() {
        out.push_str(&format!("input: {}\n", controller.pending_input()));
    }
    out
}

/// Drive the controller from `input` until EOF or `quit`.
pub async fn run<R, W>(
    controller: &mut TaskListController,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(render(controller).as_bytes()).await?;
    output.write_all(PROMPT.as_bytes()).await?;
    output.flush().await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                tracing::debug!("Running {:?}", command);
                if let Some(message) = execute(controller, command).await {
                    output.write_all(message.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
            }
            Err(e) => {
                output.write_all(format!("{}\n", e).as_bytes()).await?;
            }
        }
        output.write_all(render(controller).as_bytes()).await?;
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}
