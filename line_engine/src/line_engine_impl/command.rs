// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use miette::Diagnostic;
use tokio::sync::oneshot;

/// Why the session ended. The consumer sees exactly one of these, in a
/// [`Command::Terminated`], and then the [`crate::CommandStream`] ends.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum CommandError {
    /// The user pressed <kbd>Ctrl+C</kbd> or <kbd>Ctrl+D</kbd>.
    #[error("exit requested")]
    #[diagnostic(code(r3bl_line_engine::exit_requested))]
    ExitRequested,

    /// Reading a key (or drawing the line) failed, or the key source ended or was
    /// closed.
    #[error(transparent)]
    #[diagnostic(
        code(r3bl_line_engine::io),
        help("The terminal may have been closed, or the key source was closed")
    )]
    IO(#[from] io::Error),
}

impl CommandError {
    #[must_use]
    pub fn is_exit_requested(&self) -> bool { matches!(self, CommandError::ExitRequested) }
}

/// Errors from the [`crate::LineEngine`] lifecycle methods.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LineEngineError {
    #[error(transparent)]
    #[diagnostic(code(r3bl_line_engine::key_source))]
    IO(#[from] io::Error),

    #[error("commands() can only be called once")]
    #[diagnostic(
        code(r3bl_line_engine::already_started),
        help("Keep the CommandStream that the first call returned")
    )]
    AlreadyStarted,
}

/// Lets the production loop move on to the next line. It can only be used once, since
/// [`Self::ack()`] consumes it. Dropping it without calling [`Self::ack()`] has the same
/// effect.
#[derive(Debug)]
pub struct AckToken {
    sender: oneshot::Sender<()>,
}

impl AckToken {
    #[must_use]
    pub fn new() -> (Self, oneshot::Receiver<()>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    pub fn ack(self) {
        // The loop may already be gone (engine dropped), which is fine.
        self.sender.send(()).ok();
    }
}

/// What the consumer receives from the [`crate::CommandStream`].
#[derive(Debug)]
pub enum Command {
    /// A submitted line (without the prompt). No more keys are read until `ack` is
    /// used.
    Input { input: String, ack: AckToken },
    Terminated(CommandError),
}

impl Command {
    #[must_use]
    pub fn new_input(input: impl Into<String>) -> (Self, oneshot::Receiver<()>) {
        let (ack, ack_receiver) = AckToken::new();
        let command = Command::Input {
            input: input.into(),
            ack,
        };
        (command, ack_receiver)
    }

    #[must_use]
    pub fn input(&self) -> Option<&str> {
        match self {
            Command::Input { input, .. } => Some(input),
            Command::Terminated(_) => None,
        }
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool { matches!(self, Command::Terminated(_)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_ack_wakes_up_receiver() {
        let (command, ack_receiver) = Command::new_input("ls");
        assert_eq!(command.input(), Some("ls"));
        assert!(!command.is_terminated());

        let Command::Input { ack, .. } = command else {
            panic!("expected input");
        };
        ack.ack();

        assert!(ack_receiver.await.is_ok());
    }

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_dropped_ack_token_is_observable() {
        let (command, ack_receiver) = Command::new_input("ls");
        drop(command);
        assert!(ack_receiver.await.is_err());
    }

    #[test]
    fn test_terminated_command() {
        let command = Command::Terminated(CommandError::ExitRequested);
        assert!(command.is_terminated());
        assert_eq!(command.input(), None);

        let error = CommandError::from(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(!error.is_exit_requested());
        assert!(CommandError::ExitRequested.is_exit_requested());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CommandError::ExitRequested.to_string(), "exit requested");
        assert_eq!(
            LineEngineError::AlreadyStarted.to_string(),
            "commands() can only be called once"
        );
        let error = LineEngineError::from(io::Error::other("no tty"));
        assert_eq!(error.to_string(), "no tty");
    }
}
