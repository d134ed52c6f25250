// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::tty::IsTty as _;
use std::io::IsTerminal as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdinIsPipedResult {
    StdinIsPiped,
    StdinIsNotPiped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdoutIsPipedResult {
    StdoutIsPiped,
    StdoutIsNotPiped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TTYResult {
    IsInteractive,
    IsNotInteractive,
}

/// If you run `echo "test" | cargo run` the following will return
/// [`StdinIsPipedResult::StdinIsPiped`].
/// More info: <https://unix.stackexchange.com/questions/597083/how-does-piping-affect-stdin>
#[must_use]
pub fn is_stdin_piped() -> StdinIsPipedResult {
    if std::io::stdin().is_terminal() {
        StdinIsPipedResult::StdinIsNotPiped
    } else {
        StdinIsPipedResult::StdinIsPiped
    }
}

/// If you run `cargo run | grep foo` the following will return
/// [`StdoutIsPipedResult::StdoutIsPiped`].
#[must_use]
pub fn is_stdout_piped() -> StdoutIsPipedResult {
    if std::io::stdout().is_terminal() {
        StdoutIsPipedResult::StdoutIsNotPiped
    } else {
        StdoutIsPipedResult::StdoutIsPiped
    }
}

/// Returns [`TTYResult::IsNotInteractive`] if stdin, stdout, and stderr are *all* not
/// TTYs. This happens when `cargo test` runs.
#[must_use]
pub fn is_fully_uninteractive_terminal() -> TTYResult {
    let stdin_is_tty = std::io::stdin().is_tty();
    let stdout_is_tty = std::io::stdout().is_tty();
    let stderr_is_tty = std::io::stderr().is_tty();
    if !stdin_is_tty && !stdout_is_tty && !stderr_is_tty {
        TTYResult::IsNotInteractive
    } else {
        TTYResult::IsInteractive
    }
}

/// A [`crate::LineEngine`] that talks to the real terminal only makes sense when both
/// `stdin` and `stdout` are attached to it.
#[must_use]
pub fn is_line_editing_supported() -> bool {
    matches!(is_stdin_piped(), StdinIsPipedResult::StdinIsNotPiped)
        && matches!(is_stdout_piped(), StdoutIsPipedResult::StdoutIsNotPiped)
        && matches!(is_fully_uninteractive_terminal(), TTYResult::IsInteractive)
}
