// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Line editing engine for terminal REPLs
//!
//! The `r3bl_line_engine` crate renders a prompt, reads one classified key at a time
//! from a raw keyboard source, lets the user edit the current command line (with
//! history recall), and hands each completed command line to your code **one at a
//! time**. The engine does not read another key until you acknowledge the command you
//! were given.
//!
//! # Table of contents
//!
//! <!-- TOC -->
//!
//! - [Mental model](#mental-model)
//! - [Input editing behavior](#input-editing-behavior)
//! - [How to use this crate](#how-to-use-this-crate)
//! - [Testing](#testing)
//!
//! <!-- /TOC -->
//!
//! # Mental model
//!
//! ```text
//! ┌────────────┐  KeyEvent   ┌──────────────────────────────┐   Command   ┌──────────┐
//! │ KeySource  ├────────────►│ production loop (tokio task) ├────────────►│ consumer │
//! │ (raw mode) │             │ EditState → DrawOps → stdout │◄────────────┤  loop    │
//! └────────────┘             └──────────────────────────────┘   ack()     └──────────┘
//! ```
//!
//! 1. [`EditState`] is a pure state machine. Applying a [`KeyEvent`] mutates the buffer,
//!    cursor and history, and returns the [`DrawOps`] needed to update the terminal.
//! 2. The production loop (spawned by [`LineEngine::commands()`]) is the only owner of
//!    the [`EditState`]. It renders the [`DrawOps`] to the [`OutputDevice`], and on
//!    <kbd>Enter</kbd> sends a [`Command::Input`] to the [`CommandStream`].
//! 3. The loop then waits on the command's [`AckToken`]. Nothing is read or rendered
//!    until the consumer calls [`AckToken::ack()`].
//! 4. <kbd>Ctrl+C</kbd>, <kbd>Ctrl+D</kbd> or a key source failure produce exactly one
//!    [`Command::Terminated`], after which the [`CommandStream`] yields [`None`].
//!
//! # Input editing behavior
//!
//! - Left, Right: move the cursor. Right at the end of the line appends a space.
//! - Up, Down: walk through the history of submitted lines.
//! - Home, End: jump to the start (just after the prompt) or end of the line.
//! - Backspace (or <kbd>Ctrl+H</kbd>): delete the character before the cursor.
//! - Enter: submit the line.
//! - <kbd>Ctrl+C</kbd>, <kbd>Ctrl+D</kbd>: end the session.
//!
//! # How to use this crate
//!
//! ```no_run
//! use r3bl_line_engine::{Command, LineEngine};
//!
//! # async fn run() -> miette::Result<()> {
//! let mut engine = LineEngine::new_terminal("momoko> ");
//! engine.open()?;
//! let mut commands = engine.commands()?;
//! while let Some(command) = commands.next_command().await {
//!     match command {
//!         Command::Input { input, ack } => {
//!             print!("handle command: {input}\r\n");
//!             ack.ack();
//!         }
//!         Command::Terminated(_) => break,
//!     }
//! }
//! engine.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Testing
//!
//! Both ends of the engine are injected. [`InputDevice`] wraps any pinned stream of
//! [`KeyEventResult`]s and [`OutputDevice`] wraps any `Write + Send`. The
//! [`test_fixtures`] module has a scripted key stream, a [`test_fixtures::StdoutMock`],
//! and a raw mode switch that records calls, so the whole protocol can be exercised
//! without a real terminal.

// Production code propagates errors, test code may unwrap.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod edit_engine;
pub mod line_engine_impl;
pub mod term;
pub mod terminal_io;
pub mod test_fixtures;
pub mod tracing_logging;

// Re-export.
pub use edit_engine::*;
pub use line_engine_impl::*;
pub use term::*;
pub use terminal_io::*;
pub use tracing_logging::*;

// Type aliases.
use futures_core::Stream;
use std::{pin::Pin, sync::Arc};

pub type StdMutex<T> = std::sync::Mutex<T>;

pub type SendRawTerminal = dyn std::io::Write + Send;
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

pub type KeyEventResult = std::io::Result<KeyEvent>;

/// Stack allocated for small sizes, spills to the heap beyond that.
pub type InlineVec<T> = smallvec::SmallVec<[T; INLINE_VEC_SIZE]>;

// Constants.
pub const INLINE_VEC_SIZE: usize = 8;

/// The delivery channel holds at most one [`Command`]. Together with the ack wait this
/// keeps at most one unacknowledged command in flight.
pub const COMMAND_CHANNEL_CAPACITY: usize = 1;

pub const DEFAULT_PROMPT: &str = "> ";
