// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The production loop is the only owner of the [`EditState`] and the only reader of
//! the [`InputDevice`]. Each line goes like this:
//!
//! 1. Print the buffer (the prompt) and put the cursor at its end.
//! 2. Read a key, apply it, render the [`crate::DrawOps`]. Repeat until
//!    <kbd>Enter</kbd>.
//! 3. Send [`Command::Input`] and wait for its [`crate::AckToken`]. Nothing is read or
//!    drawn while waiting.
//!
//! An interrupt, a key source failure, or a render failure sends one
//! [`Command::Terminated`] and ends the loop. Dropping the loop's sender is what makes
//! the [`crate::CommandStream`] end.

use std::io::{self, Write};

use tokio::{select, sync::mpsc};

use crate::{Command, CommandError, EditState, InputDevice, KeyEventResult, KeyOutcome,
            OutputDevice, SafeKeySourceLifecycle, lock_output_device_as_mut,
            render_draw_ops};

/// Internal control flow for the production loop. This is used primarily to make
/// testing easier.
#[derive(Debug, PartialEq, Clone)]
pub enum ControlFlowExtended<T, E> {
    ReturnOk(T),
    ReturnError(E),
    Continue,
}

fn key_source_ended_error() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "key source has no more keys")
}

fn key_source_closed_error() -> io::Error { io::Error::other("key source was closed") }

/// Applies the next thing the key source produced to `edit_state` and renders the
/// result to `term`.
///
/// - [`ControlFlowExtended::ReturnOk`] carries a submitted line (prompt stripped).
/// - [`ControlFlowExtended::ReturnError`] means the session is over. The key has
///   already been applied, so a failed render of an <kbd>Enter</kbd> leaves the line in
///   the history without delivering it.
pub fn apply_key_to_edit_state_and_render(
    maybe_key: Option<KeyEventResult>,
    edit_state: &mut EditState,
    term: &mut dyn Write,
) -> ControlFlowExtended<String, CommandError> {
    let key_event = match maybe_key {
        Some(Ok(key_event)) => key_event,
        Some(Err(error)) => return ControlFlowExtended::ReturnError(error.into()),
        None => return ControlFlowExtended::ReturnError(key_source_ended_error().into()),
    };

    tracing::debug!(message = "key", kind = %key_event.kind);

    let outcome = edit_state.apply_key(key_event);
    if let Err(error) = render_draw_ops(outcome.draw_ops(), term) {
        return ControlFlowExtended::ReturnError(error.into());
    }

    match outcome {
        KeyOutcome::Continue(_) => ControlFlowExtended::Continue,
        KeyOutcome::Submitted { input, .. } => ControlFlowExtended::ReturnOk(input),
        KeyOutcome::ExitRequested(_) => {
            ControlFlowExtended::ReturnError(CommandError::ExitRequested)
        }
    }
}

/// # Panics
///
/// This will panic if the lock is poisoned, which can happen if a thread panics while
/// holding the lock.
fn is_key_source_closed(safe_key_source_lifecycle: &SafeKeySourceLifecycle) -> bool {
    safe_key_source_lifecycle.lock().unwrap().is_closed()
}

async fn send_terminated(command_sender: &mpsc::Sender<Command>, error: CommandError) {
    match &error {
        CommandError::ExitRequested => {
            tracing::info!(message = "exit requested");
        }
        CommandError::IO(io_error) => {
            tracing::error!(message = "key source failed", error = %io_error);
        }
    }
    // The consumer may have dropped the stream already.
    command_sender.send(Command::Terminated(error)).await.ok();
}

/// Runs until the session terminates, or the consumer drops the
/// [`crate::CommandStream`]. Spawned by [`crate::LineEngine::commands()`].
///
/// # Panics
///
/// This will panic if the lock is poisoned, which can happen if a thread panics while
/// holding the lock.
pub async fn run_production_loop(
    mut edit_state: EditState,
    mut input_device: InputDevice,
    output_device: OutputDevice,
    safe_key_source_lifecycle: SafeKeySourceLifecycle,
    command_sender: mpsc::Sender<Command>,
) {
    let mut close_signal_receiver =
        safe_key_source_lifecycle.lock().unwrap().subscribe_to_close();

    loop {
        if is_key_source_closed(&safe_key_source_lifecycle) {
            send_terminated(&command_sender, key_source_closed_error().into()).await;
            return;
        }

        // Start a live line. The lock guard must not live across an await.
        let begin_line_result = {
            let draw_ops = edit_state.begin_line();
            render_draw_ops(&draw_ops, lock_output_device_as_mut!(output_device))
        };
        if let Err(error) = begin_line_result {
            send_terminated(&command_sender, error.into()).await;
            return;
        }

        let input = loop {
            if is_key_source_closed(&safe_key_source_lifecycle) {
                send_terminated(&command_sender, key_source_closed_error().into()).await;
                return;
            }

            // Both branches are cancel safe.
            let maybe_key = select! {
                maybe_key = input_device.next_key() => maybe_key,
                _ = close_signal_receiver.recv() => {
                    send_terminated(&command_sender, key_source_closed_error().into()).await;
                    return;
                }
            };

            let control_flow = apply_key_to_edit_state_and_render(
                maybe_key,
                &mut edit_state,
                lock_output_device_as_mut!(output_device),
            );

            match control_flow {
                ControlFlowExtended::Continue => {}
                ControlFlowExtended::ReturnOk(input) => break input,
                ControlFlowExtended::ReturnError(error) => {
                    send_terminated(&command_sender, error).await;
                    return;
                }
            }
        };

        tracing::info!(
            message = "line submitted",
            history_len = edit_state.history().len()
        );

        let (command, ack_receiver) = Command::new_input(input);
        if command_sender.send(command).await.is_err() {
            tracing::debug!(message = "command stream dropped, stopping");
            return;
        }

        if ack_receiver.await.is_err() {
            tracing::warn!(message = "ack token dropped without ack(), resuming");
        }
    }
}
