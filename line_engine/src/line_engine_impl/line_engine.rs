// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tokio::{sync::mpsc, task::JoinHandle};

use crate::{COMMAND_CHANNEL_CAPACITY, CommandStream, EditState, InputDevice, KeySource,
            KeySourceLifecycle, KeySourceState, LineEngineError, OutputDevice, Prompt,
            SafeKeySourceLifecycle, is_line_editing_supported, run_production_loop};

/// # Mental model and overview
///
/// A line editor that hands you completed command lines one at a time. See the crate
/// docs for the full picture.
///
/// 1. [`Self::open()`] switches the terminal into raw mode.
/// 2. [`Self::commands()`] spawns the production loop and gives you the
///    [`CommandStream`]. The loop owns the prompt, buffer, cursor, and history from then
///    on.
/// 3. [`Self::close()`] restores the terminal. Any loop still waiting for a key sends a
///    [`crate::Command::Terminated`] and stops.
///
/// # Inputs and dependency injection
///
/// The [`KeySource`] and [`OutputDevice`] are passed into [`Self::new()`], so tests can
/// drive the engine with a scripted key stream and capture what gets drawn. Use
/// [`Self::new_terminal()`] for the real thing.
///
/// # Dropping
///
/// Dropping the engine closes the key source and aborts the production loop.
#[allow(missing_debug_implementations)]
pub struct LineEngine {
    prompt: Prompt,
    output_device: OutputDevice,
    maybe_input_device: Option<InputDevice>,
    safe_key_source_lifecycle: SafeKeySourceLifecycle,
    maybe_production_task: Option<JoinHandle<()>>,
}

impl LineEngine {
    pub fn new(
        prompt: impl Into<Prompt>,
        key_source: KeySource,
        output_device: OutputDevice,
    ) -> Self {
        let KeySource {
            input_device,
            raw_mode_switch,
        } = key_source;
        Self {
            prompt: prompt.into(),
            output_device,
            maybe_input_device: Some(input_device),
            safe_key_source_lifecycle: KeySourceLifecycle::new_safe(raw_mode_switch),
            maybe_production_task: None,
        }
    }

    /// Keys come from the terminal (via `crossterm`) and the line is drawn to `stdout`.
    pub fn new_terminal(prompt: impl Into<Prompt>) -> Self {
        Self::new(prompt, KeySource::new_terminal(), OutputDevice::new_stdout())
    }

    /// Returns [`None`] if `stdin` or `stdout` is piped, or if none of the standard
    /// streams is a terminal (eg: when running in CI).
    pub fn try_new_interactive(prompt: impl Into<Prompt>) -> Option<Self> {
        if !is_line_editing_supported() {
            tracing::debug!(message = "terminal is not interactive, no line engine");
            return None;
        }
        Some(Self::new_terminal(prompt))
    }

    #[must_use]
    pub fn prompt(&self) -> &Prompt { &self.prompt }

    /// Opens the key source (raw mode). Opening more than once does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode can't be enabled, or the engine was already closed.
    ///
    /// # Panics
    ///
    /// This will panic if the lock is poisoned, which can happen if a thread panics
    /// while holding the lock.
    #[allow(clippy::unwrap_in_result)] /* This is for lock.unwrap() */
    pub fn open(&self) -> Result<(), LineEngineError> {
        self.safe_key_source_lifecycle.lock().unwrap().open()?;
        Ok(())
    }

    /// Closes the key source and restores the terminal. This is idempotent, and safe to
    /// call from many threads at once. It is also fine to call after the session has
    /// terminated.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal mode can't be restored.
    ///
    /// # Panics
    ///
    /// This will panic if the lock is poisoned, which can happen if a thread panics
    /// while holding the lock.
    #[allow(clippy::unwrap_in_result)] /* This is for lock.unwrap() */
    pub fn close(&self) -> Result<(), LineEngineError> {
        self.safe_key_source_lifecycle.lock().unwrap().close()?;
        Ok(())
    }

    /// # Panics
    ///
    /// This will panic if the lock is poisoned, which can happen if a thread panics
    /// while holding the lock.
    #[must_use]
    pub fn key_source_state(&self) -> KeySourceState {
        self.safe_key_source_lifecycle.lock().unwrap().state()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool { self.key_source_state() == KeySourceState::Closed }

    /// Spawns the production loop and returns the stream that commands are delivered
    /// on. The engine's editing state moves into the loop.
    ///
    /// # Errors
    ///
    /// Returns [`LineEngineError::AlreadyStarted`] if this was called before.
    ///
    /// # Panics
    ///
    /// This must be called from inside a `tokio` runtime.
    pub fn commands(&mut self) -> Result<CommandStream, LineEngineError> {
        let Some(input_device) = self.maybe_input_device.take() else {
            return Err(LineEngineError::AlreadyStarted);
        };

        let (command_sender, command_receiver) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

        let production_task = tokio::spawn(run_production_loop(
            EditState::new(self.prompt.clone()),
            input_device,
            self.output_device.clone(),
            self.safe_key_source_lifecycle.clone(),
            command_sender,
        ));
        self.maybe_production_task = Some(production_task);

        Ok(CommandStream::new(command_receiver))
    }
}

impl Drop for LineEngine {
    fn drop(&mut self) {
        if let Ok(mut key_source_lifecycle) = self.safe_key_source_lifecycle.lock()
            && let Err(error) = key_source_lifecycle.close()
        {
            tracing::error!(message = "failed to close key source on drop", ?error);
        }
        if let Some(production_task) = self.maybe_production_task.take() {
            production_task.abort();
        }
    }
}
