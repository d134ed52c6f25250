// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The key source is split in two. The [`InputDevice`] is moved into the production
//! loop, which is its only reader. The [`KeySourceLifecycle`] (raw mode plus the
//! opened/closed state) stays shared behind a mutex, so that `open()` and `close()` can
//! be called from anywhere, any number of times.

use std::{io, sync::Arc};

use tokio::sync::broadcast;

use crate::{CrosstermRawMode, InputDevice, RawModeSwitch, StdMutex};

/// The raw keyboard: a stream of classified keys plus the switch that puts the terminal
/// in raw mode.
#[allow(missing_debug_implementations)]
pub struct KeySource {
    pub input_device: InputDevice,
    pub raw_mode_switch: Box<dyn RawModeSwitch>,
}

impl KeySource {
    pub fn new(input_device: InputDevice, raw_mode_switch: impl RawModeSwitch + 'static) -> Self {
        Self {
            input_device,
            raw_mode_switch: Box::new(raw_mode_switch),
        }
    }

    /// Reads keys from the real terminal using `crossterm`.
    #[must_use]
    pub fn new_terminal() -> Self {
        Self::new(InputDevice::new_event_stream(), CrosstermRawMode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySourceState {
    NotOpened,
    Opened,
    Closed,
}

pub type SafeKeySourceLifecycle = Arc<StdMutex<KeySourceLifecycle>>;

/// Owns the terminal mode. Transitions are `NotOpened -> Opened -> Closed`, and
/// `NotOpened -> Closed`. A closed key source can't be opened again.
#[allow(missing_debug_implementations)]
pub struct KeySourceLifecycle {
    state: KeySourceState,
    raw_mode_switch: Box<dyn RawModeSwitch>,
    close_signal_sender: broadcast::Sender<()>,
}

impl KeySourceLifecycle {
    #[must_use]
    pub fn new(raw_mode_switch: Box<dyn RawModeSwitch>) -> Self {
        let (close_signal_sender, _) = broadcast::channel(1);
        Self {
            state: KeySourceState::NotOpened,
            raw_mode_switch,
            close_signal_sender,
        }
    }

    #[must_use]
    pub fn new_safe(raw_mode_switch: Box<dyn RawModeSwitch>) -> SafeKeySourceLifecycle {
        Arc::new(StdMutex::new(Self::new(raw_mode_switch)))
    }

    #[must_use]
    pub fn state(&self) -> KeySourceState { self.state }

    #[must_use]
    pub fn is_closed(&self) -> bool { self.state == KeySourceState::Closed }

    /// Receives one message when [`Self::close()`] moves the state to
    /// [`KeySourceState::Closed`]. Subscribers created after that won't get it, so check
    /// [`Self::is_closed()`] too.
    #[must_use]
    pub fn subscribe_to_close(&self) -> broadcast::Receiver<()> {
        self.close_signal_sender.subscribe()
    }

    /// Enables raw mode. Opening an already opened key source does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the key source was already closed, or raw mode can't be
    /// enabled (in which case the state doesn't change).
    pub fn open(&mut self) -> io::Result<()> {
        match self.state {
            KeySourceState::Opened => Ok(()),
            KeySourceState::Closed => Err(io::Error::other(
                "key source is closed and can't be opened again",
            )),
            KeySourceState::NotOpened => {
                self.raw_mode_switch.enable_raw_mode()?;
                self.state = KeySourceState::Opened;
                tracing::debug!(message = "key source opened");
                Ok(())
            }
        }
    }

    /// Restores the terminal mode (if it was changed) and wakes up anyone waiting on
    /// [`Self::subscribe_to_close()`]. Closing more than once does nothing.
    ///
    /// # Errors
    ///
    /// Returns the error from restoring the terminal mode. The key source is closed
    /// regardless.
    pub fn close(&mut self) -> io::Result<()> {
        let previous_state = self.state;
        if previous_state == KeySourceState::Closed {
            return Ok(());
        }

        self.state = KeySourceState::Closed;
        // No receivers is fine.
        self.close_signal_sender.send(()).ok();
        tracing::debug!(message = "key source closed", ?previous_state);

        if previous_state == KeySourceState::Opened {
            self.raw_mode_switch.disable_raw_mode()?;
        }
        Ok(())
    }
}

impl Drop for KeySourceLifecycle {
    fn drop(&mut self) {
        if let Err(error) = self.close() {
            tracing::error!(message = "failed to restore terminal mode", ?error);
        }
    }
}
