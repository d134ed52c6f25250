// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::EventStream;
use futures_util::{StreamExt, future};

use crate::{KeyEventResult, PinnedInputStream, try_from_crossterm_event};

/// This struct represents the raw keyboard. It yields one classified key at a time. See
/// [`crate::test_fixtures::InputDeviceExtMock`] for testing features.
#[allow(missing_debug_implementations)]
pub struct InputDevice {
    pub resource: PinnedInputStream<KeyEventResult>,
}

impl InputDevice {
    /// Reads [`crossterm::event::Event`]s from the terminal and keeps only the ones that
    /// classify into a [`crate::KeyEvent`]. Errors from the terminal are passed through.
    #[must_use]
    pub fn new_event_stream() -> InputDevice {
        let key_stream = EventStream::new().filter_map(|result_event| {
            future::ready(match result_event {
                Ok(event) => try_from_crossterm_event(event).map(Ok),
                Err(error) => Some(Err(error)),
            })
        });
        InputDevice {
            resource: Box::pin(key_stream),
        }
    }

    #[must_use]
    pub fn new(resource: PinnedInputStream<KeyEventResult>) -> InputDevice {
        InputDevice { resource }
    }
}

impl InputDevice {
    /// Returns [`None`] once the underlying stream has ended.
    pub async fn next_key(&mut self) -> Option<KeyEventResult> { self.resource.next().await }
}
