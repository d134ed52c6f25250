// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use async_stream::stream;

use crate::{InlineVec, InputDevice, KeyEvent, KeyEventResult, KeyKind, PinnedInputStream};

/// The main constructors are:
/// - [`InputDeviceExtMock::new_mock()`]
/// - [`InputDeviceExtMock::new_mock_with_delay()`]
/// - [`InputDeviceExtMock::new_mock_then_pending()`]
pub fn gen_key_stream<T>(generator_vec: InlineVec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

pub fn gen_key_stream_with_delay<T>(
    generator_vec: InlineVec<T>,
    delay: Duration,
) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            tokio::time::sleep(delay).await;
            yield item;
        }
    };
    Box::pin(it)
}

/// Yields the items, then never yields anything again (and never ends). This is what a
/// user that stops typing looks like.
pub fn gen_key_stream_then_pending<T>(generator_vec: InlineVec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
        std::future::pending::<()>().await;
    };
    Box::pin(it)
}

/// Keys for typing `text`. Spaces and tabs are classified the way the keyboard would.
#[must_use]
pub fn typed(text: &str) -> InlineVec<KeyEvent> {
    text.chars()
        .map(|character| match character {
            ' ' => KeyEvent::new(KeyKind::Space),
            '\t' => KeyEvent::new(KeyKind::Tab),
            _ => KeyEvent::char(character),
        })
        .collect()
}

/// Keys for typing `text` and pressing <kbd>Enter</kbd>.
#[must_use]
pub fn typed_line(text: &str) -> InlineVec<KeyEvent> {
    let mut keys = typed(text);
    keys.push(KeyEvent::new(KeyKind::Enter));
    keys
}

/// Wraps each key in `Ok`, ready for an [`InputDevice`] mock.
pub fn key_results(keys: impl IntoIterator<Item = KeyEvent>) -> InlineVec<KeyEventResult> {
    keys.into_iter().map(Ok).collect()
}

pub trait InputDeviceExtMock {
    fn new_mock(generator_vec: InlineVec<KeyEventResult>) -> InputDevice;

    fn new_mock_with_delay(
        generator_vec: InlineVec<KeyEventResult>,
        delay: Duration,
    ) -> InputDevice;

    fn new_mock_then_pending(generator_vec: InlineVec<KeyEventResult>) -> InputDevice;
}

impl InputDeviceExtMock for InputDevice {
    fn new_mock(generator_vec: InlineVec<KeyEventResult>) -> InputDevice {
        InputDevice::new(gen_key_stream(generator_vec))
    }

    fn new_mock_with_delay(
        generator_vec: InlineVec<KeyEventResult>,
        delay: Duration,
    ) -> InputDevice {
        InputDevice::new(gen_key_stream_with_delay(generator_vec, delay))
    }

    fn new_mock_then_pending(generator_vec: InlineVec<KeyEventResult>) -> InputDevice {
        InputDevice::new(gen_key_stream_then_pending(generator_vec))
    }
}
