// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io,
          sync::{Arc,
                 atomic::{AtomicUsize, Ordering}},
          time::Duration};

use crate::{InlineVec, InputDevice, KeyEventResult, KeySource, RawModeSwitch,
            test_fixtures::InputDeviceExtMock};

/// Counts how often raw mode was switched on and off, instead of touching the terminal.
/// Clones share the same counters, so keep one clone around to inspect after the other
/// one has been moved into a [`KeySource`].
#[derive(Debug, Clone, Default)]
pub struct RawModeSwitchMock {
    enable_count: Arc<AtomicUsize>,
    disable_count: Arc<AtomicUsize>,
    fail_enable: bool,
}

impl RawModeSwitchMock {
    #[must_use]
    pub fn new_failing_enable() -> Self {
        Self {
            fail_enable: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn enable_count(&self) -> usize { self.enable_count.load(Ordering::SeqCst) }

    #[must_use]
    pub fn disable_count(&self) -> usize { self.disable_count.load(Ordering::SeqCst) }
}

impl RawModeSwitch for RawModeSwitchMock {
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        if self.fail_enable {
            return Err(io::Error::other("not a terminal"));
        }
        self.enable_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        self.disable_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub trait KeySourceExtMock {
    /// The key stream ends after the last scripted key.
    fn new_mock(generator_vec: InlineVec<KeyEventResult>) -> (KeySource, RawModeSwitchMock);

    /// Each key arrives `delay` after the previous one was read. The key stream ends
    /// after the last scripted key.
    fn new_mock_with_delay(
        generator_vec: InlineVec<KeyEventResult>,
        delay: Duration,
    ) -> (KeySource, RawModeSwitchMock);

    /// The key stream stays open (and silent) after the last scripted key.
    fn new_mock_then_pending(
        generator_vec: InlineVec<KeyEventResult>,
    ) -> (KeySource, RawModeSwitchMock);
}

impl KeySourceExtMock for KeySource {
    fn new_mock(generator_vec: InlineVec<KeyEventResult>) -> (KeySource, RawModeSwitchMock) {
        let raw_mode = RawModeSwitchMock::default();
        let key_source = KeySource::new(InputDevice::new_mock(generator_vec), raw_mode.clone());
        (key_source, raw_mode)
    }

    fn new_mock_with_delay(
        generator_vec: InlineVec<KeyEventResult>,
        delay: Duration,
    ) -> (KeySource, RawModeSwitchMock) {
        let raw_mode = RawModeSwitchMock::default();
        let key_source = KeySource::new(
            InputDevice::new_mock_with_delay(generator_vec, delay),
            raw_mode.clone(),
        );
        (key_source, raw_mode)
    }

    fn new_mock_then_pending(
        generator_vec: InlineVec<KeyEventResult>,
    ) -> (KeySource, RawModeSwitchMock) {
        let raw_mode = RawModeSwitchMock::default();
        let key_source = KeySource::new(
            InputDevice::new_mock_then_pending(generator_vec),
            raw_mode.clone(),
        );
        (key_source, raw_mode)
    }
}
