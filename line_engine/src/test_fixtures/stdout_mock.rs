// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{Result, Write},
          sync::Arc};

use strip_ansi_escapes::strip;

use crate::{OutputDevice, StdMutex};

/// You can safely clone this struct, since it only contains an `Arc<StdMutex<Vec<u8>>>`.
/// The inner `buffer` will not be cloned, just the [Arc] will be cloned.
#[derive(Clone, Default)]
#[allow(missing_debug_implementations)]
pub struct StdoutMock {
    pub buffer: Arc<StdMutex<Vec<u8>>>,
}

impl StdoutMock {
    #[must_use]
    pub fn new() -> Self { Self::default() }
}

/// # Panics
///
/// All of these will panic if the lock is poisoned.
impl StdoutMock {
    #[must_use]
    pub fn get_copy_of_buffer(&self) -> Vec<u8> { self.buffer.lock().unwrap().clone() }

    #[must_use]
    pub fn get_copy_of_buffer_as_string(&self) -> String {
        let buffer_data = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer_data).into_owned()
    }

    #[must_use]
    pub fn get_copy_of_buffer_as_string_strip_ansi(&self) -> String {
        let buffer_data = self.buffer.lock().unwrap();
        let buffer_data = strip(buffer_data.as_slice());
        String::from_utf8_lossy(&buffer_data).into_owned()
    }
}

impl Write for StdoutMock {
    #[allow(clippy::unwrap_in_result)] /* This is for lock.unwrap() */
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> { Ok(()) }
}

pub trait OutputDeviceExtMock {
    fn new_mock() -> (OutputDevice, StdoutMock);
}

impl OutputDeviceExtMock for OutputDevice {
    fn new_mock() -> (OutputDevice, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let this = OutputDevice {
            resource: Arc::new(StdMutex::new(stdout_mock.clone())),
        };
        (this, stdout_mock)
    }
}
