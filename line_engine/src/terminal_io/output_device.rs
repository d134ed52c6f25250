// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use crate::{SafeRawTerminal, SendRawTerminal, StdMutex};

pub type LockedOutputDevice<'a> = &'a mut dyn std::io::Write;

/// Locks the output device and gives you a `&mut dyn Write` for it. Don't call this
/// twice in the same scope, it will deadlock! Use it in its own block scope.
///
/// ```
/// use r3bl_line_engine::{lock_output_device_as_mut, OutputDevice, LockedOutputDevice};
/// let device = OutputDevice::new_stdout();
/// {
///     let mut_ref: LockedOutputDevice<'_> = lock_output_device_as_mut!(device);
///     let _ = mut_ref.write_all(b"momoko> ");
/// } // The lock is released here.
/// ```
#[macro_export]
macro_rules! lock_output_device_as_mut {
    ($device:expr) => {
        &mut *$device.lock()
    };
}

/// Where the engine renders its draw operations. It is safe to clone, all the clones
/// share the same underlying writer.
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
}

impl Default for OutputDevice {
    fn default() -> Self { Self::new_stdout() }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self {
        Self {
            resource: Arc::new(StdMutex::new(std::io::stdout())),
        }
    }
}

impl OutputDevice {
    /// # Panics
    ///
    /// This will panic if the mutex is poisoned, which can happen if a thread panics
    /// while holding the lock.
    pub fn lock(&self) -> std::sync::MutexGuard<'_, SendRawTerminal> {
        self.resource.lock().unwrap()
    }
}
