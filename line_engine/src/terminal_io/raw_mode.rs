// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

/// Puts the terminal in and out of raw mode. This is the half of the key source that
/// owns the terminal mode, the other half is the [`crate::InputDevice`] stream.
pub trait RawModeSwitch: Send {
    /// # Errors
    ///
    /// Returns an error if the terminal can't be switched into raw mode.
    fn enable_raw_mode(&mut self) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the terminal mode can't be restored.
    fn disable_raw_mode(&mut self) -> io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermRawMode;

impl RawModeSwitch for CrosstermRawMode {
    fn enable_raw_mode(&mut self) -> io::Result<()> { crossterm::terminal::enable_raw_mode() }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        crossterm::terminal::disable_raw_mode()
    }
}
