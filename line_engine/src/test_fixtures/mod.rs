// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fakes for both ends of the engine, so it can be driven without a terminal. These are
//! public so that integration tests (and your own tests) can use them.

// Attach.
pub mod key_stream_mock;
pub mod raw_mode_mock;
pub mod stdout_mock;

// Re-export.
pub use key_stream_mock::*;
pub use raw_mode_mock::*;
pub use stdout_mock::*;
