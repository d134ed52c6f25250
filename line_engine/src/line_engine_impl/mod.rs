// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod command;
pub mod command_stream;
pub mod line_engine;
pub mod production_loop;

// Re-export.
pub use command::*;
pub use command_stream::*;
pub use line_engine::*;
pub use production_loop::*;
