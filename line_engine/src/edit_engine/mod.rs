// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod display_width;
pub mod draw_op;
pub mod edit_state;
pub mod history;
pub mod key_handlers;
pub mod prompt;

// Re-export.
pub use display_width::*;
pub use draw_op::*;
pub use edit_state::*;
pub use history::*;
pub use prompt::*;
