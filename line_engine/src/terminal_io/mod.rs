// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod input_device;
pub mod key_event;
pub mod key_source;
pub mod output_device;
pub mod raw_mode;

// Re-export.
pub use input_device::*;
pub use key_event::*;
pub use key_source::*;
pub use output_device::*;
pub use raw_mode::*;
