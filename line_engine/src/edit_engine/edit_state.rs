// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallvec::smallvec;

use crate::{DrawOp, DrawOps, History, Prompt};

/// `row` indexes [`History`], and `row == history.len()` is the live line. `col` is a
/// char offset into the buffer, and never points inside the prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

/// What applying one key did to the [`EditState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue(DrawOps),
    /// <kbd>Enter</kbd> was pressed. `input` is the submitted line without the prompt.
    Submitted { input: String, draw_ops: DrawOps },
    ExitRequested(DrawOps),
}

impl KeyOutcome {
    #[must_use]
    pub fn draw_ops(&self) -> &[DrawOp] {
        match self {
            KeyOutcome::Continue(draw_ops)
            | KeyOutcome::Submitted { draw_ops, .. }
            | KeyOutcome::ExitRequested(draw_ops) => draw_ops,
        }
    }
}

/// The prompt, the line being edited (the buffer), the cursor, and the history. The
/// buffer always starts with the prompt.
///
/// This is a plain state machine that never does any IO. Keys go in via
/// [`Self::apply_key()`], and [`DrawOps`] come out, to be rendered by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub(crate) prompt: Prompt,
    pub(crate) buffer: Vec<char>,
    pub(crate) cursor: Cursor,
    pub(crate) history: History,
}

impl EditState {
    pub fn new(prompt: impl Into<Prompt>) -> Self {
        let prompt = prompt.into();
        let buffer = prompt.to_buffer();
        let cursor = Cursor {
            row: 0,
            col: buffer.len(),
        };
        Self {
            prompt,
            buffer,
            cursor,
            history: History::new(),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &Prompt { &self.prompt }

    #[must_use]
    pub fn buffer(&self) -> &[char] { &self.buffer }

    #[must_use]
    pub fn buffer_as_string(&self) -> String { self.buffer.iter().collect() }

    /// The buffer without the prompt.
    #[must_use]
    pub fn user_input(&self) -> String { self.buffer[self.prompt.len()..].iter().collect() }

    #[must_use]
    pub fn cursor(&self) -> Cursor { self.cursor }

    #[must_use]
    pub fn history(&self) -> &History { &self.history }

    /// Shows the current buffer at the start of a live line (which is how the prompt
    /// gets printed), and puts the cursor at its end.
    pub fn begin_line(&mut self) -> DrawOps {
        self.cursor.col = self.buffer.len();
        smallvec![DrawOp::PrintText(self.buffer_as_string())]
    }
}
