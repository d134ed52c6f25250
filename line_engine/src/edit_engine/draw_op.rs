// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Redraws are described as a list of [`DrawOp`]s, so that editing the line never
//! touches the terminal. [`render_draw_ops()`] turns them into ANSI sequences.

use std::{fmt::{Display, Formatter, Result},
          io::{self, Write}};

use crate::InlineVec;

/// CSI sequence start: ESC [
pub const CSI_START: &str = "\x1b[";

/// CSI 2 K: Erase in Line (EL), the entire line.
pub const EL_ERASE_ENTIRE_LINE: &str = "2K";

/// CSI D: Cursor Backward/Left (CUB)
pub const CUB_CURSOR_BACKWARD: char = 'D';

/// CSI C: Cursor Forward/Right (CUF)
pub const CUF_CURSOR_FORWARD: char = 'C';

/// CSI P: Delete Character (DCH), shifts the rest of the line left.
pub const DCH_DELETE_CHAR: char = 'P';

/// CSI G: Cursor Horizontal Absolute (CHA), columns are 1 based.
pub const CHA_CURSOR_COLUMN: char = 'G';

pub const CARRIAGE_RETURN: &str = "\r";

/// Raw mode turns off output post processing, so `\n` alone won't return the cursor to
/// the start of the line.
pub const NEWLINE: &str = "\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    ClearLine,
    MoveToLineStart,
    MoveLeft(u16),
    MoveRight(u16),
    DeleteForward(u16),
    /// 1 based column.
    MoveToColumn(u16),
    PrintText(String),
    Newline,
}

pub type DrawOps = InlineVec<DrawOp>;

impl DrawOp {
    /// Clear line, carriage return, print the whole line.
    pub fn redraw_line(draw_ops: &mut DrawOps, line: &[char]) {
        draw_ops.push(DrawOp::ClearLine);
        draw_ops.push(DrawOp::MoveToLineStart);
        draw_ops.push(DrawOp::PrintText(line.iter().collect()));
    }
}

impl Display for DrawOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DrawOp::ClearLine => write!(f, "{CSI_START}{EL_ERASE_ENTIRE_LINE}"),
            DrawOp::MoveToLineStart => write!(f, "{CARRIAGE_RETURN}"),
            DrawOp::MoveLeft(n) => write!(f, "{CSI_START}{n}{CUB_CURSOR_BACKWARD}"),
            DrawOp::MoveRight(n) => write!(f, "{CSI_START}{n}{CUF_CURSOR_FORWARD}"),
            DrawOp::DeleteForward(n) => write!(f, "{CSI_START}{n}{DCH_DELETE_CHAR}"),
            DrawOp::MoveToColumn(col) => write!(f, "{CSI_START}{col}{CHA_CURSOR_COLUMN}"),
            DrawOp::PrintText(text) => write!(f, "{text}"),
            DrawOp::Newline => write!(f, "{NEWLINE}"),
        }
    }
}

/// Writes the ops in order, then flushes once.
///
/// # Errors
///
/// Returns the first error from writing to `term`.
pub fn render_draw_ops(draw_ops: &[DrawOp], term: &mut dyn Write) -> io::Result<()> {
    for draw_op in draw_ops {
        write!(term, "{draw_op}")?;
    }
    term.flush()
}
