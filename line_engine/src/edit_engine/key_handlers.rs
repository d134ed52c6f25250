// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One handler per [`KeyKind`]. Handlers never fail: at a boundary they either clamp or
//! do nothing. Cursor moves are measured in printed columns, and a move over a zero
//! width char emits nothing.

use smallvec::smallvec;

use crate::{DrawOp, DrawOps, EditState, KeyEvent, KeyKind, KeyOutcome, char_display_width,
            chars_display_width};

fn push_move(draw_ops: &mut DrawOps, width: u16, draw_op: fn(u16) -> DrawOp) {
    if width > 0 {
        draw_ops.push(draw_op(width));
    }
}

fn column_after(width: u16) -> u16 { width.saturating_add(1) }

// Older history entry.
fn handle_arrow_up(edit_state: &mut EditState, draw_ops: &mut DrawOps) {
    if edit_state.cursor.row == 0 {
        return;
    }
    let row = edit_state.cursor.row - 1;
    let Some(entry) = edit_state.history.copy_entry(row) else {
        return;
    };
    edit_state.cursor.row = row;
    edit_state.buffer = entry;
    DrawOp::redraw_line(draw_ops, &edit_state.buffer);
    edit_state.cursor.col = edit_state.buffer.len();
}

// Newer history entry, or the live line after the newest one.
fn handle_arrow_down(edit_state: &mut EditState, draw_ops: &mut DrawOps) {
    let next_row = edit_state.cursor.row + 1;
    let history_len = edit_state.history.len();

    if next_row < history_len {
        let Some(entry) = edit_state.history.copy_entry(next_row) else {
            return;
        };
        edit_state.cursor.row = next_row;
        edit_state.buffer = entry;
    } else if next_row == history_len {
        edit_state.cursor.row = next_row;
        edit_state.buffer = edit_state.prompt.to_buffer();
    } else {
        return;
    }

    DrawOp::redraw_line(draw_ops, &edit_state.buffer);
    edit_state.cursor.col = edit_state.buffer.len();
}

fn handle_arrow_left(edit_state: &mut EditState, draw_ops: &mut DrawOps) {
    if edit_state.cursor.col <= edit_state.prompt.len() {
        return;
    }
    let passed = edit_state.buffer[edit_state.cursor.col - 1];
    edit_state.cursor.col -= 1;
    push_move(draw_ops, char_display_width(passed), DrawOp::MoveLeft);
}

// Moving past the end of the line pads it with a space.
fn handle_arrow_right(edit_state: &mut EditState, draw_ops: &mut DrawOps) {
    if edit_state.cursor.col >= edit_state.buffer.len() {
        edit_state.buffer.push(' ');
        draw_ops.push(DrawOp::PrintText(" ".into()));
    } else {
        let passed = edit_state.buffer[edit_state.cursor.col];
        push_move(draw_ops, char_display_width(passed), DrawOp::MoveRight);
    }
    edit_state.cursor.col += 1;
}

fn handle_backspace(edit_state: &mut EditState, draw_ops: &mut DrawOps) {
    if edit_state.cursor.col <= edit_state.prompt.len() {
        return;
    }
    let removed = edit_state.buffer.remove(edit_state.cursor.col - 1);
    edit_state.cursor.col -= 1;
    let width = char_display_width(removed);
    push_move(draw_ops, width, DrawOp::MoveLeft);
    push_move(draw_ops, width, DrawOp::DeleteForward);
}

fn handle_char(edit_state: &mut EditState, draw_ops: &mut DrawOps, character: char) {
    if character == KeyEvent::NULL_CHAR {
        return;
    }

    let col = edit_state.cursor.col;
    if col >= edit_state.buffer.len() {
        edit_state.buffer.push(character);
        draw_ops.push(DrawOp::PrintText(character.to_string()));
    } else {
        let width_before_cursor = chars_display_width(&edit_state.buffer[..col]);
        let new_column =
            column_after(width_before_cursor.saturating_add(char_display_width(character)));
        edit_state.buffer.insert(col, character);
        DrawOp::redraw_line(draw_ops, &edit_state.buffer);
        draw_ops.push(DrawOp::MoveToColumn(new_column));
    }
    edit_state.cursor.col += 1;
}

fn handle_home(edit_state: &mut EditState, draw_ops: &mut DrawOps) {
    edit_state.cursor.col = edit_state.prompt.len();
    draw_ops.push(DrawOp::MoveToColumn(column_after(
        edit_state.prompt.display_width(),
    )));
}

fn handle_end(edit_state: &mut EditState, draw_ops: &mut DrawOps) {
    edit_state.cursor.col = edit_state.buffer.len();
    draw_ops.push(DrawOp::MoveToColumn(column_after(chars_display_width(
        &edit_state.buffer,
    ))));
}

/// Moves to the end of the line and starts a new one. The buffer goes into the history,
/// and a fresh copy of the prompt becomes the live line. Returns the submitted line
/// without the prompt.
///
/// The history is updated before anything is drawn. If drawing the returned ops fails,
/// the line stays in the history but is never delivered, and the session terminates.
fn handle_enter(edit_state: &mut EditState, draw_ops: &mut DrawOps) -> String {
    draw_ops.push(DrawOp::MoveToColumn(column_after(chars_display_width(
        &edit_state.buffer,
    ))));
    draw_ops.push(DrawOp::Newline);

    let input = edit_state.user_input();
    edit_state.history.push(&edit_state.buffer);
    edit_state.buffer = edit_state.prompt.to_buffer();
    edit_state.cursor.row = edit_state.history.len();
    edit_state.cursor.col = edit_state.prompt.len();

    input
}

impl EditState {
    /// Applies one key and returns what has to be drawn. The prompt is never modified,
    /// and afterwards the cursor column is always in `prompt.len()..=buffer.len()`.
    pub fn apply_key(&mut self, key_event: KeyEvent) -> KeyOutcome {
        let mut draw_ops: DrawOps = smallvec![];

        match key_event.kind {
            KeyKind::ArrowUp => handle_arrow_up(self, &mut draw_ops),
            KeyKind::ArrowDown => handle_arrow_down(self, &mut draw_ops),
            KeyKind::ArrowLeft => handle_arrow_left(self, &mut draw_ops),
            KeyKind::ArrowRight => handle_arrow_right(self, &mut draw_ops),
            KeyKind::Backspace => handle_backspace(self, &mut draw_ops),
            KeyKind::Home => handle_home(self, &mut draw_ops),
            KeyKind::End => handle_end(self, &mut draw_ops),
            KeyKind::Space | KeyKind::Tab | KeyKind::Char => {
                handle_char(self, &mut draw_ops, key_event.character);
            }
            KeyKind::Enter => {
                let input = handle_enter(self, &mut draw_ops);
                return KeyOutcome::Submitted { input, draw_ops };
            }
            KeyKind::Interrupt => {
                handle_end(self, &mut draw_ops);
                return KeyOutcome::ExitRequested(draw_ops);
            }
        }

        KeyOutcome::Continue(draw_ops)
    }
}
