// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_width::UnicodeWidthChar;

/// Columns taken up by `character` when printed. Wide chars (CJK, most emoji) take 2,
/// combining marks take 0. Control chars have no defined width and count as 1.
#[must_use]
pub fn char_display_width(character: char) -> u16 {
    let width = UnicodeWidthChar::width(character).unwrap_or(1);
    u16::try_from(width).unwrap_or(1)
}

#[must_use]
pub fn chars_display_width(chars: &[char]) -> u16 {
    chars
        .iter()
        .map(|character| char_display_width(*character))
        .fold(0, u16::saturating_add)
}
