// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result};

use crate::{DEFAULT_PROMPT, chars_display_width};

/// The non editable text at the start of every line. It is fixed when the engine is
/// created, and every live line starts out as a fresh copy of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    chars: Box<[char]>,
}

impl Prompt {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    #[must_use]
    pub fn as_chars(&self) -> &[char] { &self.chars }

    /// Number of chars, not bytes or columns.
    #[must_use]
    pub fn len(&self) -> usize { self.chars.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.chars.is_empty() }

    #[must_use]
    pub fn display_width(&self) -> u16 { chars_display_width(&self.chars) }

    /// A new buffer that doesn't share anything with the prompt.
    #[must_use]
    pub fn to_buffer(&self) -> Vec<char> { self.chars.to_vec() }
}

impl Default for Prompt {
    fn default() -> Self { Self::new(DEFAULT_PROMPT) }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self { Self::new(text) }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self { Self::new(&text) }
}

impl Display for Prompt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for character in &self.chars {
            write!(f, "{character}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_len_counts_chars() {
        let prompt = Prompt::new("日本> ");
        assert_eq!(prompt.len(), 4);
        assert_eq!(prompt.display_width(), 6);
        assert_eq!(prompt.to_string(), "日本> ");
    }

    #[test]
    fn test_to_buffer_is_a_fresh_copy() {
        let prompt = Prompt::from("momoko> ");
        let mut buffer = prompt.to_buffer();
        buffer.push('x');
        assert_eq!(prompt.as_chars().len(), 8);
        assert_eq!(buffer.len(), 9);
    }

    #[test]
    fn test_default_prompt() {
        assert_eq!(Prompt::default().to_string(), DEFAULT_PROMPT);
    }
}
