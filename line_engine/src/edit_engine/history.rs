// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Every submitted line (prompt included), oldest first. Entries are never changed once
/// they're added, and recalling one always hands out a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<Box<[char]>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// One entry per submission. Duplicates and empty lines are kept, and there is no
    /// size limit.
    pub fn push(&mut self, line: &[char]) { self.entries.push(line.into()); }

    #[must_use]
    pub fn get(&self, row: usize) -> Option<&[char]> { self.entries.get(row).map(AsRef::as_ref) }

    #[must_use]
    pub fn copy_entry(&self, row: usize) -> Option<Vec<char>> {
        self.get(row).map(<[char]>::to_vec)
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &[char]> { self.entries.iter().map(AsRef::as_ref) }

    #[must_use]
    pub fn entries_as_strings(&self) -> Vec<String> {
        self.iter().map(|entry| entry.iter().collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> { text.chars().collect() }

    #[test]
    fn test_push_keeps_order_and_duplicates() {
        let mut history = History::new();
        history.push(&chars("> a"));
        history.push(&chars("> a"));
        history.push(&chars("> "));

        assert_eq!(history.len(), 3);
        pretty_assertions::assert_eq!(history.entries_as_strings(), vec!["> a", "> a", "> "]);
    }

    #[test]
    fn test_copy_entry_does_not_alias() {
        let mut history = History::new();
        history.push(&chars("> ls"));

        let mut copy = history.copy_entry(0).unwrap();
        copy.push('!');

        assert_eq!(history.get(0).unwrap(), chars("> ls").as_slice());
        assert!(history.copy_entry(1).is_none());
    }
}
