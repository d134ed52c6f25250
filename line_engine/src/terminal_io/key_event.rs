// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use strum_macros::{Display, EnumIter};

/// The classes of keys the edit engine reacts to. Anything that isn't one of the named
/// keys arrives as [`KeyKind::Char`], carrying the raw character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum KeyKind {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Backspace,
    Space,
    Tab,
    Home,
    End,
    /// <kbd>Ctrl+C</kbd> or <kbd>Ctrl+D</kbd>.
    Interrupt,
    Char,
}

/// A single classified keystroke.
///
/// `character` is only meaningful for [`KeyKind::Char`], [`KeyKind::Space`] and
/// [`KeyKind::Tab`]. A [`KeyKind::Char`] carrying `'\0'` means "a key with no binding"
/// and is ignored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub character: char,
    pub kind: KeyKind,
}

impl KeyEvent {
    pub const NULL_CHAR: char = '\0';

    #[must_use]
    pub fn new(kind: KeyKind) -> Self {
        let character = match kind {
            KeyKind::Space => ' ',
            KeyKind::Tab => '\t',
            _ => Self::NULL_CHAR,
        };
        Self { character, kind }
    }

    #[must_use]
    pub fn char(character: char) -> Self {
        Self {
            character,
            kind: KeyKind::Char,
        }
    }

    #[must_use]
    pub fn unbound() -> Self { Self::char(Self::NULL_CHAR) }

    #[must_use]
    pub fn is_unbound(&self) -> bool {
        self.kind == KeyKind::Char && self.character == Self::NULL_CHAR
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(key_event: crossterm::event::KeyEvent) -> Self {
        let crossterm::event::KeyEvent {
            code, modifiers, ..
        } = key_event;

        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let alt = modifiers.contains(KeyModifiers::ALT);

        match code {
            KeyCode::Char('c' | 'd') if ctrl && !alt => KeyEvent::new(KeyKind::Interrupt),
            KeyCode::Char('h') if ctrl && !alt => KeyEvent::new(KeyKind::Backspace),
            KeyCode::Char(' ') if !ctrl && !alt => KeyEvent::new(KeyKind::Space),
            // Ctrl+Alt is how AltGr shows up on some platforms, so treat it as typing.
            KeyCode::Char(character) if ctrl == alt => KeyEvent::char(character),
            KeyCode::Backspace => KeyEvent::new(KeyKind::Backspace),
            KeyCode::Tab => KeyEvent::new(KeyKind::Tab),
            KeyCode::Enter => KeyEvent::new(KeyKind::Enter),
            KeyCode::Up => KeyEvent::new(KeyKind::ArrowUp),
            KeyCode::Down => KeyEvent::new(KeyKind::ArrowDown),
            KeyCode::Left => KeyEvent::new(KeyKind::ArrowLeft),
            KeyCode::Right => KeyEvent::new(KeyKind::ArrowRight),
            KeyCode::Home => KeyEvent::new(KeyKind::Home),
            KeyCode::End => KeyEvent::new(KeyKind::End),
            _ => KeyEvent::unbound(),
        }
    }
}

/// Only key presses (and auto repeats) make it through. Key releases, resize, mouse,
/// focus, and paste events are dropped.
#[must_use]
pub fn try_from_crossterm_event(event: Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            Some(key_event.into())
        }
        _ => None,
    }
}
