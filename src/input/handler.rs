use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    /// Start a round from the title or game-over screen
    Start,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Ctrl+C, which quits from any screen
    pub fn is_interrupt(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if Self::is_interrupt(&key) {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            // Controls
            KeyCode::Char(' ') => KeyAction::Start,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects the three letters of a highscore name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    buffer: String,
}

/// What a key press did to the name being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntryEvent {
    Editing,
    Submitted(String),
    /// Entry abandoned; the score goes on the list without a name
    Cancelled,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> NameEntryEvent {
        match key.code {
            KeyCode::Enter => NameEntryEvent::Submitted(std::mem::take(&mut self.buffer)),
            KeyCode::Esc => {
                self.buffer.clear();
                NameEntryEvent::Cancelled
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                NameEntryEvent::Editing
            }
            KeyCode::Char(c) if !c.is_control() => {
                if self.buffer.chars().count() < crate::leaderboard::NAME_LEN {
                    self.buffer.extend(c.to_uppercase());
                }
                NameEntryEvent::Editing
            }
            _ => NameEntryEvent::Editing,
        }
    }
}
