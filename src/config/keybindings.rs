//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub select: Vec<String>,
    pub back: Vec<String>,
    pub next_category: Vec<String>,
    pub prev_category: Vec<String>,
    pub load_more: Vec<String>,
    pub refresh: Vec<String>,
    pub open_in_browser: Vec<String>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        let keys = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            select: keys(&["Enter"]),
            back: keys(&["Esc", "Backspace"]),
            next_category: keys(&["Tab", "l"]),
            prev_category: keys(&["BackTab", "h"]),
            load_more: keys(&["n", "Space"]),
            refresh: keys(&["r"]),
            open_in_browser: keys(&["o"]),
        }
    }
}

impl KeybindingConfig {
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 10] = [
            (&self.quit, Action::Quit),
            (&self.move_up, Action::MoveUp),
            (&self.move_down, Action::MoveDown),
            (&self.select, Action::Select),
            (&self.back, Action::Back),
            (&self.next_category, Action::NextCategory),
            (&self.prev_category, Action::PrevCategory),
            (&self.load_more, Action::LoadMore),
            (&self.refresh, Action::Refresh),
            (&self.open_in_browser, Action::OpenInBrowser),
        ];

        for (bindings, action) in table {
            let hit = bindings.iter().any(|binding| {
                parse_key_string(binding).is_some_and(|parsed| parsed.matches(key))
            });
            if hit {
                return action;
            }
        }
        Action::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        // Shift is implied by uppercase chars, so tolerate it either way.
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse "j", "Enter", "Ctrl+c", "Shift+Tab", "F5" and the like.
pub fn parse_key_string(s: &str) -> Option<KeyBinding> {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts = s.trim().split('+').peekable();

    let mut key_part = parts.next()?;
    while parts.peek().is_some() {
        match key_part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
        key_part = parts.next()?;
    }

    Some(KeyBinding {
        code: parse_key_code(key_part)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Some(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "backspace" | "bs" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    }
}
