//! Key event to game action mapping
//!
//! Each key press produces at most one discrete action. Held keys rely on
//! the terminal's own key repeat.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub rotate_cw: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    warn!("Ignoring unknown key binding {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            rotate_cw: Self::parse_keys(&settings.keys.rotate_cw),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Translates terminal key events into game actions
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(KeyBindings::from_settings(settings))
    }

    /// Map a key event to an action. Releases and unbound keys map to nothing.
    pub fn key_down(&self, key: KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // Handle Ctrl+C for quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let code = normalize_key(key.code);
        let bindings = &self.bindings;
        if bindings.move_left.contains(&code) {
            Some(Action::MoveLeft)
        } else if bindings.move_right.contains(&code) {
            Some(Action::MoveRight)
        } else if bindings.soft_drop.contains(&code) {
            Some(Action::SoftDrop)
        } else if bindings.rotate_cw.contains(&code) {
            Some(Action::RotateCW)
        } else if bindings.quit.contains(&code) {
            Some(Action::Quit)
        } else {
            None
        }
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let input = InputHandler::default();
        assert_eq!(input.key_down(press(KeyCode::Left)), Some(Action::MoveLeft));
        assert_eq!(input.key_down(press(KeyCode::Right)), Some(Action::MoveRight));
        assert_eq!(input.key_down(press(KeyCode::Down)), Some(Action::SoftDrop));
        assert_eq!(input.key_down(press(KeyCode::Up)), Some(Action::RotateCW));
        assert_eq!(input.key_down(press(KeyCode::Char('x'))), Some(Action::RotateCW));
        assert_eq!(input.key_down(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(input.key_down(press(KeyCode::Char('m'))), None);
    }

    #[test]
    fn test_uppercase_matches_binding() {
        let input = InputHandler::default();
        assert_eq!(input.key_down(press(KeyCode::Char('Q'))), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut settings = Settings::default();
        settings.keys.quit = vec![];
        let input = InputHandler::from_settings(&settings);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(ctrl_c), Some(Action::Quit));
    }

    #[test]
    fn test_release_is_ignored() {
        let input = InputHandler::default();
        let mut event = press(KeyCode::Left);
        event.kind = KeyEventKind::Release;
        assert_eq!(input.key_down(event), None);
    }

    #[test]
    fn test_custom_bindings_skip_unknown_names() {
        let mut settings = Settings::default();
        settings.keys.move_left = vec!["a".to_string(), "Hyper".to_string()];
        settings.keys.rotate_cw = vec!["Space".to_string()];
        let bindings = KeyBindings::from_settings(&settings);
        assert_eq!(bindings.move_left, vec![KeyCode::Char('a')]);

        let input = InputHandler::new(bindings);
        assert_eq!(input.key_down(press(KeyCode::Char('a'))), Some(Action::MoveLeft));
        assert_eq!(input.key_down(press(KeyCode::Char(' '))), Some(Action::RotateCW));
        assert_eq!(input.key_down(press(KeyCode::Left)), None);
    }
}
