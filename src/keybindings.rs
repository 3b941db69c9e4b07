use crate::command::Command;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Where a key press is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingContext {
    Search,
    History,
    ConfirmClear,
}

impl KeybindingContext {
    pub fn title(&self) -> &'static str {
        match self {
            KeybindingContext::Search => "Search",
            KeybindingContext::History => "History",
            KeybindingContext::ConfirmClear => "Clear prompt",
        }
    }
}

type KeyBindingKey = (KeybindingContext, KeyCode, KeyModifiers);

/// Registry of all keybindings mapped to commands.
#[derive(Debug, Default)]
pub struct KeybindingRegistry {
    bindings: Vec<(KeyBindingKey, Command)>,
}

impl KeybindingRegistry {
    /// Creates a new keybinding registry with all default bindings.
    pub fn new() -> Self {
        let mut registry = Self { bindings: Vec::new() };

        registry.register_search_bindings();
        registry.register_history_bindings();
        registry.register_confirm_clear_bindings();

        for context in [
            KeybindingContext::Search,
            KeybindingContext::History,
            KeybindingContext::ConfirmClear,
        ] {
            registry.register_global_bindings(context);
        }

        registry
    }

    pub fn lookup(&self, context: KeybindingContext, key_event: KeyEvent) -> Option<Command> {
        self.bindings
            .iter()
            .find(|((ctx, code, modifiers), _)| {
                *ctx == context && *code == key_event.code && *modifiers == key_event.modifiers
            })
            .map(|(_, cmd)| *cmd)
    }

    /// Returns the formatted keys and commands bound in `target_context`.
    pub fn get_keybindings_for_context(&self, target_context: KeybindingContext) -> Vec<(String, Command)> {
        self.bindings
            .iter()
            .filter(|((context, _, _), _)| *context == target_context)
            .map(|((_, keycode, modifiers), cmd)| (Self::format_key(*keycode, *modifiers), *cmd))
            .collect()
    }

    fn format_key(keycode: KeyCode, modifiers: KeyModifiers) -> String {
        let key_str = match keycode {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            _ => format!("{:?}", keycode),
        };

        if modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key_str)
        } else if modifiers.contains(KeyModifiers::ALT) {
            format!("Alt+{}", key_str)
        } else {
            key_str
        }
    }

    fn bind(&mut self, context: KeybindingContext, keycode: KeyCode, modifiers: KeyModifiers, command: Command) {
        self.bindings.push(((context, keycode, modifiers), command));
    }

    fn bind_simple(&mut self, context: KeybindingContext, keycode: KeyCode, command: Command) {
        self.bind(context, keycode, KeyModifiers::empty(), command);
    }

    fn register_global_bindings(&mut self, context: KeybindingContext) {
        self.bind(context, KeyCode::Char('c'), KeyModifiers::CONTROL, Command::Quit);
        self.bind_simple(context, KeyCode::F(1), Command::ToggleHelp);
    }

    fn register_search_bindings(&mut self) {
        let context = KeybindingContext::Search;

        self.bind_simple(context, KeyCode::Enter, Command::RecordLookup);
        self.bind_simple(context, KeyCode::Esc, Command::ClearInput);
        self.bind_simple(context, KeyCode::Tab, Command::OpenHistory);
        self.bind_simple(context, KeyCode::F(2), Command::OpenHistory);
    }

    fn register_history_bindings(&mut self) {
        let context = KeybindingContext::History;

        self.bind_simple(context, KeyCode::Char('q'), Command::Quit);
        self.bind_simple(context, KeyCode::Esc, Command::Back);
        self.bind_simple(context, KeyCode::Tab, Command::Back);
        self.bind_simple(context, KeyCode::Up, Command::MoveUp);
        self.bind_simple(context, KeyCode::Down, Command::MoveDown);
        self.bind_simple(context, KeyCode::Char('k'), Command::MoveUp);
        self.bind_simple(context, KeyCode::Char('j'), Command::MoveDown);
        self.bind_simple(context, KeyCode::PageUp, Command::PageUp);
        self.bind_simple(context, KeyCode::PageDown, Command::PageDown);
        self.bind_simple(context, KeyCode::Char('g'), Command::GotoTop);
        self.bind(context, KeyCode::Char('G'), KeyModifiers::SHIFT, Command::GotoBottom);
        self.bind_simple(context, KeyCode::Enter, Command::SelectEntry);
        self.bind_simple(context, KeyCode::Char('c'), Command::RequestClear);
        self.bind_simple(context, KeyCode::Delete, Command::RequestClear);
    }

    fn register_confirm_clear_bindings(&mut self) {
        let context = KeybindingContext::ConfirmClear;

        self.bind_simple(context, KeyCode::Left, Command::ToggleClearChoice);
        self.bind_simple(context, KeyCode::Right, Command::ToggleClearChoice);
        self.bind_simple(context, KeyCode::Tab, Command::ToggleClearChoice);
        self.bind_simple(context, KeyCode::Enter, Command::AnswerFocused);
        self.bind_simple(context, KeyCode::Char('y'), Command::AnswerConfirm);
        self.bind_simple(context, KeyCode::Char('n'), Command::AnswerCancel);
        self.bind_simple(context, KeyCode::Esc, Command::AnswerCancel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_same_key_differs_per_context() {
        let registry = KeybindingRegistry::new();
        assert_eq!(
            registry.lookup(KeybindingContext::Search, key(KeyCode::Enter)),
            Some(Command::RecordLookup)
        );
        assert_eq!(
            registry.lookup(KeybindingContext::History, key(KeyCode::Enter)),
            Some(Command::SelectEntry)
        );
        assert_eq!(
            registry.lookup(KeybindingContext::ConfirmClear, key(KeyCode::Enter)),
            Some(Command::AnswerFocused)
        );
    }

    #[test]
    fn test_plain_characters_are_free_on_search() {
        let registry = KeybindingRegistry::new();
        assert_eq!(registry.lookup(KeybindingContext::Search, key(KeyCode::Char('q'))), None);
        assert_eq!(registry.lookup(KeybindingContext::Search, key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_global_bindings_everywhere() {
        let registry = KeybindingRegistry::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for context in [
            KeybindingContext::Search,
            KeybindingContext::History,
            KeybindingContext::ConfirmClear,
        ] {
            assert_eq!(registry.lookup(context, ctrl_c), Some(Command::Quit));
        }
    }

    #[test]
    fn test_format_keys_for_help() {
        let registry = KeybindingRegistry::new();
        let keys: Vec<String> = registry
            .get_keybindings_for_context(KeybindingContext::History)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert!(keys.contains(&"Ctrl+c".to_string()));
        assert!(keys.contains(&"F1".to_string()));
        assert!(keys.contains(&"G".to_string()));
    }
}
