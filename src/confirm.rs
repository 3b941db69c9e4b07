/// The two answers of the clear prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearChoice {
    Cancel,
    Confirm,
}

impl ClearChoice {
    pub fn label(&self) -> &'static str {
        match self {
            ClearChoice::Cancel => "Cancel",
            ClearChoice::Confirm => "Clear",
        }
    }

    fn other(self) -> Self {
        match self {
            ClearChoice::Cancel => ClearChoice::Confirm,
            ClearChoice::Confirm => ClearChoice::Cancel,
        }
    }
}

/// Result of closing the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The user confirmed; the history should be cleared.
    Clear,
    /// Cancelled or dismissed; nothing happens.
    Dismissed,
}

/// Gate in front of clearing the history.
///
/// The prompt can only be opened over a non-empty history and starts with
/// `Cancel` focused.
#[derive(Debug, Default)]
pub struct ClearConfirmation {
    focused: Option<ClearChoice>,
}

impl ClearConfirmation {
    pub const TITLE: &'static str = "Clear history";
    pub const MESSAGE: &'static str = "Remove every past lookup?";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.focused.is_some()
    }

    /// Focused option while open.
    pub fn focused(&self) -> Option<ClearChoice> {
        self.focused
    }

    /// Opens the prompt. Returns false, and stays closed, for an empty history.
    pub fn request_clear(&mut self, history_len: usize) -> bool {
        if history_len == 0 {
            return false;
        }
        self.focused.get_or_insert(ClearChoice::Cancel);
        true
    }

    /// Moves focus to the other option.
    pub fn toggle_focus(&mut self) {
        if let Some(choice) = self.focused {
            self.focused = Some(choice.other());
        }
    }

    /// Closes the prompt with `choice`.
    pub fn choose(&mut self, choice: ClearChoice) -> ConfirmOutcome {
        if self.focused.take().is_none() {
            return ConfirmOutcome::Dismissed;
        }
        match choice {
            ClearChoice::Confirm => ConfirmOutcome::Clear,
            ClearChoice::Cancel => ConfirmOutcome::Dismissed,
        }
    }

    /// Closes the prompt with the focused option.
    pub fn choose_focused(&mut self) -> ConfirmOutcome {
        match self.focused {
            Some(choice) => self.choose(choice),
            None => ConfirmOutcome::Dismissed,
        }
    }

    /// Closes the prompt without an answer.
    pub fn dismiss(&mut self) {
        self.focused = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_open_over_empty_history() {
        let mut gate = ClearConfirmation::new();
        assert!(!gate.request_clear(0));
        assert!(!gate.is_open());
    }

    #[test]
    fn test_opens_with_cancel_focused() {
        let mut gate = ClearConfirmation::new();
        assert!(gate.request_clear(2));
        assert_eq!(gate.focused(), Some(ClearChoice::Cancel));
    }

    #[test]
    fn test_only_confirm_clears() {
        let mut gate = ClearConfirmation::new();
        gate.request_clear(1);
        assert_eq!(gate.choose(ClearChoice::Cancel), ConfirmOutcome::Dismissed);

        gate.request_clear(1);
        assert_eq!(gate.choose(ClearChoice::Confirm), ConfirmOutcome::Clear);
        assert!(!gate.is_open());
    }

    #[test]
    fn test_choose_when_closed_does_nothing() {
        let mut gate = ClearConfirmation::new();
        assert_eq!(gate.choose(ClearChoice::Confirm), ConfirmOutcome::Dismissed);
    }

    #[test]
    fn test_focused_default_is_safe() {
        let mut gate = ClearConfirmation::new();
        gate.request_clear(3);
        assert_eq!(gate.choose_focused(), ConfirmOutcome::Dismissed);

        gate.request_clear(3);
        gate.toggle_focus();
        assert_eq!(gate.choose_focused(), ConfirmOutcome::Clear);
    }

    #[test]
    fn test_dismiss_closes() {
        let mut gate = ClearConfirmation::new();
        gate.request_clear(1);
        gate.dismiss();
        assert!(!gate.is_open());
    }
}
