use crate::app::App;
use crate::confirm::ClearChoice;

/// Represents actions that can be performed in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Application Control
    Quit,
    ToggleHelp,
    Back,

    // Search
    RecordLookup,
    ClearInput,
    OpenHistory,

    // History list
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GotoTop,
    GotoBottom,
    SelectEntry,
    RequestClear,

    // Clear prompt
    ToggleClearChoice,
    AnswerFocused,
    AnswerConfirm,
    AnswerCancel,
}

impl Command {
    /// Returns a human-readable description of this command.
    pub fn description(&self) -> &'static str {
        match self {
            Command::Quit => "Quit",
            Command::ToggleHelp => "Toggle help",
            Command::Back => "Back",

            Command::RecordLookup => "Record lookup",
            Command::ClearInput => "Clear input",
            Command::OpenHistory => "Open history",

            Command::MoveUp => "Move up",
            Command::MoveDown => "Move down",
            Command::PageUp => "Page up",
            Command::PageDown => "Page down",
            Command::GotoTop => "Go to first entry",
            Command::GotoBottom => "Go to last entry",
            Command::SelectEntry => "Revisit selected location",
            Command::RequestClear => "Clear all history",

            Command::ToggleClearChoice => "Switch option",
            Command::AnswerFocused => "Choose highlighted option",
            Command::AnswerConfirm => "Clear",
            Command::AnswerCancel => "Cancel",
        }
    }

    /// Executes this command on the given application.
    pub fn execute(&self, app: &mut App) {
        match self {
            Command::Quit => app.quit(),
            Command::ToggleHelp => app.help.toggle_visibility(),
            Command::Back => app.back(),

            Command::RecordLookup => app.record_lookup(),
            Command::ClearInput => app.search.clear_input(),
            Command::OpenHistory => app.open_history(),

            Command::MoveUp => app.history.list_mut().move_up(),
            Command::MoveDown => app.history.list_mut().move_down(),
            Command::PageUp => app.history.list_mut().page_up(),
            Command::PageDown => app.history.list_mut().page_down(),
            Command::GotoTop => app.history.list_mut().select_first(),
            Command::GotoBottom => app.history.list_mut().select_last(),
            Command::SelectEntry => app.select_entry(),
            Command::RequestClear => app.request_clear(),

            Command::ToggleClearChoice => app.history.toggle_clear_focus(),
            Command::AnswerFocused => app.answer_clear(None),
            Command::AnswerConfirm => app.answer_clear(Some(ClearChoice::Confirm)),
            Command::AnswerCancel => app.answer_clear(Some(ClearChoice::Cancel)),
        }
    }
}
