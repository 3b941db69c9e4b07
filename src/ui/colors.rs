use ratatui::style::Color;

/// Symbol used to indicate the selected line.
pub const RIGHT_ARROW: &str = "▶ ";

/// Common colors
pub const GRAY_COLOR: Color = Color::Indexed(237);
pub const WHITE_COLOR: Color = Color::White;

// Title and footer
pub const TITLE_BG: Color = GRAY_COLOR;
pub const FOOTER_BG: Color = GRAY_COLOR;
pub const FOOTER_HINT_FG: Color = Color::Gray;

// History list
pub const HISTORY_BORDER: Color = Color::Indexed(108);
pub const HISTORY_HIGHLIGHT_BG: Color = GRAY_COLOR;
pub const HISTORY_RAW_NAME_FG: Color = Color::DarkGray;
pub const EMPTY_STATE_FG: Color = Color::Indexed(245);
pub const LOADING_FG: Color = Color::Yellow;

// Clear
pub const CLEAR_HINT_FG: Color = Color::Indexed(203);
pub const CONFIRM_BORDER: Color = Color::Indexed(203);
pub const CONFIRM_FOCUSED_BG: Color = Color::Indexed(203);
pub const CONFIRM_FOCUSED_FG: Color = Color::Black;

// Search
pub const SEARCH_BORDER: Color = Color::Cyan;
pub const SELECTED_LOCATION_FG: Color = Color::Yellow;
pub const METADATA_KEY_FG: Color = Color::Gray;

// Help
pub const HELP_BG: Color = Color::Blue;
pub const HELP_BORDER_FG: Color = Color::White;
pub const HELP_HEADER_FG: Color = Color::Yellow;

// Messages
pub const MESSAGE_BORDER: Color = Color::Blue;
pub const MESSAGE_ERROR_FG: Color = Color::Red;
