pub mod colors;
mod footer;
mod help;
mod history;
mod popups;
mod search;

use crate::app::App;
use crate::navigation::Screen;
use crate::presenter::HistoryState;
use colors::{TITLE_BG, WHITE_COLOR};
use popups::popup_area;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Widget},
};

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [top, middle, bottom] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        // Title
        let title_middle = Line::from(" Lazyweather ").centered();
        let title_right = Line::from(format!("v{}", env!("CARGO_PKG_VERSION")))
            .right_aligned()
            .style(Style::default().fg(WHITE_COLOR));
        Block::default()
            .title_bottom(title_middle)
            .title_bottom(title_right)
            .style(Style::default().bg(TITLE_BG))
            .render(top, buf);

        // Main view
        match self.navigator.current() {
            Screen::Search => self.render_search(middle, buf),
            Screen::History => self.render_history(middle, buf),
        }

        self.render_footer(bottom, buf);

        // Popups
        if self.navigator.current() == Screen::History && self.history.state() == HistoryState::ConfirmingClear {
            self.render_confirm_clear_popup(area, buf);
        }
        if let Some(notice) = self.history.notice().or(self.search.notice()) {
            self.render_notice_popup(notice, area, buf);
        }

        // Help popup
        if self.help.is_visible() {
            let help_area = popup_area(area, 50, 22);
            self.render_help(help_area, buf);
        }
    }
}
