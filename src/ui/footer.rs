use crate::app::App;
use crate::navigation::Screen;
use crate::ui::colors::{CLEAR_HINT_FG, FOOTER_BG, FOOTER_HINT_FG};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

impl App {
    pub(super) fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let hint = Style::default().fg(FOOTER_HINT_FG);
        let mut spans = match self.navigator.current() {
            Screen::Search => vec![Span::styled(" Enter: Record lookup | Tab: History | F1: Help", hint)],
            Screen::History => vec![Span::styled(" Enter: Revisit | Esc: Back | F1: Help", hint)],
        };

        if self.navigator.current() == Screen::History
            && self.history.clear_control_visible(&self.store.current_snapshot())
        {
            spans.push(Span::styled(" | ", hint));
            spans.push(Span::styled("c: Clear history", Style::default().fg(CLEAR_HINT_FG)));
        }

        Block::default().style(Style::default().bg(FOOTER_BG)).render(area, buf);
        Line::from(spans).render(area, buf);
    }
}
