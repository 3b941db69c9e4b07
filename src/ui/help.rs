use crate::app::App;
use crate::ui::colors::{HELP_BG, HELP_BORDER_FG, HELP_HEADER_FG};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

/// Width of the key column.
const KEY_COLUMN: usize = 12;

impl App {
    /// Renders the keys available where the user currently is.
    pub(super) fn render_help(&self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let context = self.keybinding_context();
        let mut lines = vec![
            Line::from(context.title()).style(Style::default().fg(HELP_HEADER_FG).add_modifier(Modifier::BOLD)),
        ];
        for (key, command) in self.keybindings.get_keybindings_for_context(context) {
            lines.push(Line::from(format!("{:<KEY_COLUMN$} {}", key, command.description())));
        }

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(HELP_BORDER_FG))
            .style(Style::default().bg(HELP_BG));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
