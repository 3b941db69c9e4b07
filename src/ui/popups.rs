use crate::app::App;
use crate::confirm::{ClearChoice, ClearConfirmation};
use crate::ui::colors::{
    CONFIRM_BORDER, CONFIRM_FOCUSED_BG, CONFIRM_FOCUSED_FG, MESSAGE_BORDER, MESSAGE_ERROR_FG, WHITE_COLOR,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget},
};

/// Calculates a centered popup area within the given rect.
///
/// The popup will be centered with at least 2 characters margin on all sides.
pub(super) fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let min_margin = 2;

    let popup_width = width.min(area.width.saturating_sub(2 * min_margin));
    let popup_height = height.min(area.height.saturating_sub(2 * min_margin));

    Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

impl App {
    /// Renders a centered popup that adapts to content size.
    fn render_popup(&self, message: &str, title: &str, border_color: Color, area: Rect, buf: &mut Buffer) {
        let max_line_width = message.lines().map(|line| Line::from(line).width()).max().unwrap_or(0);
        let line_count = message.lines().count().max(1);

        let popup = popup_area(area, max_line_width as u16 + 6, line_count as u16 + 4);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .padding(Padding::horizontal(2));

        Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(WHITE_COLOR))
            .alignment(Alignment::Center)
            .render(popup, buf);
    }

    /// Renders a transient notice about a failed history operation.
    pub(super) fn render_notice_popup(&self, notice: &str, area: Rect, buf: &mut Buffer) {
        let message = format!("\n{}\n\nPress any key", notice);
        self.render_popup(&message, "Notice", MESSAGE_ERROR_FG, area, buf);
    }

    /// Renders the clear confirmation with its two options.
    pub(super) fn render_confirm_clear_popup(&self, area: Rect, buf: &mut Buffer) {
        let gate = self.history.confirmation();

        if self.history.is_clearing() {
            self.render_popup("Clearing history...", ClearConfirmation::TITLE, MESSAGE_BORDER, area, buf);
            return;
        }

        let Some(focused) = gate.focused() else {
            return;
        };

        let popup = popup_area(area, 40, 7);
        Clear.render(popup, buf);

        let option = |choice: ClearChoice| {
            let text = format!("  {}  ", choice.label());
            if choice == focused {
                Span::styled(
                    text,
                    Style::default()
                        .fg(CONFIRM_FOCUSED_FG)
                        .bg(CONFIRM_FOCUSED_BG)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(text)
            }
        };

        let lines = vec![
            Line::from(ClearConfirmation::MESSAGE),
            Line::default(),
            Line::from(vec![option(ClearChoice::Cancel), Span::raw("   "), option(ClearChoice::Confirm)]),
        ];

        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!(" {} ", ClearConfirmation::TITLE))
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(CONFIRM_BORDER))
                    .padding(Padding::vertical(1)),
            )
            .alignment(Alignment::Center)
            .render(popup, buf);
    }
}
