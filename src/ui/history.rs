use crate::app::App;
use crate::presenter::{HistoryState, Listing, listing};
use crate::ui::colors::{
    EMPTY_STATE_FG, HISTORY_BORDER, HISTORY_HIGHLIGHT_BG, HISTORY_RAW_NAME_FG, LOADING_FG, RIGHT_ARROW,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, List, ListState, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget,
    },
};

impl App {
    pub(super) fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.store.current_snapshot();

        let mut block = Block::default()
            .title(" History ")
            .title_alignment(Alignment::Center)
            .title_style(Style::default().bold())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(HISTORY_BORDER));
        if self.history.state() == HistoryState::AwaitingLoad {
            block = block.title_bottom(Line::from(" loading… ").right_aligned().fg(LOADING_FG));
        }

        let items = match listing(&snapshot, &self.labels) {
            Listing::Empty(message) => {
                let inner = block.inner(area);
                block.render(area, buf);
                let [_, message_area] =
                    Layout::vertical([Constraint::Length(inner.height / 3), Constraint::Fill(1)]).areas(inner);
                Paragraph::new(message)
                    .style(Style::default().fg(EMPTY_STATE_FG))
                    .alignment(Alignment::Center)
                    .render(message_area, buf);
                return;
            }
            Listing::Items(items) => items,
        };

        let lines: Vec<Line> = items
            .iter()
            .map(|item| {
                let mut spans = vec![Span::raw(item.label.to_string())];
                if item.label != item.record.name {
                    spans.push(Span::styled(
                        format!("  {}", item.record.name),
                        Style::default().fg(HISTORY_RAW_NAME_FG),
                    ));
                }
                if let Some(at) = item.record.looked_up_at() {
                    spans.push(Span::styled(
                        format!("  {}", at.format("%Y-%m-%d %H:%M")),
                        Style::default().fg(HISTORY_RAW_NAME_FG),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        let list_view = self.history.list();
        let inner = block.inner(area);
        block.render(area, buf);
        list_view.set_viewport_height(inner.height as usize);

        let total = lines.len();
        let mut state = ListState::default()
            .with_selected(Some(list_view.selected_index()))
            .with_offset(list_view.viewport_offset());
        let list = List::new(lines)
            .highlight_symbol(RIGHT_ARROW)
            .highlight_style(Style::default().bg(HISTORY_HIGHLIGHT_BG).add_modifier(Modifier::BOLD));
        StatefulWidget::render(list, inner, buf, &mut state);

        if total > inner.height as usize {
            let mut scrollbar = ScrollbarState::new(total).position(list_view.selected_index());
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .render(area, buf, &mut scrollbar);
        }
    }
}
