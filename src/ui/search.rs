use crate::app::App;
use crate::record::LOOKED_UP_AT;
use crate::ui::colors::{METADATA_KEY_FG, SEARCH_BORDER, SELECTED_LOCATION_FG};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

impl App {
    pub(super) fn render_search(&self, area: Rect, buf: &mut Buffer) {
        let [input_area, selected_area] = Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

        self.render_search_input(input_area, buf);
        self.render_selected_location(selected_area, buf);
    }

    fn render_search_input(&self, area: Rect, buf: &mut Buffer) {
        let input = self.search.input();
        let block = Block::default()
            .title(" Location ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SEARCH_BORDER));

        let width = block.inner(area).width.saturating_sub(1) as usize;
        let scroll = input.visual_scroll(width);
        Paragraph::new(input.value())
            .scroll((0, scroll as u16))
            .block(block)
            .render(area, buf);

        // Block cursor at the insertion point.
        let cursor_x = area.x + 1 + (input.visual_cursor().saturating_sub(scroll)) as u16;
        if let Some(cell) = buf.cell_mut((cursor_x.min(area.right().saturating_sub(2)), area.y + 1)) {
            cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
        }
    }

    fn render_selected_location(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Selected location ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let mut lines = Vec::new();
        match self.search.selected() {
            Some(record) => {
                let label = self.labels.resolve(&record.name);
                lines.push(Line::from(label.to_string()).fg(SELECTED_LOCATION_FG).bold());
                if label != record.name {
                    lines.push(Line::from(record.name.clone()).fg(METADATA_KEY_FG));
                }
                lines.push(Line::default());
                for (key, value) in &record.metadata {
                    let value = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    let key = if key == LOOKED_UP_AT { "looked up at" } else { key.as_str() };
                    lines.push(Line::from(vec![
                        Span::styled(format!("{key}: "), Style::default().fg(METADATA_KEY_FG)),
                        Span::raw(value),
                    ]));
                }
            }
            None => lines.push(Line::from("Pick a past lookup from the history (Tab).").fg(METADATA_KEY_FG)),
        }

        if let Some(name) = self.search.last_recorded() {
            lines.push(Line::default());
            lines.push(Line::from(format!("Recorded lookup: {name}")).fg(METADATA_KEY_FG));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
