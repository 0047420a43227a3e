use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::catalog::CatalogEntry;
use std::collections::HashSet;

pub fn render_entry_list(
    frame: &mut Frame,
    area: Rect,
    entries: &[CatalogEntry],
    indices: &[usize],
    selected_index: usize,
    scroll_offset: usize,
    visited: &HashSet<String>,
    empty_note: &str,
) {
    if indices.is_empty() {
        let note = Paragraph::new(Line::from(Span::styled(empty_note, Style::default().dim())));
        frame.render_widget(note, area);
        return;
    }

    let visible_height = area.height as usize;
    let mut lines: Vec<Line> = Vec::new();

    for (display_i, &entry_i) in indices
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
    {
        let entry = &entries[entry_i];
        let locator = entry.locator.to_string();
        let is_selected = display_i == selected_index;
        let is_visited = visited.contains(&locator);

        let dot = if is_visited { "● " } else { "  " };
        let cursor = if is_selected { "❯ " } else { "  " };

        let line = Line::from(vec![
            Span::styled(
                cursor,
                if is_selected {
                    Style::default().bold()
                } else {
                    Style::default()
                },
            ),
            Span::styled(dot, Style::default().fg(Color::Green)),
            Span::styled(
                format!("{:<28}", &entry.title),
                if is_selected {
                    Style::default().bold()
                } else {
                    Style::default()
                },
            ),
            Span::styled(locator, Style::default().fg(Color::DarkGray)),
        ]);
        lines.push(line);
    }

    let paragraph = Paragraph::new(Text::from(lines));
    frame.render_widget(paragraph, area);
}
