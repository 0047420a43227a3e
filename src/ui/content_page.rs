use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::catalog::{CatalogEntry, EntryKind};
use crate::locator::Locator;

pub fn render_content_page(
    frame: &mut Frame,
    area: Rect,
    locator: &Locator,
    entry: Option<&CatalogEntry>,
) {
    let block = Block::default().borders(Borders::TOP);

    let mut lines: Vec<Line> = Vec::new();
    match entry {
        Some(entry) => {
            let kind = match entry.kind {
                EntryKind::File => "file",
                EntryKind::Channel => "channel",
            };
            lines.push(Line::from(Span::styled(
                entry.title.clone(),
                Style::default().fg(Color::Cyan).bold(),
            )));
            lines.push(Line::from(vec![
                Span::styled(locator.to_string(), Style::default().fg(Color::DarkGray)),
                Span::raw("  "),
                Span::styled(kind, Style::default().fg(Color::Green)),
            ]));
            if !entry.tags.is_empty() {
                lines.push(Line::from(Span::styled(
                    entry.tags.join(", "),
                    Style::default().fg(Color::Yellow),
                )));
            }
            lines.push(Line::raw(""));
            if entry.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    "No description.",
                    Style::default().dim(),
                )));
            } else {
                lines.push(Line::raw(entry.description.clone()));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                locator.to_string(),
                Style::default().fg(Color::Cyan).bold(),
            )));
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                "Not in this library.",
                Style::default().dim(),
            )));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
