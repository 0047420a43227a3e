use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::omnibar::Omnibar;
use crate::suggest::{Suggestion, SuggestionKind};

const PLACEHOLDER: &str = "Search, or enter a rove:// address";

pub fn render_omnibar(frame: &mut Frame, area: Rect, bar: &Omnibar) {
    let mut spans = vec![Span::styled("» ", Style::default().fg(Color::Cyan).bold())];

    if bar.value().is_empty() && !bar.is_focused() {
        spans.push(Span::styled(PLACEHOLDER, Style::default().dim()));
    } else if bar.is_focused() && bar.has_selection() {
        // Whole value selected: the next keystroke replaces it.
        spans.push(Span::styled(
            bar.value().to_string(),
            Style::default().bg(Color::White).fg(Color::Black),
        ));
    } else if bar.is_focused() {
        spans.extend(value_with_cursor(bar.value(), bar.cursor()));
    } else {
        spans.push(Span::raw(bar.value()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Field text with a block cursor at the edit position.
fn value_with_cursor(value: &str, cursor: usize) -> Vec<Span<'static>> {
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
    let chars: Vec<char> = value.chars().collect();

    if chars.is_empty() {
        return vec![Span::styled("█", cursor_style)];
    }

    let mut spans = Vec::new();
    if cursor > 0 {
        spans.push(Span::raw(
            chars[..cursor.min(chars.len())].iter().collect::<String>(),
        ));
    }
    if cursor < chars.len() {
        spans.push(Span::styled(chars[cursor].to_string(), cursor_style));
        if cursor + 1 < chars.len() {
            spans.push(Span::raw(chars[cursor + 1..].iter().collect::<String>()));
        }
    } else {
        spans.push(Span::styled("█", cursor_style));
    }
    spans
}

pub fn render_suggestions(
    frame: &mut Frame,
    area: Rect,
    suggestions: &[Suggestion],
    selected: Option<usize>,
) {
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = Vec::new();
    for (i, suggestion) in suggestions.iter().take(area.height as usize).enumerate() {
        let is_selected = selected == Some(i);
        let cursor = if is_selected { "❯ " } else { "  " };

        let marker = match suggestion.kind {
            SuggestionKind::Search => Span::styled("search ", Style::default().fg(Color::Yellow)),
            SuggestionKind::File => Span::styled("open   ", Style::default().fg(Color::Green)),
            SuggestionKind::Channel => Span::styled("channel", Style::default().fg(Color::Magenta)),
        };

        let value_style = if is_selected {
            Style::default().bold()
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(cursor, value_style),
            marker,
            Span::raw(" "),
            Span::styled(suggestion.value.clone(), value_style),
        ]));
    }

    let paragraph = Paragraph::new(Text::from(lines)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}
