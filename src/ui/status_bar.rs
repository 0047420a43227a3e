use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render_status_bar(frame: &mut Frame, area: Rect, bar_focused: bool, can_go_back: bool) {
    let hints = if bar_focused {
        Line::from(vec![
            Span::styled(" ↑↓ ", Style::default().bold()),
            Span::raw("suggestions  "),
            Span::styled("⏎ ", Style::default().bold()),
            Span::raw("go  "),
            Span::styled("⎋ ", Style::default().bold()),
            Span::raw("dismiss"),
        ])
    } else {
        let mut spans = vec![
            Span::raw("type to search  "),
            Span::styled("↑↓ ", Style::default().bold()),
            Span::raw("navigate  "),
            Span::styled("⏎ ", Style::default().bold()),
            Span::raw("open  "),
        ];
        if can_go_back {
            spans.push(Span::styled("⌫ ", Style::default().bold()));
            spans.push(Span::raw("back  "));
        }
        spans.push(Span::styled("⎋ ", Style::default().bold()));
        spans.push(Span::raw(if can_go_back { "back" } else { "quit" }));
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(hints).style(Style::default().dim()), area);
}
