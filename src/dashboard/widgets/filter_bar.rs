use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dashboard::app::App;
use crate::filter::FilterField;

pub fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let filters = app.dashboard.filters();
    let mut spans = Vec::new();

    for (i, field) in FilterField::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }
        let focused = *field == app.focus;
        let value_style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::raw(format!("{}: ", field.label())));
        spans.push(Span::styled(format!(" {} ▼", filters.value_label(*field)), value_style));
    }

    spans.push(Span::raw(" │ Updated: "));
    spans.push(Span::raw(app.last_update.format("%H:%M:%S").to_string()));

    let header = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title(format!(" Student Analytics Dashboard (seed {}) ", app.dashboard.seed()))
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(header, area);
}
