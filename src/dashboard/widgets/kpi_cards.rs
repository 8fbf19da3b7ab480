use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AMBER, BLUE, GREEN, RED, VIOLET};
use crate::stats::DashboardView;

pub fn draw_kpi_cards(f: &mut Frame, area: Rect, view: &DashboardView) {
    let k = &view.kpis;
    let cards = [
        ("Total Students", k.total_display(), BLUE),
        ("Avg Percentage", k.avg_percentage_display(), VIOLET),
        ("Pass Rate", k.pass_rate_display(), GREEN),
        ("Avg Attendance", k.avg_attendance_display(), AMBER),
        ("Fees Collected", k.fees_collected_display(), GREEN),
        ("Fees Pending", k.fees_pending_display(), RED),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, cards.len() as u32); 6].as_ref())
        .split(area);

    for (chunk, (title, value, color)) in chunks.iter().zip(cards) {
        let card = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(card, *chunk);
    }
}
