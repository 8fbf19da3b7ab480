use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::{BLUE, GREEN, RED, VIOLET};
use crate::stats::DashboardView;

/// Two-slice share: a gauge for the first slice and a legend with counts.
fn draw_split(
    f: &mut Frame,
    area: Rect,
    title: &str,
    first: (&str, usize, Color),
    second: (&str, usize, Color),
) {
    let block = Block::default().title(format!(" {} ", title)).borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)].as_ref())
        .split(inner);

    let total = first.1 + second.1;
    let ratio = if total == 0 {
        0.0
    } else {
        first.1 as f64 / total as f64
    };

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(first.2).bg(second.2))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    f.render_widget(gauge, chunks[0]);

    let legend = vec![
        Line::from(vec![
            Span::styled("■ ", Style::default().fg(first.2)),
            Span::raw(format!("{}: {}", first.0, first.1)),
        ]),
        Line::from(vec![
            Span::styled("■ ", Style::default().fg(second.2)),
            Span::raw(format!("{}: {}", second.0, second.1)),
        ]),
    ];
    f.render_widget(Paragraph::new(legend), chunks[2]);
}

pub fn draw_gender_split(f: &mut Frame, area: Rect, view: &DashboardView) {
    let g = &view.gender;
    draw_split(
        f,
        area,
        "Gender Distribution",
        ("Male", g.male, BLUE),
        ("Female", g.female, VIOLET),
    );
}

pub fn draw_pass_fail_split(f: &mut Frame, area: Rect, view: &DashboardView) {
    let pf = &view.pass_fail;
    draw_split(
        f,
        area,
        "Pass / Fail",
        ("Pass", pf.pass, GREEN),
        ("Fail", pf.fail, RED),
    );
}
