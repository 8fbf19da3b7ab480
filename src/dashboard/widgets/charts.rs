use ratatui::{
    layout::{Direction, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::{AMBER, BLUE, GREEN, RED, SLATE, VIOLET};
use crate::formatters::{format_fixed, truncate_to_width};
use crate::models::{Choice, Subject};
use crate::stats::DashboardView;

const SUBJECT_COLORS: [Color; 4] = [BLUE, VIOLET, GREEN, AMBER];

fn subject_short(subject: Subject) -> &'static str {
    match subject {
        Subject::Mathematics => "Math",
        Subject::Science => "Sci",
        Subject::English => "Eng",
        Subject::SocialStudies => "SocSt",
    }
}

pub fn draw_subject_chart(f: &mut Frame, area: Rect, view: &DashboardView) {
    let bars: Vec<Bar> = view
        .subject_averages
        .iter()
        .enumerate()
        .map(|(i, avg)| {
            let color = SUBJECT_COLORS[i % SUBJECT_COLORS.len()];
            Bar::default()
                .value(avg.value as u64)
                .label(Line::from(subject_short(avg.subject)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::White).bg(color).add_modifier(Modifier::BOLD))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().title(" Avg Marks by Subject ").borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1)
        .max(100);

    f.render_widget(chart, area);
}

pub fn draw_trend_chart(f: &mut Frame, area: Rect, view: &DashboardView) {
    let points: Vec<(f64, f64)> = view
        .trend
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min).min(0.0);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max).max(100.0);

    let x_labels: Vec<Span> = view.trend.iter().map(|p| Span::raw(p.label)).collect();
    let y_labels: Vec<Span> = (0..=4)
        .map(|i| Span::raw(format_fixed(min + (max - min) * i as f64 / 4.0, 0)))
        .collect();

    let datasets = vec![Dataset::default()
        .name("Avg %")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(BLUE))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(Block::default().title(" Performance Trend ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .labels(x_labels)
                .bounds([0.0, (points.len().max(2) - 1) as f64]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .labels(y_labels)
                .bounds([min, max]),
        );

    f.render_widget(chart, area);
}

/// Rows of a stacked column: (paid rows, pending rows) out of `rows`,
/// scaled against the tallest class total.
fn stacked_rows(paid: f64, pending: f64, max_total: f64, rows: u16) -> (u16, u16) {
    if max_total <= 0.0 || rows == 0 {
        return (0, 0);
    }
    let scale = |v: f64| ((v / max_total * rows as f64).round() as u16).min(rows);
    let total = scale(paid + pending);
    let paid = scale(paid).min(total);
    (paid, total - paid)
}

/// One stacked column per class: paid at the bottom, pending on top.
pub fn draw_fee_chart(f: &mut Frame, area: Rect, view: &DashboardView) {
    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" Fees by Class, ₹M ("),
            Span::styled("paid", Style::default().fg(GREEN)),
            Span::raw(" + "),
            Span::styled("pending", Style::default().fg(RED)),
            Span::raw(") "),
        ]))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let classes = &view.fees_by_class;
    if classes.is_empty() || inner.width == 0 {
        return;
    }

    // Two rows below the columns: amounts, then the class label.
    let chart_rows = inner.height.saturating_sub(2);
    let col_width = (inner.width as usize / classes.len()).max(1);
    let bar_width = col_width.saturating_sub(2).clamp(1, 6).min(col_width);
    let pad_left = (col_width - bar_width) / 2;
    let pad_right = col_width - bar_width - pad_left;

    let max_total = classes
        .iter()
        .map(|c| c.paid_millions + c.pending_millions)
        .fold(0.0, f64::max);
    let heights: Vec<(u16, u16)> = classes
        .iter()
        .map(|c| stacked_rows(c.paid_millions, c.pending_millions, max_total, chart_rows))
        .collect();

    let mut lines: Vec<Line> = Vec::with_capacity(inner.height as usize);
    for row in 0..chart_rows {
        let level = chart_rows - row;
        let mut spans = Vec::with_capacity(classes.len() * 3);
        for &(paid, pending) in &heights {
            let fill = if level <= paid {
                Some(GREEN)
            } else if level <= paid + pending {
                Some(RED)
            } else {
                None
            };
            spans.push(Span::raw(" ".repeat(pad_left)));
            spans.push(match fill {
                Some(color) => Span::styled("█".repeat(bar_width), Style::default().fg(color)),
                None => Span::raw(" ".repeat(bar_width)),
            });
            spans.push(Span::raw(" ".repeat(pad_right)));
        }
        lines.push(Line::from(spans));
    }

    let centered = |text: String| {
        format!("{:^width$}", truncate_to_width(&text, col_width), width = col_width)
    };
    let amounts: Vec<Span> = classes
        .iter()
        .map(|c| {
            Span::styled(
                centered(format!(
                    "{}/{}",
                    format_fixed(c.paid_millions, 1),
                    format_fixed(c.pending_millions, 1)
                )),
                Style::default().fg(Color::Gray),
            )
        })
        .collect();
    let labels: Vec<Span> = classes
        .iter()
        .map(|c| Span::raw(centered(c.class.label().to_string())))
        .collect();
    lines.push(Line::from(amounts));
    lines.push(Line::from(labels));

    f.render_widget(Paragraph::new(lines), inner);
}

pub fn draw_scatter_chart(f: &mut Frame, area: Rect, view: &DashboardView) {
    let points: Vec<(f64, f64)> = view
        .scatter
        .iter()
        .map(|p| (p.attendance as f64, p.percentage as f64))
        .collect();

    let datasets = vec![Dataset::default()
        .name("Students")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(BLUE))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" Attendance vs Percentage (first {}) ", points.len()))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("Attendance %")
                .style(Style::default().fg(Color::Gray))
                .labels(vec![Span::raw("50"), Span::raw("75"), Span::raw("100")])
                .bounds([50.0, 100.0]),
        )
        .y_axis(
            Axis::default()
                .title("Score %")
                .style(Style::default().fg(Color::Gray))
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")])
                .bounds([0.0, 100.0]),
        );

    f.render_widget(chart, area);
}

pub fn draw_top_students(f: &mut Frame, area: Rect, view: &DashboardView) {
    let bars: Vec<Bar> = view
        .top_students
        .iter()
        .map(|s| {
            Bar::default()
                .value(s.percentage as u64)
                .label(Line::from(truncate_to_width(&s.name, 11)))
                .text_value(format!("{}%", s.percentage))
                .style(Style::default().fg(VIOLET))
                .value_style(Style::default().fg(Color::White).bg(VIOLET))
        })
        .collect();

    let title = if bars.is_empty() {
        " Top Students (no data) "
    } else {
        " Top Students "
    };

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SLATE)),
        )
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .max(100);

    f.render_widget(chart, area);
}
