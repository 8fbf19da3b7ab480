use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{App, InputMode};
use super::widgets::{
    charts::{draw_fee_chart, draw_scatter_chart, draw_subject_chart, draw_top_students, draw_trend_chart},
    filter_bar::draw_filter_bar,
    heatmap::draw_heatmap,
    kpi_cards::draw_kpi_cards,
    popup::{draw_detail_popup, draw_notice_popup},
    split::{draw_gender_split, draw_pass_fail_split},
    student_table::draw_student_table,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),  // Header + filters
                Constraint::Length(4),  // KPI cards
                Constraint::Min(10),    // Charts
                Constraint::Length(19), // Table + heatmap
                Constraint::Length(2),  // Help
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_filter_bar(f, chunks[0], app);
    draw_kpi_cards(f, chunks[1], app.dashboard.view());
    draw_charts(f, chunks[2], app);
    draw_bottom(f, chunks[3], app);
    draw_help(f, chunks[4], app);

    if let Some(detail) = app.dashboard.detail() {
        draw_detail_popup(f, detail);
    }
    if let Some(notice) = &app.notice {
        draw_notice_popup(f, notice);
    }
}

fn draw_charts(f: &mut Frame, area: Rect, app: &App) {
    let view = app.dashboard.view();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(28), // Subject bars
                Constraint::Percentage(28), // Trend
                Constraint::Percentage(16), // Gender
                Constraint::Percentage(28), // Fees by class
            ]
            .as_ref(),
        )
        .split(rows[0]);

    draw_subject_chart(f, top[0], view);
    draw_trend_chart(f, top[1], view);
    draw_gender_split(f, top[2], view);
    draw_fee_chart(f, top[3], view);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(40), // Scatter
                Constraint::Percentage(16), // Pass/fail
                Constraint::Percentage(44), // Top students
            ]
            .as_ref(),
        )
        .split(rows[1]);

    draw_scatter_chart(f, bottom[0], view);
    draw_pass_fail_split(f, bottom[1], view);
    draw_top_students(f, bottom[2], view);
}

fn draw_bottom(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
        .split(area);

    draw_student_table(f, chunks[0], app);
    draw_heatmap(f, chunks[1], &app.dashboard.view().heatmap);
}

fn draw_help(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| {
        Span::styled(k, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    };

    let help_text = match app.input_mode {
        InputMode::Search => vec![
            Span::raw("Searching by name: type to filter the table, ["),
            key("Enter"),
            Span::raw("/"),
            key("Esc"),
            Span::raw("] done"),
        ],
        InputMode::Normal => vec![
            Span::raw("["),
            key("q"),
            Span::raw("]uit ["),
            key("Tab"),
            Span::raw("] filter ["),
            key("←→"),
            Span::raw("] value ["),
            key("/"),
            Span::raw("] search ["),
            key("↑↓"),
            Span::raw("] row ["),
            key("Enter"),
            Span::raw("] view ["),
            key("e"),
            Span::raw("]xport ["),
            key("g"),
            Span::raw("]enerate"),
        ],
    };

    let help = Paragraph::new(Line::from(help_text))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);

    f.render_widget(help, area);
}
