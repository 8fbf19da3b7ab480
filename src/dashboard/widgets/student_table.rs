use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use super::{GREEN, RED};
use crate::dashboard::app::{App, InputMode};
use crate::models::FeeStatus;

pub fn draw_student_table(f: &mut Frame, area: Rect, app: &App) {
    let view = app.dashboard.view();

    let header = Row::new(["ID", "Name", "Class", "Att.", "Score", "Result", "Fees", ""])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = view
        .table
        .iter()
        .map(|row| {
            let result_color = if row.result.passed { GREEN } else { RED };
            let fee_color = match row.fee_status {
                FeeStatus::Paid => GREEN,
                FeeStatus::Pending => Color::Yellow,
            };
            Row::new(vec![
                Cell::from(row.id_label.as_str()),
                Cell::from(row.name.as_str()),
                Cell::from(row.class_section.as_str()),
                Cell::from(row.attendance.as_str()),
                Cell::from(row.score.as_str()),
                Cell::from(Span::styled(
                    row.result.text.as_str(),
                    Style::default().fg(result_color).add_modifier(Modifier::BOLD),
                )),
                Cell::from(Span::styled(row.fee_status.to_string(), Style::default().fg(fee_color))),
                Cell::from(Span::styled("[View]", Style::default().fg(Color::Cyan))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(9),
        Constraint::Min(12),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(6),
    ];

    let title = match (app.input_mode, app.dashboard.search_term()) {
        (InputMode::Search, _) => format!(" Search: {}_ ", app.search_input),
        (InputMode::Normal, "") => format!(" Students ({} shown) ", view.table.len()),
        (InputMode::Normal, term) => format!(" Students matching \"{}\" ({}) ", term, view.table.len()),
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = if view.table.is_empty() {
        TableState::default()
    } else {
        TableState::default().with_selected(Some(app.selected_row))
    };

    f.render_stateful_widget(table, area, &mut state);
}
