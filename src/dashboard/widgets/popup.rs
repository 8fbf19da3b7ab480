use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::dashboard::app::{Notice, NoticeKind};
use crate::table::DetailView;

/// Rect of `width` x `height` cells centered in `area`, clipped to it.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length((area.height - height) / 2),
                Constraint::Length(height),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Length((area.width - width) / 2),
                Constraint::Length(width),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(vertical[1])[1]
}

pub fn draw_detail_popup(f: &mut Frame, detail: &DetailView) {
    let label_width = detail.fields.iter().map(|d| d.label.len()).max().unwrap_or(0);

    let mut lines: Vec<Line> = detail
        .fields
        .iter()
        .map(|field| {
            let value_style = match (field.label, field.value.as_str()) {
                ("Status", "Pass") => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ("Status", _) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                _ => Style::default().fg(Color::White),
            };
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", field.label, width = label_width),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(field.value.clone(), value_style),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Esc] close",
        Style::default().fg(Color::DarkGray),
    )));

    let area = centered_rect(48, lines.len() as u16 + 2, f.size());
    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" Student Details: {} ", detail.id))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

pub fn draw_notice_popup(f: &mut Frame, notice: &Notice) {
    let color = match notice.kind {
        NoticeKind::Info => Color::Green,
        NoticeKind::Warning => Color::Yellow,
    };

    let area = centered_rect(56, 7, f.size());
    let popup = Paragraph::new(vec![
        Line::from(notice.message.as_str()),
        Line::from(""),
        Line::from(Span::styled("[Enter] ok", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(format!(" {} ", notice.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
    );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_centered() {
        let r = centered_rect(20, 10, Rect::new(0, 0, 100, 50));
        assert_eq!(r, Rect::new(40, 20, 20, 10));
    }

    #[test]
    fn test_centered_rect_clips_to_area() {
        let area = Rect::new(0, 0, 30, 8);
        let r = centered_rect(48, 12, area);
        assert_eq!(r.width, 30);
        assert_eq!(r.height, 8);
    }
}
