use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use super::{AMBER, GREEN, RED};
use crate::models::{Choice, Subject};
use crate::stats::{HeatBand, Heatmap, HeatmapCell, HeatmapMode};

fn band_rgb(band: HeatBand) -> (u8, u8, u8) {
    let color = match band {
        HeatBand::High => GREEN,
        HeatBand::Medium => AMBER,
        HeatBand::Low => RED,
    };
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (128, 128, 128),
    }
}

/// Band color faded toward white as intensity drops.
fn cell_style(cell: &HeatmapCell) -> Style {
    let t = cell.intensity();
    let (r, g, b) = band_rgb(cell.band);
    let mix = |c: u8| (255.0 - (255.0 - c as f64) * t).round() as u8;
    let fg = if t > 0.5 { Color::White } else { Color::Black };
    Style::default()
        .bg(Color::Rgb(mix(r), mix(g), mix(b)))
        .fg(fg)
        .add_modifier(Modifier::BOLD)
}

pub fn draw_heatmap(f: &mut Frame, area: Rect, heatmap: &Heatmap) {
    let header = Row::new(
        std::iter::once(Cell::from("Class")).chain(
            Subject::VARIANTS
                .iter()
                .map(|s| Cell::from(Line::from(s.label()).alignment(Alignment::Center))),
        ),
    )
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let rows: Vec<Row> = heatmap
        .rows()
        .into_iter()
        .map(|(class, cells)| {
            let mut row_cells = vec![Cell::from(Span::styled(
                class.label(),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            row_cells.extend(cells.iter().map(|cell| {
                Cell::from(Line::from(format!("{}%", cell.value)).alignment(Alignment::Center))
                    .style(cell_style(cell))
            }));
            Row::new(row_cells).height(2).bottom_margin(1)
        })
        .collect();

    let mut widths = vec![Constraint::Length(6)];
    widths.extend(Subject::VARIANTS.iter().map(|_| Constraint::Ratio(1, Subject::VARIANTS.len() as u32)));

    let title = match heatmap.mode {
        HeatmapMode::ClassAverage => " Class x Subject (overall %) ",
        HeatmapMode::Placeholder => " Class x Subject (placeholder) ",
    };

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().title(title).borders(Borders::ALL));

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassLevel;

    fn cell(value: u32) -> HeatmapCell {
        HeatmapCell {
            class: ClassLevel::Tenth,
            subject: Subject::Science,
            value,
            band: HeatBand::for_value(value),
        }
    }

    #[test]
    fn test_faded_cells_are_white_with_dark_text() {
        let style = cell_style(&cell(30));
        assert_eq!(style.bg, Some(Color::Rgb(255, 255, 255)));
        assert_eq!(style.fg, Some(Color::Black));
    }

    #[test]
    fn test_strong_cells_use_band_color_with_light_text() {
        let style = cell_style(&cell(100));
        assert_eq!(style.bg, Some(GREEN));
        assert_eq!(style.fg, Some(Color::White));
    }
}
