pub mod charts;
pub mod filter_bar;
pub mod heatmap;
pub mod kpi_cards;
pub mod popup;
pub mod split;
pub mod student_table;

use ratatui::style::Color;

pub const BLUE: Color = Color::Rgb(37, 99, 235);
pub const VIOLET: Color = Color::Rgb(124, 58, 237);
pub const GREEN: Color = Color::Rgb(5, 150, 105);
pub const AMBER: Color = Color::Rgb(217, 119, 6);
pub const RED: Color = Color::Rgb(220, 38, 38);
pub const SLATE: Color = Color::Rgb(100, 116, 139);
