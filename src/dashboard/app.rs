use crate::controller::Dashboard;
use crate::error::DashboardError;
use crate::filter::FilterField;
use chrono::{DateTime, Local};
use log::{debug, info};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// Modal message; swallows the next key press.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

pub struct App {
    pub dashboard: Dashboard,
    pub output_dir: PathBuf,
    pub focus: FilterField,
    pub input_mode: InputMode,
    pub search_input: String,
    pub selected_row: usize,
    pub notice: Option<Notice>,
    pub last_update: DateTime<Local>,
}

impl App {
    pub fn new(dashboard: Dashboard, output_dir: PathBuf) -> Self {
        Self {
            dashboard,
            output_dir,
            focus: FilterField::Year,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            selected_row: 0,
            notice: None,
            last_update: Local::now(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Change the focused filter and redraw everything from the new subset.
    pub fn cycle_focused_filter(&mut self, forward: bool) {
        self.dashboard.cycle_filter(self.focus, forward);
        self.search_input.clear();
        self.clamp_selection();
        self.touch();
    }

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.run_search();
    }

    pub fn pop_search_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.run_search();
        }
    }

    fn run_search(&mut self) {
        self.dashboard.search(&self.search_input);
        self.selected_row = 0;
        self.touch();
    }

    /// Leave search mode, keeping whatever the table currently lists.
    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn select_next_row(&mut self) {
        let rows = self.dashboard.view().table.len();
        if self.selected_row + 1 < rows {
            self.selected_row += 1;
        }
    }

    pub fn select_prev_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let rows = self.dashboard.view().table.len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    /// The "View" action of the highlighted row.
    pub fn open_selected_detail(&mut self) {
        let id = self
            .dashboard
            .view()
            .table
            .get(self.selected_row)
            .map(|row| row.action_id.clone());
        if let Some(id) = id {
            if !self.dashboard.show_detail(&id) {
                debug!("No record for {}", id);
            }
        }
    }

    pub fn has_popup(&self) -> bool {
        self.notice.is_some() || self.dashboard.detail().is_some()
    }

    /// Close the topmost popup: a notice first, then the detail panel.
    pub fn close_popup(&mut self) {
        if self.notice.take().is_none() {
            self.dashboard.close_detail();
        }
    }

    pub fn export(&mut self) {
        let date = Local::now().date_naive();
        self.notice = Some(match self.dashboard.export_to(&self.output_dir, date) {
            Ok(path) => {
                info!("Report written to {}", path.display());
                Notice {
                    kind: NoticeKind::Info,
                    title: "Export".to_string(),
                    message: format!(
                        "Saved {} records to {}",
                        self.dashboard.export_set().len(),
                        path.display()
                    ),
                }
            }
            Err(err @ DashboardError::EmptyExport) => Notice {
                kind: NoticeKind::Warning,
                title: "Export".to_string(),
                message: err.to_string(),
            },
            Err(err) => Notice {
                kind: NoticeKind::Warning,
                title: "Export failed".to_string(),
                message: err.to_string(),
            },
        });
    }

    pub fn regenerate(&mut self) {
        self.dashboard.regenerate();
        self.search_input.clear();
        self.selected_row = 0;
        self.touch();
    }

    fn touch(&mut self) {
        self.last_update = Local::now();
    }
}
