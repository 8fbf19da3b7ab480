use crate::error::Result;
use crate::export;
use crate::filter::{FilterField, FilterSelection};
use crate::generator::RecordGenerator;
use crate::models::StudentRecord;
use crate::stats::{self, DashboardView, HeatmapMode};
use crate::table::{self, DetailView};
use chrono::NaiveDate;
use log::debug;
use std::path::{Path, PathBuf};

/// Owns the session's records and everything derived from them.
///
/// `records` is the full generated set. `last_filtered` is the most recent
/// result of [`Dashboard::apply_filters`]; it stays `None` until a filter
/// has been applied, and export falls back to the full set in that case.
pub struct Dashboard {
    generator: RecordGenerator,
    heatmap_mode: HeatmapMode,
    records: Vec<StudentRecord>,
    filters: FilterSelection,
    last_filtered: Option<Vec<StudentRecord>>,
    view: DashboardView,
    search: String,
    detail: Option<DetailView>,
}

impl Dashboard {
    pub fn new(mut generator: RecordGenerator, heatmap_mode: HeatmapMode) -> Self {
        let records = generator.generate();
        let view = stats::render(&records, heatmap_mode, &mut generator);
        Self {
            generator,
            heatmap_mode,
            records,
            filters: FilterSelection::default(),
            last_filtered: None,
            view,
            search: String::new(),
            detail: None,
        }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn heatmap_mode(&self) -> HeatmapMode {
        self.heatmap_mode
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    /// Replace every record with a fresh set and redraw. If filters have
    /// been applied before they are applied again to the new records.
    pub fn regenerate(&mut self) {
        self.generator.generate_into(&mut self.records);
        self.detail = None;
        self.search.clear();
        if self.last_filtered.is_some() {
            self.apply_filters();
        } else {
            self.render_full();
        }
    }

    pub fn set_filters(&mut self, filters: FilterSelection) {
        self.filters = filters;
    }

    /// Step one filter control and re-apply.
    pub fn cycle_filter(&mut self, field: FilterField, forward: bool) -> &DashboardView {
        self.filters.cycle(field, forward);
        self.apply_filters()
    }

    pub fn apply_filters(&mut self) -> &DashboardView {
        let filtered = self.filters.apply(&self.records);
        debug!("Filters matched {} of {} records", filtered.len(), self.records.len());
        self.view = stats::render(&filtered, self.heatmap_mode, &mut self.generator);
        self.last_filtered = Some(filtered);
        // The table now lists the filtered set, so any earlier search no longer applies.
        self.search.clear();
        &self.view
    }

    fn render_full(&mut self) {
        self.view = stats::render(&self.records, self.heatmap_mode, &mut self.generator);
    }

    /// Re-list the table from a name search over the full record set.
    /// Only the table changes; the rest of the view is left alone.
    pub fn search(&mut self, term: &str) {
        self.search = term.to_string();
        let hits = table::search_by_name(&self.records, term);
        debug!("Search {:?} matched {} records", term, hits.len());
        self.view.table = table::table_rows(hits);
    }

    /// Open the detail panel for `id`. Unknown ids leave the panel as it was.
    pub fn show_detail(&mut self, id: &str) -> bool {
        match table::detail_view(&self.records, id) {
            Some(detail) => {
                self.detail = Some(detail);
                true
            }
            None => false,
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Records the export action would write.
    pub fn export_set(&self) -> &[StudentRecord] {
        self.last_filtered.as_deref().unwrap_or(&self.records)
    }

    pub fn export_to(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
        export::write_report(dir, self.export_set(), date)
    }
}
