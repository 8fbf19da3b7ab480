use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Export was requested for a view with zero records.
    #[error("No data available to export.")]
    EmptyExport,

    #[error("invalid {field} selection: {value:?}")]
    InvalidSelection { field: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
