//! Framework-independent view model.
//!
//! [`render`] turns the current page, the loaded data and the user's selection
//! into a [`PageView`]. It never touches disk, so every page can be checked
//! without a window.

use std::fmt;

use crate::config::DashboardConfig;
use crate::data::error::{DataError, Severity};
use crate::data::filter::{available_months, filter_by_month, numeric_columns, project};
use crate::data::model::{ColumnChoice, Dataset, MonthKey, Projection};
use crate::data::summary::{describe, head, ColumnSummary};

// ---------------------------------------------------------------------------
// Pages and selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    TableSummary,
    InteractivePlots,
    About,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Home,
        Page::TableSummary,
        Page::InteractivePlots,
        Page::About,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::TableSummary => "Data table & summary",
            Page::InteractivePlots => "Plots (interactive)",
            Page::About => "About / Notes",
        }
    }

    /// Whether the page shows data from the CSV.
    pub fn needs_data(self) -> bool {
        matches!(self, Page::TableSummary | Page::InteractivePlots)
    }
}

/// Month and column(s) picked for the chart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// `None` means "earliest available month".
    pub month: Option<MonthKey>,
    pub column: ColumnChoice,
}

impl Selection {
    /// Replace choices that no longer exist in the data with the defaults.
    pub fn resolve(&self, months: &[MonthKey], numeric: &[String]) -> Selection {
        let month = match self.month {
            Some(m) if months.contains(&m) => Some(m),
            _ => months.first().copied(),
        };
        let column = match &self.column {
            ColumnChoice::Column(name) if !numeric.contains(name) => {
                log::warn!("Column '{name}' is not available, showing all columns");
                ColumnChoice::All
            }
            other => other.clone(),
        };
        Selection { month, column }
    }
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

/// A message shown to the user instead of crashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl From<&DataError> for Notice {
    fn from(err: &DataError) -> Self {
        Self {
            severity: err.severity(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// ---------------------------------------------------------------------------
// Page view model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub head: Dataset,
    pub summary: Vec<ColumnSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotView {
    pub months: Vec<MonthKey>,
    pub numeric_columns: Vec<String>,
    /// Selection after falling back to defaults.
    pub selection: Selection,
    /// Rows in the selected month.
    pub row_count: usize,
    pub projection: Projection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    Home { data_path: String },
    Table(TableView),
    Plots(PlotView),
    About,
    /// Data could not be shown; see the notices.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub page: Page,
    pub body: PageBody,
    pub notices: Vec<Notice>,
}

/// Build the view for `page`.
///
/// `loaded` is the outcome of loading the CSV; pages that do not show data
/// ignore it and may be given `None`.
pub fn render(
    page: Page,
    loaded: Option<Result<&Dataset, &DataError>>,
    selection: &Selection,
    config: &DashboardConfig,
) -> PageView {
    let mut notices = Vec::new();

    let body = match page {
        Page::Home => PageBody::Home {
            data_path: config.data_path.display().to_string(),
        },
        Page::About => PageBody::About,
        Page::TableSummary | Page::InteractivePlots => match loaded {
            None => PageBody::Unavailable,
            Some(Err(err)) => {
                notices.push(Notice::from(err));
                PageBody::Unavailable
            }
            Some(Ok(dataset)) if page == Page::TableSummary => PageBody::Table(TableView {
                head: head(dataset, config.head_rows),
                summary: describe(dataset),
            }),
            Some(Ok(dataset)) => render_plots(dataset, selection, &mut notices),
        },
    };

    PageView {
        page,
        body,
        notices,
    }
}

fn render_plots(dataset: &Dataset, selection: &Selection, notices: &mut Vec<Notice>) -> PageBody {
    if !dataset.has_time_column() {
        notices.push(Notice::from(&DataError::MissingColumn {
            column: dataset.time_column.clone(),
        }));
        return PageBody::Unavailable;
    }

    let months = available_months(dataset);
    let numeric = numeric_columns(dataset);
    let selection = selection.resolve(&months, &numeric);

    let Some(month) = selection.month else {
        notices.push(Notice::warning("The dataset has no timestamped rows to plot."));
        return PageBody::Plots(PlotView {
            months,
            numeric_columns: numeric,
            selection,
            row_count: 0,
            projection: Projection::default(),
        });
    };

    let filtered = filter_by_month(dataset, month);
    let projection = match project(&filtered, &numeric, &selection.column) {
        Ok(projection) => projection,
        Err(err) => {
            notices.push(Notice::from(&err));
            Projection::default()
        }
    };

    PageBody::Plots(PlotView {
        months,
        numeric_columns: numeric,
        selection,
        row_count: filtered.len(),
        projection,
    })
}
