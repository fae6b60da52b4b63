use std::path::PathBuf;

use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::model::{ColumnChoice, MonthKey};
use crate::view::{render, Page, PageBody, PageView, Selection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Active configuration; `data_path` follows File → Open.
    pub config: DashboardConfig,

    /// Loaded datasets keyed by path.
    pub cache: DatasetCache,

    /// Page picked in the sidebar.
    pub page: Page,

    /// Month / column picked on the plots page.
    pub selection: Selection,

    /// View model for the current page (cached until something changes).
    pub view: PageView,

    /// "N rows × M columns" for the loaded file, if any.
    pub dataset_status: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = Self {
            view: render(Page::Home, None, &Selection::default(), &config),
            config,
            cache: DatasetCache::new(),
            page: Page::Home,
            selection: Selection::default(),
            dataset_status: None,
        };
        state.refresh();
        state
    }

    /// Recompute the view after any change to page, selection or data.
    /// Only pages that show data touch the cache.
    pub fn refresh(&mut self) {
        let loaded = if self.page.needs_data() {
            Some(
                self.cache
                    .get_or_load(&self.config.data_path, &self.config.time_column),
            )
        } else {
            None
        };

        match &loaded {
            Some(Ok(ds)) => {
                self.dataset_status = Some(format!(
                    "{} rows × {} columns",
                    ds.len(),
                    ds.column_names.len()
                ));
            }
            Some(Err(e)) => {
                log::error!("Failed to load {}: {e}", self.config.data_path.display());
                self.dataset_status = None;
            }
            None => {}
        }

        self.view = render(
            self.page,
            loaded.as_ref().map(|r| r.as_ref().map(|ds| &**ds)),
            &self.selection,
            &self.config,
        );

        // Keep the fallback choices so the pickers show what is plotted.
        if let PageBody::Plots(plot) = &self.view.body {
            self.selection = plot.selection.clone();
        }
    }

    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            self.page = page;
            self.refresh();
        }
    }

    pub fn set_month(&mut self, month: MonthKey) {
        self.selection.month = Some(month);
        self.refresh();
    }

    pub fn set_column(&mut self, column: ColumnChoice) {
        self.selection.column = column;
        self.refresh();
    }

    /// Switch to another CSV file. The file being left is evicted from the
    /// cache, so only the active file stays in memory and reopening a file
    /// always reads it afresh. The previous selection is dropped.
    pub fn open_path(&mut self, path: PathBuf) {
        log::info!("Switching data source to {}", path.display());
        self.cache.invalidate(&self.config.data_path);
        self.config.data_path = path;
        self.selection = Selection::default();
        self.dataset_status = None;
        self.refresh();
    }

    /// Re-read the current file from disk.
    pub fn reload(&mut self) {
        self.cache.invalidate(&self.config.data_path);
        self.dataset_status = None;
        self.refresh();
    }
}
