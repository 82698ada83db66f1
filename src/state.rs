use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::data::filter::Filters;
use crate::data::loader::TableCache;
use crate::data::model::PaperTable;
use crate::data::stats::{journal_options, JOURNAL_OPTION_COUNT};
use crate::view::DashboardView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// "Use local cleaned sample" toggle.
    pub use_sample: bool,

    /// File chosen through File → Open…, replacing the sample path.
    pub opened_path: Option<PathBuf>,

    /// Loaded tables, kept for the whole process.
    cache: TableCache,

    /// Table of the current pass (None until a load succeeds).
    pub table: Option<Arc<PaperTable>>,

    /// Quick-filter choices derived from `table`.
    pub journal_options: Vec<String>,

    pub filters: Filters,

    /// Output of the latest pass.
    pub view: Option<DashboardView>,

    /// Load failure shown instead of the dashboard.
    pub load_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            use_sample: !settings.no_sample,
            settings,
            opened_path: None,
            cache: TableCache::new(),
            table: None,
            journal_options: Vec::new(),
            filters: Filters::default(),
            view: None,
            load_error: None,
        }
    }

    /// Fetch the table for the current source settings. Cheap after the
    /// first call for a given request.
    pub fn load(&mut self) {
        let request = self
            .settings
            .load_request(self.use_sample, self.opened_path.as_ref());

        match self.cache.get_or_load(&request) {
            Ok(table) => {
                let changed = self
                    .table
                    .as_ref()
                    .map_or(true, |current| !Arc::ptr_eq(current, &table));
                if changed {
                    self.set_table(table);
                }
                self.load_error = None;
            }
            Err(e) => {
                let msg = e.to_string();
                if self.load_error.as_deref() != Some(msg.as_str()) {
                    log::error!("Failed to load paper table: {msg}");
                }
                self.load_error = Some(msg);
                self.table = None;
                self.view = None;
            }
        }
    }

    /// Ingest a newly loaded table, re-deriving selector choices and bounds.
    fn set_table(&mut self, table: Arc<PaperTable>) {
        self.journal_options = journal_options(&table, JOURNAL_OPTION_COUNT);
        self.filters.reconcile(&table, &self.journal_options);
        self.table = Some(table);
    }

    /// Recompute the dashboard from the table and current filters.
    pub fn recompute(&mut self) {
        self.view = self
            .table
            .as_ref()
            .map(|table| DashboardView::compute(table, &self.filters));
    }

    /// Switch to a file picked by the user.
    pub fn open_path(&mut self, path: PathBuf) {
        log::info!("Opening {}", path.display());
        self.opened_path = Some(path);
        self.load();
    }
}
