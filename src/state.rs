use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::GenreColors;
use crate::data::error::DataError;
use crate::data::loader::TableCache;
use crate::data::model::TrackTable;
use crate::view::{render_with, TableStats, UiState, ViewModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded table (None until a load succeeds).
    pub table: Option<Arc<TrackTable>>,

    /// Path the current table (or the last failed load) came from.
    pub source_path: Option<PathBuf>,

    /// Summary and slider bounds of `table`, computed once in `set_table`.
    pub stats: Option<TableStats>,

    /// Current widget values.
    pub ui: UiState,

    /// Views for `rendered_for`; recomputed when `ui` differs from it.
    view: Option<ViewModel>,
    rendered_for: Option<UiState>,

    /// Colour per genre, shared by the scatter and histogram tabs.
    pub genre_colors: GenreColors,

    /// Fatal load error; the page shows it instead of the views.
    pub load_error: Option<DataError>,
}

impl AppState {
    /// Load `path` through the shared cache and reset the widgets for it.
    pub fn open(&mut self, path: &Path) {
        self.open_with(TableCache::shared(), path);
    }

    pub fn open_with(&mut self, cache: &TableCache, path: &Path) {
        self.source_path = Some(path.to_path_buf());
        match cache.load(path) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                self.table = None;
                self.stats = None;
                self.view = None;
                self.rendered_for = None;
                self.load_error = Some(e);
            }
        }
    }

    /// Ingest a newly loaded table, initialise widgets and colours.
    pub fn set_table(&mut self, table: Arc<TrackTable>) {
        let stats = TableStats::of(&table);
        self.ui = UiState::for_range(stats.popularity_range);
        self.stats = Some(stats);
        self.genre_colors = GenreColors::new(&table.genres);
        self.table = Some(table);
        self.view = None;
        self.rendered_for = None;
        self.load_error = None;
    }

    /// Re-render if the widget values changed since the last render.
    pub fn refresh(&mut self) {
        let (Some(table), Some(stats)) = (&self.table, &self.stats) else {
            return;
        };
        if self.view.is_some() && self.rendered_for.as_ref() == Some(&self.ui) {
            return;
        }
        log::debug!("Re-rendering views ({:?} tab active)", self.ui.tab);
        self.view = Some(render_with(table, stats, &self.ui));
        self.rendered_for = Some(self.ui.clone());
    }

    /// Views from the last `refresh`.
    pub fn view(&self) -> Option<&ViewModel> {
        self.view.as_ref()
    }
}
