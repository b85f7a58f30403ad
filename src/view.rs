use crate::data::aggregate::{aggregate, GroupMean};
use crate::data::filter::GenreFilter;
use crate::data::histogram::{histogram, Histogram};
use crate::data::model::{GroupColumn, HistogramMetric, MetricColumn, TrackTable};
use crate::data::scatter::{scatter, ScatterView};
use crate::data::stats::{summarize, PopularityRange, Summary};

// ---------------------------------------------------------------------------
// Widget values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Insights,
    Dance,
    MusicInfo,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Insights, Tab::Dance, Tab::MusicInfo];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Insights => "Spotify Insights",
            Tab::Dance => "Let's Dance",
            Tab::MusicInfo => "Music Info",
        }
    }
}

/// Everything the user can change. A new value means a new render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    pub tab: Tab,
    pub group_column: GroupColumn,
    pub metric_column: MetricColumn,
    pub scatter_genres: GenreFilter,
    pub min_popularity: i64,
    pub histogram_metric: HistogramMetric,
    pub histogram_genres: GenreFilter,
}

impl UiState {
    /// Fresh widget values for a newly loaded table: the popularity slider
    /// starts at the median.
    pub fn for_table(table: &TrackTable) -> Self {
        Self::for_range(PopularityRange::of(table))
    }

    pub fn for_range(range: PopularityRange) -> Self {
        UiState {
            min_popularity: range.median,
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// Numbers that depend on the table alone, computed once per load.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    pub summary: Summary,
    pub popularity_range: PopularityRange,
}

impl TableStats {
    pub fn of(table: &TrackTable) -> Self {
        TableStats {
            summary: summarize(table),
            popularity_range: PopularityRange::of(table),
        }
    }
}

/// Everything the page draws, computed from the table and widget values.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub summary: Summary,
    pub popularity_range: PopularityRange,
    pub grouped: Vec<GroupMean>,
    pub scatter: ScatterView,
    pub histogram: Histogram,
}

/// Recompute the whole page. Pure: same inputs, same output.
pub fn render(table: &TrackTable, ui: &UiState) -> ViewModel {
    render_with(table, &TableStats::of(table), ui)
}

/// [`render`] with the table-only numbers already known; `stats` must come
/// from the same table.
pub fn render_with(table: &TrackTable, stats: &TableStats, ui: &UiState) -> ViewModel {
    ViewModel {
        summary: stats.summary.clone(),
        popularity_range: stats.popularity_range,
        grouped: aggregate(table, ui.group_column, ui.metric_column),
        scatter: scatter(table, &ui.scatter_genres, ui.min_popularity as f64),
        histogram: histogram(table, ui.histogram_metric, &ui.histogram_genres),
    }
}
