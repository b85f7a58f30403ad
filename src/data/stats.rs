use std::collections::HashSet;

use super::model::TrackTable;

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// The four numbers shown above the tabs. Always over the whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub artist_count: usize,
    pub track_count: usize,
    pub genre_count: usize,
    /// Mean acousticness scaled to a percentage; `None` when no row has a value.
    pub avg_acousticness_pct: Option<f64>,
}

pub fn summarize(table: &TrackTable) -> Summary {
    // Empty cells are missing and do not count as a distinct value.
    let mut artists = HashSet::new();
    let mut tracks = HashSet::new();
    for record in &table.records {
        if !record.artist_name.is_empty() {
            artists.insert(record.artist_name.as_str());
        }
        if !record.track_name.is_empty() {
            tracks.insert(record.track_name.as_str());
        }
    }

    Summary {
        artist_count: artists.len(),
        track_count: tracks.len(),
        genre_count: table.genres.len(),
        avg_acousticness_pct: mean(table.records.iter().map(|r| r.acousticness))
            .map(|m| m * 100.0),
    }
}

// ---------------------------------------------------------------------------
// Missing-aware reductions
// ---------------------------------------------------------------------------

/// Arithmetic mean of the non-`NaN` values, `None` if there are none.
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Median of the non-`NaN` values (average of the middle pair for even counts).
pub fn median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

/// Smallest and largest non-`NaN` value.
pub fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| !v.is_nan()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// ---------------------------------------------------------------------------
// Popularity slider bounds
// ---------------------------------------------------------------------------

/// Range and default for the minimum-popularity slider, truncated to integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularityRange {
    pub min: i64,
    pub max: i64,
    pub median: i64,
}

impl PopularityRange {
    pub fn of(table: &TrackTable) -> Self {
        let popularity = || table.records.iter().map(|r| r.popularity);
        let (min, max) = min_max(popularity()).unwrap_or((0.0, 0.0));
        let median = median(popularity()).unwrap_or(min);
        PopularityRange {
            min: min as i64,
            max: max as i64,
            median: median as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::track;

    #[test]
    fn counts_distinct_values() {
        let mut a = track("Pop", "Adele", "Hello", 80.0);
        a.acousticness = 0.25;
        let mut b = track("Pop", "Adele", "Skyfall", 70.0);
        b.acousticness = 0.75;
        let c = track("Rock", "Queen", "Hello", 90.0);
        let table = TrackTable::from_records(vec![a, b, c]);

        let summary = summarize(&table);
        assert_eq!(summary.artist_count, 2);
        assert_eq!(summary.track_count, 2);
        assert_eq!(summary.genre_count, 2);
        assert_eq!(summary.avg_acousticness_pct, Some(50.0));
        assert!(summary.genre_count <= summary.track_count);
    }

    #[test]
    fn empty_text_cells_are_not_counted() {
        let blank = track("", "", "", 70.0);
        let table = TrackTable::from_records(vec![blank, track("Pop", "A", "One", 40.0)]);

        let summary = summarize(&table);
        assert_eq!(summary.artist_count, 1);
        assert_eq!(summary.track_count, 1);
        assert_eq!(summary.genre_count, 1);
    }

    #[test]
    fn empty_table_has_zero_counts_and_no_average() {
        let summary = summarize(&TrackTable::default());
        assert_eq!(summary.artist_count, 0);
        assert_eq!(summary.track_count, 0);
        assert_eq!(summary.genre_count, 0);
        assert_eq!(summary.avg_acousticness_pct, None);
    }

    #[test]
    fn mean_skips_missing_values() {
        assert_eq!(mean([1.0, f64::NAN, 3.0].into_iter()), Some(2.0));
        assert_eq!(mean([f64::NAN].into_iter()), None);
    }

    #[test]
    fn median_handles_even_and_odd_counts() {
        assert_eq!(median([3.0, 1.0, 2.0].into_iter()), Some(2.0));
        assert_eq!(median([4.0, 1.0, 2.0, 3.0].into_iter()), Some(2.5));
        assert_eq!(median(std::iter::empty()), None);
    }

    #[test]
    fn popularity_range_truncates() {
        let table = TrackTable::from_records(vec![
            track("Pop", "a", "1", 10.0),
            track("Pop", "b", "2", 45.0),
            track("Pop", "c", "3", 50.0),
            track("Pop", "d", "4", 99.0),
        ]);
        let range = PopularityRange::of(&table);
        assert_eq!(range, PopularityRange { min: 10, max: 99, median: 47 });
    }
}
