use std::collections::BTreeMap;

use super::filter::{filtered_indices, GenreFilter};
use super::model::{HistogramMetric, TrackTable};
use super::stats::min_max;
use crate::config::HISTOGRAM_BINS;

/// Counts for one stacked layer. `genre` is `None` for the single
/// aggregate series shown when no genre is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    pub genre: Option<String>,
    pub counts: Vec<usize>,
}

/// Equal-width bins starting at `start`. Empty when no row survives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub start: f64,
    pub bin_width: f64,
    pub series: Vec<HistogramSeries>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn bin_count(&self) -> usize {
        self.series.first().map_or(0, |s| s.counts.len())
    }

    pub fn bin_center(&self, bin: usize) -> f64 {
        self.start + (bin as f64 + 0.5) * self.bin_width
    }

    /// Per-bin totals across all series.
    pub fn totals(&self) -> Vec<usize> {
        let mut totals = vec![0; self.bin_count()];
        for series in &self.series {
            for (total, count) in totals.iter_mut().zip(&series.counts) {
                *total += count;
            }
        }
        totals
    }
}

/// Histogram of `metric` over rows passing `genres`, with the default bin count.
pub fn histogram(table: &TrackTable, metric: HistogramMetric, genres: &GenreFilter) -> Histogram {
    histogram_with_bins(table, metric, genres, HISTOGRAM_BINS)
}

/// Bin the filtered, non-missing values into `bins` equal-width bins over
/// their observed range. The last bin is closed on the right. A non-empty
/// genre filter splits the counts into one series per genre present.
pub fn histogram_with_bins(
    table: &TrackTable,
    metric: HistogramMetric,
    genres: &GenreFilter,
    bins: usize,
) -> Histogram {
    let column = metric.column();
    let rows: Vec<(&str, f64)> = filtered_indices(table, genres, None)
        .into_iter()
        .map(|i| &table.records[i])
        .map(|r| (r.genre.as_str(), r.metric(column)))
        .filter(|(_, v)| !v.is_nan())
        .collect();

    let Some((lo, hi)) = min_max(rows.iter().map(|(_, v)| *v)) else {
        return Histogram::default();
    };
    if bins == 0 {
        return Histogram::default();
    }

    let (start, end) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
    let bin_width = (end - start) / bins as f64;
    let bin_of = |v: f64| (((v - start) / bin_width).floor() as usize).min(bins - 1);

    let series = if genres.is_empty() {
        let mut counts = vec![0; bins];
        for (_, v) in &rows {
            counts[bin_of(*v)] += 1;
        }
        vec![HistogramSeries {
            genre: None,
            counts,
        }]
    } else {
        let mut per_genre: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (genre, v) in &rows {
            per_genre.entry(*genre).or_insert_with(|| vec![0; bins])[bin_of(*v)] += 1;
        }
        per_genre
            .into_iter()
            .map(|(genre, counts)| HistogramSeries {
                genre: Some(genre.to_string()),
                counts,
            })
            .collect()
    };

    Histogram {
        start,
        bin_width,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::track;

    fn table() -> TrackTable {
        let records = [("Pop", 0.0), ("Pop", 50.0), ("Rock", 100.0), ("Jazz", 25.0)]
            .iter()
            .enumerate()
            .map(|(i, (genre, pop))| track(genre, "a", &format!("s{i}"), *pop))
            .collect();
        TrackTable::from_records(records)
    }

    #[test]
    fn default_uses_forty_bins_over_observed_range() {
        let hist = histogram(&table(), HistogramMetric::Popularity, &GenreFilter::default());
        assert_eq!(hist.bin_count(), 40);
        assert_eq!(hist.start, 0.0);
        assert_eq!(hist.bin_width, 2.5);
        assert_eq!(hist.series.len(), 1);
        assert_eq!(hist.series[0].genre, None);
        assert_eq!(hist.totals().iter().sum::<usize>(), 4);
        // max lands in the last bin
        assert_eq!(hist.series[0].counts[39], 1);
        assert_eq!(hist.series[0].counts[20], 1);
    }

    #[test]
    fn filter_splits_series_per_genre() {
        let hist = histogram_with_bins(
            &table(),
            HistogramMetric::Popularity,
            &GenreFilter::new(["Pop", "Rock"]),
            4,
        );
        let genres: Vec<_> = hist.series.iter().map(|s| s.genre.as_deref()).collect();
        assert_eq!(genres, vec![Some("Pop"), Some("Rock")]);
        assert_eq!(hist.series[0].counts, vec![1, 0, 1, 0]);
        assert_eq!(hist.series[1].counts, vec![0, 0, 0, 1]);
    }

    #[test]
    fn empty_filter_matches_full_table() {
        let t = table();
        let all = GenreFilter::new(t.genres.iter().cloned());
        let unfiltered = histogram(&t, HistogramMetric::Popularity, &GenreFilter::default());
        let filtered = histogram(&t, HistogramMetric::Popularity, &all);
        assert_eq!(unfiltered.totals(), filtered.totals());
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = table();
        let filter = GenreFilter::new(["Pop", "Jazz"]);
        let once = histogram(&t, HistogramMetric::Popularity, &filter);
        let twice = histogram(&t, HistogramMetric::Popularity, &filter);
        assert_eq!(once, twice);
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn constant_values_get_unit_range() {
        let t = TrackTable::from_records(vec![track("Pop", "a", "1", 7.0), track("Pop", "b", "2", 7.0)]);
        let hist = histogram_with_bins(&t, HistogramMetric::Popularity, &GenreFilter::default(), 10);
        assert_eq!(hist.start, 6.5);
        assert_eq!(hist.series[0].counts.iter().sum::<usize>(), 2);
        assert!(hist.series[0].counts.contains(&2));
    }

    #[test]
    fn no_rows_is_empty() {
        let hist = histogram(&table(), HistogramMetric::Tempo, &GenreFilter::new(["Metal"]));
        assert!(hist.is_empty());
        assert_eq!(hist.bin_count(), 0);
    }
}
