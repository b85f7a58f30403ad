use std::collections::BTreeSet;

use super::model::{TrackRecord, TrackTable};

// ---------------------------------------------------------------------------
// Genre filter: which genres the user picked in a multi-select
// ---------------------------------------------------------------------------

/// Selected genres. An empty selection means "no filter" (show all).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreFilter {
    selected: BTreeSet<String>,
}

impl GenreFilter {
    pub fn new<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GenreFilter {
            selected: genres.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, genre: &str) -> bool {
        self.selected.contains(genre)
    }

    /// Whether a row passes: everything passes an empty filter.
    pub fn admits(&self, record: &TrackRecord) -> bool {
        self.is_empty() || self.selected.contains(&record.genre)
    }

    pub fn toggle(&mut self, genre: &str) {
        if !self.selected.remove(genre) {
            self.selected.insert(genre.to_string());
        }
    }

    pub fn select_all(&mut self, genres: &BTreeSet<String>) {
        self.selected = genres.clone();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected genres in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }
}

/// Return indices of rows passing the genre filter and, when given, the
/// inclusive popularity floor. The table itself is never touched.
///
/// A row with missing popularity fails any floor.
pub fn filtered_indices(
    table: &TrackTable,
    genres: &GenreFilter,
    min_popularity: Option<f64>,
) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| genres.admits(record))
        .filter(|(_, record)| min_popularity.map_or(true, |floor| record.popularity >= floor))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::track;

    fn table() -> TrackTable {
        TrackTable::from_records(vec![
            track("Pop", "a", "1", 50.0),
            track("Rock", "b", "2", 80.0),
            track("Jazz", "c", "3", 60.0),
            track("Pop", "d", "4", f64::NAN),
        ])
    }

    #[test]
    fn empty_filter_passes_everything() {
        let t = table();
        assert_eq!(filtered_indices(&t, &GenreFilter::default(), None), vec![0, 1, 2, 3]);
    }

    #[test]
    fn genre_and_popularity_combine() {
        let t = table();
        let genres = GenreFilter::new(["Pop", "Rock"]);
        assert_eq!(filtered_indices(&t, &genres, None), vec![0, 1, 3]);
        assert_eq!(filtered_indices(&t, &genres, Some(50.0)), vec![0, 1]);
    }

    #[test]
    fn popularity_floor_is_inclusive_and_drops_missing() {
        let t = table();
        assert_eq!(
            filtered_indices(&t, &GenreFilter::default(), Some(60.0)),
            vec![1, 2]
        );
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut filter = GenreFilter::default();
        filter.toggle("Pop");
        assert!(filter.contains("Pop"));
        filter.toggle("Pop");
        assert!(filter.is_empty());
    }

    #[test]
    fn select_all_then_clear() {
        let t = table();
        let mut filter = GenreFilter::default();
        filter.select_all(&t.genres);
        assert_eq!(filter.iter().collect::<Vec<_>>(), vec!["Jazz", "Pop", "Rock"]);
        filter.clear();
        assert_eq!(filter.len(), 0);
    }
}
