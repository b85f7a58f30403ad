use super::filter::{filtered_indices, GenreFilter};
use super::model::TrackTable;

/// One dot of the energy/danceability scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub danceability: f64,
    pub energy: f64,
    /// Colour key.
    pub genre: String,
    /// Size key.
    pub popularity: f64,
    pub artist_name: String,
    pub track_name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterView {
    pub points: Vec<ScatterPoint>,
    /// Largest popularity among the points, for scaling marker sizes.
    pub max_popularity: f64,
}

impl ScatterView {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The point closest to `(x, y)` within `max_dist`, for hover labels.
    pub fn nearest(&self, x: f64, y: f64, max_dist: f64) -> Option<&ScatterPoint> {
        self.points
            .iter()
            .map(|p| (p, (p.danceability - x).hypot(p.energy - y)))
            .filter(|(_, d)| *d <= max_dist)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p)
    }
}

/// Rows passing the genre filter with `popularity >= min_popularity`.
pub fn scatter(table: &TrackTable, genres: &GenreFilter, min_popularity: f64) -> ScatterView {
    let points: Vec<ScatterPoint> = filtered_indices(table, genres, Some(min_popularity))
        .into_iter()
        .map(|i| {
            let r = &table.records[i];
            ScatterPoint {
                danceability: r.danceability,
                energy: r.energy,
                genre: r.genre.clone(),
                popularity: r.popularity,
                artist_name: r.artist_name.clone(),
                track_name: r.track_name.clone(),
            }
        })
        .collect();

    let max_popularity = points
        .iter()
        .map(|p| p.popularity)
        .fold(0.0, f64::max);

    ScatterView {
        points,
        max_popularity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::track;

    fn two_rows() -> TrackTable {
        let mut pop = track("pop", "Pop Artist", "Pop Song", 50.0);
        pop.danceability = 0.5;
        let mut rock = track("rock", "Rock Artist", "Rock Song", 80.0);
        rock.danceability = 0.7;
        rock.energy = 0.9;
        TrackTable::from_records(vec![pop, rock])
    }

    #[test]
    fn popularity_floor_keeps_only_rock() {
        let view = scatter(&two_rows(), &GenreFilter::default(), 60.0);
        assert_eq!(view.len(), 1);
        let point = &view.points[0];
        assert_eq!(point.genre, "rock");
        assert_eq!((point.danceability, point.energy), (0.7, 0.9));
        assert_eq!(point.artist_name, "Rock Artist");
        assert_eq!(point.track_name, "Rock Song");
        assert_eq!(view.max_popularity, 80.0);
    }

    #[test]
    fn empty_filter_is_whole_table() {
        let table = two_rows();
        let view = scatter(&table, &GenreFilter::default(), f64::NEG_INFINITY);
        assert_eq!(view.len(), table.len());
    }

    #[test]
    fn filtering_is_idempotent() {
        let table = two_rows();
        let filter = GenreFilter::new(["rock"]);
        let once = scatter(&table, &filter, 10.0);
        let twice = scatter(&table, &filter, 10.0);
        assert_eq!(once, twice);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn no_survivors_is_empty_view() {
        let view = scatter(&two_rows(), &GenreFilter::new(["jazz"]), 0.0);
        assert!(view.is_empty());
        assert_eq!(view.max_popularity, 0.0);
    }

    #[test]
    fn nearest_respects_distance() {
        let view = scatter(&two_rows(), &GenreFilter::default(), 0.0);
        let hit = view.nearest(0.69, 0.88, 0.05).unwrap();
        assert_eq!(hit.track_name, "Rock Song");
        assert!(view.nearest(0.1, 0.1, 0.05).is_none());
    }
}
