use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// GroupKey – a single cell of a grouping column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, inferred from the CSV text.
/// Used as a `BTreeMap` key downstream so it must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupKey {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

// -- Manual Eq/Ord so we can partition on GroupKey --

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use GroupKey::*;
        fn discriminant(v: &GroupKey) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Text(_) => 3,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Null => write!(f, "<null>"),
            GroupKey::Integer(i) => write!(f, "{i}"),
            GroupKey::Float(v) => write!(f, "{v}"),
            GroupKey::Text(s) => write!(f, "{s}"),
        }
    }
}

impl GroupKey {
    /// Key for a text column; an empty cell is missing.
    pub fn from_text(s: &str) -> Self {
        if s.is_empty() {
            GroupKey::Null
        } else {
            GroupKey::Text(s.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, GroupKey::Null)
    }

    /// Infer the narrowest type for a raw CSV cell.
    pub fn infer(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return GroupKey::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return GroupKey::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return GroupKey::Float(f);
        }
        GroupKey::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// TrackRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single track observation. Missing numeric cells are stored as `NaN`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackRecord {
    pub artist_name: String,
    pub track_name: String,
    pub genre: String,
    #[serde(deserialize_with = "float_or_nan")]
    pub popularity: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub duration_ms: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub danceability: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub energy: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub valence: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub tempo: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub acousticness: f64,
    #[serde(deserialize_with = "inferred_key")]
    pub mode: GroupKey,
    #[serde(deserialize_with = "inferred_key")]
    pub time_signature: GroupKey,
}

fn float_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>()
        .map_err(|_| serde::de::Error::custom(format!("'{raw}' is not a number")))
}

fn inferred_key<'de, D>(deserializer: D) -> Result<GroupKey, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(GroupKey::infer(&raw))
}

impl TrackRecord {
    /// Value of a grouping column as a partition key.
    pub fn group_key(&self, column: GroupColumn) -> GroupKey {
        match column {
            GroupColumn::Genre => GroupKey::from_text(&self.genre),
            GroupColumn::ArtistName => GroupKey::from_text(&self.artist_name),
            GroupColumn::Mode => self.mode.clone(),
            GroupColumn::TimeSignature => self.time_signature.clone(),
        }
    }

    pub fn metric(&self, column: MetricColumn) -> f64 {
        match column {
            MetricColumn::Popularity => self.popularity,
            MetricColumn::DurationMs => self.duration_ms,
            MetricColumn::Danceability => self.danceability,
            MetricColumn::Energy => self.energy,
            MetricColumn::Valence => self.valence,
            MetricColumn::Tempo => self.tempo,
        }
    }
}

// ---------------------------------------------------------------------------
// Column choices
// ---------------------------------------------------------------------------

/// Columns the grouped view may partition on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupColumn {
    #[default]
    Genre,
    ArtistName,
    Mode,
    TimeSignature,
}

impl GroupColumn {
    pub const ALL: [GroupColumn; 4] = [
        GroupColumn::Genre,
        GroupColumn::ArtistName,
        GroupColumn::Mode,
        GroupColumn::TimeSignature,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GroupColumn::Genre => "genre",
            GroupColumn::ArtistName => "artist_name",
            GroupColumn::Mode => "mode",
            GroupColumn::TimeSignature => "time_signature",
        }
    }
}

/// Numeric columns the grouped view may average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MetricColumn {
    #[default]
    Popularity,
    DurationMs,
    Danceability,
    Energy,
    Valence,
    Tempo,
}

impl MetricColumn {
    pub const ALL: [MetricColumn; 6] = [
        MetricColumn::Popularity,
        MetricColumn::DurationMs,
        MetricColumn::Danceability,
        MetricColumn::Energy,
        MetricColumn::Valence,
        MetricColumn::Tempo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricColumn::Popularity => "popularity",
            MetricColumn::DurationMs => "duration_ms",
            MetricColumn::Danceability => "danceability",
            MetricColumn::Energy => "energy",
            MetricColumn::Valence => "valence",
            MetricColumn::Tempo => "tempo",
        }
    }
}

/// The subset of metrics offered by the histogram tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HistogramMetric {
    #[default]
    Popularity,
    Tempo,
    DurationMs,
}

impl HistogramMetric {
    pub const ALL: [HistogramMetric; 3] = [
        HistogramMetric::Popularity,
        HistogramMetric::Tempo,
        HistogramMetric::DurationMs,
    ];

    pub fn column(self) -> MetricColumn {
        match self {
            HistogramMetric::Popularity => MetricColumn::Popularity,
            HistogramMetric::Tempo => MetricColumn::Tempo,
            HistogramMetric::DurationMs => MetricColumn::DurationMs,
        }
    }

    pub fn name(self) -> &'static str {
        self.column().name()
    }
}

/// Every column the loader requires in the CSV header.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "artist_name",
    "track_name",
    "genre",
    "popularity",
    "duration_ms",
    "danceability",
    "energy",
    "valence",
    "tempo",
    "acousticness",
    "mode",
    "time_signature",
];

// ---------------------------------------------------------------------------
// TrackTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct TrackTable {
    /// All tracks in file order.
    pub records: Vec<TrackRecord>,
    /// Sorted set of distinct genres, for the filter widgets.
    pub genres: BTreeSet<String>,
}

impl TrackTable {
    /// Empty genre cells are missing and never become a genre of their own.
    pub fn from_records(records: Vec<TrackRecord>) -> Self {
        let genres = records
            .iter()
            .filter(|r| !r.genre.is_empty())
            .map(|r| r.genre.clone())
            .collect();
        TrackTable { records, genres }
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a record with neutral defaults for the fields a test does not
    /// care about.
    pub(crate) fn track(genre: &str, artist: &str, name: &str, popularity: f64) -> TrackRecord {
        TrackRecord {
            artist_name: artist.to_string(),
            track_name: name.to_string(),
            genre: genre.to_string(),
            popularity,
            duration_ms: 200_000.0,
            danceability: 0.5,
            energy: 0.5,
            valence: 0.5,
            tempo: 120.0,
            acousticness: 0.5,
            mode: GroupKey::Text("Major".to_string()),
            time_signature: GroupKey::Text("4/4".to_string()),
        }
    }

    #[test]
    fn infer_picks_narrowest_type() {
        assert_eq!(GroupKey::infer("4"), GroupKey::Integer(4));
        assert_eq!(GroupKey::infer("0.5"), GroupKey::Float(0.5));
        assert_eq!(GroupKey::infer("4/4"), GroupKey::Text("4/4".to_string()));
        assert_eq!(GroupKey::infer("  "), GroupKey::Null);
    }

    #[test]
    fn keys_order_by_type_then_value() {
        let mut keys = vec![
            GroupKey::Text("Minor".to_string()),
            GroupKey::Integer(3),
            GroupKey::Null,
            GroupKey::Text("Major".to_string()),
            GroupKey::Integer(1),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                GroupKey::Null,
                GroupKey::Integer(1),
                GroupKey::Integer(3),
                GroupKey::Text("Major".to_string()),
                GroupKey::Text("Minor".to_string()),
            ]
        );
    }

    #[test]
    fn empty_text_is_a_missing_key() {
        assert_eq!(GroupKey::from_text(""), GroupKey::Null);
        assert!(GroupKey::from_text("").is_missing());
        assert_eq!(GroupKey::from_text("Pop"), GroupKey::Text("Pop".to_string()));
        let record = track("", "", "x", 1.0);
        assert!(record.group_key(GroupColumn::Genre).is_missing());
        assert!(record.group_key(GroupColumn::ArtistName).is_missing());
    }

    #[test]
    fn empty_genre_is_not_listed() {
        let table = TrackTable::from_records(vec![track("", "a", "x", 1.0), track("Pop", "b", "y", 2.0)]);
        assert_eq!(table.genres.len(), 1);
        assert!(table.genres.contains("Pop"));
    }

    #[test]
    fn table_collects_sorted_genres() {
        let table = TrackTable::from_records(vec![
            track("Rock", "a", "x", 10.0),
            track("Pop", "b", "y", 20.0),
            track("Rock", "c", "z", 30.0),
        ]);
        assert_eq!(table.len(), 3);
        let genres: Vec<&str> = table.genres.iter().map(String::as_str).collect();
        assert_eq!(genres, vec!["Pop", "Rock"]);
    }
}
