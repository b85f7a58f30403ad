/// Data layer: track table, loading, and the per-tab computations.
///
/// Architecture:
/// ```text
///   SpotifyFeatures.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → TrackTable, memoized per path
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ TrackTable  │  Vec<TrackRecord>, genre index
///   └────────────┘
///        │
///        ├── stats      headline metrics, slider bounds
///        ├── aggregate  per-group means
///        ├── scatter    genre + popularity filter → points
///        └── histogram  genre filter → binned counts
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
pub mod scatter;
pub mod stats;
