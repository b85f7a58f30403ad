use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Compile-time defaults
// ---------------------------------------------------------------------------

/// CSV read at startup, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "SpotifyFeatures.csv";

pub const APP_TITLE: &str = "Spotify Feature Explorer";

/// Bins in the distribution tab.
pub const HISTOGRAM_BINS: usize = 40;

pub const WINDOW_SIZE: [f32; 2] = [1280.0, 860.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [720.0, 480.0];

// -- Theme --

pub const SPOTIFY_GREEN: Color32 = Color32::from_rgb(0x1D, 0xB9, 0x54);
pub const BACKGROUND: Color32 = Color32::from_rgb(0x19, 0x14, 0x14);
pub const TOOLBAR: Color32 = Color32::from_rgb(0x12, 0x12, 0x12);
