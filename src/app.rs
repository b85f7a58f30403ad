use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Stroke, Ui, Visuals};

use crate::config::{BACKGROUND, SPOTIFY_GREEN, TOOLBAR};
use crate::state::AppState;
use crate::ui::{panels, plot};
use crate::view::Tab;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpotifyExplorerApp {
    pub state: AppState,
}

impl SpotifyExplorerApp {
    /// Start with the table at `path` already loaded (or its error shown).
    pub fn new(path: &Path) -> Self {
        let mut state = AppState::default();
        state.open(path);
        Self { state }
    }
}

/// Dark theme in the Spotify palette.
pub fn spotify_visuals() -> Visuals {
    let mut visuals = Visuals::dark();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;
    visuals.extreme_bg_color = TOOLBAR;
    visuals.hyperlink_color = SPOTIFY_GREEN;
    visuals.selection.bg_fill = SPOTIFY_GREEN.linear_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, SPOTIFY_GREEN);
    visuals.override_text_color = Some(Color32::WHITE);
    visuals
}

impl eframe::App for SpotifyExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: metrics + tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| page(ui, &mut self.state));
        });
    }
}

/// The whole page, top to bottom.
fn page(ui: &mut Ui, state: &mut AppState) {
    panels::heading(ui, crate::config::APP_TITLE);

    if let Some(err) = &state.load_error {
        ui.add_space(12.0);
        ui.label(RichText::new(format!("Could not load the dataset: {err}")).color(Color32::RED));
        ui.label("Use File → Open… to pick another CSV.");
        return;
    }

    state.refresh();
    let (Some(table), Some(view)) = (state.table.clone(), state.view()) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore tracks  (File → Open…)");
        });
        return;
    };

    panels::metrics_row(ui, &view.summary);
    let range = view.popularity_range;
    ui.separator();

    panels::tab_bar(ui, &mut state.ui.tab);
    ui.add_space(6.0);

    match state.ui.tab {
        Tab::Insights => {
            panels::heading(ui, "Metric Analysis by Group");
            panels::group_controls(ui, &mut state.ui);
        }
        Tab::Dance => {
            panels::heading(ui, "Energy vs Danceability");
            panels::scatter_controls(ui, &mut state.ui, &table.genres, &state.genre_colors, range);
        }
        Tab::MusicInfo => {
            panels::heading(ui, "Distribution of Track Metrics");
            panels::histogram_controls(ui, &mut state.ui, &table.genres, &state.genre_colors);
        }
    }

    // Widgets may have changed above; draw from fresh views.
    state.refresh();
    let Some(view) = state.view() else {
        return;
    };
    match state.ui.tab {
        Tab::Insights => {
            plot::grouped_chart(ui, &view.grouped, state.ui.group_column, state.ui.metric_column)
        }
        Tab::Dance => plot::scatter_plot(ui, &view.scatter, &state.genre_colors),
        Tab::MusicInfo => {
            plot::histogram_plot(ui, &view.histogram, state.ui.histogram_metric, &state.genre_colors)
        }
    }
    ui.separator();
}
