use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::GenreColors;
use crate::config::SPOTIFY_GREEN;
use crate::data::filter::GenreFilter;
use crate::data::loader::TableCache;
use crate::data::model::{GroupColumn, HistogramMetric, MetricColumn};
use crate::data::stats::{PopularityRange, Summary};
use crate::state::AppState;
use crate::view::{Tab, UiState};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                reload(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!("{} tracks loaded", format_count(table.len())));
        }
        if let Some(path) = &state.source_path {
            ui.label(RichText::new(path.display().to_string()).weak());
        }

        if let Some(err) = &state.load_error {
            ui.separator();
            ui.label(RichText::new(err.to_string()).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open track features")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open(&path);
    }
}

/// Drop the cached table for the current path and read it again.
fn reload(state: &mut AppState) {
    if let Some(path) = state.source_path.clone() {
        TableCache::shared().invalidate(&path);
        log::info!("Reloading {}", path.display());
        state.open(&path);
    }
}

// ---------------------------------------------------------------------------
// Headings
// ---------------------------------------------------------------------------

pub fn heading(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).heading().strong().color(SPOTIFY_GREEN));
}

// ---------------------------------------------------------------------------
// Metrics row
// ---------------------------------------------------------------------------

/// The four headline numbers, side by side.
pub fn metrics_row(ui: &mut Ui, summary: &Summary) {
    heading(ui, "Main metrics");
    let cards = [
        ("Total Artists", format_count(summary.artist_count)),
        ("Total songs", format_count(summary.track_count)),
        ("Total Genres", format_count(summary.genre_count)),
        ("Average acousticness", format_percent(summary.avg_acousticness_pct)),
    ];
    ui.columns(cards.len(), |cols: &mut [Ui]| {
        for (col, (label, value)) in cols.iter_mut().zip(cards) {
            egui::Frame::group(col.style()).show(col, |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.label(label);
                ui.label(RichText::new(value).size(28.0).strong().color(Color32::WHITE));
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

pub fn tab_bar(ui: &mut Ui, current: &mut Tab) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            let text = if *current == tab {
                RichText::new(tab.label()).strong().color(SPOTIFY_GREEN)
            } else {
                RichText::new(tab.label())
            };
            if ui.selectable_label(*current == tab, text).clicked() {
                *current = tab;
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Per-tab controls
// ---------------------------------------------------------------------------

/// "Group by" and "Metric" selectors for the insights tab.
pub fn group_controls(ui: &mut Ui, state: &mut UiState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Group by:");
        egui::ComboBox::from_id_salt("group_by")
            .selected_text(state.group_column.name())
            .show_ui(ui, |ui: &mut Ui| {
                for col in GroupColumn::ALL {
                    ui.selectable_value(&mut state.group_column, col, col.name());
                }
            });

        ui.add_space(24.0);

        ui.label("Metric:");
        egui::ComboBox::from_id_salt("group_metric")
            .selected_text(state.metric_column.name())
            .show_ui(ui, |ui: &mut Ui| {
                for col in MetricColumn::ALL {
                    ui.selectable_value(&mut state.metric_column, col, col.name());
                }
            });
    });
}

/// Genre multi-select and popularity slider for the scatter tab.
pub fn scatter_controls(
    ui: &mut Ui,
    state: &mut UiState,
    genres: &BTreeSet<String>,
    colors: &GenreColors,
    range: PopularityRange,
) {
    ui.columns(2, |cols: &mut [Ui]| {
        genre_multiselect(
            &mut cols[0],
            "Filter by genre:",
            "scatter_genres",
            &mut state.scatter_genres,
            genres,
            colors,
        );

        cols[1].label("Minimum popularity:");
        cols[1].add(egui::Slider::new(&mut state.min_popularity, range.min..=range.max));
    });
}

/// Metric selector and genre multi-select for the distribution tab.
pub fn histogram_controls(
    ui: &mut Ui,
    state: &mut UiState,
    genres: &BTreeSet<String>,
    colors: &GenreColors,
) {
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].label("Metric:");
        egui::ComboBox::from_id_salt("hist_metric")
            .selected_text(state.histogram_metric.name())
            .show_ui(&mut cols[0], |ui: &mut Ui| {
                for metric in HistogramMetric::ALL {
                    ui.selectable_value(&mut state.histogram_metric, metric, metric.name());
                }
            });

        genre_multiselect(
            &mut cols[1],
            "Filter by genre (histogram):",
            "histogram_genres",
            &mut state.histogram_genres,
            genres,
            colors,
        );
    });
}

/// Collapsible checkbox list. Nothing ticked means no filtering.
fn genre_multiselect(
    ui: &mut Ui,
    label: &str,
    id: &str,
    filter: &mut GenreFilter,
    genres: &BTreeSet<String>,
    colors: &GenreColors,
) {
    let header = if filter.is_empty() {
        format!("{label}  (all)")
    } else {
        format!("{label}  ({}/{})", filter.len(), genres.len())
    };

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(id)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    filter.select_all(genres);
                }
                if ui.small_button("None").clicked() {
                    filter.clear();
                }
            });

            ScrollArea::vertical()
                .id_salt(format!("{id}_scroll"))
                .max_height(180.0)
                .show(ui, |ui: &mut Ui| {
                    for genre in genres {
                        let mut checked = filter.contains(genre);
                        let text = RichText::new(genre).color(colors.color_for(genre));
                        if ui.checkbox(&mut checked, text).changed() {
                            filter.toggle(genre);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// `232725` → `"232,725"`.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One decimal with a `%` suffix; a dash when there is nothing to average.
pub fn format_percent(pct: Option<f64>) -> String {
    match pct {
        Some(v) => format!("{v:.1}%"),
        None => "–".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(232_725), "232,725");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn percent_has_placeholder() {
        assert_eq!(format_percent(Some(36.84)), "36.8%");
        assert_eq!(format_percent(None), "–");
    }
}
