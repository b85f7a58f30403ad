use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::GenreColors;
use crate::config::SPOTIFY_GREEN;
use crate::data::aggregate::GroupMean;
use crate::data::histogram::Histogram;
use crate::data::model::{GroupColumn, HistogramMetric, MetricColumn};
use crate::data::scatter::ScatterView;

/// Distinct marker sizes in the scatter plot.
const SIZE_STEPS: usize = 5;

/// Hover radius, in danceability/energy units.
const HOVER_DISTANCE: f64 = 0.02;

fn empty_note(ui: &mut Ui) {
    ui.label(RichText::new("No tracks match the current filters.").weak());
}

// ---------------------------------------------------------------------------
// Grouped line chart (insights tab)
// ---------------------------------------------------------------------------

/// Per-group means as a line with markers, followed by the same numbers as a table.
pub fn grouped_chart(ui: &mut Ui, groups: &[GroupMean], group: GroupColumn, metric: MetricColumn) {
    ui.strong(format!("Average {} by {}", metric.name(), group.name()));
    if groups.is_empty() {
        empty_note(ui);
    }

    let labels: Vec<String> = groups.iter().map(|g| g.key.to_string()).collect();
    let points: Vec<[f64; 2]> = groups
        .iter()
        .enumerate()
        .filter(|(_, g)| !g.mean.is_nan())
        .map(|(i, g)| [i as f64, g.mean])
        .collect();

    Plot::new("grouped_plot")
        .height(360.0)
        .x_axis_label(group.name())
        .y_axis_label(metric.name())
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark.value)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .color(SPOTIFY_GREEN)
                    .width(2.0)
                    .name(metric.name()),
            );
            plot_ui.points(Points::new(points).color(SPOTIFY_GREEN).radius(3.5));
        });

    ui.add_space(8.0);

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(200.0))
        .column(Column::remainder())
        .max_scroll_height(220.0)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(group.name());
            });
            header.col(|ui| {
                ui.strong(format!("mean {}", metric.name()));
            });
        })
        .body(|body| {
            body.rows(18.0, groups.len(), |mut row| {
                let g = &groups[row.index()];
                row.col(|ui| {
                    ui.label(g.key.to_string());
                });
                row.col(|ui| {
                    ui.label(format_mean(g.mean));
                });
            });
        });
}

/// Axis label for a categorical x position; only integer ticks get text.
fn category_label(labels: &[String], value: f64) -> String {
    if value < 0.0 || value.fract() != 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

fn format_mean(mean: f64) -> String {
    if mean.is_nan() {
        "NaN".to_string()
    } else {
        format!("{mean:.3}")
    }
}

// ---------------------------------------------------------------------------
// Energy vs danceability (dance tab)
// ---------------------------------------------------------------------------

/// Marker radius bucket for a popularity, scaled so area tracks popularity.
fn size_step(popularity: f64, max_popularity: f64) -> usize {
    if max_popularity <= 0.0 || popularity <= 0.0 {
        return 0;
    }
    let scaled = (popularity / max_popularity).sqrt() * (SIZE_STEPS - 1) as f64;
    (scaled.round() as usize).min(SIZE_STEPS - 1)
}

pub fn scatter_plot(ui: &mut Ui, view: &ScatterView, colors: &GenreColors) {
    ui.strong("Energy vs Danceability (filtered)");
    if view.is_empty() {
        empty_note(ui);
    }

    // One series per (genre, size) so each can carry its own colour and radius.
    let mut series: BTreeMap<(&str, usize), Vec<[f64; 2]>> = BTreeMap::new();
    for p in &view.points {
        series
            .entry((p.genre.as_str(), size_step(p.popularity, view.max_popularity)))
            .or_default()
            .push([p.danceability, p.energy]);
    }

    let response = Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label("danceability")
        .y_axis_label("energy")
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for ((genre, step), pts) in series {
                plot_ui.points(
                    Points::new(pts)
                        .name(genre)
                        .color(colors.color_for(genre))
                        .radius(1.5 + step as f32 * 1.2),
                );
            }
            plot_ui
                .pointer_coordinate()
                .and_then(|at| view.nearest(at.x, at.y, HOVER_DISTANCE))
        });

    if let Some(point) = response.inner {
        response.response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            ui.strong(&point.track_name);
            ui.label(&point.artist_name);
            ui.label(format!("genre: {}", point.genre));
            ui.label(format!("popularity: {}", point.popularity));
            ui.label(format!(
                "danceability: {:.3}, energy: {:.3}",
                point.danceability, point.energy
            ));
        });
    }
}

// ---------------------------------------------------------------------------
// Distribution (music info tab)
// ---------------------------------------------------------------------------

pub fn histogram_plot(ui: &mut Ui, hist: &Histogram, metric: HistogramMetric, colors: &GenreColors) {
    ui.strong(format!("Distribution of {}", metric.name()));
    if hist.is_empty() {
        empty_note(ui);
    }

    let mut charts: Vec<BarChart> = Vec::with_capacity(hist.series.len());
    for series in &hist.series {
        let bars: Vec<Bar> = series
            .counts
            .iter()
            .enumerate()
            .map(|(bin, &count)| Bar::new(hist.bin_center(bin), count as f64).width(hist.bin_width))
            .collect();

        let mut chart = match &series.genre {
            Some(genre) => BarChart::new(bars).name(genre).color(colors.color_for(genre)),
            None => BarChart::new(bars).name("count").color(SPOTIFY_GREEN),
        };
        if !charts.is_empty() {
            let below: Vec<&BarChart> = charts.iter().collect();
            chart = chart.stack_on(&below);
        }
        charts.push(chart);
    }

    Plot::new("histogram_plot")
        .legend(Legend::default())
        .x_axis_label(metric.name())
        .y_axis_label("count")
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
