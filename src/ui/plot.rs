use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoints, Points};

use crate::analysis::{Analysis, BarDataset, MapData};
use crate::color::ColorMap;
use crate::config::{MAP_HALF_SPAN_DEGREES, MARKER_RADIUS};
use crate::data::aggregate::TopNResult;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 240.0;
const MAP_HEIGHT: f32 = 480.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render tables, bar charts and the wreck map in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore shipwrecks  (File → Open…)");
        });
        return;
    }
    let Some(analysis) = &state.analysis else {
        return;
    };
    let n = analysis.params.top_n;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Shipwreck Analysis");
            ui.add_space(4.0);

            ui.columns(2, |cols| {
                top_n_table(
                    &mut cols[0],
                    "location_table",
                    &format!("Top {n} Locations (within selected year range)"),
                    "Location",
                    &analysis.top_locations,
                );
                top_n_table(
                    &mut cols[1],
                    "port_table",
                    &format!("Top {n} Departure Ports (within selected year range)"),
                    "Departure port",
                    &analysis.top_ports,
                );
            });
            ui.separator();

            ui.columns(2, |cols| {
                bar_chart(
                    &mut cols[0],
                    "location_chart",
                    &analysis.location_chart,
                    Some(&state.color_map),
                );
                bar_chart(&mut cols[1], "port_chart", &analysis.port_chart, None);
            });
            ui.separator();

            ui.heading(format!("Map of Top {n} Locations with Highest Occurrences of Shipwrecks"));
            wreck_map(ui, analysis, &state.color_map);
        });
}

// ---------------------------------------------------------------------------
// Top-N table
// ---------------------------------------------------------------------------

fn top_n_table(ui: &mut Ui, id: &str, title: &str, heading: &str, result: &TopNResult) {
    ui.strong(title);
    if result.is_empty() {
        ui.label("No records in this year range.");
        return;
    }
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong(heading);
                });
                header.col(|ui| {
                    ui.strong("count");
                });
            })
            .body(|mut body| {
                for entry in result.iter() {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&entry.key);
                        });
                        row.col(|ui| {
                            ui.label(entry.count.to_string());
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, id: &str, data: &BarDataset, colors: Option<&ColorMap>) {
    ui.strong(data.title);

    let bars: Vec<Bar> = data
        .bars
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let fill = colors
                .map(|cm| cm.color_for(label))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, *count as f64)
                .name(label)
                .fill(fill)
                .width(0.6)
        })
        .collect();

    // category names under the bar positions
    let labels: Vec<String> = data.bars.iter().map(|(label, _)| label.clone()).collect();
    let formatter = move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
        let i = mark.value.round();
        if (mark.value - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    };

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(data.x_label)
        .y_axis_label(data.y_label)
        .x_axis_formatter(formatter)
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(data.title));
        });
}

// ---------------------------------------------------------------------------
// Wreck map
// ---------------------------------------------------------------------------

/// Longitude/latitude scatter of the top-N locations, framed on the centroid.
fn wreck_map(ui: &mut Ui, analysis: &Analysis, colors: &ColorMap) {
    let (lat, lon) = match &analysis.map {
        MapData::NoData => {
            ui.label(
                RichText::new("No data available for the selected top locations.")
                    .color(Color32::YELLOW),
            );
            return;
        }
        MapData::Markers { centroid, .. } => *centroid,
    };

    // one series per location key, in rank order
    let series = analysis.map.series(&analysis.top_locations);

    Plot::new("wreck_map")
        .height(MAP_HEIGHT)
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(lon - MAP_HALF_SPAN_DEGREES)
        .include_x(lon + MAP_HALF_SPAN_DEGREES)
        .include_y(lat - MAP_HALF_SPAN_DEGREES)
        .include_y(lat + MAP_HALF_SPAN_DEGREES)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for s in series {
                plot_ui.points(
                    Points::new(PlotPoints::from(s.points))
                        .name(&s.name)
                        .color(colors.color_for(&s.key))
                        .radius(MARKER_RADIUS)
                        .filled(true),
                );
            }
        });
}
