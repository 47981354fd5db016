use std::collections::HashMap;

use chrono::NaiveDate;
use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};
use indexmap::{IndexMap, IndexSet};

use crate::state::AppState;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Price chart (central panel)
// ---------------------------------------------------------------------------

/// Render the price chart: one line per symbol over the filtered subset.
///
/// The x axis is the band of distinct dates present in the rendered subset,
/// sorted chronologically. Rows without a usable price are skipped.
pub fn price_chart(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file or fetch a URL to view prices  (File → Open…)");
        });
        return;
    };

    // Distinct dates of the visible records, sorted chronologically. Dates
    // that don't parse sort lexicographically after the ones that do.
    let mut dates: Vec<String> = {
        let mut seen: IndexSet<String> = IndexSet::new();
        for &idx in &state.visible_indices {
            let date = dataset.records[idx].date.trim();
            if !date.is_empty() {
                seen.insert(date.to_string());
            }
        }
        seen.into_iter().collect()
    };
    dates.sort_by(|a, b| match (parse_date(a), parse_date(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    });

    let date_index: HashMap<&str, usize> = dates
        .iter()
        .enumerate()
        .map(|(i, d)| (d.as_str(), i))
        .collect();

    // One series per symbol, first-seen order.
    let mut series: IndexMap<String, Vec<[f64; 2]>> = IndexMap::new();
    for &idx in &state.visible_indices {
        let rec = &dataset.records[idx];
        if !rec.price.is_finite() {
            continue;
        }
        let Some(&x) = date_index.get(rec.date.trim()) else {
            continue;
        };
        let symbol = match rec.symbol.trim() {
            "" => "(blank)".to_string(),
            s => s.to_string(),
        };
        series.entry(symbol).or_default().push([x as f64, rec.price]);
    }

    let labels: Vec<String> = dates.iter().map(|d| axis_label(d)).collect();

    Plot::new("price_chart")
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Price")
        .x_axis_formatter(move |mark, _range| {
            let nearest = mark.value.round();
            if (mark.value - nearest).abs() > 1e-6 || nearest < 0.0 {
                return String::new();
            }
            labels.get(nearest as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (symbol, points) in &series {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(symbol))
                    .unwrap_or(Color32::LIGHT_BLUE);

                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(symbol)
                        .color(color)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points.clone()))
                        .name(symbol)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(3.0),
                );
            }
        });
}

/// `2024-01-02` → `Jan 02`; anything unparseable is shown as-is.
fn axis_label(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%b %d").to_string())
        .unwrap_or_else(|| date.to_string())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_abbreviate_iso_dates() {
        assert_eq!(axis_label("2024-01-02"), "Jan 02");
        assert_eq!(axis_label("2024-12-31"), "Dec 31");
        assert_eq!(axis_label("not-a-date"), "not-a-date");
    }
}
