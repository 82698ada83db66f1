use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::{ranked_colors, YEAR_BAR_COLOR};
use crate::data::stats::Summary;
use crate::view::{NO_JOURNAL_MESSAGE, NO_YEAR_MESSAGE};

const CHART_HEIGHT: f32 = 260.0;
const RANKING_HEIGHT: f32 = 420.0;

// ---------------------------------------------------------------------------
// Metrics row
// ---------------------------------------------------------------------------

/// Three metrics side by side: total papers, first year, last year.
pub fn metrics(ui: &mut Ui, summary: &Summary) {
    let items = [
        ("Total papers", summary.total.to_string()),
        ("First year", summary.first_year_text()),
        ("Last year", summary.last_year_text()),
    ];
    ui.columns(3, |cols: &mut [Ui]| {
        for (col, (label, value)) in cols.iter_mut().zip(items) {
            col.label(RichText::new(label).weak());
            col.label(RichText::new(value).size(28.0).strong());
        }
    });
}

// ---------------------------------------------------------------------------
// Publications over time (vertical bars)
// ---------------------------------------------------------------------------

pub fn year_chart(ui: &mut Ui, counts: Option<&[(i32, usize)]>) {
    let Some(counts) = counts else {
        ui.label(NO_YEAR_MESSAGE);
        return;
    };

    // Bars sit at 0..n so years with no papers leave no gaps, like a
    // categorical axis.
    let labels: Vec<String> = counts.iter().map(|(y, _)| y.to_string()).collect();
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (year, n))| {
            Bar::new(i as f64, *n as f64)
                .name(year.to_string())
                .width(0.6)
                .fill(YEAR_BAR_COLOR)
        })
        .collect();

    Plot::new("year_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Number of papers")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(YEAR_BAR_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Rankings (horizontal bars, highest count on top)
// ---------------------------------------------------------------------------

pub fn journal_chart(ui: &mut Ui, journals: Option<&[(String, usize)]>) {
    match journals {
        Some(journals) => ranking_chart(ui, "journal_chart", journals),
        None => {
            ui.label(NO_JOURNAL_MESSAGE);
        }
    }
}

/// Renders with empty data when there are no words.
pub fn word_chart(ui: &mut Ui, words: &[(String, usize)]) {
    ranking_chart(ui, "word_chart", words);
}

fn ranking_chart(ui: &mut Ui, id: &str, ranked: &[(String, usize)]) {
    let n = ranked.len();
    // First entry gets the top slot.
    let mut labels = vec![String::new(); n];
    let mut bars: Vec<Bar> = Vec::with_capacity(n);
    for (rank, ((label, count), color)) in ranked.iter().zip(ranked_colors(n)).enumerate() {
        let slot = n - 1 - rank;
        labels[slot] = label.clone();
        bars.push(
            Bar::new(slot as f64, *count as f64)
                .name(label)
                .width(0.7)
                .fill(color),
        );
    }

    Plot::new(id)
        .height(RANKING_HEIGHT)
        .x_axis_label("Count")
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark))
        .include_x(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

/// Axis text for a categorical axis: the label at integer positions only.
fn category_label(labels: &[String], mark: GridMark) -> String {
    let pos = mark.value.round();
    if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
        return String::new();
    }
    labels.get(pos as usize).cloned().unwrap_or_default()
}
