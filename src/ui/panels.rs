use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{
    year_slider_bounds, JournalFilter, ALL_JOURNALS, PREVIEW_ROWS_MAX, PREVIEW_ROWS_MIN,
};
use crate::state::AppState;
use crate::ui::{charts, table};
use crate::view::{NOTES, SUBTITLE, TITLE};

// ---------------------------------------------------------------------------
// Left side panel – source toggle and filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let toggled = ui
        .checkbox(&mut state.use_sample, "Use local cleaned sample (recommended)")
        .changed();
    if toggled {
        log::info!("Sample toggle set to {}", state.use_sample);
        state.load();
    }
    if !state.use_sample {
        ui.label(format!(
            "Attempting to load {} (may be large)",
            state.settings.full.display()
        ));
    }
    ui.add_space(4.0);

    ui.heading("Filters");
    ui.separator();

    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Year range ----
    ui.strong("Select year range");
    let (lo, hi) = year_slider_bounds(&table);
    let (from, to) = &mut state.filters.year_range;
    ui.add(egui::Slider::new(&mut *from, lo..=hi).text("from"));
    ui.add(egui::Slider::new(&mut *to, lo..=hi).text("to"));
    // Keep the range ordered whichever handle moved.
    if *from > *to {
        std::mem::swap(from, to);
    }
    ui.separator();

    // ---- Journal quick filter ----
    ui.strong("Top journals (quick filter)");
    let selected = state.filters.journal.label().to_string();
    egui::ComboBox::from_id_salt("journal_filter")
        .selected_text(&selected)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ScrollArea::vertical()
                .max_height(320.0)
                .show(ui, |ui: &mut Ui| {
                    let offered = state.journal_options.iter().map(String::as_str);
                    let choices = std::iter::once(ALL_JOURNALS).chain(offered);
                    for choice in choices {
                        if ui.selectable_label(selected == choice, choice).clicked() {
                            state.filters.journal = JournalFilter::from_selector(choice);
                        }
                    }
                });
        });
}

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
        });

        ui.separator();

        if let (Some(table), Some(view)) = (&state.table, &state.view) {
            ui.label(format!(
                "{} papers loaded, {} match the filters",
                table.len(),
                view.filtered_rows
            ));
        }

        if let Some(path) = &state.opened_path {
            ui.separator();
            ui.label(format!("Source: {}", path.display()));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – metrics, charts, preview, notes
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading(TITLE);
    ui.label(SUBTITLE);
    ui.add_space(8.0);

    if let Some(err) = &state.load_error {
        ui.label(RichText::new(format!("Error: {err}")).color(Color32::RED));
        return;
    }

    let Some(view) = &state.view else {
        ui.label("Loading…");
        return;
    };

    charts::metrics(ui, &view.summary);
    ui.separator();

    ui.heading("Publications over Time");
    charts::year_chart(ui, view.year_counts.as_deref());
    ui.separator();

    ui.heading("Top Journals");
    charts::journal_chart(ui, view.top_journals.as_deref());
    ui.separator();

    ui.heading("Top Words in Titles (simple frequency)");
    charts::word_chart(ui, &view.top_words);
    ui.separator();

    ui.heading("Sample of Papers");
    let mut n_show = state.filters.preview_rows();
    let moved = ui
        .add(
            egui::Slider::new(&mut n_show, PREVIEW_ROWS_MIN..=PREVIEW_ROWS_MAX)
                .text("How many rows to show"),
        )
        .changed();
    if moved {
        state.filters.set_preview_rows(n_show);
        state.recompute();
    }
    if let Some(view) = &state.view {
        table::preview_table(ui, &view.preview);
    }
    ui.separator();

    ui.heading("Notes");
    for note in NOTES {
        ui.label(format!("• {note}"));
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open paper metadata")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(path);
    }
}
