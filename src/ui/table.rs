use eframe::egui::{self, Align, Layout, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::view::Preview;

const ROW_HEIGHT: f32 = 18.0;
const MAX_CELL_CHARS: usize = 120;

/// Preview table of the first filtered rows, every column.
pub fn preview_table(ui: &mut Ui, preview: &Preview) {
    if preview.columns.is_empty() {
        ui.label("The file has no columns.");
        return;
    }

    ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(
                    Column::auto().at_least(40.0).at_most(360.0).clip(true),
                    preview.columns.len(),
                )
                .header(20.0, |mut header| {
                    for name in &preview.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, preview.rows.len(), |mut row| {
                        let cells = &preview.rows[row.index()];
                        for cell in cells {
                            row.col(|ui: &mut Ui| {
                                ui.add(egui::Label::new(shorten(cell)).truncate())
                                    .on_hover_text(cell);
                            });
                        }
                    });
                });
        });
}

/// Cut very long cells (abstracts) before layout.
fn shorten(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_CHARS {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(MAX_CELL_CHARS).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_cells_are_cut() {
        assert_eq!(shorten("short"), "short");
        let long = "x".repeat(500);
        let cut = shorten(&long);
        assert_eq!(cut.chars().count(), MAX_CELL_CHARS + 1);
        assert!(cut.ends_with('…'));
    }
}
