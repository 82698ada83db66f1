//! Plain-text rendering of a [`DashboardView`] for `--headless` runs.

use std::fmt::Write as _;

use crate::view::{
    DashboardView, NOTES, NO_JOURNAL_MESSAGE, NO_YEAR_MESSAGE, SUBTITLE, TITLE,
};

const BAR_WIDTH: usize = 40;

pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, view);
    out
}

fn write_report(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{SUBTITLE}")?;
    writeln!(out)?;

    let s = &view.summary;
    writeln!(out, "Total papers: {}", s.total)?;
    writeln!(out, "First year:   {}", s.first_year_text())?;
    writeln!(out, "Last year:    {}", s.last_year_text())?;
    writeln!(out, "Matching filters: {}", view.filtered_rows)?;

    section(out, "Publications over Time")?;
    match &view.year_counts {
        Some(counts) => {
            let rows: Vec<(String, usize)> =
                counts.iter().map(|(y, n)| (y.to_string(), *n)).collect();
            bars(out, &rows)?;
        }
        None => writeln!(out, "{NO_YEAR_MESSAGE}")?,
    }

    section(out, "Top Journals")?;
    match &view.top_journals {
        Some(journals) => bars(out, journals)?,
        None => writeln!(out, "{NO_JOURNAL_MESSAGE}")?,
    }

    section(out, "Top Words in Titles (simple frequency)")?;
    bars(out, &view.top_words)?;

    section(out, "Sample of Papers")?;
    writeln!(out, "{}", view.preview.columns.join("\t"))?;
    for row in &view.preview.rows {
        writeln!(out, "{}", row.join("\t"))?;
    }

    section(out, "Notes")?;
    for note in NOTES {
        writeln!(out, "- {note}")?;
    }
    Ok(())
}

fn section(out: &mut String, heading: &str) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "## {heading}")
}

/// Horizontal text bars scaled to the largest count.
fn bars(out: &mut String, rows: &[(String, usize)]) -> std::fmt::Result {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, n)| *n).max().unwrap_or(0);
    for (label, count) in rows {
        let len = if max == 0 { 0 } else { count * BAR_WIDTH / max };
        writeln!(
            out,
            "{label:<label_width$}  {bar} {count}",
            bar = "█".repeat(len.max(1))
        )?;
    }
    Ok(())
}
