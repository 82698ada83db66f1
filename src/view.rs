use crate::data::filter::{filtered_view, Filters};
use crate::data::model::PaperTable;
use crate::data::stats::{self, Summary, TOP_N};

pub const TITLE: &str = "CORD-19 Data Explorer";
pub const SUBTITLE: &str =
    "Simple exploration of the CORD-19 metadata (titles, abstracts, dates, journals).";

pub const NO_YEAR_MESSAGE: &str = "Year data not available.";
pub const NO_JOURNAL_MESSAGE: &str = "Journal column missing.";

pub const NOTES: &[&str] = &[
    "If the file is large, use the cleaned sample created by the notebook or check the \
     'Use local cleaned sample' box.",
    "Word cloud requires additional libraries; this app shows a simple frequency bar chart instead.",
];

// ---------------------------------------------------------------------------
// One render pass worth of data
// ---------------------------------------------------------------------------

/// Everything a front end needs to draw the dashboard for one set of filters.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Metrics of the unfiltered table.
    pub summary: Summary,
    pub filtered_rows: usize,
    /// `None` when the table has no year column.
    pub year_counts: Option<Vec<(i32, usize)>>,
    /// `None` when the table has no journal column.
    pub top_journals: Option<Vec<(String, usize)>>,
    pub top_words: Vec<(String, usize)>,
    pub preview: Preview,
}

/// First rows of the filtered view, rendered to text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DashboardView {
    /// Run the whole pipeline once: summary of the full table, then the
    /// filtered view and every chart and the preview derived from it.
    pub fn compute(table: &PaperTable, filters: &Filters) -> Self {
        let view = filtered_view(table, filters);

        let preview = Preview {
            columns: table.columns().to_vec(),
            rows: view
                .head(filters.preview_rows())
                .iter()
                .map(|&row| {
                    (0..table.columns().len())
                        .map(|col| table.display_cell(row, col))
                        .collect()
                })
                .collect(),
        };

        DashboardView {
            summary: stats::summarize(table),
            filtered_rows: view.len(),
            year_counts: stats::year_counts(&view),
            top_journals: stats::top_journals(&view, TOP_N),
            top_words: stats::top_title_tokens(&view, TOP_N),
            preview,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::normalize_cell;
    use pretty_assertions::assert_eq;

    fn table(columns: &[&str], rows: &[&[&str]]) -> PaperTable {
        PaperTable::from_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| normalize_cell(c)).collect())
                .collect(),
        )
    }

    #[test]
    fn computes_every_section_from_filters() {
        let t = table(
            &["title", "journal", "publish_time", "year"],
            &[
                &["Viral Pneumonia Outbreak", "Nature", "2020-02-01", "2020"],
                &["Viral spread models", "Nature", "2021-06-01", "2021"],
                &["Cancer therapy", "Cell", "bad", "2020"],
            ],
        );
        let mut filters = Filters::default();
        filters.year_range = (2020, 2020);
        let view = DashboardView::compute(&t, &filters);

        assert_eq!(view.summary.total, 3);
        assert_eq!(view.summary.last_year, Some(2021));
        assert_eq!(view.filtered_rows, 2);
        assert_eq!(view.year_counts, Some(vec![(2020, 2)]));
        assert_eq!(
            view.top_journals,
            Some(vec![("Nature".to_string(), 1), ("Cell".to_string(), 1)])
        );
        assert_eq!(view.top_words[0], ("viral".to_string(), 1));
        assert_eq!(
            view.preview.rows,
            vec![
                vec!["Viral Pneumonia Outbreak", "Nature", "2020-02-01", "2020"],
                vec!["Cancer therapy", "Cell", "", "2020"],
            ]
        );
    }

    #[test]
    fn preview_respects_row_count() {
        let rows: Vec<String> = (0..30).map(|i| format!("Paper {i}")).collect();
        let rows: Vec<[&str; 1]> = rows.iter().map(|r| [r.as_str()]).collect();
        let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let t = table(&["title"], &rows);

        let mut filters = Filters::default();
        assert_eq!(DashboardView::compute(&t, &filters).preview.rows.len(), 20);
        filters.set_preview_rows(5);
        let view = DashboardView::compute(&t, &filters);
        assert_eq!(view.preview.rows.len(), 5);
        assert_eq!(view.preview.rows[4], vec!["Paper 4"]);
    }

    #[test]
    fn degrades_without_optional_columns() {
        let t = table(&["abstract"], &[&["text"]]);
        let filters = Filters::default();
        let view = DashboardView::compute(&t, &filters);
        assert_eq!(view.summary.first_year_text(), "N/A");
        assert_eq!(view.year_counts, None);
        assert_eq!(view.top_journals, None);
        assert!(view.top_words.is_empty());
        assert_eq!(view.filtered_rows, 1);
    }
}
