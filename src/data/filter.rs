use super::model::{PaperRecord, PaperTable};

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

/// Year slider bounds used when the table carries no year data.
pub const DEFAULT_YEAR_BOUNDS: (i32, i32) = (2019, 2022);

/// Selector value meaning "no journal filter".
pub const ALL_JOURNALS: &str = "All";

pub const PREVIEW_ROWS_MIN: usize = 5;
pub const PREVIEW_ROWS_MAX: usize = 200;
pub const PREVIEW_ROWS_DEFAULT: usize = 20;

/// Journal selection: either everything or one exact journal name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JournalFilter {
    #[default]
    All,
    Named(String),
}

impl JournalFilter {
    /// Interpret a selector value; [`ALL_JOURNALS`] means no filter.
    pub fn from_selector(value: &str) -> Self {
        if value == ALL_JOURNALS {
            JournalFilter::All
        } else {
            JournalFilter::Named(value.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            JournalFilter::All => ALL_JOURNALS,
            JournalFilter::Named(name) => name,
        }
    }

    fn matches(&self, record: &PaperRecord) -> bool {
        match self {
            JournalFilter::All => true,
            JournalFilter::Named(name) => record.journal_or_unknown() == name,
        }
    }
}

/// Everything the user can choose in the filter widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    /// Inclusive `(from, to)` year range.
    pub year_range: (i32, i32),
    pub journal: JournalFilter,
    preview_rows: usize,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            year_range: DEFAULT_YEAR_BOUNDS,
            journal: JournalFilter::All,
            preview_rows: PREVIEW_ROWS_DEFAULT,
        }
    }
}

impl Filters {
    /// Filters that let every row of `table` through.
    pub fn for_table(table: &PaperTable) -> Self {
        Self {
            year_range: year_slider_bounds(table),
            ..Self::default()
        }
    }

    /// Adapt to a newly loaded table: the year range resets to the table's
    /// bounds and a journal the table no longer offers falls back to "All".
    /// The preview row count is kept.
    pub fn reconcile(&mut self, table: &PaperTable, journal_options: &[String]) {
        self.year_range = year_slider_bounds(table);
        if let JournalFilter::Named(name) = &self.journal {
            if !journal_options.contains(name) {
                self.journal = JournalFilter::All;
            }
        }
    }

    /// Number of rows shown in the preview table, within its slider range.
    pub fn preview_rows(&self) -> usize {
        self.preview_rows
    }

    pub fn set_preview_rows(&mut self, n: usize) {
        self.preview_rows = n.clamp(PREVIEW_ROWS_MIN, PREVIEW_ROWS_MAX);
    }
}

/// Bounds for the year range selector: the observed min/max year, or
/// [`DEFAULT_YEAR_BOUNDS`] when the table has no year data.
pub fn year_slider_bounds(table: &PaperTable) -> (i32, i32) {
    table.year_bounds().unwrap_or(DEFAULT_YEAR_BOUNDS)
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Read-only subset of a [`PaperTable`], kept as row indices in table order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a PaperTable,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// View over every row.
    pub fn all(table: &'a PaperTable) -> Self {
        Self {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    pub fn table(&self) -> &'a PaperTable {
        self.table
    }

    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Records of the view in order.
    pub fn records(&self) -> impl Iterator<Item = &'a PaperRecord> + '_ {
        let records = self.table.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Row indices of the first `n` records.
    pub fn head(&self, n: usize) -> &[usize] {
        &self.indices[..n.min(self.indices.len())]
    }
}

/// Apply the year range and journal selection to `table`.
///
/// A row passes when:
/// * the table has no `year` column, or the row's year lies in the inclusive
///   range (a missing year never does)
/// * the journal filter is "All", or the row's journal (missing → "Unknown")
///   equals the selected name
pub fn filtered_view<'a>(table: &'a PaperTable, filters: &Filters) -> FilteredView<'a> {
    let check_year = table.capabilities().year;
    let (from, to) = filters.year_range;

    let indices = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            if check_year {
                match record.year {
                    Some(y) if y >= from && y <= to => {}
                    _ => return false,
                }
            }
            filters.journal.matches(record)
        })
        .map(|(i, _)| i)
        .collect();

    FilteredView { table, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::normalize_cell;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> PaperTable {
        PaperTable::from_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| normalize_cell(c)).collect())
                .collect(),
        )
    }

    fn example() -> PaperTable {
        table(
            &["title", "journal", "year"],
            &[
                &["Viral Pneumonia Outbreak", "Nature", "2020"],
                &["Viral spread models", "Nature", "2021"],
                &["Cancer therapy", "Cell", "2020"],
            ],
        )
    }

    fn filters(range: (i32, i32), journal: &str) -> Filters {
        Filters {
            year_range: range,
            journal: JournalFilter::from_selector(journal),
            ..Filters::default()
        }
    }

    #[test]
    fn year_range_is_inclusive() {
        let t = example();
        let view = filtered_view(&t, &filters((2020, 2020), ALL_JOURNALS));
        assert_eq!(view.indices(), &[0, 2]);
        let view = filtered_view(&t, &filters((2020, 2021), ALL_JOURNALS));
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn missing_year_is_excluded() {
        let t = table(&["title", "year"], &[&["A", "2020"], &["B", ""]]);
        let view = filtered_view(&t, &filters((1900, 2100), ALL_JOURNALS));
        assert_eq!(view.indices(), &[0]);
    }

    #[test]
    fn no_year_column_skips_year_condition() {
        let t = table(&["title", "journal"], &[&["A", "Nature"], &["B", "Cell"]]);
        let view = filtered_view(&t, &filters((3000, 3001), ALL_JOURNALS));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn journal_filter_matches_unknown_for_missing() {
        let t = table(
            &["title", "journal", "year"],
            &[&["A", "", "2020"], &["B", "Cell", "2020"], &["C", "NaN", "2021"]],
        );
        let view = filtered_view(&t, &filters((2020, 2021), "Unknown"));
        assert_eq!(view.indices(), &[0, 2]);
        let view = filtered_view(&t, &filters((2020, 2021), "Cell"));
        assert_eq!(view.indices(), &[1]);
    }

    #[test]
    fn conditions_compose() {
        let t = example();
        let view = filtered_view(&t, &filters((2021, 2021), "Nature"));
        assert_eq!(view.indices(), &[1]);
        let view = filtered_view(&t, &filters((2021, 2021), "Cell"));
        assert!(view.is_empty());
    }

    #[test]
    fn head_is_bounded_by_view_length() {
        let t = example();
        let view = FilteredView::all(&t);
        assert_eq!(view.head(2), &[0, 1]);
        assert_eq!(view.head(50).len(), 3);
    }

    #[test]
    fn preview_rows_are_clamped() {
        let mut f = Filters::default();
        assert_eq!(f.preview_rows(), PREVIEW_ROWS_DEFAULT);
        f.set_preview_rows(1);
        assert_eq!(f.preview_rows(), PREVIEW_ROWS_MIN);
        f.set_preview_rows(10_000);
        assert_eq!(f.preview_rows(), PREVIEW_ROWS_MAX);
    }

    #[test]
    fn bounds_default_without_year_data() {
        let t = table(&["title", "year"], &[&["A", ""]]);
        assert_eq!(Filters::for_table(&t).year_range, DEFAULT_YEAR_BOUNDS);
        assert_eq!(Filters::for_table(&example()).year_range, (2020, 2021));
    }

    #[test]
    fn reconcile_drops_unoffered_journal() {
        let t = example();
        let mut f = filters((1990, 1991), "Lancet");
        f.set_preview_rows(50);
        f.reconcile(&t, &["Nature".to_string(), "Cell".to_string()]);
        assert_eq!(f.year_range, (2020, 2021));
        assert_eq!(f.journal, JournalFilter::All);
        assert_eq!(f.preview_rows(), 50);

        let mut f = filters((2020, 2021), "Cell");
        f.reconcile(&t, &["Nature".to_string(), "Cell".to_string()]);
        assert_eq!(f.journal, JournalFilter::Named("Cell".into()));
    }

    fn arb_table() -> impl Strategy<Value = PaperTable> {
        let row = (
            prop::option::of(2015i32..2025),
            prop::option::of(prop::sample::select(vec!["Nature", "Cell", "Lancet"])),
        );
        prop::collection::vec(row, 0..40).prop_map(|rows| {
            PaperTable::from_rows(
                vec!["title".into(), "journal".into(), "year".into()],
                rows.into_iter()
                    .map(|(year, journal)| {
                        vec![
                            Some("t".to_string()),
                            journal.map(str::to_string),
                            year.map(|y| y.to_string()),
                        ]
                    })
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn rows_satisfy_filters(
            t in arb_table(),
            from in 2014i32..2026,
            span in 0i32..6,
            journal in prop::sample::select(vec!["All", "Nature", "Cell", "Unknown"]),
        ) {
            let f = filters((from, from + span), journal);
            for record in filtered_view(&t, &f).records() {
                let year = record.year.expect("filtered rows carry a year");
                prop_assert!(year >= from && year <= from + span);
                if journal != ALL_JOURNALS {
                    prop_assert_eq!(record.journal_or_unknown(), journal);
                }
            }
        }

        #[test]
        fn narrowing_never_adds_rows(
            t in arb_table(),
            from in 2014i32..2026,
            span in 1i32..6,
            journal in prop::sample::select(vec!["Nature", "Cell", "Unknown"]),
        ) {
            let wide = filtered_view(&t, &filters((from, from + span), ALL_JOURNALS)).len();
            let narrow = filtered_view(&t, &filters((from, from + span - 1), ALL_JOURNALS)).len();
            let one_journal = filtered_view(&t, &filters((from, from + span), journal)).len();
            prop_assert!(narrow <= wide);
            prop_assert!(one_journal <= wide);
        }
    }
}
