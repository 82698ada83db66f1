use chrono::{NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Column names and sentinels
// ---------------------------------------------------------------------------

pub const TITLE_COLUMN: &str = "title";
pub const JOURNAL_COLUMN: &str = "journal";
pub const PUBLISH_TIME_COLUMN: &str = "publish_time";
pub const YEAR_COLUMN: &str = "year";

/// Label used for papers without a journal, both for counting and filtering.
pub const UNKNOWN_JOURNAL: &str = "Unknown";

/// Cell texts that count as a missing value (the usual dataframe defaults).
const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>", "NaT",
];

// ---------------------------------------------------------------------------
// Capabilities – which optional columns the table carries
// ---------------------------------------------------------------------------

/// Presence of the optional columns, probed once when the table is built.
/// Features that need a column check the matching flag and degrade instead of
/// failing when it is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub title: bool,
    pub journal: bool,
    pub publish_time: bool,
    pub year: bool,
}

impl Capabilities {
    fn probe(columns: &[String]) -> Self {
        let has = |name: &str| columns.iter().any(|c| c == name);
        Capabilities {
            title: has(TITLE_COLUMN),
            journal: has(JOURNAL_COLUMN),
            publish_time: has(PUBLISH_TIME_COLUMN),
            year: has(YEAR_COLUMN),
        }
    }
}

// ---------------------------------------------------------------------------
// PaperRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single paper (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct PaperRecord {
    pub title: Option<String>,
    pub journal: Option<String>,
    /// Parsed `publish_time`; `None` when missing or unparseable.
    pub publish_time: Option<NaiveDate>,
    pub year: Option<i32>,
    /// Source text of every column, aligned with [`PaperTable::columns`].
    pub cells: Vec<Option<String>>,
}

impl PaperRecord {
    /// Journal name with a missing value mapped to [`UNKNOWN_JOURNAL`].
    pub fn journal_or_unknown(&self) -> &str {
        self.journal.as_deref().unwrap_or(UNKNOWN_JOURNAL)
    }
}

// ---------------------------------------------------------------------------
// PaperTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperTable {
    columns: Vec<String>,
    records: Vec<PaperRecord>,
    capabilities: Capabilities,
}

impl PaperTable {
    /// Build the table from raw text cells. Each row is padded or cut to the
    /// column count; typed fields are parsed from their named columns.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let capabilities = Capabilities::probe(&columns);
        let position = |name: &str| columns.iter().position(|c| c == name);
        let title_idx = position(TITLE_COLUMN);
        let journal_idx = position(JOURNAL_COLUMN);
        let publish_idx = position(PUBLISH_TIME_COLUMN);
        let year_idx = position(YEAR_COLUMN);

        let mut bad_dates = 0usize;
        let mut bad_years = 0usize;

        let records: Vec<PaperRecord> = rows
            .into_iter()
            .map(|mut cells| {
                cells.resize(columns.len(), None);
                let text = |idx: Option<usize>| idx.and_then(|i| cells[i].clone());

                let publish_time = text(publish_idx).and_then(|raw| {
                    let parsed = parse_date(&raw);
                    if parsed.is_none() {
                        bad_dates += 1;
                    }
                    parsed
                });
                let year = text(year_idx).and_then(|raw| {
                    let parsed = parse_year(&raw);
                    if parsed.is_none() {
                        bad_years += 1;
                    }
                    parsed
                });

                PaperRecord {
                    title: text(title_idx),
                    journal: text(journal_idx),
                    publish_time,
                    year,
                    cells,
                }
            })
            .collect();

        if bad_dates > 0 {
            log::warn!("{bad_dates} publish_time values could not be parsed; treated as missing");
        }
        if bad_years > 0 {
            log::warn!("{bad_years} year values are not integers; treated as missing");
        }

        PaperTable {
            columns,
            records,
            capabilities,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[PaperRecord] {
        &self.records
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Number of papers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Smallest and largest non-missing year, if the table has any.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        if !self.capabilities.year {
            return None;
        }
        let mut years = self.records.iter().filter_map(|r| r.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Display text of one cell. The `publish_time` column shows the parsed
    /// date (empty when unparseable); other columns show their source text.
    pub fn display_cell(&self, row: usize, column: usize) -> String {
        let Some(record) = self.records.get(row) else {
            return String::new();
        };
        if self.columns.get(column).map(String::as_str) == Some(PUBLISH_TIME_COLUMN) {
            return record
                .publish_time
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
        }
        record
            .cells
            .get(column)
            .cloned()
            .flatten()
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Map a raw cell to `None` when it is one of the missing-value markers.
pub fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Parse a date in one of the textual layouts found in metadata exports.
/// Partial dates (`2020`, `2020 Mar`) resolve to the first day of the period.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y %b %d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s} 01"), "%Y %b %d") {
        return Some(d);
    }
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
    }
    None
}

/// Parse a year cell. Integral float renderings such as `2020.0` are accepted.
pub fn parse_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(s: &str) -> Option<String> {
        normalize_cell(s)
    }

    #[test]
    fn parses_common_date_layouts() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        assert_eq!(parse_date("2020-03-15"), d(2020, 3, 15));
        assert_eq!(parse_date("2020-03-15 10:30:00"), d(2020, 3, 15));
        assert_eq!(parse_date("2020-03-15T10:30:00"), d(2020, 3, 15));
        assert_eq!(parse_date("2020/03/15"), d(2020, 3, 15));
        assert_eq!(parse_date("03/15/2020"), d(2020, 3, 15));
        assert_eq!(parse_date("2020 Mar 15"), d(2020, 3, 15));
        assert_eq!(parse_date("2020 Mar"), d(2020, 3, 1));
        assert_eq!(parse_date("2020"), d(2020, 1, 1));
    }

    #[test]
    fn unparseable_date_is_missing() {
        assert_eq!(parse_date("sometime in spring"), None);
        assert_eq!(parse_date("2020-13-45"), None);
    }

    #[test]
    fn year_accepts_integral_floats_only() {
        assert_eq!(parse_year("2020"), Some(2020));
        assert_eq!(parse_year(" 2021.0 "), Some(2021));
        assert_eq!(parse_year("2020.5"), None);
        assert_eq!(parse_year("soon"), None);
    }

    #[test]
    fn missing_markers_become_none() {
        assert_eq!(cell(""), None);
        assert_eq!(cell("NaN"), None);
        assert_eq!(cell("  "), None);
        assert_eq!(cell("Nature"), Some("Nature".to_string()));
    }

    #[test]
    fn capabilities_follow_columns() {
        let table = PaperTable::from_rows(
            vec!["title".into(), "publish_time".into()],
            vec![vec![cell("A"), cell("2020-01-01")]],
        );
        let caps = table.capabilities();
        assert!(caps.title && caps.publish_time);
        assert!(!caps.journal && !caps.year);
        assert_eq!(table.year_bounds(), None);
    }

    #[test]
    fn short_rows_are_padded_and_typed() {
        let table = PaperTable::from_rows(
            vec!["title".into(), "journal".into(), "year".into()],
            vec![
                vec![cell("Only a title")],
                vec![cell("B"), cell("Cell"), cell("2019.0")],
                vec![cell("C"), cell(""), cell("2022")],
            ],
        );
        let rows = table.records();
        assert_eq!(rows[0].cells.len(), 3);
        assert_eq!(rows[0].journal_or_unknown(), UNKNOWN_JOURNAL);
        assert_eq!(rows[1].year, Some(2019));
        assert_eq!(rows[2].journal, None);
        assert_eq!(table.year_bounds(), Some((2019, 2022)));
    }

    #[test]
    fn display_cell_shows_parsed_publish_time() {
        let table = PaperTable::from_rows(
            vec!["title".into(), "publish_time".into()],
            vec![
                vec![cell("A"), cell("2020 Mar 15")],
                vec![cell("B"), cell("garbage")],
            ],
        );
        assert_eq!(table.display_cell(0, 1), "2020-03-15");
        assert_eq!(table.display_cell(1, 1), "");
        assert_eq!(table.display_cell(1, 0), "B");
        assert_eq!(table.display_cell(9, 0), "");
    }
}
