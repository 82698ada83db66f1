use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::{Filters, JournalFilter};
use crate::data::loader::LoadRequest;

pub const DEFAULT_SAMPLE_PATH: &str = "metadata_cleaned_sample.csv";
pub const DEFAULT_FULL_PATH: &str = "metadata.csv";
/// Rows read from the full metadata file when the sample toggle is off.
pub const DEFAULT_FULL_ROWS: usize = 20_000;

/// Explore CORD-19 style paper metadata: counts per year, top journals and
/// the most frequent title words, filtered by year range and journal.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Settings {
    /// Cleaned sample file, preferred whenever it exists
    #[arg(long, default_value = DEFAULT_SAMPLE_PATH)]
    pub sample: PathBuf,

    /// Full metadata file, used when the sample is missing
    #[arg(long, default_value = DEFAULT_FULL_PATH)]
    pub full: PathBuf,

    /// Leading rows read from the full file when the sample toggle is off
    #[arg(long, default_value_t = DEFAULT_FULL_ROWS)]
    pub full_rows: usize,

    /// Start with the "use local cleaned sample" toggle switched off
    #[arg(long, default_value_t = false)]
    pub no_sample: bool,

    /// Print the dashboard as text instead of opening a window
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// First year of the range (headless only; defaults to the data's first year)
    #[arg(long, requires = "headless")]
    pub year_from: Option<i32>,

    /// Last year of the range (headless only; defaults to the data's last year)
    #[arg(long, requires = "headless")]
    pub year_to: Option<i32>,

    /// Journal to keep, or "All" (headless only)
    #[arg(long, requires = "headless")]
    pub journal: Option<String>,

    /// Rows in the sample table, 5 to 200 (headless only)
    #[arg(long, requires = "headless")]
    pub rows: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sample: PathBuf::from(DEFAULT_SAMPLE_PATH),
            full: PathBuf::from(DEFAULT_FULL_PATH),
            full_rows: DEFAULT_FULL_ROWS,
            no_sample: false,
            headless: false,
            year_from: None,
            year_to: None,
            journal: None,
            rows: None,
        }
    }
}

impl Settings {
    /// The load for the current toggle state. The sample is preferred either
    /// way; the toggle only decides whether the full-file fallback is
    /// row-limited.
    pub fn load_request(&self, use_sample: bool, preferred: Option<&PathBuf>) -> LoadRequest {
        LoadRequest {
            preferred: preferred.unwrap_or(&self.sample).clone(),
            fallback: Some(self.full.clone()),
            row_limit: (!use_sample).then_some(self.full_rows),
        }
    }

    /// Apply the headless filter flags on top of `filters`.
    pub fn apply_filter_flags(&self, filters: &mut Filters) {
        if let Some(from) = self.year_from {
            filters.year_range.0 = from;
        }
        if let Some(to) = self.year_to {
            filters.year_range.1 = to;
        }
        if let Some(journal) = &self.journal {
            filters.journal = JournalFilter::from_selector(journal);
        }
        if let Some(rows) = self.rows {
            filters.set_preview_rows(rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_bundled_file_names() {
        let s = Settings::parse_from(["paper-explorer"]);
        assert_eq!(s.sample, PathBuf::from(DEFAULT_SAMPLE_PATH));
        assert_eq!(s.full, PathBuf::from(DEFAULT_FULL_PATH));
        assert_eq!(s.full_rows, DEFAULT_FULL_ROWS);
        assert!(!s.headless && !s.no_sample);
    }

    #[test]
    fn toggle_only_limits_the_fallback() {
        let s = Settings::default();
        let on = s.load_request(true, None);
        let off = s.load_request(false, None);
        assert_eq!(on.preferred, off.preferred);
        assert_eq!(on.row_limit, None);
        assert_eq!(off.row_limit, Some(DEFAULT_FULL_ROWS));

        let picked = PathBuf::from("other.parquet");
        assert_eq!(s.load_request(true, Some(&picked)).preferred, picked);
    }

    #[test]
    fn filter_flags_require_headless() {
        assert!(Settings::try_parse_from(["paper-explorer", "--journal", "Cell"]).is_err());

        let s = Settings::try_parse_from([
            "paper-explorer",
            "--headless",
            "--year-from",
            "2020",
            "--journal",
            "Cell",
            "--rows",
            "1000",
        ])
        .unwrap();
        let mut filters = Filters::default();
        s.apply_filter_flags(&mut filters);
        assert_eq!(filters.year_range, (2020, 2022));
        assert_eq!(filters.journal, JournalFilter::Named("Cell".into()));
        assert_eq!(filters.preview_rows(), 200);
    }
}
