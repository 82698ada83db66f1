use std::collections::{BTreeMap, HashMap};

use super::filter::FilteredView;
use super::model::PaperTable;
use super::tokenize::tokenize;

/// Bars shown in the journal and title-word rankings.
pub const TOP_N: usize = 20;
/// Journals offered in the quick-filter selector.
pub const JOURNAL_OPTION_COUNT: usize = 50;

/// Marker displayed instead of a year when none is available.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Frequency counting
// ---------------------------------------------------------------------------

/// Occurrence counts that remember first-seen order, so equal counts rank in
/// the order their keys were first encountered.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn extend<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.add(key.as_ref());
        }
    }

    #[cfg(test)]
    pub fn count(&self, key: &str) -> usize {
        self.index.get(key).map_or(0, |&i| self.entries[i].1)
    }

    /// The `n` most frequent keys, highest count first.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        // stable: ties keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

// ---------------------------------------------------------------------------
// Summary metrics (full table)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

impl Summary {
    pub fn first_year_text(&self) -> String {
        year_text(self.first_year)
    }

    pub fn last_year_text(&self) -> String {
        year_text(self.last_year)
    }
}

fn year_text(year: Option<i32>) -> String {
    year.map_or_else(|| NOT_AVAILABLE.to_string(), |y| y.to_string())
}

/// Row count and year span of the whole table, ignoring any filters.
pub fn summarize(table: &PaperTable) -> Summary {
    let bounds = table.year_bounds();
    Summary {
        total: table.len(),
        first_year: bounds.map(|(lo, _)| lo),
        last_year: bounds.map(|(_, hi)| hi),
    }
}

// ---------------------------------------------------------------------------
// Chart data (filtered view)
// ---------------------------------------------------------------------------

/// Papers per year in ascending year order. `None` when the table has no
/// year column; rows with a missing year are not counted.
pub fn year_counts(view: &FilteredView<'_>) -> Option<Vec<(i32, usize)>> {
    if !view.table().capabilities().year {
        return None;
    }
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in view.records().filter_map(|r| r.year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    Some(counts.into_iter().collect())
}

/// Most frequent journals (missing counted as "Unknown"). `None` when the
/// table has no journal column.
pub fn top_journals(view: &FilteredView<'_>, n: usize) -> Option<Vec<(String, usize)>> {
    if !view.table().capabilities().journal {
        return None;
    }
    let mut freq = FrequencyTable::new();
    freq.extend(view.records().map(|r| r.journal_or_unknown()));
    Some(freq.most_common(n))
}

/// Title word frequencies over every non-missing title in the view.
pub fn title_tokens(view: &FilteredView<'_>) -> FrequencyTable {
    let mut freq = FrequencyTable::new();
    for title in view.records().filter_map(|r| r.title.as_deref()) {
        freq.extend(tokenize(title));
    }
    freq
}

/// Most frequent title words; empty when there are no titles or no tokens.
pub fn top_title_tokens(view: &FilteredView<'_>, n: usize) -> Vec<(String, usize)> {
    title_tokens(view).most_common(n)
}

/// Choices for the journal selector: the most frequent journals of the full
/// table. Empty when the table has no journal column.
pub fn journal_options(table: &PaperTable, n: usize) -> Vec<String> {
    top_journals(&FilteredView::all(table), n)
        .unwrap_or_default()
        .into_iter()
        .map(|(journal, _)| journal)
        .collect()
}
