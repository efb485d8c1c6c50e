use crate::models::{AnalysisResult, RiskLevel};

/// Risk-level filter for the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Level(RiskLevel),
}

impl LevelFilter {
    pub fn matches(&self, level: RiskLevel) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Level(wanted) => *wanted == level,
        }
    }

    /// Cycle All -> Low -> Medium -> High -> Critical -> All.
    pub fn next(self) -> Self {
        match self {
            LevelFilter::All => LevelFilter::Level(RiskLevel::Low),
            LevelFilter::Level(RiskLevel::Critical) => LevelFilter::All,
            LevelFilter::Level(level) => {
                let index = RiskLevel::ALL.iter().position(|l| *l == level).unwrap_or(0);
                LevelFilter::Level(RiskLevel::ALL[index + 1])
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LevelFilter::All => "All",
            LevelFilter::Level(level) => level.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Risk,
    Name,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::Date => SortKey::Risk,
            SortKey::Risk => SortKey::Name,
            SortKey::Name => SortKey::Date,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Date => "Date",
            SortKey::Risk => "Risk",
            SortKey::Name => "Name",
        }
    }
}

/// Derive the filtered, sorted history view. Pure: never mutates the input
/// and returns an identical sequence for identical inputs.
///
/// Search is a case-insensitive substring match on the file name; sorting is
/// date descending, risk percentage descending, or file name ascending.
pub fn filter_and_sort(
    history: &[AnalysisResult],
    search: &str,
    level: LevelFilter,
    sort: SortKey,
) -> Vec<AnalysisResult> {
    let needle = search.to_lowercase();
    let mut view: Vec<AnalysisResult> = history
        .iter()
        .filter(|entry| entry.file_name.to_lowercase().contains(&needle))
        .filter(|entry| level.matches(entry.risk_level))
        .cloned()
        .collect();

    match sort {
        SortKey::Date => view.sort_by(|a, b| b.analysis_date.cmp(&a.analysis_date)),
        SortKey::Risk => view.sort_by(|a, b| b.risk_percentage.cmp(&a.risk_percentage)),
        SortKey::Name => view.sort_by(|a, b| a.file_name.cmp(&b.file_name)),
    }

    view
}
