use std::path::PathBuf;

use crate::data::aggregate::DEFAULT_TOP_N;
use crate::data::histogram::DEFAULT_BINS;

/// Environment variable overriding the CSV opened at start-up.
pub const SOURCE_ENV: &str = "SONGLIST_CSV";

/// Comma-separated numeric columns for the heatmap; unset means all of them.
pub const CORRELATION_ENV: &str = "SONGLIST_CORRELATION_COLUMNS";

const DEFAULT_SOURCE: &str = "processed_cleandata.csv";

/// Dashboard settings. Defaults reproduce the stock layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// CSV loaded at start-up.
    pub source: PathBuf,
    /// Rows in the "top tracks" table.
    pub top_n: usize,
    /// Bins for both histograms.
    pub histogram_bins: usize,
    /// Bars in the "popularity by artist" chart.
    pub artist_limit: usize,
    /// Rows in the preview table.
    pub preview_rows: usize,
    /// Columns of the correlation heatmap; empty means every numeric column.
    pub correlation_columns: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            top_n: DEFAULT_TOP_N,
            histogram_bins: DEFAULT_BINS,
            artist_limit: 10,
            preview_rows: 5,
            correlation_columns: Vec::new(),
        }
    }
}

impl DashboardConfig {
    /// Defaults, with the source path taken from `SONGLIST_CSV` when set.
    pub fn from_env() -> Self {
        let mut config = Self::with_source_override(std::env::var_os(SOURCE_ENV).map(PathBuf::from));
        if let Ok(list) = std::env::var(CORRELATION_ENV) {
            config.correlation_columns = parse_column_list(&list);
            log::info!("{CORRELATION_ENV} set, correlating {:?}", config.correlation_columns);
        }
        config
    }

    fn with_source_override(source: Option<PathBuf>) -> Self {
        let mut config = Self::default();
        match source {
            Some(path) if !path.as_os_str().is_empty() => {
                log::info!("{SOURCE_ENV} set, using {}", path.display());
                config.source = path;
            }
            _ => {}
        }
        config
    }
}

/// Split a comma-separated column list, dropping blanks.
fn parse_column_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_dashboard() {
        let config = DashboardConfig::default();
        assert_eq!(config.source, PathBuf::from("processed_cleandata.csv"));
        assert_eq!(config.top_n, 10);
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.artist_limit, 10);
        assert_eq!(config.preview_rows, 5);
        assert!(config.correlation_columns.is_empty());
    }

    #[test]
    fn override_replaces_source_unless_blank() {
        let config = DashboardConfig::with_source_override(Some(PathBuf::from("/data/songs.csv")));
        assert_eq!(config.source, PathBuf::from("/data/songs.csv"));

        let config = DashboardConfig::with_source_override(Some(PathBuf::new()));
        assert_eq!(config.source, PathBuf::from("processed_cleandata.csv"));
    }

    #[test]
    fn column_list_is_trimmed_and_blanks_dropped() {
        assert_eq!(parse_column_list(" energy, track_popularity ,,"), vec!["energy", "track_popularity"]);
        assert!(parse_column_list("  ").is_empty());
    }
}
