use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::GenreColors;
use crate::config::DashboardConfig;
use crate::data::aggregate::{average_by_group, top_by_popularity, GroupAverage, TopTrack};
use crate::data::cache::DatasetCache;
use crate::data::correlation::{correlation_matrix, correlation_matrix_for, CorrelationMatrix};
use crate::data::describe::{describe, SummaryStats};
use crate::data::filter::{distinct_genres, filter_by_genre, GenreSelection};
use crate::data::histogram::{histogram, kde_curve, Histogram};
use crate::data::model::{Dataset, ENERGY, PLAYLIST_GENRE, TRACK_ARTIST, TRACK_POPULARITY};
use crate::data::Result;

const KDE_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Everything the dashboard renders for one genre selection.
#[derive(Debug, Clone)]
pub struct DashboardViews {
    /// Source-row indices of the filtered view.
    pub rows: Vec<usize>,
    pub summary: SummaryStats,
    pub top_tracks: Vec<TopTrack>,
    pub popularity_hist: Histogram,
    pub popularity_kde: Option<Vec<[f64; 2]>>,
    pub genre_popularity: Vec<GroupAverage>,
    pub artist_popularity: Vec<GroupAverage>,
    pub energy_hist: Histogram,
    pub correlation: CorrelationMatrix,
}

impl DashboardViews {
    /// Run the whole filter → aggregate pipeline for `selected`.
    pub fn compute(dataset: &Dataset, selected: &GenreSelection, config: &DashboardConfig) -> Result<Self> {
        let view = filter_by_genre(dataset, selected);
        if view.is_empty() {
            log::debug!("Genre selection matches no rows");
        }
        let popularity_hist = histogram(&view, TRACK_POPULARITY, config.histogram_bins)?;
        let popularity_kde = kde_curve(&popularity_hist.values, KDE_POINTS);
        let mut artist_popularity = average_by_group(&view, TRACK_ARTIST, TRACK_POPULARITY)?;
        artist_popularity.truncate(config.artist_limit);
        let correlation = if config.correlation_columns.is_empty() {
            correlation_matrix(&view)
        } else {
            correlation_matrix_for(&view, config.correlation_columns.as_slice())?
        };

        Ok(Self {
            summary: describe(&view),
            top_tracks: top_by_popularity(&view, config.top_n)?,
            popularity_hist,
            popularity_kde,
            genre_popularity: average_by_group(&view, PLAYLIST_GENRE, TRACK_POPULARITY)?,
            artist_popularity,
            energy_hist: histogram(&view, ENERGY, config.histogram_bins)?,
            correlation,
            rows: view.row_indices().to_vec(),
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded datasets by source path.
    cache: DatasetCache,

    /// Path of the dataset on screen.
    pub source: Option<PathBuf>,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Distinct genres, in first-seen order.
    pub genres: Vec<String>,

    pub genre_colors: GenreColors,

    /// Genres ticked in the sidebar.
    pub selected: GenreSelection,

    /// Derived views for the current selection.
    pub views: Option<DashboardViews>,

    /// Error shown in place of the dashboard.
    pub load_error: Option<String>,

    /// Transient status line (exports, non-fatal errors).
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            cache: DatasetCache::new(),
            source: None,
            dataset: None,
            genres: Vec::new(),
            genre_colors: GenreColors::default(),
            selected: GenreSelection::new(),
            views: None,
            load_error: None,
            status_message: None,
        }
    }

    /// Load (or fetch from cache) the CSV at `path` and make it current.
    ///
    /// On failure the previous dataset is dropped: the dashboard shows the
    /// error and nothing else.
    pub fn open(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
        match self.cache.get_or_load(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) if e.is_load_error() => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.views = None;
                self.genres.clear();
                self.selected.clear();
                self.load_error = Some(e.to_string());
            }
            Err(e) => {
                log::error!("Unexpected error opening {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Drop the cached copy of the current source and read it again.
    pub fn reload(&mut self) {
        let Some(path) = self.source.clone() else {
            return;
        };
        if self.cache.invalidate(&path) {
            log::info!("Invalidated cached dataset {}", path.display());
        }
        self.open(&path);
    }

    /// Ingest a newly loaded dataset with every genre selected.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.genres = distinct_genres(&dataset);
        self.genre_colors = GenreColors::new(&self.genres);
        self.selected = self.genres.iter().cloned().collect();
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute derived views after a selection change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        match DashboardViews::compute(ds, &self.selected, &self.config) {
            Ok(views) => {
                log::debug!("{} of {} rows match the genre filter", views.rows.len(), ds.len());
                self.views = Some(views);
            }
            Err(e) => {
                log::error!("Failed to compute dashboard views: {e}");
                self.views = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Tick or untick one genre.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.selected.remove(genre) {
            self.selected.insert(genre.to_string());
        }
        self.refilter();
    }

    pub fn select_all(&mut self) {
        self.selected = self.genres.iter().cloned().collect();
        self.refilter();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn songs_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("create temp file");
        file.write_all(
            b"track_name,track_artist,track_popularity,playlist_genre,energy,tempo\n\
              One,A,50,pop,0.2,100\n\
              Two,B,70,pop,0.4,120\n\
              Three,C,60,rock,0.9,140\n\
              Four,D,30,,0.5,90\n",
        )
        .expect("write csv");
        file
    }

    #[test]
    fn open_selects_every_genre() {
        let file = songs_file();
        let mut state = AppState::new(DashboardConfig::default());
        state.open(file.path());

        assert!(state.load_error.is_none());
        assert_eq!(state.genres, vec!["pop", "rock"]);
        let views = state.views.as_ref().expect("views");
        // the row without a genre is never selectable
        assert_eq!(views.rows, vec![0, 1, 2]);
        assert_eq!(views.top_tracks[0].track_popularity, Some(70.0));
        assert_eq!(views.genre_popularity.len(), 2);
        assert_eq!(views.correlation.columns, vec!["track_popularity", "energy", "tempo"]);
    }

    #[test]
    fn toggling_genres_recomputes_views() {
        let file = songs_file();
        let mut state = AppState::new(DashboardConfig::default());
        state.open(file.path());

        state.toggle_genre("pop");
        assert_eq!(state.views.as_ref().unwrap().rows, vec![2]);

        state.select_none();
        let views = state.views.as_ref().unwrap();
        assert!(views.rows.is_empty());
        assert!(!views.summary.has_data());
        assert!(views.top_tracks.is_empty());
        assert!(views.popularity_hist.is_empty());

        state.select_all();
        assert_eq!(state.views.as_ref().unwrap().rows.len(), 3);
    }

    #[test]
    fn failed_open_clears_the_dashboard() {
        let file = songs_file();
        let mut state = AppState::new(DashboardConfig::default());
        state.open(file.path());
        state.open(Path::new("/missing/songs.csv"));

        assert!(state.load_error.is_some());
        assert!(state.dataset.is_none());
        assert!(state.views.is_none());
    }

    #[test]
    fn configured_correlation_columns_restrict_the_heatmap() {
        let file = songs_file();
        let config = DashboardConfig {
            correlation_columns: vec!["tempo".into(), "energy".into()],
            ..DashboardConfig::default()
        };
        let mut state = AppState::new(config);
        state.open(file.path());

        let views = state.views.as_ref().expect("views");
        assert_eq!(views.correlation.columns, vec!["tempo", "energy"]);
    }

    #[test]
    fn unknown_correlation_column_is_reported_not_fatal() {
        let file = songs_file();
        let config = DashboardConfig {
            correlation_columns: vec!["loudness".into()],
            ..DashboardConfig::default()
        };
        let mut state = AppState::new(config);
        state.open(file.path());

        assert!(state.load_error.is_none());
        assert!(state.dataset.is_some());
        assert!(state.views.is_none());
        let status = state.status_message.as_deref().expect("status");
        assert!(status.contains("unknown column 'loudness'"), "{status}");
    }

    #[test]
    fn missing_columns_are_a_load_error() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("create temp file");
        file.write_all(b"track_name,energy\nSong,0.4\n").expect("write csv");
        let mut state = AppState::new(DashboardConfig::default());
        state.open(file.path());

        let err = state.load_error.as_deref().expect("load error");
        assert!(err.contains("track_popularity"), "{err}");
        assert!(state.dataset.is_none());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn reload_picks_up_file_changes() {
        let file = songs_file();
        let mut state = AppState::new(DashboardConfig::default());
        state.open(file.path());
        std::fs::write(
            file.path(),
            "track_name,track_artist,track_popularity,playlist_genre,energy\nOnly,A,10,edm,0.1\n",
        )
        .expect("overwrite");

        state.open(file.path());
        assert_eq!(state.genres, vec!["pop", "rock"]);

        state.reload();
        assert_eq!(state.genres, vec!["edm"]);
    }
}
