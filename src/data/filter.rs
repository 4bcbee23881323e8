use std::collections::{BTreeSet, HashSet};

use super::model::{Dataset, Record, PLAYLIST_GENRE};

// ---------------------------------------------------------------------------
// Genre selection
// ---------------------------------------------------------------------------

/// Genres the user has ticked in the sidebar.
pub type GenreSelection = BTreeSet<String>;

/// Distinct non-missing genres in first-seen order.
pub fn distinct_genres(dataset: &Dataset) -> Vec<String> {
    let Some(col) = dataset.column_index(PLAYLIST_GENRE) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    dataset
        .records
        .iter()
        .filter_map(|r| r.get(col).as_str())
        .filter(|g| seen.insert(*g))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – rows of a dataset passing the genre filter
// ---------------------------------------------------------------------------

/// A read-only subset of a [`Dataset`], stored as row indices in source
/// order. Never introduces rows of its own.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over every row of `dataset`.
    #[cfg(test)]
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            rows: (0..dataset.len()).collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Source-row indices, ascending.
    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in source order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let ds = self.dataset;
        self.rows.iter().map(move |&i| &ds.records[i])
    }
}

/// Rows whose genre is in `selected`.
///
/// An empty selection yields an empty view; rows with a missing genre never
/// match.
pub fn filter_by_genre<'a>(dataset: &'a Dataset, selected: &GenreSelection) -> FilteredView<'a> {
    let rows = match dataset.column_index(PLAYLIST_GENRE) {
        Some(col) if !selected.is_empty() => dataset
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.get(col).as_str().is_some_and(|g| selected.contains(g)))
            .map(|(i, _)| i)
            .collect(),
        _ => Vec::new(),
    };
    FilteredView { dataset, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::songs;

    fn selection(genres: &[&str]) -> GenreSelection {
        genres.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn genres_are_deduplicated_in_first_seen_order() {
        let ds = songs(&[
            ("a", "x", Some(1.0), Some("rock"), None),
            ("b", "x", Some(1.0), None, None),
            ("c", "x", Some(1.0), Some("pop"), None),
            ("d", "x", Some(1.0), Some("rock"), None),
            ("e", "x", Some(1.0), Some(""), None),
        ]);
        assert_eq!(distinct_genres(&ds), vec!["rock", "pop", ""]);
    }

    #[test]
    fn filter_keeps_only_selected_genres() {
        let ds = songs(&[
            ("a", "x", Some(1.0), Some("rock"), None),
            ("b", "x", Some(2.0), Some("pop"), None),
            ("c", "x", Some(3.0), Some("edm"), None),
            ("d", "x", Some(4.0), Some("pop"), None),
        ]);
        let view = filter_by_genre(&ds, &selection(&["pop", "edm"]));
        assert_eq!(view.row_indices(), &[1, 2, 3]);
        assert!(view.len() <= ds.len());
    }

    #[test]
    fn empty_selection_is_empty_view() {
        let ds = songs(&[("a", "x", Some(1.0), Some("rock"), None)]);
        let view = filter_by_genre(&ds, &GenreSelection::new());
        assert!(view.is_empty());
    }

    #[test]
    fn selecting_every_genre_drops_only_missing_genres() {
        let ds = songs(&[
            ("a", "x", Some(1.0), Some("rock"), None),
            ("b", "x", Some(2.0), None, None),
            ("c", "x", Some(3.0), Some("pop"), None),
        ]);
        let all: GenreSelection = distinct_genres(&ds).into_iter().collect();
        let view = filter_by_genre(&ds, &all);
        assert_eq!(view.row_indices(), &[0, 2]);
    }

    #[test]
    fn unknown_genres_match_nothing() {
        let ds = songs(&[("a", "x", Some(1.0), Some("rock"), None)]);
        let view = filter_by_genre(&ds, &selection(&["jazz"]));
        assert!(view.is_empty());
        assert_eq!(FilteredView::all(&ds).len(), 1);
    }
}
