use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use super::error::{DataError, Result};
use super::filter::FilteredView;
use super::model::{Value, TRACK_ARTIST, TRACK_NAME, TRACK_POPULARITY};

pub const DEFAULT_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Top-N ranking
// ---------------------------------------------------------------------------

/// A row of the "top tracks" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTrack {
    pub track_name: Value,
    pub track_artist: Value,
    pub track_popularity: Option<f64>,
}

/// The `n` most popular tracks, most popular first.
///
/// Equal popularity keeps source order; rows with missing popularity sort
/// after every scored row.
pub fn top_by_popularity(view: &FilteredView<'_>, n: usize) -> Result<Vec<TopTrack>> {
    if n == 0 {
        return Err(DataError::invalid("top-N count must be a positive integer"));
    }
    let ds = view.dataset();
    let name = ds.require_column(TRACK_NAME)?;
    let artist = ds.require_column(TRACK_ARTIST)?;
    let popularity = ds.require_numeric(TRACK_POPULARITY)?;

    let mut ranked: Vec<_> = view.records().collect();
    // `sort_by` is stable, which gives the source-order tie-break.
    ranked.sort_by(|a, b| desc_missing_last(a.get(popularity).as_f64(), b.get(popularity).as_f64()));

    Ok(ranked
        .into_iter()
        .take(n)
        .map(|r| TopTrack {
            track_name: r.get(name).clone(),
            track_artist: r.get(artist).clone(),
            track_popularity: r.get(popularity).as_f64(),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Grouped averages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAverage {
    pub group: Value,
    /// `None` when every value in the group was missing.
    pub average: Option<f64>,
}

/// Mean of `value_column` per distinct `group_column` value.
///
/// Rows with a missing group label are dropped; missing values are left out
/// of their group's mean. Ordered by average descending (absent averages
/// last), ties by group label ascending.
pub fn average_by_group(
    view: &FilteredView<'_>,
    group_column: &str,
    value_column: &str,
) -> Result<Vec<GroupAverage>> {
    let ds = view.dataset();
    let group_idx = ds.require_column(group_column)?;
    let value_idx = ds.require_numeric(value_column)?;

    // group -> (sum, count)
    let mut groups: BTreeMap<&Value, (f64, usize)> = BTreeMap::new();
    for record in view.records() {
        let key = record.get(group_idx);
        if key.is_missing() {
            continue;
        }
        let acc = groups.entry(key).or_insert((0.0, 0));
        if let Some(v) = record.get(value_idx).as_f64() {
            acc.0 += v;
            acc.1 += 1;
        }
    }

    let mut averages: Vec<GroupAverage> = groups
        .into_iter()
        .map(|(group, (sum, count))| GroupAverage {
            group: group.clone(),
            average: (count > 0).then(|| sum / count as f64),
        })
        .collect();
    // BTreeMap iteration is already label-ascending; the stable sort keeps it for ties.
    averages.sort_by(|a, b| desc_missing_last(a.average, b.average));
    Ok(averages)
}

fn desc_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
