use super::error::{DataError, Result};
use super::filter::FilteredView;

pub const DEFAULT_BINS: usize = 20;

/// Equal-width bin counts over one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub column: String,
    /// `counts.len() + 1` edges; empty when there was no data.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// The non-missing values the bins were built from.
    pub values: Vec<f64>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// `(centre, count)` per bin, ready for a bar chart.
    pub fn bars(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| ((w[0] + w[1]) / 2.0, c))
    }
}

/// Bin the non-missing values of `column` into `bins` equal-width bins
/// spanning [min, max]. The last bin is closed on the right.
pub fn histogram(view: &FilteredView<'_>, column: &str, bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(DataError::invalid("histogram needs at least one bin"));
    }
    let idx = view.dataset().require_numeric(column)?;
    let values: Vec<f64> = view.records().filter_map(|r| r.get(idx).as_f64()).collect();

    if values.is_empty() {
        return Ok(Histogram {
            column: column.to_string(),
            edges: Vec::new(),
            counts: Vec::new(),
            values,
        });
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for &v in &values {
        let bin = (((v - lo) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    Ok(Histogram {
        column: column.to_string(),
        edges,
        counts,
        values,
    })
}

/// Gaussian kernel density estimate evaluated at `points` evenly spaced
/// positions across the data range.
///
/// Bandwidth follows Scott's rule: sample std times `n^(-1/5)`. Returns
/// `None` with fewer than two values or no spread.
pub fn kde_curve(values: &[f64], points: usize) -> Option<Vec<[f64; 2]>> {
    let n = values.len();
    if n < 2 || points < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let bw = var.sqrt() * (n as f64).powf(-0.2);
    if bw <= 0.0 || !bw.is_finite() {
        return None;
    }

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (hi - lo) / (points - 1) as f64;
    let norm = 1.0 / (n as f64 * bw * (2.0 * std::f64::consts::PI).sqrt());

    Some(
        (0..points)
            .map(|i| {
                let x = lo + step * i as f64;
                let density: f64 = values
                    .iter()
                    .map(|v| (-0.5 * ((x - v) / bw).powi(2)).exp())
                    .sum();
                [x, density * norm]
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::songs;
    use crate::data::model::{ENERGY, TRACK_NAME, TRACK_POPULARITY};

    #[test]
    fn counts_cover_every_value_and_max_lands_in_last_bin() {
        let ds = songs(&[
            ("a", "x", Some(0.0), Some("pop"), None),
            ("b", "x", Some(50.0), Some("pop"), None),
            ("c", "x", Some(100.0), Some("pop"), None),
            ("d", "x", None, Some("pop"), None),
        ]);
        let h = histogram(&FilteredView::all(&ds), TRACK_POPULARITY, 4).unwrap();
        assert_eq!(h.edges, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(h.counts, vec![1, 0, 1, 1]);
        assert_eq!(h.bin_width(), 25.0);
        let centres: Vec<f64> = h.bars().map(|(c, _)| c).collect();
        assert_eq!(centres, vec![12.5, 37.5, 62.5, 87.5]);
    }

    #[test]
    fn constant_column_gets_unit_range() {
        let ds = songs(&[
            ("a", "x", Some(3.0), Some("pop"), None),
            ("b", "x", Some(3.0), Some("pop"), None),
        ]);
        let h = histogram(&FilteredView::all(&ds), TRACK_POPULARITY, 2).unwrap();
        assert_eq!(h.edges, vec![2.5, 3.0, 3.5]);
        assert_eq!(h.counts.iter().sum::<usize>(), 2);
    }

    #[test]
    fn no_values_is_an_empty_histogram() {
        let ds = songs(&[("a", "x", Some(3.0), Some("pop"), None)]);
        let h = histogram(&FilteredView::all(&ds), ENERGY, DEFAULT_BINS).unwrap();
        assert!(h.is_empty());
        assert_eq!(h.bin_width(), 0.0);
    }

    #[test]
    fn rejects_zero_bins_and_text_columns() {
        let ds = songs(&[("a", "x", Some(3.0), Some("pop"), None)]);
        let view = FilteredView::all(&ds);
        assert!(histogram(&view, TRACK_POPULARITY, 0).is_err());
        assert!(histogram(&view, TRACK_NAME, 10).is_err());
    }

    #[test]
    fn kde_is_positive_over_the_data_range() {
        let values = [1.0, 2.0, 2.5, 3.0, 4.0, 4.5, 6.0];
        let curve = kde_curve(&values, 200).unwrap();
        assert_eq!(curve.len(), 200);
        assert!(curve.iter().all(|p| p[1] > 0.0));
        assert!(kde_curve(&[1.0], 10).is_none());
        assert!(kde_curve(&[2.0, 2.0, 2.0], 10).is_none());
    }
}
