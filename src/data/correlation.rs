use super::error::Result;
use super::filter::FilteredView;

/// Square, symmetric matrix of Pearson coefficients between numeric columns.
///
/// Off-diagonal cells are `None` when a pair has fewer than two complete
/// rows or either side has zero variance over those rows. The diagonal is
/// always `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    values: Vec<Option<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient by position.
    pub fn at(&self, row: usize, col: usize) -> Option<f64> {
        let n = self.len();
        if row >= n || col >= n {
            return None;
        }
        self.values[row * n + col]
    }

    /// Coefficient by column name.
    #[cfg(test)]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let row = self.columns.iter().position(|c| c == a)?;
        let col = self.columns.iter().position(|c| c == b)?;
        self.at(row, col)
    }
}

/// Correlation over every numeric column of the view, in file order.
pub fn correlation_matrix(view: &FilteredView<'_>) -> CorrelationMatrix {
    let columns = view.dataset().numeric_columns();
    build(view, &columns)
}

/// Correlation restricted to the named columns. Unknown or non-numeric
/// names are an `InvalidArgument`.
pub fn correlation_matrix_for<S: AsRef<str>>(view: &FilteredView<'_>, names: &[S]) -> Result<CorrelationMatrix> {
    let columns = names
        .iter()
        .map(|name| view.dataset().require_numeric(name.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(build(view, &columns))
}

fn build(view: &FilteredView<'_>, columns: &[usize]) -> CorrelationMatrix {
    let ds = view.dataset();
    let n = columns.len();

    // Column-major extraction so each pair is a zip over two slices.
    let data: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|&idx| view.records().map(|r| r.get(idx).as_f64()).collect())
        .collect();

    let mut values = vec![None; n * n];
    for i in 0..n {
        values[i * n + i] = Some(1.0);
        for j in (i + 1)..n {
            let r = pearson(&data[i], &data[j]);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    CorrelationMatrix {
        columns: columns.iter().map(|&i| ds.columns[i].name.clone()).collect(),
        values,
    }
}

/// Pearson r over rows where both sides are present.
fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx * syy).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
