use serde::Serialize;

use super::filter::FilteredView;

/// Row labels of the summary table.
pub const STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// `describe()`-style statistics for one numeric column.
///
/// Every statistic is `None` when it cannot be computed: no values at all,
/// or (for `std`) fewer than two.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    fn no_data(column: &str) -> Self {
        ColumnSummary {
            column: column.to_string(),
            count: 0,
            mean: None,
            std: None,
            min: None,
            p25: None,
            p50: None,
            p75: None,
            max: None,
        }
    }

    /// Values in [`STATISTICS`] order.
    pub fn statistics(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.min,
            self.p25,
            self.p50,
            self.p75,
            self.max,
        ]
    }
}

/// Summary of every numeric column of a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Rows in the view the summary was computed from.
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

impl SummaryStats {
    /// `false` when the view had no rows: every statistic is "no data".
    pub fn has_data(&self) -> bool {
        self.rows > 0
    }

    #[cfg(test)]
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.column == name)
    }
}

/// Per numeric column: count, mean, sample std, min, quartiles, max.
/// Missing cells are skipped.
pub fn describe(view: &FilteredView<'_>) -> SummaryStats {
    let dataset = view.dataset();
    let columns = dataset
        .numeric_columns()
        .into_iter()
        .map(|idx| {
            let name = &dataset.columns[idx].name;
            let mut values: Vec<f64> = view.records().filter_map(|r| r.get(idx).as_f64()).collect();
            summarize(name, &mut values)
        })
        .collect();

    SummaryStats {
        rows: view.len(),
        columns,
    }
}

fn summarize(column: &str, values: &mut [f64]) -> ColumnSummary {
    if values.is_empty() {
        return ColumnSummary::no_data(column);
    }
    values.sort_by(f64::total_cmp);

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    });

    ColumnSummary {
        column: column.to_string(),
        count: n,
        mean: Some(mean),
        std,
        min: values.first().copied(),
        p25: percentile(values, 0.25),
        p50: percentile(values, 0.50),
        p75: percentile(values, 0.75),
        max: values.last().copied(),
    }
}

/// Linear interpolation between closest ranks over already-sorted values.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
