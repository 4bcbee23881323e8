/// Data layer: loading, filtering, and the derived views the dashboard shows.
///
/// Architecture:
/// ```text
///     songs.csv
///        │
///        ▼
///   ┌──────────┐      ┌──────────────┐
///   │  loader   │◄─────│ DatasetCache  │  path → Arc<Dataset>
///   └──────────┘      └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  genre selection → FilteredView (row indices)
///   └──────────┘
///        │
///        ├──► describe      SummaryStats
///        ├──► aggregate     top-N tracks, grouped averages
///        ├──► histogram     bin counts + KDE
///        └──► correlation   pairwise Pearson matrix
/// ```
///
/// Everything below the loader is a pure function of its inputs.

pub mod aggregate;
pub mod cache;
pub mod correlation;
pub mod describe;
pub mod error;
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;

pub use error::Result;
