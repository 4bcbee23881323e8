use std::fmt;

use serde::Serialize;

use super::error::{DataError, Result};

pub const TRACK_NAME: &str = "track_name";
pub const TRACK_ARTIST: &str = "track_artist";
pub const TRACK_POPULARITY: &str = "track_popularity";
pub const PLAYLIST_GENRE: &str = "playlist_genre";
pub const ENERGY: &str = "energy";

/// Columns every songs file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    TRACK_NAME,
    TRACK_ARTIST,
    TRACK_POPULARITY,
    PLAYLIST_GENRE,
    ENERGY,
];

/// Categorical columns, kept as text even when every label looks numeric.
pub const REQUIRED_TEXT: [&str; 3] = [TRACK_NAME, TRACK_ARTIST, PLAYLIST_GENRE];

/// Columns that must come out of inference as numeric.
pub const REQUIRED_NUMERIC: [&str; 2] = [TRACK_POPULARITY, ENERGY];

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. `Missing` is an explicit marker, distinct from
/// zero and from the empty string.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
}

// -- Manual Eq/Ord so values can key a BTreeMap (grouping) --

// Equality follows `cmp`: `Integer(1)` and `Float(1.0)` are the same key.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        use Value::*;
        match (self, other) {
            (Missing, Missing) => Ordering::Equal,
            (Missing, _) => Ordering::Less,
            (_, Missing) => Ordering::Greater,
            (Text(a), Text(b)) => a.cmp(b),
            // numbers sort before text
            (Text(_), _) => Ordering::Greater,
            (_, Text(_)) => Ordering::Less,
            (a, b) => {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "<NA>"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric interpretation; `None` for text and missing cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Columns and rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// One row of the source file; cells are positional, matching
/// [`Dataset::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub values: Vec<Value>,
}

static MISSING: Value = Value::Missing;

impl Record {
    /// Cell at `column`; out-of-range reads as missing.
    pub fn get(&self, column: usize) -> &Value {
        self.values.get(column).unwrap_or(&MISSING)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table. Immutable once built; shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>, records: Vec<Record>) -> Self {
        Dataset { columns, records }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Like [`Dataset::column_index`] but unknown names are an
    /// `InvalidArgument`.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| DataError::invalid(format!("unknown column '{name}'")))
    }

    /// Index of a column that must be numeric.
    pub fn require_numeric(&self, name: &str) -> Result<usize> {
        let idx = self.require_column(name)?;
        if self.columns[idx].kind != ColumnKind::Numeric {
            return Err(DataError::invalid(format!("column '{name}' is not numeric")));
        }
        Ok(idx)
    }

    /// Indices of all numeric columns, in file order.
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == ColumnKind::Numeric)
            .map(|(i, _)| i)
            .collect()
    }

    /// The first `n` rows, for the preview table.
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }
}
