use std::path::Path;

use super::error::{DataError, Result};
use super::model::{
    Column, ColumnKind, Dataset, Record, Value, REQUIRED_COLUMNS, REQUIRED_NUMERIC,
    REQUIRED_TEXT,
};

/// Cell contents read as missing, mirroring the usual dataframe defaults.
pub const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
    "#NA",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a songs CSV (header row required).
///
/// Every failure is a load error: nothing is returned for a file that only
/// partially parses.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| DataError::load(path, e))?;
    let dataset = read_dataset(&mut reader, path)?;
    if dataset.is_empty() {
        log::warn!("{} has a header row but no data", path.display());
    }
    log::info!(
        "Loaded {} rows with {} columns from {}",
        dataset.len(),
        dataset.columns.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse from any reader; `origin` is only used in error messages.
pub fn read_dataset<R: std::io::Read>(reader: &mut csv::Reader<R>, origin: &Path) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DataError::load(origin, format!("reading header: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(DataError::load(origin, "empty header row"));
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|req| !headers.iter().any(|h| h == *req))
        .map(|req| req.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingColumns {
            path: origin.to_path_buf(),
            missing,
        });
    }

    // First pass: raw cells, `None` for null tokens.
    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DataError::load(origin, format!("row {}: {e}", row_no + 1)))?;
        raw_rows.push(
            record
                .iter()
                .map(|cell| {
                    if NULL_TOKENS.contains(&cell) {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect(),
        );
    }

    // Second pass: infer column kinds from every non-missing cell.
    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let numeric = !REQUIRED_TEXT.contains(&name.as_str())
                && raw_rows
                    .iter()
                    .filter_map(|row| row.get(idx).and_then(|c| c.as_deref()))
                    .all(|cell| parse_number(cell).is_some());
            Column {
                name: name.clone(),
                kind: if numeric { ColumnKind::Numeric } else { ColumnKind::Text },
            }
        })
        .collect();

    for name in REQUIRED_NUMERIC {
        let col = columns.iter().find(|c| c.name == name);
        if let Some(col) = col {
            if col.kind != ColumnKind::Numeric {
                return Err(DataError::load(
                    origin,
                    format!("column '{name}' contains non-numeric values"),
                ));
            }
        }
    }

    let records = raw_rows
        .into_iter()
        .map(|row| Record {
            values: row
                .into_iter()
                .zip(&columns)
                .map(|(cell, col)| match (cell, col.kind) {
                    (None, _) => Value::Missing,
                    (Some(s), ColumnKind::Numeric) => parse_number(&s).unwrap_or(Value::Missing),
                    (Some(s), ColumnKind::Text) => Value::Text(s),
                })
                .collect(),
        })
        .collect();

    Ok(Dataset::new(columns, records))
}

fn parse_number(s: &str) -> Option<Value> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::Integer(i));
    }
    match s.parse::<f64>() {
        // "inf"/"nan" spellings parse as floats but are not data.
        Ok(f) if f.is_finite() => Some(Value::Float(f)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::describe::describe;
    use crate::data::filter::{distinct_genres, filter_by_genre, FilteredView, GenreSelection};
    use crate::data::model::{ENERGY, PLAYLIST_GENRE, TRACK_POPULARITY};

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    const HEADER: &str = "track_name,track_artist,track_popularity,playlist_genre,energy,tempo\n";

    #[test]
    fn infers_numeric_and_text_columns() {
        let file = write_csv(&format!(
            "{HEADER}Song A,Artist 1,50,pop,0.5,120\nSong B,Artist 2,70,rock,0.75,98.5\n"
        ));
        let ds = load_csv(file.path()).expect("load");

        assert_eq!(ds.len(), 2);
        let pop = ds.column_index(TRACK_POPULARITY).unwrap();
        assert_eq!(ds.columns[pop].kind, ColumnKind::Numeric);
        assert_eq!(ds.records[0].get(pop), &Value::Integer(50));
        let genre = ds.column_index(PLAYLIST_GENRE).unwrap();
        assert_eq!(ds.columns[genre].kind, ColumnKind::Text);
        let tempo = ds.column_index("tempo").unwrap();
        assert_eq!(ds.records[1].get(tempo), &Value::Float(98.5));
    }

    #[test]
    fn empty_cells_are_missing_not_zero() {
        let file = write_csv(&format!("{HEADER}Song A,Artist 1,,,NaN,\nSong B,Artist 2,70,pop,0.2,100\n"));
        let ds = load_csv(file.path()).expect("load");

        let pop = ds.column_index(TRACK_POPULARITY).unwrap();
        let genre = ds.column_index(PLAYLIST_GENRE).unwrap();
        let energy = ds.column_index(ENERGY).unwrap();
        assert_eq!(ds.records[0].get(pop), &Value::Missing);
        assert_eq!(ds.records[0].get(genre), &Value::Missing);
        assert_eq!(ds.records[0].get(energy), &Value::Missing);
        assert_eq!(ds.columns[energy].kind, ColumnKind::Numeric);
    }

    #[test]
    fn mixed_column_keeps_text_verbatim() {
        let file = write_csv(
            "track_name,track_artist,track_popularity,playlist_genre,energy,track_id\n\
             1999,Prince,80,pop,0.7,abc\nSong,Someone,40,rock,0.3,123\n",
        );
        let ds = load_csv(file.path()).expect("load");
        let name = ds.column_index("track_name").unwrap();
        // track_name is categorical, so "1999" stays text.
        assert_eq!(ds.records[0].get(name), &Value::Text("1999".into()));
        let id = ds.column_index("track_id").unwrap();
        assert_eq!(ds.records[1].get(id), &Value::Text("123".into()));
    }

    #[test]
    fn numeric_looking_labels_stay_categorical() {
        let file = write_csv(&format!("{HEADER}101,7,50,1,0.5,120\n202,8,70,2,0.75,98\n101,7,60,1,0.6,110\n"));
        let ds = load_csv(file.path()).expect("load");

        let genre = ds.column_index(PLAYLIST_GENRE).unwrap();
        assert_eq!(ds.columns[genre].kind, ColumnKind::Text);
        assert_eq!(ds.records[1].get(genre), &Value::Text("2".into()));
        let artist = ds.column_index("track_artist").unwrap();
        assert_eq!(ds.columns[artist].kind, ColumnKind::Text);
        // still numeric: only the categorical columns are pinned
        let tempo = ds.column_index("tempo").unwrap();
        assert_eq!(ds.columns[tempo].kind, ColumnKind::Numeric);

        assert_eq!(distinct_genres(&ds), vec!["1", "2"]);
        let all: GenreSelection = distinct_genres(&ds).into_iter().collect();
        assert_eq!(filter_by_genre(&ds, &all).len(), 3);
        let described: Vec<String> = describe(&FilteredView::all(&ds))
            .columns
            .into_iter()
            .map(|c| c.column)
            .collect();
        assert_eq!(described, vec!["track_popularity", "energy", "tempo"]);
    }

    #[test]
    fn missing_file_is_load_error() {
        let err = load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn missing_required_columns_are_listed() {
        let file = write_csv("track_name,energy\nSong,0.4\n");
        match load_csv(file.path()) {
            Err(DataError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec!["track_artist", "track_popularity", "playlist_genre"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn ragged_row_aborts_the_load() {
        let file = write_csv(&format!("{HEADER}Song A,Artist 1,50,pop,0.5,120\nSong B,Artist 2\n"));
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DataError::Load { .. }));
    }

    #[test]
    fn text_popularity_is_rejected() {
        let file = write_csv(&format!("{HEADER}Song A,Artist 1,high,pop,0.5,120\n"));
        let err = load_csv(file.path()).unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn header_only_file_loads_empty() {
        let file = write_csv(HEADER);
        let ds = load_csv(file.path()).expect("load");
        assert!(ds.is_empty());
        assert_eq!(ds.columns.len(), 6);
    }
}
