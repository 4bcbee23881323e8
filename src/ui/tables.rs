use eframe::egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::TopTrack;
use crate::data::describe::{ColumnSummary, SummaryStats, STATISTICS};
use crate::data::model::{Dataset, Record, TRACK_ARTIST, TRACK_NAME, TRACK_POPULARITY};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 260.0;

fn no_data(ui: &mut Ui) {
    ui.label(RichText::new("No data for the current selection.").italics());
}

/// Shared layout for every table on the dashboard.
fn table<'a>(ui: &'a mut Ui, columns: usize) -> TableBuilder<'a> {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0).clip(true), columns)
        .max_scroll_height(MAX_TABLE_HEIGHT)
}

fn records_table(ui: &mut Ui, dataset: &Dataset, records: &[&Record]) {
    table(ui, dataset.columns.len())
        .header(HEADER_HEIGHT, |mut header| {
            for name in dataset.column_names() {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, records.len(), |mut row| {
                let record = records[row.index()];
                for value in &record.values {
                    row.col(|ui| {
                        ui.label(value.to_string());
                    });
                }
            });
        });
}

/// First rows of the full dataset.
pub fn preview_table(ui: &mut Ui, dataset: &Dataset, rows: usize) {
    let records: Vec<&Record> = dataset.head(rows).iter().collect();
    ui.push_id("preview_table", |ui| records_table(ui, dataset, &records));
}

/// Every row of the filtered view.
pub fn filtered_table(ui: &mut Ui, dataset: &Dataset, rows: &[usize]) {
    if rows.is_empty() {
        no_data(ui);
        return;
    }
    let records: Vec<&Record> = rows.iter().map(|&i| &dataset.records[i]).collect();
    ui.push_id("filtered_table", |ui| records_table(ui, dataset, &records));
}

/// Text of one summary cell: `count` as an integer, the rest to six places.
fn format_stat(summary: &ColumnSummary, stat: usize) -> String {
    if stat == 0 {
        return summary.count.to_string();
    }
    match summary.statistics().get(stat).copied().flatten() {
        Some(v) => format!("{v:.6}"),
        None => "no data".to_string(),
    }
}

/// One row per statistic, one column per numeric column.
pub fn summary_table(ui: &mut Ui, summary: &SummaryStats) {
    if !summary.has_data() {
        no_data(ui);
    }
    if summary.columns.is_empty() {
        return;
    }
    ui.push_id("summary_table", |ui| {
        table(ui, summary.columns.len() + 1)
            .header(HEADER_HEIGHT, |mut header| {
                header.col(|_| {});
                for col in &summary.columns {
                    header.col(|ui| {
                        ui.strong(&col.column);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, STATISTICS.len(), |mut row| {
                    let stat = row.index();
                    row.col(|ui| {
                        ui.strong(STATISTICS[stat]);
                    });
                    for col in &summary.columns {
                        row.col(|ui| {
                            ui.label(format_stat(col, stat));
                        });
                    }
                });
            });
    });
}

pub fn top_tracks_table(ui: &mut Ui, tracks: &[TopTrack]) {
    if tracks.is_empty() {
        no_data(ui);
        return;
    }
    ui.push_id("top_tracks_table", |ui| {
        table(ui, 3)
            .header(HEADER_HEIGHT, |mut header| {
                for name in [TRACK_NAME, TRACK_ARTIST, TRACK_POPULARITY] {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, tracks.len(), |mut row| {
                    let track = &tracks[row.index()];
                    row.col(|ui| {
                        ui.label(track.track_name.to_string());
                    });
                    row.col(|ui| {
                        ui.label(track.track_artist.to_string());
                    });
                    row.col(|ui| {
                        ui.label(
                            track
                                .track_popularity
                                .map(|p| p.to_string())
                                .unwrap_or_else(|| "<NA>".to_string()),
                        );
                    });
                });
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::describe::describe;
    use crate::data::filter::{filter_by_genre, GenreSelection};
    use crate::data::model::tests::songs;

    #[test]
    fn count_renders_as_integer() {
        let ds = songs(&[
            ("a", "x", Some(50.0), Some("pop"), Some(0.5)),
            ("b", "y", Some(70.0), Some("pop"), None),
            ("c", "z", Some(60.0), Some("rock"), Some(0.25)),
        ]);
        let all: GenreSelection = ["pop", "rock"].iter().map(|g| g.to_string()).collect();
        let summary = describe(&filter_by_genre(&ds, &all));
        let popularity = &summary.columns[0];

        assert_eq!(STATISTICS[0], "count");
        assert_eq!(format_stat(popularity, 0), "3");
        assert_eq!(format_stat(popularity, 1), "60.000000");
        assert_eq!(format_stat(&summary.columns[1], 0), "2");
    }

    #[test]
    fn empty_view_shows_zero_count_and_no_data() {
        let ds = songs(&[("a", "x", Some(50.0), Some("pop"), Some(0.5))]);
        let summary = describe(&filter_by_genre(&ds, &GenreSelection::new()));
        let popularity = &summary.columns[0];

        assert_eq!(format_stat(popularity, 0), "0");
        for stat in 1..STATISTICS.len() {
            assert_eq!(format_stat(popularity, stat), "no data");
        }
    }
}
