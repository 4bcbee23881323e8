use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::describe::SummaryStats;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – genre filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let n_selected = state.selected.len();
    let n_total = state.genres.len();
    ui.strong(format!("Select Genre  ({n_selected}/{n_total})"));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    // Collect toggles first, apply after the loop: refiltering needs `&mut state`.
    let mut toggled: Option<String> = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for genre in &state.genres {
                let mut checked = state.selected.contains(genre);
                let label = if genre.is_empty() { "(empty)" } else { genre.as_str() };
                let text = RichText::new(label).color(state.genre_colors.color_for(genre));
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(genre.clone());
                }
            }
        });

    if let Some(genre) = toggled {
        state.toggle_genre(&genre);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(state.views.is_some(), egui::Button::new("Export summary…"))
                .clicked()
            {
                export_summary_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(views)) = (&state.dataset, &state.views) {
            ui.label(format!("{} songs loaded, {} visible", ds.len(), views.rows.len()));
        }
        if let Some(path) = &state.source {
            ui.label(RichText::new(path.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open songs CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn export_summary_dialog(state: &mut AppState) {
    let Some(views) = &state.views else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export summary statistics")
        .add_filter("JSON", &["json"])
        .set_file_name("summary.json")
        .save_file()
    else {
        return;
    };

    match write_summary(&path, &views.summary) {
        Ok(()) => {
            log::info!("Wrote summary statistics to {}", path.display());
            state.status_message = Some(format!("Saved {}", path.display()));
        }
        Err(e) => {
            log::error!("Failed to export summary: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

/// Write `summary` as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &SummaryStats) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("serializing summary statistics")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::describe::describe;
    use crate::data::filter::FilteredView;
    use crate::data::model::tests::songs;

    #[test]
    fn summary_export_is_json_with_nulls_for_no_data() {
        let ds = songs(&[("a", "x", Some(40.0), Some("pop"), None)]);
        let summary = describe(&FilteredView::all(&ds));
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("summary.json");

        write_summary(&path, &summary).expect("export");

        let text = std::fs::read_to_string(&path).expect("read back");
        let json: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(json["rows"], 1);
        assert_eq!(json["columns"][0]["column"], "track_popularity");
        assert_eq!(json["columns"][0]["mean"], 40.0);
        assert!(json["columns"][1]["mean"].is_null());
    }

    #[test]
    fn export_into_missing_directory_fails_with_context() {
        let ds = songs(&[]);
        let summary = describe(&FilteredView::all(&ds));
        let err = write_summary(Path::new("/no/such/dir/summary.json"), &summary).unwrap_err();
        assert!(format!("{err:#}").contains("writing"));
    }
}
