use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SonglistApp {
    pub state: AppState,
}

impl SonglistApp {
    /// Build the app and load the configured source straight away.
    pub fn new(config: DashboardConfig) -> Self {
        let source = config.source.clone();
        let mut state = AppState::new(config);
        state.open(&source);
        Self { state }
    }
}

impl eframe::App for SonglistApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: genre filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    if let Some(err) = &state.load_error {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(format!("Could not load dataset:\n{err}")).color(Color32::RED));
        });
        return;
    }
    let (Some(dataset), Some(views)) = (&state.dataset, &state.views) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a songs CSV to begin  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("🎶 Songlist Dashboard");
            ui.separator();

            ui.heading("Preview Data");
            tables::preview_table(ui, dataset, state.config.preview_rows);
            ui.add_space(12.0);

            ui.heading(format!("Filtered Data: {} Songs", views.rows.len()));
            tables::filtered_table(ui, dataset, &views.rows);
            ui.add_space(12.0);

            ui.heading("Summary Statistics");
            tables::summary_table(ui, &views.summary);
            ui.add_space(12.0);

            ui.heading(format!("Top {} Track Based on Popularity", state.config.top_n));
            tables::top_tracks_table(ui, &views.top_tracks);
            ui.add_space(12.0);

            ui.heading("Popularity Distribution");
            plot::histogram_plot(
                ui,
                "popularity_hist",
                &views.popularity_hist,
                views.popularity_kde.as_deref(),
                Color32::from_rgb(31, 119, 180),
            );
            ui.add_space(12.0);

            ui.heading("Average Popularity by Genre");
            plot::group_bar_chart(ui, "genre_popularity", &views.genre_popularity, Some(&state.genre_colors));
            ui.add_space(12.0);

            ui.heading("Popularity by Artist");
            plot::group_bar_chart(ui, "artist_popularity", &views.artist_popularity, None);
            ui.add_space(12.0);

            ui.heading("Energy Distribution");
            plot::histogram_plot(
                ui,
                "energy_hist",
                &views.energy_hist,
                None,
                Color32::from_rgb(135, 206, 235),
            );
            ui.add_space(12.0);

            ui.heading("Correlation Analysis");
            plot::correlation_heatmap(ui, &views.correlation);
        });
}
