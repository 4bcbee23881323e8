use std::f32::consts::FRAC_PI_2;

use eframe::egui::{epaint::TextShape, Align2, Color32, FontId, Rect, RichText, Sense, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::{coolwarm, GenreColors};
use crate::data::aggregate::GroupAverage;
use crate::data::correlation::CorrelationMatrix;
use crate::data::histogram::Histogram;

const PLOT_HEIGHT: f32 = 260.0;

fn no_data(ui: &mut Ui) {
    ui.label(RichText::new("No data for the current selection.").italics());
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Bin counts as bars, with an optional density curve scaled to counts.
pub fn histogram_plot(
    ui: &mut Ui,
    id: &str,
    hist: &Histogram,
    kde: Option<&[[f64; 2]]>,
    color: Color32,
) {
    if hist.is_empty() {
        no_data(ui);
        return;
    }
    let width = hist.bin_width();
    let bars: Vec<Bar> = hist
        .bars()
        .map(|(centre, count)| Bar::new(centre, count as f64).width(width))
        .collect();
    let chart = BarChart::new(bars).color(color).name(&hist.column);

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(hist.column.as_str())
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            if let Some(curve) = kde {
                // density × n × bin width puts the curve on the count axis
                let scale = hist.values.len() as f64 * width;
                let points: PlotPoints = curve.iter().map(|p| [p[0], p[1] * scale]).collect();
                plot_ui.line(
                    Line::new(points)
                        .name("KDE")
                        .color(Color32::from_rgb(255, 127, 14))
                        .width(2.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Grouped averages
// ---------------------------------------------------------------------------

/// One bar per group, in the order given. Groups with no average are listed
/// under the chart instead of drawn as zero.
pub fn group_bar_chart(ui: &mut Ui, id: &str, groups: &[GroupAverage], colors: Option<&GenreColors>) {
    if groups.is_empty() {
        no_data(ui);
        return;
    }

    let labels: Vec<String> = groups.iter().map(|g| g.group.to_string()).collect();
    let bars: Vec<Bar> = groups
        .iter()
        .enumerate()
        .filter_map(|(i, g)| {
            let avg = g.average?;
            let label = &labels[i];
            let mut bar = Bar::new(i as f64, avg).width(0.7).name(label);
            if let Some(colors) = colors {
                bar = bar.fill(colors.color_for(label));
            }
            Some(bar)
        })
        .collect();

    let axis_labels = labels.clone();
    Plot::new(id)
        .height(PLOT_HEIGHT)
        .y_axis_label("Average popularity")
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            axis_labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::from_rgb(31, 119, 180)));
        });

    let absent: Vec<&str> = groups
        .iter()
        .zip(&labels)
        .filter(|(g, _)| g.average.is_none())
        .map(|(_, l)| l.as_str())
        .collect();
    if !absent.is_empty() {
        ui.label(RichText::new(format!("No values for: {}", absent.join(", "))).weak());
    }
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

const CELL: f32 = 26.0;
const LABEL_SPACE: f32 = 130.0;

/// Painted grid of coefficients; undefined cells are dark grey.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    if matrix.is_empty() {
        ui.label(RichText::new("No numeric columns to correlate.").italics());
        return;
    }
    let n = matrix.len();
    let grid = CELL * n as f32;
    let (response, painter) = ui.allocate_painter(Vec2::new(LABEL_SPACE + grid, LABEL_SPACE + grid), Sense::hover());
    let origin = response.rect.min + Vec2::new(LABEL_SPACE, 0.0);
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(11.0);

    for i in 0..n {
        for j in 0..n {
            let rect = Rect::from_min_size(
                origin + Vec2::new(j as f32 * CELL, i as f32 * CELL),
                Vec2::splat(CELL),
            );
            let fill = matrix.at(i, j).map(coolwarm).unwrap_or(Color32::DARK_GRAY);
            painter.rect_filled(rect.shrink(0.5), 0.0, fill);
        }
    }

    for (i, name) in matrix.columns.iter().enumerate() {
        // row labels, right-aligned against the grid
        painter.text(
            origin + Vec2::new(-4.0, (i as f32 + 0.5) * CELL),
            Align2::RIGHT_CENTER,
            name,
            font.clone(),
            text_color,
        );
        // column labels, rotated to run down from the grid
        let galley = painter.layout_no_wrap(name.clone(), font.clone(), text_color);
        let pos = origin + Vec2::new((i as f32 + 0.5) * CELL + galley.size().y / 2.0, grid + 4.0);
        painter.add(TextShape::new(pos, galley, text_color).with_angle(FRAC_PI_2));
    }

    let hovered = response.hover_pos().and_then(|pos| {
        let rel = pos - origin;
        if rel.x < 0.0 || rel.y < 0.0 {
            return None;
        }
        let (i, j) = ((rel.y / CELL) as usize, (rel.x / CELL) as usize);
        (i < n && j < n).then_some((i, j))
    });
    if let Some((i, j)) = hovered {
        let value = matrix
            .at(i, j)
            .map(|r| format!("{r:.3}"))
            .unwrap_or_else(|| "undefined".to_string());
        response.on_hover_text(format!(
            "{} × {}: {value}",
            matrix.columns[i], matrix.columns[j]
        ));
    }

    color_scale(ui);
}

/// Horizontal -1 … +1 legend for the heatmap ramp.
fn color_scale(ui: &mut Ui) {
    const STEPS: usize = 40;
    const STEP_WIDTH: f32 = 5.0;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("-1");
        let (rect, _) = ui.allocate_exact_size(Vec2::new(STEPS as f32 * STEP_WIDTH, 12.0), Sense::hover());
        let painter = ui.painter();
        for k in 0..STEPS {
            let r = -1.0 + 2.0 * (k as f64 + 0.5) / STEPS as f64;
            let step = Rect::from_min_size(
                rect.min + Vec2::new(k as f32 * STEP_WIDTH, 0.0),
                Vec2::new(STEP_WIDTH, rect.height()),
            );
            painter.rect_filled(step, 0.0, coolwarm(r));
        }
        ui.label("+1");
        ui.add_space(8.0);
        ui.label(RichText::new("grey: undefined").weak());
    });
}
