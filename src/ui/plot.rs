use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{category_color, generate_palette, legend_entries};
use crate::data::category::ExpressionCategory;
use crate::data::model::{DashboardStats, ExpressionSeries};

const CHART_HEIGHT: f32 = 260.0;
const BAR_WIDTH: f64 = 0.6;

// ---------------------------------------------------------------------------
// Expression chart (search page)
// ---------------------------------------------------------------------------

/// One bar per condition, coloured by expression category.
pub fn expression_chart(ui: &mut Ui, series: &ExpressionSeries) {
    if series.is_empty() {
        ui.label(RichText::new("No expression data to visualize").weak());
        return;
    }

    let bars: Vec<Bar> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let category = p.category();
            Bar::new(i as f64, p.expression)
                .name(bar_tooltip(&p.condition, p.expression, category))
                .fill(category_color(category))
                .width(BAR_WIDTH)
        })
        .collect();
    let labels: Vec<String> = series.points.iter().map(|p| p.condition.clone()).collect();

    Plot::new(("expression_chart", series.gene.as_str()))
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .y_axis_label("Expression")
        .x_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).element_formatter(Box::new(hover_text)));
        });

    ui.horizontal(|ui: &mut Ui| {
        for (title, range, color) in legend_entries() {
            ui.label(RichText::new("■").color(color));
            ui.label(format!("{title} ({range})"));
            ui.add_space(8.0);
        }
    });
}

fn bar_tooltip(condition: &str, expression: f64, category: ExpressionCategory) -> String {
    format!(
        "Condition: {condition}\nExpression: {expression:.2}\nLevel: {}",
        category.title()
    )
}

// ---------------------------------------------------------------------------
// Top genes chart (dashboard)
// ---------------------------------------------------------------------------

/// Record count per gene for the most frequent genes.
pub fn top_genes_chart(ui: &mut Ui, stats: &DashboardStats) {
    let palette = generate_palette(stats.top_genes.len());
    let bars: Vec<Bar> = stats
        .top_genes
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, (g, color))| {
            Bar::new(i as f64, g.count as f64)
                .name(format!("{}: {} records", g.gene, g.count))
                .fill(color)
                .width(BAR_WIDTH)
        })
        .collect();
    let labels: Vec<String> = stats.top_genes.iter().map(|g| g.gene.clone()).collect();

    Plot::new("top_genes_chart")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .y_axis_label("Record Count")
        .x_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).element_formatter(Box::new(hover_text)));
        });
}

/// Hover text is whatever was stored as the bar name.
fn hover_text(bar: &Bar, _chart: &BarChart) -> String {
    bar.name.clone()
}

/// Category label for an x grid mark; empty between bars.
fn axis_label(labels: &[String], value: f64) -> String {
    let index = value.round();
    if index < 0.0 || (value - index).abs() > 1e-6 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_only_on_bars() {
        let labels = vec!["Normal".to_string(), "Tumor".to_string()];
        assert_eq!(axis_label(&labels, 0.0), "Normal");
        assert_eq!(axis_label(&labels, 1.0), "Tumor");
        assert_eq!(axis_label(&labels, 0.5), "");
        assert_eq!(axis_label(&labels, 2.0), "");
        assert_eq!(axis_label(&labels, -1.0), "");
    }

    #[test]
    fn tooltip_shows_two_decimals_and_level() {
        assert_eq!(
            bar_tooltip("Tumor", 7.8, ExpressionCategory::High),
            "Condition: Tumor\nExpression: 7.80\nLevel: High"
        );
    }
}
