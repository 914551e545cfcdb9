use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::category_color;
use crate::data::model::ExpressionRow;

const ROW_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Record table
// ---------------------------------------------------------------------------

/// Gene / condition / expression table with a trend icon and category badge.
///
/// `id_salt` keeps several tables on one page apart.
pub fn gene_table<R: ExpressionRow>(ui: &mut Ui, id_salt: &str, rows: &[R], show_gene_column: bool) {
    if rows.is_empty() {
        ui.label(RichText::new("No data to display").weak());
        return;
    }

    ui.push_id(id_salt, |ui: &mut Ui| {
        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
        if show_gene_column {
            builder = builder.column(Column::auto().at_least(90.0));
        }
        builder = builder
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(130.0))
            .column(Column::remainder());

        builder
            .header(ROW_HEIGHT, |mut header| {
                if show_gene_column {
                    header.col(|ui| {
                        ui.strong("Gene");
                    });
                }
                header.col(|ui| {
                    ui.strong("Condition");
                });
                header.col(|ui| {
                    ui.strong("Expression Level");
                });
                header.col(|ui| {
                    ui.strong("Category");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let record = &rows[row.index()];
                    let category = record.category();
                    let color = category_color(category);

                    if show_gene_column {
                        row.col(|ui| {
                            ui.label(RichText::new(record.gene().unwrap_or_default()).monospace().strong());
                        });
                    }
                    row.col(|ui| {
                        ui.label(record.condition());
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(category.trend_icon()).color(color));
                        ui.label(RichText::new(format!("{:.2}", record.expression())).monospace());
                    });
                    row.col(|ui| {
                        badge(ui, category.label(), color);
                    });
                });
            });
    });
}

/// Category text on a tinted background.
pub fn badge(ui: &mut Ui, text: &str, color: egui::Color32) {
    ui.label(
        RichText::new(format!(" {text} "))
            .color(color)
            .background_color(color.gamma_multiply(0.2))
            .small()
            .strong(),
    );
}
