use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::legend_entries;
use crate::data::loader::FORMAT_EXAMPLE;
use crate::state::{AppState, Page, POPULAR_GENES, PREVIEW_ROWS};
use crate::ui::panels::open_file_dialog;
use crate::ui::{plot, table};

fn page_header(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(title).size(26.0).strong());
        ui.label(RichText::new(subtitle).weak());
    });
    ui.add_space(12.0);
}

fn stat_card(ui: &mut Ui, title: &str, value: &str, description: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(180.0);
        ui.label(RichText::new(title).weak());
        ui.label(RichText::new(value).size(22.0).strong());
        ui.label(RichText::new(description).small().weak());
    });
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

pub fn home(ui: &mut Ui, state: &mut AppState) {
    page_header(
        ui,
        "Gene Expression Explorer",
        "Upload, search and visualize gene expression measurements.",
    );

    ui.vertical_centered(|ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            for (page, hint) in [
                (Page::Upload, "Upload a CSV file"),
                (Page::Search, "Search a gene"),
                (Page::Dashboard, "Open the dashboard"),
            ] {
                if ui.button(hint).clicked() {
                    state.set_page(page);
                }
            }
        });
    });

    ui.add_space(16.0);
    ui.strong("Expression categories");
    egui::Grid::new("home_legend")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            for (title, range, color) in legend_entries() {
                ui.label(RichText::new(title).color(color).strong());
                ui.label(range);
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

pub fn upload(ui: &mut Ui, state: &mut AppState, hovering_file: bool) {
    page_header(
        ui,
        "Upload Gene Expression Data",
        "CSV files are parsed and validated before anything is sent.",
    );

    // ---- Drop zone ----
    let stroke_color = if hovering_file {
        ui.visuals().selection.bg_fill
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };
    let zone = egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui: &mut Ui| {
                ui.add_space(16.0);
                ui.label(RichText::new("Drop your CSV file here").size(18.0));
                ui.label(RichText::new("or click to browse").weak());
                ui.add_space(16.0);
            });
        });
    let zone_clicked = zone
        .response
        .interact(egui::Sense::click())
        .clicked();
    if zone_clicked && !state.upload.is_uploading() {
        open_file_dialog(state);
    }

    // ---- Selected file + upload button ----
    if let Some(selected) = &state.upload.selected {
        let uploading = state.upload.is_uploading();
        let mut upload_clicked = false;
        ui.add_space(8.0);
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("✔").color(Color32::from_rgb(40, 170, 120)));
            ui.label(RichText::new(&selected.name).strong());
            ui.label(RichText::new(format!("{:.1} KB", selected.size_kb())).weak());
            let text = if uploading { "Uploading..." } else { "Upload" };
            upload_clicked = ui.add_enabled(!uploading, egui::Button::new(text)).clicked();
            if uploading {
                ui.spinner();
            }
        });
        if upload_clicked {
            state.start_upload();
        }
    }

    if let Some(err) = &state.upload.parse_error {
        ui.add_space(4.0);
        ui.label(RichText::new(format!("⚠ {err}")).color(Color32::RED));
    }

    if !state.upload.skipped.is_empty() {
        let skipped = &state.upload.skipped;
        egui::CollapsingHeader::new(format!("{} rows skipped during validation", skipped.len()))
            .id_salt("skipped_rows")
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                for row in skipped {
                    ui.label(format!("line {}: {}", row.line, row.reason));
                }
            });
    }

    ui.add_space(8.0);
    egui::CollapsingHeader::new("Expected CSV format")
        .id_salt("format_example")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new(FORMAT_EXAMPLE).monospace());
        });

    // ---- Result of the last successful upload ----
    let Some(dataset) = &state.upload.uploaded else {
        return;
    };

    ui.add_space(12.0);
    ui.separator();
    ui.heading("Upload Summary");
    ui.horizontal(|ui: &mut Ui| {
        stat_card(ui, "Total Records", &dataset.len().to_string(), "rows stored");
        stat_card(ui, "Unique Genes", &dataset.genes.len().to_string(), "distinct gene names");
        stat_card(ui, "Conditions", &dataset.conditions.len().to_string(), "experimental conditions");
    });

    ui.add_space(12.0);
    ui.heading("Data Preview");
    ui.label(
        RichText::new(format!(
            "Showing first {} records of {} total records",
            dataset.preview(PREVIEW_ROWS).len(),
            dataset.len()
        ))
        .weak(),
    );
    table::gene_table(ui, "upload_preview", dataset.preview(PREVIEW_ROWS), true);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

pub fn search(ui: &mut Ui, state: &mut AppState) {
    page_header(
        ui,
        "Search Gene Expression",
        "Look up a gene to see its expression across conditions.",
    );

    let searching = state.search.is_searching();
    let mut submit = false;

    ui.horizontal(|ui: &mut Ui| {
        let input = ui.add_enabled(
            !searching,
            egui::TextEdit::singleline(&mut state.search.query)
                .hint_text("Enter gene name (e.g., BRCA1)")
                .desired_width(280.0),
        );
        if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }
        let label = if searching { "Searching..." } else { "🔍 Search" };
        if ui.add_enabled(!searching, egui::Button::new(label)).clicked() {
            submit = true;
        }
        if searching {
            ui.spinner();
        }
    });

    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label(RichText::new("Popular genes:").weak());
        for gene in POPULAR_GENES {
            if ui.add_enabled(!searching, egui::Button::new(gene).small()).clicked() {
                state.search.query = gene.to_string();
            }
        }
    });

    ui.horizontal_wrapped(|ui: &mut Ui| {
        let loading = state.search.is_loading_genes();
        if ui
            .add_enabled(!loading, egui::Button::new("Load known genes").small())
            .clicked()
        {
            state.refresh_known_genes();
        }
        for gene in &state.search.known_genes {
            if ui.add_enabled(!searching, egui::Button::new(gene).small()).clicked() {
                state.search.query = gene.clone();
            }
        }
    });

    if submit {
        state.start_search();
    }

    ui.add_space(12.0);
    let Some(results) = state.search.results.as_ref().filter(|r| !r.is_empty()) else {
        if !state.search.is_searching() {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new("No Search Results").strong());
                ui.label(
                    RichText::new(
                        "Enter a gene name above to search for expression data and view visualizations.",
                    )
                    .weak(),
                );
            });
        }
        return;
    };

    let plural = if results.len() == 1 { "" } else { "s" };
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(format!("Expression Data for {}", results.gene));
        ui.label(RichText::new(format!("Found {} expression record{plural}", results.len())).weak());
    });

    ui.add_space(8.0);
    ui.strong(format!("Expression Levels - {}", results.gene));
    plot::expression_chart(ui, results);

    ui.add_space(8.0);
    ui.strong("Expression Data Table");
    table::gene_table(ui, "search_results", &results.points, false);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    page_header(
        ui,
        "Gene Expression Dashboard",
        "Overview of the stored dataset.",
    );

    let loading = state.dashboard.is_loading();
    let Some(stats) = &state.dashboard.stats else {
        ui.vertical_centered(|ui: &mut Ui| {
            if loading {
                ui.spinner();
                ui.label(RichText::new("Loading dashboard data...").weak());
            } else {
                ui.label(RichText::new("No Data Available").size(20.0).strong());
                ui.label(
                    RichText::new("Upload some gene expression data to see dashboard statistics.")
                        .weak(),
                );
            }
        });
        return;
    };

    let (top_gene, top_count) = stats
        .most_frequent()
        .map(|g| (g.gene.as_str(), g.count))
        .unwrap_or(("N/A", 0));

    let mut refresh = false;
    ui.horizontal(|ui: &mut Ui| {
        stat_card(ui, "Total Genes", &stats.total_genes.to_string(), "Unique genes in database");
        stat_card(
            ui,
            "Total Conditions",
            &stats.total_conditions.to_string(),
            "Different experimental conditions",
        );
        stat_card(
            ui,
            "Most Frequent Gene",
            top_gene,
            &format!("{top_count} expression records"),
        );
        refresh = ui
            .add_enabled(!loading, egui::Button::new("⟳ Refresh"))
            .clicked();
    });

    if !stats.top_genes.is_empty() {
        ui.add_space(12.0);
        ui.strong("Most Frequent Genes");
        ui.label(
            RichText::new(format!(
                "Top {} genes by number of expression records",
                stats.top_genes.len()
            ))
            .weak(),
        );
        plot::top_genes_chart(ui, stats);
    }

    ui.add_space(12.0);
    ui.strong("Dataset Overview");
    egui::Grid::new("dataset_overview")
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new("Data Points:").weak());
            ui.label(stats.data_points().to_string());
            ui.end_row();
            ui.label(RichText::new("Top Genes Shown:").weak());
            ui.label(stats.top_genes.len().to_string());
            ui.end_row();
        });

    if refresh {
        state.refresh_stats();
    }
}
