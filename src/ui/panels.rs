use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::legend_entries;
use crate::state::{AppState, Page, StatusKind};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("🧬 Gene Vision");
    });
    ui.add_space(4.0);
    ui.separator();

    for page in Page::ALL {
        if ui
            .selectable_label(state.page == page, page.title())
            .clicked()
            && state.page != page
        {
            state.set_page(page);
        }
    }

    ui.separator();
    ui.strong("Expression levels");
    for (title, range, color) in legend_entries() {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("■").color(color));
            ui.label(format!("{title}  {range}"));
        });
    }

    ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui: &mut Ui| {
        ui.label(
            RichText::new(state.client.base_url().as_str())
                .monospace()
                .small()
                .weak(),
        );
        ui.label(RichText::new("API").small());
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(!state.upload.is_uploading(), egui::Button::new("Open CSV…"))
                .clicked()
            {
                state.page = Page::Upload;
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.upload.uploaded {
            ui.label(format!(
                "{} records uploaded ({} genes, {} conditions)",
                ds.len(),
                ds.genes.len(),
                ds.conditions.len()
            ));
        }

        if state.is_busy() {
            ui.separator();
            ui.spinner();
        }
    });
}

// ---------------------------------------------------------------------------
// Status bar – the current notification
// ---------------------------------------------------------------------------

pub fn status_bar(ui: &mut Ui, state: &mut AppState) {
    let Some(status) = &state.status else {
        ui.label(RichText::new("Ready").weak());
        return;
    };

    let color = match status.kind {
        StatusKind::Info => ui.visuals().text_color(),
        StatusKind::Success => Color32::from_rgb(40, 170, 120),
        StatusKind::Error => Color32::RED,
    };

    let mut dismissed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(&status.title).color(color).strong());
        ui.label(&status.detail);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            dismissed = ui.small_button("✕").clicked();
        });
    });

    if dismissed {
        state.clear_status();
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open gene expression data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Selected {}", path.display());
        state.select_file(path);
    }
}
