use std::time::Duration;

use eframe::egui;

use crate::api::ApiClient;
use crate::state::{AppState, Page};
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GeneVisionApp {
    pub state: AppState,
}

impl GeneVisionApp {
    pub fn new(client: ApiClient) -> Self {
        Self {
            state: AppState::new(client),
        }
    }

    /// A file dropped anywhere on the window goes to the upload page.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|f| f.path.clone())
        });
        if let Some(path) = dropped {
            self.state.page = Page::Upload;
            self.state.select_file(path);
        }
    }
}

impl eframe::App for GeneVisionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();
        self.handle_dropped_files(ctx);
        let hovering_file = ctx.input(|i| !i.raw.hovered_files.is_empty());

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: notification ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.state.page {
                    Page::Home => pages::home(ui, &mut self.state),
                    Page::Upload => pages::upload(ui, &mut self.state, hovering_file),
                    Page::Search => pages::search(ui, &mut self.state),
                    Page::Dashboard => pages::dashboard(ui, &mut self.state),
                });
        });

        // Keep polling while requests are in flight.
        if self.state.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
