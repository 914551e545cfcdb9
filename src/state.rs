use std::path::PathBuf;

use poll_promise::Promise;

use crate::api::{ApiClient, ApiError};
use crate::data::error::IngestError;
use crate::data::loader::{self, SkippedRow};
use crate::data::model::{ConditionExpression, DashboardStats, ExpressionSeries, GeneDataset, GeneRecord};

/// Shortcut buttons on the search page.
pub const POPULAR_GENES: [&str; 6] = ["BRCA1", "TP53", "EGFR", "MYC", "KRAS", "PIK3CA"];

/// Rows shown in the post-upload preview table.
pub const PREVIEW_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// Navigation and notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Upload,
    Search,
    Dashboard,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Upload, Page::Search, Page::Dashboard];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Upload => "Upload",
            Page::Search => "Search",
            Page::Dashboard => "Dashboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// The notification shown in the status bar until dismissed or replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub title: String,
    pub detail: String,
}

impl StatusMessage {
    fn new(kind: StatusKind, title: &str, detail: impl Into<String>) -> Self {
        StatusMessage {
            kind,
            title: title.to_string(),
            detail: detail.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-page state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
}

impl SelectedFile {
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

#[derive(Default)]
pub struct UploadState {
    pub selected: Option<SelectedFile>,
    /// Inline error under the upload widget (file type, parse, no data).
    pub parse_error: Option<String>,
    /// Last successfully uploaded dataset.
    pub uploaded: Option<GeneDataset>,
    /// Rows dropped by the most recent ingestion of the selected file.
    pub skipped: Vec<SkippedRow>,
    pending: Option<Promise<Result<Vec<GeneRecord>, ApiError>>>,
}

impl UploadState {
    pub fn is_uploading(&self) -> bool {
        self.pending.is_some()
    }
}

type SearchOutcome = (String, Result<Vec<ConditionExpression>, ApiError>);

#[derive(Default)]
pub struct SearchState {
    pub query: String,
    /// Last completed search, kept when a later one fails.
    pub results: Option<ExpressionSeries>,
    /// Gene names from `GET /genes`, loaded on demand.
    pub known_genes: Vec<String>,
    pending: Option<Promise<SearchOutcome>>,
    pending_genes: Option<Promise<Result<Vec<String>, ApiError>>>,
}

impl SearchState {
    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_loading_genes(&self) -> bool {
        self.pending_genes.is_some()
    }
}

#[derive(Default)]
pub struct DashboardState {
    pub stats: Option<DashboardStats>,
    pending: Option<Promise<Result<DashboardStats, ApiError>>>,
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Each network call runs on its own thread behind a [`Promise`]; the
/// trigger for a call stays disabled while its promise is pending, and
/// [`AppState::poll`] folds finished results back in once per frame.
pub struct AppState {
    pub page: Page,
    pub client: ApiClient,
    pub upload: UploadState,
    pub search: SearchState,
    pub dashboard: DashboardState,
    pub status: Option<StatusMessage>,
}

impl AppState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            page: Page::Home,
            client,
            upload: UploadState::default(),
            search: SearchState::default(),
            dashboard: DashboardState::default(),
            status: None,
        }
    }

    /// Switch page. Opening the dashboard always refetches its stats.
    pub fn set_page(&mut self, page: Page) {
        self.page = page;
        if page == Page::Dashboard {
            self.refresh_stats();
        }
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Whether any request is still in flight.
    pub fn is_busy(&self) -> bool {
        self.upload.is_uploading()
            || self.search.is_searching()
            || self.search.is_loading_genes()
            || self.dashboard.is_loading()
    }

    /// Apply every finished request.
    pub fn poll(&mut self) {
        if let Some(result) = take_ready(&mut self.upload.pending) {
            self.finish_upload(result);
        }
        if let Some((gene, result)) = take_ready(&mut self.search.pending) {
            self.finish_search(gene, result);
        }
        if let Some(result) = take_ready(&mut self.search.pending_genes) {
            self.finish_known_genes(result);
        }
        if let Some(result) = take_ready(&mut self.dashboard.pending) {
            self.finish_stats(result);
        }
    }

    // -- upload --

    /// Remember a picked or dropped file if its name ends in `.csv`.
    pub fn select_file(&mut self, path: PathBuf) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.upload.skipped.clear();
        if let Err(e) = loader::check_file_name(&name) {
            log::warn!("Rejected {}: {e}", path.display());
            self.upload.parse_error = Some(e.to_string());
            return;
        }

        let size_bytes = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        self.upload.selected = Some(SelectedFile {
            path,
            name,
            size_bytes,
        });
        self.upload.parse_error = None;
    }

    /// Ingest the selected file and, if it yields records, send them.
    pub fn start_upload(&mut self) {
        if self.upload.is_uploading() {
            return;
        }
        let Some(selected) = &self.upload.selected else {
            return;
        };

        self.upload.skipped.clear();
        let report = match loader::load_file(&selected.path) {
            Ok(report) => report,
            Err(e) => {
                log::warn!("Ingestion of {} failed: {e}", selected.path.display());
                self.upload.parse_error = Some(e.to_string());
                if let IngestError::NoValidData { skipped } = e {
                    self.upload.skipped = skipped;
                }
                return;
            }
        };

        self.upload.parse_error = None;
        self.upload.skipped = report.skipped;

        let client = self.client.clone();
        let records = report.records;
        self.upload.pending = Some(Promise::spawn_thread("upload", move || {
            client.upload(&records).map(|()| records)
        }));
    }

    fn finish_upload(&mut self, result: Result<Vec<GeneRecord>, ApiError>) {
        match result {
            Ok(records) => {
                let dataset = GeneDataset::from_records(records);
                self.status = Some(StatusMessage::new(
                    StatusKind::Success,
                    "Upload Successful",
                    format!("Successfully uploaded {} gene expression records.", dataset.len()),
                ));
                self.upload.uploaded = Some(dataset);
            }
            Err(e) => {
                log::error!("Error uploading data: {e}");
                self.status = Some(StatusMessage::new(
                    StatusKind::Error,
                    "Upload Failed",
                    "There was an error uploading your data. Please try again.",
                ));
            }
        }
    }

    // -- search --

    pub fn start_search(&mut self) {
        if self.search.is_searching() {
            return;
        }
        let gene = self.search.query.trim().to_string();
        if gene.is_empty() {
            self.status = Some(StatusMessage::new(
                StatusKind::Error,
                "Input Required",
                "Please enter a gene name to search.",
            ));
            return;
        }

        let client = self.client.clone();
        self.search.pending = Some(Promise::spawn_thread("search", move || {
            let result = client.search_gene(&gene);
            (gene, result)
        }));
    }

    fn finish_search(&mut self, gene: String, result: Result<Vec<ConditionExpression>, ApiError>) {
        match result {
            Ok(points) => {
                self.status = Some(if points.is_empty() {
                    StatusMessage::new(
                        StatusKind::Info,
                        "No Results",
                        format!("No expression data found for gene \"{gene}\"."),
                    )
                } else {
                    StatusMessage::new(
                        StatusKind::Success,
                        "Search Complete",
                        format!("Found {} expression records for \"{gene}\".", points.len()),
                    )
                });
                self.search.results = Some(ExpressionSeries { gene, points });
            }
            Err(e) => {
                log::error!("Error searching gene {gene}: {e}");
                self.status = Some(StatusMessage::new(
                    StatusKind::Error,
                    "Search Failed",
                    "There was an error searching for the gene. Please try again.",
                ));
            }
        }
    }

    pub fn refresh_known_genes(&mut self) {
        if self.search.is_loading_genes() {
            return;
        }
        let client = self.client.clone();
        self.search.pending_genes = Some(Promise::spawn_thread("list_genes", move || {
            client.list_genes()
        }));
    }

    fn finish_known_genes(&mut self, result: Result<Vec<String>, ApiError>) {
        match result {
            Ok(genes) => self.search.known_genes = genes,
            Err(e) => {
                log::error!("Error fetching genes: {e}");
                self.status = Some(StatusMessage::new(
                    StatusKind::Error,
                    "Failed to Load Genes",
                    "There was an error fetching the gene list.",
                ));
            }
        }
    }

    // -- dashboard --

    pub fn refresh_stats(&mut self) {
        if self.dashboard.is_loading() {
            return;
        }
        let client = self.client.clone();
        self.dashboard.pending = Some(Promise::spawn_thread("dashboard_stats", move || {
            client.dashboard_stats()
        }));
    }

    fn finish_stats(&mut self, result: Result<DashboardStats, ApiError>) {
        match result {
            Ok(stats) => self.dashboard.stats = Some(stats),
            Err(e) => {
                log::error!("Error fetching dashboard stats: {e}");
                self.status = Some(StatusMessage::new(
                    StatusKind::Error,
                    "Failed to Load Dashboard",
                    "There was an error loading the dashboard data.",
                ));
            }
        }
    }
}

/// Take the value out of a finished promise, leaving pending ones in place.
fn take_ready<T: Send + 'static>(slot: &mut Option<Promise<T>>) -> Option<T> {
    let promise = slot.take()?;
    match promise.try_take() {
        Ok(value) => Some(value),
        Err(promise) => {
            *slot = Some(promise);
            None
        }
    }
}
