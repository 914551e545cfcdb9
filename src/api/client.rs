use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use url::Url;

use super::config::ApiConfig;
use super::error::ApiError;
use crate::data::model::{ConditionExpression, DashboardStats, GeneRecord};

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Blocking client for the gene-expression API.
///
/// One request per call, no retry and no timeout. Calls are meant to run on
/// a background thread; the client is cheap to clone into one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.resolve_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()?;

        log::info!("API base URL: {base_url}");
        Ok(ApiClient { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /upload` with the records as a JSON array.
    pub fn upload(&self, records: &[GeneRecord]) -> Result<(), ApiError> {
        let url = self.endpoint(&["upload"])?;
        log::debug!("POST {url} ({} records)", records.len());
        let response = self.http.post(url.clone()).json(records).send()?;
        check_status(&url, response)?;
        Ok(())
    }

    /// `GET /genes/{gene}`; the name is percent-escaped as one path segment.
    pub fn search_gene(&self, gene: &str) -> Result<Vec<ConditionExpression>, ApiError> {
        let url = self.endpoint(&["genes", gene])?;
        log::debug!("GET {url}");
        let response = self.http.get(url.clone()).send()?;
        Ok(check_status(&url, response)?.json()?)
    }

    /// `GET /genes`: every known gene name.
    pub fn list_genes(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["genes"])?;
        log::debug!("GET {url}");
        let response = self.http.get(url.clone()).send()?;
        Ok(check_status(&url, response)?.json()?)
    }

    /// `GET /dashboard/stats`.
    pub fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let url = self.endpoint(&["dashboard", "stats"])?;
        log::debug!("GET {url}");
        let response = self.http.get(url.clone()).send()?;
        Ok(check_status(&url, response)?.json()?)
    }

    /// Append path segments to the base URL, escaping each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn check_status(url: &Url, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            endpoint: url.path().to_string(),
            status: status.as_u16(),
        })
    }
}
