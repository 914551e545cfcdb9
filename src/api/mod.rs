//! Client for the remote gene-expression API.
//!
//! ```text
//!   ApiConfig ──resolve──▶ base URL (…/api)
//!                               │
//!                               ▼
//!                          ApiClient ──▶ POST /upload
//!                                    ──▶ GET  /genes
//!                                    ──▶ GET  /genes/{gene}
//!                                    ──▶ GET  /dashboard/stats
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
