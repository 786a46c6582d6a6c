//! HTTP access to the email search API
//!
//! This module provides the request-issuing collaborator used by the email
//! service: an [`Api`] trait with one method per HTTP verb, and an
//! [`ApiClient`] implementation backed by reqwest.

mod client;
mod types;

pub use client::{Api, ApiClient};
pub use types::{ApiConfig, ApiResponse, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
