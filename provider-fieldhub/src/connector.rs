//! FieldHub API connector implementation
//!
//! Implements the `FormSource` trait against a FieldHub form server.

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpRequest};
use bytes::Bytes;
use core_forms::source::{FormListItem, FormSource, FormSourceError, ManifestFile};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::FieldHubError;
use crate::types::{FormListResponse, ManifestResponse};

/// Path of the form index relative to the server base URL
const FORM_LIST_PATH: &str = "/formList";

/// Attempts per request before a retryable failure becomes an error
const MAX_ATTEMPTS: u32 = 3;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// FieldHub API connector
///
/// # Features
///
/// - JSON form index listing and manifest resolution
/// - Raw byte downloads for form definitions and media attachments
/// - Exponential backoff for rate limiting (429) and server errors (5xx)
/// - Optional bearer-token authentication via `HttpClient`
///
/// # Example
///
/// ```ignore
/// use provider_fieldhub::FieldHubConnector;
/// use core_forms::source::FormSource;
///
/// let connector = FieldHubConnector::new(http_client, "https://forms.example.com");
/// let items = connector.fetch_form_list().await?;
/// ```
pub struct FieldHubConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Server base URL, without a trailing slash
    base_url: String,

    /// Optional bearer token
    api_token: Option<String>,
}

impl FieldHubConnector {
    /// Create a new connector for an unauthenticated server
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
        }
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    fn form_list_url(&self) -> String {
        format!("{}{}", self.base_url, FORM_LIST_PATH)
    }

    fn request(&self, url: &str) -> HttpRequest {
        let mut request = HttpRequest::get(url)
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        if let Some(token) = &self.api_token {
            request = request.bearer_token(token);
        }

        request
    }

    /// Execute a GET with bounded exponential backoff.
    ///
    /// 429 and 5xx responses and transport failures are retried; 401/403
    /// map to `AuthRequired` and other client errors fail immediately.
    async fn execute_with_retry(
        &self,
        url: &str,
    ) -> Result<bridge_traits::http::HttpResponse, FieldHubError> {
        let mut attempt = 0;

        loop {
            match self.http_client.execute(self.request(url)).await {
                Ok(response) => {
                    let status = response.status;

                    if response.is_success() {
                        debug!(url, status, "FieldHub request succeeded");
                        return Ok(response);
                    }

                    if status == 401 || status == 403 {
                        return Err(FieldHubError::AuthRequired {
                            url: url.to_string(),
                        });
                    }

                    if status == 429 || response.is_server_error() {
                        attempt += 1;
                        if attempt >= MAX_ATTEMPTS {
                            warn!(url, status, attempts = attempt, "FieldHub request failed");
                            return Err(FieldHubError::Api {
                                status_code: status,
                                url: url.to_string(),
                            });
                        }

                        let backoff_ms = 100u64 * 2u64.pow(attempt);
                        warn!(
                            url,
                            status,
                            attempt,
                            backoff_ms,
                            "Retryable FieldHub status, backing off"
                        );
                        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                        continue;
                    }

                    return Err(FieldHubError::Api {
                        status_code: status,
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    attempt += 1;
                    if attempt >= MAX_ATTEMPTS {
                        warn!(url, error = %e, attempts = attempt, "FieldHub request failed");
                        return Err(FieldHubError::Network {
                            url: url.to_string(),
                            message: e.to_string(),
                        });
                    }

                    let backoff_ms = 100u64 * 2u64.pow(attempt);
                    warn!(url, error = %e, attempt, backoff_ms, "Transport failure, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
            }
        }
    }
}

#[async_trait]
impl FormSource for FieldHubConnector {
    #[instrument(skip(self))]
    async fn fetch_form_list(&self) -> Result<Vec<FormListItem>, FormSourceError> {
        let url = self.form_list_url();
        let response = self.execute_with_retry(&url).await?;

        let list: FormListResponse =
            serde_json::from_slice(&response.body).map_err(|e| FieldHubError::Parse {
                url: url.clone(),
                message: e.to_string(),
            })?;

        info!(count = list.forms.len(), "Fetched form index");
        Ok(list.forms.into_iter().map(FormListItem::from).collect())
    }

    #[instrument(skip(self), fields(manifest_url = %manifest_url))]
    async fn fetch_manifest(&self, manifest_url: &str) -> Result<ManifestFile, FormSourceError> {
        let response = self.execute_with_retry(manifest_url).await?;

        let manifest: ManifestResponse =
            serde_json::from_slice(&response.body).map_err(|e| FieldHubError::Parse {
                url: manifest_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(ManifestFile::from(manifest))
    }

    #[instrument(skip(self), fields(download_url = %download_url))]
    async fn fetch_form(&self, download_url: &str) -> Result<Bytes, FormSourceError> {
        let response = self.execute_with_retry(download_url).await?;
        debug!(bytes = response.body.len(), "Downloaded form definition");
        Ok(response.body)
    }

    #[instrument(skip(self), fields(download_url = %download_url))]
    async fn fetch_media_file(&self, download_url: &str) -> Result<Bytes, FormSourceError> {
        let response = self.execute_with_retry(download_url).await?;
        debug!(bytes = response.body.len(), "Downloaded media attachment");
        Ok(response.body)
    }
}
