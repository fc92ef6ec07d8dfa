use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hospital_core::{Doctor, Patient, Prescription, Record, Visit};
use hospital_storage::{HospitalApi, ResourceApi, StorageError};
use reqwest::Url;

use crate::response::{decode_created, decode_created_many, decode_list, error_for_status};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Base URL cannot carry a path: {0}")]
    CannotBeABase(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Shared HTTP client plus the API base URL.
#[derive(Debug, Clone)]
pub struct HospitalClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HospitalClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::CannotBeABase(config.base_url.clone()));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Typed API for one resource kind.
    pub fn resource<R: Record>(&self) -> HttpResourceApi<R> {
        HttpResourceApi {
            client: self.clone(),
            _marker: PhantomData,
        }
    }

    /// All four resource APIs bundled for the store.
    pub fn hospital_api(&self) -> HospitalApi {
        HospitalApi::new(
            Arc::new(self.resource::<Patient>()),
            Arc::new(self.resource::<Doctor>()),
            Arc::new(self.resource::<Visit>()),
            Arc::new(self.resource::<Prescription>()),
        )
    }

    /// `{base}/api/{segments...}` with each segment percent-encoded.
    fn api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was ruled out in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, StorageError> {
        request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                StorageError::connection_error(format!("Failed to connect to server: {e}"))
            })
    }
}

/// [`ResourceApi`] over the REST API for records of type `R`.
#[derive(Debug, Clone)]
pub struct HttpResourceApi<R: Record> {
    client: HospitalClient,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> HttpResourceApi<R> {
    fn collection_url(&self) -> Url {
        self.client.api_url(&[R::KIND.plural()])
    }
}

#[async_trait]
impl<R: Record> ResourceApi<R> for HttpResourceApi<R> {
    async fn get_all(&self) -> Result<Vec<R>, StorageError> {
        let url = self.collection_url();
        tracing::debug!(kind = %R::KIND, %url, "GET collection");
        let resp = self.client.send(self.client.http.get(url)).await?;
        let body = read_success(resp, R::KIND, None).await?;
        decode_list(&body)
    }

    async fn create(&self, record: &R) -> Result<R, StorageError> {
        let url = self.collection_url();
        tracing::debug!(kind = %R::KIND, id = record.id(), %url, "POST record");
        let resp = self.client.send(self.client.http.post(url).json(record)).await?;
        let body = read_success(resp, R::KIND, Some(record.id())).await?;
        decode_created(&body, record)
    }

    async fn create_many(&self, records: &[R]) -> Result<Vec<R>, StorageError> {
        let url = self.client.api_url(&[R::KIND.plural(), "bulk"]);
        tracing::debug!(kind = %R::KIND, count = records.len(), %url, "POST bulk");
        let resp = self.client.send(self.client.http.post(url).json(records)).await?;
        let body = read_success(resp, R::KIND, None).await?;
        decode_created_many(&body, records)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let url = self.client.api_url(&[R::KIND.plural(), id]);
        tracing::debug!(kind = %R::KIND, id, %url, "DELETE record");
        let resp = self.client.send(self.client.http.delete(url)).await?;
        read_success(resp, R::KIND, Some(id)).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

/// Reads the body, turning non-2xx statuses into storage errors.
async fn read_success(
    resp: reqwest::Response,
    kind: hospital_core::ResourceKind,
    id: Option<&str>,
) -> Result<String, StorageError> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| {
        StorageError::connection_error(format!("Failed to read response body: {e}"))
    })?;
    if !status.is_success() {
        return Err(error_for_status(kind, id, status.as_u16(), &body));
    }
    Ok(body)
}
