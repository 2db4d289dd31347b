//! Fieldform SDK
//!
//! Async client for the field sales intake API. The public intake surface
//! (registry reads, searches, multipart form submission) needs no
//! credential; the admin surface (submissions, registry appends) is gated
//! by an `X-API-Key` header carried by an [`AdminSession`].
//!
//! # Example
//!
//! ```rust,no_run
//! use fieldform_core::{validate, FormDraft};
//! use fieldform_sdk::ApiClient;
//!
//! # async fn run() -> fieldform_sdk::Result<()> {
//! let client = ApiClient::new("http://localhost:3000/api");
//! let types = client.building_types().await?;
//!
//! let draft = FormDraft { building_type: types[0].clone(), ..Default::default() };
//! if let Ok(valid) = validate(&draft) {
//!     let result = client.submit_draft(&valid).await?;
//!     println!("submitted: {:?}", result.submission_id);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use fieldform_core::draft::{Submission, SubmissionResult};
use fieldform_core::encode::FormPart;
use fieldform_core::validate::ValidDraft;

pub use error::{Error, Result};
pub use search::{SalesmanSearcher, VillageSearcher};
pub use session::{AdminSession, KeyStore, MemoryKeyStore};

pub mod error;
pub mod search;
pub mod session;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_HEADER: &str = "X-API-Key";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Fieldform API client. Cheap to clone; connections are pooled.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    salesman_data: Option<Vec<String>>,
    #[serde(default)]
    building_types: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    /// Client against `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            inner: Arc::new(ClientInner { config, http }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<serde_json::Value> {
        let url = self.url("/health", &[])?;
        let resp = self.inner.http.get(url).send().await?;
        self.parse(resp).await
    }

    /// `GET /building-types`
    pub async fn building_types(&self) -> Result<Vec<String>> {
        let url = self.url("/building-types", &[])?;
        let resp = self.inner.http.get(url).send().await?;
        self.parse(resp).await
    }

    /// `GET /salesman`: the full registry, unsearched.
    pub async fn salesmen(&self) -> Result<Vec<String>> {
        let url = self.url("/salesman", &[])?;
        let resp = self.inner.http.get(url).send().await?;
        self.parse(resp).await
    }

    /// `GET /salesman/search?query=`
    pub async fn search_salesmen(&self, query: &str) -> Result<Vec<String>> {
        let url = self.url("/salesman/search", &[("query", query)])?;
        let resp = self.inner.http.get(url).send().await?;
        self.parse(resp).await
    }

    /// `GET /villages/search?query=`
    pub async fn search_villages(&self, query: &str) -> Result<Vec<String>> {
        let url = self.url("/villages/search", &[("query", query)])?;
        let resp = self.inner.http.get(url).send().await?;
        self.parse(resp).await
    }

    /// `POST /submit-form` (multipart).
    ///
    /// The draft is borrowed, not consumed: whatever the outcome, the caller
    /// still holds it and can retry without re-entering data. A body with
    /// `success: false` is returned as a normal [`SubmissionResult`] carrying
    /// the server's message.
    pub async fn submit_draft(&self, draft: &ValidDraft) -> Result<SubmissionResult> {
        let mut form = multipart::Form::new();
        for part in draft.clone().into_parts() {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    filename,
                    content_type,
                    bytes,
                } => {
                    let part = multipart::Part::bytes(bytes)
                        .file_name(filename)
                        .mime_str(&content_type)?;
                    form.part(name, part)
                }
            };
        }

        let url = self.url("/submit-form", &[])?;
        let resp = self.inner.http.post(url).multipart(form).send().await?;
        let result: SubmissionResult = self.parse(resp).await?;
        tracing::info!(
            success = result.success,
            submission_id = result.submission_id.as_deref().unwrap_or(""),
            "form submitted"
        );
        Ok(result)
    }

    /// `GET /submissions` (admin).
    pub async fn submissions(&self, session: &AdminSession) -> Result<Vec<Submission>> {
        let url = self.url("/submissions", &[])?;
        let resp = self
            .inner
            .http
            .get(url)
            .header(API_KEY_HEADER, session.api_key())
            .send()
            .await?;
        self.parse(resp).await
    }

    /// `GET /submissions/{id}` (admin).
    pub async fn submission(&self, id: &str, session: &AdminSession) -> Result<Submission> {
        let url = self.url(&format!("/submissions/{id}"), &[])?;
        let resp = self
            .inner
            .http
            .get(url)
            .header(API_KEY_HEADER, session.api_key())
            .send()
            .await?;
        self.parse(resp).await
    }

    /// `POST /salesman` (admin): append and return the updated registry.
    pub async fn add_salesman(&self, name: &str, session: &AdminSession) -> Result<Vec<String>> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
        }
        let response = self
            .post_registry("/salesman", &Body { name }, session)
            .await?;
        Ok(response.salesman_data.unwrap_or_default())
    }

    /// `POST /building-types` (admin): append and return the updated
    /// registry.
    pub async fn add_building_type(
        &self,
        building_type: &str,
        session: &AdminSession,
    ) -> Result<Vec<String>> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(rename = "type")]
            building_type: &'a str,
        }
        let response = self
            .post_registry("/building-types", &Body { building_type }, session)
            .await?;
        Ok(response.building_types.unwrap_or_default())
    }

    async fn post_registry<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        session: &AdminSession,
    ) -> Result<RegistryResponse> {
        let url = self.url(path, &[])?;
        let resp = self
            .inner
            .http
            .post(url)
            .header(API_KEY_HEADER, session.api_key())
            .json(body)
            .send()
            .await?;
        let response: RegistryResponse = self.parse(resp).await?;
        if !response.success {
            return Err(Error::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "request rejected".to_string()),
            ));
        }
        Ok(response)
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.inner.config.base_url, path))?;
        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    async fn parse<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message.or(body.error))
                .unwrap_or_else(|| status.to_string());
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json().await?)
    }
}
