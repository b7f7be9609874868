//! HTTP backend for the datastore REST API

use crate::backend::{DatastoreBackend, QueryBackend};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::request::{
    CommitRequest, CommitResponse, ExportRequest, ImportRequest, LookupRequest, LookupResponse,
    Operation, RunQueryRequest, RunQueryResponse,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Talks JSON over HTTP to `{endpoint}/v1/projects/{project}:{method}`
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http_client: reqwest::Client,
    endpoint: String,
    project: String,
}

impl HttpBackend {
    /// Build a backend from validated config
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the config is incomplete, or
    /// [`Error::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project: config.project.clone(),
        })
    }

    /// Project the backend addresses
    pub fn project(&self) -> &str {
        &self.project
    }

    /// URL of one API method
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/v1/projects/{}:{}", self.endpoint, self.project, method)
    }

    async fn call<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.method_url(method);
        debug!(target: "dsadmin::http", method, url = %url, "Calling datastore API");

        let response = self.http_client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = Error::from_api_body(status.as_u16(), &body);
            warn!(target: "dsadmin::http", method, status = status.as_u16(), error = %err, "Datastore API call failed");
            return Err(err);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl QueryBackend for HttpBackend {
    async fn run_query(&self, request: &RunQueryRequest) -> Result<RunQueryResponse> {
        self.call("runQuery", request).await
    }
}

#[async_trait]
impl DatastoreBackend for HttpBackend {
    async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse> {
        self.call("lookup", request).await
    }

    async fn commit(&self, request: &CommitRequest) -> Result<CommitResponse> {
        self.call("commit", request).await
    }

    async fn import(&self, request: &ImportRequest) -> Result<Operation> {
        self.call("import", request).await
    }

    async fn export(&self, request: &ExportRequest) -> Result<Operation> {
        self.call("export", request).await
    }
}
