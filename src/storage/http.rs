//! HTTP object gateway store
//!
//! Writes objects with `PUT <endpoint>/<bucket>/<key>`, the addressing used
//! by S3-compatible gateways and presigning proxies.

use crate::storage::traits::{validate_object_name, ObjectStore, StorageError, StorageResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Object store speaking plain HTTP PUT/GET to a gateway
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpStore {
    /// Creates a store for `endpoint`, authenticating with `token` if given
    pub fn new(client: Client, endpoint: &str, token: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Creates a store whose bearer token is read from the environment
    ///
    /// # Returns
    ///
    /// * `Err(StorageError::MissingCredentials)` - `token_env` is unset or empty
    pub fn from_env(client: Client, endpoint: &str, token_env: &str) -> StorageResult<Self> {
        let token = std::env::var(token_env)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| StorageError::MissingCredentials(token_env.to_string()))?;
        Ok(Self::new(client, endpoint, Some(token)))
    }

    fn object_url(&self, bucket: &str, key: &str) -> StorageResult<String> {
        validate_object_name(bucket)?;
        validate_object_name(key)?;
        Ok(format!("{}/{}/{}", self.endpoint, bucket, key))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ObjectStore for HttpStore {
    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> StorageResult<()> {
        let url = self.object_url(bucket, key)?;
        let request = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_vec());

        let response = self.authorize(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Status {
                key: format!("{}/{}", bucket, key),
                status: status.as_u16(),
            });
        }

        tracing::debug!("PUT {} ({} bytes) -> {}", url, body.len(), status.as_u16());
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let url = self.object_url(bucket, key)?;
        let response = self.authorize(self.client.get(&url)).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.bytes().await?.to_vec())),
            status => Err(StorageError::Status {
                key: format!("{}/{}", bucket, key),
                status: status.as_u16(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("http {}", self.endpoint)
    }
}
